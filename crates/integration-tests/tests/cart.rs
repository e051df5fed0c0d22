//! Integration tests for the per-customer cart.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p tradepost-server)
//!
//! Run with: cargo test -p tradepost-integration-tests -- --ignored

use reqwest::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use tradepost_integration_tests::{
    admin_token, base_url, client, create_product, customer_token, unique_email,
};

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_adding_same_product_merges_quantities() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("cart-admin")).await;
    let product = create_product(&client, &admin, "Canvas Tote Bag").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let token = customer_token(&client, &unique_email("cart-merge")).await;

    for quantity in [3, 4] {
        let resp = client
            .post(format!("{base_url}/cart/add"))
            .header("userToken", &token)
            .json(&json!({"productId": product_id, "quantity": quantity}))
            .send()
            .await
            .expect("Failed to add to cart");
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    // One line with the summed quantity, not two lines
    let resp = client
        .get(format!("{base_url}/cart"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list cart");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let lines = body["cartProducts"].as_array().expect("cartProducts array");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["quantity"], 7);
    assert_eq!(lines[0]["product"]["id"], product_id.as_str());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_empty_cart_is_not_found() {
    let client = client();
    let token = customer_token(&client, &unique_email("cart-empty")).await;

    let resp = client
        .get(format!("{}/cart", base_url()))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_quantity_bounds_are_enforced() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("cart-bounds-admin")).await;
    let product = create_product(&client, &admin, "Enamel Camping Mug").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let token = customer_token(&client, &unique_email("cart-bounds")).await;

    for quantity in [0, 101, -1] {
        let resp = client
            .post(format!("{base_url}/cart/add"))
            .header("userToken", &token)
            .json(&json!({"productId": product_id, "quantity": quantity}))
            .send()
            .await
            .expect("Failed to attempt add");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "quantity {quantity}");
    }
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_malformed_bodies_get_the_error_envelope() {
    let client = client();
    let base_url = base_url();
    let token = customer_token(&client, &unique_email("cart-malformed")).await;

    // Wrong-typed field: quantity as a string instead of a number
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .header("userToken", &token)
        .json(&json!({"productId": Uuid::new_v4(), "quantity": "3"}))
        .send()
        .await
        .expect("Failed to attempt add");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Validation failed");
    assert!(body["error"].is_string());

    // Missing field
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .header("userToken", &token)
        .json(&json!({"quantity": 3}))
        .send()
        .await
        .expect("Failed to attempt add");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    // Non-UUID path segment
    let resp = client
        .delete(format!("{base_url}/cart/remove/not-a-uuid"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to attempt remove");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_update_and_remove_cart_line() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("cart-update-admin")).await;
    let product = create_product(&client, &admin, "Linen Apron Set").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let token = customer_token(&client, &unique_email("cart-update")).await;

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .header("userToken", &token)
        .json(&json!({"productId": product_id, "quantity": 2}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{base_url}/cart"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list cart");
    let body: Value = resp.json().await.expect("Failed to parse response");
    let line_id = body["cartProducts"][0]["id"]
        .as_str()
        .expect("line id")
        .to_string();

    // Update replaces the quantity outright
    let resp = client
        .put(format!("{base_url}/cart/update/{line_id}"))
        .header("userToken", &token)
        .json(&json!({"quantity": 9}))
        .send()
        .await
        .expect("Failed to update line");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["product"]["quantity"], 9);

    let resp = client
        .delete(format!("{base_url}/cart/remove/{line_id}"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to remove line");
    assert_eq!(resp.status(), StatusCode::OK);

    // The line is gone, so the cart reads as empty again
    let resp = client
        .get(format!("{base_url}/cart"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list cart");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_cart_lines_are_owner_scoped() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("cart-scope-admin")).await;
    let product = create_product(&client, &admin, "Beeswax Candle Trio").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let owner = customer_token(&client, &unique_email("cart-scope-owner")).await;
    let other = customer_token(&client, &unique_email("cart-scope-other")).await;

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .header("userToken", &owner)
        .json(&json!({"productId": product_id, "quantity": 1}))
        .send()
        .await
        .expect("Failed to add to cart");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let resp = client
        .get(format!("{base_url}/cart"))
        .header("userToken", &owner)
        .send()
        .await
        .expect("Failed to list cart");
    let body: Value = resp.json().await.expect("Failed to parse response");
    let line_id = body["cartProducts"][0]["id"]
        .as_str()
        .expect("line id")
        .to_string();

    // Another customer cannot touch the line
    let resp = client
        .delete(format!("{base_url}/cart/remove/{line_id}"))
        .header("userToken", &other)
        .send()
        .await
        .expect("Failed to attempt remove");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // A made-up line id reads the same as someone else's
    let resp = client
        .delete(format!("{base_url}/cart/remove/{}", Uuid::new_v4()))
        .header("userToken", &owner)
        .send()
        .await
        .expect("Failed to attempt remove");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
