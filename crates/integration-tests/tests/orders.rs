//! Integration tests for orders and order status.
//!
//! These tests require:
//! - A running `PostgreSQL` database with migrations applied
//! - The server running (cargo run -p tradepost-server)
//!
//! Run with: cargo test -p tradepost-integration-tests -- --ignored

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use uuid::Uuid;

use tradepost_integration_tests::{
    admin_token, base_url, client, create_product, customer_token, unique_email,
};

fn order_payload(product_id: &str) -> Value {
    json!({
        "items": [{"productId": product_id, "quantity": 2}],
        "shippingAddress": {
            "address": "1 Main St",
            "city": "Springfield",
            "state": "IL",
            "postalCode": 62704,
            "country": "US",
        },
        "paymentMethod": "card",
        "totalAmount": "19.98",
    })
}

async fn place_order(client: &Client, token: &str, product_id: &str) -> Value {
    let resp = client
        .post(format!("{}/orders/create", base_url()))
        .header("userToken", token)
        .json(&order_payload(product_id))
        .send()
        .await
        .expect("Failed to create order");
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Order created successfully");
    body["order"].clone()
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_lifecycle() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("orders-admin")).await;
    let product = create_product(&client, &admin, "Cast Iron Skillet").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let token = customer_token(&client, &unique_email("orders")).await;

    // No orders yet
    let resp = client
        .get(format!("{base_url}/orders"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let order = place_order(&client, &token, &product_id).await;
    let order_id = order["id"].as_str().expect("order id").to_string();
    assert_eq!(order["orderStatus"], "Pending");
    assert_eq!(order["paymentStatus"], "Pending");
    assert_eq!(order["items"][0]["quantity"], 2);

    let resp = client
        .get(format!("{base_url}/orders"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["orders"].as_array().map(Vec::len), Some(1));

    let resp = client
        .delete(format!("{base_url}/orders/cancel/{order_id}"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to cancel order");
    assert_eq!(resp.status(), StatusCode::OK);

    // Cancelling again is a 404
    let resp = client
        .delete(format!("{base_url}/orders/cancel/{order_id}"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to re-cancel order");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_items_are_snapshots() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("snapshot-admin")).await;
    let product = create_product(&client, &admin, "Maple Cutting Board").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let token = customer_token(&client, &unique_email("snapshot")).await;
    let order = place_order(&client, &token, &product_id).await;
    let order_id = order["id"].as_str().expect("order id").to_string();

    // Deleting the product afterwards must not disturb the placed order
    let resp = client
        .delete(format!("{base_url}/products/{product_id}"))
        .header("adminToken", &admin)
        .send()
        .await
        .expect("Failed to delete product");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/orders"))
        .header("userToken", &token)
        .send()
        .await
        .expect("Failed to list orders");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    let listed = &body["orders"][0];
    assert_eq!(listed["id"], order_id.as_str());
    assert_eq!(listed["items"][0]["productId"], product_id.as_str());
    assert_eq!(listed["items"][0]["quantity"], 2);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_order_validation_rejects_bad_payloads() {
    let client = client();
    let base_url = base_url();
    let token = customer_token(&client, &unique_email("order-validation")).await;

    // An order must contain at least one item
    let mut payload = order_payload(&Uuid::new_v4().to_string());
    payload["items"] = json!([]);
    let resp = client
        .post(format!("{base_url}/orders/create"))
        .header("userToken", &token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to attempt create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // Shipping address fields must be non-empty
    let mut payload = order_payload(&Uuid::new_v4().to_string());
    payload["shippingAddress"]["city"] = json!("");
    let resp = client
        .post(format!("{base_url}/orders/create"))
        .header("userToken", &token)
        .json(&payload)
        .send()
        .await
        .expect("Failed to attempt create");
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "Requires running server and database"]
async fn test_admin_sets_order_status() {
    let client = client();
    let base_url = base_url();

    let admin = admin_token(&client, &unique_email("status-admin")).await;
    let product = create_product(&client, &admin, "Wool Picnic Blanket").await;
    let product_id = product["id"].as_str().expect("product id").to_string();

    let token = customer_token(&client, &unique_email("status")).await;
    let order = place_order(&client, &token, &product_id).await;
    let order_id = order["id"].as_str().expect("order id").to_string();

    // A customer credential is not accepted on the status route
    let resp = client
        .put(format!("{base_url}/order-status/{order_id}"))
        .header("adminToken", &token)
        .json(&json!({"orderStatus": "Shipped"}))
        .send()
        .await
        .expect("Failed to attempt status update");
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Any administrator may move the status, including one who never
    // created the product
    let resp = client
        .put(format!("{base_url}/order-status/{order_id}"))
        .header("adminToken", &admin)
        .json(&json!({"orderStatus": "Shipped"}))
        .send()
        .await
        .expect("Failed to update status");
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = resp.json().await.expect("Failed to parse response");
    assert_eq!(body["message"], "Order status updated successfully");
    assert_eq!(body["order"]["orderStatus"], "Shipped");

    // Statuses outside the exact three-value set are rejected
    for bad in ["Delivered", "shipped", "Cancelled"] {
        let resp = client
            .put(format!("{base_url}/order-status/{order_id}"))
            .header("adminToken", &admin)
            .json(&json!({"orderStatus": bad}))
            .send()
            .await
            .expect("Failed to attempt status update");
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "status {bad}");
    }

    // An unknown order id is a 404
    let resp = client
        .put(format!("{base_url}/order-status/{}", Uuid::new_v4()))
        .header("adminToken", &admin)
        .json(&json!({"orderStatus": "Delivery"}))
        .send()
        .await
        .expect("Failed to attempt status update");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
