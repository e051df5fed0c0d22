//! Integration tests for Tradepost.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and apply migrations
//! cargo run -p tradepost-cli -- migrate
//!
//! # Start the server
//! cargo run -p tradepost-server
//!
//! # Run integration tests
//! cargo test -p tradepost-integration-tests -- --ignored
//! ```
//!
//! # Test Categories
//!
//! - `accounts` - Signup, login, and credential namespace tests
//! - `catalog` - Administrator product CRUD tests
//! - `cart` - Cart merge and mutation tests
//! - `orders` - Order snapshot and status tests
//!
//! Each test creates its own principals with unique email addresses, so
//! the suite can run repeatedly against the same database.

use reqwest::Client;
use serde_json::{Value, json};
use uuid::Uuid;

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("TRADEPOST_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// Build an HTTP client with a cookie store, so a login's `Set-Cookie`
/// credential is replayed on subsequent requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email address per call, keeping runs independent.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.com", Uuid::new_v4())
}

/// The signup payload both namespaces accept.
#[must_use]
pub fn signup_payload(email: &str) -> Value {
    json!({
        "userName": "Test Person",
        "email": email,
        "password": "hunter22",
        "confirmPassword": "hunter22",
        "contactNumber": "5550001234",
    })
}

/// Sign up and log in a customer, returning the issued credential token.
pub async fn customer_token(client: &Client, email: &str) -> String {
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/user/signup"))
        .json(&signup_payload(email))
        .send()
        .await
        .expect("Failed to sign up customer");
    assert_eq!(resp.status(), 201, "customer signup failed");

    let resp = client
        .post(format!("{base_url}/user/login"))
        .json(&json!({"email": email, "password": "hunter22"}))
        .send()
        .await
        .expect("Failed to log in customer");
    assert_eq!(resp.status(), 200, "customer login failed");

    let body: Value = resp.json().await.expect("Failed to parse login response");
    body["userToken"]
        .as_str()
        .expect("login response missing userToken")
        .to_string()
}

/// Sign up and log in an administrator, returning the issued credential token.
pub async fn admin_token(client: &Client, email: &str) -> String {
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/admin/signup"))
        .json(&signup_payload(email))
        .send()
        .await
        .expect("Failed to sign up admin");
    assert_eq!(resp.status(), 201, "admin signup failed");

    let resp = client
        .post(format!("{base_url}/admin/login"))
        .json(&json!({"email": email, "password": "hunter22"}))
        .send()
        .await
        .expect("Failed to log in admin");
    assert_eq!(resp.status(), 200, "admin login failed");

    let body: Value = resp.json().await.expect("Failed to parse login response");
    body["adminToken"]
        .as_str()
        .expect("login response missing adminToken")
        .to_string()
}

/// Create a product as the given administrator and return its JSON value.
pub async fn create_product(client: &Client, admin_token: &str, name: &str) -> Value {
    let resp = client
        .post(format!("{}/products", base_url()))
        .header("adminToken", admin_token)
        .json(&json!({
            "productName": name,
            "description": "A product created by the integration suite",
            "price": "9.99",
            "category": "fixtures",
            "stock": 25,
            "imageUrl": "https://example.com/product.png",
        }))
        .send()
        .await
        .expect("Failed to create product");
    assert_eq!(resp.status(), 201, "product creation failed");

    let body: Value = resp.json().await.expect("Failed to parse product response");
    body["product"].clone()
}
