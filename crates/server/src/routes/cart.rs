//! Cart route handlers (customer credential required).

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use tradepost_core::CartLineId;

use crate::error::Result;
use crate::middleware::{CustomerAuth, Json, Path};
use crate::services::cart::{AddCartItemRequest, CartService, UpdateCartItemRequest};
use crate::state::AppState;

/// Build the cart router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/cart", get(list_cart))
        .route("/cart/add", post(add_to_cart))
        .route("/cart/update/{item_id}", put(update_cart_item))
        .route("/cart/remove/{item_id}", delete(remove_cart_item))
}

/// Retrieve the customer's cart with current product snapshots.
///
/// # Errors
///
/// Returns 404 when the cart is empty.
pub async fn list_cart(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let cart_products = CartService::new(state.pool()).list(customer_id).await?;

    Ok(Json(json!({
        "message": "Successfully retrieved all cart products",
        "cartProducts": cart_products,
    })))
}

/// Add a product to the cart, merging quantities into an existing line.
///
/// # Errors
///
/// Returns 400 when the quantity is outside [1, 100].
pub async fn add_to_cart(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
    Json(body): Json<AddCartItemRequest>,
) -> Result<impl IntoResponse> {
    CartService::new(state.pool()).add(customer_id, &body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product added successfully",
        })),
    ))
}

/// Replace the quantity of a cart line.
///
/// # Errors
///
/// Returns 400 when the quantity is invalid, 404 when the customer owns no
/// such line.
pub async fn update_cart_item(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
    Path(item_id): Path<CartLineId>,
    Json(body): Json<UpdateCartItemRequest>,
) -> Result<impl IntoResponse> {
    let line = CartService::new(state.pool())
        .set_quantity(customer_id, item_id, &body)
        .await?;

    Ok(Json(json!({
        "message": "Product quantity updated successfully",
        "product": line,
    })))
}

/// Remove a line from the cart.
///
/// # Errors
///
/// Returns 404 when the customer owns no such line.
pub async fn remove_cart_item(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
    Path(item_id): Path<CartLineId>,
) -> Result<impl IntoResponse> {
    CartService::new(state.pool())
        .remove(customer_id, item_id)
        .await?;

    Ok(Json(json!({
        "message": "Product removed successfully",
    })))
}
