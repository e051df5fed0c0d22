//! Order route handlers (customer credential required).

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
};
use serde_json::json;

use tradepost_core::OrderId;

use crate::error::Result;
use crate::middleware::{CustomerAuth, Json, Path};
use crate::services::orders::{CreateOrderRequest, OrderService};
use crate::state::AppState;

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders))
        .route("/orders/create", post(create_order))
        .route("/orders/cancel/{order_id}", delete(cancel_order))
}

/// Retrieve all orders placed by the customer.
///
/// # Errors
///
/// Returns 404 when the customer has no orders.
pub async fn list_orders(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let orders = OrderService::new(state.pool()).list(customer_id).await?;

    Ok(Json(json!({
        "message": "Orders retrieved successfully",
        "orders": orders,
    })))
}

/// Create an order from a client-supplied item list.
///
/// The cart is left untouched: orders and cart lines are independent.
///
/// # Errors
///
/// Returns 400 when the payload constraints are unmet.
pub async fn create_order(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse> {
    let order = OrderService::new(state.pool())
        .create(customer_id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Order created successfully",
            "order": order,
        })),
    ))
}

/// Cancel (delete) one of the customer's own orders.
///
/// # Errors
///
/// Returns 404 when the customer owns no such order.
pub async fn cancel_order(
    CustomerAuth(customer_id): CustomerAuth,
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
) -> Result<impl IntoResponse> {
    OrderService::new(state.pool())
        .cancel(customer_id, order_id)
        .await?;

    Ok(Json(json!({
        "message": "Order deleted successfully",
    })))
}
