//! Order status handlers (administrator credential required).

use axum::{Router, extract::State, response::IntoResponse, routing::put};
use serde_json::json;

use tradepost_core::OrderId;

use crate::error::Result;
use crate::middleware::{AdminAuth, Json, Path};
use crate::services::orders::{OrderService, SetOrderStatusRequest};
use crate::state::AppState;

/// Build the order-status router.
pub fn router() -> Router<AppState> {
    Router::new().route("/order-status/{order_id}", put(set_order_status))
}

/// Overwrite an order's status with one of {Pending, Shipped, Delivery}.
///
/// # Errors
///
/// Returns 400 for an unknown status string, 404 for an unknown order id.
pub async fn set_order_status(
    AdminAuth(_admin_id): AdminAuth,
    State(state): State<AppState>,
    Path(order_id): Path<OrderId>,
    Json(body): Json<SetOrderStatusRequest>,
) -> Result<impl IntoResponse> {
    let order = OrderService::new(state.pool())
        .set_status(order_id, &body)
        .await?;

    Ok(Json(json!({
        "message": "Order status updated successfully",
        "order": order,
    })))
}
