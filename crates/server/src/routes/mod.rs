//! HTTP route handlers.
//!
//! Handlers parse the request, call a service, and wrap the result in the
//! `{message, ...payload}` envelope. All authorization happens through the
//! extractors in `middleware::auth`.

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod auth;
pub mod cart;
pub mod order_status;
pub mod orders;
pub mod products;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(auth::router())
        .merge(products::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(order_status::router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
