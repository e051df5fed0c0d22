//! Catalog route handlers (administrator credential required).

use axum::{
    Router, extract::State, http::StatusCode, response::IntoResponse, routing::get,
};
use serde_json::json;

use tradepost_core::ProductId;

use crate::error::Result;
use crate::middleware::{AdminAuth, Json, Path};
use crate::services::catalog::{CatalogService, CreateProductRequest, UpdateProductRequest};
use crate::state::AppState;

/// Build the catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            axum::routing::put(update_product).delete(delete_product),
        )
}

/// Fetch all products created by the authenticated administrator.
///
/// # Errors
///
/// Returns 404 when the administrator owns no products.
pub async fn list_products(
    AdminAuth(admin_id): AdminAuth,
    State(state): State<AppState>,
) -> Result<impl IntoResponse> {
    let products = CatalogService::new(state.pool()).list(admin_id).await?;

    Ok(Json(json!({
        "message": "Fetched all products for the admin",
        "products": products,
    })))
}

/// Create a product owned by the authenticated administrator.
///
/// # Errors
///
/// Returns 400 if any field constraint is unmet.
pub async fn create_product(
    AdminAuth(admin_id): AdminAuth,
    State(state): State<AppState>,
    Json(body): Json<CreateProductRequest>,
) -> Result<impl IntoResponse> {
    let product = CatalogService::new(state.pool())
        .create(admin_id, body)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Product created successfully",
            "product": product,
        })),
    ))
}

/// Apply a partial update to an owned product.
///
/// # Errors
///
/// Returns 400 on an invalid field, 404 when the id does not match a
/// product owned by this administrator.
pub async fn update_product(
    AdminAuth(admin_id): AdminAuth,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
    Json(body): Json<UpdateProductRequest>,
) -> Result<impl IntoResponse> {
    let product = CatalogService::new(state.pool())
        .update(admin_id, product_id, body)
        .await?;

    Ok(Json(json!({
        "message": "Product updated successfully",
        "product": product,
    })))
}

/// Delete an owned product.
///
/// # Errors
///
/// Returns 404 when the id does not match a product owned by this
/// administrator.
pub async fn delete_product(
    AdminAuth(admin_id): AdminAuth,
    State(state): State<AppState>,
    Path(product_id): Path<ProductId>,
) -> Result<impl IntoResponse> {
    let product = CatalogService::new(state.pool())
        .delete(admin_id, product_id)
        .await?;

    Ok(Json(json!({
        "message": "Product deleted successfully",
        "product": product,
    })))
}
