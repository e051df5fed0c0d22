//! Cart domain types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use tradepost_core::{CartLineId, CustomerId, ProductId};

use crate::models::Product;

/// One product+quantity entry in a customer's cart.
///
/// Unique per (customer, product): a second add merges quantities into the
/// existing line instead of creating a duplicate.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub id: CartLineId,
    pub customer_id: CustomerId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A cart line joined to the current catalog snapshot of its product.
///
/// The product is `None` when the referenced catalog record has since been
/// deleted; the line itself survives (cart and catalog are not coupled).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    #[serde(flatten)]
    pub line: CartLine,
    pub product: Option<Product>,
}
