//! Product domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use tradepost_core::{AdminId, ProductId};

/// A catalog product, strongly owned by its creating administrator.
///
/// `creator_id` is immutable after creation; every mutation is scoped by
/// `(id, creator_id)` so an ownership failure is indistinguishable from
/// non-existence.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    pub image_url: String,
    pub creator_id: AdminId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated fields for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub product_name: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub stock: i32,
    pub image_url: String,
}

/// Validated partial update: any subset of product fields.
///
/// `None` means "leave unchanged".
#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub category: Option<String>,
    pub stock: Option<i32>,
    pub image_url: Option<String>,
}

impl ProductPatch {
    /// Whether the patch changes anything at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.stock.is_none()
            && self.image_url.is_none()
    }
}
