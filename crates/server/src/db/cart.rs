//! Cart repository.
//!
//! The merge-on-add semantics are enforced in SQL: `add` is a single atomic
//! upsert keyed by the `(customer_id, product_id)` unique constraint, so two
//! concurrent adds for the same product can never lose an increment.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};

use tradepost_core::{AdminId, CartLineId, CustomerId, ProductId};

use super::RepositoryError;
use crate::models::{CartEntry, CartLine, Product};

/// Database row for a cart line joined to its (possibly deleted) product.
#[derive(Debug, FromRow)]
struct CartEntryRow {
    id: CartLineId,
    customer_id: CustomerId,
    product_id: ProductId,
    quantity: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    p_id: Option<ProductId>,
    p_product_name: Option<String>,
    p_description: Option<String>,
    p_price: Option<Decimal>,
    p_category: Option<String>,
    p_stock: Option<i32>,
    p_image_url: Option<String>,
    p_creator_id: Option<AdminId>,
    p_created_at: Option<DateTime<Utc>>,
    p_updated_at: Option<DateTime<Utc>>,
}

impl CartEntryRow {
    fn into_entry(self) -> CartEntry {
        let product = match (
            self.p_id,
            self.p_product_name,
            self.p_description,
            self.p_price,
            self.p_category,
            self.p_stock,
            self.p_image_url,
            self.p_creator_id,
            self.p_created_at,
            self.p_updated_at,
        ) {
            (
                Some(id),
                Some(product_name),
                Some(description),
                Some(price),
                Some(category),
                Some(stock),
                Some(image_url),
                Some(creator_id),
                Some(created_at),
                Some(updated_at),
            ) => Some(Product {
                id,
                product_name,
                description,
                price,
                category,
                stock,
                image_url,
                creator_id,
                created_at,
                updated_at,
            }),
            _ => None,
        };

        CartEntry {
            line: CartLine {
                id: self.id,
                customer_id: self.customer_id,
                product_id: self.product_id,
                quantity: self.quantity,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            product,
        }
    }
}

/// Repository for cart database operations.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List the customer's cart lines, each joined to the current catalog
    /// snapshot of its product (absent if the product has been deleted).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_with_products(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<CartEntry>, RepositoryError> {
        let rows = sqlx::query_as::<_, CartEntryRow>(
            "SELECT c.id, c.customer_id, c.product_id, c.quantity, \
                    c.created_at, c.updated_at, \
                    p.id AS p_id, p.product_name AS p_product_name, \
                    p.description AS p_description, p.price AS p_price, \
                    p.category AS p_category, p.stock AS p_stock, \
                    p.image_url AS p_image_url, p.creator_id AS p_creator_id, \
                    p.created_at AS p_created_at, p.updated_at AS p_updated_at \
             FROM cart_lines c \
             LEFT JOIN products p ON p.id = c.product_id \
             WHERE c.customer_id = $1 \
             ORDER BY c.created_at",
        )
        .bind(customer_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(CartEntryRow::into_entry).collect())
    }

    /// Add `quantity` of a product to the customer's cart.
    ///
    /// Creates a line on first add; merges quantities into the existing line
    /// on subsequent adds. The merged total is deliberately not clamped.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the upsert fails.
    pub async fn add(
        &self,
        customer_id: CustomerId,
        product_id: ProductId,
        quantity: i32,
    ) -> Result<CartLine, RepositoryError> {
        let line = sqlx::query_as::<_, CartLine>(
            "INSERT INTO cart_lines (customer_id, product_id, quantity) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (customer_id, product_id) DO UPDATE \
                 SET quantity = cart_lines.quantity + excluded.quantity, \
                     updated_at = now() \
             RETURNING id, customer_id, product_id, quantity, created_at, updated_at",
        )
        .bind(customer_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(self.pool)
        .await?;

        Ok(line)
    }

    /// Replace the quantity of the given line, if owned by `customer_id`.
    ///
    /// Returns `None` when no matching line exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_quantity(
        &self,
        customer_id: CustomerId,
        line_id: CartLineId,
        quantity: i32,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let line = sqlx::query_as::<_, CartLine>(
            "UPDATE cart_lines SET quantity = $3, updated_at = now() \
             WHERE id = $1 AND customer_id = $2 \
             RETURNING id, customer_id, product_id, quantity, created_at, updated_at",
        )
        .bind(line_id)
        .bind(customer_id)
        .bind(quantity)
        .fetch_optional(self.pool)
        .await?;

        Ok(line)
    }

    /// Delete the given line, if owned by `customer_id`.
    ///
    /// Returns the removed line, or `None` when no matching line exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn remove(
        &self,
        customer_id: CustomerId,
        line_id: CartLineId,
    ) -> Result<Option<CartLine>, RepositoryError> {
        let line = sqlx::query_as::<_, CartLine>(
            "DELETE FROM cart_lines WHERE id = $1 AND customer_id = $2 \
             RETURNING id, customer_id, product_id, quantity, created_at, updated_at",
        )
        .bind(line_id)
        .bind(customer_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(line)
    }
}
