//! Product repository.
//!
//! Every mutating query is scoped by `(id, creator_id)`. A wrong id and a
//! wrong owner both come back as zero rows, so the caller cannot tell the
//! difference — which is the intended authorization posture.

use sqlx::PgPool;

use tradepost_core::{AdminId, ProductId};

use super::RepositoryError;
use crate::models::{Product, product::NewProduct, product::ProductPatch};

/// Repository for catalog database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products created by the given administrator.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_creator(
        &self,
        creator_id: AdminId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, product_name, description, price, category, stock, \
                    image_url, creator_id, created_at, updated_at \
             FROM products WHERE creator_id = $1 ORDER BY created_at",
        )
        .bind(creator_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Insert a new product owned by `creator_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        creator_id: AdminId,
        fields: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products \
                 (product_name, description, price, category, stock, image_url, creator_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING id, product_name, description, price, category, stock, \
                       image_url, creator_id, created_at, updated_at",
        )
        .bind(&fields.product_name)
        .bind(&fields.description)
        .bind(fields.price)
        .bind(&fields.category)
        .bind(fields.stock)
        .bind(&fields.image_url)
        .bind(creator_id)
        .fetch_one(self.pool)
        .await?;

        Ok(product)
    }

    /// Apply a partial update to the product with the given id, but only if
    /// it is owned by `creator_id`.
    ///
    /// Returns `None` when no row matched (wrong id or wrong owner).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        creator_id: AdminId,
        product_id: ProductId,
        patch: &ProductPatch,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "UPDATE products SET \
                 product_name = COALESCE($3, product_name), \
                 description  = COALESCE($4, description), \
                 price        = COALESCE($5, price), \
                 category     = COALESCE($6, category), \
                 stock        = COALESCE($7, stock), \
                 image_url    = COALESCE($8, image_url), \
                 updated_at   = now() \
             WHERE id = $1 AND creator_id = $2 \
             RETURNING id, product_name, description, price, category, stock, \
                       image_url, creator_id, created_at, updated_at",
        )
        .bind(product_id)
        .bind(creator_id)
        .bind(patch.product_name.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.price)
        .bind(patch.category.as_deref())
        .bind(patch.stock)
        .bind(patch.image_url.as_deref())
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }

    /// Delete the product with the given id if it is owned by `creator_id`.
    ///
    /// Returns the deleted product, or `None` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        creator_id: AdminId,
        product_id: ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let product = sqlx::query_as::<_, Product>(
            "DELETE FROM products WHERE id = $1 AND creator_id = $2 \
             RETURNING id, product_name, description, price, category, stock, \
                       image_url, creator_id, created_at, updated_at",
        )
        .bind(product_id)
        .bind(creator_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(product)
    }
}
