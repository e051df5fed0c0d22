//! Order repository.
//!
//! Items are stored as a jsonb snapshot copied by value at creation time;
//! nothing here joins back to the catalog, so later product or cart
//! mutations cannot reach into a persisted order.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};

use tradepost_core::{CustomerId, OrderId, OrderStatus};

use super::RepositoryError;
use crate::models::{Order, OrderItem, ShippingAddress, order::NewOrder};

/// Database row for an order.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: OrderId,
    customer_id: CustomerId,
    items: Json<Vec<OrderItem>>,
    address: String,
    city: String,
    state: String,
    postal_code: i32,
    country: String,
    payment_method: String,
    payment_status: String,
    order_status: String,
    total_amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

const ORDER_COLUMNS: &str = "id, customer_id, items, address, city, state, postal_code, \
     country, payment_method, payment_status, order_status, total_amount, \
     created_at, updated_at";

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let order_status = self.order_status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid order status in database: {e}"))
        })?;
        let payment_status = self.payment_status.parse().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid payment status in database: {e}"))
        })?;

        Ok(Order {
            id: self.id,
            customer_id: self.customer_id,
            items: self.items.0,
            shipping_address: ShippingAddress {
                address: self.address,
                city: self.city,
                state: self.state,
                postal_code: self.postal_code,
                country: self.country,
            },
            payment_method: self.payment_method,
            payment_status,
            order_status,
            total_amount: self.total_amount,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all orders placed by the given customer.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn list_by_customer(
        &self,
        customer_id: CustomerId,
    ) -> Result<Vec<Order>, RepositoryError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE customer_id = $1 ORDER BY created_at"
        );

        let rows = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(customer_id)
            .fetch_all(self.pool)
            .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Persist a new order snapshot. Both statuses start as "Pending".
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, new_order: &NewOrder) -> Result<Order, RepositoryError> {
        let sql = format!(
            "INSERT INTO orders \
                 (customer_id, items, address, city, state, postal_code, country, \
                  payment_method, total_amount) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING {ORDER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(new_order.customer_id)
            .bind(Json(&new_order.items))
            .bind(&new_order.shipping_address.address)
            .bind(&new_order.shipping_address.city)
            .bind(&new_order.shipping_address.state)
            .bind(new_order.shipping_address.postal_code)
            .bind(&new_order.shipping_address.country)
            .bind(&new_order.payment_method)
            .bind(new_order.total_amount)
            .fetch_one(self.pool)
            .await?;

        row.into_order()
    }

    /// Delete the given order, if owned by `customer_id`.
    ///
    /// Returns the removed order, or `None` when no matching order exists.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        customer_id: CustomerId,
        order_id: OrderId,
    ) -> Result<Option<Order>, RepositoryError> {
        let sql = format!(
            "DELETE FROM orders WHERE id = $1 AND customer_id = $2 RETURNING {ORDER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id)
            .bind(customer_id)
            .fetch_optional(self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }

    /// Overwrite the order status. Any of the three values may replace any
    /// other; there is no adjacency check.
    ///
    /// Returns `None` when the order does not exist.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<Option<Order>, RepositoryError> {
        let sql = format!(
            "UPDATE orders SET order_status = $2, updated_at = now() \
             WHERE id = $1 RETURNING {ORDER_COLUMNS}"
        );

        let row = sqlx::query_as::<_, OrderRow>(&sql)
            .bind(order_id)
            .bind(status.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(OrderRow::into_order).transpose()
    }
}
