//! Order service.
//!
//! Converts a client-supplied item list into a persisted snapshot and owns
//! the (deliberately unguarded) status overwrite. Creating an order never
//! touches the cart: the two are fully decoupled.

use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::PgPool;

use tradepost_core::{CustomerId, OrderId, OrderStatus};

use crate::db::orders::OrderRepository;
use crate::error::{AppError, Result};
use crate::models::{Order, OrderItem, ShippingAddress, order::NewOrder};

/// Create-order request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub total_amount: Decimal,
}

/// Status-change request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOrderStatusRequest {
    pub order_status: String,
}

/// Order service.
pub struct OrderService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> OrderService<'a> {
    /// Create a new order service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// List the customer's orders.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when the customer has no orders.
    pub async fn list(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let orders = self.orders.list_by_customer(customer_id).await?;

        if orders.is_empty() {
            return Err(AppError::NotFound("No orders found".to_owned()));
        }

        Ok(orders)
    }

    /// Validate and persist a new order snapshot.
    ///
    /// The item list is copied by value; later cart or catalog mutations do
    /// not reach back into the created order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the payload constraints are unmet.
    pub async fn create(
        &self,
        customer_id: CustomerId,
        request: CreateOrderRequest,
    ) -> Result<Order> {
        validate_order(&request)?;

        let new_order = NewOrder {
            customer_id,
            items: request.items,
            shipping_address: request.shipping_address,
            payment_method: request.payment_method,
            total_amount: request.total_amount,
        };

        Ok(self.orders.create(&new_order).await?)
    }

    /// Cancel (delete) an order owned by `customer_id`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the customer owns no such order.
    pub async fn cancel(&self, customer_id: CustomerId, order_id: OrderId) -> Result<Order> {
        self.orders
            .delete(customer_id, order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))
    }

    /// Overwrite the order status with one of the three literal values.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for an unknown status string (leaving
    /// the stored status unchanged) and `AppError::NotFound` for an unknown
    /// order id.
    pub async fn set_status(
        &self,
        order_id: OrderId,
        request: &SetOrderStatusRequest,
    ) -> Result<Order> {
        let status: OrderStatus = request
            .order_status
            .parse()
            .map_err(|_| AppError::Validation("Invalid order status".to_owned()))?;

        self.orders
            .set_status(order_id, status)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_owned()))
    }
}

fn validate_order(request: &CreateOrderRequest) -> Result<()> {
    if request.items.is_empty() {
        return Err(AppError::Validation(
            "items: must not be empty".to_owned(),
        ));
    }

    for item in &request.items {
        if item.quantity < 1 {
            return Err(AppError::Validation(
                "items: quantity must be at least 1".to_owned(),
            ));
        }
    }

    let address = &request.shipping_address;
    for (field, value) in [
        ("address", &address.address),
        ("city", &address.city),
        ("state", &address.state),
        ("country", &address.country),
    ] {
        if value.is_empty() {
            return Err(AppError::Validation(format!(
                "shippingAddress.{field}: must not be empty"
            )));
        }
    }

    if request.payment_method.is_empty() {
        return Err(AppError::Validation(
            "paymentMethod: must not be empty".to_owned(),
        ));
    }

    if request.total_amount.is_sign_negative() {
        return Err(AppError::Validation(
            "totalAmount: must not be negative".to_owned(),
        ));
    }

    Ok(())
}
