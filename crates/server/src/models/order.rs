//! Order domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tradepost_core::{CustomerId, OrderId, OrderStatus, PaymentStatus, ProductId};

/// One (product, quantity) pair inside an order snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Shipping destination captured at order-creation time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub address: String,
    pub city: String,
    pub state: String,
    pub postal_code: i32,
    pub country: String,
}

/// A persisted order.
///
/// The item list, address and payment fields are a by-value snapshot taken
/// at creation; later mutations to the cart or the catalog never change
/// them. Only `order_status` is mutable afterwards, and only by an
/// administrator.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to persist a new order snapshot.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_id: CustomerId,
    pub items: Vec<OrderItem>,
    pub shipping_address: ShippingAddress,
    pub payment_method: String,
    pub total_amount: Decimal,
}

impl OrderItem {
    /// Convenience constructor, mainly for tests.
    #[must_use]
    pub const fn new(product_id: Uuid, quantity: i32) -> Self {
        Self {
            product_id: ProductId::new(product_id),
            quantity,
        }
    }
}
