//! Status enums for orders and payments.
//!
//! The wire and storage representation is the literal variant name
//! ("Pending", "Shipped", "Delivery"). `Delivery` is the terminal
//! fulfillment value; there is no separate "Delivered" or "Cancelled"
//! value — cancellation deletes the order instead.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a status from an unknown string.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown status: {0}")]
pub struct StatusParseError(pub String);

/// Order fulfillment status.
///
/// Administrator-driven. Any value may overwrite any other; there is no
/// transition-adjacency check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Delivery,
}

impl OrderStatus {
    /// The storage/wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Shipped => "Shipped",
            Self::Delivery => "Delivery",
        }
    }
}

impl FromStr for OrderStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Shipped" => Ok(Self::Shipped),
            "Delivery" => Ok(Self::Delivery),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment status for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl PaymentStatus {
    /// The storage/wire representation of this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Paid => "Paid",
            Self::Failed => "Failed",
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(Self::Pending),
            "Paid" => Ok(Self::Paid),
            "Failed" => Ok(Self::Failed),
            other => Err(StatusParseError(other.to_owned())),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_status_round_trips_exact_literals() {
        for (status, literal) in [
            (OrderStatus::Pending, "Pending"),
            (OrderStatus::Shipped, "Shipped"),
            (OrderStatus::Delivery, "Delivery"),
        ] {
            assert_eq!(status.as_str(), literal);
            assert_eq!(literal.parse::<OrderStatus>().expect("parse"), status);
        }
    }

    #[test]
    fn order_status_rejects_unknown_values() {
        assert!("Delivered".parse::<OrderStatus>().is_err());
        assert!("Cancelled".parse::<OrderStatus>().is_err());
        assert!("pending".parse::<OrderStatus>().is_err());
    }

    #[test]
    fn default_statuses_are_pending() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert_eq!(PaymentStatus::default(), PaymentStatus::Pending);
    }

    #[test]
    fn statuses_serialize_as_plain_strings() {
        let json = serde_json::to_string(&OrderStatus::Shipped).expect("serialize");
        assert_eq!(json, "\"Shipped\"");
    }
}
