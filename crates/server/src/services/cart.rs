//! Cart service.
//!
//! Quantities are bounded per add; the merged total of repeated adds is
//! deliberately unbounded, and no stock check happens here — the cart and
//! the catalog's stock field are not coupled.

use serde::Deserialize;
use sqlx::PgPool;

use tradepost_core::{CartLineId, CustomerId, ProductId};

use crate::db::cart::CartRepository;
use crate::error::{AppError, Result};
use crate::models::{CartEntry, CartLine};

/// Bounds for a single add operation.
const QUANTITY_RANGE: std::ops::RangeInclusive<i32> = 1..=100;

/// Add-to-cart request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemRequest {
    pub product_id: ProductId,
    pub quantity: i32,
}

/// Update-quantity request body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
}

/// Cart service.
pub struct CartService<'a> {
    cart: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            cart: CartRepository::new(pool),
        }
    }

    /// List the customer's cart, each line resolved to its current product
    /// snapshot for display.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` when the cart is empty (consistent with
    /// the catalog's empty-list policy).
    pub async fn list(&self, customer_id: CustomerId) -> Result<Vec<CartEntry>> {
        let entries = self.cart.list_with_products(customer_id).await?;

        if entries.is_empty() {
            return Err(AppError::NotFound("Cart products not found".to_owned()));
        }

        Ok(entries)
    }

    /// Add a product to the cart, merging into an existing line if one
    /// exists for this (customer, product) pair.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the quantity is outside [1, 100].
    pub async fn add(
        &self,
        customer_id: CustomerId,
        request: &AddCartItemRequest,
    ) -> Result<CartLine> {
        check_quantity(request.quantity)?;

        Ok(self
            .cart
            .add(customer_id, request.product_id, request.quantity)
            .await?)
    }

    /// Replace the quantity of a cart line outright (no merge).
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the quantity is not positive, and
    /// `AppError::NotFound` if the customer owns no such line.
    pub async fn set_quantity(
        &self,
        customer_id: CustomerId,
        line_id: CartLineId,
        request: &UpdateCartItemRequest,
    ) -> Result<CartLine> {
        if request.quantity < 1 {
            return Err(AppError::Validation(
                "quantity: must be at least 1".to_owned(),
            ));
        }

        self.cart
            .set_quantity(customer_id, line_id, request.quantity)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found in the cart".to_owned()))
    }

    /// Remove a cart line.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the customer owns no such line.
    pub async fn remove(&self, customer_id: CustomerId, line_id: CartLineId) -> Result<CartLine> {
        self.cart
            .remove(customer_id, line_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product not found in the cart".to_owned()))
    }
}

fn check_quantity(quantity: i32) -> Result<()> {
    if QUANTITY_RANGE.contains(&quantity) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "quantity: must be between {} and {}",
            QUANTITY_RANGE.start(),
            QUANTITY_RANGE.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_bounds_are_inclusive() {
        assert!(check_quantity(1).is_ok());
        assert!(check_quantity(100).is_ok());
        assert!(check_quantity(0).is_err());
        assert!(check_quantity(101).is_err());
        assert!(check_quantity(-3).is_err());
    }
}
