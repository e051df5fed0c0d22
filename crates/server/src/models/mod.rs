//! Domain types.
//!
//! These types represent validated domain objects. Database row types that
//! need conversion (status parsing, email validation) live next to their
//! repositories in `db/`.

pub mod cart;
pub mod order;
pub mod principal;
pub mod product;

pub use cart::{CartEntry, CartLine};
pub use order::{Order, OrderItem, ShippingAddress};
pub use principal::Principal;
pub use product::Product;
