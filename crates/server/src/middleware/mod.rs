//! Request middleware and extractors.

pub mod auth;
pub mod extract;

pub use auth::{AdminAuth, CustomerAuth};
pub use extract::{Json, Path};
