//! Business services.
//!
//! Each service wraps the repositories it needs and owns the validation and
//! error translation for its operations. Route handlers stay thin: parse
//! the request, call the service, wrap the envelope.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod orders;
