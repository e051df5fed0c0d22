//! Principal domain type.
//!
//! A principal is an authenticated identity in one of the two disjoint
//! namespaces (customer or administrator). Both namespaces share this shape;
//! which one a value belongs to is decided by the repository it came from
//! and the typed id carried by the caller.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use tradepost_core::Email;

/// An account record in either principal namespace.
///
/// The password hash is deliberately not part of this type, so it can never
/// leak into a response payload.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    /// Unique account ID within its namespace.
    pub id: Uuid,
    /// Display name.
    pub user_name: String,
    /// Email address, unique within the namespace.
    pub email: Email,
    /// Contact number (exactly 10 digits).
    pub contact_number: String,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}
