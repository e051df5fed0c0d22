//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed signup or login fields.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Password and confirmation do not match.
    #[error("passwords do not match")]
    PasswordMismatch,

    /// Email already registered in this namespace.
    #[error("email already registered")]
    EmailTaken,

    /// No account with that email in the expected namespace.
    #[error("account not found")]
    PrincipalNotFound,

    /// Stored hash does not match the supplied password.
    #[error("invalid password")]
    InvalidPassword,

    /// No credential supplied in header or cookie.
    #[error("token not found")]
    TokenMissing,

    /// Credential failed the signature or expiry check.
    #[error("invalid or expired token")]
    TokenInvalid,

    /// Password hashing error.
    #[error("password hashing error")]
    Hash,

    /// Token signing error.
    #[error("token signing error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
