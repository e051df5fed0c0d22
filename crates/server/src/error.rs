//! Unified error handling.
//!
//! Provides a unified `AppError` type mapping the service-level error
//! taxonomy onto HTTP responses. All route handlers return
//! `Result<T, AppError>`. Failure bodies follow the `{message, error}`
//! envelope; internal details are redacted from every 500 and logged
//! instead.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or out-of-range input.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Duplicate unique field (e.g. email already registered).
    #[error("conflict: {0}")]
    Conflict(String),

    /// Authentication operation failed.
    #[error("auth error: {0}")]
    Auth(#[from] AuthError),

    /// Missing entity or empty collection.
    #[error("not found: {0}")]
    NotFound(String),

    /// Database operation failed.
    #[error("database error: {0}")]
    Repository(RepositoryError),

    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::NotFound => Self::NotFound("not found".to_owned()),
            other => Self::Repository(other),
        }
    }
}

impl AppError {
    /// The HTTP status this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Auth(err) => match err {
                AuthError::Validation(_) | AuthError::PasswordMismatch => StatusCode::BAD_REQUEST,
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::PrincipalNotFound => StatusCode::NOT_FOUND,
                AuthError::InvalidPassword
                | AuthError::TokenMissing
                | AuthError::TokenInvalid => StatusCode::UNAUTHORIZED,
                AuthError::Hash | AuthError::Token(_) | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Repository(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "request error");
        }

        // Don't expose internal error details to clients
        let (message, detail) = if status.is_server_error() {
            (
                "Server error".to_owned(),
                "An unexpected error occurred while handling the request".to_owned(),
            )
        } else {
            let message = match &self {
                Self::Validation(_) => "Validation failed".to_owned(),
                Self::Auth(AuthError::Validation(_)) => "Validation failed".to_owned(),
                Self::Auth(AuthError::PasswordMismatch) => "Passwords do not match".to_owned(),
                Self::Auth(AuthError::EmailTaken) | Self::Conflict(_) => {
                    "An account with this email already exists".to_owned()
                }
                Self::Auth(AuthError::InvalidPassword) => "Invalid password".to_owned(),
                Self::Auth(AuthError::TokenMissing) => "Token not found".to_owned(),
                Self::Auth(AuthError::TokenInvalid) => "Invalid or expired token".to_owned(),
                Self::Auth(AuthError::PrincipalNotFound) => "Account not found".to_owned(),
                Self::NotFound(msg) => msg.clone(),
                _ => self.to_string(),
            };
            (message, self.to_string())
        };

        let body = Json(json!({
            "message": message,
            "error": detail,
        }));

        (status, body).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_the_taxonomy() {
        assert_eq!(
            AppError::Validation("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Conflict("dup".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::NotFound("missing".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Internal("boom".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Auth(AuthError::TokenMissing).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::Auth(AuthError::PrincipalNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Auth(AuthError::EmailTaken).status(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn repository_conflict_becomes_conflict() {
        let err = AppError::from(RepositoryError::Conflict("email already exists".into()));
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn server_errors_redact_details() {
        let response = AppError::Internal("connection string leaked".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
