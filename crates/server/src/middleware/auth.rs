//! Authentication extractors.
//!
//! [`CustomerAuth`] and [`AdminAuth`] are the `resolve` half of the
//! identity component: they read the role's credential from a header or
//! cookie, verify it against that role's own token context, and hand the
//! handler the embedded principal id as a typed value. A handler that
//! takes `AdminAuth` is unreachable with a customer credential by
//! construction.

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::COOKIE, request::Parts},
};

use tradepost_core::{AdminId, CustomerId};

use crate::error::AppError;
use crate::services::auth::{AuthError, TokenContext};
use crate::state::AppState;

/// Extractor that requires a valid customer credential.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(CustomerAuth(customer_id): CustomerAuth) -> impl IntoResponse {
///     format!("customer {customer_id}")
/// }
/// ```
pub struct CustomerAuth(pub CustomerId);

/// Extractor that requires a valid administrator credential.
pub struct AdminAuth(pub AdminId);

impl<S> FromRequestParts<S> for CustomerAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let principal_id = resolve(parts, state.customer_tokens())?;
        Ok(Self(CustomerId::new(principal_id)))
    }
}

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);
        let principal_id = resolve(parts, state.admin_tokens())?;
        Ok(Self(AdminId::new(principal_id)))
    }
}

/// Read the role's credential from header or cookie and verify it.
fn resolve(parts: &Parts, tokens: &TokenContext) -> Result<uuid::Uuid, AppError> {
    let token = credential_from_parts(parts, tokens.cookie_name())
        .ok_or(AppError::Auth(AuthError::TokenMissing))?;

    Ok(tokens.verify(&token)?)
}

/// Look for the credential in a same-named header first, then the cookie.
fn credential_from_parts(parts: &Parts, name: &str) -> Option<String> {
    if let Some(value) = parts.headers.get(name.to_ascii_lowercase())
        && let Ok(token) = value.to_str()
        && !token.is_empty()
    {
        return Some(token.to_owned());
    }

    let cookies = parts.headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name && !value.is_empty()).then(|| value.to_owned())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/cart");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        let (parts, ()) = builder.body(()).expect("request").into_parts();
        parts
    }

    #[test]
    fn reads_credential_from_header() {
        let parts = parts_with_headers(&[("usertoken", "abc.def.ghi")]);
        assert_eq!(
            credential_from_parts(&parts, "userToken").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn reads_credential_from_cookie() {
        let parts = parts_with_headers(&[("cookie", "theme=dark; userToken=abc.def.ghi")]);
        assert_eq!(
            credential_from_parts(&parts, "userToken").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn header_takes_precedence_over_cookie() {
        let parts = parts_with_headers(&[
            ("usertoken", "from-header"),
            ("cookie", "userToken=from-cookie"),
        ]);
        assert_eq!(
            credential_from_parts(&parts, "userToken").as_deref(),
            Some("from-header")
        );
    }

    #[test]
    fn cookie_names_are_role_specific() {
        let parts = parts_with_headers(&[("cookie", "adminToken=abc.def.ghi")]);
        assert_eq!(credential_from_parts(&parts, "userToken"), None);
        assert_eq!(
            credential_from_parts(&parts, "adminToken").as_deref(),
            Some("abc.def.ghi")
        );
    }

    #[test]
    fn missing_credential_yields_none() {
        let parts = parts_with_headers(&[]);
        assert_eq!(credential_from_parts(&parts, "userToken"), None);
    }
}
