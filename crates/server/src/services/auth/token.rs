//! Role-scoped bearer tokens.
//!
//! Each principal role gets its own [`TokenContext`] built from its own
//! signing secret. A token signed in one context never verifies in the
//! other, which is the whole of the dual-namespace isolation guarantee:
//! the secrets are injected at startup, never read from ambient state.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::AuthError;

/// How long an issued credential stays valid.
pub const TOKEN_VALIDITY: Duration = Duration::from_secs(60 * 60);

/// JWT claims: the embedded principal id and the expiry timestamp.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
}

/// Signing and verification context for one principal role.
pub struct TokenContext {
    cookie_name: &'static str,
    encoding: EncodingKey,
    decoding: DecodingKey,
    validity: Duration,
}

impl TokenContext {
    /// Build a context from a role's signing secret.
    #[must_use]
    pub fn new(cookie_name: &'static str, secret: &SecretString) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();
        Self {
            cookie_name,
            encoding: EncodingKey::from_secret(secret_bytes),
            decoding: DecodingKey::from_secret(secret_bytes),
            validity: TOKEN_VALIDITY,
        }
    }

    /// The cookie (and header) name this role's credential travels under.
    #[must_use]
    pub const fn cookie_name(&self) -> &'static str {
        self.cookie_name
    }

    /// The credential validity window, for the cookie max-age.
    #[must_use]
    pub const fn validity(&self) -> Duration {
        self.validity
    }

    /// Sign a credential embedding the principal id, valid for one hour.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Token` if signing fails.
    pub fn sign(&self, principal_id: Uuid) -> Result<String, AuthError> {
        self.sign_with_expiry(principal_id, chrono::Utc::now().timestamp())
    }

    fn sign_with_expiry(&self, principal_id: Uuid, issued_at: i64) -> Result<String, AuthError> {
        let validity_secs =
            i64::try_from(self.validity.as_secs()).map_err(|_| AuthError::TokenInvalid)?;
        let claims = Claims {
            sub: principal_id,
            exp: issued_at + validity_secs,
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    /// Verify a credential and extract the embedded principal id.
    ///
    /// Pure computation: a signature check against this role's secret plus
    /// an expiry comparison. Never touches persistence.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenInvalid` if the signature or expiry check
    /// fails (the two cases are indistinguishable to the caller).
    pub fn verify(&self, token: &str) -> Result<Uuid, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims.sub)
            .map_err(|_| AuthError::TokenInvalid)
    }
}

impl std::fmt::Debug for TokenContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenContext")
            .field("cookie_name", &self.cookie_name)
            .field("validity", &self.validity)
            .finish_non_exhaustive()
    }
}
