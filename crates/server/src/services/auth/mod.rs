//! Identity & session service.
//!
//! Registers and authenticates principals in the two disjoint namespaces
//! and issues role-scoped credentials. The same service type serves both
//! roles; the namespace and signing context are picked by the caller.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{TOKEN_VALIDITY, TokenContext};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use serde::Deserialize;
use sqlx::PgPool;

use tradepost_core::Email;

use crate::db::principals::{PrincipalRepository, PrincipalTable};
use crate::db::RepositoryError;
use crate::models::Principal;

/// Display name length bounds.
const USER_NAME_LENGTH: std::ops::RangeInclusive<usize> = 3..=20;
/// Password length bounds.
const PASSWORD_LENGTH: std::ops::RangeInclusive<usize> = 6..=20;
/// Contact numbers are exactly this many digits.
const CONTACT_NUMBER_DIGITS: usize = 10;

/// Signup request body (shared by both roles).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub user_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub contact_number: String,
}

/// Login request body (shared by both roles).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Authentication service for one principal namespace.
pub struct AuthService<'a> {
    principals: PrincipalRepository<'a>,
    tokens: &'a TokenContext,
}

impl<'a> AuthService<'a> {
    /// Create an authentication service over the given namespace and
    /// signing context.
    #[must_use]
    pub const fn new(pool: &'a PgPool, table: PrincipalTable, tokens: &'a TokenContext) -> Self {
        Self {
            principals: PrincipalRepository::new(pool, table),
            tokens,
        }
    }

    /// Register a new principal.
    ///
    /// The stored password is the argon2 hash, never the plaintext, and the
    /// returned record carries no hash at all.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` if field constraints are unmet,
    /// `AuthError::PasswordMismatch` if the confirmation differs, and
    /// `AuthError::EmailTaken` if the email is already registered in this
    /// namespace.
    pub async fn register(&self, request: &SignupRequest) -> Result<Principal, AuthError> {
        let email = validate_signup(request)?;

        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let password_hash = hash_password(&request.password)?;

        let principal = self
            .principals
            .create(
                &request.user_name,
                &email,
                &password_hash,
                &request.contact_number,
            )
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::EmailTaken,
                other => AuthError::Repository(other),
            })?;

        Ok(principal)
    }

    /// Authenticate a principal and issue a one-hour credential.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Validation` on malformed email or password
    /// shape, `AuthError::PrincipalNotFound` if no account with that email
    /// exists in this namespace, and `AuthError::InvalidPassword` if the
    /// hash comparison fails.
    pub async fn login(&self, request: &LoginRequest) -> Result<(Principal, String), AuthError> {
        let email = Email::parse(&request.email)
            .map_err(|e| AuthError::Validation(format!("email: {e}")))?;
        validate_length("password", &request.password, PASSWORD_LENGTH)?;

        let (principal, password_hash) = self
            .principals
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::PrincipalNotFound)?;

        verify_password(&request.password, &password_hash)?;

        let token = self.tokens.sign(principal.id)?;

        Ok((principal, token))
    }
}

/// Validate the signup field constraints and return the parsed email.
fn validate_signup(request: &SignupRequest) -> Result<Email, AuthError> {
    validate_length("userName", &request.user_name, USER_NAME_LENGTH)?;

    let email =
        Email::parse(&request.email).map_err(|e| AuthError::Validation(format!("email: {e}")))?;

    validate_length("password", &request.password, PASSWORD_LENGTH)?;
    validate_length("confirmPassword", &request.confirm_password, PASSWORD_LENGTH)?;

    let contact = &request.contact_number;
    if contact.len() != CONTACT_NUMBER_DIGITS || !contact.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AuthError::Validation(format!(
            "contactNumber: must be exactly {CONTACT_NUMBER_DIGITS} digits"
        )));
    }

    Ok(email)
}

fn validate_length(
    field: &str,
    value: &str,
    bounds: std::ops::RangeInclusive<usize>,
) -> Result<(), AuthError> {
    // Bounds count characters, not bytes: "café" is four characters
    if bounds.contains(&value.chars().count()) {
        Ok(())
    } else {
        Err(AuthError::Validation(format!(
            "{field}: must be between {} and {} characters",
            bounds.start(),
            bounds.end()
        )))
    }
}

/// Hash a password with argon2 and a fresh random salt.
fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AuthError::Hash)?;
    Ok(hash.to_string())
}

/// Verify a password against a stored argon2 hash.
fn verify_password(password: &str, stored_hash: &str) -> Result<(), AuthError> {
    let parsed = PasswordHash::new(stored_hash).map_err(|_| AuthError::Hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| AuthError::InvalidPassword)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SignupRequest {
        SignupRequest {
            user_name: "alice".to_owned(),
            email: "alice@example.com".to_owned(),
            password: "hunter22".to_owned(),
            confirm_password: "hunter22".to_owned(),
            contact_number: "0123456789".to_owned(),
        }
    }

    #[test]
    fn accepts_a_well_formed_signup() {
        assert!(validate_signup(&request()).is_ok());
    }

    #[test]
    fn rejects_out_of_range_names_and_passwords() {
        let mut short_name = request();
        short_name.user_name = "ab".to_owned();
        assert!(matches!(
            validate_signup(&short_name),
            Err(AuthError::Validation(_))
        ));

        let mut short_password = request();
        short_password.password = "12345".to_owned();
        assert!(matches!(
            validate_signup(&short_password),
            Err(AuthError::Validation(_))
        ));

        let mut long_password = request();
        long_password.password = "x".repeat(21);
        assert!(matches!(
            validate_signup(&long_password),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn length_bounds_count_characters_not_bytes() {
        // 20 characters, 40 bytes: at the top of the name bound
        let mut accented = request();
        accented.user_name = "é".repeat(20);
        assert!(validate_signup(&accented).is_ok());

        let mut too_long = request();
        too_long.user_name = "é".repeat(21);
        assert!(matches!(
            validate_signup(&too_long),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn rejects_bad_contact_numbers() {
        for contact in ["123456789", "12345678901", "12345abcde", ""] {
            let mut bad = request();
            bad.contact_number = contact.to_owned();
            assert!(
                matches!(validate_signup(&bad), Err(AuthError::Validation(_))),
                "accepted contact number {contact:?}"
            );
        }
    }

    #[test]
    fn rejects_malformed_emails() {
        let mut bad = request();
        bad.email = "not-an-email".to_owned();
        assert!(matches!(
            validate_signup(&bad),
            Err(AuthError::Validation(_))
        ));
    }

    #[test]
    fn stored_hash_is_never_the_plaintext() {
        let hash = hash_password("hunter22").expect("hash");
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22", &hash).is_ok());
        assert!(matches!(
            verify_password("wrong-password", &hash),
            Err(AuthError::InvalidPassword)
        ));
    }

    #[test]
    fn two_hashes_of_the_same_password_differ() {
        // Salted hashing: equal inputs must not produce equal hashes.
        let first = hash_password("hunter22").expect("hash");
        let second = hash_password("hunter22").expect("hash");
        assert_ne!(first, second);
    }
}
