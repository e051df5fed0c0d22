//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `DATABASE_URL` - `PostgreSQL` connection string
//! - `CUSTOMER_TOKEN_SECRET` - Customer credential signing secret (min 32 chars)
//! - `ADMIN_TOKEN_SECRET` - Administrator credential signing secret (min 32 chars)
//!
//! The two signing secrets MUST differ: each role's credentials are signed
//! and verified only against its own secret, which is what keeps the two
//! principal namespaces isolated from each other.
//!
//! ## Optional
//! - `SERVER_HOST` - Bind address (default: 127.0.0.1)
//! - `SERVER_PORT` - Listen port (default: 3000)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Customer credential signing secret
    pub customer_token_secret: SecretString,
    /// Administrator credential signing secret
    pub admin_token_secret: SecretString,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a required variable is missing, malformed,
    /// or a signing secret fails the basic security checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = SecretString::from(require_env("DATABASE_URL")?);

        let host = match std::env::var("SERVER_HOST") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("SERVER_HOST".to_owned(), raw))?,
            Err(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
        };

        let port = match std::env::var("SERVER_PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| ConfigError::InvalidEnvVar("SERVER_PORT".to_owned(), raw))?,
            Err(_) => 3000,
        };

        let customer_token_secret = load_secret("CUSTOMER_TOKEN_SECRET")?;
        let admin_token_secret = load_secret("ADMIN_TOKEN_SECRET")?;

        if customer_token_secret.expose_secret() == admin_token_secret.expose_secret() {
            return Err(ConfigError::InsecureSecret(
                "ADMIN_TOKEN_SECRET".to_owned(),
                "must differ from CUSTOMER_TOKEN_SECRET".to_owned(),
            ));
        }

        Ok(Self {
            database_url,
            host,
            port,
            customer_token_secret,
            admin_token_secret,
        })
    }

    /// The socket address to bind the listener to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn require_env(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_owned()))
}

fn load_secret(name: &str) -> Result<SecretString, ConfigError> {
    let raw = require_env(name)?;
    validate_secret(name, &raw)?;
    Ok(SecretString::from(raw))
}

fn validate_secret(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            name.to_owned(),
            format!("must be at least {MIN_TOKEN_SECRET_LENGTH} characters"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_secrets_are_rejected() {
        assert!(validate_secret("CUSTOMER_TOKEN_SECRET", "too-short").is_err());
        assert!(
            validate_secret("CUSTOMER_TOKEN_SECRET", &"x".repeat(MIN_TOKEN_SECRET_LENGTH)).is_ok()
        );
    }
}
