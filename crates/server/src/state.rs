//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::ServerConfig;
use crate::services::auth::TokenContext;

/// Cookie (and header) name carrying the customer credential.
pub const CUSTOMER_TOKEN_NAME: &str = "userToken";
/// Cookie (and header) name carrying the administrator credential.
pub const ADMIN_TOKEN_NAME: &str = "adminToken";

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to shared
/// resources: the database pool and the two role-scoped token contexts.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    customer_tokens: TokenContext,
    admin_tokens: TokenContext,
}

impl AppState {
    /// Create a new application state.
    ///
    /// Builds one token context per role from the role's own signing secret
    /// so a customer credential can never resolve as an administrator
    /// credential, and vice versa.
    #[must_use]
    pub fn new(config: &ServerConfig, pool: PgPool) -> Self {
        let customer_tokens =
            TokenContext::new(CUSTOMER_TOKEN_NAME, &config.customer_token_secret);
        let admin_tokens = TokenContext::new(ADMIN_TOKEN_NAME, &config.admin_token_secret);

        Self {
            inner: Arc::new(AppStateInner {
                pool,
                customer_tokens,
                admin_tokens,
            }),
        }
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Token context for the customer namespace.
    #[must_use]
    pub fn customer_tokens(&self) -> &TokenContext {
        &self.inner.customer_tokens
    }

    /// Token context for the administrator namespace.
    #[must_use]
    pub fn admin_tokens(&self) -> &TokenContext {
        &self.inner.admin_tokens
    }
}
