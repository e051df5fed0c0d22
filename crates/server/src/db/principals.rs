//! Principal repository for the two account namespaces.
//!
//! Customers and administrators live in separate tables with identical
//! shapes. The repository is parameterized by [`PrincipalTable`] so the
//! same queries serve both namespaces while keeping them fully disjoint:
//! an email registered in one table says nothing about the other.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use tradepost_core::Email;

use super::RepositoryError;
use crate::models::Principal;

/// Which principal namespace a repository operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrincipalTable {
    Customers,
    Admins,
}

impl PrincipalTable {
    /// The underlying table name. Only ever one of two fixed identifiers,
    /// so it is safe to interpolate into SQL.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Admins => "admins",
        }
    }
}

/// Database row for a principal, password hash included.
#[derive(Debug, FromRow)]
struct PrincipalRow {
    id: Uuid,
    user_name: String,
    email: String,
    password_hash: String,
    contact_number: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PrincipalRow {
    fn into_principal(self) -> Result<(Principal, String), RepositoryError> {
        let email = Email::parse(&self.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok((
            Principal {
                id: self.id,
                user_name: self.user_name,
                email,
                contact_number: self.contact_number,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            self.password_hash,
        ))
    }
}

/// Repository for principal database operations.
pub struct PrincipalRepository<'a> {
    pool: &'a PgPool,
    table: PrincipalTable,
}

impl<'a> PrincipalRepository<'a> {
    /// Create a new principal repository over the given namespace.
    #[must_use]
    pub const fn new(pool: &'a PgPool, table: PrincipalTable) -> Self {
        Self { pool, table }
    }

    /// Insert a new principal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the email already exists in
    /// this namespace, `RepositoryError::Database` for other failures.
    pub async fn create(
        &self,
        user_name: &str,
        email: &Email,
        password_hash: &str,
        contact_number: &str,
    ) -> Result<Principal, RepositoryError> {
        let sql = format!(
            "INSERT INTO {} (user_name, email, password_hash, contact_number) \
             VALUES ($1, $2, $3, $4) \
             RETURNING id, user_name, email, password_hash, contact_number, \
                       created_at, updated_at",
            self.table.name()
        );

        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(user_name)
            .bind(email.as_str())
            .bind(password_hash)
            .bind(contact_number)
            .fetch_one(self.pool)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e
                    && db_err.is_unique_violation()
                {
                    return RepositoryError::Conflict("email already exists".to_owned());
                }
                RepositoryError::Database(e)
            })?;

        let (principal, _hash) = row.into_principal()?;
        Ok(principal)
    }

    /// Look up a principal by email, returning the stored password hash
    /// alongside the account.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails, or
    /// `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<(Principal, String)>, RepositoryError> {
        let sql = format!(
            "SELECT id, user_name, email, password_hash, contact_number, \
                    created_at, updated_at \
             FROM {} WHERE email = $1",
            self.table.name()
        );

        let row = sqlx::query_as::<_, PrincipalRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(PrincipalRow::into_principal).transpose()
    }
}
