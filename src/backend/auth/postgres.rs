/**
 * PostgreSQL Credential Directory
 *
 * This module stores credential records in the `credentials` table (see
 * `migrations/`). The table's primary key on `username` is the arbiter for
 * duplicate registrations: inserts use `ON CONFLICT DO NOTHING`, and a unique
 * violation raised by any other path is mapped to the same
 * `DuplicateUsername` outcome.
 */

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::collections::HashSet;

use crate::backend::auth::directory::{CredentialDirectory, CredentialRecord, DirectoryError};

/// SQLSTATE for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Credential directory backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgDirectory {
    pool: PgPool,
}

impl PgDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Map a sqlx error for `username` to a directory error
fn map_sqlx_error(username: &str, err: sqlx::Error) -> DirectoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return DirectoryError::DuplicateUsername(username.to_string());
        }
    }
    DirectoryError::Unavailable(err.to_string())
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        DirectoryError::Unavailable(err.to_string())
    }
}

#[async_trait]
impl CredentialDirectory for PgDirectory {
    /// Insert a credential record
    ///
    /// # Arguments
    /// * `username` - Unique username
    /// * `credential_hash` - Client-derived credential hash, stored verbatim
    ///
    /// # Returns
    /// The created record, or `DuplicateUsername` if the key already exists
    async fn register(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<CredentialRecord, DirectoryError> {
        let record = sqlx::query_as::<_, CredentialRecord>(
            r#"
            INSERT INTO credentials (username, credential_hash, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (username) DO NOTHING
            RETURNING username, credential_hash, created_at
            "#,
        )
        .bind(username)
        .bind(credential_hash)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error(username, e))?;

        record.ok_or_else(|| DirectoryError::DuplicateUsername(username.to_string()))
    }

    /// Look up a record matching both fields
    ///
    /// # Returns
    /// The record, or `NotFound` for an unknown username or a wrong hash
    async fn authenticate(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<CredentialRecord, DirectoryError> {
        let record = sqlx::query_as::<_, CredentialRecord>(
            r#"
            SELECT username, credential_hash, created_at
            FROM credentials
            WHERE username = $1 AND credential_hash = $2
            "#,
        )
        .bind(username)
        .bind(credential_hash)
        .fetch_optional(&self.pool)
        .await?;

        record.ok_or(DirectoryError::NotFound)
    }

    async fn count(&self) -> Result<u64, DirectoryError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM credentials")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.max(0) as u64)
    }

    /// Delete the given usernames
    ///
    /// # Returns
    /// Number of rows actually deleted
    async fn remove(&self, usernames: &HashSet<String>) -> Result<u64, DirectoryError> {
        if usernames.is_empty() {
            return Ok(0);
        }

        let usernames: Vec<String> = usernames.iter().cloned().collect();
        let result = sqlx::query("DELETE FROM credentials WHERE username = ANY($1)")
            .bind(&usernames)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
