/**
 * Credential Directory
 *
 * This module defines the credential directory seam: a store of
 * username → credential-hash records that answers registration, exact-match
 * authentication, counting and bulk removal.
 *
 * # Credential Hashes
 *
 * Clients reduce username + secret to a credential hash before it reaches the
 * server. The directory stores it verbatim and only ever compares it by exact
 * equality; it never hashes, normalizes or inspects it.
 *
 * # Uniqueness
 *
 * Username uniqueness is enforced by the storage itself (a primary key in
 * PostgreSQL, a single locked map insert in memory), so concurrent
 * registrations of the same username yield at most one success.
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;

/// A stored credential record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CredentialRecord {
    /// Unique username
    pub username: String,
    /// Opaque client-derived credential hash
    pub credential_hash: String,
    /// When the record was registered
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn new(username: impl Into<String>, credential_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            credential_hash: credential_hash.into(),
            created_at: Utc::now(),
        }
    }
}

/// Errors returned by a credential directory
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// A record with this username already exists
    #[error("username already registered: {0}")]
    DuplicateUsername(String),

    /// No record matches both username and credential hash
    #[error("no matching credential record")]
    NotFound,

    /// The backing store failed
    #[error("directory unavailable: {0}")]
    Unavailable(String),
}

/// Directory handle shared between the relay and the HTTP handlers
pub type SharedDirectory = Arc<dyn CredentialDirectory>;

/// Storage of credential records
///
/// Implementations must be cheap to share behind an `Arc` and safe to call
/// from many connections at once.
#[async_trait]
pub trait CredentialDirectory: Send + Sync {
    /// Register a new record, failing with `DuplicateUsername` on conflict
    async fn register(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<CredentialRecord, DirectoryError>;

    /// Return the record matching both fields exactly, or `NotFound`
    ///
    /// An unknown username and a wrong hash are reported identically.
    async fn authenticate(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<CredentialRecord, DirectoryError>;

    /// Total number of stored records
    async fn count(&self) -> Result<u64, DirectoryError>;

    /// Remove the given usernames, returning how many records were deleted
    ///
    /// Usernames without a record are ignored.
    async fn remove(&self, usernames: &HashSet<String>) -> Result<u64, DirectoryError>;
}
