/**
 * Authentication Handler Types
 *
 * Request and response bodies shared by the signup, signin and admin
 * handlers. Credential hashes are accepted from clients but never returned.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::backend::auth::directory::CredentialRecord;
use crate::shared::SharedError;

/// Longest accepted username, in characters
pub const MAX_USERNAME_LEN: usize = 64;

/// Signup and signin request
///
/// Both endpoints take the same body: the username and the credential hash the
/// client derived from username and secret.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct CredentialRequest {
    pub username: String,
    /// Opaque client-derived hash, compared by exact equality
    pub credential_hash: String,
}

impl CredentialRequest {
    /// Check that both fields are usable
    ///
    /// # Errors
    ///
    /// `ValidationError` if either field is blank or the username is longer
    /// than [`MAX_USERNAME_LEN`] characters.
    pub fn validate(&self) -> Result<(), SharedError> {
        if self.username.trim().is_empty() {
            return Err(SharedError::validation("username", "must not be empty"));
        }
        if self.username.chars().count() > MAX_USERNAME_LEN {
            return Err(SharedError::validation(
                "username",
                format!("must be at most {} characters", MAX_USERNAME_LEN),
            ));
        }
        if self.credential_hash.trim().is_empty() {
            return Err(SharedError::validation("credential_hash", "must not be empty"));
        }
        Ok(())
    }
}

/// Public view of a credential record
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserResponse {
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl From<CredentialRecord> for UserResponse {
    fn from(record: CredentialRecord) -> Self {
        Self {
            username: record.username,
            created_at: record.created_at,
        }
    }
}

/// Returned by signup and signin
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    pub user: UserResponse,
}

/// Admin bulk removal request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RemoveUsersRequest {
    pub usernames: Vec<String>,
}

/// Admin bulk removal result
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemoveUsersResponse {
    /// Number of records actually deleted
    pub removed: u64,
}
