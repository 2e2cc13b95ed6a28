/**
 * In-Memory Credential Directory
 *
 * Used when no `DATABASE_URL` is configured and by the test suites. Records
 * live in a `HashMap` behind a `tokio::sync::RwLock`; registration takes the
 * write lock once and inserts through the entry API, so the duplicate check
 * and the insert cannot interleave with another registration.
 */

use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::backend::auth::directory::{CredentialDirectory, CredentialRecord, DirectoryError};

/// Credential directory backed by process memory
#[derive(Debug, Clone, Default)]
pub struct MemoryDirectory {
    records: Arc<RwLock<HashMap<String, CredentialRecord>>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialDirectory for MemoryDirectory {
    async fn register(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<CredentialRecord, DirectoryError> {
        let mut records = self.records.write().await;
        match records.entry(username.to_string()) {
            Entry::Occupied(_) => Err(DirectoryError::DuplicateUsername(username.to_string())),
            Entry::Vacant(slot) => {
                let record = CredentialRecord::new(username, credential_hash);
                slot.insert(record.clone());
                Ok(record)
            }
        }
    }

    async fn authenticate(
        &self,
        username: &str,
        credential_hash: &str,
    ) -> Result<CredentialRecord, DirectoryError> {
        let records = self.records.read().await;
        records
            .get(username)
            .filter(|record| record.credential_hash == credential_hash)
            .cloned()
            .ok_or(DirectoryError::NotFound)
    }

    async fn count(&self) -> Result<u64, DirectoryError> {
        Ok(self.records.read().await.len() as u64)
    }

    async fn remove(&self, usernames: &HashSet<String>) -> Result<u64, DirectoryError> {
        let mut records = self.records.write().await;
        let removed = usernames
            .iter()
            .filter(|username| records.remove(username.as_str()).is_some())
            .count();
        Ok(removed as u64)
    }
}
