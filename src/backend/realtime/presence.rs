/**
 * Presence Broadcaster
 *
 * Recomputes `{registered, online}` and pushes a `user_counts` event to every
 * admitted connection. It is triggered by the relay gateway on connect and
 * disconnect and by the signup and admin handlers when the directory changes.
 *
 * # Failure Policy
 *
 * Presence is best-effort. A failing directory count is logged and that
 * broadcast is skipped; nothing is retried, since the next membership change
 * triggers a fresh broadcast anyway. Failures never reach the messaging path
 * or connection admission.
 */

use std::sync::Arc;
use std::time::Duration;

use crate::backend::auth::directory::{CredentialDirectory, DirectoryError};
use crate::backend::realtime::registry::ConnectionRegistry;
use crate::shared::{PresenceSnapshot, ServerEvent};

/// Pushes registered/online counts to all live connections
#[derive(Clone)]
pub struct PresenceBroadcaster {
    directory: Arc<dyn CredentialDirectory>,
    registry: ConnectionRegistry,
}

impl PresenceBroadcaster {
    pub fn new(directory: Arc<dyn CredentialDirectory>, registry: ConnectionRegistry) -> Self {
        Self { directory, registry }
    }

    /// Compute the current counts
    pub async fn snapshot(&self) -> Result<PresenceSnapshot, DirectoryError> {
        let registered = self.directory.count().await?;
        let online = self.registry.size().await as u64;
        Ok(PresenceSnapshot { registered, online })
    }

    /// Send `user_counts` to every admitted connection
    ///
    /// # Returns
    ///
    /// The snapshot that was sent, or `None` if the directory count failed
    /// and the broadcast was skipped.
    pub async fn broadcast(&self) -> Option<PresenceSnapshot> {
        let snapshot = match self.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "[Presence] Count query failed, skipping broadcast");
                return None;
            }
        };

        let mut delivered = 0usize;
        self.registry
            .for_each(|connection| {
                if connection.send(ServerEvent::UserCounts(snapshot)) {
                    delivered += 1;
                }
            })
            .await;

        tracing::debug!(
            registered = snapshot.registered,
            online = snapshot.online,
            delivered,
            "[Presence] Broadcast user counts"
        );
        Some(snapshot)
    }

    /// Broadcast in the background without waiting for it
    pub fn trigger(&self) {
        let broadcaster = self.clone();
        tokio::spawn(async move {
            broadcaster.broadcast().await;
        });
    }

    /// Broadcast in the background after `delay`
    ///
    /// Every call schedules its own broadcast; calls within the same window
    /// are not coalesced.
    pub fn trigger_after(&self, delay: Duration) {
        let broadcaster = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            broadcaster.broadcast().await;
        });
    }
}
