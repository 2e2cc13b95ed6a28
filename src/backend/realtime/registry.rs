/**
 * Connection Registry
 *
 * The live set of admitted relay connections. Each entry carries the identity
 * token the connection presented and the sending half of the channel its
 * writer task drains, so any component holding the registry can push events
 * to a connection without touching its socket.
 *
 * Only the relay gateway inserts and removes entries: on admission and when
 * the connection's transport closes.
 */

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

use crate::shared::ServerEvent;

/// Opaque handle identifying one live connection
pub type ConnectionId = Uuid;

/// Sender half of a connection's outbound event channel
pub type ConnectionSender = mpsc::UnboundedSender<ServerEvent>;

/// One admitted connection
#[derive(Debug, Clone)]
pub struct LiveConnection {
    pub id: ConnectionId,
    pub identity_token: String,
    pub connected_at: DateTime<Utc>,
    sender: ConnectionSender,
}

impl LiveConnection {
    pub fn new(id: ConnectionId, identity_token: impl Into<String>, sender: ConnectionSender) -> Self {
        Self {
            id,
            identity_token: identity_token.into(),
            connected_at: Utc::now(),
            sender,
        }
    }

    /// Queue an event for this connection
    ///
    /// Returns `false` if the connection's writer has already gone away.
    pub fn send(&self, event: ServerEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

/// Shared registry of live connections
///
/// Cloning the registry clones the handle, not the set.
#[derive(Debug, Clone, Default)]
pub struct ConnectionRegistry {
    connections: Arc<RwLock<HashMap<ConnectionId, LiveConnection>>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a connection
    ///
    /// Returns `false` and leaves the registry unchanged if a connection with
    /// the same id is already live.
    pub async fn add(&self, connection: LiveConnection) -> bool {
        let mut connections = self.connections.write().await;
        if connections.contains_key(&connection.id) {
            return false;
        }
        connections.insert(connection.id, connection);
        true
    }

    /// Remove a connection; removing an unknown id is a no-op
    pub async fn remove(&self, id: ConnectionId) -> Option<LiveConnection> {
        self.connections.write().await.remove(&id)
    }

    pub async fn size(&self) -> usize {
        self.connections.read().await.len()
    }

    /// Call `f` once for every live connection except `excluding`
    ///
    /// Order is unspecified. `f` runs under the registry's read lock and must
    /// not block.
    pub async fn for_each_other<F>(&self, excluding: ConnectionId, mut f: F)
    where
        F: FnMut(&LiveConnection),
    {
        let connections = self.connections.read().await;
        for connection in connections.values().filter(|c| c.id != excluding) {
            f(connection);
        }
    }

    /// Call `f` once for every live connection
    pub async fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&LiveConnection),
    {
        let connections = self.connections.read().await;
        for connection in connections.values() {
            f(connection);
        }
    }
}
