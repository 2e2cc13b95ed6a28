/**
 * Relay Gateway
 *
 * The gateway owns the per-connection state machine:
 *
 * ```text
 * Pending ──(non-empty token)──> Admitted ──(transport closed)──> Closed
 *    └──────────(missing token: MissingToken)──────────────────────┘
 * ```
 *
 * - `open` records the identity token taken from the handshake (`Pending`).
 * - `admit` runs the authentication gate. On success the connection enters
 *   the registry and a presence broadcast is triggered without waiting for
 *   it. On failure the session goes straight to `Closed` and never touches
 *   the registry.
 * - `dispatch` fans an inbound event out to every other admitted connection.
 * - `close` removes the registry entry and schedules a delayed presence
 *   broadcast, once per disconnect.
 *
 * The gateway is transport-agnostic; `websocket.rs` drives it from an axum
 * WebSocket.
 */

use std::time::Duration;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::realtime::presence::PresenceBroadcaster;
use crate::backend::realtime::registry::{ConnectionId, ConnectionRegistry, LiveConnection};
use crate::shared::{ClientEvent, ServerEvent};

/// Lifecycle state of a relay connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// Opened, identity token not yet checked
    Pending,
    /// In the connection registry, exchanging events
    Admitted,
    /// Rejected or disconnected
    Closed,
}

/// One connection's view of the relay
#[derive(Debug)]
pub struct RelaySession {
    id: ConnectionId,
    identity_token: Option<String>,
    state: ConnectionState,
    events: Option<mpsc::UnboundedReceiver<ServerEvent>>,
}

impl RelaySession {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    /// Identity token presented at connect time, if any
    pub fn identity_token(&self) -> Option<&str> {
        self.identity_token.as_deref()
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Take the outbound event stream of an admitted session
    ///
    /// Returns `None` before admission or once the stream has been taken.
    pub fn take_events(&mut self) -> Option<mpsc::UnboundedReceiver<ServerEvent>> {
        self.events.take()
    }

    /// Receive the next outbound event, if the stream has not been taken
    pub async fn recv(&mut self) -> Option<ServerEvent> {
        match self.events.as_mut() {
            Some(events) => events.recv().await,
            None => None,
        }
    }
}

/// Entry point of the relay
#[derive(Clone)]
pub struct RelayGateway {
    registry: ConnectionRegistry,
    presence: PresenceBroadcaster,
    disconnect_delay: Duration,
}

impl RelayGateway {
    pub fn new(
        registry: ConnectionRegistry,
        presence: PresenceBroadcaster,
        disconnect_delay: Duration,
    ) -> Self {
        Self {
            registry,
            presence,
            disconnect_delay,
        }
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn presence(&self) -> &PresenceBroadcaster {
        &self.presence
    }

    /// Start a `Pending` session for a freshly opened transport
    pub fn open(&self, identity_token: Option<String>) -> RelaySession {
        RelaySession {
            id: Uuid::new_v4(),
            identity_token,
            state: ConnectionState::Pending,
            events: None,
        }
    }

    /// Run the authentication gate on a `Pending` session
    ///
    /// # Errors
    ///
    /// * `MissingToken` - The token is absent or blank; the session is now
    ///   `Closed` and was never registered
    /// * `HandlerError` - The session is not `Pending`
    pub async fn admit(&self, session: &mut RelaySession) -> Result<(), BackendError> {
        if session.state != ConnectionState::Pending {
            return Err(BackendError::handler(
                axum::http::StatusCode::CONFLICT,
                "Connection is not pending",
            ));
        }

        let token = match session.identity_token.as_deref() {
            Some(token) if !token.trim().is_empty() => token.to_string(),
            _ => {
                session.state = ConnectionState::Closed;
                tracing::warn!(connection_id = %session.id, "[Relay] Rejected connection without identity token");
                return Err(BackendError::MissingToken);
            }
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let connection = LiveConnection::new(session.id, token.clone(), tx);
        if !self.registry.add(connection).await {
            // Ids are fresh v4 UUIDs, so this only fires on a reused session id
            session.state = ConnectionState::Closed;
            return Err(BackendError::handler(
                axum::http::StatusCode::CONFLICT,
                "Connection id already live",
            ));
        }

        session.events = Some(rx);
        session.state = ConnectionState::Admitted;
        tracing::info!(connection_id = %session.id, identity = %token, "[Relay] Connection admitted");

        self.presence.trigger();
        Ok(())
    }

    /// Fan an inbound event out to every other admitted connection
    ///
    /// Payloads are forwarded verbatim; the sender never receives its own
    /// event. Events from a session that is not `Admitted` are dropped.
    ///
    /// # Returns
    ///
    /// Number of connections the event was queued for
    pub async fn dispatch(&self, session: &RelaySession, event: ClientEvent) -> usize {
        if session.state != ConnectionState::Admitted {
            tracing::debug!(connection_id = %session.id, "[Relay] Dropping event from non-admitted connection");
            return 0;
        }

        let outbound = event.into_relayed();
        let name = outbound.name();
        let mut delivered = 0usize;
        self.registry
            .for_each_other(session.id, |connection| {
                if connection.send(outbound.clone()) {
                    delivered += 1;
                }
            })
            .await;

        tracing::debug!(connection_id = %session.id, event = name, delivered, "[Relay] Fan-out");
        delivered
    }

    /// Move a session to `Closed`
    ///
    /// For an admitted session this removes the registry entry and schedules
    /// a presence broadcast after the disconnect delay. Closing twice is
    /// harmless.
    pub async fn close(&self, session: &mut RelaySession) {
        let was_admitted = session.state == ConnectionState::Admitted;
        session.state = ConnectionState::Closed;
        session.events = None;

        if !was_admitted {
            return;
        }

        if self.registry.remove(session.id).await.is_some() {
            tracing::info!(
                connection_id = %session.id,
                identity = session.identity_token().unwrap_or_default(),
                "[Relay] Connection closed"
            );
            self.presence.trigger_after(self.disconnect_delay);
        }
    }
}
