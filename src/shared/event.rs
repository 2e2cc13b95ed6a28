/**
 * Relay Wire Events
 *
 * This module defines the events exchanged over a relay connection. Every
 * WebSocket text frame carries exactly one event encoded as
 * `{"event": "<name>", "data": <payload>}`.
 *
 * Message and image payloads are opaque JSON values: the relay forwards them
 * verbatim and never inspects their shape.
 */
use serde::{Deserialize, Serialize};

use crate::shared::error::SharedError;

/// Event sent by a client to the relay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// Text message to relay to every other connection
    SendMessage(serde_json::Value),
    /// Image message (usually an uploaded blob URL) to relay to every other connection
    SendImage(serde_json::Value),
}

/// Event pushed by the relay to a client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A message sent by another connection
    ReceiveMessage(serde_json::Value),
    /// An image sent by another connection
    ReceiveImage(serde_json::Value),
    /// Current registered/online counts
    UserCounts(PresenceSnapshot),
    /// Sent to a connection right before the relay closes it
    Error(ErrorPayload),
}

/// Registered versus online user counts
///
/// Derived on demand for a single broadcast and never cached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PresenceSnapshot {
    /// Number of credential records in the directory
    pub registered: u64,
    /// Number of currently admitted connections
    pub online: u64,
}

/// Error payload carried by [`ServerEvent::Error`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorPayload {
    /// Stable machine-readable code, e.g. `NO_TOKEN`
    pub code: String,
    /// Human-readable description
    pub message: String,
}

impl ErrorPayload {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl ClientEvent {
    /// Decode a client event from a text frame
    pub fn from_frame(text: &str) -> Result<Self, SharedError> {
        serde_json::from_str(text)
            .map_err(|e| SharedError::message(format!("invalid client event: {}", e)))
    }

    /// Convert an inbound event into the outbound event delivered to the
    /// other connections
    pub fn into_relayed(self) -> ServerEvent {
        match self {
            ClientEvent::SendMessage(payload) => ServerEvent::ReceiveMessage(payload),
            ClientEvent::SendImage(payload) => ServerEvent::ReceiveImage(payload),
        }
    }
}

impl ServerEvent {
    /// Name of the event as it appears on the wire
    pub fn name(&self) -> &'static str {
        match self {
            ServerEvent::ReceiveMessage(_) => "receive_message",
            ServerEvent::ReceiveImage(_) => "receive_image",
            ServerEvent::UserCounts(_) => "user_counts",
            ServerEvent::Error(_) => "error",
        }
    }

    /// Encode the event as a text frame
    pub fn to_frame(&self) -> Result<String, SharedError> {
        Ok(serde_json::to_string(self)?)
    }
}
