//! Realtime Relay Module
//!
//! This module implements the presence-aware chat relay: admitted WebSocket
//! connections exchange opaque message and image events, and every connection
//! is kept informed of how many users are registered and how many are online.
//!
//! # Architecture
//!
//! - **`registry`** - The live set of admitted connections
//! - **`presence`** - Computes `{registered, online}` and broadcasts it
//! - **`gateway`** - Per-connection state machine: admission, fan-out, close
//! - **`websocket`** - axum WebSocket transport driving the gateway
//! - **`handlers`** - `GET /api/presence`
//!
//! # Module Structure
//!
//! ```text
//! realtime/
//! ├── mod.rs       - Module exports and documentation
//! ├── registry.rs  - Connection registry
//! ├── presence.rs  - Presence broadcaster
//! ├── gateway.rs   - Relay gateway and sessions
//! ├── websocket.rs - GET /ws handler
//! └── handlers.rs  - GET /api/presence handler
//! ```
//!
//! # Delivery
//!
//! Each admitted connection owns an unbounded channel drained by its writer
//! task. Fan-out and presence broadcasts only queue onto those channels, so a
//! slow client never blocks the sender or the other recipients.
//!
//! # Example
//!
//! ```rust,no_run
//! use relaychat::backend::{ConnectionRegistry, MemoryDirectory, PresenceBroadcaster, RelayGateway};
//! use relaychat::shared::ClientEvent;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = ConnectionRegistry::new();
//! let presence = PresenceBroadcaster::new(Arc::new(MemoryDirectory::new()), registry.clone());
//! let gateway = RelayGateway::new(registry, presence, Duration::from_secs(1));
//!
//! let mut session = gateway.open(Some("alice".to_string()));
//! gateway.admit(&mut session).await?;
//! gateway.dispatch(&session, ClientEvent::SendMessage(serde_json::json!("hi"))).await;
//! gateway.close(&mut session).await;
//! # Ok(())
//! # }
//! ```

/// Connection registry
pub mod registry;

/// Presence broadcaster
pub mod presence;

/// Relay gateway
pub mod gateway;

/// WebSocket transport
pub mod websocket;

/// Presence HTTP handler
pub mod handlers;

pub use gateway::{ConnectionState, RelayGateway, RelaySession};
pub use presence::PresenceBroadcaster;
pub use registry::{ConnectionId, ConnectionRegistry, LiveConnection};
pub use handlers::get_presence;
pub use websocket::{ws_upgrade, Liveness};
