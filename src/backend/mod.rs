//! Backend Module
//!
//! This module contains all server-side code for relaychat: an axum HTTP
//! server exposing a WebSocket relay, a small signup/signin surface and a
//! blob upload endpoint.
//!
//! # Architecture
//!
//! The backend is organized into focused submodules:
//!
//! - **`server`** - Server initialization, application state, configuration
//! - **`routes`** - HTTP route configuration and router assembly
//! - **`auth`** - Credential directory and signup/signin/admin handlers
//! - **`realtime`** - Connection registry, relay gateway, presence broadcaster
//! - **`uploads`** - Blob store collaborator and upload handler
//! - **`middleware`** - Request processing middleware
//! - **`error`** - Backend error taxonomy
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Server initialization and state
//! ├── routes/         - Route configuration
//! ├── auth/           - Credential directory and handlers
//! ├── realtime/       - Relay and presence
//! ├── uploads/        - Blob store
//! ├── middleware/     - Request middleware
//! └── error/          - Error types
//! ```
//!
//! # State Management
//!
//! The backend builds one `AppState` per process. It owns the credential
//! directory, the connection registry, the presence broadcaster, the relay
//! gateway and the blob store, and hands clones of them to every handler via
//! axum's `State` extractor. Nothing is stored in globals, so tests can build
//! isolated states around in-memory collaborators.
//!
//! # Relay Flow
//!
//! 1. A client opens `GET /ws?token=<identity>`
//! 2. The gateway admits the connection if the token is non-empty
//! 3. The connection is inserted in the registry and a presence broadcast fires
//! 4. `send_message`/`send_image` events are fanned out to every other connection
//! 5. On disconnect the registry entry is removed and a delayed presence
//!    broadcast fires

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Relay, connection registry and presence
pub mod realtime;

/// Backend error types
pub mod error;

/// Credential directory and authentication handlers
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Blob upload collaborator
pub mod uploads;

/// Re-export commonly used types
pub use server::create_app;
pub use realtime::{ConnectionRegistry, PresenceBroadcaster, RelayGateway};
pub use auth::{CredentialDirectory, MemoryDirectory};
pub use error::BackendError;
