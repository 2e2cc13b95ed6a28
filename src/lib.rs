//! relaychat - Main Library
//!
//! relaychat is a small real-time chat backend built on axum. Clients register
//! with a username and a client-computed credential hash, exchange text and
//! image messages over WebSocket connections, and receive live counts of
//! registered versus currently connected users.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types and configuration shared by every layer
//!   - Inbound/outbound relay events
//!   - Validation and decoding errors
//!   - Application configuration
//!
//! - **`backend`** - The server
//!   - Credential directory (in-memory and PostgreSQL)
//!   - Connection registry, relay gateway and presence broadcaster
//!   - Blob upload store
//!   - HTTP routes and middleware
//!
//! # Usage
//!
//! ```rust,no_run
//! use relaychat::backend::server::create_app;
//! use relaychat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await;
//! // Serve `app` with axum::serve
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! All server state is shared through `Arc` and `tokio::sync::RwLock`; the
//! registry and directory handles are cheap to clone and are passed
//! explicitly to every component that needs them.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
