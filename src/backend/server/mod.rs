//! Server Module
//!
//! Initialization and configuration of the Axum HTTP server.
//!
//! # Architecture
//!
//! - **`state`** - Application state structure and `FromRef` implementations
//! - **`config`** - Service loading from configuration (credential directory)
//! - **`init`** - Server initialization and app creation
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - AppState and FromRef implementations
//! ├── config.rs       - Directory loading (PostgreSQL or memory)
//! └── init.rs         - Server initialization and app creation
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration Loading**: `AppConfig::from_env()` in the binary
//! 2. **Directory Loading**: PostgreSQL pool plus migrations, or memory
//! 3. **State Creation**: Registry, presence broadcaster, gateway, blob store
//! 4. **Router Creation**: Routes, middleware and static uploads
//!
//! # Example
//!
//! ```rust,no_run
//! use relaychat::backend::server::create_app;
//! use relaychat::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let addr = config.bind_address()?;
//! let app = create_app(config).await;
//! let listener = tokio::net::TcpListener::bind(addr).await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Service loading from configuration
pub mod config;

/// Server initialization
pub mod init;

pub use init::{build_state, create_app};
pub use state::AppState;
