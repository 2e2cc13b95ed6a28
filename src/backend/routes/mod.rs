//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs           - Module exports and documentation
//! ├── router.rs        - Main router creation
//! ├── relay_routes.rs  - WebSocket and presence routes
//! └── api_routes.rs    - Auth, admin, upload and health routes
//! ```
//!
//! # Routes
//!
//! - `GET /ws?token=<identity>` - Relay WebSocket
//! - `GET /api/presence` - Registered/online counts
//! - `POST /api/auth/signup` - Register
//! - `POST /api/auth/signin` - Authenticate
//! - `DELETE /api/admin/users` - Bulk removal (admin token)
//! - `POST /api/upload` - Blob upload
//! - `GET /uploads/*` - Stored blobs
//! - `GET /health` - Liveness probe
//!
//! # Example
//!
//! ```rust,no_run
//! use relaychat::backend::routes::create_router;
//! use relaychat::backend::server::build_state;
//! use relaychat::shared::AppConfig;
//!
//! # async fn example() {
//! let state = build_state(AppConfig::default()).await;
//! let router = create_router(state);
//! # }
//! ```

/// Main router creation
pub mod router;

/// Relay routes
pub mod relay_routes;

/// API routes
pub mod api_routes;

pub use router::create_router;
