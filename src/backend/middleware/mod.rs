//! Middleware Module
//!
//! HTTP middleware applied to groups of routes.
//!
//! - **`auth`** - Admin token guard for `/api/admin/*`
//!
//! # Example
//!
//! ```rust,no_run
//! use relaychat::backend::middleware::require_admin;
//! use relaychat::backend::server::AppState;
//! use axum::{middleware, Router};
//!
//! # fn example(state: AppState, admin_routes: Router<AppState>) -> Router<AppState> {
//! admin_routes.layer(middleware::from_fn_with_state(state, require_admin))
//! # }
//! ```

pub mod auth;

pub use auth::{require_admin, ADMIN_TOKEN_HEADER};
