//! Shared Module
//!
//! This module contains types that are shared between the relay, the HTTP
//! handlers and the clients that speak to them. All wire types are designed
//! for JSON serialization over WebSocket text frames and HTTP bodies.

/// Relay wire events
pub mod event;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use event::{ClientEvent, ErrorPayload, PresenceSnapshot, ServerEvent};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
