//! Backend Error Module
//!
//! This module defines the error taxonomy of the backend. Every failure the
//! relay or an HTTP handler can surface is a `BackendError`.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - Error conversion implementations
//! ```
//!
//! # Error Types
//!
//! - `MissingToken` - A connection attempt without an identity token
//! - `DuplicateUsername` - Registration conflict in the credential directory
//! - `InvalidCredential` - Unknown user or wrong credential hash
//! - `DirectoryUnavailable` - Transient directory I/O failure
//! - `BlobStore` - Upload storage failure
//! - `HandlerError` - Request-level failures with an explicit status
//! - `SharedError` - Validation and frame decoding failures
//!
//! # HTTP Response Conversion
//!
//! `BackendError` implements `IntoResponse`, so handlers return it directly.
//! The relay sends the same `code()` inside an `error` event before closing
//! a rejected connection.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::BackendError;
