/**
 * Backend Error Types
 *
 * This module defines the error taxonomy shared by the relay gateway and the
 * HTTP handlers.
 *
 * # Error Categories
 *
 * ## Relay Errors
 *
 * - `MissingToken` is fatal to a single connection attempt; the connection is
 *   closed before it reaches the connection registry.
 *
 * ## Directory Errors
 *
 * - `DuplicateUsername` is surfaced to the caller and is never fatal.
 * - `InvalidCredential` deliberately does not say whether the username or the
 *   credential hash was wrong.
 * - `DirectoryUnavailable` is logged with its cause but surfaced to clients
 *   only as a generic server failure.
 *
 * ## Request Errors
 *
 * - `HandlerError` carries an explicit status code.
 * - `SharedError` wraps validation and decoding failures.
 */

use thiserror::Error;
use axum::http::StatusCode;
use crate::shared::SharedError;

/// Backend-specific error types
///
/// Each variant maps to an HTTP status code and a stable machine-readable
/// code that clients can match on.
///
/// # Usage
///
/// ```rust
/// use relaychat::backend::error::BackendError;
/// use axum::http::StatusCode;
///
/// let err = BackendError::handler(StatusCode::BAD_REQUEST, "Empty upload");
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// assert_eq!(BackendError::MissingToken.code(), "NO_TOKEN");
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    /// A connection presented no identity token (or an empty one)
    #[error("Missing identity token")]
    MissingToken,

    /// A credential record with this username already exists
    #[error("Username already taken: {username}")]
    DuplicateUsername {
        /// The conflicting username
        username: String,
    },

    /// Unknown username or wrong credential hash
    #[error("Invalid username or credential")]
    InvalidCredential,

    /// The credential directory could not be reached
    ///
    /// The message is logged but never returned to clients.
    #[error("Directory unavailable: {message}")]
    DirectoryUnavailable {
        /// Underlying failure description
        message: String,
    },

    /// The blob store failed to persist an upload
    #[error("Blob store error: {message}")]
    BlobStore {
        /// Underlying failure description
        message: String,
    },

    /// Handler error (e.g., empty body, oversized upload, missing admin token)
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },

    /// Shared error (validation, malformed frames)
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Create a new directory-unavailable error
    pub fn directory_unavailable(message: impl Into<String>) -> Self {
        Self::DirectoryUnavailable {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `MissingToken` - 401 Unauthorized
    /// - `DuplicateUsername` - 409 Conflict
    /// - `InvalidCredential` - 401 Unauthorized
    /// - `DirectoryUnavailable` - 500 Internal Server Error
    /// - `BlobStore` - 500 Internal Server Error
    /// - `HandlerError` - Uses the status code from the error
    /// - `SharedError` - 400 for validation and frame errors, 500 otherwise
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::DuplicateUsername { .. } => StatusCode::CONFLICT,
            Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::DirectoryUnavailable { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BlobStore { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HandlerError { status, .. } => *status,
            Self::SharedError(err) => match err {
                SharedError::SerializationError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
                SharedError::ValidationError { .. } => StatusCode::BAD_REQUEST,
                SharedError::MessageError { .. } => StatusCode::BAD_REQUEST,
            },
        }
    }

    /// Stable machine-readable error code
    ///
    /// Server-side failures share `INTERNAL_ERROR`, so the code reveals no
    /// more about the cause than the message does.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingToken => "NO_TOKEN",
            Self::DuplicateUsername { .. } => "DUPLICATE_USERNAME",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::DirectoryUnavailable { .. } | Self::BlobStore { .. } => "INTERNAL_ERROR",
            Self::HandlerError { .. } => "REQUEST_ERROR",
            Self::SharedError(SharedError::ValidationError { .. }) => "VALIDATION_ERROR",
            Self::SharedError(SharedError::MessageError { .. }) => "INVALID_EVENT",
            Self::SharedError(SharedError::SerializationError { .. }) => "SERIALIZATION_ERROR",
        }
    }

    /// Get the client-facing error message
    ///
    /// Server-side failures are reduced to a generic message; their details
    /// only reach the logs.
    pub fn message(&self) -> String {
        match self {
            Self::DirectoryUnavailable { .. } | Self::BlobStore { .. } => {
                "Internal server error".to_string()
            }
            Self::HandlerError { message, .. } => message.clone(),
            Self::SharedError(err) => err.to_string(),
            other => other.to_string(),
        }
    }
}
