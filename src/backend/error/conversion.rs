/**
 * Error Conversion
 *
 * This module converts collaborator errors into `BackendError` and
 * `BackendError` into HTTP responses.
 *
 * # Response Format
 *
 * Error responses are returned as JSON with the following structure:
 * ```json
 * {
 *   "error": "Username already taken: alice",
 *   "code": "DUPLICATE_USERNAME",
 *   "status": 409
 * }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use crate::backend::auth::directory::DirectoryError;
use crate::backend::error::types::BackendError;
use crate::backend::uploads::BlobError;

impl From<DirectoryError> for BackendError {
    fn from(err: DirectoryError) -> Self {
        match err {
            DirectoryError::DuplicateUsername(username) => Self::DuplicateUsername { username },
            DirectoryError::NotFound => Self::InvalidCredential,
            DirectoryError::Unavailable(message) => Self::DirectoryUnavailable { message },
        }
    }
}

impl From<BlobError> for BackendError {
    fn from(err: BlobError) -> Self {
        Self::BlobStore {
            message: err.to_string(),
        }
    }
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(code = self.code(), "Request failed: {}", self);
        } else {
            tracing::debug!(code = self.code(), "Request rejected: {}", self);
        }

        let body = serde_json::json!({
            "error": self.message(),
            "code": self.code(),
            "status": status.as_u16(),
        });

        (status, Json(body)).into_response()
    }
}
