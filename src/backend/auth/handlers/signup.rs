/**
 * Signup Handler
 *
 * This module implements the registration handler for POST /api/auth/signup.
 *
 * # Registration Process
 *
 * 1. Validate the username and credential hash
 * 2. Register the record in the credential directory
 * 3. Trigger a presence broadcast (the registered count changed)
 * 4. Return the public view of the new record
 *
 * There is no existence pre-check: the directory's uniqueness constraint
 * decides between concurrent registrations of the same username.
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::directory::SharedDirectory;
use crate::backend::auth::handlers::types::{AuthResponse, CredentialRequest};
use crate::backend::error::BackendError;
use crate::backend::realtime::PresenceBroadcaster;

/// Sign up handler
///
/// # Errors
///
/// * `400 Bad Request` - Blank username or credential hash, or username too long
/// * `409 Conflict` - The username is already registered
/// * `500 Internal Server Error` - The directory is unavailable
///
/// # Example Request
///
/// ```http
/// POST /api/auth/signup HTTP/1.1
/// Content-Type: application/json
///
/// {"username": "alice", "credential_hash": "9f86d081884c7d65"}
/// ```
///
/// # Example Response
///
/// ```json
/// {"user": {"username": "alice", "created_at": "2024-01-01T00:00:00Z"}}
/// ```
pub async fn signup(
    State(directory): State<SharedDirectory>,
    State(presence): State<PresenceBroadcaster>,
    Json(request): Json<CredentialRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    tracing::info!("Signup request for username: {}", request.username);
    request.validate()?;

    let record = directory
        .register(&request.username, &request.credential_hash)
        .await
        .map_err(|e| {
            tracing::warn!("Signup failed for {}: {}", request.username, e);
            BackendError::from(e)
        })?;

    tracing::info!("User registered: {}", record.username);
    presence.trigger();

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            user: record.into(),
        }),
    ))
}
