/**
 * Signin Handler
 *
 * POST /api/auth/signin. Looks up the record matching both the username and
 * the credential hash. Unknown usernames and wrong hashes produce the same
 * 401 response. Signing in does not change presence.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::directory::SharedDirectory;
use crate::backend::auth::handlers::types::{AuthResponse, CredentialRequest};
use crate::backend::error::BackendError;

/// Sign in handler
///
/// # Errors
///
/// * `400 Bad Request` - Blank username or credential hash
/// * `401 Unauthorized` - No record matches both fields
/// * `500 Internal Server Error` - The directory is unavailable
pub async fn signin(
    State(directory): State<SharedDirectory>,
    Json(request): Json<CredentialRequest>,
) -> Result<Json<AuthResponse>, BackendError> {
    tracing::info!("Signin request for username: {}", request.username);
    request.validate()?;

    let record = directory
        .authenticate(&request.username, &request.credential_hash)
        .await
        .map_err(|e| {
            tracing::warn!("Signin failed for {}: {}", request.username, e);
            BackendError::from(e)
        })?;

    Ok(Json(AuthResponse {
        user: record.into(),
    }))
}
