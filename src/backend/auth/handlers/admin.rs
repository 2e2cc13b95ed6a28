/**
 * Admin Handlers
 *
 * DELETE /api/admin/users removes credential records in bulk. The route sits
 * behind the `require_admin` middleware. A presence broadcast is triggered only
 * when at least one record was actually deleted.
 */

use axum::{extract::State, response::Json};
use std::collections::HashSet;

use crate::backend::auth::directory::SharedDirectory;
use crate::backend::auth::handlers::types::{RemoveUsersRequest, RemoveUsersResponse};
use crate::backend::error::BackendError;
use crate::backend::realtime::PresenceBroadcaster;

/// Remove users handler
///
/// Usernames without a record are ignored; duplicates in the request count
/// once.
///
/// # Errors
///
/// * `500 Internal Server Error` - The directory is unavailable
pub async fn remove_users(
    State(directory): State<SharedDirectory>,
    State(presence): State<PresenceBroadcaster>,
    Json(request): Json<RemoveUsersRequest>,
) -> Result<Json<RemoveUsersResponse>, BackendError> {
    let usernames: HashSet<String> = request.usernames.into_iter().collect();
    let removed = directory.remove(&usernames).await?;

    tracing::info!(requested = usernames.len(), removed, "[Admin] Removed users");
    if removed > 0 {
        presence.trigger();
    }

    Ok(Json(RemoveUsersResponse { removed }))
}
