/**
 * Presence Handler
 *
 * GET /api/presence returns the same `{registered, online}` snapshot the relay
 * pushes as `user_counts`, computed on demand.
 */

use axum::{extract::State, response::Json};

use crate::backend::error::BackendError;
use crate::backend::realtime::PresenceBroadcaster;
use crate::shared::PresenceSnapshot;

/// Get presence handler
///
/// # Errors
///
/// * `500 Internal Server Error` - The directory count failed
pub async fn get_presence(
    State(presence): State<PresenceBroadcaster>,
) -> Result<Json<PresenceSnapshot>, BackendError> {
    let snapshot = presence.snapshot().await?;
    Ok(Json(snapshot))
}
