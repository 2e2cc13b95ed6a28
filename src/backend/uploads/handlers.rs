/**
 * Upload Handler
 *
 * POST /api/upload takes the raw request body and stores it through the
 * configured blob store. The request `Content-Type` picks the file extension.
 * The body size limit is enforced by the router's `DefaultBodyLimit`, which
 * answers oversized requests with 413 before this handler runs.
 */

use axum::{
    extract::State,
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::backend::error::BackendError;
use crate::backend::uploads::SharedBlobStore;

/// Content type assumed when the request carries none
const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// Upload response
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct UploadResponse {
    /// Public URL of the stored blob
    pub url: String,
}

/// Upload handler
///
/// # Errors
///
/// * `400 Bad Request` - Empty body
/// * `413 Payload Too Large` - Body over the configured limit
/// * `500 Internal Server Error` - The blob could not be written
pub async fn upload(
    State(store): State<SharedBlobStore>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>), BackendError> {
    if body.is_empty() {
        return Err(BackendError::handler(StatusCode::BAD_REQUEST, "Empty upload"));
    }

    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or(DEFAULT_CONTENT_TYPE);

    let url = store.store(&body, content_type).await?;
    tracing::info!(size = body.len(), content_type, url = %url, "[Uploads] Upload stored");

    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}
