/**
 * API Routes
 *
 * ## Authentication
 * - `POST /api/auth/signup` - Register a credential record
 * - `POST /api/auth/signin` - Authenticate against the directory
 *
 * ## Admin (requires `x-admin-token`)
 * - `DELETE /api/admin/users` - Remove credential records in bulk
 *
 * ## Uploads
 * - `POST /api/upload` - Store a blob, body limited to `max_upload_bytes`
 *
 * ## Health
 * - `GET /health` - Liveness probe
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    response::Json,
    routing::{delete, get, post},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::{remove_users, signin, signup};
use crate::backend::middleware::require_admin;
use crate::backend::server::state::AppState;
use crate::backend::uploads::upload;

/// Configure API routes
///
/// The admin guard is attached with `route_layer`, so it only runs for
/// requests that matched an admin route.
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    let admin_routes = Router::new()
        .route("/api/admin/users", delete(remove_users))
        .route_layer(middleware::from_fn_with_state(app_state.clone(), require_admin));

    router
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/signin", post(signin))
        .route(
            "/api/upload",
            post(upload).layer(DefaultBodyLimit::max(app_state.config.max_upload_bytes)),
        )
        .route("/health", get(health))
        .merge(admin_routes)
}

/// Health check handler
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
