/**
 * Router Configuration
 *
 * Combines all route groups into a single Axum router.
 *
 * # Route Order
 *
 * 1. Relay routes (WebSocket, presence)
 * 2. API routes (auth, admin, uploads, health)
 * 3. Static serving of stored uploads under `/uploads`
 * 4. Fallback handler (404)
 *
 * Every request passes through `TraceLayer`.
 */

use axum::{http::StatusCode, Router};
use tower::ServiceBuilder;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::routes::relay_routes::configure_relay_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Application state shared by every handler
///
/// # Returns
///
/// Configured Axum Router ready to serve requests
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();

    let router = configure_relay_routes(router);
    let router = configure_api_routes(router, &app_state);

    // Blobs written by the local blob store
    let router = router.nest_service("/uploads", ServeDir::new(&app_state.config.upload_dir));

    let router = router.fallback(|| async {
        BackendError::handler(StatusCode::NOT_FOUND, "Not found")
    });

    router
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(app_state)
}
