/**
 * Server Initialization
 *
 * This module builds the application: it loads the credential directory,
 * creates the blob store, wires the relay components into `AppState` and
 * hands the state to the router.
 */

use axum::Router;
use std::sync::Arc;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_directory;
use crate::backend::server::state::AppState;
use crate::backend::uploads::LocalBlobStore;
use crate::shared::AppConfig;

/// Create and configure the Axum application
///
/// # Initialization Steps
///
/// 1. **Load Directory**: PostgreSQL when configured and reachable, memory otherwise
/// 2. **Create Blob Store**: Local store under `upload_dir`
/// 3. **Build State**: Registry, presence broadcaster and relay gateway
/// 4. **Create Router**: All routes, static uploads and tracing
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing relay server");
    let state = build_state(config).await;
    create_router(state)
}

/// Build the application state without a router
pub async fn build_state(config: AppConfig) -> AppState {
    let directory = load_directory(&config).await;
    let blob_store = Arc::new(LocalBlobStore::new(
        config.upload_dir.clone(),
        config.public_base_url.clone(),
    ));

    tracing::info!(
        upload_dir = %config.upload_dir.display(),
        disconnect_delay_ms = config.presence_disconnect_delay.as_millis() as u64,
        admin_enabled = config.admin_token.is_some(),
        "Relay components initialized"
    );

    AppState::new(directory, blob_store, config)
}
