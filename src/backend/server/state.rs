/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds one instance of each long-lived component:
 * - The credential directory (PostgreSQL or in-memory)
 * - The connection registry
 * - The presence broadcaster, bound to that directory and registry
 * - The relay gateway, bound to that registry and broadcaster
 * - The liveness window applied to relay connections
 * - The blob store for uploads
 * - The loaded configuration
 *
 * Every component is a cheap handle around shared state, so cloning
 * `AppState` per request never copies the underlying data.
 *
 * # State Extraction
 *
 * Handlers take only the part they need, e.g. `State<RelayGateway>` or
 * `State<SharedDirectory>`.
 */

use axum::extract::FromRef;
use std::sync::Arc;

use crate::backend::auth::SharedDirectory;
use crate::backend::realtime::{ConnectionRegistry, Liveness, PresenceBroadcaster, RelayGateway};
use crate::backend::uploads::SharedBlobStore;
use crate::shared::AppConfig;

/// Application state shared by every route
#[derive(Clone)]
pub struct AppState {
    /// Credential directory
    pub directory: SharedDirectory,

    /// Live relay connections
    pub registry: ConnectionRegistry,

    /// Pushes `user_counts` to every live connection
    pub presence: PresenceBroadcaster,

    /// Relay entry point used by `GET /ws`
    pub gateway: RelayGateway,

    /// Ping cadence and silence tolerance of relay connections
    pub liveness: Liveness,

    /// Storage for uploaded blobs
    pub blob_store: SharedBlobStore,

    /// Configuration the server was started with
    pub config: Arc<AppConfig>,
}

impl AppState {
    /// Wire the components together around a directory and a blob store
    pub fn new(directory: SharedDirectory, blob_store: SharedBlobStore, config: AppConfig) -> Self {
        let registry = ConnectionRegistry::new();
        let presence = PresenceBroadcaster::new(directory.clone(), registry.clone());
        let gateway = RelayGateway::new(
            registry.clone(),
            presence.clone(),
            config.presence_disconnect_delay,
        );
        let liveness = Liveness::from(&config);

        Self {
            directory,
            registry,
            presence,
            gateway,
            liveness,
            blob_store,
            config: Arc::new(config),
        }
    }
}

impl FromRef<AppState> for SharedDirectory {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.directory.clone()
    }
}

impl FromRef<AppState> for ConnectionRegistry {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.registry.clone()
    }
}

impl FromRef<AppState> for PresenceBroadcaster {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.presence.clone()
    }
}

impl FromRef<AppState> for RelayGateway {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.gateway.clone()
    }
}

impl FromRef<AppState> for Liveness {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.liveness
    }
}

impl FromRef<AppState> for SharedBlobStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.blob_store.clone()
    }
}
