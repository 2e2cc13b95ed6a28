/**
 * Relay Routes
 *
 * - `GET /ws?token=<identity>` - WebSocket upgrade into the relay gateway
 * - `GET /api/presence` - Current `{registered, online}` snapshot
 */

use axum::{routing::get, Router};

use crate::backend::realtime::{get_presence, ws_upgrade};
use crate::backend::server::state::AppState;

/// Configure relay routes
pub fn configure_relay_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/ws", get(ws_upgrade))
        .route("/api/presence", get(get_presence))
}
