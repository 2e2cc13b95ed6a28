/**
 * Admin Authorization Middleware
 *
 * Guards every route under `/api/admin`. A request passes only when the server
 * has an admin token configured and the request's `x-admin-token` header
 * equals it.
 *
 * - No admin token configured → 403 Forbidden
 * - Header missing or different → 401 Unauthorized
 *
 * Tokens are compared without short-circuiting, so response timing does not
 * depend on how long a prefix of the guess was correct.
 */

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Header carrying the admin token
pub const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Admin authorization middleware
pub async fn require_admin(
    State(app_state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let Some(expected) = app_state.config.admin_token.as_deref() else {
        tracing::warn!("Admin route requested but no admin token is configured");
        return Err(BackendError::handler(StatusCode::FORBIDDEN, "Admin routes are disabled"));
    };

    let presented = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(token) if tokens_match(token, expected) => Ok(next.run(request).await),
        Some(_) => {
            tracing::warn!("Invalid admin token");
            Err(BackendError::handler(StatusCode::UNAUTHORIZED, "Invalid admin token"))
        }
        None => {
            tracing::warn!("Missing {} header", ADMIN_TOKEN_HEADER);
            Err(BackendError::handler(StatusCode::UNAUTHORIZED, "Missing admin token"))
        }
    }
}

/// Constant-time token comparison
fn tokens_match(presented: &str, expected: &str) -> bool {
    presented.len() == expected.len()
        && presented
            .bytes()
            .zip(expected.bytes())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
