//! API route configuration.

use crate::api::handlers::{health_handler, ping_handler, shorten_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Fixed API routes.
///
/// # Endpoints
///
/// - `POST /shorten` - Register a destination URL
/// - `GET  /ping`    - Liveness probe
/// - `GET  /health`  - Store and cache checks
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
}
