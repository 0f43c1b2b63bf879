//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten` - Register a destination
//! - `GET  /ping`    - Liveness probe
//! - `GET  /health`  - Store and cache checks
//! - `GET  /{code}`  - Short code redirect
//!
//! Fixed routes take precedence over `/{code}`; the code generator never
//! issues a code equal to one of them.
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::redirect_handler;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Routes and request tracing, without path normalization.
pub fn app_routes(state: AppState) -> Router {
    Router::new()
        .merge(api::routes::api_routes())
        .route("/{code}", get(redirect_handler))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application router with all routes and middleware.
///
/// Trailing slashes are trimmed before routing, so it wraps the
/// [`Router`] rather than being added as a route layer.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(app_routes(state))
}
