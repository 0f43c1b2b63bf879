//! Handler for the liveness probe.

use axum::Json;

use crate::api::dto::ping::PingResponse;

/// `GET /ping` - answers without touching the store or cache.
pub async fn ping_handler() -> Json<PingResponse> {
    Json(PingResponse { message: "pong" })
}
