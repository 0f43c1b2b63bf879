//! Handler for short code redirects.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::state::AppState;

/// Redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// Always answers `301 Moved Permanently`. Unknown codes, and codes that
/// could not be looked up because the store failed, go to the configured
/// fallback URL instead of producing an error page.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Response {
    let resolution = state.resolution_service.resolve(&code).await;
    let fallback = state.resolution_service.fallback_url();
    let target = resolution.destination_or(fallback);

    let location = HeaderValue::from_str(target).unwrap_or_else(|_| {
        warn!(code = %code, "Destination is not a valid Location header, using fallback");
        HeaderValue::from_str(fallback).unwrap_or_else(|_| HeaderValue::from_static("/"))
    });

    (StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response()
}
