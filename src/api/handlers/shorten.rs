//! Handler for the shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short code for a destination URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Response Codes
///
/// - **200 OK**: Code issued, see [`ShortenResponse`]
/// - **400 Bad Request**: Malformed JSON, missing `url`, or invalid URL format
/// - **409 Conflict**: The destination already has a code
/// - **500 Internal Server Error**: Store unavailable or no free code found
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::invalid_json("Invalid JSON payload", json!({ "reason": e.body_text() }))
    })?;

    payload.validate()?;

    let mapping = state.registration_service.register(&payload.url).await?;

    Ok(Json(ShortenResponse::from(mapping)))
}
