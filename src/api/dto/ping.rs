//! DTO for the liveness probe.

use serde::Serialize;

/// Body of `GET /ping`.
#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub message: &'static str,
}
