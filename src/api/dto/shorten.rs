//! DTOs for the shortening endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Mapping;

/// Longest raw URL accepted before normalization.
pub const MAX_URL_LENGTH: usize = 2048;
const MAX_URL_LENGTH_U64: u64 = MAX_URL_LENGTH as u64;

/// Request to shorten a single URL.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The destination to shorten. A missing scheme or `http://` is
    /// normalized to `https://` by the registration service.
    #[validate(length(min = 1, max = MAX_URL_LENGTH_U64, message = "URL must be 1-2048 characters"))]
    pub url: String,
}

/// Successful shortening response.
///
/// ```json
/// {
///   "shortUrl": "aB3dE",
///   "message": "URL inserted successfully",
///   "result": { "insertedId": 42, "destination": "https://example.com", "createdAt": "..." }
/// }
/// ```
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    /// The short code (not a full URL).
    pub short_url: String,
    pub message: String,
    pub result: InsertResult,
}

/// Store metadata about the inserted mapping.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertResult {
    pub inserted_id: i64,
    pub destination: String,
    pub created_at: DateTime<Utc>,
}

impl From<Mapping> for ShortenResponse {
    fn from(mapping: Mapping) -> Self {
        Self {
            short_url: mapping.code,
            message: "URL inserted successfully".to_string(),
            result: InsertResult {
                inserted_id: mapping.id,
                destination: mapping.destination,
                created_at: mapping.created_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_length_limits() {
        let ok = ShortenRequest {
            url: "example.com".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = ShortenRequest { url: String::new() };
        assert!(empty.validate().is_err());

        let at_limit = ShortenRequest {
            url: "a".repeat(MAX_URL_LENGTH),
        };
        assert!(at_limit.validate().is_ok());

        let too_long = ShortenRequest {
            url: "a".repeat(MAX_URL_LENGTH + 1),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_response_field_names() {
        let mapping = Mapping::new(
            42,
            "aB3dE".to_string(),
            "https://example.com".to_string(),
            Utc::now(),
        );

        let json = serde_json::to_value(ShortenResponse::from(mapping)).unwrap();

        assert_eq!(json["shortUrl"], "aB3dE");
        assert_eq!(json["message"], "URL inserted successfully");
        assert_eq!(json["result"]["insertedId"], 42);
        assert_eq!(json["result"]["destination"], "https://example.com");
        assert!(json["result"]["createdAt"].is_string());
    }
}
