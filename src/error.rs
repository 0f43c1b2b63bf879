//! Error types shared by the store, the services and the HTTP layer.
//!
//! Store implementations report [`StoreError`]; services translate it into
//! [`AppError`], which is the only error type that crosses the HTTP boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

/// Errors reported by a [`crate::domain::repositories::MappingRepository`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Connection failure or an operation that did not finish in time.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// The short code is already taken.
    #[error("Short code already exists")]
    DuplicateCode,

    /// The destination already has a short code.
    #[error("Destination already exists")]
    DuplicateDestination,
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db) = e.as_database_error()
            && db.is_unique_violation()
        {
            return match db.constraint() {
                Some("mappings_destination_key") => Self::DuplicateDestination,
                _ => Self::DuplicateCode,
            };
        }

        Self::Unavailable(e.to_string())
    }
}

/// Serialized error payload, nested under `"error"` in responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Request-level error, mapped to an HTTP status by [`IntoResponse`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidJson { message: String, details: Value },

    #[error("{message}")]
    InvalidFormat { message: String, details: Value },

    #[error("{message}")]
    AlreadyExists { message: String, details: Value },

    #[error("{message}")]
    DuplicateKey { message: String, details: Value },

    #[error("{message}")]
    StoreUnavailable { message: String, details: Value },

    /// Part of the error vocabulary for lookups that must report a missing
    /// code. Redirects never build it: an unknown code goes to the fallback URL.
    #[error("{message}")]
    NotFound { message: String, details: Value },
}

impl AppError {
    pub fn invalid_json(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidJson {
            message: message.into(),
            details,
        }
    }
    pub fn invalid_format(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidFormat {
            message: message.into(),
            details,
        }
    }
    pub fn already_exists(message: impl Into<String>, details: Value) -> Self {
        Self::AlreadyExists {
            message: message.into(),
            details,
        }
    }
    pub fn duplicate_key(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateKey {
            message: message.into(),
            details,
        }
    }
    pub fn store_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::StoreUnavailable {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// HTTP status and stable machine-readable code for this error.
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            Self::InvalidJson { .. } => (StatusCode::BAD_REQUEST, "invalid_json"),
            Self::InvalidFormat { .. } => (StatusCode::BAD_REQUEST, "invalid_format"),
            Self::AlreadyExists { .. } => (StatusCode::CONFLICT, "already_exists"),
            Self::DuplicateKey { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "duplicate_key"),
            Self::StoreUnavailable { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "store_unavailable")
            }
            Self::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (_, code) = self.status_and_code();
        let (message, details) = match self {
            Self::InvalidJson { message, details }
            | Self::InvalidFormat { message, details }
            | Self::AlreadyExists { message, details }
            | Self::DuplicateKey { message, details }
            | Self::StoreUnavailable { message, details }
            | Self::NotFound { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, _) = self.status_and_code();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Unavailable(reason) => {
                tracing::error!(%reason, "Mapping store unavailable");
                AppError::store_unavailable("Store unavailable, try again later", json!({}))
            }
            StoreError::DuplicateCode => {
                AppError::duplicate_key("Generated short code already exists", json!({}))
            }
            StoreError::DuplicateDestination => {
                AppError::already_exists("Record already exists", json!({}))
            }
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        AppError::invalid_format(
            "Invalid request payload",
            serde_json::to_value(&e).unwrap_or(Value::Null),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::invalid_json("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::invalid_format("x", json!({})), StatusCode::BAD_REQUEST),
            (AppError::already_exists("x", json!({})), StatusCode::CONFLICT),
            (
                AppError::duplicate_key("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::store_unavailable("x", json!({})),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::not_found("x", json!({})), StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_store_error_conversion() {
        assert!(matches!(
            AppError::from(StoreError::Unavailable("timeout".into())),
            AppError::StoreUnavailable { .. }
        ));
        assert!(matches!(
            AppError::from(StoreError::DuplicateCode),
            AppError::DuplicateKey { .. }
        ));
        assert!(matches!(
            AppError::from(StoreError::DuplicateDestination),
            AppError::AlreadyExists { .. }
        ));
    }

    #[test]
    fn test_store_unavailable_hides_reason() {
        let info = AppError::from(StoreError::Unavailable("password=hunter2".into())).to_error_info();
        assert_eq!(info.code, "store_unavailable");
        assert!(!info.message.contains("hunter2"));
    }

    #[test]
    fn test_error_info_display() {
        let err = AppError::already_exists("Record already exists", json!({}));
        assert_eq!(err.to_string(), "Record already exists");
        assert_eq!(err.to_error_info().code, "already_exists");
    }
}
