//! Error codes carried by every error envelope.
//!
//! Each code has:
//! - a SCREAMING_SNAKE_CASE identifier for clients (e.g. "NOT_FOUND")
//! - an integer for logs and dashboards (e.g. 1005)
//! - the HTTP status it is served with
//! - a default message
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! assert_eq!(code.default_message(), "Validation failed");
//! ```

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000s)
    /// A field constraint on the request body was violated
    ValidationError,

    /// Path identifier is not a valid integer id
    InvalidId,

    /// Request body is not well-formed JSON
    InvalidJson,

    /// Request body is not declared as `application/json`
    UnsupportedMediaType,

    /// No resource exists for the identifier or path
    NotFound,

    /// Route exists but not for this HTTP method
    MethodNotAllowed,

    // Storage errors (2000s)
    /// A storage constraint (uniqueness, check) rejected the write
    DataIntegrityViolation,

    // Server errors (5000s)
    /// Any failure without a more specific classification
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidId => "INVALID_ID",
            Self::InvalidJson => "INVALID_JSON",
            Self::UnsupportedMediaType => "UNSUPPORTED_MEDIA_TYPE",
            Self::NotFound => "NOT_FOUND",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::DataIntegrityViolation => "DATA_INTEGRITY_VIOLATION",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Integer code for logs and monitoring
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidId => 1002,
            Self::InvalidJson => 1003,
            Self::UnsupportedMediaType => 1004,
            Self::NotFound => 1005,
            Self::MethodNotAllowed => 1006,
            Self::DataIntegrityViolation => 2001,
            Self::InternalError => 5000,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::ValidationError
            | Self::InvalidId
            | Self::InvalidJson
            | Self::DataIntegrityViolation => StatusCode::BAD_REQUEST,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation failed",
            Self::InvalidId => "Invalid identifier",
            Self::InvalidJson => "Malformed JSON body",
            Self::UnsupportedMediaType => "Expected an application/json body",
            Self::NotFound => "The requested resource was not found",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::DataIntegrityViolation => "The operation violates a data integrity constraint.",
            Self::InternalError => "An unexpected error occurred.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_matches_serde_representation() {
        for code in [
            ErrorCode::ValidationError,
            ErrorCode::InvalidId,
            ErrorCode::UnsupportedMediaType,
            ErrorCode::DataIntegrityViolation,
            ErrorCode::InternalError,
        ] {
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
    }

    #[test]
    fn test_status_classes() {
        assert_eq!(ErrorCode::ValidationError.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::DataIntegrityViolation.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ErrorCode::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ErrorCode::InternalError.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_integer_codes_group_by_class() {
        assert!((1000..2000).contains(&ErrorCode::NotFound.code()));
        assert!((2000..3000).contains(&ErrorCode::DataIntegrityViolation.code()));
        assert!(ErrorCode::InternalError.code() >= 5000);
    }
}
