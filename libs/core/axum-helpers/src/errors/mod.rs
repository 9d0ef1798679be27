pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Detail attached to every validation failure.
pub const VALIDATION_DETAIL: &str = "Validation failed review body";

/// Uniform error envelope returned by every failing endpoint.
///
/// ```json
/// {
///   "status": 400,
///   "code": "VALIDATION_ERROR",
///   "message": "Validation failed",
///   "detail": "Validation failed review body",
///   "fieldErrors": ["Name must be between 3 and 100 characters"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Machine-readable error class
    pub code: ErrorCode,
    /// Human-readable summary
    pub message: String,
    /// One-line elaboration of the message
    pub detail: String,
    /// One entry per violated field constraint; only present on validation failures
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            status: code.status().as_u16(),
            code,
            message: message.into(),
            detail: detail.into(),
            field_errors: None,
        }
    }

    pub fn with_field_errors(mut self, field_errors: Vec<String>) -> Self {
        self.field_errors = Some(field_errors);
        self
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (self.code.status(), Json(self)).into_response()
    }
}

/// Failures that leave a handler, classified for the client.
///
/// Every variant collapses into exactly one [`ErrorCode`]; `Internal` is the catch-all.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Not found: {message}")]
    NotFound { message: String, detail: String },

    #[error("Data integrity violation: {message}")]
    DataIntegrity { message: String, detail: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify into the envelope sent to the client.
    pub fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::Validation(errors) => validation_response(flatten_validation_errors(errors)),
            AppError::ValidationFailed(messages) => validation_response(messages.clone()),
            AppError::JsonExtractorRejection(rejection) => json_rejection_response(rejection),
            AppError::InvalidId(raw) => ErrorResponse::new(
                ErrorCode::InvalidId,
                ErrorCode::InvalidId.default_message(),
                format!("'{}' is not a valid identifier", raw),
            ),
            AppError::NotFound { message, detail } => {
                ErrorResponse::new(ErrorCode::NotFound, message.as_str(), detail.as_str())
            }
            AppError::DataIntegrity { message, detail } => ErrorResponse::new(
                ErrorCode::DataIntegrityViolation,
                message.as_str(),
                detail.as_str(),
            ),
            AppError::Internal(description) => ErrorResponse::new(
                ErrorCode::InternalError,
                ErrorCode::InternalError.default_message(),
                first_line(description),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = self.to_error_response();

        if body.code.status().is_server_error() {
            tracing::error!(error_code = body.code.code(), error = %self, "Request failed");
        } else {
            tracing::warn!(error_code = body.code.code(), error = %self, "Request rejected");
        }

        body.into_response()
    }
}

/// Flatten validator output into one message per violated constraint.
///
/// Fields are visited in name order so the list is deterministic.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, violations)| {
            violations.iter().map(move |violation| {
                violation
                    .message
                    .as_ref()
                    .map(|message| message.to_string())
                    .unwrap_or_else(|| format!("{}: {}", field, violation.code))
            })
        })
        .collect()
}

fn validation_response(field_errors: Vec<String>) -> ErrorResponse {
    ErrorResponse::new(
        ErrorCode::ValidationError,
        ErrorCode::ValidationError.default_message(),
        VALIDATION_DETAIL,
    )
    .with_field_errors(field_errors)
}

fn json_rejection_response(rejection: &JsonRejection) -> ErrorResponse {
    match rejection {
        // Well-formed JSON of the wrong shape: missing field, bad enum tag, wrong type
        JsonRejection::JsonDataError(_) => validation_response(vec![rejection.body_text()]),
        JsonRejection::MissingJsonContentType(_) => ErrorResponse::new(
            ErrorCode::UnsupportedMediaType,
            ErrorCode::UnsupportedMediaType.default_message(),
            rejection.body_text(),
        ),
        _ => ErrorResponse::new(
            ErrorCode::InvalidJson,
            ErrorCode::InvalidJson.default_message(),
            rejection.body_text(),
        ),
    }
}

fn first_line(description: &str) -> String {
    description.lines().next().unwrap_or_default().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use validator::Validate;

    #[derive(Validate)]
    struct Widget {
        #[validate(length(min = 3, message = "Name must be between 3 and 100 characters"))]
        name: String,
        #[validate(range(min = 1))]
        quantity: i32,
    }

    async fn envelope(error: AppError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[test]
    fn test_flatten_validation_errors_is_flat_and_ordered() {
        let errors = Widget {
            name: "ab".to_string(),
            quantity: 0,
        }
        .validate()
        .unwrap_err();

        let messages = flatten_validation_errors(&errors);

        assert_eq!(
            messages,
            vec![
                "Name must be between 3 and 100 characters".to_string(),
                "quantity: range".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_validation_failed_envelope() {
        let (status, body) =
            envelope(AppError::ValidationFailed(vec!["Name is required".to_string()])).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::ValidationError);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.detail, VALIDATION_DETAIL);
        assert_eq!(body.field_errors, Some(vec!["Name is required".to_string()]));
    }

    #[tokio::test]
    async fn test_not_found_envelope_has_no_field_errors() {
        let (status, body) = envelope(AppError::NotFound {
            message: "Product not found with ID: 9".to_string(),
            detail: "gone".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.status, 404);
        assert_eq!(body.message, "Product not found with ID: 9");
        assert!(body.field_errors.is_none());
    }

    #[tokio::test]
    async fn test_data_integrity_envelope() {
        let (status, body) = envelope(AppError::DataIntegrity {
            message: "A product with this name already exists.".to_string(),
            detail: "Constraint violated: tbl_product_name_key".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::DataIntegrityViolation);
    }

    #[tokio::test]
    async fn test_internal_error_keeps_only_first_line() {
        let (status, body) = envelope(AppError::Internal(
            "connection reset by peer\n   at socket.rs:10\n   at pool.rs:99".to_string(),
        ))
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "An unexpected error occurred.");
        assert_eq!(body.detail, "connection reset by peer");
    }

    #[test]
    fn test_field_errors_omitted_from_json_when_absent() {
        let body = ErrorResponse::new(ErrorCode::NotFound, "missing", "detail");
        let json = serde_json::to_value(&body).unwrap();

        assert!(json.get("fieldErrors").is_none());
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["status"], 404);
    }
}
