//! JSON extractor with validation through the `validator` crate.

use crate::errors::AppError;
use axum::{
    extract::{FromRequest, Json, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Decodes the body as JSON and runs `Validate` before the handler sees it.
///
/// Decode failures and constraint violations are both rejected with the
/// 400 envelope; violations are listed flat in `fieldErrors`.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateProduct {
///     #[validate(length(min = 3, max = 100, message = "Name must be between 3 and 100 characters"))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(input): ValidatedJson<CreateProduct>) -> String {
///     input.name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::from(rejection).into_response())?;

        data.validate()
            .map_err(|errors| AppError::from(errors).into_response())?;

        Ok(ValidatedJson(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{ErrorCode, ErrorResponse};
    use axum::{Router, body::Body, http::Request, http::StatusCode, http::header, routing::post};
    use http_body_util::BodyExt;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Payload {
        #[validate(length(min = 3, message = "Name must be between 3 and 100 characters"))]
        name: String,
    }

    fn app() -> Router {
        Router::new().route(
            "/",
            post(|ValidatedJson(payload): ValidatedJson<Payload>| async move { payload.name }),
        )
    }

    async fn send(body: &'static str, content_type: Option<&str>) -> (StatusCode, Vec<u8>) {
        let mut builder = Request::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header(header::CONTENT_TYPE, content_type);
        }
        let response = app()
            .oneshot(builder.body(Body::from(body)).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    #[tokio::test]
    async fn test_valid_payload_passes_through() {
        let (status, body) = send(r#"{"name":"Widget"}"#, Some("application/json")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, b"Widget");
    }

    #[tokio::test]
    async fn test_constraint_violation_lists_field_errors() {
        let (status, body) = send(r#"{"name":"ab"}"#, Some("application/json")).await;
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.code, ErrorCode::ValidationError);
        assert_eq!(
            envelope.field_errors,
            Some(vec!["Name must be between 3 and 100 characters".to_string()])
        );
    }

    #[tokio::test]
    async fn test_missing_field_is_a_validation_error() {
        let (status, body) = send(r#"{}"#, Some("application/json")).await;
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.code, ErrorCode::ValidationError);
        let field_errors = envelope.field_errors.unwrap();
        assert_eq!(field_errors.len(), 1);
        assert!(field_errors[0].contains("name"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_rejected() {
        let (status, body) = send(r#"{"name":"#, Some("application/json")).await;
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(envelope.code, ErrorCode::InvalidJson);
    }

    #[tokio::test]
    async fn test_missing_content_type_is_unsupported_media_type() {
        let (status, body) = send(r#"{"name":"Widget"}"#, None).await;
        let envelope: ErrorResponse = serde_json::from_slice(&body).unwrap();

        assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(envelope.code, ErrorCode::UnsupportedMediaType);
    }
}
