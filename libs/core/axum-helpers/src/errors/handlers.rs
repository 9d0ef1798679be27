use axum::response::{IntoResponse, Response};

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    ErrorResponse::new(
        ErrorCode::NotFound,
        ErrorCode::NotFound.default_message(),
        "No route matches the request path",
    )
    .into_response()
}

/// Router fallback for a known path hit with the wrong method.
pub async fn method_not_allowed() -> Response {
    ErrorResponse::new(
        ErrorCode::MethodNotAllowed,
        ErrorCode::MethodNotAllowed.default_message(),
        "Check the Allow header for supported methods",
    )
    .into_response()
}
