//! Reusable OpenAPI response types so every handler documents the same envelope.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "status": 500,
        "code": "INTERNAL_ERROR",
        "message": "An unexpected error occurred.",
        "detail": "connection closed"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Validation Error",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "code": "VALIDATION_ERROR",
        "message": "Validation failed",
        "detail": "Validation failed review body",
        "fieldErrors": ["Name must be between 3 and 100 characters", "Price must be greater than 0"]
    })
)]
pub struct BadRequestValidationResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid identifier",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "code": "INVALID_ID",
        "message": "Invalid identifier",
        "detail": "'abc' is not a valid identifier"
    })
)]
pub struct BadRequestIdResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Data integrity violation",
    content_type = "application/json",
    example = json!({
        "status": 400,
        "code": "DATA_INTEGRITY_VIOLATION",
        "message": "A product with this name already exists.",
        "detail": "Constraint violated: tbl_product_name_key"
    })
)]
pub struct DataIntegrityResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "status": 404,
        "code": "NOT_FOUND",
        "message": "Product not found with ID: 42",
        "detail": "The requested product could not be found in the system."
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);
