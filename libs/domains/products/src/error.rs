use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::constraints;

pub const NOT_FOUND_DETAIL: &str = "The requested product could not be found in the system.";

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found with ID: {0}")]
    NotFound(i64),

    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Data integrity violation: {detail}")]
    DataIntegrity {
        constraint: Option<String>,
        detail: String,
    },

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail))
            | Some(SqlErr::ForeignKeyConstraintViolation(detail)) => ProductError::DataIntegrity {
                constraint: constraints::constraint_name(&detail),
                detail,
            },
            _ => {
                let detail = err.to_string();
                if constraints::is_violation(&detail) {
                    ProductError::DataIntegrity {
                        constraint: constraints::constraint_name(&detail),
                        detail,
                    }
                } else {
                    ProductError::Database(detail)
                }
            }
        }
    }
}

impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(id) => AppError::NotFound {
                message: format!("Product not found with ID: {}", id),
                detail: NOT_FOUND_DETAIL.to_string(),
            },
            ProductError::Validation(messages) => AppError::ValidationFailed(messages),
            ProductError::DataIntegrity { constraint, detail } => {
                tracing::debug!(constraint = ?constraint, %detail, "Storage rejected write");
                AppError::DataIntegrity {
                    message: constraints::message_for(constraint.as_deref()).to_string(),
                    detail: match constraint {
                        Some(name) => format!("Constraint violated: {}", name),
                        None => "A storage constraint rejected the write.".to_string(),
                    },
                }
            }
            ProductError::Database(msg) => AppError::Internal(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum_helpers::{ErrorCode, ErrorResponse};
    use http_body_util::BodyExt;

    async fn envelope(err: ProductError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_translation() {
        let (status, body) = envelope(ProductError::NotFound(99)).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, ErrorCode::NotFound);
        assert_eq!(body.message, "Product not found with ID: 99");
        assert_eq!(body.detail, NOT_FOUND_DETAIL);
        assert!(body.field_errors.is_none());
    }

    #[tokio::test]
    async fn test_validation_translation_keeps_messages() {
        let (status, body) = envelope(ProductError::Validation(vec![
            "Name is required".to_string(),
            "Price must be greater than 0".to_string(),
        ]))
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "Validation failed");
        assert_eq!(body.field_errors.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_known_constraint_translation() {
        let (status, body) = envelope(ProductError::DataIntegrity {
            constraint: Some(constraints::NAME_UNIQUE.to_string()),
            detail: "duplicate key".to_string(),
        })
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::DataIntegrityViolation);
        assert_eq!(body.message, "A product with this name already exists.");
        assert_eq!(body.detail, "Constraint violated: tbl_product_name_key");
    }

    #[tokio::test]
    async fn test_unnamed_constraint_uses_generic_message() {
        let (_, body) = envelope(ProductError::DataIntegrity {
            constraint: None,
            detail: "violates not-null constraint".to_string(),
        })
        .await;

        assert_eq!(body.message, constraints::GENERIC_MESSAGE);
    }

    #[tokio::test]
    async fn test_database_error_is_internal() {
        let (status, body) =
            envelope(ProductError::Database("connection refused\nbacktrace".to_string())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, ErrorCode::InternalError);
        assert_eq!(body.message, "An unexpected error occurred.");
        assert_eq!(body.detail, "connection refused");
    }

    #[test]
    fn test_check_violation_text_is_classified() {
        let err = DbErr::Custom(
            r#"new row for relation "tbl_product" violates check constraint "tbl_product_quantity_check""#
                .to_string(),
        );

        match ProductError::from(err) {
            ProductError::DataIntegrity { constraint, .. } => {
                assert_eq!(constraint.as_deref(), Some(constraints::QUANTITY_CHECK));
            }
            other => panic!("expected data integrity error, got {:?}", other),
        }
    }

    #[test]
    fn test_other_db_errors_are_unclassified() {
        let err = DbErr::Custom("pool timed out".to_string());
        assert!(matches!(ProductError::from(err), ProductError::Database(_)));
    }
}
