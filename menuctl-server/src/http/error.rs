//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::{ValidationError, ValidationErrors};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or missing fields, id mismatch (400)
    Validation(ValidationErrors),

    /// Value outside a fixed label set (400)
    InvalidArgument(ValidationErrors),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Name already taken (409)
    Conflict { resource: &'static str, name: String },

    /// Storage failure (500, logged)
    Database(DbError),
}

impl ApiError {
    /// Machine-readable error kind used in the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::InvalidArgument(_) => "invalid_argument",
            Self::NotFound { .. } => "not_found",
            Self::Conflict { .. } => "conflict",
            Self::Database(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            Self::Validation(errors) | Self::InvalidArgument(errors) => json!({
                "error": self.kind(),
                "message": errors.to_string(),
                "errors": errors.field_errors(),
            }),
            Self::NotFound { resource, id } => json!({
                "error": self.kind(),
                "message": format!("{} '{}' not found", resource, id)
            }),
            Self::Conflict { resource, name } => json!({
                "error": self.kind(),
                "message": format!("{} named '{}' already exists", resource, name)
            }),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!(error = %e, "Storage failure");
                json!({
                    "error": self.kind(),
                    "message": "an internal error occurred"
                })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        if errors.is_invalid_argument() {
            Self::InvalidArgument(errors)
        } else {
            Self::Validation(errors)
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::from(ValidationErrors::from(e))
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::Duplicate { resource, name } => Self::Conflict { resource, name },
            _ => Self::Database(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400_with_field_list() {
        let err = ApiError::from(ValidationError::Missing { field: "price" });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_failed");
        assert_eq!(body["errors"][0]["field"], "price");
        assert_eq!(body["errors"][0]["reason"], "is required");
    }

    #[tokio::test]
    async fn invalid_variant_is_invalid_argument() {
        let err = ApiError::from(ValidationError::InvalidVariant {
            field: "category",
            value: "pizza".into(),
            allowed: &["mains"],
        });
        assert!(matches!(err, ApiError::InvalidArgument(_)));

        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "invalid_argument");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from(DbError::NotFound {
            resource: "menu item",
            id: "abc".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn duplicate_is_409() {
        let err = ApiError::from(DbError::Duplicate {
            resource: "menu item",
            name: "Pizza".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn storage_failure_hides_detail() {
        let err = ApiError::from(DbError::ConstraintViolation {
            constraint: "menu_items_price_positive".into(),
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "an internal error occurred");
        assert!(!body.to_string().contains("menu_items_price_positive"));
    }
}
