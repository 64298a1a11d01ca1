//! API error types with IntoResponse
//!
//! Errors are converted to envelope responses with appropriate status codes.
//! Store failures are logged and reported with a kind only.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use super::envelope::{ApiResponse, ErrorDetail, ErrorKind};
use crate::db::StoreError;
use crate::models::ValidationError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: String },

    /// Duplicate resource (400)
    Conflict { resource: &'static str },

    /// Store failure (500, logged); `message` names the failed operation
    Database { message: String, source: StoreError },
}

impl ApiError {
    /// Convert a store error, using `message` if it turns out to be a 500.
    pub fn from_store(err: StoreError, message: impl Into<String>) -> Self {
        match err {
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            StoreError::Conflict { resource, .. } => Self::Conflict { resource },
            source => Self::Database {
                message: message.into(),
                source,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Conflict { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::Validation(e) => {
                let detail = match &e {
                    ValidationError::MalformedBody { reason }
                    | ValidationError::MalformedQuery { reason } => {
                        ErrorDetail::new(ErrorKind::Validation).with_reason(reason.clone())
                    }
                    _ => ErrorDetail::new(ErrorKind::Validation),
                };
                ApiResponse::failure(e.to_string(), Some(detail))
            }
            Self::NotFound { resource, id } => ApiResponse::failure(
                format!("{} with ID: {} not found", resource, id),
                Some(ErrorDetail::new(ErrorKind::NotFound)),
            ),
            Self::Conflict { resource } => ApiResponse::failure(
                format!("{} already exists", resource),
                Some(ErrorDetail::new(ErrorKind::Conflict)),
            ),
            Self::Database { message, source } => {
                // Log the actual error, return the operation message only
                tracing::error!(error = %source, "{}", message);
                ApiResponse::failure(message, Some(ErrorDetail::new(ErrorKind::Database)))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
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
    async fn validation_error_is_400() {
        let err = ApiError::Validation(ValidationError::Required {
            fields: "Title and content",
        });
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Title and content are required");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let err = ApiError::from_store(StoreError::not_found("Post", 9), "unused");
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Post with ID: 9 not found");
    }

    #[tokio::test]
    async fn conflict_is_400() {
        let err = ApiError::from_store(
            StoreError::Conflict {
                resource: "Category",
                name: "Music".into(),
            },
            "unused",
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Category already exists");
        assert_eq!(body["error_detail"]["kind"], "conflict");
    }

    #[tokio::test]
    async fn database_error_hides_driver_message() {
        let err = ApiError::from_store(
            StoreError::Sqlx(sqlx::Error::PoolTimedOut),
            "Error retrieving posts",
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["message"], "Error retrieving posts");
        assert_eq!(body["error_detail"], serde_json::json!({"kind": "database"}));
    }
}
