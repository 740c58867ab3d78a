//! API error types with IntoResponse
//!
//! Errors are converted to JSON responses with appropriate status codes.
//! Validation failures carry the same `kind`/`message` pair as a notice.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::routes::NoticeKind;
use crate::models::ValidationError;
use crate::storage::StoreError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Submitted title failed validation (400)
    Validation(ValidationError),

    /// Request body missing or not the expected JSON shape (400)
    BadRequest { message: String },

    /// List or todo not found (404)
    NotFound { resource: &'static str, id: String },

    /// Write rejected by a uniqueness constraint (409)
    Conflict { message: String },

    /// Storage error (500, logged)
    Storage(StoreError),
}

impl ApiError {
    pub fn list_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "list",
            id: id.into(),
        }
    }

    pub fn todo_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            resource: "todo",
            id: id.into(),
        }
    }
}

fn not_found_message(resource: &str) -> &'static str {
    match resource {
        "todo" => "Todo not found",
        _ => "List not found",
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "kind": NoticeKind::Error,
                    "message": e.to_string()
                }),
            ),
            Self::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "kind": NoticeKind::Error,
                    "message": message
                }),
            ),
            Self::NotFound { resource, id } => {
                tracing::debug!(resource, id = %id, "lookup missed");
                (
                    StatusCode::NOT_FOUND,
                    json!({
                        "error": "not_found",
                        "kind": NoticeKind::Error,
                        "message": not_found_message(resource)
                    }),
                )
            }
            Self::Conflict { message } => (
                StatusCode::CONFLICT,
                json!({
                    "error": "conflict",
                    "kind": NoticeKind::Error,
                    "message": message
                }),
            ),
            Self::Storage(e) => {
                // Log the actual error, return generic message
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "kind": NoticeKind::Error,
                        "message": "an internal error occurred"
                    }),
                )
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

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(status = %rejection.status(), "rejected request body");
        Self::BadRequest {
            message: rejection.body_text(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound { resource, id } => Self::NotFound { resource, id },
            // The only uniqueness rule is on list titles
            StoreError::Conflict(_) => Self::Conflict {
                message: ValidationError::ListTitleTaken.to_string(),
            },
            _ => Self::Storage(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn validation_error_is_400_with_notice_text() {
        let response = ApiError::Validation(ValidationError::TodoTitleLength).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["kind"], "error");
        assert_eq!(
            body["message"],
            "The todo must be between 1 and 100 characters."
        );
    }

    #[tokio::test]
    async fn bad_request_uses_validation_shape() {
        let response = ApiError::BadRequest {
            message: "missing field `todo`".into(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["kind"], "error");
        assert_eq!(body["message"], "missing field `todo`");
    }

    #[tokio::test]
    async fn not_found_is_404() {
        let response = ApiError::todo_not_found("abc").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Todo not found");
    }

    #[tokio::test]
    async fn store_conflict_is_409_duplicate_title() {
        let response = ApiError::from(StoreError::Conflict("dup".into())).into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        assert_eq!(body_json(response).await["message"], "The title must be unique.");
    }
}
