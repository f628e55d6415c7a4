//! Mapping of domain failures to HTTP responses
//!
//! Every error leaves the API as `{"statusCode": <code>, "message": "<text>"}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::shared::DomainError;

/// Error body returned by all endpoints
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }

    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity, id } => {
                tracing::debug!(entity, id = %id, "Resource not found");
                Self::not_found()
            }
            DomainError::Validation(message) => Self::new(StatusCode::BAD_REQUEST, message),
            DomainError::Storage(message) => {
                tracing::error!(error = %message, "Storage failure while serving request");
                Self::internal()
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status_code: self.status.as_u16(),
            message: self.message,
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn not_found_hides_entity_details() {
        let (status, body) = body_of(DomainError::not_found("Game", "abc").into()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.status_code, 404);
        assert_eq!(body.message, "Not found");
    }

    #[tokio::test]
    async fn validation_keeps_message() {
        let err = DomainError::Validation("price must not be negative".into());
        let (status, body) = body_of(err.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.message, "price must not be negative");
    }

    #[tokio::test]
    async fn storage_failure_is_500() {
        let (status, body) = body_of(DomainError::Storage("disk I/O".into()).into()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.status_code, 500);
        assert_eq!(body.message, "Internal server error");
    }
}
