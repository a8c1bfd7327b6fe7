use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::assessment::AssessmentError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(StoreError),
}

impl From<AssessmentError> for AppError {
    fn from(e: AssessmentError) -> Self {
        match e {
            AssessmentError::InvalidInput(msg) => AppError::Validation(msg),
            AssessmentError::NotFound(msg) => AppError::NotFound(msg),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(key) => AppError::NotFound(format!("No profile for '{key}'")),
            other => AppError::Storage(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Storage(e) => {
                tracing::error!("Storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "A storage error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_errors_map_to_client_statuses() {
        let invalid: AppError = AssessmentError::InvalidInput("short".into()).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let missing: AppError = AssessmentError::NotFound("XXXX".into()).into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_store_errors_map_to_statuses() {
        let missing: AppError = StoreError::NotFound("guest-1".into()).into();
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let io: AppError = StoreError::Io(std::io::Error::other("disk full")).into();
        assert_eq!(
            io.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
