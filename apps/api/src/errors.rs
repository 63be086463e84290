#![allow(dead_code)]

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compare::extract::ExtractError;
use crate::compare::orchestrator::CompareError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Comparison error: {0}")]
    Compare(#[from] CompareError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Compare(e) => compare_response(e),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
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

/// Maps comparison pipeline failures to responses by stage. Upload-shape
/// problems surface to the caller; service failures stay generic with the
/// detail logged.
fn compare_response(error: &CompareError) -> (StatusCode, &'static str, String) {
    match error {
        CompareError::Extract(ExtractError::UnsupportedFormat(suffix)) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            "UNSUPPORTED_FORMAT",
            format!("Unsupported CV format: {suffix}. Allowed: .txt, .pdf, .docx"),
        ),
        CompareError::Extract(ExtractError::Unreadable(e)) => {
            tracing::error!("CV extraction error: {e:?}");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                "UNREADABLE_DOCUMENT",
                "The uploaded CV could not be read".to_string(),
            )
        }
        CompareError::Inference(e) => {
            tracing::error!("Inference error: {e}");
            (
                StatusCode::BAD_GATEWAY,
                "INFERENCE_ERROR",
                "The comparison service is currently unavailable".to_string(),
            )
        }
        CompareError::Staging(e) => {
            tracing::error!("CV staging error: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "UPLOAD_ERROR",
                "The uploaded CV could not be stored".to_string(),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_format_maps_to_unprocessable_entity() {
        let error = CompareError::Extract(ExtractError::UnsupportedFormat(".rtf".to_string()));
        let (status, code, message) = compare_response(&error);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "UNSUPPORTED_FORMAT");
        assert!(message.contains(".rtf"));
    }

    #[test]
    fn test_unreadable_document_hides_the_low_level_cause() {
        let error = CompareError::Extract(ExtractError::Unreadable(anyhow::anyhow!(
            "lopdf: invalid xref table"
        )));
        let (status, code, message) = compare_response(&error);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "UNREADABLE_DOCUMENT");
        assert!(!message.contains("xref"));
    }

    #[test]
    fn test_inference_failure_maps_to_bad_gateway() {
        let error = CompareError::Inference(crate::inference::InferenceError::EmptyCompletion);
        let (status, code, _) = compare_response(&error);
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(code, "INFERENCE_ERROR");
    }
}
