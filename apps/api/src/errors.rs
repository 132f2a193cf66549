use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::skills_client::SkillsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Token unavailable: {0}")]
    TokenUnavailable(String),

    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl From<SkillsError> for AppError {
    fn from(err: SkillsError) -> Self {
        match err {
            SkillsError::TokenUnavailable(msg) => AppError::TokenUnavailable(msg),
            other => AppError::Extraction(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::TokenUnavailable(msg) => {
                tracing::error!("Token error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "TOKEN_UNAVAILABLE",
                    "Failed to retrieve access token. Please check your credentials.".to_string(),
                )
            }
            AppError::Extraction(msg) => {
                tracing::error!("Extraction error: {msg}");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_ERROR",
                    "The skills extraction service failed to process the document".to_string(),
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
