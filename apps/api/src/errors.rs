use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::analysis::AnalysisError;
use crate::layout::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid input for '{field}': {message}")]
    InvalidInput { field: String, message: String },

    #[error("Analysis service error: {0}")]
    AnalysisService(String),

    #[error("Malformed analysis response: {reason}")]
    MalformedResponse { reason: String, raw: String },

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<AnalysisError> for AppError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::InvalidInput { field, message } => AppError::InvalidInput {
                field: field.to_string(),
                message,
            },
            AnalysisError::Service(e) => AppError::AnalysisService(e.to_string()),
            AnalysisError::MalformedResponse { reason, raw } => {
                AppError::MalformedResponse { reason, raw }
            }
        }
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::UnsupportedGlyphs { .. } => AppError::UnprocessableEntity(err.to_string()),
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details): (StatusCode, &str, String, Option<Value>) =
            match &self {
                AppError::InvalidInput { field, message } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_INPUT",
                    message.clone(),
                    Some(json!({ "field": field })),
                ),
                AppError::AnalysisService(msg) => {
                    tracing::error!("Analysis service error: {msg}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "ANALYSIS_SERVICE_ERROR",
                        msg.clone(),
                        None,
                    )
                }
                AppError::MalformedResponse { reason, raw } => {
                    tracing::error!("Malformed analysis response: {reason}");
                    (
                        StatusCode::BAD_GATEWAY,
                        "MALFORMED_RESPONSE",
                        reason.clone(),
                        Some(json!({ "raw_response": raw })),
                    )
                }
                AppError::UnprocessableEntity(msg) => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNPROCESSABLE_ENTITY",
                    msg.clone(),
                    None,
                ),
                AppError::Internal(e) => {
                    tracing::error!("Internal error: {e:?}");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal server error occurred".to_string(),
                        None,
                    )
                }
            };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
