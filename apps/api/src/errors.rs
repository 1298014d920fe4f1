use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Variants follow the failure taxonomy of the service: client input
/// errors, extraction failures (reported distinctly so the user checks the
/// file rather than retrying blindly), external-model failures, emotion
/// classifier failures, and a catch-all that keeps unexpected errors from
/// crashing the request-handling process.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{message}")]
    Extraction {
        message: String,
        details: Option<String>,
    },

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Emotion analysis error: {message}")]
    Emotion { message: String },

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::Extraction { message, details } => {
                let mut body = json!({ "error": message });
                if let Some(details) = details {
                    body["details"] = json!(details);
                }
                (StatusCode::BAD_REQUEST, body)
            }
            AppError::Llm(msg) => {
                tracing::error!("LLM error: {msg}");
                (StatusCode::BAD_GATEWAY, json!({ "error": msg }))
            }
            AppError::Emotion { message } => {
                tracing::error!("Emotion analysis error: {message}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Error analyzing emotion", "message": message }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Internal server error" }),
                )
            }
        };

        (
            status,
            [(header::CACHE_CONTROL, "no-store, no-cache, must-revalidate")],
            Json(body),
        )
            .into_response()
    }
}
