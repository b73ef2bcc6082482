use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::content::FetchError;
use crate::llm_client::LlmError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Unknown analysis type '{label}' for {kind}")]
    UnknownAnalysisType { kind: String, label: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unprocessable entity: {0}")]
    UnprocessableEntity(String),

    /// Failure inside an external collaborator (content download, AI generation).
    /// The message is kept human-readable and is passed through to the caller.
    #[error("{0}")]
    Collaborator(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Collaborator(format!("Error during generation: {err}"))
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::Collaborator(format!("Error while downloading content: {err}"))
    }
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidProfile(_) => "INVALID_PROFILE",
            AppError::UnknownAnalysisType { .. } => "UNKNOWN_ANALYSIS_TYPE",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::UnprocessableEntity(_) => "UNPROCESSABLE_ENTITY",
            AppError::Collaborator(_) => "COLLABORATOR_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidProfile(_)
            | AppError::UnknownAnalysisType { .. }
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Collaborator(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let message = match &self {
            AppError::Collaborator(msg) => {
                tracing::error!("Collaborator error: {msg}");
                msg.clone()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "An internal server error occurred".to_string()
            }
            AppError::InvalidProfile(msg)
            | AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::UnprocessableEntity(msg) => msg.clone(),
            AppError::UnknownAnalysisType { .. } => self.to_string(),
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
