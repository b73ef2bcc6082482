use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::analysis::ContentKind;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PromptPreviewRequest {
    pub content_kind: ContentKind,
    pub analysis_type: String,
}

#[derive(Serialize)]
pub struct PromptPreviewResponse {
    pub prompt: String,
}

/// POST /api/v1/sessions/:id/prompt
///
/// Compiles the prompt an analysis would send, without calling the model.
pub async fn handle_preview_prompt(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(req): Json<PromptPreviewRequest>,
) -> Result<Json<PromptPreviewResponse>, AppError> {
    let (profile, locale) = state.sessions.current_profile(session_id).await?;
    let prompt = state
        .compiler
        .compile(locale, req.content_kind, &req.analysis_type, &profile)?;
    Ok(Json(PromptPreviewResponse { prompt }))
}
