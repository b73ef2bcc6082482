use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;
use crate::locale::Locale;
use crate::models::profile::{ProfileSubmission, ProfileView, UserProfile};
use crate::profile::modifier::get_prompt_modifier;
use crate::profile::session::SessionInfo;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub locale: Option<String>,
}

impl CreateSessionRequest {
    /// An empty body means "all defaults"; anything else must be valid JSON.
    fn from_body(body: &[u8]) -> Result<Self, AppError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| AppError::Validation(format!("Invalid session request: {e}")))
    }

    fn locale(&self, default: Locale) -> Result<Locale, AppError> {
        match self.locale.as_deref() {
            None => Ok(default),
            Some(code) => code
                .parse::<Locale>()
                .map_err(|e| AppError::Validation(e.to_string())),
        }
    }
}

#[derive(Serialize)]
pub struct ModifierResponse {
    pub modifier: String,
}

/// POST /api/v1/sessions
///
/// An empty body starts a session in the configured default locale.
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<SessionInfo>), AppError> {
    let locale = CreateSessionRequest::from_body(&body)?.locale(state.config.default_locale)?;
    let info = state.sessions.create(locale).await;
    Ok((StatusCode::CREATED, Json(info)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.end(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/sessions/:id/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ProfileView>, AppError> {
    let (profile, locale) = state.sessions.current_profile(session_id).await?;
    Ok(Json(ProfileView::new(&profile, locale)))
}

/// PUT /api/v1/sessions/:id/profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(submission): Json<ProfileSubmission>,
) -> Result<Json<ProfileView>, AppError> {
    let locale = state.sessions.info(session_id).await?.locale;
    let profile = UserProfile::from_submission(&submission, locale)?;
    state.sessions.save_profile(session_id, profile.clone()).await?;
    Ok(Json(ProfileView::new(&profile, locale)))
}

/// GET /api/v1/sessions/:id/profile/modifier
pub async fn handle_get_modifier(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ModifierResponse>, AppError> {
    let (profile, locale) = state.sessions.current_profile(session_id).await?;
    Ok(Json(ModifierResponse {
        modifier: get_prompt_modifier(&profile, locale),
    }))
}
