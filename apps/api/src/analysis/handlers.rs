//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::export::{attachment, ExportFormat, ExportQuery, TEXT_MIME_TYPE};
use crate::analysis::service::{run_analysis, AnalysisOutcome};
use crate::errors::AppError;
use crate::models::analysis::{AnalysisRequest, ContentSource};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct UrlAnalysisRequest {
    pub url: String,
    pub analysis_type: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/analysis/youtube
pub async fn handle_analyze_youtube(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(export): Query<ExportQuery>,
    Json(body): Json<UrlAnalysisRequest>,
) -> Result<Response, AppError> {
    let source = ContentSource::YouTube { url: body.url };
    analyze(&state, session_id, source, body.analysis_type, false, export.format).await
}

/// POST /api/v1/sessions/:id/analysis/pdf-url
pub async fn handle_analyze_pdf_url(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(export): Query<ExportQuery>,
    Json(body): Json<UrlAnalysisRequest>,
) -> Result<Response, AppError> {
    let source = ContentSource::PdfUrl { url: body.url };
    analyze(&state, session_id, source, body.analysis_type, false, export.format).await
}

/// POST /api/v1/sessions/:id/analysis/pdf-upload
///
/// Multipart fields: `file` (the PDF), `analysis_type`, optional `show_original`.
pub async fn handle_analyze_pdf_upload(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(export): Query<ExportQuery>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let form = read_upload_form(multipart).await?;

    let (file_name, data) = form.file.ok_or_else(not_a_pdf)?;
    let analysis_type = form
        .analysis_type
        .ok_or_else(|| AppError::Validation("analysis_type is required".to_string()))?;

    let source = ContentSource::PdfUpload { file_name, data };
    analyze(
        &state,
        session_id,
        source,
        analysis_type,
        form.show_original,
        export.format,
    )
    .await
}

async fn analyze(
    state: &AppState,
    session_id: Uuid,
    source: ContentSource,
    analysis_type: String,
    show_original: bool,
    format: ExportFormat,
) -> Result<Response, AppError> {
    let format = format.ensure_one_of(&[ExportFormat::Json, ExportFormat::Txt])?;

    // Snapshot of the profile at request time
    let (profile, locale) = state.sessions.current_profile(session_id).await?;

    let request = AnalysisRequest {
        source,
        analysis_type,
        profile,
        show_original,
    };

    let outcome = run_analysis(
        &state.compiler,
        state.fetcher.as_ref(),
        state.ai.as_ref(),
        locale,
        request,
    )
    .await?;

    Ok(render(outcome, format))
}

fn render(outcome: AnalysisOutcome, format: ExportFormat) -> Response {
    match format {
        ExportFormat::Txt => attachment(outcome.text, &outcome.download.file_name, TEXT_MIME_TYPE),
        _ => Json(outcome).into_response(),
    }
}

#[derive(Debug, Default)]
struct UploadForm {
    file: Option<(String, Bytes)>,
    analysis_type: Option<String>,
    show_original: bool,
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("document.pdf").to_string();
                if !accepts_pdf(field.content_type(), &file_name) {
                    return Err(not_a_pdf());
                }
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))?;
                form.file = Some((file_name, data));
            }
            "analysis_type" => {
                form.analysis_type = Some(read_text(field).await?);
            }
            "show_original" => {
                let value = read_text(field).await?;
                form.show_original = matches!(value.trim(), "true" | "on" | "1");
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Browsers label PDFs `application/pdf`; some clients send
/// `application/octet-stream`, in which case the extension decides.
fn accepts_pdf(content_type: Option<&str>, file_name: &str) -> bool {
    match content_type {
        Some("application/pdf") => true,
        None | Some("application/octet-stream") => {
            file_name.to_ascii_lowercase().ends_with(".pdf")
        }
        Some(_) => false,
    }
}

fn not_a_pdf() -> AppError {
    AppError::Validation("Please upload a PDF document.".to_string())
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid upload: {e}")))
}
