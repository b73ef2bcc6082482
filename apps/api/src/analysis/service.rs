//! Analysis pipeline: one user click, one generation call.
//!
//! Flow: check profile → check content reference → compile prompt →
//!       obtain bytes / URI → generate → package result.

use serde::Serialize;
use tracing::info;

use crate::analysis::export::{analysis_file_name, TEXT_MIME_TYPE};
use crate::content::preview::{preview_pdf, DocumentPreview};
use crate::content::ContentFetcher;
use crate::errors::AppError;
use crate::llm_client::{ContentReference, GenerativeClient};
use crate::locale::Locale;
use crate::models::analysis::{AnalysisRequest, ContentKind, ContentSource};
use crate::prompting::PromptCompiler;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DownloadInfo {
    pub file_name: String,
    pub mime_type: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisOutcome {
    pub text: String,
    pub content_kind: ContentKind,
    pub analysis_type: String,
    pub profile_caption: String,
    pub download: DownloadInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original: Option<DocumentPreview>,
}

/// Runs one analysis. Errors from the fetcher or the AI client are surfaced
/// as collaborator errors; nothing is retried.
pub async fn run_analysis(
    compiler: &PromptCompiler,
    fetcher: &dyn ContentFetcher,
    ai: &dyn GenerativeClient,
    locale: Locale,
    request: AnalysisRequest,
) -> Result<AnalysisOutcome, AppError> {
    if !request.profile.is_complete() {
        return Err(AppError::InvalidProfile(
            "Please complete your profile to continue".to_string(),
        ));
    }
    check_source(&request.source)?;

    let kind = request.source.kind();
    let prompt = compiler.compile(locale, kind, &request.analysis_type, &request.profile)?;

    let content = match &request.source {
        ContentSource::YouTube { url } => ContentReference::VideoUri(url.trim().to_string()),
        ContentSource::PdfUrl { url } => ContentReference::Pdf(fetcher.fetch(url.trim()).await?),
        ContentSource::PdfUpload { data, .. } => ContentReference::Pdf(data.clone()),
    };

    info!(
        "Analysing {} content (analysis type: '{}')",
        kind, request.analysis_type
    );
    let generated = ai.generate(content, &prompt).await?;
    info!("Analysis complete: {} characters", generated.text.len());

    let original = match &request.source {
        ContentSource::PdfUpload { file_name, data } if request.show_original => {
            preview_pdf(file_name, data)
        }
        _ => None,
    };

    Ok(AnalysisOutcome {
        text: generated.text,
        content_kind: kind,
        analysis_type: request.analysis_type,
        profile_caption: request.profile.caption(locale),
        download: DownloadInfo {
            file_name: analysis_file_name(&request.source),
            mime_type: TEXT_MIME_TYPE,
        },
        original,
    })
}

const PDF_MAGIC: &[u8] = b"%PDF";

fn check_source(source: &ContentSource) -> Result<(), AppError> {
    match source {
        ContentSource::YouTube { url } if url.trim().is_empty() => Err(AppError::Validation(
            "Please enter a valid YouTube URL.".to_string(),
        )),
        ContentSource::PdfUrl { url } if url.trim().is_empty() => Err(AppError::Validation(
            "Please enter a valid PDF URL.".to_string(),
        )),
        ContentSource::PdfUpload { data, .. } if !data.starts_with(PDF_MAGIC) => Err(
            AppError::Validation("Please upload a PDF document.".to_string()),
        ),
        _ => Ok(()),
    }
}
