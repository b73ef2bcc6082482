//! Download artifacts: analysis text files and generated images.

use axum::{
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::analysis::ContentSource;

pub const TEXT_MIME_TYPE: &str = "text/plain";
pub const IMAGE_FILE_NAME: &str = "hikmamind_generated_image.png";
const ANALYSIS_FILE_PREFIX: &str = "hikmamind_analysis";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Json,
    Txt,
    Png,
}

impl ExportFormat {
    fn name(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Txt => "txt",
            ExportFormat::Png => "png",
        }
    }

    /// Rejects a format the endpoint cannot produce.
    pub fn ensure_one_of(self, supported: &[ExportFormat]) -> Result<Self, AppError> {
        if supported.contains(&self) {
            return Ok(self);
        }
        let names: Vec<_> = supported.iter().map(|f| f.name()).collect();
        Err(AppError::Validation(format!(
            "format '{}' is not available here (use one of: {})",
            self.name(),
            names.join(", ")
        )))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportQuery {
    #[serde(default)]
    pub format: ExportFormat,
}

/// `hikmamind_analysis.txt`, or `hikmamind_analysis_{stem}.txt` for uploads
/// where `stem` is the upload name up to its first dot.
pub fn analysis_file_name(source: &ContentSource) -> String {
    match source {
        ContentSource::PdfUpload { file_name, .. } => {
            let stem = file_name.split('.').next().unwrap_or_default().trim();
            if stem.is_empty() {
                format!("{ANALYSIS_FILE_PREFIX}.txt")
            } else {
                format!("{ANALYSIS_FILE_PREFIX}_{}.txt", sanitize(stem))
            }
        }
        ContentSource::YouTube { .. } | ContentSource::PdfUrl { .. } => {
            format!("{ANALYSIS_FILE_PREFIX}.txt")
        }
    }
}

/// Keeps the file name safe inside a quoted Content-Disposition value.
fn sanitize(stem: &str) -> String {
    stem.chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// A body served as a file download.
pub fn attachment(body: impl Into<axum::body::Body>, file_name: &str, mime_type: &str) -> Response {
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{file_name}\""))
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));
    let content_type =
        HeaderValue::from_str(mime_type).unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));

    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body.into(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn upload(name: &str) -> ContentSource {
        ContentSource::PdfUpload {
            file_name: name.to_string(),
            data: Bytes::new(),
        }
    }

    #[test]
    fn test_url_sources_use_plain_name() {
        assert_eq!(
            analysis_file_name(&ContentSource::PdfUrl { url: "x".into() }),
            "hikmamind_analysis.txt"
        );
        assert_eq!(
            analysis_file_name(&ContentSource::YouTube { url: "x".into() }),
            "hikmamind_analysis.txt"
        );
    }

    #[test]
    fn test_upload_uses_text_before_first_dot() {
        assert_eq!(
            analysis_file_name(&upload("deep.learning.review.pdf")),
            "hikmamind_analysis_deep.txt"
        );
        assert_eq!(
            analysis_file_name(&upload("paper")),
            "hikmamind_analysis_paper.txt"
        );
    }

    #[test]
    fn test_upload_without_stem() {
        assert_eq!(analysis_file_name(&upload(".pdf")), "hikmamind_analysis.txt");
    }

    #[test]
    fn test_upload_name_is_sanitized() {
        assert_eq!(
            analysis_file_name(&upload("my\"paper.pdf")),
            "hikmamind_analysis_my_paper.txt"
        );
    }

    #[test]
    fn test_unsupported_format_is_rejected() {
        assert_eq!(
            ExportFormat::Txt
                .ensure_one_of(&[ExportFormat::Json, ExportFormat::Txt])
                .unwrap(),
            ExportFormat::Txt
        );
        let err = ExportFormat::Png
            .ensure_one_of(&[ExportFormat::Json, ExportFormat::Txt])
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(err.to_string().contains("json, txt"));
    }

    #[test]
    fn test_attachment_headers() {
        let response = attachment("hello", "hikmamind_analysis.txt", TEXT_MIME_TYPE);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"hikmamind_analysis.txt\""
        );
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    }
}
