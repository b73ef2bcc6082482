//! Text preview of an uploaded PDF, shown next to the analysis.

use serde::Serialize;
use tracing::warn;

/// Characters of extracted text included in a preview.
pub const PREVIEW_CHARS: usize = 1200;

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DocumentPreview {
    pub file_name: String,
    pub excerpt: String,
    pub truncated: bool,
}

/// Extracts a text excerpt from PDF bytes. Returns `None` when the document
/// cannot be parsed; the analysis itself does not depend on the preview.
pub fn preview_pdf(file_name: &str, data: &[u8]) -> Option<DocumentPreview> {
    match pdf_extract::extract_text_from_mem(data) {
        Ok(text) => {
            let (excerpt, truncated) = excerpt(&text, PREVIEW_CHARS);
            Some(DocumentPreview {
                file_name: file_name.to_string(),
                excerpt,
                truncated,
            })
        }
        Err(e) => {
            warn!("Could not extract text preview from {file_name}: {e}");
            None
        }
    }
}

/// Collapses whitespace and cuts at `max_chars` characters.
fn excerpt(text: &str, max_chars: usize) -> (String, bool) {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match normalized.char_indices().nth(max_chars) {
        Some((cut, _)) => (normalized[..cut].to_string(), true),
        None => (normalized, false),
    }
}
