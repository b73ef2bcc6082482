use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::models::profile::UserProfile;

/// Category of source material. PDF URLs and uploads share the PDF kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    #[serde(rename = "youtube")]
    YouTube,
    Pdf,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::YouTube => f.write_str("YouTube"),
            ContentKind::Pdf => f.write_str("PDF"),
        }
    }
}

/// Where the content to analyse comes from.
#[derive(Debug, Clone)]
pub enum ContentSource {
    YouTube { url: String },
    PdfUrl { url: String },
    PdfUpload { file_name: String, data: Bytes },
}

impl ContentSource {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentSource::YouTube { .. } => ContentKind::YouTube,
            ContentSource::PdfUrl { .. } | ContentSource::PdfUpload { .. } => ContentKind::Pdf,
        }
    }
}

/// One user click: consumed immediately, never stored.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub source: ContentSource,
    pub analysis_type: String,
    pub profile: UserProfile,
    pub show_original: bool,
}
