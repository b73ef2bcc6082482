//! Generative AI client: the single point of entry for all Gemini API calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Gemini API directly.
//! Handlers depend on the `GenerativeClient` trait; `GeminiClient` is the
//! production implementation.
//!
//! Models are hardcoded (not configurable) so every deployment analyses with
//! the same model.
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine};
use bytes::Bytes;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Model used for YouTube and PDF analysis.
pub const ANALYSIS_MODEL: &str = "gemini-2.5-flash-preview-04-17";
/// Model used for illustration images.
pub const IMAGE_MODEL: &str = "gemini-2.0-flash-exp-image-generation";
const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Invalid image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    #[error("The model returned no content")]
    EmptyContent,
}

/// The content the model is asked about.
#[derive(Debug, Clone)]
pub enum ContentReference {
    /// A URI the model fetches itself (YouTube links).
    VideoUri(String),
    /// Raw PDF bytes sent inline.
    Pdf(Bytes),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedImage {
    pub text: Option<String>,
    pub image: Option<Bytes>,
    pub mime_type: Option<String>,
}

/// Narrow interface to the generative AI collaborator.
///
/// Carried in `AppState` as `Arc<dyn GenerativeClient>`.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(
        &self,
        content: ContentReference,
        prompt: &str,
    ) -> Result<Generated, LlmError>;

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire format
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum RequestPart<'a> {
    Text(&'a str),
    FileData(FileData<'a>),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FileData<'a> {
    file_uri: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<&'static str>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponsePart {
    text: Option<String>,
    inline_data: Option<ResponseInlineData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    fn parts(&self) -> impl Iterator<Item = &ResponsePart> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn into_image(self) -> Result<GeneratedImage, LlmError> {
        let text = self.text();
        let inline = self.parts().find_map(|p| p.inline_data.as_ref());

        let (image, mime_type) = match inline {
            Some(data) => (
                Some(Bytes::from(STANDARD.decode(&data.data)?)),
                Some(data.mime_type.clone()),
            ),
            None => (None, None),
        };

        if text.is_none() && image.is_none() {
            return Err(LlmError::EmptyContent);
        }

        Ok(GeneratedImage {
            text,
            image,
            mime_type,
        })
    }
}

/// Content part first, then the prompt text.
fn build_parts<'a>(content: &'a ContentReference, prompt: &'a str) -> Vec<RequestPart<'a>> {
    let source = match content {
        ContentReference::VideoUri(uri) => RequestPart::FileData(FileData { file_uri: uri }),
        ContentReference::Pdf(data) => RequestPart::InlineData(InlineData {
            mime_type: PDF_MIME_TYPE,
            data: STANDARD.encode(data),
        }),
    };
    vec![source, RequestPart::Text(prompt)]
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini client
// ────────────────────────────────────────────────────────────────────────────

/// Wraps the Gemini `generateContent` REST endpoint. No retries: a failed call
/// is reported to the caller as-is.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String, timeout_secs: u64) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()?,
            api_key,
        })
    }

    async fn call(
        &self,
        model: &str,
        request_body: &GenerateContentRequest<'_>,
    ) -> Result<GenerateContentResponse, LlmError> {
        let url = format!("{GEMINI_API_BASE}/models/{model}:generateContent");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: parse_error_message(body),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: model={}, prompt_tokens={:?}, output_tokens={:?}",
                model, usage.prompt_token_count, usage.candidates_token_count
            );
        }

        Ok(parsed)
    }
}

#[async_trait]
impl GenerativeClient for GeminiClient {
    async fn generate(
        &self,
        content: ContentReference,
        prompt: &str,
    ) -> Result<Generated, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: build_parts(&content, prompt),
            }],
            generation_config: None,
        };

        let response = self.call(ANALYSIS_MODEL, &request_body).await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(Generated { text })
    }

    async fn generate_image(&self, prompt: &str) -> Result<GeneratedImage, LlmError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart::Text(prompt)],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: vec!["TEXT", "IMAGE"],
            }),
        };

        self.call(IMAGE_MODEL, &request_body).await?.into_image()
    }
}

/// Pulls `error.message` out of a Gemini error body, or returns the raw body.
fn parse_error_message(body: String) -> String {
    serde_json::from_str::<GeminiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}
