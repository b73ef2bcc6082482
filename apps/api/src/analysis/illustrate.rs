//! Image generation to illustrate concepts from an analysed paper.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::export::{attachment, ExportFormat, ExportQuery, IMAGE_FILE_NAME};
use crate::errors::AppError;
use crate::llm_client::{GenerativeClient, GeneratedImage};
use crate::state::AppState;

const DEFAULT_IMAGE_MIME_TYPE: &str = "image/png";

#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    pub prompt: String,
}

#[derive(Debug, Serialize)]
pub struct ImageResponse {
    /// Model comment about the image, if any.
    pub text: Option<String>,
    pub image_base64: Option<String>,
    pub mime_type: Option<String>,
    pub file_name: &'static str,
}

impl From<GeneratedImage> for ImageResponse {
    fn from(generated: GeneratedImage) -> Self {
        let has_image = generated.image.is_some();
        Self {
            text: generated.text,
            image_base64: generated.image.map(|data| STANDARD.encode(data)),
            mime_type: generated
                .mime_type
                .or_else(|| has_image.then(|| DEFAULT_IMAGE_MIME_TYPE.to_string())),
            file_name: IMAGE_FILE_NAME,
        }
    }
}

pub async fn illustrate(ai: &dyn GenerativeClient, prompt: &str) -> Result<GeneratedImage, AppError> {
    let prompt = prompt.trim();
    if prompt.is_empty() {
        return Err(AppError::Validation(
            "Describe the image you want to generate.".to_string(),
        ));
    }

    info!("Generating illustration ({} characters of prompt)", prompt.len());
    Ok(ai.generate_image(prompt).await?)
}

/// POST /api/v1/images
///
/// `?format=png` returns the raw image as a download.
pub async fn handle_generate_image(
    State(state): State<AppState>,
    Query(export): Query<ExportQuery>,
    Json(request): Json<ImageRequest>,
) -> Result<Response, AppError> {
    let format = export
        .format
        .ensure_one_of(&[ExportFormat::Json, ExportFormat::Png])?;
    let generated = illustrate(state.ai.as_ref(), &request.prompt).await?;

    match format {
        ExportFormat::Png => {
            let mime_type = generated
                .mime_type
                .clone()
                .unwrap_or_else(|| DEFAULT_IMAGE_MIME_TYPE.to_string());
            let data = generated.image.ok_or_else(|| {
                AppError::UnprocessableEntity("The model did not return an image".to_string())
            })?;
            Ok(attachment(data, IMAGE_FILE_NAME, &mime_type))
        }
        _ => Ok(Json(ImageResponse::from(generated)).into_response()),
    }
}
