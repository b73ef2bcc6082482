use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackRating {
    VeryHelpful,
    SomewhatHelpful,
    NotHelpful,
}

impl FeedbackRating {
    pub fn acknowledgement(self) -> &'static str {
        match self {
            FeedbackRating::VeryHelpful => "Thank you for your positive feedback!",
            FeedbackRating::SomewhatHelpful => "Thanks for your feedback! We'll work to improve.",
            FeedbackRating::NotHelpful => "Sorry this wasn't helpful. We'll improve!",
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub rating: FeedbackRating,
    /// What wasn't helpful, usually only sent with `not_helpful`.
    #[serde(default)]
    pub comment: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: &'static str,
}

/// POST /api/v1/feedback
pub async fn handle_feedback(
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackResponse>, AppError> {
    let comment = request
        .comment
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty());

    match comment {
        Some(comment) => info!("Feedback received: {:?} ({comment})", request.rating),
        None => info!("Feedback received: {:?}", request.rating),
    }

    Ok(Json(FeedbackResponse {
        message: request.rating.acknowledgement(),
    }))
}
