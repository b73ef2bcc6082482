pub mod catalog;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::{feedback, handlers as analysis, illustrate};
use crate::profile::handlers as profile;
use crate::prompting::handlers as prompting;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/catalog", get(catalog::handle_catalog))
        // Sessions and profiles
        .route("/api/v1/sessions", post(profile::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            axum::routing::delete(profile::handle_end_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            get(profile::handle_get_profile).put(profile::handle_save_profile),
        )
        .route(
            "/api/v1/sessions/:id/profile/modifier",
            get(profile::handle_get_modifier),
        )
        .route(
            "/api/v1/sessions/:id/prompt",
            post(prompting::handle_preview_prompt),
        )
        // Analysis
        .route(
            "/api/v1/sessions/:id/analysis/youtube",
            post(analysis::handle_analyze_youtube),
        )
        .route(
            "/api/v1/sessions/:id/analysis/pdf-url",
            post(analysis::handle_analyze_pdf_url),
        )
        .route(
            "/api/v1/sessions/:id/analysis/pdf-upload",
            post(analysis::handle_analyze_pdf_upload).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route("/api/v1/images", post(illustrate::handle_generate_image))
        .route("/api/v1/feedback", post(feedback::handle_feedback))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use bytes::Bytes;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::config::Config;
    use crate::content::{ContentFetcher, FetchError};
    use crate::llm_client::{ContentReference, Generated, GeneratedImage, GenerativeClient, LlmError};
    use crate::profile::SessionRegistry;
    use crate::prompting::{PromptCompiler, UnknownAnalysisPolicy};

    #[derive(Default)]
    struct FakeAi {
        prompts: Mutex<Vec<String>>,
        image: Option<Bytes>,
    }

    #[async_trait]
    impl GenerativeClient for FakeAi {
        async fn generate(
            &self,
            _content: ContentReference,
            prompt: &str,
        ) -> Result<Generated, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(Generated {
                text: "A tidy analysis".to_string(),
            })
        }

        async fn generate_image(&self, _prompt: &str) -> Result<GeneratedImage, LlmError> {
            Ok(GeneratedImage {
                text: Some("Here is your diagram".to_string()),
                image: self.image.clone(),
                mime_type: self.image.as_ref().map(|_| "image/png".to_string()),
            })
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl ContentFetcher for FailingFetcher {
        async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
            Err(FetchError::Status {
                status: 404,
                url: url.to_string(),
            })
        }
    }

    fn app_with(ai: Arc<FakeAi>, policy: UnknownAnalysisPolicy) -> Router {
        build_router(AppState {
            sessions: Arc::new(SessionRegistry::new(Duration::from_secs(3600))),
            compiler: PromptCompiler::new(policy),
            fetcher: Arc::new(FailingFetcher),
            ai,
            config: Config::test_config(),
        })
    }

    fn app() -> Router {
        app_with(Arc::new(FakeAi::default()), UnknownAnalysisPolicy::Reject)
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_session(app: &Router, locale: Option<&str>) -> String {
        let body = match locale {
            Some(locale) => json!({ "locale": locale }),
            None => json!({}),
        };
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/v1/sessions", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        body_json(response).await["session_id"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app().oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["service"], "hikmamind-api");
    }

    #[tokio::test]
    async fn test_catalog_in_french() {
        let response = app()
            .oneshot(get("/api/v1/catalog?locale=fr"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["locale"], "fr");
        assert_eq!(body["default_field"], "Informatique");
    }

    #[tokio::test]
    async fn test_new_session_has_default_profile() {
        let app = app();
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/sessions/{id}/profile")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["field"], "Computer Science");
        assert_eq!(body["knowledge_level"], "Intermediate");
        assert_eq!(body["analogy_style"], "Tech");
        assert_eq!(body["is_complete"], true);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let response = app()
            .oneshot(get(&format!(
                "/api/v1/sessions/{}/profile",
                uuid::Uuid::new_v4()
            )))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_saved_profile_drives_prompt_preview() {
        let app = app();
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/sessions/{id}/profile"),
                json!({
                    "field": "Medicine",
                    "knowledge_level": "Novice",
                    "analogy_style": "Cooking"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/prompt"),
                json!({ "content_kind": "youtube", "analysis_type": "Key points" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(
            body["prompt"],
            "The user is in the field of Medicine, knowledge level: Novice, prefers analogies: Cooking.\n\
             List and explain the 5 key points of this video."
        );
    }

    #[tokio::test]
    async fn test_invalid_profile_is_rejected() {
        let app = app();
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("/api/v1/sessions/{id}/profile"),
                json!({
                    "field": "   ",
                    "knowledge_level": "Novice",
                    "analogy_style": "Tech"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "INVALID_PROFILE");

        // Previous profile is kept
        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/sessions/{id}/profile")))
            .await
            .unwrap();
        assert_eq!(body_json(response).await["field"], "Computer Science");
    }

    #[tokio::test]
    async fn test_modifier_for_default_profile() {
        let app = app();
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/sessions/{id}/profile/modifier")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let modifier = body_json(response).await["modifier"]
            .as_str()
            .unwrap()
            .to_string();
        assert_eq!(modifier.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_youtube_analysis_sends_compiled_prompt() {
        let ai = Arc::new(FakeAi::default());
        let app = app_with(ai.clone(), UnknownAnalysisPolicy::Reject);
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/analysis/youtube"),
                json!({
                    "url": "https://www.youtube.com/watch?v=abc",
                    "analysis_type": "Simple summary (3 sentences)"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["text"], "A tidy analysis");
        assert_eq!(body["download"]["file_name"], "hikmamind_analysis.txt");

        let prompts = ai.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].ends_with("\nPlease summarize this video in 3 sentences."));
    }

    #[tokio::test]
    async fn test_unknown_analysis_type_rejected_without_calling_ai() {
        let ai = Arc::new(FakeAi::default());
        let app = app_with(ai.clone(), UnknownAnalysisPolicy::Reject);
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/analysis/youtube"),
                json!({ "url": "https://youtu.be/abc", "analysis_type": "Poem" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "UNKNOWN_ANALYSIS_TYPE");
        assert!(ai.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_download_failure_is_a_collaborator_error() {
        let app = app();
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/analysis/pdf-url"),
                json!({
                    "url": "https://example.org/missing.pdf",
                    "analysis_type": "General summary"
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "COLLABORATOR_ERROR");
    }

    #[tokio::test]
    async fn test_pdf_upload_as_text_download() {
        let app = app();
        let id = create_session(&app, None).await;

        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"analysis_type\"\r\n\r\n\
            General summary\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"paper.v2.pdf\"\r\n\
            Content-Type: application/pdf\r\n\r\n\
            %PDF-1.4 not really a pdf\r\n\
            --XBOUNDARY--\r\n";

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/sessions/{id}/analysis/pdf-upload?format=txt"))
                    .header(
                        header::CONTENT_TYPE,
                        "multipart/form-data; boundary=XBOUNDARY",
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"hikmamind_analysis_paper.txt\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"A tidy analysis");
    }

    #[tokio::test]
    async fn test_ended_session_is_gone() {
        let app = app();
        let id = create_session(&app, Some("fr")).await;

        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/api/v1/sessions/{id}"))
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(delete).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(get(&format!("/api/v1/sessions/{id}/profile")))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_png_export_without_image_is_unprocessable() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/v1/images?format=png",
                json!({ "prompt": "A neural network as a kitchen" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_png_export_returns_image() {
        let ai = Arc::new(FakeAi {
            image: Some(Bytes::from_static(b"\x89PNG")),
            ..FakeAi::default()
        });
        let response = app_with(ai, UnknownAnalysisPolicy::Reject)
            .oneshot(json_request(
                "POST",
                "/api/v1/images?format=png",
                json!({ "prompt": "A neural network as a kitchen" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    }

    #[tokio::test]
    async fn test_empty_image_prompt_is_invalid() {
        let response = app()
            .oneshot(json_request("POST", "/api/v1/images", json!({ "prompt": "  " })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_feedback_acknowledgement() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/v1/feedback",
                json!({ "rating": "not_helpful", "comment": "Too long" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Sorry this wasn't helpful. We'll improve!");
    }

    #[tokio::test]
    async fn test_null_or_missing_profile_values_are_invalid_profile() {
        let app = app();
        let id = create_session(&app, None).await;

        for body in [
            json!({ "field": "Law", "knowledge_level": null, "analogy_style": "Tech" }),
            json!({ "field": "Law", "analogy_style": "Tech" }),
        ] {
            let response = app
                .clone()
                .oneshot(json_request(
                    "PUT",
                    &format!("/api/v1/sessions/{id}/profile"),
                    body,
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let body = body_json(response).await;
            assert_eq!(body["error"]["code"], "INVALID_PROFILE");
        }
    }

    #[tokio::test]
    async fn test_unsupported_session_locale_is_rejected() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/v1/sessions",
                json!({ "locale": "de" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_session_without_body_uses_default_locale() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(response).await["locale"], "en");
    }

    #[tokio::test]
    async fn test_png_format_not_offered_for_analysis() {
        let ai = Arc::new(FakeAi::default());
        let app = app_with(ai.clone(), UnknownAnalysisPolicy::Reject);
        let id = create_session(&app, None).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &format!("/api/v1/sessions/{id}/analysis/youtube?format=png"),
                json!({ "url": "https://youtu.be/abc", "analysis_type": "Key points" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(ai.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_txt_format_not_offered_for_images() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/api/v1/images?format=txt",
                json!({ "prompt": "A neural network as a kitchen" }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upload_with_non_pdf_content_type_is_rejected() {
        let ai = Arc::new(FakeAi::default());
        let app = app_with(ai.clone(), UnknownAnalysisPolicy::Reject);
        let id = create_session(&app, None).await;

        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"analysis_type\"\r\n\r\n\
            General summary\r\n\
            --XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"file\"; filename=\"photo.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            not a document\r\n\
            --XBOUNDARY--\r\n";

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(format!("/api/v1/sessions/{id}/analysis/pdf-upload"))
                    .header(
                        header::CONTENT_TYPE,
                        "multipart/form-data; boundary=XBOUNDARY",
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["message"], "Please upload a PDF document.");
        assert!(ai.prompts.lock().unwrap().is_empty());
    }
}
