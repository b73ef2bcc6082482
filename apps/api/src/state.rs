use std::sync::Arc;

use crate::config::Config;
use crate::content::ContentFetcher;
use crate::llm_client::GenerativeClient;
use crate::profile::SessionRegistry;
use crate::prompting::PromptCompiler;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionRegistry>,
    pub compiler: PromptCompiler,
    /// Downloads PDFs given by URL. Default: HttpFetcher.
    pub fetcher: Arc<dyn ContentFetcher>,
    /// Generative AI collaborator. Default: GeminiClient.
    pub ai: Arc<dyn GenerativeClient>,
    pub config: Config,
}
