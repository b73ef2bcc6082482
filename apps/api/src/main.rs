mod analysis;
mod config;
mod content;
mod errors;
mod llm_client;
mod locale;
mod models;
mod profile;
mod prompting;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::content::HttpFetcher;
use crate::llm_client::GeminiClient;
use crate::profile::SessionRegistry;
use crate::prompting::PromptCompiler;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting HikmaMind API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize generative AI client
    let ai = GeminiClient::new(config.genai_api_key.clone(), config.http_timeout_secs)
        .context("failed to build the generative AI client")?;
    info!(
        "Generative AI client initialized (analysis: {}, images: {})",
        llm_client::ANALYSIS_MODEL,
        llm_client::IMAGE_MODEL
    );

    let fetcher = HttpFetcher::new(config.http_timeout_secs)
        .context("failed to build the content fetcher")?;

    let compiler = PromptCompiler::new(config.unknown_analysis_policy);
    info!(
        "Default locale: {}, unknown analysis types: {:?}",
        config.default_locale,
        compiler.policy()
    );

    // Build app state
    let state = AppState {
        sessions: Arc::new(SessionRegistry::new(Duration::from_secs(config.session_ttl_secs))),
        compiler,
        fetcher: Arc::new(fetcher),
        ai: Arc::new(ai),
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
