use anyhow::{Context, Result};

use crate::locale::Locale;
use crate::prompting::UnknownAnalysisPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if the generative AI key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub genai_api_key: String,
    pub port: u16,
    pub rust_log: String,
    pub default_locale: Locale,
    pub unknown_analysis_policy: UnknownAnalysisPolicy,
    pub max_upload_bytes: usize,
    pub http_timeout_secs: u64,
    /// Idle time after which a session and its profile are dropped.
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            genai_api_key: require(&lookup, "GOOGLE_GENAI_API_KEY")?,
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            default_locale: var("DEFAULT_LOCALE", "en")
                .parse::<Locale>()
                .context("DEFAULT_LOCALE must be 'en' or 'fr'")?,
            unknown_analysis_policy: var("UNKNOWN_ANALYSIS_POLICY", "reject")
                .parse::<UnknownAnalysisPolicy>()
                .context("UNKNOWN_ANALYSIS_POLICY must be 'reject' or 'fallback'")?,
            max_upload_bytes: var("MAX_UPLOAD_MB", "200")
                .parse::<usize>()
                .context("MAX_UPLOAD_MB must be a whole number of megabytes")?
                * 1024
                * 1024,
            http_timeout_secs: var("HTTP_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            session_ttl_secs: var("SESSION_TTL_SECS", "3600")
                .parse::<u64>()
                .context("SESSION_TTL_SECS must be a whole number of seconds")?,
        })
    }
}

fn require(lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    let value = lookup(key).with_context(|| {
        format!("Required environment variable '{key}' is not set. Please configure it before starting the server")
    })?;
    if value.trim().is_empty() {
        anyhow::bail!("Required environment variable '{key}' is empty");
    }
    Ok(value)
}

#[cfg(test)]
impl Config {
    pub fn test_config() -> Self {
        Config {
            genai_api_key: "test-key".to_string(),
            port: 8080,
            rust_log: "debug".to_string(),
            default_locale: Locale::En,
            unknown_analysis_policy: UnknownAnalysisPolicy::Reject,
            max_upload_bytes: 10 * 1024 * 1024,
            http_timeout_secs: 5,
            session_ttl_secs: 3600,
        }
    }
}
