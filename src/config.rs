use std::time::Duration;

use crate::error::{AppError, Result};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Connection settings for the chat-completion service.
#[derive(Clone)]
pub struct StoryConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for StoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoryConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl StoryConfig {
    /// Reads `GAIA_*` variables, loading `.env` first when present.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::Config(format!("Missing {key}")))
        };

        let api_key = required("GAIA_API_KEY")?;
        let base_url = required("GAIA_API_ENDPOINT")?;
        let model = required("GAIA_API_MODEL")?;
        let request_timeout = match lookup("GAIA_REQUEST_TIMEOUT_SECS") {
            None => DEFAULT_REQUEST_TIMEOUT,
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or_else(|| {
                    AppError::Config(format!("GAIA_REQUEST_TIMEOUT_SECS must be a positive integer, got {raw:?}"))
                })?,
        };

        Ok(Self { api_key, base_url, model, request_timeout })
    }
}
