use std::env;
use std::time::Duration;

/// Chat backend base URL when `LLM_HOST` is unset.
pub const DEFAULT_HOST: &str = "http://llm:11434";

/// Model name when `MODEL_NAME` is unset.
pub const DEFAULT_MODEL: &str = "mistral";

/// Request timeout when `LLM_TIMEOUT_SECS` is unset.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Chat backend configuration, read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmConfig {
    /// Base URL of the chat backend (`LLM_HOST`).
    pub base_url: String,
    /// Model name sent with every request (`MODEL_NAME`).
    pub model: String,
    /// Upper bound on one backend request (`LLM_TIMEOUT_SECS`, in seconds).
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_HOST.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LlmConfig {
    /// Read the configuration from the environment, falling back to the
    /// documented defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: env::var("LLM_HOST").unwrap_or(defaults.base_url),
            model: env::var("MODEL_NAME").unwrap_or(defaults.model),
            timeout: env::var("LLM_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}
