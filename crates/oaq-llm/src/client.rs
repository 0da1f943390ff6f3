use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::LlmConfig;

/// Failures talking to the chat backend. Callers absorb these into the
/// deterministic fallback; they are never fatal.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("chat request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// The seam between the chooser and whatever produces answers. Production
/// uses [`OllamaClient`]; tests substitute stubs.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one prompt, return the assistant's text.
    async fn chat(&self, prompt: &str) -> Result<String, BackendError>;
}

/// Client for an Ollama-style `/api/chat` endpoint with deterministic
/// decoding (temperature zero) and a bounded request timeout.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl OllamaClient {
    pub fn new(config: &LlmConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

#[async_trait]
impl ChatBackend for OllamaClient {
    async fn chat(&self, prompt: &str) -> Result<String, BackendError> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "stream": false,
            "options": {"temperature": 0},
        });

        let response = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatResponse = response.json().await?;
        Ok(reply.into_text())
    }
}

/// Response envelope: the assistant's text lives at `message.content`, with
/// `response` as a fallback field. Absence of both is an empty answer.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatMessage>,
    #[serde(default)]
    response: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

impl ChatResponse {
    fn into_text(self) -> String {
        self.message
            .map(|m| m.content)
            .filter(|content| !content.is_empty())
            .or(self.response)
            .unwrap_or_default()
            .trim()
            .to_string()
    }
}
