//! OpenAI-compatible completions backend
//!
//! Drives any server exposing the `/v1/completions` surface (OpenAI itself,
//! vLLM, llama.cpp server, and friends). Each `extend` call sends the full
//! prefix as the prompt and returns the continuation text.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::core::backends::GenerationBackend;
use crate::utils::error::{EngineError, Result};

/// OpenAI-compatible backend configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAiConfig {
    /// API key, sent as a bearer token when present
    pub api_key: Option<String>,
    /// API base URL (default: <https://api.openai.com>)
    pub api_base: Option<String>,
    /// Model to request completions from
    pub model: String,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: Some("https://api.openai.com".to_string()),
            model: "gpt-3.5-turbo-instruct".to_string(),
            timeout: 60,
        }
    }
}

impl OpenAiConfig {
    /// Create configuration from environment variables
    ///
    /// Reads `OPENAI_API_KEY`, `OPENAI_API_BASE`, and `OPENAI_MODEL`,
    /// falling back to the defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_key: std::env::var("OPENAI_API_KEY").ok(),
            api_base: std::env::var("OPENAI_API_BASE").ok().or(defaults.api_base),
            model: std::env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            timeout: defaults.timeout,
        }
    }

    /// Get effective API base URL
    pub fn get_effective_api_base(&self) -> &str {
        self.api_base.as_deref().unwrap_or("https://api.openai.com")
    }
}

/// OpenAI-compatible completions client
pub struct OpenAiBackend {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiBackend {
    /// Create a backend from a configuration
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self { config, client })
    }

    /// Create a backend configured from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAiConfig::from_env())
    }

    /// The active configuration
    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }

    /// Build request headers
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &self.config.api_key {
            let auth_value = HeaderValue::from_str(&format!("Bearer {api_key}"))
                .map_err(|e| EngineError::backend(format!("Invalid API key: {e}")))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        Ok(headers)
    }

    /// Completion tokens to request for a character budget
    ///
    /// Rough ~4 chars per token estimate. Overshoot is harmless: the
    /// generation loop re-checks its constraint after every chunk and trims
    /// trailing noise itself.
    fn max_tokens_hint(limit: Option<usize>) -> Option<u64> {
        limit.map(|chars| ((chars as f64) / 4.0).ceil().max(1.0) as u64)
    }
}

#[async_trait]
impl GenerationBackend for OpenAiBackend {
    async fn extend(&self, prefix: &str, limit: Option<usize>) -> Result<String> {
        let url = format!("{}/v1/completions", self.config.get_effective_api_base());

        let mut body = json!({
            "model": self.config.model,
            "prompt": prefix,
        });
        if let Some(max_tokens) = Self::max_tokens_hint(limit) {
            body["max_tokens"] = json!(max_tokens);
        }

        debug!(
            model = %self.config.model,
            prefix_chars = prefix.chars().count(),
            "dispatching completion request"
        );

        let response = self
            .client
            .post(&url)
            .headers(self.build_headers()?)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!(status, "completion request failed");
            return Err(EngineError::backend(format!("HTTP {status}: {message}")));
        }

        let payload: serde_json::Value = response.json().await?;
        let text = payload
            .get("choices")
            .and_then(|choices| choices.as_array())
            .and_then(|choices| choices.first())
            .and_then(|choice| choice.get("text"))
            .and_then(|text| text.as_str())
            .ok_or_else(|| EngineError::backend("completion response carried no choices[0].text"))?;

        Ok(text.to_string())
    }
}
