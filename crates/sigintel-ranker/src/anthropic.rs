//! Ranking via the Anthropic Messages API.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sigintel_core::{AppConfig, Candidate, Ranker, SelectedItem};

use crate::error::RankerError;
use crate::prompt::{build_prompt, fallback_selection, parse_selection};

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com";
pub const DEFAULT_MODEL: &str = "claude-sonnet-4-5-20250929";
const API_VERSION: &str = "2023-06-01";

#[derive(Clone)]
pub struct RankerSettings {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl RankerSettings {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.anthropic_api_key.clone(),
            api_url: config.anthropic_api_url.clone(),
            model: config.anthropic_model.clone(),
            max_tokens: config.anthropic_max_tokens,
            // Completions take far longer than feed fetches.
            timeout_secs: config.request_timeout_secs.max(120),
        }
    }
}

impl std::fmt::Debug for RankerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankerSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

pub struct AnthropicRanker {
    client: reqwest::Client,
    settings: RankerSettings,
}

impl AnthropicRanker {
    /// # Errors
    ///
    /// Returns [`RankerError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(settings: RankerSettings) -> Result<Self, RankerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self { client, settings })
    }

    /// Send one user message (with `system` as the system prompt when
    /// non-blank) and return the concatenated text content.
    ///
    /// # Errors
    ///
    /// - [`RankerError::MissingApiKey`] when no key is configured.
    /// - [`RankerError::Api`] on a non-2xx response.
    /// - [`RankerError::Http`] on network failure.
    /// - [`RankerError::Deserialize`] / [`RankerError::EmptyResponse`] when
    ///   the body is not a usable message.
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<String, RankerError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(RankerError::MissingApiKey)?;

        let request = MessagesRequest {
            model: &self.settings.model,
            max_tokens: self.settings.max_tokens,
            system: Some(system).filter(|s| !s.trim().is_empty()),
            messages: vec![Message {
                role: "user",
                content: prompt,
            }],
        };

        let url = format!("{}/v1/messages", self.settings.api_url.trim_end_matches('/'));
        tracing::debug!(model = %self.settings.model, "calling Anthropic messages API");

        let response = self
            .client
            .post(&url)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(RankerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| RankerError::Deserialize {
                context: "messages response".to_string(),
                source: e,
            })?;

        let text: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind.is_empty() || block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n");

        if text.trim().is_empty() {
            return Err(RankerError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl Ranker for AnthropicRanker {
    async fn rank(
        &self,
        candidates: &[Candidate],
        policy: &str,
        top_n: usize,
    ) -> Vec<SelectedItem> {
        if candidates.is_empty() || top_n == 0 {
            return Vec::new();
        }

        tracing::info!(
            candidates = candidates.len(),
            top_n,
            "ranking candidates"
        );

        match self.complete(policy, &build_prompt(candidates, top_n)).await {
            Ok(text) => {
                let selected = parse_selection(&text, candidates, top_n);
                tracing::info!(selected = selected.len(), "ranking complete");
                selected
            }
            Err(e) => {
                tracing::warn!(error = %e, "ranking call failed; using fallback selection");
                fallback_selection(candidates, top_n)
            }
        }
    }
}
