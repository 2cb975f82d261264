//! Anthropic messages-endpoint client.
//!
//! The same request shape is accepted by the Anthropic API and by
//! OpenRouter's Anthropic-compatible endpoint; only the auth header differs,
//! selected by the configured backend.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

use super::{CompletionClient, ToolSpec};
use crate::config::{Backend, Config};
use crate::error::{MiniError, Result};
use crate::session::{ContentBlock, Message};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: &'a [Message],
    tools: &'a [ToolSpec],
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(rename = "type")]
    kind: String,
    message: String,
}

/// HTTP client for the configured messages endpoint.
pub struct ClaudeClient {
    http: reqwest::Client,
    config: Config,
}

impl ClaudeClient {
    pub fn new(config: Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { http, config })
    }

    /// Auth headers for the configured backend.
    fn auth_headers(&self) -> Vec<(&'static str, String)> {
        match self.config.backend {
            Backend::Anthropic => vec![("x-api-key", self.config.api_key.clone())],
            Backend::OpenRouter => vec![(
                "authorization",
                format!("Bearer {}", self.config.api_key),
            )],
        }
    }

    /// Turn a non-success response body into a provider error.
    ///
    /// The endpoint reports failures as `{"error":{"type":...,"message":...}}`;
    /// anything unparseable is surfaced raw.
    fn parse_error(status: reqwest::StatusCode, body: &str) -> MiniError {
        match serde_json::from_str::<ApiError>(body) {
            Ok(api) => MiniError::Provider(format!(
                "{} ({}): {}",
                status, api.error.kind, api.error.message
            )),
            Err(_) => MiniError::Provider(format!("{}: {}", status, body)),
        }
    }
}

#[async_trait]
impl CompletionClient for ClaudeClient {
    async fn complete(
        &self,
        system: &str,
        messages: &[Message],
        tools: &[ToolSpec],
    ) -> Result<Vec<ContentBlock>> {
        let request = CompletionRequest {
            model: &self.config.model,
            max_tokens: self.config.max_tokens,
            system,
            messages,
            tools,
        };
        debug!(
            model = %self.config.model,
            messages = messages.len(),
            "sending completion request"
        );

        let mut builder = self
            .http
            .post(&self.config.api_url)
            .header("content-type", "application/json")
            .header("anthropic-version", ANTHROPIC_VERSION);
        for (name, value) in self.auth_headers() {
            builder = builder.header(name, value);
        }

        let response = builder.json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(Self::parse_error(status, &body));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)
            .map_err(|e| MiniError::Provider(format!("malformed response: {}", e)))?;
        info!(blocks = parsed.content.len(), "completion received");
        Ok(parsed.content)
    }
}
