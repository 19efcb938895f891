mod config;
pub(crate) mod models;

pub use config::Config;

use crate::claude::models::{ClaudeMessage, ClaudeRequest, ClaudeResponse};
use crate::error::check_status;
use crate::{Summarizer, TgdigestAiError, TgdigestAiResult};

const BACKEND: &str = "Anthropic";
const API_VERSION: &str = "2023-06-01";

/// Hosted backend: the Anthropic Messages API.
pub struct ClaudeClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl ClaudeClient {
    pub fn new(config: &Config, model: &str, api_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            max_tokens: config.max_tokens,
            endpoint: format!("{}/v1/messages", config.base_url.trim_end_matches('/')),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl Summarizer for ClaudeClient {
    async fn complete(&self, prompt: &str) -> TgdigestAiResult<String> {
        let request = ClaudeRequest {
            model: &self.model,
            max_tokens: self.max_tokens,
            messages: vec![ClaudeMessage {
                role: "user",
                content: prompt,
            }],
        };

        tracing::info!(model = %self.model, "requesting completion from Anthropic API");

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await?;

        let response = check_status(BACKEND, response)
            .await?
            .json::<ClaudeResponse>()
            .await?;

        if let Some(error) = response.error {
            return Err(TgdigestAiError::Api {
                backend: BACKEND,
                status: reqwest::StatusCode::OK,
                body: error.message,
            });
        }

        response
            .text()
            .ok_or_else(|| TgdigestAiError::MalformedResponse {
                backend: BACKEND,
                reason: "no text content in response".to_string(),
            })
    }
}
