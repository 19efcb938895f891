mod config;
pub(crate) mod models;

pub use config::Config;

use crate::error::check_status;
use crate::ollama::models::{OllamaMessage, OllamaRequest, OllamaResponse, Options};
use crate::{Summarizer, TgdigestAiError, TgdigestAiResult};

const BACKEND: &str = "Ollama";

/// Local backend: an Ollama server, no credential required.
pub struct OllamaClient {
    client: reqwest::Client,
    model: String,
    max_tokens: Option<u32>,
    endpoint: String,
}

impl OllamaClient {
    pub fn new(config: &Config, model: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            model: model.to_string(),
            max_tokens: config.max_tokens,
            endpoint: format!("{}/api/chat", config.base_url.trim_end_matches('/')),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn request<'a>(&'a self, prompt: &'a str) -> OllamaRequest<'a> {
        OllamaRequest {
            model: &self.model,
            messages: vec![OllamaMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
            options: self.max_tokens.map(|num_predict| Options { num_predict }),
        }
    }
}

impl Summarizer for OllamaClient {
    async fn complete(&self, prompt: &str) -> TgdigestAiResult<String> {
        tracing::info!(model = %self.model, endpoint = %self.endpoint, "requesting completion from Ollama");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&self.request(prompt))
            .send()
            .await?;

        let response = check_status(BACKEND, response)
            .await?
            .json::<OllamaResponse>()
            .await?;

        if let Some(error) = response.error {
            return Err(TgdigestAiError::Api {
                backend: BACKEND,
                status: reqwest::StatusCode::OK,
                body: error,
            });
        }

        response
            .message
            .map(|m| m.content)
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| TgdigestAiError::MalformedResponse {
                backend: BACKEND,
                reason: "no message content in response".to_string(),
            })
    }
}
