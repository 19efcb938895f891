use crate::claude::ClaudeClient;
use crate::ollama::OllamaClient;
use crate::{Config, Summarizer, TgdigestAiError, TgdigestAiResult};

/// Whether `model` names the hosted backend rather than a local one.
pub fn is_hosted_model(model: &str, config: &Config) -> bool {
    model == config.claude.model || model.starts_with("claude")
}

/// The LLM backend for a run, chosen once from the model identifier.
pub enum Backend {
    Hosted(ClaudeClient),
    Local(OllamaClient),
}

impl Backend {
    /// Fails with a configuration error, before any request is made, when a
    /// hosted model is selected without an API key.
    pub fn select(model: &str, config: &Config) -> TgdigestAiResult<Self> {
        let model = model.trim();
        if model.is_empty() {
            return Err(TgdigestAiError::Configuration(
                "model name is empty".to_string(),
            ));
        }

        if !is_hosted_model(model, config) {
            return Ok(Backend::Local(OllamaClient::new(&config.ollama, model)));
        }

        let api_key = config
            .claude
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| {
                TgdigestAiError::Configuration(format!(
                    "model '{model}' uses the Anthropic API, but no API key is configured (set AI__CLAUDE__API_KEY)"
                ))
            })?;

        Ok(Backend::Hosted(ClaudeClient::new(
            &config.claude,
            model,
            api_key,
        )))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Backend::Hosted(_) => "hosted",
            Backend::Local(_) => "local",
        }
    }

    pub fn model(&self) -> &str {
        match self {
            Backend::Hosted(client) => client.model(),
            Backend::Local(client) => client.model(),
        }
    }
}

impl Summarizer for Backend {
    async fn complete(&self, prompt: &str) -> TgdigestAiResult<String> {
        match self {
            Backend::Hosted(client) => client.complete(prompt).await,
            Backend::Local(client) => client.complete(prompt).await,
        }
    }
}
