use tgdigest_ai::TgdigestAiError;
use tgdigest_fetch::FetchError;

#[derive(Debug, thiserror::Error)]
pub(crate) enum DigestError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to fetch messages: {0}")]
    Fetch(#[from] FetchError),

    #[error("Summarization failed: {0}")]
    Backend(TgdigestAiError),

    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),

    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl From<TgdigestAiError> for DigestError {
    fn from(err: TgdigestAiError) -> Self {
        match err {
            TgdigestAiError::Configuration(message) => DigestError::Config(message),
            other => DigestError::Backend(other),
        }
    }
}

impl From<config::ConfigError> for DigestError {
    fn from(err: config::ConfigError) -> Self {
        DigestError::Config(err.to_string())
    }
}

pub(crate) type DigestResult<T> = Result<T, DigestError>;
