use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum TgdigestAiError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("{backend} rejected the credentials ({status}): {body}")]
    Unauthorized {
        backend: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{backend} rate limit exceeded: {body}")]
    RateLimited { backend: &'static str, body: String },

    #[error("{backend} API error ({status}): {body}")]
    Api {
        backend: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("Malformed response from {backend}: {reason}")]
    MalformedResponse {
        backend: &'static str,
        reason: String,
    },
}

impl TgdigestAiError {
    pub fn from_status(backend: &'static str, status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TgdigestAiError::Unauthorized {
                backend,
                status,
                body,
            },
            StatusCode::TOO_MANY_REQUESTS => TgdigestAiError::RateLimited { backend, body },
            _ => TgdigestAiError::Api {
                backend,
                status,
                body,
            },
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, TgdigestAiError::Configuration(_))
    }
}

pub type TgdigestAiResult<T> = Result<T, TgdigestAiError>;

/// Passes successful responses through and turns everything else into an error.
pub(crate) async fn check_status(
    backend: &'static str,
    response: reqwest::Response,
) -> TgdigestAiResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::error!(backend, %status, %body, "LLM API error");

    Err(TgdigestAiError::from_status(backend, status, body))
}
