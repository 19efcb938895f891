mod auth;
mod chat;
mod config;
mod error;
mod fetch;
mod history;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use chat::ChatRef;
pub use config::Config;
pub use error::*;
use tgdigest_common::Conversation;

/// What to fetch for one run.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub chat: String,
    /// Maximum number of text messages.
    pub limit: usize,
    pub unread_only: bool,
}

/// Anything that can produce the messages of a chat.
pub trait MessageSource {
    /// Returns the newest `limit` text messages of the chat, oldest first.
    fn fetch(&self, request: &FetchRequest) -> impl Future<Output = FetchResult<Conversation>>;
}

pub struct TelegramFetcher {
    client: grammers_client::Client,
    api_hash: String,
    // stops the sender pool on disconnect
    handle: grammers_mtsender::SenderPoolHandle,
}

impl TelegramFetcher {
    pub fn connect(config: &Config) -> FetchResult<Self> {
        let session = Arc::new(
            grammers_session::storages::SqliteSession::open(&config.session_file)
                .map_err(|e| FetchError::Session(Box::new(e)))?,
        );
        let sender_pool = grammers_mtsender::SenderPool::new(Arc::clone(&session), config.api_id);
        let client = grammers_client::client::Client::new(&sender_pool);

        let grammers_mtsender::SenderPool {
            runner,
            updates: _updates,
            handle,
        } = sender_pool;

        tokio::spawn(runner.run());

        tracing::info!(session_file = %config.session_file.display(), "telegram client started");

        Ok(TelegramFetcher {
            client,
            handle,
            api_hash: config.api_hash.clone(),
        })
    }

    pub fn disconnect(self) {
        self.handle.quit();
        tracing::info!("telegram client disconnected");
    }
}
