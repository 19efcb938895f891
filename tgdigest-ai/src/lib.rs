mod backend;
pub mod claude;
mod config;
mod error;
pub mod ollama;


pub use backend::{Backend, is_hosted_model};
pub use config::Config;
pub use error::*;

/// A text-generation backend.
pub trait Summarizer {
    fn complete(&self, prompt: &str) -> impl Future<Output = TgdigestAiResult<String>>;
}
