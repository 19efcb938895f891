use crate::{claude, ollama};

fn default_model() -> String {
    "llama2".to_string()
}

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    /// Model used when none is given on the command line.
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default)]
    pub claude: claude::Config,

    #[serde(default)]
    pub ollama: ollama::Config,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: default_model(),
            claude: claude::Config::default(),
            ollama: ollama::Config::default(),
        }
    }
}
