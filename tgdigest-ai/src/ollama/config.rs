pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

#[derive(Clone, serde::Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Passed as `num_predict`; the server default applies when unset.
    #[serde(default)]
    pub max_tokens: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            max_tokens: None,
        }
    }
}
