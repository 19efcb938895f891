use std::path::PathBuf;

fn default_session_file() -> PathBuf {
    PathBuf::from("tgdigest.session")
}

#[derive(serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api_id: i32,
    #[serde(default)]
    pub api_hash: String,
    #[serde(default = "default_session_file")]
    pub session_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_id: 0,
            api_hash: String::new(),
            session_file: default_session_file(),
        }
    }
}

impl Config {
    /// Names of required settings that are not set.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.api_id == 0 {
            missing.push("telegram.api_id");
        }
        if self.api_hash.trim().is_empty() {
            missing.push("telegram.api_hash");
        }
        missing
    }
}
