use std::path::{Path, PathBuf};

use crate::error::{DigestError, DigestResult};

pub(crate) const DEFAULT_SETTINGS_FILE: &str = "Settings.toml";

/// Variable names of the older `.env` layout and what replaces them.
const LEGACY_ENV_NAMES: &[(&str, &str)] = &[
    ("TELEGRAM_API_ID", "TELEGRAM__API_ID"),
    ("TELEGRAM_API_HASH", "TELEGRAM__API_HASH"),
    ("ANTHROPIC_API_KEY", "AI__CLAUDE__API_KEY"),
    ("DEFAULT_TELEGRAM_CHANNEL_ID", "DEFAULT_CHAT_ID"),
];

fn default_limit() -> usize {
    100
}

fn default_prompts_dir() -> PathBuf {
    PathBuf::from("prompts")
}

/// Settings for one run. Built once at startup and passed down by reference.
#[derive(serde::Deserialize)]
pub(crate) struct Config {
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    #[serde(default)]
    pub default_chat_id: Option<String>,

    /// Used for every prompt kind that has no override file.
    #[serde(default)]
    pub default_prompt: Option<String>,

    #[serde(default = "default_prompts_dir")]
    pub prompts_dir: PathBuf,

    #[serde(default)]
    pub telegram: tgdigest_fetch::Config,

    #[serde(default)]
    pub ai: tgdigest_ai::Config,
}

impl Config {
    /// Reads the settings file (the given one, or `Settings.toml` when it
    /// exists) and overlays environment variables, `__` separating nested
    /// keys: `TELEGRAM__API_ID`, `AI__CLAUDE__API_KEY`, ...
    pub fn load(settings_file: Option<&Path>) -> DigestResult<Config> {
        for (old, new) in legacy_env_names(std::env::vars().map(|(name, _)| name)) {
            tracing::warn!(old, new, "ignoring environment variable, rename it");
        }

        let env_config = config::Environment::default()
            .separator("__")
            .try_parsing(true);

        Self::from_sources(settings_file, env_config)
    }

    pub(crate) fn from_sources(
        settings_file: Option<&Path>,
        env_config: config::Environment,
    ) -> DigestResult<Config> {
        let mut conf_builder = config::Config::builder();

        match settings_file {
            Some(path) if !path.is_file() => {
                return Err(DigestError::Config(format!(
                    "settings file {} not found",
                    path.display()
                )));
            }
            Some(path) => {
                conf_builder = conf_builder.add_source(config::File::from(path));
            }
            None if Path::new(DEFAULT_SETTINGS_FILE).exists() => {
                conf_builder =
                    conf_builder.add_source(config::File::with_name(DEFAULT_SETTINGS_FILE));
            }
            None => {}
        }

        let config = conf_builder
            .add_source(env_config)
            .build()?
            .try_deserialize::<Config>()?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> DigestResult<()> {
        let missing = self.telegram.missing();
        if !missing.is_empty() {
            let names = missing
                .iter()
                .map(|key| format!("{key} ({})", env_name(key)))
                .collect::<Vec<_>>()
                .join(", ");
            return Err(DigestError::Config(format!(
                "missing required settings: {names}"
            )));
        }

        Ok(())
    }
}

fn env_name(key: &str) -> String {
    key.to_uppercase().replace('.', "__")
}

/// Legacy variables among `names` that are set without their replacement.
pub(crate) fn legacy_env_names<I>(names: I) -> Vec<(&'static str, &'static str)>
where
    I: IntoIterator<Item = String>,
{
    let names: Vec<String> = names.into_iter().collect();
    let is_set = |name: &str| names.iter().any(|n| n == name);

    LEGACY_ENV_NAMES
        .iter()
        .copied()
        .filter(|(old, new)| is_set(old) && !is_set(new))
        .collect()
}
