use std::{collections::HashMap, fs, path::Path, path::PathBuf};

use client_core::DEFAULT_API_BASE_URL;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_base_url: String,
    pub token_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.into(),
            token_path: default_token_path(),
        }
    }
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("eventhub").join("token"))
        .unwrap_or_else(|| PathBuf::from(".eventhub-token"))
}

/// Defaults, then the optional config file, then the environment.
pub fn load_settings(config_path: &Path) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(config_path) {
        apply_file(&mut settings, &raw, config_path);
    }
    apply_env(&mut settings, |key| std::env::var(key).ok());

    settings
}

fn apply_file(settings: &mut Settings, raw: &str, origin: &Path) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(file_cfg) => file_cfg,
        Err(err) => {
            warn!(path = %origin.display(), error = %err, "ignoring unreadable config file");
            return;
        }
    };
    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("token_path") {
        settings.token_path = PathBuf::from(v);
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("EVENTHUB_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("EVENTHUB_TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }
    if let Some(v) = lookup("APP__TOKEN_PATH") {
        settings.token_path = PathBuf::from(v);
    }
}

impl Settings {
    /// Command-line flags win over everything else.
    pub fn with_overrides(mut self, api_url: Option<String>, token_path: Option<PathBuf>) -> Self {
        if let Some(api_url) = api_url {
            self.api_base_url = api_url;
        }
        if let Some(token_path) = token_path {
            self.token_path = token_path;
        }
        self
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
