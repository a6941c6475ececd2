use std::path::Path;

use serde::{Deserialize, Serialize};

/// Key holding the legacy AI chat panel state (`{"tabs": [...]}`).
pub const CHAT_DATA_KEY: &str = "workbench.panel.aichat.view.aichat.chatdata";

/// Key holding composer sessions (`{"allComposers": [...]}`).
pub const COMPOSER_DATA_KEY: &str = "composer.composerData";

/// Service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Storage root override. Used when no CLI/env override is given.
    #[serde(default)]
    pub workspace_path: Option<String>,

    /// Name of the per-workspace state database
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Name of the per-workspace descriptor file
    #[serde(default = "default_sidecar_file")]
    pub sidecar_file: String,

    #[serde(default = "default_chat_data_key")]
    pub chat_data_key: String,

    #[serde(default = "default_composer_data_key")]
    pub composer_data_key: String,
}

fn default_database_file() -> String {
    "state.vscdb".to_string()
}

fn default_sidecar_file() -> String {
    "workspace.json".to_string()
}

fn default_chat_data_key() -> String {
    CHAT_DATA_KEY.to_string()
}

fn default_composer_data_key() -> String {
    COMPOSER_DATA_KEY.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace_path: None,
            database_file: default_database_file(),
            sidecar_file: default_sidecar_file(),
            chat_data_key: default_chat_data_key(),
            composer_data_key: default_composer_data_key(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
