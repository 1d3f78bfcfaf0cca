use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::sources::DEFAULT_METADATA_URL;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SourceConfig {
    pub metadata_url: Option<String>,
    pub append_text: Option<String>,
}

impl SourceConfig {
    /// Configured manifest URL, or the built-in one when unset or blank.
    pub fn metadata_url(&self) -> &str {
        self.metadata_url
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_METADATA_URL)
    }

    pub fn append_text(&self) -> &str {
        self.append_text.as_deref().unwrap_or("")
    }
}

fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("evtrack")
        .join("config.toml")
}

pub fn load_config() -> Config {
    load_config_from(&config_path())
}

fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            log::warn!("cannot read {}: {}; using defaults", path.display(), e);
            return Config::default();
        }
    };
    match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("invalid config {}: {}; using defaults", path.display(), e);
            Config::default()
        }
    }
}

pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
