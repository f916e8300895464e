//! Configuration module for the web search plugin
//!
//! Handles loading settings from YAML files and environment variables.

mod settings;

pub use settings::*;

use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

/// Environment variable pointing at a settings file
pub const ENV_SETTINGS_PATH: &str = "DDG_SEARCH_SETTINGS_PATH";

/// Errors raised while building [`Settings`]
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: String, value: String },
}

/// Load settings from file or use defaults, then apply the environment
pub fn load() -> Result<Settings, ConfigError> {
    match settings_path() {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env()?;
            Ok(settings)
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::from_env()
        }
    }
}

fn settings_path() -> Option<PathBuf> {
    // Explicit path wins over the default locations
    if let Ok(path) = std::env::var(ENV_SETTINGS_PATH) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("ddg-web-search/settings.yml"));
    }

    paths.into_iter().find(|p| p.exists())
}
