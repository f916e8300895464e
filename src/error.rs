//! Errors surfaced to the host framework

use crate::config::ConfigError;
use crate::engines::ProviderError;
use thiserror::Error;

/// Failures the plugin does not recover from
///
/// Retryable provider failures never appear here once retries run out;
/// they are turned into a soft message instead.
#[derive(Debug, Error)]
pub enum PluginError {
    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("invalid argument {name}: {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("provider failure: {0}")]
    Provider(#[from] ProviderError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] anyhow::Error),

    #[error("failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl PluginError {
    pub fn invalid(name: impl Into<String>, reason: impl Into<String>) -> Self {
        PluginError::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
