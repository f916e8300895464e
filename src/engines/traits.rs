//! Provider traits and types

use crate::config::SafeSearch;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A raw result record as produced by a provider
///
/// Every field is optional; consumers read a missing field as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawResult {
    /// Snippet text
    pub body: Option<String>,
    /// Page title
    pub title: Option<String>,
    /// Target URL
    pub href: Option<String>,
}

impl RawResult {
    pub fn new(
        title: impl Into<String>,
        href: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            body: Some(body.into()),
            title: Some(title.into()),
            href: Some(href.into()),
        }
    }
}

/// Errors raised by a search provider
///
/// `RateLimited`, `Timeout` and `Search` form the retryable family; a
/// caller that exhausts its retries on one of them reports a soft failure.
/// `Other` is never retried.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("rate limited: {0}")]
    RateLimited(String),

    #[error("timed out: {0}")]
    Timeout(String),

    #[error("search failed: {0}")]
    Search(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProviderError {
    /// Whether this failure belongs to the retryable provider family
    pub fn is_designated(&self) -> bool {
        !matches!(self, ProviderError::Other(_))
    }
}

/// A web search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Run a text search, returning at most `max_results` records
    async fn text(
        &self,
        query: &str,
        region: &str,
        safesearch: SafeSearch,
        max_results: usize,
    ) -> Result<Vec<RawResult>, ProviderError>;
}

/// HTTP request to be made by a provider
#[derive(Debug, Clone)]
pub struct EngineRequest {
    /// URL to request
    pub url: String,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Form body
    pub form: Option<HashMap<String, String>>,
}

impl EngineRequest {
    /// Create a POST request
    pub fn post(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: HashMap::new(),
            form: None,
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set a form-urlencoded body
    pub fn form(mut self, data: HashMap<String, String>) -> Self {
        self.form = Some(data);
        self
    }
}

/// HTTP response from a provider request
#[derive(Debug)]
pub struct EngineResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
    /// Response URL (after redirects)
    pub url: String,
}

impl EngineResponse {
    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Check if response indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }

    /// Check if response is DuckDuckGo's bot challenge page
    pub fn is_captcha(&self) -> bool {
        self.text.contains("anomaly-modal") || self.text.contains("/anomaly.js")
    }
}
