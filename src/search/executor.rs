//! Search execution against a single provider

use super::retry::RetryPolicy;
use crate::config::{SafeSearch, Settings};
use crate::engines::{ProviderError, RawResult, SearchProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Runs throttled, retried searches against a provider
#[derive(Clone)]
pub struct SearchExecutor {
    provider: Arc<dyn SearchProvider>,
    safesearch: SafeSearch,
    /// Fixed wait before every provider request
    delay: Duration,
    /// Results requested from the provider
    max_results: usize,
    /// Results kept for the caller
    returned_results: usize,
    retry: RetryPolicy,
}

impl SearchExecutor {
    /// Create an executor from settings
    pub fn new(provider: Arc<dyn SearchProvider>, settings: &Settings) -> Self {
        Self {
            provider,
            safesearch: settings.search.safesearch,
            delay: settings.search.search_delay(),
            max_results: settings.search.max_results,
            returned_results: settings.search.returned_results,
            retry: RetryPolicy::from(&settings.retry),
        }
    }

    pub fn safesearch(&self) -> SafeSearch {
        self.safesearch
    }

    /// Search with the configured delay and retry policy
    ///
    /// Returns at most `returned_results` records. Retryable failures that
    /// outlast the policy are returned as the last error seen.
    pub async fn perform_search(
        &self,
        query: &str,
        region: &str,
    ) -> Result<Vec<RawResult>, ProviderError> {
        info!(
            "Searching {} for '{}' (region {}, safesearch {})",
            self.provider.name(),
            query,
            region,
            self.safesearch
        );

        self.retry
            .run(move |attempt| self.attempt(query, region, attempt))
            .await
    }

    async fn attempt(
        &self,
        query: &str,
        region: &str,
        attempt: u32,
    ) -> Result<Vec<RawResult>, ProviderError> {
        if !self.delay.is_zero() {
            debug!("Waiting {:?} before attempt {}", self.delay, attempt);
            tokio::time::sleep(self.delay).await;
        }

        let mut results = self
            .provider
            .text(query, region, self.safesearch, self.max_results)
            .await?;
        results.truncate(self.returned_results);

        debug!("Attempt {} returned {} results", attempt, results.len());
        Ok(results)
    }
}
