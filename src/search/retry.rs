//! Bounded exponential backoff for provider calls

use crate::config::RetrySettings;
use crate::engines::ProviderError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// Retry schedule for retryable provider failures
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    pub multiplier: f64,
    pub min_wait: Duration,
    pub max_wait: Duration,
}

impl RetryPolicy {
    /// A policy that never retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            multiplier: 0.0,
            min_wait: Duration::ZERO,
            max_wait: Duration::ZERO,
        }
    }

    /// Wait after the given (1-based) failed attempt
    ///
    /// `multiplier * 2^(attempt - 1)` seconds, clamped to `[min_wait, max_wait]`.
    pub fn wait_for(&self, attempt: u32) -> Duration {
        let exp = 2f64.powi(attempt.saturating_sub(1).min(62) as i32);
        let secs = (self.multiplier * exp).min(self.max_wait.as_secs_f64());
        secs_or_zero(secs).max(self.min_wait)
    }

    /// Run `op` until it succeeds, fails with a non-retryable error, or
    /// runs out of attempts
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, ProviderError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.is_designated() && attempt < max_attempts => {
                    let wait = self.wait_for(attempt);
                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, max_attempts, e, wait
                    );
                    tokio::time::sleep(wait).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from(&RetrySettings::default())
    }
}

impl From<&RetrySettings> for RetryPolicy {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_attempts,
            multiplier: settings.multiplier,
            min_wait: secs_or_zero(settings.min_wait_secs),
            max_wait: secs_or_zero(settings.max_wait_secs),
        }
    }
}

/// Unvalidated settings must not panic here; `Settings::validate` reports them
fn secs_or_zero(secs: f64) -> Duration {
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[test]
    fn test_default_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.wait_for(1), Duration::from_secs(2));
        assert_eq!(policy.wait_for(2), Duration::from_secs(2));
        assert_eq!(policy.wait_for(3), Duration::from_secs(4));
        assert_eq!(policy.wait_for(4), Duration::from_secs(6));
        assert_eq!(policy.wait_for(40), Duration::from_secs(6));
    }

    #[test]
    fn test_unrepresentable_settings_do_not_panic() {
        let settings = RetrySettings {
            multiplier: f64::NAN,
            min_wait_secs: -1.0,
            max_wait_secs: f64::INFINITY,
            ..RetrySettings::default()
        };
        let policy = RetryPolicy::from(&settings);
        assert_eq!(policy.min_wait, Duration::ZERO);
        assert_eq!(policy.max_wait, Duration::ZERO);
        assert_eq!(policy.wait_for(1), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_designated_once() {
        let calls = &AtomicU32::new(0);
        let start = tokio::time::Instant::now();

        let result: Result<(), _> = RetryPolicy::default()
            .run(move |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::RateLimited("202".to_string()))
            })
            .await;

        assert!(matches!(result, Err(ProviderError::RateLimited(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert!(start.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test]
    async fn test_recovers_after_failure() {
        let result = RetryPolicy::none()
            .run(|attempt| async move {
                if attempt == 1 {
                    Ok("first")
                } else {
                    Err(ProviderError::Search("unreachable".to_string()))
                }
            })
            .await;
        assert_eq!(result.unwrap(), "first");

        let policy = RetryPolicy {
            min_wait: Duration::ZERO,
            max_wait: Duration::ZERO,
            ..RetryPolicy::default()
        };
        let result = policy
            .run(|attempt| async move {
                if attempt == 1 {
                    Err(ProviderError::Timeout("slow".to_string()))
                } else {
                    Ok(attempt)
                }
            })
            .await;
        assert_eq!(result.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_other_errors_not_retried() {
        let calls = &AtomicU32::new(0);
        let result: Result<(), _> = RetryPolicy::default()
            .run(move |_| async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(ProviderError::Other(anyhow::anyhow!("broken")))
            })
            .await;

        assert!(matches!(result, Err(ProviderError::Other(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
