//! Settings structures for the web search plugin

use super::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

/// Environment variable holding the safe-search level
pub const ENV_SAFESEARCH: &str = "DUCKDUCKGO_SAFESEARCH";

/// Environment variable holding the pre-search delay in seconds
pub const ENV_SEARCH_DELAY: &str = "DUCKDUCKGO_SEARCH_DELAY";

/// Older name of the pre-search delay variable, read when the new one is unset
pub const ENV_SEARCH_DELAY_LEGACY: &str = "DICKDUCKGO_TENANCY";

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub search: SearchSettings,
    pub retry: RetrySettings,
    pub outgoing: OutgoingSettings,
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let settings: Settings = serde_yaml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject durations and factors that cannot be represented
    ///
    /// Every seconds value must be finite and non-negative.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_secs("retry.multiplier", self.retry.multiplier)?;
        check_secs("retry.min_wait_secs", self.retry.min_wait_secs)?;
        check_secs("retry.max_wait_secs", self.retry.max_wait_secs)?;
        check_secs("outgoing.request_timeout", self.outgoing.request_timeout)?;
        Ok(())
    }

    /// Defaults overlaid with the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut settings = Self::default();
        settings.merge_env()?;
        Ok(settings)
    }

    /// Merge with environment variables
    pub fn merge_env(&mut self) -> Result<(), ConfigError> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key/value source
    pub fn merge_vars<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(val) = lookup(ENV_SAFESEARCH) {
            self.search.safesearch = val.parse()?;
        }

        let delay = match lookup(ENV_SEARCH_DELAY) {
            Some(val) => Some((ENV_SEARCH_DELAY, val)),
            None => lookup(ENV_SEARCH_DELAY_LEGACY).map(|val| {
                warn!(
                    "{} is deprecated, use {} instead",
                    ENV_SEARCH_DELAY_LEGACY, ENV_SEARCH_DELAY
                );
                (ENV_SEARCH_DELAY_LEGACY, val)
            }),
        };
        if let Some((key, val)) = delay {
            self.search.search_delay_secs =
                val.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: val.clone(),
                })?;
        }

        Ok(())
    }
}

fn check_secs(key: &str, value: f64) -> Result<Duration, ConfigError> {
    Duration::try_from_secs_f64(value).map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

/// Safe search level passed through to the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SafeSearch {
    On,
    #[default]
    Moderate,
    Off,
}

impl SafeSearch {
    pub fn as_str(&self) -> &'static str {
        match self {
            SafeSearch::On => "on",
            SafeSearch::Moderate => "moderate",
            SafeSearch::Off => "off",
        }
    }
}

impl fmt::Display for SafeSearch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SafeSearch {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on" | "strict" => Ok(SafeSearch::On),
            "moderate" => Ok(SafeSearch::Moderate),
            "off" => Ok(SafeSearch::Off),
            _ => Err(ConfigError::InvalidValue {
                key: ENV_SAFESEARCH.to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// Search behavior settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Safe search level
    pub safesearch: SafeSearch,
    /// Fixed delay before every provider request (seconds)
    pub search_delay_secs: u64,
    /// Number of results requested from the provider
    pub max_results: usize,
    /// Number of results handed back to the caller
    pub returned_results: usize,
    /// Region used when the caller omits one
    pub default_region: String,
}

impl SearchSettings {
    pub fn search_delay(&self) -> Duration {
        Duration::from_secs(self.search_delay_secs)
    }
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            safesearch: SafeSearch::default(),
            search_delay_secs: 10,
            max_results: 5,
            returned_results: 3,
            default_region: crate::locales::DEFAULT_REGION.to_string(),
        }
    }
}

/// Backoff settings for retrying provider failures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrySettings {
    /// Total attempts, the first one included
    pub max_attempts: u32,
    /// Multiplier applied to the exponential term
    pub multiplier: f64,
    /// Lower bound for a single wait (seconds)
    pub min_wait_secs: f64,
    /// Upper bound for a single wait (seconds)
    pub max_wait_secs: f64,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            multiplier: 1.0,
            min_wait_secs: 2.0,
            max_wait_secs: 6.0,
        }
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Default request timeout in seconds
    pub request_timeout: f64,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Proxy settings
    pub proxies: ProxySettings,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: 10.0,
            pool_maxsize: 20,
            verify_ssl: true,
            proxies: ProxySettings::default(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.search.safesearch, SafeSearch::Moderate);
        assert_eq!(settings.search.search_delay_secs, 10);
        assert_eq!(settings.search.max_results, 5);
        assert_eq!(settings.search.returned_results, 3);
        assert_eq!(settings.search.default_region, "wt-wt");
        assert_eq!(settings.retry.max_attempts, 2);
    }

    #[test]
    fn test_merge_vars() {
        let mut settings = Settings::default();
        settings
            .merge_vars(lookup(&[(ENV_SAFESEARCH, "off"), (ENV_SEARCH_DELAY, "3")]))
            .unwrap();
        assert_eq!(settings.search.safesearch, SafeSearch::Off);
        assert_eq!(settings.search.search_delay_secs, 3);
    }

    #[test]
    fn test_legacy_delay_key() {
        let mut settings = Settings::default();
        settings
            .merge_vars(lookup(&[(ENV_SEARCH_DELAY_LEGACY, "4")]))
            .unwrap();
        assert_eq!(settings.search.search_delay_secs, 4);

        let mut settings = Settings::default();
        settings
            .merge_vars(lookup(&[
                (ENV_SEARCH_DELAY_LEGACY, "4"),
                (ENV_SEARCH_DELAY, "1"),
            ]))
            .unwrap();
        assert_eq!(settings.search.search_delay_secs, 1);
    }

    #[test]
    fn test_invalid_values() {
        let mut settings = Settings::default();
        let err = settings
            .merge_vars(lookup(&[(ENV_SAFESEARCH, "sometimes")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let err = settings
            .merge_vars(lookup(&[(ENV_SEARCH_DELAY, "ten")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref key, .. } if key == ENV_SEARCH_DELAY));
    }

    #[test]
    fn test_yaml_partial_sections() {
        let yaml = "search:\n  safesearch: on\n  search_delay_secs: 0\nretry:\n  max_attempts: 3\n";
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(settings.search.safesearch, SafeSearch::On);
        assert_eq!(settings.search.search_delay_secs, 0);
        assert_eq!(settings.search.max_results, 5);
        assert_eq!(settings.retry.max_attempts, 3);
        assert_eq!(settings.retry.max_wait_secs, 6.0);
        assert!(settings.outgoing.verify_ssl);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unusable_seconds() {
        let cases = [
            ("retry:\n  max_wait_secs: .inf\n", "retry.max_wait_secs"),
            ("retry:\n  min_wait_secs: .nan\n", "retry.min_wait_secs"),
            ("retry:\n  multiplier: -1\n", "retry.multiplier"),
            ("outgoing:\n  request_timeout: -1\n", "outgoing.request_timeout"),
            ("outgoing:\n  request_timeout: .inf\n", "outgoing.request_timeout"),
        ];

        for (yaml, expected_key) in cases {
            let settings: Settings = serde_yaml::from_str(yaml).unwrap();
            let err = settings.validate().unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { ref key, .. } if key == expected_key),
                "{}: {}",
                yaml,
                err
            );
        }
    }
}
