//! Search request and response models

use crate::engines::RawResult;
use crate::error::PluginError;
use crate::locales::is_supported_region;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Message returned when the provider keeps failing
pub const RATE_LIMIT_MESSAGE: &str = "No good DuckDuckGo Search Result was found due to rate limits";

/// Message returned when the provider succeeds with nothing
pub const NO_RESULTS_MESSAGE: &str = "No good DuckDuckGo Search Result was found";

/// A validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub region: String,
}

impl SearchRequest {
    /// Build a request, rejecting regions outside the supported set
    pub fn new(query: impl Into<String>, region: impl Into<String>) -> Result<Self, PluginError> {
        let region = region.into();
        if !is_supported_region(&region) {
            return Err(PluginError::invalid(
                "region",
                format!("unsupported region code {:?}", region),
            ));
        }

        Ok(Self {
            query: query.into(),
            region,
        })
    }

    /// Build a request from host-supplied keyword arguments
    pub fn from_kwargs(
        kwargs: &Map<String, Value>,
        default_region: &str,
    ) -> Result<Self, PluginError> {
        let query = match kwargs.get("query") {
            Some(Value::String(q)) => q.clone(),
            Some(other) => {
                return Err(PluginError::invalid(
                    "query",
                    format!("expected a string, got {}", other),
                ))
            }
            None => return Err(PluginError::MissingArgument("query".to_string())),
        };

        let region = match kwargs.get("region") {
            Some(Value::String(r)) => r.clone(),
            None | Some(Value::Null) => default_region.to_string(),
            Some(other) => {
                return Err(PluginError::invalid(
                    "region",
                    format!("expected a string, got {}", other),
                ))
            }
        };

        Self::new(query, region)
    }
}

/// A result reshaped for the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedResult {
    pub snippet: String,
    pub title: String,
    pub link: String,
}

impl From<RawResult> for NormalizedResult {
    fn from(raw: RawResult) -> Self {
        Self {
            snippet: raw.body.unwrap_or_default(),
            title: raw.title.unwrap_or_default(),
            link: raw.href.unwrap_or_default(),
        }
    }
}

/// What the plugin hands back to the host
///
/// Serializes as `{"Result": "..."}` or `{"result": [...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchResponse {
    #[serde(rename = "Result")]
    Message(String),
    #[serde(rename = "result")]
    Results(Vec<NormalizedResult>),
}

impl SearchResponse {
    pub fn rate_limited() -> Self {
        SearchResponse::Message(RATE_LIMIT_MESSAGE.to_string())
    }

    /// Normalize provider records, or the no-results message when empty
    pub fn from_raw(results: Vec<RawResult>) -> Self {
        if results.is_empty() {
            return SearchResponse::Message(NO_RESULTS_MESSAGE.to_string());
        }
        SearchResponse::Results(results.into_iter().map(NormalizedResult::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn kwargs(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_from_kwargs_defaults_region() {
        let request = SearchRequest::from_kwargs(&kwargs(json!({"query": "rust"})), "wt-wt").unwrap();
        assert_eq!(request.query, "rust");
        assert_eq!(request.region, "wt-wt");

        let request =
            SearchRequest::from_kwargs(&kwargs(json!({"query": "rust", "region": null})), "wt-wt")
                .unwrap();
        assert_eq!(request.region, "wt-wt");
    }

    #[test]
    fn test_from_kwargs_missing_query() {
        let err = SearchRequest::from_kwargs(&kwargs(json!({"region": "us-en"})), "wt-wt")
            .unwrap_err();
        assert!(matches!(err, PluginError::MissingArgument(ref name) if name == "query"));
    }

    #[test]
    fn test_from_kwargs_rejects_bad_values() {
        let err = SearchRequest::from_kwargs(&kwargs(json!({"query": 42})), "wt-wt").unwrap_err();
        assert!(matches!(err, PluginError::InvalidArgument { ref name, .. } if name == "query"));

        let err = SearchRequest::from_kwargs(
            &kwargs(json!({"query": "rust", "region": "xx-xx"})),
            "wt-wt",
        )
        .unwrap_err();
        assert!(matches!(err, PluginError::InvalidArgument { ref name, .. } if name == "region"));
    }

    #[test]
    fn test_normalize_empty_record() {
        let normalized = NormalizedResult::from(RawResult::default());
        assert_eq!(
            serde_json::to_value(normalized).unwrap(),
            json!({"snippet": "", "title": "", "link": ""})
        );
    }

    #[test]
    fn test_normalize_maps_fields() {
        let normalized = NormalizedResult::from(RawResult::new("Rust", "https://rust-lang.org", "fast"));
        assert_eq!(normalized.snippet, "fast");
        assert_eq!(normalized.title, "Rust");
        assert_eq!(normalized.link, "https://rust-lang.org");
    }

    #[test]
    fn test_response_shape() {
        let empty = serde_json::to_value(SearchResponse::from_raw(vec![])).unwrap();
        assert_eq!(empty, json!({"Result": NO_RESULTS_MESSAGE}));

        let limited = serde_json::to_value(SearchResponse::rate_limited()).unwrap();
        assert_eq!(limited, json!({"Result": RATE_LIMIT_MESSAGE}));

        let found = serde_json::to_value(SearchResponse::from_raw(vec![RawResult::new(
            "t", "l", "s",
        )]))
        .unwrap();
        assert_eq!(
            found,
            json!({"result": [{"snippet": "s", "title": "t", "link": "l"}]})
        );
    }
}
