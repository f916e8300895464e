//! DuckDuckGo web search plugin

use super::traits::{FunctionSpec, Plugin, PluginHelper};
use crate::config::Settings;
use crate::engines::{DuckDuckGo, SearchProvider};
use crate::error::PluginError;
use crate::locales::REGIONS;
use crate::network::HttpClient;
use crate::search::{SearchExecutor, SearchRequest, SearchResponse};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Name of the single function this plugin exposes
pub const FUNCTION_NAME: &str = "web_search";

/// Searches the web for a query using DuckDuckGo
pub struct DdgWebSearchPlugin {
    executor: SearchExecutor,
    default_region: String,
}

impl DdgWebSearchPlugin {
    /// Create the plugin with the DuckDuckGo provider
    pub fn new(settings: &Settings) -> Result<Self, PluginError> {
        settings.validate()?;
        let client = HttpClient::with_settings(&settings.outgoing).map_err(PluginError::Client)?;
        Ok(Self::with_provider(
            Arc::new(DuckDuckGo::new(client)),
            settings,
        ))
    }

    /// Create the plugin from the settings file (if any) and environment
    pub fn from_env() -> Result<Self, PluginError> {
        let settings = crate::config::load()?;
        Self::new(&settings)
    }

    /// Create the plugin on top of any provider
    pub fn with_provider(provider: Arc<dyn SearchProvider>, settings: &Settings) -> Self {
        info!(
            "Web search plugin using {} (safesearch {})",
            provider.name(),
            settings.search.safesearch
        );
        Self {
            executor: SearchExecutor::new(provider, settings),
            default_region: settings.search.default_region.clone(),
        }
    }

    pub fn executor(&self) -> &SearchExecutor {
        &self.executor
    }

    /// Run a search, folding provider failures into soft messages
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, PluginError> {
        let results = match self
            .executor
            .perform_search(&request.query, &request.region)
            .await
        {
            Ok(results) => results,
            Err(e) if e.is_designated() => {
                warn!("Search for '{}' gave up: {}", request.query, e);
                return Ok(SearchResponse::rate_limited());
            }
            Err(e) => return Err(e.into()),
        };

        Ok(SearchResponse::from_raw(results))
    }
}

#[async_trait]
impl Plugin for DdgWebSearchPlugin {
    fn source_name(&self) -> &str {
        "DuckDuckGo"
    }

    fn get_spec(&self) -> Vec<FunctionSpec> {
        vec![FunctionSpec {
            name: FUNCTION_NAME.to_string(),
            description:
                "Execute a web search for the given query and return a list of results"
                    .to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "the user query"
                    },
                    "region": {
                        "type": "string",
                        "enum": REGIONS,
                        "description": "The region to use for the search. Infer this from the language used for the query. Default to `wt-wt` if not specified"
                    }
                },
                "required": ["query", "region"]
            }),
        }]
    }

    async fn execute(
        &self,
        _function_name: &str,
        _helper: &dyn PluginHelper,
        kwargs: &Map<String, Value>,
    ) -> Result<Value, PluginError> {
        let request = SearchRequest::from_kwargs(kwargs, &self.default_region)?;
        let response = self.search(&request).await?;
        Ok(serde_json::to_value(response)?)
    }
}
