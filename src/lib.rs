//! DDG Web Search: a DuckDuckGo web search tool for assistant frameworks
//!
//! The [`DdgWebSearchPlugin`] advertises a `web_search` function to the
//! host and answers calls with at most three normalized results.

pub mod config;
pub mod engines;
pub mod error;
pub mod locales;
pub mod network;
pub mod plugins;
pub mod search;

pub use config::Settings;
pub use engines::{ProviderError, RawResult, SearchProvider};
pub use error::PluginError;
pub use plugins::{DdgWebSearchPlugin, Plugin};
pub use search::{NormalizedResult, SearchRequest, SearchResponse};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
