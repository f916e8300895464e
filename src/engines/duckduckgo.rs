//! DuckDuckGo HTML search provider

use super::traits::*;
use crate::config::SafeSearch;
use crate::locales::accept_language_for;
use crate::network::HttpClient;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashMap;
use tracing::debug;
use url::Url;

const HTML_URL: &str = "https://html.duckduckgo.com/html/";

static RESULT_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("div.result"));
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| selector("a.result__a"));
static SNIPPET_SELECTOR: Lazy<Selector> = Lazy::new(|| selector(".result__snippet"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// DuckDuckGo web search through the HTML endpoint
#[derive(Clone)]
pub struct DuckDuckGo {
    client: HttpClient,
    html_url: String,
}

impl DuckDuckGo {
    pub fn new(client: HttpClient) -> Self {
        Self::with_url(client, HTML_URL)
    }

    /// Point the provider at a different endpoint
    pub fn with_url(client: HttpClient, html_url: impl Into<String>) -> Self {
        Self {
            client,
            html_url: html_url.into(),
        }
    }

    fn request(&self, query: &str, region: &str, safesearch: SafeSearch) -> EngineRequest {
        let mut form_data = HashMap::new();
        form_data.insert("q".to_string(), query.to_string());
        form_data.insert("b".to_string(), String::new());
        form_data.insert("kl".to_string(), region.to_string());
        form_data.insert("kp".to_string(), safesearch_param(safesearch).to_string());

        EngineRequest::post(&self.html_url)
            .header("Accept-Language", accept_language_for(region))
            .header("Referer", "https://html.duckduckgo.com/")
            .form(form_data)
    }

    fn response(
        &self,
        response: EngineResponse,
        max_results: usize,
    ) -> Result<Vec<RawResult>, ProviderError> {
        // DuckDuckGo answers 202 instead of a result page when throttling
        if response.status == 202 || response.status == 403 || response.is_rate_limited() {
            return Err(ProviderError::RateLimited(format!(
                "{} returned status {}",
                response.url, response.status
            )));
        }
        if !response.is_success() {
            return Err(ProviderError::Search(format!(
                "HTTP error: {}",
                response.status
            )));
        }
        if response.is_captcha() {
            return Err(ProviderError::RateLimited(
                "bot challenge page returned".to_string(),
            ));
        }

        Ok(parse_html_results(&response.text, max_results))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGo {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn text(
        &self,
        query: &str,
        region: &str,
        safesearch: SafeSearch,
        max_results: usize,
    ) -> Result<Vec<RawResult>, ProviderError> {
        let request = self.request(query, region, safesearch);
        let response = self
            .client
            .execute(request)
            .await
            .map_err(classify_transport_error)?;

        let results = self.response(response, max_results)?;
        debug!(
            "duckduckgo returned {} results for region {}",
            results.len(),
            region
        );
        Ok(results)
    }
}

/// `kp` form value for a safe-search level
fn safesearch_param(level: SafeSearch) -> &'static str {
    match level {
        SafeSearch::On => "1",
        SafeSearch::Moderate => "-1",
        SafeSearch::Off => "-2",
    }
}

/// Network failures are provider failures; anything else is unexpected
fn classify_transport_error(err: anyhow::Error) -> ProviderError {
    match err.downcast_ref::<reqwest::Error>() {
        Some(e) if e.is_timeout() => ProviderError::Timeout(e.to_string()),
        Some(e) => ProviderError::Search(e.to_string()),
        None => ProviderError::Other(err),
    }
}

fn parse_html_results(html: &str, max_results: usize) -> Vec<RawResult> {
    let document = Html::parse_document(html);
    let mut results = Vec::new();

    for element in document.select(&RESULT_SELECTOR) {
        if results.len() >= max_results {
            break;
        }

        // Sponsored entries
        if element
            .value()
            .classes()
            .any(|c| c == "result--ad" || c == "result--no-result")
        {
            continue;
        }

        let title_elem = match element.select(&TITLE_SELECTOR).next() {
            Some(t) => t,
            None => continue,
        };

        let title = normalize_text(&title_elem.text().collect::<String>());
        let href = title_elem
            .value()
            .attr("href")
            .and_then(resolve_href)
            .unwrap_or_default();

        if title.is_empty() || href.is_empty() {
            continue;
        }

        let body = element
            .select(&SNIPPET_SELECTOR)
            .next()
            .map(|s| normalize_text(&s.text().collect::<String>()))
            .unwrap_or_default();

        results.push(RawResult::new(title, href, body));
    }

    results
}

/// Unwrap `//duckduckgo.com/l/?uddg=<target>` redirect links
fn resolve_href(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{}", href)
    } else {
        href.to_string()
    };

    let url = Url::parse(&absolute).ok()?;
    let internal = url
        .host_str()
        .map(|h| h.ends_with("duckduckgo.com"))
        .unwrap_or(false);

    if !internal {
        return Some(absolute);
    }

    if url.path().starts_with("/l/") {
        return url
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned());
    }

    // Other internal links (ads, y.js) are not results
    None
}

fn normalize_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
