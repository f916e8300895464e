//! HTTP networking module
//!
//! Provides the HTTP client used by the search providers.

mod client;
mod user_agent;

pub use client::HttpClient;
