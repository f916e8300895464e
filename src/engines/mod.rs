//! Search provider module
//!
//! Defines the SearchProvider trait and the DuckDuckGo implementation.

mod traits;

pub mod duckduckgo;

pub use duckduckgo::DuckDuckGo;
pub use traits::*;
