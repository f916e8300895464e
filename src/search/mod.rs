//! Search orchestration module
//!
//! Runs a provider query behind a fixed delay and a bounded retry loop,
//! then shapes the results for the caller.

mod executor;
mod models;
mod retry;

pub use executor::SearchExecutor;
pub use models::*;
pub use retry::RetryPolicy;
