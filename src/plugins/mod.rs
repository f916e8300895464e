//! Plugin surface exposed to the assistant host
//!
//! A plugin advertises its functions with `get_spec` and is invoked
//! through `execute` with the keyword arguments the model produced.

mod traits;

pub mod ddg_web_search;

pub use ddg_web_search::DdgWebSearchPlugin;
pub use traits::*;
