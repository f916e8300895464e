//! Plugin traits and types

use crate::error::PluginError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Description of one callable function, in JSON-Schema form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionSpec {
    /// Function name the host dispatches on
    pub name: String,
    /// Description shown to the model
    pub description: String,
    /// JSON Schema of the keyword arguments
    pub parameters: Value,
}

/// Host services handed to plugins on every call
pub trait PluginHelper: Send + Sync {}

impl PluginHelper for () {}

/// A tool plugin callable by the assistant host
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Name of the data source behind the plugin
    fn source_name(&self) -> &str;

    /// Functions this plugin exposes
    fn get_spec(&self) -> Vec<FunctionSpec>;

    /// Invoke a function with keyword arguments
    async fn execute(
        &self,
        function_name: &str,
        helper: &dyn PluginHelper,
        kwargs: &Map<String, Value>,
    ) -> Result<Value, PluginError>;
}
