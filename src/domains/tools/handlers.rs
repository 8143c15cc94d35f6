//! Tool handler trait.
//!
//! Each tool in `definitions/` implements [`ToolHandler`]; the registry
//! stores them as trait objects and the dispatcher drives them.

use async_trait::async_trait;
use rmcp::model::{JsonObject, Tool};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;

use super::contract::Contract;
use super::error::{ToolError, ToolResult};

/// A tool that can be listed and invoked through the dispatcher.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Stable tool name.
    fn name(&self) -> &'static str;

    /// Description shown to clients.
    fn description(&self) -> &'static str;

    /// Constraints the dispatcher enforces before calling [`Self::call`].
    fn contract(&self) -> &Contract;

    /// JSON Schema advertised in `tools/list`.
    fn input_schema(&self) -> Arc<JsonObject>;

    /// Run the tool on arguments that already satisfy the contract,
    /// returning the success payload.
    async fn call(&self, arguments: JsonObject) -> ToolResult<Value>;

    /// Tool model for `tools/list`.
    fn to_tool(&self) -> Tool {
        Tool {
            name: self.name().into(),
            description: Some(self.description().into()),
            input_schema: self.input_schema(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Deserialize validated arguments into a tool's parameter type.
pub fn parse_params<P: DeserializeOwned>(tool: &str, arguments: JsonObject) -> ToolResult<P> {
    serde_json::from_value(Value::Object(arguments))
        .map_err(|e| ToolError::invalid_arguments(tool, [e]))
}

/// Serialize a payload for the envelope.
pub fn to_payload<T: Serialize>(payload: &T) -> ToolResult<Value> {
    serde_json::to_value(payload)
        .map_err(|e| ToolError::internal(format!("Failed to serialize payload: {}", e)))
}
