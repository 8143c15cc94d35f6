//! Request dispatcher - routes tool calls through the registry.
//!
//! `dispatch` always returns exactly one [`ResponseEnvelope`]. Unknown
//! tools, contract violations, catalog failures and even handler panics
//! come back as failure envelopes; nothing escapes as a protocol error.

use futures::FutureExt;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use serde_json::Value;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::envelope::ResponseEnvelope;
use super::error::{ToolError, ToolResult};
use super::registry::ToolRegistry;

/// Dispatcher shared by every transport.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ToolRegistry>,
}

impl Dispatcher {
    pub fn new(registry: Arc<ToolRegistry>) -> Self {
        Self { registry }
    }

    /// Tool listing for discovery requests.
    pub fn list_tools(&self) -> Vec<Tool> {
        self.registry.get_all_tools()
    }

    /// Dispatch a call and wrap the outcome in an envelope.
    ///
    /// A missing argument bundle is treated as an empty one.
    #[instrument(skip(self, arguments))]
    pub async fn dispatch(&self, tool: &str, arguments: Option<JsonObject>) -> ResponseEnvelope {
        match self.try_dispatch(tool, arguments.unwrap_or_default()).await {
            Ok(payload) => {
                info!("Tool call succeeded");
                ResponseEnvelope::success(payload)
            }
            Err(e) => {
                warn!(kind = e.kind(), "Tool call failed: {}", e);
                ResponseEnvelope::failure(&e)
            }
        }
    }

    /// Dispatch a call and convert the envelope to an MCP result.
    pub async fn call_tool(&self, tool: &str, arguments: Option<JsonObject>) -> CallToolResult {
        self.dispatch(tool, arguments).await.into_call_result()
    }

    async fn try_dispatch(&self, tool: &str, arguments: JsonObject) -> ToolResult<Value> {
        let handler = self
            .registry
            .get(tool)
            .ok_or_else(|| ToolError::unknown_tool(tool, self.registry.tool_names()))?;

        handler
            .contract()
            .validate(&arguments)
            .map_err(|violations| ToolError::invalid_arguments(tool, violations))?;

        match AssertUnwindSafe(handler.call(arguments)).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => Err(ToolError::internal(format!(
                "tool '{}' panicked: {}",
                tool,
                panic_message(panic.as_ref())
            ))),
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(message) = panic.downcast_ref::<&str>() {
        message
    } else if let Some(message) = panic.downcast_ref::<String>() {
        message
    } else {
        "unknown panic"
    }
}
