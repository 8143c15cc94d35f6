//! Uniform response envelope for tool calls.
//!
//! Every dispatched call produces exactly one envelope, serialized as the
//! single text content item of the MCP `CallToolResult`:
//!
//! ```json
//! { "success": true, "templates": [...], "count": 2, "message": "..." }
//! { "success": false, "error": "Template 'x' does not exist", "message": "...", "templateName": "x", ... }
//! ```

use rmcp::model::{CallToolResult, Content, JsonObject};
use serde::Serialize;
use serde_json::{Value, json};

use super::error::ToolError;

/// Hint returned whenever the caller used a template name that is not in
/// the catalog.
pub const LIST_SUGGESTION: &str = "Use get_template_list to see available templates";

/// One-line summary shown next to `error`, the counterpart of the `message`
/// carried by success payloads.
fn failure_message(error: &ToolError) -> &'static str {
    match error {
        ToolError::UnknownTool { .. } => "Call one of the available tools",
        ToolError::InvalidArguments { .. } => "Fix the listed arguments and retry",
        ToolError::TemplateNotFound { .. } => "Template not found",
        ToolError::CatalogFailure { .. } => "The template source could not be read",
        ToolError::Internal(_) => "The server failed to handle the call",
    }
}

/// Outcome of a single tool call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    /// Whether the call succeeded.
    pub success: bool,

    /// Human-readable failure description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Payload on success, contextual fields on failure.
    #[serde(flatten)]
    pub fields: JsonObject,
}

impl ResponseEnvelope {
    /// Wrap a success payload. Object payloads are inlined; anything else
    /// lands under `data`.
    pub fn success(payload: Value) -> Self {
        let fields = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = JsonObject::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        Self {
            success: true,
            error: None,
            fields,
        }
    }

    /// Describe a failed call, with whatever context helps the caller fix
    /// the next request.
    pub fn failure(error: &ToolError) -> Self {
        let mut fields = JsonObject::new();
        fields.insert("errorKind".to_string(), json!(error.kind()));
        fields.insert("retryable".to_string(), json!(error.is_retryable()));
        fields.insert("message".to_string(), json!(failure_message(error)));

        match error {
            ToolError::UnknownTool { available, .. } => {
                fields.insert("availableTools".to_string(), json!(available));
            }
            ToolError::InvalidArguments { tool, violations } => {
                fields.insert("tool".to_string(), json!(tool));
                fields.insert("violations".to_string(), json!(violations));
            }
            ToolError::TemplateNotFound { template_name } => {
                fields.insert("templateName".to_string(), json!(template_name));
                fields.insert("suggestion".to_string(), json!(LIST_SUGGESTION));
            }
            ToolError::CatalogFailure {
                template_name: Some(name),
                ..
            } => {
                fields.insert("templateName".to_string(), json!(name));
            }
            ToolError::CatalogFailure {
                template_name: None,
                ..
            } => {
                fields.insert("templates".to_string(), json!([]));
            }
            ToolError::Internal(_) => {}
        }

        Self {
            success: false,
            error: Some(error.to_string()),
            fields,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Look up a payload or context field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Pretty-printed JSON text of the envelope.
    pub fn to_text(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|e| {
            // Only reachable with a non-string map key, which JsonObject rules out.
            format!(
                "{{\"success\": false, \"error\": \"Failed to serialize response: {}\"}}",
                e
            )
        })
    }

    /// Convert into the MCP result: one text item, `isError` on failure.
    pub fn into_call_result(self) -> CallToolResult {
        let content = vec![Content::text(self.to_text())];
        if self.success {
            CallToolResult::success(content)
        } else {
            CallToolResult::error(content)
        }
    }
}
