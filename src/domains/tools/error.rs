//! Tool-specific error types.

use thiserror::Error;

use crate::domains::templates::CatalogError;

/// Result type for tool execution.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while dispatching a tool call.
///
/// Every variant is recovered at the dispatcher boundary and reported to
/// the caller as a failure envelope.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool with this name is registered.
    #[error("Unknown tool: {name}")]
    UnknownTool {
        name: String,
        available: Vec<&'static str>,
    },

    /// The argument bundle does not satisfy the tool's contract.
    #[error("Invalid arguments for {tool}: {}", violations.join("; "))]
    InvalidArguments {
        tool: String,
        violations: Vec<String>,
    },

    /// The requested template does not exist.
    #[error("Template '{template_name}' does not exist")]
    TemplateNotFound { template_name: String },

    /// The catalog failed for a reason other than a missing template.
    #[error("Failed to {operation}: {source}")]
    CatalogFailure {
        operation: &'static str,
        template_name: Option<String>,
        #[source]
        source: CatalogError,
    },

    /// The handler itself failed (panic or unserializable payload).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "unknown tool" error.
    pub fn unknown_tool(name: impl Into<String>, available: Vec<&'static str>) -> Self {
        Self::UnknownTool {
            name: name.into(),
            available,
        }
    }

    /// Create a new "invalid arguments" error.
    pub fn invalid_arguments<I, V>(tool: impl Into<String>, violations: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        Self::InvalidArguments {
            tool: tool.into(),
            violations: violations.into_iter().map(|v| v.to_string()).collect(),
        }
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Classify a catalog error raised while `tool` performed `operation`.
    ///
    /// Missing templates and unusable names keep their own categories so
    /// the caller can tell "wrong name" from "try again later".
    pub fn from_catalog(tool: &str, operation: &'static str, error: CatalogError) -> Self {
        match error {
            CatalogError::NotFound { name, .. } => Self::TemplateNotFound {
                template_name: name,
            },
            CatalogError::InvalidName { name, source } => Self::invalid_arguments(
                tool,
                [format!("templateName: '{}' is not a valid template name ({})", name, source)],
            ),
            CatalogError::AccessDenied { ref name, .. } => Self::CatalogFailure {
                operation,
                template_name: Some(name.clone()),
                source: error,
            },
            CatalogError::ListFailed { .. } => Self::CatalogFailure {
                operation,
                template_name: None,
                source: error,
            },
            CatalogError::ReadFailed { ref path, .. } => {
                let template_name = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .map(str::to_string);
                Self::CatalogFailure {
                    operation,
                    template_name,
                    source: error,
                }
            }
        }
    }

    /// Stable machine-readable category of this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownTool { .. } => "unknown_tool",
            Self::InvalidArguments { .. } => "invalid_arguments",
            Self::TemplateNotFound { .. } => "template_not_found",
            Self::CatalogFailure { .. } => "catalog_failure",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether repeating the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::CatalogFailure { source, .. } => source.is_retryable(),
            _ => false,
        }
    }
}
