//! MCP Server implementation and lifecycle management.
//!
//! This module contains the main server handler that implements the MCP
//! protocol by delegating to domain-specific services.
//!
//! Tool calls go through the [`Dispatcher`], which answers every call with a
//! response envelope. The protocol layer never sees a tool error, so an
//! unknown tool name is reported the same way as a missing template.

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler, model::*, service::RequestContext,
};
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, instrument};

use super::config::Config;
use crate::domains::{
    resources::{ResourceError, ResourceService},
    templates::TemplateCatalog,
    tools::{Dispatcher, ToolRegistry},
};

/// The main MCP server handler.
///
/// This struct implements the `ServerHandler` trait from rmcp and coordinates
/// between different domain services to handle MCP protocol messages.
#[derive(Clone)]
pub struct McpServer {
    /// Server configuration.
    config: Arc<Config>,

    /// Tool dispatcher shared with every transport.
    dispatcher: Dispatcher,

    /// Service for handling resource-related requests.
    resource_service: Arc<ResourceService>,
}

impl McpServer {
    /// Create a new MCP server with the given configuration.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);

        let catalog = Arc::new(TemplateCatalog::from_config(
            &config.templates,
            &config.security,
        ));
        let dispatcher = Dispatcher::new(Arc::new(ToolRegistry::new(catalog.clone())));
        let resource_service = Arc::new(ResourceService::new(catalog));

        Self {
            config,
            dispatcher,
            resource_service,
        }
    }

    /// Get the server name.
    pub fn name(&self) -> &str {
        &self.config.server.name
    }

    /// Get the server version.
    pub fn version(&self) -> &str {
        &self.config.server.version
    }

    /// Usage instructions advertised during initialization.
    pub fn instructions(&self) -> String {
        format!(
            "Development record templates. Call get_template_list to discover templates, \
then get_template_detail with one of the returned templateName values to fetch its content. \
Save filled-in records under '{}'.",
            self.config.templates.record_dir.display()
        )
    }

    // ========================================================================
    // HTTP Transport Support Methods
    // ========================================================================

    /// All tools as JSON (for HTTP transport).
    pub fn tool_listing_json(&self) -> Vec<Value> {
        self.dispatcher
            .list_tools()
            .into_iter()
            .map(|t| {
                json!({
                    "name": t.name,
                    "description": t.description,
                    "inputSchema": t.input_schema
                })
            })
            .collect()
    }

    /// Dispatch a tool call (for HTTP transport).
    ///
    /// Anything other than a JSON object counts as an empty argument bundle.
    pub async fn dispatch_tool(&self, name: &str, arguments: Option<Value>) -> CallToolResult {
        let arguments = match arguments {
            Some(Value::Object(map)) => Some(map),
            _ => None,
        };
        self.dispatcher.call_tool(name, arguments).await
    }

    /// All template resources as JSON (for HTTP transport).
    pub async fn resource_listing_json(&self) -> Result<Vec<Value>, McpError> {
        let resources = self
            .resource_service
            .list_resources()
            .await
            .map_err(resource_error)?;

        Ok(resources
            .into_iter()
            .map(|r| {
                json!({
                    "uri": r.raw.uri,
                    "name": r.raw.name,
                    "description": r.raw.description,
                    "mimeType": r.raw.mime_type
                })
            })
            .collect())
    }

    /// All resource templates as JSON (for HTTP transport).
    pub async fn resource_templates_json(&self) -> Vec<Value> {
        self.resource_service
            .list_resource_templates()
            .await
            .into_iter()
            .map(|t| {
                json!({
                    "uriTemplate": t.raw.uri_template,
                    "name": t.raw.name,
                    "title": t.raw.title,
                    "description": t.raw.description,
                    "mimeType": t.raw.mime_type
                })
            })
            .collect()
    }

    /// Read a template resource as JSON (for HTTP transport).
    pub async fn read_resource_json(&self, uri: &str) -> Result<Value, McpError> {
        let result = self
            .resource_service
            .read_resource(uri)
            .await
            .map_err(resource_error)?;
        Ok(json!({ "contents": result.contents }))
    }
}

/// Map a resource failure onto the matching protocol error.
fn resource_error(e: ResourceError) -> McpError {
    if e.is_not_found() {
        McpError::resource_not_found(e.to_string(), None)
    } else if e.is_invalid_request() {
        McpError::invalid_params(e.to_string(), None)
    } else {
        McpError::internal_error(e.to_string(), None)
    }
}

impl ServerHandler for McpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(self.instructions()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: self.config.server.name.clone(),
                version: self.config.server.version.clone(),
                ..Implementation::from_build_env()
            },
            ..Default::default()
        }
    }

    #[instrument(skip(self, _context))]
    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, McpError> {
        info!("Listing tools");
        Ok(ListToolsResult {
            tools: self.dispatcher.list_tools(),
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, request, _context), fields(tool = %request.name))]
    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        Ok(self
            .dispatcher
            .call_tool(&request.name, request.arguments)
            .await)
    }

    #[instrument(skip(self, _context))]
    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        info!("Listing resources");
        let resources = self
            .resource_service
            .list_resources()
            .await
            .map_err(resource_error)?;
        Ok(ListResourcesResult {
            resources,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        info!("Listing resource templates");
        let templates = self.resource_service.list_resource_templates().await;
        Ok(ListResourceTemplatesResult {
            resource_templates: templates,
            next_cursor: None,
            meta: None,
        })
    }

    #[instrument(skip(self, _context))]
    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        info!("Reading resource: {}", request.uri);
        self.resource_service
            .read_resource(&request.uri)
            .await
            .map_err(resource_error)
    }
}
