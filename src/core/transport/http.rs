//! HTTP transport implementation.
//!
//! Stateless JSON-RPC over POST. Every request is answered on its own, and
//! tool calls go through the same dispatcher as the STDIO session, so an
//! HTTP client gets identical envelopes.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use rmcp::{ErrorData as McpError, ServerHandler, model::ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, instrument, warn};

use super::{TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;

const JSONRPC_VERSION: &str = "2.0";

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// JSON-RPC request structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

/// JSON-RPC response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

impl JsonRpcResponse {
    /// Create a success response.
    pub fn success(id: Option<Value>, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// Create an error response.
    pub fn error(id: Option<Value>, error: McpError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }

    /// Serialize `result` into a success response.
    fn from_serialize(id: Option<Value>, result: impl Serialize) -> Self {
        match serde_json::to_value(result) {
            Ok(value) => Self::success(id, value),
            Err(e) => Self::error(id, McpError::internal_error(e.to_string(), None)),
        }
    }
}

/// Parameters of `tools/call`.
#[derive(Debug, Deserialize)]
struct ToolCallParams {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

/// Parameters of `resources/read`.
#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
struct AppState {
    server: McpServer,
    rpc_path: String,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.host, self.config.port)
    }

    /// Build the router serving `server`.
    pub fn router(&self, server: McpServer) -> Router {
        let state = AppState {
            server,
            rpc_path: self.config.rpc_path.clone(),
        };

        let router = Router::new()
            .route(&self.config.rpc_path, post(handle_rpc))
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(state)
            .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()));

        if self.config.enable_cors {
            router.layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            )
        } else {
            router
        }
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();
        let app = self.router(server);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        info!(
            "Ready - listening on {} (JSON-RPC over HTTP, CORS {})",
            addr,
            if self.config.enable_cors {
                "enabled"
            } else {
                "disabled"
            }
        );
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(TransportError::Http)
    }
}

/// Root handler - describes the endpoints.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "transport": "HTTP",
        "endpoints": {
            "rpc": state.rpc_path,
            "health": "/health"
        },
        "protocol": "JSON-RPC 2.0"
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Handle JSON-RPC requests.
#[instrument(skip_all, fields(method))]
async fn handle_rpc(State(state): State<AppState>, Json(request): Json<JsonRpcRequest>) -> Response {
    tracing::Span::current().record("method", request.method.as_str());

    if request.method.starts_with("notifications/") {
        info!("Received notification: {}", request.method);
        return StatusCode::ACCEPTED.into_response();
    }

    (StatusCode::OK, Json(process_request(&state.server, request).await)).into_response()
}

/// Process a JSON-RPC request and return the response.
async fn process_request(server: &McpServer, request: JsonRpcRequest) -> JsonRpcResponse {
    let JsonRpcRequest {
        jsonrpc,
        id,
        method,
        params,
    } = request;

    if jsonrpc != JSONRPC_VERSION {
        return JsonRpcResponse::error(
            id,
            McpError::invalid_request("jsonrpc must be \"2.0\"", None),
        );
    }

    match method.as_str() {
        "initialize" => JsonRpcResponse::from_serialize(id, server.get_info()),
        "ping" => JsonRpcResponse::success(id, json!({})),
        "tools/list" => JsonRpcResponse::success(id, json!({ "tools": server.tool_listing_json() })),
        "tools/call" => match parse_params::<ToolCallParams>(params) {
            Ok(call) => {
                let result = server.dispatch_tool(&call.name, call.arguments).await;
                JsonRpcResponse::from_serialize(id, result)
            }
            Err(e) => JsonRpcResponse::error(id, e),
        },
        "resources/list" => match server.resource_listing_json().await {
            Ok(resources) => JsonRpcResponse::success(id, json!({ "resources": resources })),
            Err(e) => JsonRpcResponse::error(id, e),
        },
        "resources/templates/list" => JsonRpcResponse::success(
            id,
            json!({ "resourceTemplates": server.resource_templates_json().await }),
        ),
        "resources/read" => {
            let result = match parse_params::<ReadResourceParams>(params) {
                Ok(read) => server.read_resource_json(&read.uri).await,
                Err(e) => Err(e),
            };
            match result {
                Ok(body) => JsonRpcResponse::success(id, body),
                Err(e) => JsonRpcResponse::error(id, e),
            }
        }
        _ => {
            warn!("Unknown method: {}", method);
            JsonRpcResponse::error(
                id,
                McpError::new(
                    ErrorCode::METHOD_NOT_FOUND,
                    format!("Method not found: {}", method),
                    None,
                ),
            )
        }
    }
}

fn parse_params<P: serde::de::DeserializeOwned>(params: Option<Value>) -> Result<P, McpError> {
    let params = params.ok_or_else(|| McpError::invalid_params("Missing params", None))?;
    serde_json::from_value(params).map_err(|e| McpError::invalid_params(e.to_string(), None))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use std::fs;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn router(dir: &std::path::Path) -> Router {
        let mut config = Config::new();
        config.templates.template_dir = dir.to_path_buf();
        config.templates.record_dir = dir.join("records");
        HttpTransport::new(HttpConfig::default()).router(McpServer::new(config))
    }

    async fn rpc(router: Router, method: &str, params: Value) -> Value {
        let body = json!({ "jsonrpc": "2.0", "id": 1, "method": method, "params": params });
        let request = Request::post("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn envelope_of(response: &Value) -> Value {
        let text = response["result"]["content"][0]["text"].as_str().unwrap();
        serde_json::from_str(text).unwrap()
    }

    #[tokio::test]
    async fn test_tools_list() {
        let temp_dir = TempDir::new().unwrap();
        let response = rpc(router(temp_dir.path()), "tools/list", json!({})).await;

        let tools = response["result"]["tools"].as_array().unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0]["name"], json!("get_template_list"));
    }

    #[tokio::test]
    async fn test_tools_call_uses_envelopes() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("meeting-record.md"), "# 会议").unwrap();

        let response = rpc(
            router(temp_dir.path()),
            "tools/call",
            json!({ "name": "get_template_list" }),
        )
        .await;
        assert_eq!(response["result"]["isError"], json!(false));
        assert_eq!(envelope_of(&response)["count"], json!(1));

        let response = rpc(
            router(temp_dir.path()),
            "tools/call",
            json!({ "name": "delete_everything", "arguments": {} }),
        )
        .await;
        assert!(response.get("error").is_none());
        assert_eq!(response["result"]["isError"], json!(true));
        assert_eq!(envelope_of(&response)["errorKind"], json!("unknown_tool"));
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let temp_dir = TempDir::new().unwrap();
        let response = rpc(router(temp_dir.path()), "tools/call", Value::Null).await;
        assert_eq!(
            response["error"]["code"],
            json!(ErrorCode::INVALID_PARAMS.0)
        );
    }

    #[tokio::test]
    async fn test_resources_read() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("daily-standup.md"), "# 站会").unwrap();

        let response = rpc(
            router(temp_dir.path()),
            "resources/read",
            json!({ "uri": "template://daily-standup" }),
        )
        .await;
        assert_eq!(response["result"]["contents"][0]["text"], json!("# 站会"));

        let response = rpc(
            router(temp_dir.path()),
            "resources/read",
            json!({ "uri": "template://missing" }),
        )
        .await;
        assert_eq!(
            response["error"]["code"],
            json!(ErrorCode::RESOURCE_NOT_FOUND.0)
        );
    }

    #[tokio::test]
    async fn test_initialize_and_unknown_method() {
        let temp_dir = TempDir::new().unwrap();

        let response = rpc(router(temp_dir.path()), "initialize", json!({})).await;
        assert_eq!(
            response["result"]["serverInfo"]["name"],
            json!("devrecord-server")
        );
        assert!(response["result"]["capabilities"]["tools"].is_object());

        let response = rpc(router(temp_dir.path()), "prompts/list", json!({})).await;
        assert_eq!(
            response["error"]["code"],
            json!(ErrorCode::METHOD_NOT_FOUND.0)
        );
    }

    #[tokio::test]
    async fn test_notification_accepted() {
        let temp_dir = TempDir::new().unwrap();
        let request = Request::post("/mcp")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            ))
            .unwrap();

        let response = router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::ACCEPTED);
    }

    #[tokio::test]
    async fn test_health() {
        let temp_dir = TempDir::new().unwrap();
        let request = Request::get("/health").body(Body::empty()).unwrap();

        let response = router(temp_dir.path()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], json!("healthy"));
    }
}
