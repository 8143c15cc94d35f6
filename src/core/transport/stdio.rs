//! STDIO transport: a single MCP session over stdin/stdout.
//!
//! Stdout carries protocol frames only; all logging goes to stderr.

use rmcp::ServiceExt;
use tracing::info;

use super::{TransportError, TransportResult};
use crate::core::McpServer;

pub struct StdioTransport;

impl StdioTransport {
    /// Serve until the client closes stdin.
    pub async fn run(server: McpServer) -> TransportResult<()> {
        let session = server
            .serve(rmcp::transport::stdio())
            .await
            .map_err(|e| TransportError::Handshake(e.to_string()))?;
        info!("Client connected over stdio");

        let reason = session
            .waiting()
            .await
            .map_err(|e| TransportError::Session(e.to_string()))?;

        info!("Stdio session closed ({:?})", reason);
        Ok(())
    }
}
