//! Transport service - runs the server on the configured transport until
//! the transport ends or the process receives Ctrl-C.

use std::future::Future;
use tracing::{info, warn};

use super::{TransportConfig, TransportError, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - owns the transport choice for one server run.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Serve `server` on the configured transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!(
            "{} v{} using {}",
            server.name(),
            server.version(),
            self.config.description()
        );

        match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => until_shutdown(StdioTransport::run(server)).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => until_shutdown(TcpTransport::new(cfg).run(server)).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => {
                until_shutdown(HttpTransport::new(cfg).run(server)).await
            }
        }
    }
}

/// Drive `transport` to completion, stopping early on Ctrl-C.
async fn until_shutdown(transport: impl Future<Output = TransportResult<()>>) -> TransportResult<()> {
    tokio::select! {
        result = transport => {
            if let Err(e) = &result {
                warn!("Transport stopped: {}", e);
            }
            result
        }
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(TransportError::Signal)?;
            info!("Shutdown requested");
            Ok(())
        }
    }
}
