//! Transport error types.
//!
//! Every variant ends the transport. Problems inside a single call are
//! answered within the session and never show up here.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("cannot listen on {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The MCP handshake did not complete.
    #[error("session initialization failed: {0}")]
    Handshake(String),

    /// The session task ended abnormally.
    #[error("session aborted: {0}")]
    Session(String),

    #[error("HTTP server failed: {0}")]
    Http(#[source] std::io::Error),

    /// The shutdown signal handler could not be installed.
    #[error("cannot install shutdown handler: {0}")]
    Signal(#[source] std::io::Error),
}

impl TransportError {
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }
}
