//! Core module containing shared infrastructure components.
//!
//! Configuration, startup, the MCP server handler and the transports. The
//! template and tool logic lives in [`crate::domains`].

pub mod config;
pub mod error;
pub mod security;
pub mod server;
pub mod startup;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use security::{PathSecurityError, ensure_within_root, validate_file_stem};
pub use server::McpServer;
pub use startup::{prepare_directories, serve};
pub use transport::{TransportConfig, TransportService};
