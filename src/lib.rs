//! DevRecord MCP Server Library
//!
//! A Model Context Protocol server that hands development record templates
//! to AI agents. Agents call `get_template_list` to discover the templates
//! in the template directory, then `get_template_detail` to fetch one.
//!
//! # Architecture
//!
//! - **core**: configuration, startup, the MCP server handler and transports
//! - **domains**: business logic organized by bounded contexts
//!   - **templates**: the template catalog and description table
//!   - **tools**: tool registry, argument contracts, dispatcher, envelopes
//!   - **resources**: templates exposed as readable MCP resources
//!
//! # Example
//!
//! ```rust,no_run
//! use devrecord_mcp_server::core::{Config, serve};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env();
//!     serve(config).await?;
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
