//! Resources domain module.
//!
//! Templates double as MCP resources so clients that browse resources can
//! read them without going through the tools.
//!
//! ## Architecture
//!
//! - `service.rs` - Listing and reading template resources
//! - `error.rs` - Resource error types

mod error;
mod service;

pub use error::ResourceError;
pub use service::{ResourceService, TEMPLATE_MIME_TYPE, TEMPLATE_URI_PREFIX};
