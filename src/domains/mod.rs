//! Domains module containing business logic organized by bounded contexts.
//!
//! - **templates**: the template catalog, independent of MCP
//! - **tools**: tool registry, dispatch and response envelopes
//! - **resources**: templates exposed as MCP resources

pub mod resources;
pub mod templates;
pub mod tools;
