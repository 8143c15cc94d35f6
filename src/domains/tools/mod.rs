//! Tools domain module.
//!
//! This module handles everything between an incoming tool call and the
//! template catalog: the registry of tools, argument contracts, dispatch
//! and the response envelope.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual tool implementations (one file per tool)
//! - `contract.rs` - Data-described argument constraints and validator
//! - `dispatcher.rs` - Lookup, validation, invocation, envelope
//! - `envelope.rs` - Uniform success/failure response
//! - `handlers.rs` - The `ToolHandler` trait tools implement
//! - `registry.rs` - Ordered tool table
//! - `error.rs` - Dispatch error taxonomy
//!
//! ## Adding a New Tool
//!
//! 1. Create a new file in `definitions/` implementing `ToolHandler`
//! 2. Export it in `definitions/mod.rs`
//! 3. Add it to `ToolRegistry::new`
//!
//! Transports pick it up through the dispatcher; nothing else changes.

pub mod contract;
pub mod definitions;
mod dispatcher;
mod envelope;
mod error;
mod handlers;
mod registry;

pub use contract::{Contract, FieldKind, FieldSpec, Violation};
pub use dispatcher::Dispatcher;
pub use envelope::{LIST_SUGGESTION, ResponseEnvelope};
pub use error::{ToolError, ToolResult};
pub use handlers::{ToolHandler, parse_params, to_payload};
pub use registry::ToolRegistry;
