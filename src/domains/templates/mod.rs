//! Templates domain module.
//!
//! Owns the mapping from template names to files in the template directory.
//! Nothing here knows about MCP; the tools and resources domains build on
//! top of the catalog.
//!
//! ## Architecture
//!
//! - `catalog.rs` - Listing and reading templates
//! - `descriptions.rs` - Injectable name to description table
//! - `error.rs` - Catalog error types

mod catalog;
mod descriptions;
mod error;

pub use catalog::{DEFAULT_EXTENSION, TemplateCatalog, TemplateMetadata};
pub use descriptions::{DescriptionTable, FALLBACK_DESCRIPTION};
pub use error::{CatalogError, CatalogResult};
