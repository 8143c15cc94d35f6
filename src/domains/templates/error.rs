//! Template catalog error types.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::core::security::PathSecurityError;

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors that can occur while listing or reading templates.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No template file exists for the requested name.
    #[error("Template '{name}' does not exist")]
    NotFound { name: String, path: PathBuf },

    /// The name cannot address a file inside the template directory.
    #[error("Invalid template name '{name}': {source}")]
    InvalidName {
        name: String,
        #[source]
        source: PathSecurityError,
    },

    /// The template file resolves outside the template directory.
    #[error("Access denied for template '{name}': {source}")]
    AccessDenied {
        name: String,
        #[source]
        source: PathSecurityError,
    },

    /// The template directory could not be enumerated.
    #[error("Cannot read template directory '{}': {source}", path.display())]
    ListFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A template file exists but could not be read as text.
    #[error("Cannot read template file '{}': {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CatalogError {
    pub fn not_found(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            name: name.into(),
            path: path.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// I/O failures may clear up on their own; a bad or missing name won't.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ListFailed { .. } | Self::ReadFailed { .. })
    }
}
