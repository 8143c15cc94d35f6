//! Resource-specific error types.

use thiserror::Error;

use crate::domains::templates::CatalogError;

/// Errors that can occur during resource operations.
#[derive(Debug, Error)]
pub enum ResourceError {
    /// The resource URI does not address a template.
    #[error("Invalid URI: {0}")]
    InvalidUri(String),

    /// The catalog could not serve the resource.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ResourceError {
    /// Create a new "invalid URI" error.
    pub fn invalid_uri(uri: impl Into<String>) -> Self {
        Self::InvalidUri(uri.into())
    }

    /// Whether the addressed template does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Catalog(e) if e.is_not_found())
    }

    /// Whether the request itself was malformed.
    pub fn is_invalid_request(&self) -> bool {
        matches!(
            self,
            Self::InvalidUri(_) | Self::Catalog(CatalogError::InvalidName { .. })
        )
    }
}
