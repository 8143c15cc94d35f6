//! Template catalog implementation.
//!
//! The catalog is the only component that knows where templates live on
//! disk. Listings and reads go to the filesystem on every call; nothing is
//! cached, so templates added or removed while the server runs are picked
//! up by the next request.

use serde::{Deserialize, Serialize};
use std::io;
use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, instrument, warn};

use super::descriptions::DescriptionTable;
use super::error::{CatalogError, CatalogResult};
use crate::core::config::{SecurityConfig, TemplatesConfig};
use crate::core::security::{ensure_within_root, validate_file_stem};

/// Default extension of template files, without the leading dot.
pub const DEFAULT_EXTENSION: &str = "md";

/// Metadata describing one template in a listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateMetadata {
    /// Filename without the template extension; the key for `get`.
    pub template_name: String,

    /// Filename on disk.
    pub filename: String,

    /// Curated or fallback description.
    pub description: String,
}

/// Read-only view over a directory of template files.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    root: PathBuf,
    extension: String,
    descriptions: DescriptionTable,
    allow_symlinks: bool,
}

impl TemplateCatalog {
    /// Create a catalog over `root` using the default `.md` extension.
    pub fn new(root: impl Into<PathBuf>, descriptions: DescriptionTable) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
            descriptions,
            allow_symlinks: false,
        }
    }

    /// Create a catalog from the server configuration.
    pub fn from_config(templates: &TemplatesConfig, security: &SecurityConfig) -> Self {
        Self::new(&templates.template_dir, templates.descriptions.clone())
            .with_extension(&templates.extension)
            .allow_symlinks(security.allow_symlinks)
    }

    /// Use a different template extension (leading dot optional).
    pub fn with_extension(mut self, extension: impl AsRef<str>) -> Self {
        self.extension = extension.as_ref().trim_start_matches('.').to_string();
        self
    }

    /// Allow template files that resolve outside the template directory.
    pub fn allow_symlinks(mut self, allow: bool) -> Self {
        self.allow_symlinks = allow;
        self
    }

    /// Description for a template name (curated or fallback).
    pub fn describe(&self, template_name: &str) -> &str {
        self.descriptions.describe(template_name)
    }

    /// List all templates in the directory, sorted by filename.
    ///
    /// Only regular files (symlinks are followed) whose name ends with the
    /// template extension are included. Unless symlinks are allowed, files
    /// resolving outside the root are left out, so every listed name can be
    /// read with [`Self::get`]. An empty directory yields an empty list.
    #[instrument(skip(self), fields(root = %self.root.display()))]
    pub async fn list(&self) -> CatalogResult<Vec<TemplateMetadata>> {
        let list_failed = |source: io::Error| CatalogError::ListFailed {
            path: self.root.clone(),
            source,
        };

        let mut entries = fs::read_dir(&self.root).await.map_err(list_failed)?;
        let mut templates = Vec::new();

        while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
            let file_name = entry.file_name();
            let Some(filename) = file_name.to_str() else {
                warn!("Skipping entry with non UTF-8 name: {:?}", file_name);
                continue;
            };

            let Some(template_name) = self.template_name_for(filename) else {
                continue;
            };

            // Only list what `get` will serve.
            if validate_file_stem(template_name).is_err() {
                debug!("Skipping entry with unusable name: {}", filename);
                continue;
            }

            match fs::metadata(entry.path()).await {
                Ok(metadata) if metadata.is_file() => {}
                Ok(_) => {
                    debug!("Skipping non-file entry: {}", filename);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping unreadable entry {}: {}", filename, e);
                    continue;
                }
            }

            if !self.allow_symlinks {
                if let Err(e) = ensure_within_root(&entry.path(), &self.root).await {
                    warn!("Skipping {}: {}", filename, e);
                    continue;
                }
            }

            templates.push(TemplateMetadata {
                template_name: template_name.to_string(),
                filename: filename.to_string(),
                description: self.describe(template_name).to_string(),
            });
        }

        templates.sort_by(|a, b| a.filename.cmp(&b.filename));

        debug!("Found {} templates", templates.len());
        Ok(templates)
    }

    /// Read the full text of a template, verbatim.
    #[instrument(skip(self))]
    pub async fn get(&self, template_name: &str) -> CatalogResult<String> {
        validate_file_stem(template_name).map_err(|source| CatalogError::InvalidName {
            name: template_name.to_string(),
            source,
        })?;

        let path = self.template_path(template_name);

        match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => {}
            Ok(_) => return Err(CatalogError::not_found(template_name, path)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CatalogError::not_found(template_name, path));
            }
            Err(source) => return Err(CatalogError::ReadFailed { path, source }),
        }

        if !self.allow_symlinks {
            ensure_within_root(&path, &self.root)
                .await
                .map_err(|source| CatalogError::AccessDenied {
                    name: template_name.to_string(),
                    source,
                })?;
        }

        fs::read_to_string(&path).await.map_err(|source| {
            if source.kind() == io::ErrorKind::NotFound {
                CatalogError::not_found(template_name, path.clone())
            } else {
                CatalogError::ReadFailed {
                    path: path.clone(),
                    source,
                }
            }
        })
    }

    /// Path a template with this name would have on disk.
    pub fn template_path(&self, template_name: &str) -> PathBuf {
        self.root
            .join(format!("{}.{}", template_name, self.extension))
    }

    /// Template name for a filename, if it carries the template extension.
    fn template_name_for<'a>(&self, filename: &'a str) -> Option<&'a str> {
        let stem = filename
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        (!stem.is_empty()).then_some(stem)
    }
}
