//! Resource service implementation.
//!
//! Exposes each template as a readable resource at
//! `template://{templateName}`. Listing and reading go through the same
//! catalog as the tools, so both views always agree.

use rmcp::model::{
    AnnotateAble, RawResource, RawResourceTemplate, ReadResourceResult, Resource,
    ResourceContents, ResourceTemplate,
};
use std::sync::Arc;
use tracing::info;

use super::error::ResourceError;
use crate::domains::templates::TemplateCatalog;

/// URI scheme prefix for template resources.
pub const TEMPLATE_URI_PREFIX: &str = "template://";

/// MIME type reported for template resources.
pub const TEMPLATE_MIME_TYPE: &str = "text/markdown";

/// Service for listing and reading template resources.
pub struct ResourceService {
    catalog: Arc<TemplateCatalog>,
}

impl ResourceService {
    /// Create a new ResourceService over the given catalog.
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        info!("Initializing ResourceService");
        Self { catalog }
    }

    /// Resource URI for a template name.
    pub fn template_uri(template_name: &str) -> String {
        format!("{}{}", TEMPLATE_URI_PREFIX, template_name)
    }

    /// Template name addressed by a resource URI.
    pub fn parse_template_uri(uri: &str) -> Result<&str, ResourceError> {
        match uri.strip_prefix(TEMPLATE_URI_PREFIX) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(ResourceError::invalid_uri(uri)),
        }
    }

    /// List one resource per template.
    pub async fn list_resources(&self) -> Result<Vec<Resource>, ResourceError> {
        let templates = self.catalog.list().await?;

        Ok(templates
            .into_iter()
            .map(|template| {
                let mut raw = RawResource::new(
                    Self::template_uri(&template.template_name),
                    template.template_name,
                );
                raw.description = Some(template.description);
                raw.mime_type = Some(TEMPLATE_MIME_TYPE.to_string());
                raw.no_annotation()
            })
            .collect())
    }

    /// List the URI template clients can fill in with any template name.
    pub async fn list_resource_templates(&self) -> Vec<ResourceTemplate> {
        vec![
            RawResourceTemplate {
                uri_template: format!("{}{{templateName}}", TEMPLATE_URI_PREFIX),
                name: "Development Record Templates".to_string(),
                title: Some("开发记录模板".to_string()),
                description: Some(
                    "Read a template by the templateName reported by get_template_list"
                        .to_string(),
                ),
                mime_type: Some(TEMPLATE_MIME_TYPE.to_string()),
            }
            .no_annotation(),
        ]
    }

    /// Read a template resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let template_name = Self::parse_template_uri(uri)?;
        let content = self.catalog.get(template_name).await?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(content, uri)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::templates::DescriptionTable;
    use std::fs;
    use tempfile::TempDir;

    fn service(dir: &std::path::Path) -> ResourceService {
        ResourceService::new(Arc::new(TemplateCatalog::new(
            dir,
            DescriptionTable::default(),
        )))
    }

    #[test]
    fn test_parse_template_uri() {
        assert_eq!(
            ResourceService::parse_template_uri("template://meeting-record").unwrap(),
            "meeting-record"
        );
        assert!(ResourceService::parse_template_uri("template://").is_err());
        assert!(ResourceService::parse_template_uri("file:///etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_list_resources_mirrors_catalog() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("meeting-record.md"), "# m").unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "skip").unwrap();

        let resources = service(temp_dir.path()).list_resources().await.unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].raw.uri, "template://meeting-record");
        assert_eq!(resources[0].raw.name, "meeting-record");
        assert_eq!(resources[0].raw.mime_type.as_deref(), Some("text/markdown"));
    }

    #[tokio::test]
    async fn test_read_existing_resource() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("daily-standup.md"), "# 站会\n").unwrap();

        let result = service(temp_dir.path())
            .read_resource("template://daily-standup")
            .await
            .unwrap();

        match &result.contents[0] {
            ResourceContents::TextResourceContents { text, uri, .. } => {
                assert_eq!(text, "# 站会\n");
                assert_eq!(uri, "template://daily-standup");
            }
            other => panic!("unexpected contents: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_read_nonexistent_resource() {
        let temp_dir = TempDir::new().unwrap();
        let err = service(temp_dir.path())
            .read_resource("template://missing")
            .await
            .unwrap_err();
        assert!(err.is_not_found());
        assert!(!err.is_invalid_request());
    }

    #[tokio::test]
    async fn test_read_rejects_foreign_and_traversal_uris() {
        let temp_dir = TempDir::new().unwrap();
        let service = service(temp_dir.path());

        for uri in ["file:///etc/passwd", "template://../secret", "template://"] {
            let err = service.read_resource(uri).await.unwrap_err();
            assert!(err.is_invalid_request(), "{uri} should be rejected");
        }
    }

    #[tokio::test]
    async fn test_resource_templates() {
        let temp_dir = TempDir::new().unwrap();
        let templates = service(temp_dir.path()).list_resource_templates().await;
        assert_eq!(templates.len(), 1);
        assert_eq!(templates[0].raw.uri_template, "template://{templateName}");
    }
}
