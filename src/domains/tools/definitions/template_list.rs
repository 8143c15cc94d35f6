//! Template list tool definition.
//!
//! Lists every template in the catalog with its name, filename and
//! description.

use async_trait::async_trait;
use rmcp::{
    handler::server::tool::cached_schema_for_type,
    model::JsonObject,
};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::domains::templates::{TemplateCatalog, TemplateMetadata};
use crate::domains::tools::contract::Contract;
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{ToolHandler, parse_params, to_payload};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the template list tool. Any supplied fields are ignored.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetTemplateListParams {}

/// Success payload of the template list tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateListPayload {
    pub templates: Vec<TemplateMetadata>,
    pub count: usize,
    pub message: String,
    pub usage: &'static str,
}

impl TemplateListPayload {
    fn new(templates: Vec<TemplateMetadata>) -> Self {
        Self {
            count: templates.len(),
            message: format!("Found {} available templates", templates.len()),
            usage: "Use the 'templateName' field from any template to call get_template_detail",
            templates,
        }
    }
}

// ============================================================================
// Tool Definition
// ============================================================================

/// Template list tool - enumerates the template catalog.
pub struct GetTemplateListTool {
    catalog: Arc<TemplateCatalog>,
}

impl GetTemplateListTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_template_list";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "获取可用的开发记录模板列表。返回包含模板名称、文件名和描述的结构化数据。\
返回的 templates 数组中每个模板都有 templateName 字段，这是后续调用 get_template_detail 时必需的参数。\
使用此工具来发现可用的模板，然后使用返回的 templateName 来获取具体模板内容。";

    /// Accepts any argument bundle.
    pub const CONTRACT: Contract = Contract::empty();

    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self { catalog }
    }

    /// Execute the tool logic.
    #[instrument(skip_all)]
    pub async fn execute(&self, _params: GetTemplateListParams) -> ToolResult<TemplateListPayload> {
        info!("Template list tool called");

        let templates = self
            .catalog
            .list()
            .await
            .map_err(|e| ToolError::from_catalog(Self::NAME, "get template list", e))?;

        info!("Listed {} templates", templates.len());
        Ok(TemplateListPayload::new(templates))
    }
}

#[async_trait]
impl ToolHandler for GetTemplateListTool {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn description(&self) -> &'static str {
        Self::DESCRIPTION
    }

    fn contract(&self) -> &Contract {
        &Self::CONTRACT
    }

    fn input_schema(&self) -> Arc<JsonObject> {
        cached_schema_for_type::<GetTemplateListParams>()
    }

    async fn call(&self, arguments: JsonObject) -> ToolResult<Value> {
        let params = parse_params(Self::NAME, arguments)?;
        to_payload(&self.execute(params).await?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::templates::DescriptionTable;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn tool(dir: &std::path::Path) -> GetTemplateListTool {
        GetTemplateListTool::new(Arc::new(TemplateCatalog::new(
            dir,
            DescriptionTable::default(),
        )))
    }

    #[tokio::test]
    async fn test_list_execute() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("meeting-record.md"), "# 会议").unwrap();
        fs::write(temp_dir.path().join("daily-standup.md"), "# 站会").unwrap();
        fs::write(temp_dir.path().join("readme.txt"), "skip").unwrap();

        let payload = tool(temp_dir.path())
            .execute(GetTemplateListParams::default())
            .await
            .unwrap();

        assert_eq!(payload.count, 2);
        assert_eq!(payload.message, "Found 2 available templates");
        assert_eq!(payload.templates[0].template_name, "daily-standup");
        assert_eq!(payload.templates[1].template_name, "meeting-record");
    }

    #[tokio::test]
    async fn test_list_payload_shape() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("learning-notes.md"), "").unwrap();

        let payload = tool(temp_dir.path())
            .call(JsonObject::new())
            .await
            .unwrap();

        assert_eq!(payload["count"], json!(1));
        assert_eq!(
            payload["templates"][0],
            json!({
                "templateName": "learning-notes",
                "filename": "learning-notes.md",
                "description": "学习笔记模板 - 用于记录学习内容和心得体会"
            })
        );
        assert!(payload["usage"].as_str().unwrap().contains("templateName"));
    }

    #[tokio::test]
    async fn test_list_ignores_irrelevant_arguments() {
        let temp_dir = TempDir::new().unwrap();
        let mut args = JsonObject::new();
        args.insert("dummy".to_string(), json!("ignored"));

        let payload = tool(temp_dir.path()).call(args).await.unwrap();
        assert_eq!(payload["count"], json!(0));
        assert_eq!(payload["templates"], json!([]));
    }

    #[tokio::test]
    async fn test_list_missing_directory_is_catalog_failure() {
        let temp_dir = TempDir::new().unwrap();
        let err = tool(&temp_dir.path().join("missing"))
            .execute(GetTemplateListParams::default())
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "catalog_failure");
    }

    #[test]
    fn test_schema_has_no_required_fields() {
        let schema = cached_schema_for_type::<GetTemplateListParams>();
        assert_eq!(schema.get("type"), Some(&json!("object")));
        let required = schema
            .get("required")
            .and_then(|r| r.as_array())
            .map(|r| r.len())
            .unwrap_or(0);
        assert_eq!(required, 0);
        assert_eq!(GetTemplateListTool::CONTRACT.required_fields().count(), 0);
    }
}
