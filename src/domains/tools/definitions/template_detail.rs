//! Template detail tool definition.
//!
//! Returns the full text of one template, looked up by the `templateName`
//! reported by the list tool.

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

use crate::domains::templates::TemplateCatalog;
use crate::domains::tools::contract::{Contract, FieldKind, FieldSpec};
use crate::domains::tools::error::{ToolError, ToolResult};
use crate::domains::tools::handlers::{ToolHandler, parse_params, to_payload};

// ============================================================================
// Tool Parameters
// ============================================================================

/// Parameters for the template detail tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetTemplateDetailParams {
    /// 模板文件名（不包含扩展名），必须使用 get_template_list 返回的 templates 中的 templateName
    pub template_name: String,
}

/// Success payload of the template detail tool.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDetailPayload {
    pub template_name: String,
    pub content: String,
    pub description: String,
    pub message: String,
}

const FIELDS: &[FieldSpec] = &[FieldSpec::required("templateName", FieldKind::String)
    .non_empty()
    .with_hint("call get_template_list first and use one of the returned templateName values")];

// ============================================================================
// Tool Definition
// ============================================================================

/// Template detail tool - reads one template verbatim.
pub struct GetTemplateDetailTool {
    catalog: Arc<TemplateCatalog>,
}

impl GetTemplateDetailTool {
    /// Tool name as registered in MCP.
    pub const NAME: &'static str = "get_template_detail";

    /// Tool description shown to clients.
    pub const DESCRIPTION: &'static str = "获取指定模板的详细内容。templateName 参数必须使用 get_template_list 返回的 templates 中的 templateName 值。\
这确保了参数的准确性和一致性。返回模板的完整内容，可用于创建新的开发记录文档。\
如果模板不存在，会返回明确的错误信息。";

    /// Requires a non-empty `templateName`.
    pub const CONTRACT: Contract = Contract::new(FIELDS);

    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        Self { catalog }
    }

    /// Execute the tool logic.
    #[instrument(skip_all, fields(template = %params.template_name))]
    pub async fn execute(&self, params: GetTemplateDetailParams) -> ToolResult<TemplateDetailPayload> {
        info!("Template detail tool called for: {}", params.template_name);

        let content = self
            .catalog
            .get(&params.template_name)
            .await
            .map_err(|e| ToolError::from_catalog(Self::NAME, "get template detail", e))?;

        info!(
            "Read template {} ({} bytes)",
            params.template_name,
            content.len()
        );

        Ok(TemplateDetailPayload {
            description: self.catalog.describe(&params.template_name).to_string(),
            message: format!(
                "Successfully retrieved template '{}'",
                params.template_name
            ),
            template_name: params.template_name,
            content,
        })
    }
}

#[async_trait]
impl ToolHandler for GetTemplateDetailTool {
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
        cached_schema_for_type::<GetTemplateDetailParams>()
    }

    async fn call(&self, arguments: JsonObject) -> ToolResult<Value> {
        let params = parse_params(Self::NAME, arguments)?;
        to_payload(&self.execute(params).await?)
    }
}

// ============================================================================
// Tests
// ============================================================================
