//! Tool Registry - the ordered table of invocable tools.
//!
//! This module provides:
//! - The fixed list of tools, in listing order
//! - Lookup by name for the dispatcher
//! - Tool metadata for `tools/list`

use std::sync::Arc;

use rmcp::model::Tool;

use super::definitions::{GetTemplateDetailTool, GetTemplateListTool};
use super::handlers::ToolHandler;
use crate::domains::templates::TemplateCatalog;

// ============================================================================
// Tool Registry
// ============================================================================

/// Tool registry - immutable after construction and shared read-only.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn ToolHandler>>,
}

impl ToolRegistry {
    /// Create the registry with all template tools bound to `catalog`.
    pub fn new(catalog: Arc<TemplateCatalog>) -> Self {
        let tools: Vec<Arc<dyn ToolHandler>> = vec![
            Arc::new(GetTemplateListTool::new(catalog.clone())),
            Arc::new(GetTemplateDetailTool::new(catalog)),
        ];
        Self::from_handlers(tools)
    }

    /// Create a registry from explicit handlers, kept in the given order.
    pub fn from_handlers(tools: Vec<Arc<dyn ToolHandler>>) -> Self {
        Self { tools }
    }

    /// Get all tool names, in listing order.
    pub fn tool_names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|t| t.name()).collect()
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ToolHandler>> {
        self.tools.iter().find(|t| t.name() == name)
    }

    /// Get all tools as Tool models (metadata).
    pub fn get_all_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(|t| t.to_tool()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::templates::DescriptionTable;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(Arc::new(TemplateCatalog::new(
            "templates",
            DescriptionTable::default(),
        )))
    }

    #[test]
    fn test_registry_tool_names() {
        let registry = registry();
        assert_eq!(
            registry.tool_names(),
            vec!["get_template_list", "get_template_detail"]
        );
    }

    #[test]
    fn test_registry_lookup() {
        let registry = registry();
        assert!(registry.get("get_template_detail").is_some());
        assert!(registry.get("GET_TEMPLATE_DETAIL").is_none());
        assert!(registry.get("unknown").is_none());
    }

    #[test]
    fn test_tool_models() {
        let tools = registry().get_all_tools();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].name, "get_template_list");
        assert!(tools[0].description.is_some());

        let detail_schema = &tools[1].input_schema;
        let required = detail_schema["required"].as_array().unwrap();
        assert!(required.iter().any(|v| v == "templateName"));
    }

    #[test]
    fn test_tool_names_unique() {
        let mut names = registry().tool_names();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 2);
    }
}
