//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file.

pub mod template_detail;
pub mod template_list;

pub use template_detail::{GetTemplateDetailParams, GetTemplateDetailTool, TemplateDetailPayload};
pub use template_list::{GetTemplateListParams, GetTemplateListTool, TemplateListPayload};
