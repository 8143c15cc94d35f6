//! Human-readable descriptions attached to templates in listings.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Description used for templates without a curated entry.
pub const FALLBACK_DESCRIPTION: &str = "通用记录模板";

/// Immutable mapping from template name to description.
///
/// Unknown names resolve to the fallback string rather than failing, so a
/// template dropped into the directory is listed immediately.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptionTable {
    /// Curated descriptions keyed by template name.
    entries: BTreeMap<String, String>,

    /// Description returned for names missing from `entries`.
    fallback: String,
}

impl DescriptionTable {
    /// Create a table from explicit entries and a fallback.
    pub fn new<I, K, V>(entries: I, fallback: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            fallback: fallback.into(),
        }
    }

    /// Description for `template_name`, or the fallback.
    pub fn describe(&self, template_name: &str) -> &str {
        self.entries
            .get(template_name)
            .map(String::as_str)
            .unwrap_or(&self.fallback)
    }
}

impl Default for DescriptionTable {
    fn default() -> Self {
        Self::new(
            [
                (
                    "meeting-record",
                    "会议记录模板 - 用于记录会议内容、决策和行动项",
                ),
                (
                    "project-summary",
                    "项目总结模板 - 用于总结项目进展、问题和计划",
                ),
                ("learning-notes", "学习笔记模板 - 用于记录学习内容和心得体会"),
                ("daily-standup", "每日站会模板 - 用于记录团队每日站会内容"),
            ],
            FALLBACK_DESCRIPTION,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_curated_entries() {
        let table = DescriptionTable::default();
        assert_eq!(
            table.describe("meeting-record"),
            "会议记录模板 - 用于记录会议内容、决策和行动项"
        );
        assert_eq!(
            table.describe("daily-standup"),
            "每日站会模板 - 用于记录团队每日站会内容"
        );
    }

    #[test]
    fn test_unknown_name_falls_back() {
        let table = DescriptionTable::default();
        assert_eq!(table.describe("retro"), FALLBACK_DESCRIPTION);
    }

    #[test]
    fn test_injected_table() {
        let table = DescriptionTable::new([("retro", "Retrospective")], "other");
        assert_eq!(table.describe("retro"), "Retrospective");
        assert_eq!(table.describe("meeting-record"), "other");
    }

    #[test]
    fn test_deserialize_from_json() {
        let table: DescriptionTable = serde_json::from_value(serde_json::json!({
            "entries": { "retro": "Retrospective" },
            "fallback": "generic"
        }))
        .unwrap();
        assert_eq!(table.describe("retro"), "Retrospective");
        assert_eq!(table.describe("x"), "generic");
    }
}
