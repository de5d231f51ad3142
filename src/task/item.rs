// src/task/item.rs

use serde::{Deserialize, Serialize};

/// What a [`WorkItem::value`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkItemKind {
    /// Metadata path of a form, e.g. `Document.SalesOrder.Form.ItemForm`.
    FormPath,
}

/// One unit of worker input, serialized as `{"type": "...", "value": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(rename = "type")]
    pub kind: WorkItemKind,
    pub value: String,
}

impl WorkItem {
    /// Wrap a raw source string as a form-path item.
    ///
    /// Returns `None` when the trimmed value is empty.
    pub fn form_path(raw: &str) -> Option<Self> {
        let value = raw.trim();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            kind: WorkItemKind::FormPath,
            value: value.to_string(),
        })
    }
}
