// src/task/descriptor.rs

//! The task descriptor handed to the worker, as stored in `agent/task.json`:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "mode": "agent",
//!   "forms": [ { "type": "form_path", "value": "Document.SalesOrder" } ],
//!   "options": { "include_invisible": false, "generate_markdown": true, ... }
//! }
//! ```
//!
//! Option field names are pinned by the worker, including the inverted
//! `close_after_collection` (the CLI exposes it as `--no-close`).

use serde::{Deserialize, Serialize};

use crate::errors::{FormctxError, Result};
use crate::task::item::WorkItem;

pub const SCHEMA_VERSION: &str = "1.0";
pub const AGENT_MODE: &str = "agent";

pub const DEFAULT_INCLUDE_INVISIBLE: bool = false;
pub const DEFAULT_GENERATE_MARKDOWN: bool = true;
// Older worker builds defaulted this to true; confirm against the deployed
// processing before flipping it.
pub const DEFAULT_GENERATE_JSON: bool = false;
pub const DEFAULT_MAX_DEPTH: u32 = 5;
pub const DEFAULT_CLOSE_AFTER_COLLECTION: bool = true;
pub const DEFAULT_WAIT_FORM_TIMEOUT_MS: u64 = 2000;
pub const DEFAULT_DEBUG_MODE: bool = false;

/// Flat option map controlling worker behaviour.
///
/// Missing fields deserialize to the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskOptions {
    pub include_invisible: bool,
    pub generate_markdown: bool,
    pub generate_json: bool,
    pub max_depth: u32,
    pub close_after_collection: bool,
    /// Per-form open timeout, in milliseconds.
    pub wait_form_timeout: u64,
    pub debug_mode: bool,
}

impl Default for TaskOptions {
    fn default() -> Self {
        Self {
            include_invisible: DEFAULT_INCLUDE_INVISIBLE,
            generate_markdown: DEFAULT_GENERATE_MARKDOWN,
            generate_json: DEFAULT_GENERATE_JSON,
            max_depth: DEFAULT_MAX_DEPTH,
            close_after_collection: DEFAULT_CLOSE_AFTER_COLLECTION,
            wait_form_timeout: DEFAULT_WAIT_FORM_TIMEOUT_MS,
            debug_mode: DEFAULT_DEBUG_MODE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDescriptor {
    pub version: String,
    pub mode: String,
    #[serde(rename = "forms")]
    pub items: Vec<WorkItem>,
    #[serde(default)]
    pub options: TaskOptions,
}

impl TaskDescriptor {
    /// Build an agent-mode descriptor. An empty item list is rejected.
    pub fn new(items: Vec<WorkItem>, options: TaskOptions) -> Result<Self> {
        if items.is_empty() {
            return Err(FormctxError::config("task descriptor has no forms"));
        }
        Ok(Self {
            version: SCHEMA_VERSION.to_string(),
            mode: AGENT_MODE.to_string(),
            items,
            options,
        })
    }

    /// Pretty JSON with a trailing newline; non-ASCII form names stay as UTF-8.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = serde_json::to_vec_pretty(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }
}
