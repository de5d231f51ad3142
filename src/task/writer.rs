// src/task/writer.rs

//! Task Descriptor Writer: publishes the descriptor at its conventional path.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::info;

use crate::errors::Result;
use crate::fs::FileSystem;
use crate::task::descriptor::TaskDescriptor;

/// Subdirectory of the tool directory holding the descriptor.
pub const AGENT_DIR: &str = "agent";
/// Descriptor file name inside [`AGENT_DIR`].
pub const TASK_FILE: &str = "task.json";

/// `<tool-dir>/agent/task.json`, made absolute.
pub fn descriptor_path(tool_dir: &Path) -> Result<PathBuf> {
    let path = tool_dir.join(AGENT_DIR).join(TASK_FILE);
    Ok(std::path::absolute(path)?)
}

#[derive(Debug, Clone)]
pub struct DescriptorWriter {
    fs: Arc<dyn FileSystem>,
}

impl DescriptorWriter {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Serialize `descriptor` and publish it at `path`.
    ///
    /// The publish is atomic and durable, so the worker started right after
    /// this returns can never observe a partial file. Returns `path`.
    pub fn write(&self, descriptor: &TaskDescriptor, path: &Path) -> Result<PathBuf> {
        let bytes = descriptor.to_json_bytes()?;
        self.fs.publish(path, &bytes)?;
        info!(
            path = %path.display(),
            forms = descriptor.items.len(),
            "task descriptor written"
        );
        Ok(path.to_path_buf())
    }
}
