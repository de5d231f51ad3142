// src/task/list.rs

//! Task List Builder: merges inline items and a line-delimited list file into
//! one ordered sequence of [`WorkItem`]s.
//!
//! Inline items come first, in the order given, followed by the surviving
//! lines of the file in file order.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{FormctxError, Result};
use crate::fs::FileSystem;
use crate::task::item::WorkItem;

/// Extract item lines from a list file body.
///
/// Each line is trimmed; blank lines and lines starting with `#` are skipped.
pub fn parse_list(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TaskListBuilder {
    inline: Vec<String>,
    file: Option<PathBuf>,
}

impl TaskListBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inline<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.inline.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.file = path.map(Into::into);
        self
    }

    /// Produce the final list.
    ///
    /// Fails with [`FormctxError::Config`] when the list file does not exist
    /// or when no item survives.
    pub fn build(&self, fs: &dyn FileSystem) -> Result<Vec<WorkItem>> {
        let mut items: Vec<WorkItem> = self
            .inline
            .iter()
            .filter_map(|raw| WorkItem::form_path(raw))
            .collect();

        if let Some(path) = &self.file {
            let lines = read_list_file(fs, path)?;
            debug!(path = %path.display(), count = lines.len(), "read items from list file");
            items.extend(lines.iter().filter_map(|line| WorkItem::form_path(line)));
        }

        if items.is_empty() {
            return Err(FormctxError::config(
                "no forms to process; pass --forms or --forms-file",
            ));
        }

        Ok(items)
    }
}

fn read_list_file(fs: &dyn FileSystem, path: &Path) -> Result<Vec<String>> {
    if !fs.is_file(path) {
        return Err(FormctxError::config(format!(
            "forms file not found: {}",
            path.display()
        )));
    }
    let contents = fs.read_to_string(path)?;
    Ok(parse_list(&contents))
}
