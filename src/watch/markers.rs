// src/watch/markers.rs

//! Marker files written by the worker next to the descriptor.
//!
//! For `agent/task.json` the worker creates `agent/task.json.processing`
//! when it picks the task up, then `agent/task.json.completed` or
//! `agent/task.json.error` when it is done. The launcher only checks for
//! their presence.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::fs::FileSystem;

pub const PROCESSING_SUFFIX: &str = ".processing";
pub const COMPLETED_SUFFIX: &str = ".completed";
pub const ERROR_SUFFIX: &str = ".error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPaths {
    pub processing: PathBuf,
    pub completed: PathBuf,
    pub error: PathBuf,
}

impl MarkerPaths {
    pub fn for_descriptor(descriptor: &Path) -> Self {
        Self {
            processing: with_suffix(descriptor, PROCESSING_SUFFIX),
            completed: with_suffix(descriptor, COMPLETED_SUFFIX),
            error: with_suffix(descriptor, ERROR_SUFFIX),
        }
    }

    /// Check all three markers once.
    pub fn snapshot(&self, fs: &dyn FileSystem) -> MarkerSnapshot {
        MarkerSnapshot {
            processing: fs.exists(&self.processing),
            completed: fs.exists(&self.completed),
            error: fs.exists(&self.error),
        }
    }

    /// Markers currently present, for stale-marker diagnostics.
    pub fn existing(&self, fs: &dyn FileSystem) -> Vec<&Path> {
        [&self.processing, &self.completed, &self.error]
            .into_iter()
            .filter(|p| fs.exists(p))
            .map(PathBuf::as_path)
            .collect()
    }
}

/// Presence of each marker at one instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkerSnapshot {
    pub processing: bool,
    pub completed: bool,
    pub error: bool,
}

/// Append `suffix` to the full file name (`task.json` -> `task.json.error`).
fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}
