// src/exec/resolve.rs

//! Locating the worker executable and the launch artifact.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{FormctxError, Result};
use crate::fs::FileSystem;

/// External processing the worker executes; ships next to the launcher.
pub const ARTIFACT_FILE: &str = "FormContextCollector.epf";

/// Resolve the configured executable.
///
/// Anything that looks like a path (absolute, or containing a separator) must
/// exist as given. A bare name is looked up on `PATH`.
pub fn resolve_executable(fs: &dyn FileSystem, configured: &str) -> Result<PathBuf> {
    let candidate = Path::new(configured);

    if looks_like_path(candidate) {
        if fs.is_file(candidate) {
            return Ok(candidate.to_path_buf());
        }
        return Err(FormctxError::NotFound {
            what: "executable",
            path: candidate.to_path_buf(),
        });
    }

    let found = which::which(configured).map_err(|err| {
        debug!(name = configured, error = %err, "PATH lookup failed");
        FormctxError::NotOnPath {
            name: configured.to_string(),
        }
    })?;
    debug!(name = configured, path = %found.display(), "executable found on PATH");
    Ok(found)
}

/// Resolve the launch artifact: an explicit override, or [`ARTIFACT_FILE`]
/// inside `tool_dir`. It must exist either way.
pub fn resolve_artifact(
    fs: &dyn FileSystem,
    tool_dir: &Path,
    override_path: Option<&Path>,
) -> Result<PathBuf> {
    let path = match override_path {
        Some(p) => p.to_path_buf(),
        None => tool_dir.join(ARTIFACT_FILE),
    };

    if !fs.is_file(&path) {
        return Err(FormctxError::NotFound {
            what: "processing",
            path,
        });
    }
    Ok(path)
}

fn looks_like_path(p: &Path) -> bool {
    p.is_absolute() || p.components().count() > 1
}
