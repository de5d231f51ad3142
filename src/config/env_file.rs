// src/config/env_file.rs

//! Environment layer of the Parameter Resolver.
//!
//! Values come from two places: an optional `.env` file and a snapshot of the
//! process environment taken once at startup. Process variables shadow file
//! values, the same way `dotenvy::dotenv()` refuses to override variables that
//! are already set. Nothing here writes to the process environment.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::errors::Result;

/// Immutable key/value view over the env file and process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvLayer {
    vars: HashMap<String, String>,
}

impl EnvLayer {
    /// Merge file values with process values; process values win.
    pub fn from_sources(
        file_vars: HashMap<String, String>,
        process_vars: HashMap<String, String>,
    ) -> Self {
        let mut vars = file_vars;
        vars.extend(process_vars);
        Self { vars }
    }

    /// Non-empty value for `key`, if any.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }
}

/// Parse a `KEY=VALUE` env file.
///
/// `#` comments and blank lines are ignored and surrounding quotes are
/// stripped. A missing file yields an empty map.
pub fn read_env_file(path: &Path) -> Result<HashMap<String, String>> {
    let iter = match dotenvy::from_path_iter(path) {
        Ok(iter) => iter,
        Err(err) if err.not_found() => {
            debug!(path = %path.display(), "no env file; skipping");
            return Ok(HashMap::new());
        }
        Err(err) => return Err(err.into()),
    };

    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item?;
        vars.insert(key, value);
    }
    debug!(path = %path.display(), count = vars.len(), "loaded env file");
    Ok(vars)
}
