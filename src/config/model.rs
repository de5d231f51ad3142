// src/config/model.rs

use std::fmt;

use crate::task::TaskOptions;

/// Environment keys understood by the resolver.
pub mod keys {
    pub const EXECUTABLE: &str = "ONEC_EXECUTABLE";
    pub const INFOBASE_PATH: &str = "ONEC_INFOBASE_PATH";
    pub const INFOBASE_NAME: &str = "ONEC_INFOBASE_NAME";
    pub const USER: &str = "ONEC_USER";
    pub const PASSWORD: &str = "ONEC_PASSWORD";
}

/// Worker executable used when nothing else is configured; resolved on `PATH`.
pub const DEFAULT_EXECUTABLE: &str = "1cv8";

/// Values supplied explicitly at the call site (the CLI).
///
/// `None` means "not given", which lets the environment layer and then the
/// built-in defaults fill the field. The boolean switches have no env key;
/// `false` simply means the switch was not passed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExplicitParams {
    pub executable: Option<String>,
    pub infobase_path: Option<String>,
    pub infobase_name: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub include_invisible: bool,
    pub no_markdown: bool,
    pub json: bool,
    pub no_close: bool,
    pub max_depth: Option<u32>,
    pub wait_form_timeout: Option<u64>,
    pub debug: bool,
}

/// Which infobase the worker opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchTarget {
    /// File infobase directory (`/F`).
    Path(String),
    /// Infobase registered in the client's list (`/IBName`).
    Name(String),
}

impl fmt::Display for LaunchTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchTarget::Path(p) => write!(f, "path {p}"),
            LaunchTarget::Name(n) => write!(f, "registered name {n}"),
        }
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Effective configuration for one invocation. Built once, then read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    pub executable: String,
    pub target: LaunchTarget,
    pub credentials: Option<Credentials>,
    pub options: TaskOptions,
    pub debug: bool,
}
