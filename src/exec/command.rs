// src/exec/command.rs

//! Worker command line construction.
//!
//! The client is started as
//!
//! ```text
//! 1cv8 ENTERPRISE /F<path> | /IBName<name> [/N<user>] [/P<password>]
//!      /Execute<processing.epf> /DisableStartupMessages
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{Credentials, LaunchTarget};

pub const MODE_FLAG: &str = "ENTERPRISE";
pub const NO_STARTUP_PROMPTS_FLAG: &str = "/DisableStartupMessages";

const PASSWORD_PREFIX: &str = "/P";

/// A fully resolved worker invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct WorkerCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl WorkerCommand {
    pub fn new(
        program: PathBuf,
        target: &LaunchTarget,
        credentials: Option<&Credentials>,
        artifact: &Path,
    ) -> Self {
        Self {
            program,
            args: build_args(target, credentials, artifact),
        }
    }

    /// Arguments with the password replaced by `***`.
    pub fn redacted_args(&self) -> Vec<String> {
        self.args
            .iter()
            .map(|a| {
                if a.starts_with(PASSWORD_PREFIX) && a.len() > PASSWORD_PREFIX.len() {
                    format!("{PASSWORD_PREFIX}***")
                } else {
                    a.clone()
                }
            })
            .collect()
    }
}

impl fmt::Debug for WorkerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerCommand")
            .field("program", &self.program)
            .field("args", &self.redacted_args())
            .finish()
    }
}

impl fmt::Display for WorkerCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in self.redacted_args() {
            if arg.contains(' ') {
                write!(f, " \"{arg}\"")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

/// Build the argument vector (everything after the program name).
pub fn build_args(
    target: &LaunchTarget,
    credentials: Option<&Credentials>,
    artifact: &Path,
) -> Vec<String> {
    let mut args = vec![MODE_FLAG.to_string()];

    args.push(match target {
        LaunchTarget::Path(path) => format!("/F{path}"),
        LaunchTarget::Name(name) => format!("/IBName{name}"),
    });

    if let Some(creds) = credentials {
        args.push(format!("/N{}", creds.user));
        if let Some(password) = &creds.password {
            args.push(format!("{PASSWORD_PREFIX}{password}"));
        }
    }

    args.push(format!("/Execute{}", artifact.display()));
    args.push(NO_STARTUP_PROMPTS_FLAG.to_string());
    args
}
