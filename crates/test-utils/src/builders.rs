#![allow(dead_code)]

use std::path::{Path, PathBuf};

use clap::Parser;
use formctx::cli::CliArgs;
use formctx::exec::ARTIFACT_FILE;
use formctx::fs::mock::MockFileSystem;

/// Builder for `CliArgs` to simplify test setup.
///
/// Starts from the same defaults clap applies to a bare `formctx` call.
pub struct CliArgsBuilder {
    args: CliArgs,
}

impl CliArgsBuilder {
    pub fn new() -> Self {
        Self {
            args: CliArgs::parse_from(["formctx"]),
        }
    }

    pub fn tool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.args.tool_dir = Some(dir.into());
        self
    }

    pub fn env_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.args.env_file = Some(path.into());
        self
    }

    pub fn infobase(mut self, path: &str) -> Self {
        self.args.infobase = Some(path.to_string());
        self
    }

    pub fn infobase_name(mut self, name: &str) -> Self {
        self.args.infobase_name = Some(name.to_string());
        self
    }

    pub fn credentials(mut self, user: &str, password: &str) -> Self {
        self.args.user = Some(user.to_string());
        self.args.password = Some(password.to_string());
        self
    }

    pub fn form(mut self, form: &str) -> Self {
        self.args.forms.push(form.to_string());
        self
    }

    pub fn forms_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.args.forms_file = Some(path.into());
        self
    }

    pub fn executable(mut self, exe: impl AsRef<Path>) -> Self {
        self.args.executable = Some(exe.as_ref().display().to_string());
        self
    }

    pub fn processing(mut self, path: impl Into<PathBuf>) -> Self {
        self.args.processing = Some(path.into());
        self
    }

    pub fn no_markdown(mut self) -> Self {
        self.args.no_markdown = true;
        self
    }

    pub fn json(mut self) -> Self {
        self.args.json = true;
        self
    }

    pub fn no_close(mut self) -> Self {
        self.args.no_close = true;
        self
    }

    pub fn wait(mut self, timeout_secs: u64) -> Self {
        self.args.wait = true;
        self.args.timeout = timeout_secs;
        self
    }

    pub fn dry_run(mut self) -> Self {
        self.args.dry_run = true;
        self
    }

    pub fn build(self) -> CliArgs {
        self.args
    }
}

impl Default for CliArgsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Stage a tool directory in `fs`: the collector processing next to the
/// launcher, and a client executable at `exe`.
pub fn mock_install(fs: &MockFileSystem, tool_dir: &Path, exe: &Path) {
    fs.add_file(tool_dir.join(ARTIFACT_FILE), b"epf".to_vec());
    fs.add_file(exe, b"binary".to_vec());
}
