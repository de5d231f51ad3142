// src/exec/mod.rs

//! Worker Launcher.
//!
//! - [`resolve`] finds the executable and the launch artifact.
//! - [`command`] builds the worker argument vector.
//! - [`backend`] provides the `WorkerSpawner` trait and the real
//!   `DetachedSpawner`, which tests replace with a fake.

pub mod backend;
pub mod command;
pub mod resolve;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ResolvedConfig;
use crate::errors::Result;
use crate::fs::FileSystem;

pub use backend::{DetachedSpawner, WorkerSpawner};
pub use command::WorkerCommand;
pub use resolve::{resolve_artifact, resolve_executable, ARTIFACT_FILE};

/// A worker that has been started. The launcher keeps no further handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchedWorker {
    pub pid: u32,
    pub command: WorkerCommand,
}

pub struct WorkerLauncher {
    fs: Arc<dyn FileSystem>,
    spawner: Box<dyn WorkerSpawner>,
}

impl std::fmt::Debug for WorkerLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerLauncher")
            .field("fs", &self.fs)
            .finish_non_exhaustive()
    }
}

impl WorkerLauncher {
    pub fn new(fs: Arc<dyn FileSystem>, spawner: Box<dyn WorkerSpawner>) -> Self {
        Self { fs, spawner }
    }

    /// Resolve the executable and artifact and build the command, without
    /// starting anything.
    pub fn prepare(
        &self,
        config: &ResolvedConfig,
        tool_dir: &Path,
        artifact_override: Option<&Path>,
    ) -> Result<WorkerCommand> {
        let program = resolve_executable(self.fs.as_ref(), &config.executable)?;
        let artifact = resolve_artifact(self.fs.as_ref(), tool_dir, artifact_override)?;
        Ok(WorkerCommand::new(
            program,
            &config.target,
            config.credentials.as_ref(),
            &artifact,
        ))
    }

    /// Like [`Self::prepare`], for `--dry-run`: an executable or artifact
    /// that cannot be found is reported with `warn!` and shown as configured
    /// instead of failing the run.
    pub fn preview(
        &self,
        config: &ResolvedConfig,
        tool_dir: &Path,
        artifact_override: Option<&Path>,
    ) -> WorkerCommand {
        let program = resolve_executable(self.fs.as_ref(), &config.executable)
            .unwrap_or_else(|err| {
                warn!(error = %err, "dry run: worker executable not resolved");
                PathBuf::from(&config.executable)
            });
        let artifact = resolve_artifact(self.fs.as_ref(), tool_dir, artifact_override)
            .unwrap_or_else(|err| {
                warn!(error = %err, "dry run: processing not found");
                artifact_override
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| tool_dir.join(ARTIFACT_FILE))
            });
        WorkerCommand::new(
            program,
            &config.target,
            config.credentials.as_ref(),
            &artifact,
        )
    }

    /// Start the worker detached and return its process id.
    pub fn launch(&self, command: WorkerCommand) -> Result<LaunchedWorker> {
        let pid = self.spawner.spawn_detached(&command)?;
        info!(pid, %command, "worker launched");
        Ok(LaunchedWorker { pid, command })
    }
}

/// Directory containing the running binary; the conventional tool directory.
pub fn current_tool_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}
