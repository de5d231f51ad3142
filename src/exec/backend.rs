// src/exec/backend.rs

//! Pluggable process-spawning backend.
//!
//! The launcher talks to a `WorkerSpawner` instead of `tokio::process`
//! directly. Production uses [`DetachedSpawner`]; tests plug in a recorder
//! that never starts a real process.

use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, info};

use crate::errors::{FormctxError, Result};
use crate::exec::command::WorkerCommand;

/// Trait abstracting how the worker process is started.
pub trait WorkerSpawner: Send + Sync {
    /// Start `command` without waiting for it and return its process id.
    fn spawn_detached(&self, command: &WorkerCommand) -> Result<u32>;
}

/// Starts the worker as an independent child process.
///
/// Stdio is detached and the child is not killed when its handle is dropped;
/// the launcher never manages it after startup. On Unix the child gets its own
/// process group so a Ctrl-C aimed at the launcher does not reach it.
#[derive(Debug, Clone, Default)]
pub struct DetachedSpawner;

impl WorkerSpawner for DetachedSpawner {
    fn spawn_detached(&self, command: &WorkerCommand) -> Result<u32> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(false);

        #[cfg(unix)]
        cmd.process_group(0);

        debug!(%command, "spawning worker");

        let child = cmd.spawn().map_err(|source| FormctxError::Launch {
            program: command.program.clone(),
            source,
        })?;

        // `id()` is only `None` once the child has been reaped, which cannot
        // have happened yet.
        let pid = child.id().unwrap_or_default();
        info!(pid, program = %command.program.display(), "worker started");
        Ok(pid)
    }
}
