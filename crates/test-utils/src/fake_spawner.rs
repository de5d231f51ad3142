use std::sync::{Arc, Mutex};

use formctx::errors::{FormctxError, Result};
use formctx::exec::{WorkerCommand, WorkerSpawner};

/// A fake spawner that:
/// - records every command it was asked to start
/// - reports a fixed pid, or fails like an OS spawn error when configured to.
#[derive(Debug, Clone)]
pub struct RecordingSpawner {
    pid: u32,
    fail: bool,
    spawned: Arc<Mutex<Vec<WorkerCommand>>>,
}

impl RecordingSpawner {
    pub fn new(pid: u32) -> Self {
        Self {
            pid,
            fail: false,
            spawned: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// A spawner whose every call fails with `PermissionDenied`.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(0)
        }
    }

    /// Commands recorded so far (shared between clones).
    pub fn spawned(&self) -> Vec<WorkerCommand> {
        self.spawned.lock().unwrap().clone()
    }
}

impl WorkerSpawner for RecordingSpawner {
    fn spawn_detached(&self, command: &WorkerCommand) -> Result<u32> {
        self.spawned.lock().unwrap().push(command.clone());
        if self.fail {
            return Err(FormctxError::Launch {
                program: command.program.clone(),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
            });
        }
        Ok(self.pid)
    }
}
