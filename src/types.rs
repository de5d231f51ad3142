// src/types.rs

use std::path::PathBuf;

use crate::watch::{WatchReport, WatchStatus};

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_TIMEOUT: u8 = 2;
pub const EXIT_CANCELLED: u8 = 130;

/// How a successful (non-error) invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// `--dry-run`: nothing was written or started.
    DryRun,
    /// Worker started; the launcher did not wait for it.
    Launched { pid: u32, descriptor: PathBuf },
    /// Worker started and the watcher reached a terminal state.
    Finished {
        pid: u32,
        descriptor: PathBuf,
        report: WatchReport,
    },
}

impl RunOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunOutcome::DryRun | RunOutcome::Launched { .. } => EXIT_SUCCESS,
            RunOutcome::Finished { report, .. } => match report.status {
                WatchStatus::Completed => EXIT_SUCCESS,
                WatchStatus::Failed => EXIT_FAILURE,
                WatchStatus::TimedOut(_) => EXIT_TIMEOUT,
                WatchStatus::Cancelled => EXIT_CANCELLED,
            },
        }
    }
}
