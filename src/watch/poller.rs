// src/watch/poller.rs

//! Async polling shell around [`CompletionTracker`].
//!
//! The worker shares nothing with the launcher except the filesystem, so the
//! watcher polls marker files on a timer instead of waiting on an event
//! source. Time is read from `tokio::time::Instant` so paused-clock tests run
//! the same code path.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::fs::FileSystem;
use crate::watch::cancel::CancelToken;
use crate::watch::markers::{MarkerPaths, MarkerSnapshot};
use crate::watch::state::{
    CompletionTracker, TimeoutPhase, WatchState, WatchStatus, WatchTimings,
};

/// Outcome of [`CompletionWatcher::wait`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchReport {
    pub status: WatchStatus,
    pub elapsed: Duration,
}

#[derive(Debug, Clone)]
pub struct CompletionWatcher {
    fs: Arc<dyn FileSystem>,
    markers: MarkerPaths,
    baseline: MarkerSnapshot,
    timings: WatchTimings,
}

impl CompletionWatcher {
    /// Watcher whose baseline is the set of markers present right now.
    pub fn new(fs: Arc<dyn FileSystem>, descriptor: &Path, timings: WatchTimings) -> Self {
        let markers = MarkerPaths::for_descriptor(descriptor);
        let baseline = markers.snapshot(fs.as_ref());
        Self {
            fs,
            markers,
            baseline,
            timings,
        }
    }

    /// Replace the baseline with one taken earlier, before the worker was
    /// launched.
    pub fn with_baseline(mut self, baseline: MarkerSnapshot) -> Self {
        self.baseline = baseline;
        self
    }

    /// Poll until a terminal state is reached.
    ///
    /// Marker files are only read, never created or removed. With a `cancel`
    /// token, a cancellation request ends the watch with
    /// [`WatchStatus::Cancelled`] at the next await point.
    pub async fn wait(&self, mut cancel: Option<CancelToken>) -> WatchReport {
        let started = Instant::now();
        let mut tracker = CompletionTracker::with_baseline(self.timings, self.baseline);
        let mut phase = tracker.state();

        info!(
            processing = %self.markers.processing.display(),
            overall_secs = self.timings.overall.as_secs_f64(),
            start_timeout_secs = self.timings.start_deadline().as_secs_f64(),
            "waiting for worker"
        );

        let status = loop {
            let snapshot = self.markers.snapshot(self.fs.as_ref());
            let state = tracker.observe(snapshot, started.elapsed());

            if state != phase {
                debug!(from = ?phase, to = ?state, elapsed = ?started.elapsed(), "watch state changed");
                if state == WatchState::Processing {
                    info!("worker picked up the task");
                }
                phase = state;
            }

            if let WatchState::Finished(status) = state {
                break status;
            }

            let delay = tracker.next_delay(started.elapsed()).unwrap_or_default();

            tokio::select! {
                _ = sleep(delay) => {}
                _ = cancelled(&mut cancel) => {
                    tracker.cancel();
                    break WatchStatus::Cancelled;
                }
            }
        };

        let report = WatchReport {
            status,
            elapsed: started.elapsed(),
        };
        log_report(&report);
        report
    }
}

async fn cancelled(token: &mut Option<CancelToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending::<()>().await,
    }
}

fn log_report(report: &WatchReport) {
    let elapsed = report.elapsed;
    match report.status {
        WatchStatus::Completed => info!(?elapsed, "worker completed"),
        WatchStatus::Failed => warn!(?elapsed, "worker reported an error"),
        WatchStatus::TimedOut(TimeoutPhase::NeverStarted) => {
            warn!(?elapsed, "worker never picked up the task")
        }
        WatchStatus::TimedOut(TimeoutPhase::NotFinished) => {
            warn!(?elapsed, "worker did not finish in time")
        }
        WatchStatus::Cancelled => info!(?elapsed, "wait cancelled"),
    }
}
