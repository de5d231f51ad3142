// src/watch/state.rs

//! Pure completion state machine.
//!
//! [`CompletionTracker`] consumes marker snapshots together with the time
//! elapsed since the watch began, and decides the next state. It performs no
//! IO and never sleeps, so it can be unit tested without Tokio or a
//! filesystem; the polling shell lives in [`crate::watch::poller`].
//!
//! ```text
//! AwaitingStart --.processing--> Processing --.completed--> Completed
//!       |                            |        --.error-----> Failed
//!       +--start deadline--> TimedOut(NeverStarted)
//!                                    +--overall deadline--> TimedOut(NotFinished)
//! ```
//!
//! Both deadlines are measured from the start of the watch. The start deadline
//! is `min(start_timeout, overall)`, so the start phase never extends the
//! caller's overall window.
//!
//! The tracker is given a baseline snapshot taken before the worker was
//! launched. While awaiting start, a terminal marker that was already in the
//! baseline is left over from an earlier run and is ignored; one that appears
//! afterwards is accepted directly (a worker fast enough to finish between
//! two polls). Once `.processing` has been seen, any terminal marker counts.

use std::time::Duration;

use crate::watch::markers::MarkerSnapshot;

/// Poll intervals and deadlines for one watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchTimings {
    /// Interval while waiting for `.processing`.
    pub start_poll: Duration,
    /// Interval while waiting for `.completed` / `.error`.
    pub completion_poll: Duration,
    /// How long the worker may take to pick up the task.
    pub start_timeout: Duration,
    /// Upper bound for the whole watch.
    pub overall: Duration,
}

pub const DEFAULT_START_POLL: Duration = Duration::from_millis(500);
pub const DEFAULT_COMPLETION_POLL: Duration = Duration::from_secs(1);
pub const DEFAULT_START_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_OVERALL_TIMEOUT: Duration = Duration::from_secs(300);

impl Default for WatchTimings {
    fn default() -> Self {
        Self::with_overall(DEFAULT_OVERALL_TIMEOUT)
    }
}

impl WatchTimings {
    pub fn with_overall(overall: Duration) -> Self {
        Self {
            start_poll: DEFAULT_START_POLL,
            completion_poll: DEFAULT_COMPLETION_POLL,
            start_timeout: DEFAULT_START_TIMEOUT,
            overall,
        }
    }

    /// Effective deadline for the start phase.
    pub fn start_deadline(&self) -> Duration {
        self.start_timeout.min(self.overall)
    }
}

/// Where a timeout happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeoutPhase {
    /// `.processing` never appeared: the worker most likely failed to start.
    NeverStarted,
    /// The worker started but produced no terminal marker in time.
    NotFinished,
}

/// Terminal result of a watch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchStatus {
    Completed,
    Failed,
    TimedOut(TimeoutPhase),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    AwaitingStart,
    Processing,
    Finished(WatchStatus),
}

#[derive(Debug, Clone)]
pub struct CompletionTracker {
    timings: WatchTimings,
    baseline: MarkerSnapshot,
    state: WatchState,
}

impl CompletionTracker {
    /// Tracker with an empty baseline: every marker seen is fresh.
    pub fn new(timings: WatchTimings) -> Self {
        Self::with_baseline(timings, MarkerSnapshot::default())
    }

    /// Tracker that ignores terminal markers present in `baseline` until
    /// the worker has been seen starting.
    pub fn with_baseline(timings: WatchTimings, baseline: MarkerSnapshot) -> Self {
        Self {
            timings,
            baseline,
            state: WatchState::AwaitingStart,
        }
    }

    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Feed one snapshot taken `elapsed` after the watch began.
    ///
    /// A terminal marker always wins over a deadline reached in the same
    /// poll. `.completed` wins over `.error` when both are seen at once.
    pub fn observe(&mut self, snapshot: MarkerSnapshot, elapsed: Duration) -> WatchState {
        let current = self.state;
        self.state = match current {
            WatchState::Finished(status) => WatchState::Finished(status),
            WatchState::AwaitingStart | WatchState::Processing => {
                let visible = if current == WatchState::AwaitingStart {
                    without_stale_terminals(snapshot, self.baseline)
                } else {
                    snapshot
                };
                if let Some(status) = terminal(visible) {
                    WatchState::Finished(status)
                } else if snapshot.processing || current == WatchState::Processing {
                    // The worker may drop `.processing` before writing its
                    // terminal marker; once seen, stay in Processing.
                    if elapsed >= self.timings.overall {
                        WatchState::Finished(WatchStatus::TimedOut(TimeoutPhase::NotFinished))
                    } else {
                        WatchState::Processing
                    }
                } else if elapsed >= self.timings.start_deadline() {
                    WatchState::Finished(WatchStatus::TimedOut(TimeoutPhase::NeverStarted))
                } else {
                    WatchState::AwaitingStart
                }
            }
        };
        self.state
    }

    /// Mark the watch as cancelled unless it already finished.
    pub fn cancel(&mut self) -> WatchState {
        if !matches!(self.state, WatchState::Finished(_)) {
            self.state = WatchState::Finished(WatchStatus::Cancelled);
        }
        self.state
    }

    /// How long to sleep before the next poll: the phase's interval, cut
    /// short so the poll lands exactly on the phase deadline. `None` once
    /// finished.
    pub fn next_delay(&self, elapsed: Duration) -> Option<Duration> {
        let (interval, deadline) = match self.state {
            WatchState::AwaitingStart => {
                (self.timings.start_poll, self.timings.start_deadline())
            }
            WatchState::Processing => (self.timings.completion_poll, self.timings.overall),
            WatchState::Finished(_) => return None,
        };
        Some(interval.min(deadline.saturating_sub(elapsed)))
    }
}

fn without_stale_terminals(snapshot: MarkerSnapshot, baseline: MarkerSnapshot) -> MarkerSnapshot {
    MarkerSnapshot {
        processing: snapshot.processing,
        completed: snapshot.completed && !baseline.completed,
        error: snapshot.error && !baseline.error,
    }
}

fn terminal(snapshot: MarkerSnapshot) -> Option<WatchStatus> {
    if snapshot.completed {
        Some(WatchStatus::Completed)
    } else if snapshot.error {
        Some(WatchStatus::Failed)
    } else {
        None
    }
}
