// src/watch/mod.rs

//! Completion Watcher.
//!
//! - [`markers`] derives the marker file paths from the descriptor path.
//! - [`state`] is the pure state machine (no IO, no timers).
//! - [`poller`] drives it on a timer against the filesystem.
//! - [`cancel`] provides the optional cancellation token.

pub mod cancel;
pub mod markers;
pub mod poller;
pub mod state;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use markers::{MarkerPaths, MarkerSnapshot};
pub use poller::{CompletionWatcher, WatchReport};
pub use state::{CompletionTracker, TimeoutPhase, WatchState, WatchStatus, WatchTimings};
