// tests/completion_state.rs

use std::time::Duration;

use formctx::watch::markers::MarkerSnapshot;
use formctx::watch::state::{
    CompletionTracker, TimeoutPhase, WatchState, WatchStatus, WatchTimings,
    DEFAULT_COMPLETION_POLL, DEFAULT_START_POLL, DEFAULT_START_TIMEOUT,
};

fn snap(processing: bool, completed: bool, error: bool) -> MarkerSnapshot {
    MarkerSnapshot {
        processing,
        completed,
        error,
    }
}

fn timings(overall_secs: u64) -> WatchTimings {
    WatchTimings::with_overall(Duration::from_secs(overall_secs))
}

#[test]
fn start_deadline_is_capped_by_overall() {
    assert_eq!(timings(3).start_deadline(), Duration::from_secs(3));
    assert_eq!(timings(300).start_deadline(), DEFAULT_START_TIMEOUT);
}

#[test]
fn processing_then_completed() {
    let mut t = CompletionTracker::new(timings(10));
    let s = t.observe(snap(true, false, false), Duration::ZERO);
    assert_eq!(s, WatchState::Processing);
    let s = t.observe(snap(true, true, false), Duration::from_secs(2));
    assert_eq!(s, WatchState::Finished(WatchStatus::Completed));
}

#[test]
fn error_marker_fails() {
    let mut t = CompletionTracker::new(timings(10));
    t.observe(snap(true, false, false), Duration::ZERO);
    let s = t.observe(snap(true, false, true), Duration::from_secs(1));
    assert_eq!(s, WatchState::Finished(WatchStatus::Failed));
}

#[test]
fn completed_beats_error_in_same_poll() {
    let mut t = CompletionTracker::new(timings(10));
    let s = t.observe(snap(true, true, true), Duration::ZERO);
    assert_eq!(s, WatchState::Finished(WatchStatus::Completed));
}

#[test]
fn terminal_marker_without_processing_is_accepted() {
    let mut t = CompletionTracker::new(timings(10));
    let s = t.observe(snap(false, false, true), Duration::from_millis(500));
    assert_eq!(s, WatchState::Finished(WatchStatus::Failed));
}

#[test]
fn baseline_terminal_markers_do_not_end_start_phase() {
    let mut t = CompletionTracker::with_baseline(timings(10), snap(false, true, true));
    let s = t.observe(snap(false, true, true), Duration::from_millis(500));
    assert_eq!(s, WatchState::AwaitingStart);
    let s = t.observe(snap(false, true, true), Duration::from_secs(10));
    assert_eq!(
        s,
        WatchState::Finished(WatchStatus::TimedOut(TimeoutPhase::NeverStarted))
    );
}

#[test]
fn marker_missing_from_baseline_is_fresh() {
    let mut t = CompletionTracker::with_baseline(timings(10), snap(false, true, false));
    let s = t.observe(snap(false, true, true), Duration::from_millis(500));
    assert_eq!(s, WatchState::Finished(WatchStatus::Failed));
}

#[test]
fn baseline_markers_count_after_start() {
    let mut t = CompletionTracker::with_baseline(timings(10), snap(false, true, false));
    let s = t.observe(snap(true, true, false), Duration::from_secs(1));
    assert_eq!(s, WatchState::Processing);
    let s = t.observe(snap(true, true, false), Duration::from_secs(2));
    assert_eq!(s, WatchState::Finished(WatchStatus::Completed));
}

#[test]
fn never_started_times_out_at_start_deadline() {
    let mut t = CompletionTracker::new(timings(300));
    let s = t.observe(snap(false, false, false), Duration::from_secs(29));
    assert_eq!(s, WatchState::AwaitingStart);
    let s = t.observe(snap(false, false, false), Duration::from_secs(30));
    assert_eq!(
        s,
        WatchState::Finished(WatchStatus::TimedOut(TimeoutPhase::NeverStarted))
    );
}

#[test]
fn late_start_counts_elapsed_from_watch_start() {
    let mut t = CompletionTracker::new(timings(10));
    // Processing shows up after the overall window already ran out.
    let s = t.observe(snap(true, false, false), Duration::from_secs(10));
    assert_eq!(
        s,
        WatchState::Finished(WatchStatus::TimedOut(TimeoutPhase::NotFinished))
    );
}

#[test]
fn processing_times_out_at_overall() {
    let mut t = CompletionTracker::new(timings(10));
    t.observe(snap(true, false, false), Duration::from_secs(1));
    let s = t.observe(snap(true, false, false), Duration::from_secs(9));
    assert_eq!(s, WatchState::Processing);
    let s = t.observe(snap(true, false, false), Duration::from_secs(10));
    assert_eq!(
        s,
        WatchState::Finished(WatchStatus::TimedOut(TimeoutPhase::NotFinished))
    );
}

#[test]
fn finished_state_is_sticky() {
    let mut t = CompletionTracker::new(timings(10));
    t.observe(snap(false, true, false), Duration::ZERO);
    let s = t.observe(snap(false, false, true), Duration::from_secs(1));
    assert_eq!(s, WatchState::Finished(WatchStatus::Completed));
    assert_eq!(t.cancel(), WatchState::Finished(WatchStatus::Completed));
}

#[test]
fn cancel_from_waiting_state() {
    let mut t = CompletionTracker::new(timings(10));
    t.observe(snap(true, false, false), Duration::ZERO);
    assert_eq!(t.cancel(), WatchState::Finished(WatchStatus::Cancelled));
}

#[test]
fn next_delay_is_clamped_to_deadline() {
    let mut t = CompletionTracker::new(timings(3));
    assert_eq!(
        t.next_delay(Duration::from_millis(2800)),
        Some(Duration::from_millis(200))
    );
    assert_eq!(t.next_delay(Duration::ZERO), Some(DEFAULT_START_POLL));

    t.observe(snap(true, false, false), Duration::ZERO);
    assert_eq!(t.next_delay(Duration::ZERO), Some(DEFAULT_COMPLETION_POLL));

    t.observe(snap(false, true, false), Duration::from_secs(1));
    assert_eq!(t.next_delay(Duration::from_secs(1)), None);
}
