//! Shared helpers for the `formctx` integration tests.
//!
//! - [`builders`] assembles `CliArgs` and stages a mock tool directory.
//! - [`fake_spawner`] stands in for the 1C client launcher.

pub mod builders;
pub mod fake_spawner;

use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Install a test-writer subscriber once per test binary.
///
/// Watcher transitions and launch events log at `info`/`debug`; the harness
/// shows them only for failing tests. Raise the level with `RUST_LOG`, e.g.
/// `RUST_LOG=formctx::watch=debug`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .init();
    });
}

/// Bound a real-clock watcher test so a missed marker fails instead of
/// hanging. Paused-clock tests do not need this.
#[allow(dead_code)]
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(5), f)
        .await
        .expect("watcher test did not finish within 5 seconds")
}
