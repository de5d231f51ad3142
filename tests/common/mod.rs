#![allow(dead_code)]

pub use formctx_test_utils::builders;
pub use formctx_test_utils::fake_spawner::RecordingSpawner;
pub use formctx_test_utils::{init_tracing, with_timeout};

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use formctx::AppContext;
use formctx::fs::mock::MockFileSystem;
use formctx::watch::WatchTimings;

pub const TOOL_DIR: &str = "/opt/formctx";
pub const CLIENT_EXE: &str = "/opt/1cv8/bin/1cv8";
/// Path that never exists, so the env file layer stays empty.
pub const NO_ENV_FILE: &str = "/nonexistent/formctx-test.env";

pub fn tool_dir() -> PathBuf {
    PathBuf::from(TOOL_DIR)
}

pub fn descriptor() -> PathBuf {
    tool_dir().join("agent").join("task.json")
}

/// Mock filesystem with the processing and the client executable installed.
pub fn installed_fs() -> MockFileSystem {
    let fs = MockFileSystem::new();
    builders::mock_install(&fs, &tool_dir(), &PathBuf::from(CLIENT_EXE));
    fs
}

/// Context over `fs` and `spawner`, with an empty process environment.
pub fn mock_context(fs: &MockFileSystem, spawner: &RecordingSpawner) -> AppContext {
    AppContext {
        fs: Arc::new(fs.clone()),
        spawner: Box::new(spawner.clone()),
        process_env: HashMap::new(),
        timings: WatchTimings::default(),
    }
}

/// Arguments pointing at the mock install with a file infobase.
pub fn base_args() -> builders::CliArgsBuilder {
    builders::CliArgsBuilder::new()
        .tool_dir(tool_dir())
        .env_file(NO_ENV_FILE)
        .executable(CLIENT_EXE)
        .infobase("C:/Bases/Test/")
}
