// tests/logging_level.rs

use formctx::cli::LogLevel;
use formctx::logging::effective_level;
use tracing::Level;

#[test]
fn flag_beats_env_and_debug() {
    assert_eq!(effective_level(Some(LogLevel::Warn), Some("trace"), true), Level::WARN);
}

#[test]
fn env_beats_debug_switch() {
    assert_eq!(effective_level(None, Some(" Error "), true), Level::ERROR);
    assert_eq!(effective_level(None, Some("warning"), false), Level::WARN);
}

#[test]
fn unparseable_env_falls_back() {
    assert_eq!(effective_level(None, Some("loud"), false), Level::INFO);
    assert_eq!(effective_level(None, Some("loud"), true), Level::DEBUG);
    assert_eq!(effective_level(None, None, false), Level::INFO);
}
