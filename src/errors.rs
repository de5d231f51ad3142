// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormctxError {
    /// Missing or contradictory inputs: no target, no work items, bad values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required file was checked at an explicit path and is absent.
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// A bare executable name could not be resolved on `PATH`.
    #[error("executable '{name}' not found on PATH")]
    NotOnPath { name: String },

    /// The OS refused to start the worker process.
    #[error("failed to start worker {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("environment file error: {0}")]
    EnvFile(#[from] dotenvy::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FormctxError {
    /// Process exit code reported for this error.
    ///
    /// Every error path is a configuration, resource or launch failure, so
    /// they all share code 1. Timeouts are not errors; see
    /// [`crate::types::RunOutcome::exit_code`].
    pub fn exit_code(&self) -> u8 {
        1
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        FormctxError::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, FormctxError>;
