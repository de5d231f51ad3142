// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ExplicitParams;

/// Command-line arguments for `formctx`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "formctx",
    version,
    about = "Collect 1C form context by launching the collector processing in agent mode.",
    long_about = None
)]
pub struct CliArgs {
    /// File infobase directory (e.g. "C:/Bases/Test/").
    #[arg(long, value_name = "PATH", conflicts_with = "infobase_name")]
    pub infobase: Option<String>,

    /// Infobase name as registered in the client's infobase list.
    #[arg(long, value_name = "NAME")]
    pub infobase_name: Option<String>,

    /// Infobase user name.
    #[arg(long, value_name = "USER")]
    pub user: Option<String>,

    /// Infobase user password.
    #[arg(long, value_name = "PASSWORD")]
    pub password: Option<String>,

    /// Forms to collect (e.g. "Document.SalesOrder.Form.ItemForm").
    #[arg(long, value_name = "FORM", num_args = 1..)]
    pub forms: Vec<String>,

    /// File with one form per line; blank lines and `#` comments are skipped.
    #[arg(long, value_name = "PATH")]
    pub forms_file: Option<PathBuf>,

    /// Path (or bare name on PATH) of the 1C client executable.
    #[arg(long, value_name = "PATH")]
    pub executable: Option<String>,

    /// Collector processing to execute.
    ///
    /// Default: `FormContextCollector.epf` in the tool directory.
    #[arg(long, value_name = "PATH")]
    pub processing: Option<PathBuf>,

    /// Directory holding the processing and the `agent/` task directory.
    ///
    /// Default: the directory of the `formctx` binary.
    #[arg(long, value_name = "DIR")]
    pub tool_dir: Option<PathBuf>,

    /// Environment file with ONEC_* settings.
    ///
    /// Default: `.env` in the tool directory. A missing file is ignored.
    #[arg(long, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Include invisible form elements.
    #[arg(long)]
    pub include_invisible: bool,

    /// Do not generate Markdown output.
    #[arg(long)]
    pub no_markdown: bool,

    /// Also generate JSON output.
    #[arg(long)]
    pub json: bool,

    /// Keep the 1C client open after collection.
    #[arg(long)]
    pub no_close: bool,

    /// Maximum element nesting depth to collect.
    #[arg(long, value_name = "N")]
    pub max_depth: Option<u32>,

    /// Time allowed for each form to open, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub wait_form_timeout: Option<u64>,

    /// Enable worker debug mode (and debug logging here).
    #[arg(long)]
    pub debug: bool,

    /// Wait for the worker to finish.
    #[arg(long)]
    pub wait: bool,

    /// Wait timeout in seconds.
    #[arg(long, value_name = "SECONDS", default_value_t = 300)]
    pub timeout: u64,

    /// Resolve everything and print the task, but write and launch nothing.
    ///
    /// A missing client executable or processing is only warned about.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FORMCTX_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl CliArgs {
    /// Call-site values for the Parameter Resolver.
    pub fn explicit_params(&self) -> ExplicitParams {
        ExplicitParams {
            executable: self.executable.clone(),
            infobase_path: self.infobase.clone(),
            infobase_name: self.infobase_name.clone(),
            user: self.user.clone(),
            password: self.password.clone(),
            include_invisible: self.include_invisible,
            no_markdown: self.no_markdown,
            json: self.json,
            no_close: self.no_close,
            max_depth: self.max_depth,
            wait_form_timeout: self.wait_form_timeout,
            debug: self.debug,
        }
    }
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
