// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod task;
pub mod types;
pub mod watch;

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cli::CliArgs;
use crate::config::{read_env_file, resolve, EnvLayer, ResolvedConfig};
use crate::errors::Result;
use crate::exec::{current_tool_dir, DetachedSpawner, WorkerLauncher, WorkerSpawner};
use crate::fs::{FileSystem, RealFileSystem};
use crate::task::{descriptor_path, DescriptorWriter, TaskDescriptor, TaskListBuilder};
use crate::types::RunOutcome;
use crate::watch::{
    cancel_pair, CancelToken, CompletionWatcher, MarkerPaths, MarkerSnapshot, TimeoutPhase,
    WatchStatus, WatchTimings,
};

/// Environment file looked up in the tool directory when `--env-file` is absent.
pub const DEFAULT_ENV_FILE: &str = ".env";

/// External collaborators of a run.
///
/// `live()` wires the real filesystem, the detached process spawner and a
/// snapshot of the process environment; tests swap in fakes.
pub struct AppContext {
    pub fs: Arc<dyn FileSystem>,
    pub spawner: Box<dyn WorkerSpawner>,
    /// Process environment captured once; never re-read during the run.
    pub process_env: HashMap<String, String>,
    /// Poll intervals and start timeout. `overall` is replaced by `--timeout`.
    pub timings: WatchTimings,
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("fs", &self.fs)
            .field("timings", &self.timings)
            .finish_non_exhaustive()
    }
}

impl AppContext {
    pub fn live() -> Self {
        Self {
            fs: Arc::new(RealFileSystem),
            spawner: Box::new(DetachedSpawner),
            process_env: std::env::vars().collect(),
            timings: WatchTimings::default(),
        }
    }
}

/// High-level entry point used by `main.rs`.
///
/// Runs with live collaborators and turns Ctrl-C into a cancellation of the
/// completion wait.
pub async fn run(args: CliArgs) -> Result<RunOutcome> {
    let ctx = AppContext::live();

    let cancel = if args.wait && !args.dry_run {
        let (handle, token) = cancel_pair();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "failed to listen for Ctrl+C");
                return;
            }
            info!("Ctrl+C received; cancelling wait");
            handle.cancel();
        });
        Some(token)
    } else {
        None
    };

    let outcome = run_with(&args, ctx, cancel).await?;
    print_outcome(&outcome);
    Ok(outcome)
}

/// Resolve, build, publish, launch and optionally wait.
///
/// The steps run strictly in order. The descriptor is durably published
/// before the worker is spawned, and an error in a later step leaves it in
/// place.
pub async fn run_with(
    args: &CliArgs,
    ctx: AppContext,
    cancel: Option<CancelToken>,
) -> Result<RunOutcome> {
    let tool_dir = match &args.tool_dir {
        Some(dir) => dir.clone(),
        None => current_tool_dir()?,
    };
    debug!(tool_dir = %tool_dir.display(), "tool directory");

    let env_file = args
        .env_file
        .clone()
        .unwrap_or_else(|| tool_dir.join(DEFAULT_ENV_FILE));
    let env = EnvLayer::from_sources(read_env_file(&env_file)?, ctx.process_env);
    let config = resolve(&args.explicit_params(), &env)?;

    let items = TaskListBuilder::new()
        .inline(args.forms.iter().cloned())
        .file(args.forms_file.clone())
        .build(ctx.fs.as_ref())?;
    let descriptor = TaskDescriptor::new(items, config.options.clone())?;
    print_task_summary(&config, &descriptor);

    let path = descriptor_path(&tool_dir)?;
    let launcher = WorkerLauncher::new(Arc::clone(&ctx.fs), ctx.spawner);

    if args.dry_run {
        let command = launcher.preview(&config, &tool_dir, args.processing.as_deref());
        print_dry_run(&path, &descriptor, &command)?;
        return Ok(RunOutcome::DryRun);
    }

    let baseline = stale_marker_baseline(ctx.fs.as_ref(), &path);

    let path = DescriptorWriter::new(Arc::clone(&ctx.fs)).write(&descriptor, &path)?;
    println!("Task file written: {}", path.display());

    let command = launcher.prepare(&config, &tool_dir, args.processing.as_deref())?;
    println!();
    println!("Starting 1C...");
    println!("  Infobase: {}", config.target);
    println!("  Client:   {}", command.program.display());
    let worker = launcher.launch(command)?;
    println!("  PID:      {}", worker.pid);

    if !args.wait {
        return Ok(RunOutcome::Launched {
            pid: worker.pid,
            descriptor: path,
        });
    }

    let timings = WatchTimings {
        overall: Duration::from_secs(args.timeout),
        ..ctx.timings
    };
    println!();
    println!("Waiting for completion (timeout: {}s)...", args.timeout);
    let report = CompletionWatcher::new(ctx.fs, &path, timings)
        .with_baseline(baseline)
        .wait(cancel)
        .await;

    Ok(RunOutcome::Finished {
        pid: worker.pid,
        descriptor: path,
        report,
    })
}

/// Markers present before launch. Terminal ones among them are ignored by
/// the watcher until the new worker reports `.processing`.
fn stale_marker_baseline(fs: &dyn FileSystem, descriptor: &Path) -> MarkerSnapshot {
    let markers = MarkerPaths::for_descriptor(descriptor);
    for stale in markers.existing(fs) {
        warn!(
            path = %stale.display(),
            "marker file from a previous run is still present; the worker is expected to clear it"
        );
    }
    markers.snapshot(fs)
}

fn print_task_summary(config: &ResolvedConfig, descriptor: &TaskDescriptor) {
    println!("Forms to process: {}", descriptor.items.len());
    for (i, item) in descriptor.items.iter().enumerate() {
        println!("  {}. {}", i + 1, item.value);
    }

    let o = &descriptor.options;
    println!();
    println!("Options:");
    println!("  include invisible:      {}", o.include_invisible);
    println!("  generate markdown:      {}", o.generate_markdown);
    println!("  generate json:          {}", o.generate_json);
    println!("  max depth:              {}", o.max_depth);
    println!("  close after collection: {}", o.close_after_collection);
    println!("  wait form timeout (ms): {}", o.wait_form_timeout);
    if config.debug {
        println!("  debug mode:             true");
    }
    println!();
}

fn print_dry_run(
    path: &Path,
    descriptor: &TaskDescriptor,
    command: &exec::WorkerCommand,
) -> Result<()> {
    let json = descriptor.to_json_bytes()?;
    println!("formctx dry-run");
    println!("  task file: {}", path.display());
    println!("{}", String::from_utf8_lossy(&json).trim_end());
    println!("  command: {command}");
    debug!("dry-run complete (nothing written or launched)");
    Ok(())
}

/// Final status lines for the operator.
pub fn print_outcome(outcome: &RunOutcome) {
    match outcome {
        RunOutcome::DryRun => {}
        RunOutcome::Launched { descriptor, .. } => {
            println!();
            println!("1C is running in the background.");
            println!(
                "Track progress via {}.processing -> .completed / .error",
                descriptor.display()
            );
        }
        RunOutcome::Finished { report, .. } => {
            println!();
            match report.status {
                WatchStatus::Completed => {
                    println!("Collection finished successfully.");
                    println!("Results are in context/forms/");
                }
                WatchStatus::Failed => {
                    println!("Collection failed.");
                    println!("See the collector debug log next to the processing.");
                }
                WatchStatus::TimedOut(TimeoutPhase::NeverStarted) => {
                    println!("Timed out: the worker never picked up the task.");
                    println!("Check that 1C started and can open the infobase.");
                }
                WatchStatus::TimedOut(TimeoutPhase::NotFinished) => {
                    println!("Timed out waiting for completion.");
                    println!("The collection may still be running in the background.");
                }
                WatchStatus::Cancelled => {
                    println!("Wait cancelled; 1C keeps running in the background.");
                }
            }
        }
    }
}
