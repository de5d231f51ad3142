// src/config/resolver.rs

//! Parameter Resolver: explicit value > environment > built-in default.

use tracing::debug;

use crate::config::env_file::EnvLayer;
use crate::config::model::{
    keys, Credentials, ExplicitParams, LaunchTarget, ResolvedConfig, DEFAULT_EXECUTABLE,
};
use crate::errors::{FormctxError, Result};
use crate::task::TaskOptions;

/// Resolve one string field through the three layers.
pub fn layered(explicit: Option<&str>, env: &EnvLayer, key: &str, default: &str) -> String {
    layered_opt(explicit, env, key).unwrap_or_else(|| default.to_string())
}

/// Like [`layered`] for fields without a default.
pub fn layered_opt(explicit: Option<&str>, env: &EnvLayer, key: &str) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .or_else(|| env.get(key).map(str::trim))
        .map(str::to_string)
}

/// Merge the call-site parameters with the environment layer.
pub fn resolve(explicit: &ExplicitParams, env: &EnvLayer) -> Result<ResolvedConfig> {
    let executable = layered(
        explicit.executable.as_deref(),
        env,
        keys::EXECUTABLE,
        DEFAULT_EXECUTABLE,
    );
    let target = resolve_target(explicit, env)?;
    let credentials = resolve_credentials(explicit, env)?;
    let options = resolve_options(explicit)?;

    debug!(%executable, %target, ?credentials, ?options, "configuration resolved");

    Ok(ResolvedConfig {
        executable,
        target,
        credentials,
        options,
        debug: explicit.debug,
    })
}

/// The target is resolved as a unit, so an explicit name is never paired
/// with a path that happens to sit in the env file.
fn resolve_target(explicit: &ExplicitParams, env: &EnvLayer) -> Result<LaunchTarget> {
    let given = |v: &Option<String>| {
        v.as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    if let Some(path) = given(&explicit.infobase_path) {
        return Ok(LaunchTarget::Path(path));
    }
    if let Some(name) = given(&explicit.infobase_name) {
        return Ok(LaunchTarget::Name(name));
    }
    if let Some(path) = env.get(keys::INFOBASE_PATH) {
        return Ok(LaunchTarget::Path(path.trim().to_string()));
    }
    if let Some(name) = env.get(keys::INFOBASE_NAME) {
        return Ok(LaunchTarget::Name(name.trim().to_string()));
    }

    Err(FormctxError::config(format!(
        "no infobase given; pass --infobase or --infobase-name, or set {} / {}",
        keys::INFOBASE_PATH,
        keys::INFOBASE_NAME
    )))
}

fn resolve_credentials(explicit: &ExplicitParams, env: &EnvLayer) -> Result<Option<Credentials>> {
    let user = layered_opt(explicit.user.as_deref(), env, keys::USER);
    // Passwords may legitimately contain surrounding spaces, so no trimming here.
    let password = explicit
        .password
        .clone()
        .filter(|p| !p.is_empty())
        .or_else(|| env.get(keys::PASSWORD).map(str::to_string));

    match (user, password) {
        (Some(user), password) => Ok(Some(Credentials { user, password })),
        (None, Some(_)) => Err(FormctxError::config(
            "a password was given without a user name",
        )),
        (None, None) => Ok(None),
    }
}

fn resolve_options(explicit: &ExplicitParams) -> Result<TaskOptions> {
    let defaults = TaskOptions::default();

    let max_depth = explicit.max_depth.unwrap_or(defaults.max_depth);
    if max_depth == 0 {
        return Err(FormctxError::config("--max-depth must be >= 1 (got 0)"));
    }

    Ok(TaskOptions {
        include_invisible: explicit.include_invisible || defaults.include_invisible,
        generate_markdown: !explicit.no_markdown && defaults.generate_markdown,
        generate_json: explicit.json || defaults.generate_json,
        max_depth,
        close_after_collection: !explicit.no_close && defaults.close_after_collection,
        wait_form_timeout: explicit
            .wait_form_timeout
            .unwrap_or(defaults.wait_form_timeout),
        debug_mode: explicit.debug || defaults.debug_mode,
    })
}
