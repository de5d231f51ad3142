// tests/resolver.rs

mod common;
use crate::common::init_tracing;

use std::collections::HashMap;
use std::error::Error;

use tempfile::tempdir;

use formctx::config::{
    keys, read_env_file, resolve, Credentials, EnvLayer, ExplicitParams, LaunchTarget,
};
use formctx::errors::FormctxError;

type TestResult = Result<(), Box<dyn Error>>;

fn env(pairs: &[(&str, &str)]) -> EnvLayer {
    let vars = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    EnvLayer::from_sources(vars, HashMap::new())
}

fn with_target() -> ExplicitParams {
    ExplicitParams {
        infobase_path: Some("C:/Bases/Test/".to_string()),
        ..Default::default()
    }
}

#[test]
fn explicit_beats_env_beats_default() -> TestResult {
    init_tracing();

    let defaults = resolve(&with_target(), &env(&[]))?;
    assert_eq!(defaults.executable, "1cv8");

    let from_env = resolve(&with_target(), &env(&[(keys::EXECUTABLE, "/opt/1cv8/bin/1cv8")]))?;
    assert_eq!(from_env.executable, "/opt/1cv8/bin/1cv8");

    let explicit = ExplicitParams {
        executable: Some("/usr/local/bin/1cv8".to_string()),
        ..with_target()
    };
    let resolved = resolve(&explicit, &env(&[(keys::EXECUTABLE, "/opt/1cv8/bin/1cv8")]))?;
    assert_eq!(resolved.executable, "/usr/local/bin/1cv8");
    Ok(())
}

#[test]
fn blank_values_fall_through_to_next_layer() -> TestResult {
    init_tracing();
    let explicit = ExplicitParams {
        executable: Some("   ".to_string()),
        ..with_target()
    };
    let resolved = resolve(&explicit, &env(&[(keys::EXECUTABLE, "")]))?;
    assert_eq!(resolved.executable, "1cv8");
    Ok(())
}

#[test]
fn process_environment_shadows_env_file() {
    let file: HashMap<String, String> =
        [(keys::USER.to_string(), "from-file".to_string())].into();
    let process: HashMap<String, String> =
        [(keys::USER.to_string(), "from-process".to_string())].into();

    let layer = EnvLayer::from_sources(file, process);
    assert_eq!(layer.get(keys::USER), Some("from-process"));
}

#[test]
fn target_resolves_as_a_unit() -> TestResult {
    init_tracing();
    let layer = env(&[
        (keys::INFOBASE_PATH, "/srv/bases/env"),
        (keys::INFOBASE_NAME, "EnvBase"),
    ]);

    // An explicit name wins over a path that only exists in the environment.
    let explicit = ExplicitParams {
        infobase_name: Some("Accounting".to_string()),
        ..Default::default()
    };
    assert_eq!(
        resolve(&explicit, &layer)?.target,
        LaunchTarget::Name("Accounting".to_string())
    );

    // Without explicit values the env path is preferred over the env name.
    assert_eq!(
        resolve(&ExplicitParams::default(), &layer)?.target,
        LaunchTarget::Path("/srv/bases/env".to_string())
    );

    let only_name = env(&[(keys::INFOBASE_NAME, "EnvBase")]);
    assert_eq!(
        resolve(&ExplicitParams::default(), &only_name)?.target,
        LaunchTarget::Name("EnvBase".to_string())
    );
    Ok(())
}

#[test]
fn missing_target_is_a_config_error() {
    init_tracing();
    let result = resolve(&ExplicitParams::default(), &env(&[]));
    match result {
        Err(FormctxError::Config(msg)) => assert!(msg.contains(keys::INFOBASE_PATH)),
        other => panic!("Expected Config error, got: {:?}", other),
    }
}

#[test]
fn credentials_are_optional_but_need_a_user() -> TestResult {
    init_tracing();

    assert_eq!(resolve(&with_target(), &env(&[]))?.credentials, None);

    let user_only = resolve(&with_target(), &env(&[(keys::USER, "Admin")]))?;
    assert_eq!(
        user_only.credentials,
        Some(Credentials {
            user: "Admin".to_string(),
            password: None,
        })
    );

    let explicit = ExplicitParams {
        user: Some("Admin".to_string()),
        password: Some(" secret ".to_string()),
        ..with_target()
    };
    let both = resolve(&explicit, &env(&[]))?;
    assert_eq!(
        both.credentials.as_ref().and_then(|c| c.password.as_deref()),
        Some(" secret ")
    );

    let orphan = resolve(&with_target(), &env(&[(keys::PASSWORD, "secret")]));
    assert!(matches!(orphan, Err(FormctxError::Config(_))));
    Ok(())
}

#[test]
fn credentials_debug_never_shows_password() {
    let creds = Credentials {
        user: "Admin".to_string(),
        password: Some("hunter2".to_string()),
    };
    let shown = format!("{creds:?}");
    assert!(shown.contains("Admin"));
    assert!(!shown.contains("hunter2"));
}

#[test]
fn switches_map_onto_task_options() -> TestResult {
    init_tracing();

    let defaults = resolve(&with_target(), &env(&[]))?.options;
    assert!(!defaults.include_invisible);
    assert!(defaults.generate_markdown);
    assert!(!defaults.generate_json);
    assert!(defaults.close_after_collection);
    assert_eq!(defaults.max_depth, 5);
    assert_eq!(defaults.wait_form_timeout, 2000);

    let explicit = ExplicitParams {
        include_invisible: true,
        no_markdown: true,
        json: true,
        no_close: true,
        max_depth: Some(3),
        wait_form_timeout: Some(500),
        debug: true,
        ..with_target()
    };
    let resolved = resolve(&explicit, &env(&[]))?;
    let o = &resolved.options;
    assert!(o.include_invisible);
    assert!(!o.generate_markdown);
    assert!(o.generate_json);
    assert!(!o.close_after_collection);
    assert_eq!(o.max_depth, 3);
    assert_eq!(o.wait_form_timeout, 500);
    assert!(o.debug_mode);
    assert!(resolved.debug);
    Ok(())
}

#[test]
fn zero_max_depth_is_rejected() {
    init_tracing();
    let explicit = ExplicitParams {
        max_depth: Some(0),
        ..with_target()
    };
    assert!(matches!(
        resolve(&explicit, &env(&[])),
        Err(FormctxError::Config(_))
    ));
}

#[test]
fn env_file_parses_comments_and_quotes() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let path = dir.path().join(".env");
    std::fs::write(
        &path,
        "# connection\nONEC_INFOBASE_PATH=\"C:/Bases/My Base/\"\n\nONEC_USER='Admin'\nONEC_EXECUTABLE=/opt/1cv8/bin/1cv8\n",
    )?;

    let vars = read_env_file(&path)?;
    assert_eq!(vars.len(), 3);
    assert_eq!(vars[keys::INFOBASE_PATH], "C:/Bases/My Base/");
    assert_eq!(vars[keys::USER], "Admin");

    let layer = EnvLayer::from_sources(vars, HashMap::new());
    let resolved = resolve(&ExplicitParams::default(), &layer)?;
    assert_eq!(
        resolved.target,
        LaunchTarget::Path("C:/Bases/My Base/".to_string())
    );
    assert_eq!(resolved.executable, "/opt/1cv8/bin/1cv8");
    Ok(())
}

#[test]
fn missing_env_file_is_empty() -> TestResult {
    init_tracing();
    let dir = tempdir()?;
    let vars = read_env_file(&dir.path().join("absent.env"))?;
    assert!(vars.is_empty());
    Ok(())
}
