//! Plan validation and YAML parsing tests.

#![allow(clippy::expect_used)]

use std::path::PathBuf;

use provis_cli::domain::plan::{Plan, STEP_NAME_RE};
use provis_cli::domain::step::{Action, PackageManagerKind, Step};

fn refresh(name: &str) -> Step {
    Step::new(name, "Refreshing package index", Action::RefreshIndex)
}

// ── Validation ────────────────────────────────────────────────────────────────

#[test]
fn test_empty_plan_is_rejected() {
    let err = Plan::new(vec![]).expect_err("empty plan");
    assert!(err.to_string().contains("no steps"));
}

#[test]
fn test_duplicate_step_names_are_rejected() {
    let err = Plan::new(vec![refresh("refresh"), refresh("refresh")]).expect_err("duplicate");
    assert!(err.to_string().contains("duplicate step name 'refresh'"));
}

#[test]
fn test_invalid_step_name_is_rejected() {
    let err = Plan::new(vec![refresh("Not A Name")]).expect_err("invalid name");
    assert!(err.to_string().contains("invalid step name"));
}

#[test]
fn test_step_name_pattern() {
    for good in ["a", "a1", "install-native-packages", "x-y-z"] {
        assert!(STEP_NAME_RE.is_match(good), "{good} should match");
    }
    for bad in ["", "-leading", "trailing-", "UPPER", "has space", "dot.dot"] {
        assert!(!STEP_NAME_RE.is_match(bad), "{bad} should not match");
    }
}

// ── Built-in plan ─────────────────────────────────────────────────────────────

#[test]
fn test_media_toolchain_plan_shape() {
    let plan = Plan::media_toolchain(false);
    let names: Vec<&str> = plan.steps().iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "fetch-repo-key",
            "register-repo-key",
            "append-repo-source",
            "refresh-package-index",
            "install-native-packages",
            "install-python-modules",
        ]
    );
    assert!(!plan.is_empty());
}

#[test]
fn test_media_toolchain_refresh_is_non_fatal_by_default() {
    let plan = Plan::media_toolchain(false);
    let refresh = plan
        .steps()
        .iter()
        .find(|s| s.name == "refresh-package-index")
        .expect("refresh step");
    assert!(refresh.continue_on_failure);

    let strict = Plan::media_toolchain(true);
    let refresh = strict
        .steps()
        .iter()
        .find(|s| s.name == "refresh-package-index")
        .expect("refresh step");
    assert!(!refresh.continue_on_failure);
}

#[test]
fn test_media_toolchain_python_modules_use_pip() {
    let plan = Plan::media_toolchain(false);
    let step = plan
        .steps()
        .iter()
        .find(|s| s.name == "install-python-modules")
        .expect("python step");
    match &step.action {
        Action::InstallPackages { manager, packages } => {
            assert_eq!(*manager, PackageManagerKind::Pip);
            assert!(packages.contains(&"numpy".to_string()));
        }
        other => panic!("unexpected action: {other:?}"),
    }
}

// ── YAML parsing ──────────────────────────────────────────────────────────────

#[test]
fn test_plan_parses_from_yaml() {
    let yaml = r#"
steps:
  - name: fetch-repo-key
    description: Downloading repository signing key
    kind: fetch
    url: https://repo.example/key.asc
    dest: /tmp/key.asc
  - name: register-repo-key
    description: Registering repository signing key
    kind: register-key
    key_file: /tmp/key.asc
    key_id: 5C808C2B65558117
  - name: append-repo-source
    description: Adding the repository source line
    kind: append-source-line
    file: /etc/apt/sources.list
    line: "deb http://example/x main"
  - name: refresh-package-index
    description: Refreshing package index
    kind: refresh-index
    continue_on_failure: true
  - name: install-native-packages
    description: Installing packages
    kind: install-packages
    manager: apt
    packages: [ffmpeg, espeak]
"#;
    let plan = Plan::from_yaml(yaml).expect("valid plan yaml");
    assert_eq!(plan.len(), 5);

    match &plan.steps()[0].action {
        Action::Fetch { url, dest, sha256 } => {
            assert_eq!(url, "https://repo.example/key.asc");
            assert_eq!(dest, &PathBuf::from("/tmp/key.asc"));
            assert!(sha256.is_none());
        }
        other => panic!("unexpected action: {other:?}"),
    }

    // remove_after defaults on for register-key.
    match &plan.steps()[1].action {
        Action::RegisterKey { remove_after, .. } => assert!(*remove_after),
        other => panic!("unexpected action: {other:?}"),
    }

    assert!(plan.steps()[3].continue_on_failure);
    assert!(!plan.steps()[4].continue_on_failure);
}

#[test]
fn test_plan_yaml_with_unknown_kind_is_rejected() {
    let yaml = r#"
steps:
  - name: nuke
    description: Unsupported
    kind: format-disk
"#;
    assert!(Plan::from_yaml(yaml).is_err());
}

#[test]
fn test_plan_yaml_with_no_steps_is_rejected() {
    assert!(Plan::from_yaml("steps: []").is_err());
}
