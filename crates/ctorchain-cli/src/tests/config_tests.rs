use clap::Parser;
use ctorchain_checker::TargetSignature;
use tempfile::TempDir;

use super::args::CliArgs;
use super::config::{
    CONFIG_FILE_NAME, apply_cli_overrides, find_config, load_config, load_resolved_config,
    parse_config, resolve_config,
};

fn args(extra: &[&str]) -> CliArgs {
    let mut argv = vec!["ctorchain"];
    argv.extend_from_slice(extra);
    argv.push("snapshots");
    CliArgs::try_parse_from(argv).unwrap()
}

#[test]
fn parses_full_config() {
    let config = parse_config(
        r#"{
          "target": { "class": "lib.Widget", "parameters": ["java.lang.String"] },
          "candidates": {
            "baseClass": "lib.Widget",
            "registration": "widget",
            "include": ["app.**"],
            "allClasses": false
          },
          "maxChainSteps": 64,
          "cache": "off"
        }"#,
    )
    .unwrap();

    let resolved = resolve_config(Some(&config));
    assert_eq!(resolved.target, TargetSignature::new("lib.Widget", ["java.lang.String"]));
    assert_eq!(resolved.candidates.registered.base_class, "lib.Widget");
    assert_eq!(resolved.candidates.registered.registration, "widget");
    assert_eq!(resolved.candidates.include, vec!["app.**"]);
    assert!(!resolved.candidates.all_classes);
    assert_eq!(resolved.checker.max_chain_steps, 64);
    assert!(!resolved.checker.memoize);
}

#[test]
fn bool_options_accept_strings() {
    let config = parse_config(r#"{ "candidates": { "allClasses": "true" } }"#).unwrap();
    assert_eq!(config.candidates.unwrap().all_classes, Some(true));

    let err = parse_config(r#"{ "candidates": { "allClasses": "maybe" } }"#).unwrap_err();
    assert!(format!("{err:#}").contains("invalid boolean value"), "got: {err:#}");
}

#[test]
fn missing_config_uses_defaults() {
    let resolved = resolve_config(None);
    assert_eq!(resolved.target, TargetSignature::template_presentation());
    assert_eq!(
        resolved.candidates.registered.base_class,
        "com.intellij.openapi.actionSystem.AnAction"
    );
    assert_eq!(resolved.candidates.registered.registration, "action");
    assert!(resolved.checker.memoize);
}

#[test]
fn flags_override_config_file() {
    let config = parse_config(
        r#"{ "target": { "class": "lib.Widget", "parameters": ["int"] },
             "candidates": { "registration": "widget" }, "maxChainSteps": 64 }"#,
    )
    .unwrap();
    let mut resolved = resolve_config(Some(&config));
    apply_cli_overrides(
        &mut resolved,
        &args(&["--registration", "action", "--max-chain-steps", "8", "--no-cache", "-j", "1"]),
    );

    assert_eq!(resolved.target, TargetSignature::new("lib.Widget", ["int"]));
    assert_eq!(resolved.candidates.registered.registration, "action");
    assert_eq!(resolved.checker.max_chain_steps, 8);
    assert!(!resolved.checker.memoize);
    assert!(!resolved.checker.parallel);
}

#[test]
fn target_class_flag_replaces_whole_signature() {
    let mut resolved = resolve_config(None);
    apply_cli_overrides(&mut resolved, &args(&["--target-class", "lib.Base"]));
    assert_eq!(resolved.target, TargetSignature::new("lib.Base", Vec::<String>::new()));

    let mut resolved = resolve_config(None);
    apply_cli_overrides(&mut resolved, &args(&["--target-param", "javax.swing.Icon"]));
    assert_eq!(
        resolved.target,
        TargetSignature::new("com.intellij.openapi.actionSystem.AnAction", ["javax.swing.Icon"])
    );
}

#[test]
fn discovers_config_in_working_directory() {
    let temp = TempDir::new().unwrap();
    assert!(find_config(&args(&[]), temp.path()).is_none());

    std::fs::write(temp.path().join(CONFIG_FILE_NAME), r#"{ "maxChainSteps": 12 }"#).unwrap();
    assert_eq!(
        find_config(&args(&[]), temp.path()),
        Some(temp.path().join(CONFIG_FILE_NAME))
    );
    let resolved = load_resolved_config(&args(&[]), temp.path()).unwrap();
    assert_eq!(resolved.checker.max_chain_steps, 12);
}

#[test]
fn explicit_config_must_exist() {
    let temp = TempDir::new().unwrap();
    let err = load_resolved_config(&args(&["-c", "missing.json"]), temp.path()).unwrap_err();
    assert!(err.to_string().contains("missing.json"), "got: {err}");
}

#[test]
fn load_config_reports_parse_errors_with_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = load_config(&path).unwrap_err();
    assert!(err.to_string().contains("broken.json"), "got: {err}");
}
