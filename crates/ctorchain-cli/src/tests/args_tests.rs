use clap::Parser;
use std::path::PathBuf;

use super::args::{CliArgs, OutputFormat};

#[test]
fn parses_defaults() {
    let args = CliArgs::try_parse_from(["ctorchain", "snapshots"]).expect("default args should parse");

    assert!(args.config.is_none());
    assert!(args.target_class.is_none());
    assert!(args.target_params.is_empty());
    assert!(!args.all_classes);
    assert!(!args.explain);
    assert!(!args.no_cache);
    assert_eq!(args.format, OutputFormat::Text);
    assert_eq!(args.jobs, None);
    assert_eq!(args.inputs, vec![PathBuf::from("snapshots")]);
}

#[test]
fn requires_an_input() {
    assert!(CliArgs::try_parse_from(["ctorchain"]).is_err());
}

#[test]
fn parses_common_flags() {
    let args = CliArgs::try_parse_from([
        "ctorchain",
        "-c",
        "conf/ctorchain.json",
        "--target-class",
        "lib.Widget",
        "--target-param",
        "java.lang.String",
        "--target-param",
        "int",
        "--base-class",
        "lib.Widget",
        "--registration",
        "widget",
        "--include",
        "app.**",
        "--format",
        "json",
        "--explain",
        "--no-color",
        "-j",
        "4",
        "--max-chain-steps",
        "32",
        "--no-cache",
        "a.json",
        "more",
    ])
    .expect("flagged args should parse");

    assert_eq!(args.config, Some(PathBuf::from("conf/ctorchain.json")));
    assert_eq!(args.target_class.as_deref(), Some("lib.Widget"));
    assert_eq!(args.target_params, vec!["java.lang.String", "int"]);
    assert_eq!(args.base_class.as_deref(), Some("lib.Widget"));
    assert_eq!(args.registration.as_deref(), Some("widget"));
    assert_eq!(args.include, vec!["app.**"]);
    assert_eq!(args.format, OutputFormat::Json);
    assert!(args.explain);
    assert!(args.no_color);
    assert_eq!(args.jobs, Some(4));
    assert_eq!(args.max_chain_steps, Some(32));
    assert!(args.no_cache);
    assert_eq!(args.inputs, vec![PathBuf::from("a.json"), PathBuf::from("more")]);
}

#[test]
fn rejects_unknown_format() {
    assert!(CliArgs::try_parse_from(["ctorchain", "--format", "xml", "a.json"]).is_err());
}
