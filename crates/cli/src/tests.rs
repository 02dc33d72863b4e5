#![forbid(unsafe_code)]

use super::*;
use crate::config::{CliConfig, Command, parse_args};
use crate::outline::{Outline, count_elements, outline};
use ej_codec::{Element, TYPE_KEY, Value};
use serde_json::json;
use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

fn args(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn run_config(parsed: Result<Parsed, String>) -> CliConfig {
    match parsed.expect("parse") {
        Parsed::Run(cfg) => cfg,
        Parsed::Help => panic!("unexpected help"),
    }
}

#[test]
fn help_wins_over_everything() {
    assert_eq!(
        parse_args(&args(&["bogus", "--help"]), no_env).unwrap(),
        Parsed::Help
    );
    assert!(usage().contains("ej inspect"));
}

#[test]
fn flags_override_environment() {
    let env = HashMap::from([
        ("EJ_TYPES", " TaskList, SiteNav ,,"),
        ("EJ_INPUT", "from-env.json"),
        ("EJ_LOG", "  "),
    ]);
    let lookup = |name: &str| env.get(name).map(|v| v.to_string());

    let cfg = run_config(parse_args(&args(&["inspect"]), lookup));
    assert_eq!(cfg.types, vec!["TaskList", "SiteNav"]);
    assert_eq!(cfg.input, Some(PathBuf::from("from-env.json")));
    assert_eq!(cfg.log_filter, config::DEFAULT_LOG_FILTER);

    let cfg = run_config(parse_args(
        &args(&["check", "--types", "Input", "--input", "page.json", "--lenient"]),
        lookup,
    ));
    assert_eq!(cfg.command, Command::Check);
    assert_eq!(cfg.types, vec!["Input"]);
    assert_eq!(cfg.input, Some(PathBuf::from("page.json")));
    assert!(cfg.lenient);
}

#[test]
fn bad_arguments_are_reported() {
    assert!(parse_args(&args(&[]), no_env).is_err());
    assert_eq!(
        parse_args(&args(&["frobnicate"]), no_env).unwrap_err(),
        "unknown command: frobnicate"
    );
    assert_eq!(
        parse_args(&args(&["pack", "--wat"]), no_env).unwrap_err(),
        "unknown argument: --wat"
    );
    assert_eq!(
        parse_args(&args(&["pack", "--input"]), no_env).unwrap_err(),
        "--input requires FILE"
    );
    assert!(parse_args(&args(&["unpack", "--script-tag"]), no_env).is_err());
    assert!(parse_args(&args(&["pack", "--payload"]), no_env).is_err());
}

#[test]
fn lenient_registry_learns_names_from_input() {
    let json = json!({
        TYPE_KEY: { "custom": "TaskList" },
        "props": {
            "children": [{ TYPE_KEY: { "custom": "LinkToTask" } }],
            "editor": { TYPE_KEY: { "custom": "Input" } },
        },
    });
    let mut names = BTreeSet::new();
    commands::collect_custom_names(&json, &mut names);
    assert_eq!(
        names.into_iter().collect::<Vec<_>>(),
        vec!["Input", "LinkToTask", "TaskList"]
    );

    let mut cfg = run_config(parse_args(&args(&["inspect", "--lenient"]), no_env));
    let registry = commands::build_registry(&cfg, &json).unwrap();
    assert_eq!(registry.names(), vec!["Input", "LinkToTask", "TaskList"]);
    assert!(ej_codec::decode(&json, &registry).is_ok());

    cfg.lenient = false;
    let registry = commands::build_registry(&cfg, &json).unwrap();
    assert!(registry.is_empty());
    assert!(ej_codec::decode(&json, &registry).is_err());
}

#[test]
fn outline_lists_tags_keys_and_prop_names() {
    let tree: Value = Element::host("ul")
        .prop("className", "tasks")
        .child(Element::host("li").key("1").child("One"))
        .child(Element::fragment().key("2"))
        .build()
        .into();
    let expected = Outline::Element {
        tag: "ul".to_string(),
        key: None,
        props: vec!["className".to_string()],
        children: vec![
            Outline::Element {
                tag: "li".to_string(),
                key: Some("1".to_string()),
                props: vec![],
                children: vec![Outline::Leaf("\"One\"".to_string())],
            },
            Outline::Element {
                tag: "#fragment".to_string(),
                key: Some("2".to_string()),
                props: vec![],
                children: vec![],
            },
        ],
    };
    assert_eq!(outline(&tree), expected);
    assert_eq!(
        serde_json::to_value(&expected).unwrap(),
        json!({
            "tag": "ul",
            "props": ["className"],
            "children": [
                { "tag": "li", "key": "1", "children": ["\"One\""] },
                { "tag": "#fragment", "key": "2" },
            ],
        })
    );
}

#[test]
fn counts_elements_outside_children_too() {
    let tree: Value = Element::host("div")
        .prop("icon", Element::host("svg"))
        .prop("extra", Value::object([("badge", Value::from(Element::host("b").build()))]))
        .child(Element::host("p"))
        .build()
        .into();
    assert_eq!(count_elements(&tree), 4);
}
