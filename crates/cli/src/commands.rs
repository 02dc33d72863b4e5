#![forbid(unsafe_code)]

use crate::config::{CliConfig, Command};
use crate::outline::{count_elements, outline};
use ej_codec::hydration;
use ej_codec::{ComponentType, TYPE_KEY, TypeRegistry};
use serde_json::Value as Json;
use std::collections::BTreeSet;
use std::io::Read as _;

/// Runs the configured command; `Ok` carries the process exit code.
pub(crate) fn run(cfg: &CliConfig) -> Result<i32, String> {
    let input = read_input(cfg)?;
    match cfg.command {
        Command::Pack => {
            let json = parse_json(&input)?;
            let payload = hydration::pack(&json);
            if cfg.script_tag {
                println!("{}", hydration::script_tag(&payload));
            } else {
                println!("{payload}");
            }
            Ok(0)
        }
        Command::Unpack => {
            let json = hydration::unpack(&input).map_err(|e| e.to_string())?;
            println!("{}", pretty(&json)?);
            Ok(0)
        }
        Command::Inspect => {
            let json = load_tree(cfg, &input)?;
            let registry = build_registry(cfg, &json)?;
            let value = ej_codec::decode(&json, &registry).map_err(|e| e.to_string())?;
            let rendered = serde_json::to_value(outline(&value)).map_err(|e| e.to_string())?;
            println!("{}", pretty(&rendered)?);
            Ok(0)
        }
        Command::Check => {
            let json = load_tree(cfg, &input)?;
            let registry = build_registry(cfg, &json)?;
            match ej_codec::decode(&json, &registry) {
                Ok(value) => {
                    println!("ok: {} element(s)", count_elements(&value));
                    Ok(0)
                }
                Err(err) => {
                    println!("defect at {}: {err}", err.path());
                    Ok(1)
                }
            }
        }
    }
}

fn read_input(cfg: &CliConfig) -> Result<String, String> {
    match &cfg.input {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|e| format!("cannot read {}: {e}", path.display())),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("cannot read stdin: {e}"))?;
            Ok(buf)
        }
    }
}

fn parse_json(input: &str) -> Result<Json, String> {
    serde_json::from_str(input).map_err(|e| format!("input is not json: {e}"))
}

fn pretty(json: &Json) -> Result<String, String> {
    serde_json::to_string_pretty(json).map_err(|e| e.to_string())
}

fn load_tree(cfg: &CliConfig, input: &str) -> Result<Json, String> {
    if cfg.payload {
        hydration::unpack(input).map_err(|e| e.to_string())
    } else {
        parse_json(input)
    }
}

/// Component names from the configuration, plus (when lenient) every
/// custom name the input refers to. Each name gets its own dynamic identity.
pub(crate) fn build_registry(cfg: &CliConfig, json: &Json) -> Result<TypeRegistry, String> {
    let mut names = cfg.types.iter().cloned().collect::<BTreeSet<_>>();
    if cfg.lenient {
        collect_custom_names(json, &mut names);
    }
    let mut registry = TypeRegistry::new();
    for name in &names {
        registry
            .register(ComponentType::dynamic(name.as_str()), name)
            .map_err(|e| e.to_string())?;
    }
    tracing::debug!(types = registry.len(), "built component registry");
    Ok(registry)
}

pub(crate) fn collect_custom_names(json: &Json, out: &mut BTreeSet<String>) {
    match json {
        Json::Array(items) => items.iter().for_each(|item| collect_custom_names(item, out)),
        Json::Object(map) => {
            if let Some(name) = map
                .get(TYPE_KEY)
                .and_then(|tag| tag.get("custom"))
                .and_then(Json::as_str)
            {
                out.insert(name.to_string());
            }
            map.values().for_each(|v| collect_custom_names(v, out));
        }
        _ => {}
    }
}
