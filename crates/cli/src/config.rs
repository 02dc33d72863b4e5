#![forbid(unsafe_code)]

use std::path::PathBuf;

pub(crate) const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Pack,
    Unpack,
    Inspect,
    Check,
}

impl Command {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "pack" => Some(Self::Pack),
            "unpack" => Some(Self::Unpack),
            "inspect" => Some(Self::Inspect),
            "check" => Some(Self::Check),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct CliConfig {
    pub(crate) command: Command,
    pub(crate) input: Option<PathBuf>,
    pub(crate) types: Vec<String>,
    pub(crate) lenient: bool,
    pub(crate) payload: bool,
    pub(crate) script_tag: bool,
    pub(crate) log_filter: String,
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Parsed {
    Help,
    Run(CliConfig),
}

pub(crate) fn usage() -> &'static str {
    "ej: pack, unpack and inspect encoded element trees\n\n\
USAGE:\n\
  ej pack    [--input FILE] [--script-tag]\n\
  ej unpack  [--input FILE]\n\
  ej inspect [--input FILE] [--payload] [--types A,B,...] [--lenient]\n\
  ej check   [--input FILE] [--payload] [--types A,B,...] [--lenient]\n\n\
NOTES:\n\
  - input is read from stdin unless --input / EJ_INPUT is set.\n\
  - --types / EJ_TYPES lists the component names the tree may use;\n\
    --lenient accepts every component name found in the input.\n\
  - --payload reads a packed (base64) payload instead of raw JSON.\n\
  - EJ_LOG sets the log filter (default: warn); logs go to stderr.\n"
}

/// Reads a variable through `lookup`, treating blank values as unset.
pub(crate) fn env_var(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn split_types(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// Flags win over environment variables.
pub(crate) fn parse_args(
    args: &[String],
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<Parsed, String> {
    if args.iter().any(|a| a == "-h" || a == "--help") {
        return Ok(Parsed::Help);
    }

    let mut input: Option<PathBuf> = env_var(&lookup, "EJ_INPUT").map(PathBuf::from);
    let mut types: Vec<String> = env_var(&lookup, "EJ_TYPES")
        .map(|v| split_types(&v))
        .unwrap_or_default();
    let log_filter =
        env_var(&lookup, "EJ_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    let mut lenient = false;
    let mut payload = false;
    let mut script_tag = false;

    let Some(first) = args.first() else {
        return Err("missing command (pack, unpack, inspect or check)".to_string());
    };
    let command = Command::parse(first).ok_or_else(|| format!("unknown command: {first}"))?;

    let mut i = 1usize;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                let v = args.get(i).ok_or("--input requires FILE")?;
                input = Some(PathBuf::from(v));
            }
            "--types" => {
                i += 1;
                let v = args.get(i).ok_or("--types requires A,B,...")?;
                types = split_types(v);
            }
            "--lenient" => lenient = true,
            "--payload" => payload = true,
            "--script-tag" => script_tag = true,
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    if script_tag && command != Command::Pack {
        return Err("--script-tag only applies to pack".to_string());
    }
    if payload && !matches!(command, Command::Inspect | Command::Check) {
        return Err("--payload only applies to inspect and check".to_string());
    }

    Ok(Parsed::Run(CliConfig {
        command,
        input,
        types,
        lenient,
        payload,
        script_tag,
        log_filter,
    }))
}
