use std::{io::Read, path::Path};

use airplane_output::{EmitterConfig, Outputs, PathSegment, StdoutSink};
use anyhow::{Context, Result};
use clap::ArgMatches;
use serde_json::Value;

pub fn dispatch(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches.get_one::<String>("config").map(String::as_str))?;
    let outputs = Outputs::new(StdoutSink::new(), config);

    match matches.subcommand() {
        Some(("set", sub_m)) => handle_set(&outputs, sub_m),
        Some(("append", sub_m)) => handle_append(&outputs, sub_m),
        Some(("named", sub_m)) => handle_named(&outputs, sub_m),
        _ => anyhow::bail!("Unknown command. Run 'airplane-emit --help' for usage."),
    }
}

fn handle_set(outputs: &Outputs<StdoutSink>, matches: &ArgMatches) -> Result<()> {
    let path = path_arg(matches)?;
    let value = value_arg(matches)?;
    outputs.set(&value, &path).context("setting output")
}

fn handle_append(outputs: &Outputs<StdoutSink>, matches: &ArgMatches) -> Result<()> {
    let path = path_arg(matches)?;
    let value = value_arg(matches)?;
    outputs.append(&value, &path).context("appending output")
}

fn handle_named(outputs: &Outputs<StdoutSink>, matches: &ArgMatches) -> Result<()> {
    let name = matches
        .get_one::<String>("name")
        .map_or("", String::as_str);
    let value = value_arg(matches)?;
    outputs
        .named(name, &value)
        .with_context(|| format!("writing output {name}"))
}

fn load_config(path: Option<&str>) -> Result<EmitterConfig> {
    let config = match path {
        Some(path) => EmitterConfig::load(Path::new(path)),
        None => EmitterConfig::from_env(),
    }?;
    tracing::debug!(?config, "emitter configuration");
    Ok(config)
}

fn path_arg(matches: &ArgMatches) -> Result<Vec<PathSegment>> {
    matches
        .get_many::<String>("path")
        .into_iter()
        .flatten()
        .map(|raw| parse_segment(raw))
        .collect()
}

/// JSON strings are keys and JSON integers are indices. Text that is not JSON
/// at all is taken as a key, so `-p rows` works without quoting.
///
/// Canonical decimal integers are read as `i128` before JSON, which would turn
/// anything beyond `u64::MAX` into a float.
fn parse_segment(raw: &str) -> Result<PathSegment> {
    if let Some(index) = raw
        .parse::<i128>()
        .ok()
        .filter(|index| index.to_string() == raw)
    {
        return Ok(PathSegment::index(index));
    }

    match serde_json::from_str::<Value>(raw) {
        Ok(value) => PathSegment::try_from(value).with_context(|| format!("--path {raw}")),
        Err(_) => Ok(PathSegment::from(raw)),
    }
}

fn value_arg(matches: &ArgMatches) -> Result<Value> {
    let raw = match matches.get_one::<String>("value") {
        Some(raw) => raw.clone(),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read value from stdin")?;
            buf
        }
    };
    serde_json::from_str(&raw).context("Value is not valid JSON")
}
