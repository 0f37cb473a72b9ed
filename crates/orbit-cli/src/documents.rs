//! Loading JSON and YAML documents from disk
//!
//! Files ending in `.yaml` or `.yml` are read as YAML, everything else as
//! JSON. A file may hold a single document or a list of documents.

use crate::error::{CliError, CliResult};
use serde::de::DeserializeOwned;
use std::path::Path;

fn read_value(path: &Path) -> CliResult<serde_json::Value> {
    let contents = std::fs::read_to_string(path)?;
    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        Ok(serde_yaml::from_str(&contents)?)
    } else {
        Ok(serde_json::from_str(&contents)?)
    }
}

/// Load one document
pub fn load_one<T: DeserializeOwned>(path: &Path) -> CliResult<T> {
    let value = read_value(path)?;
    if value.is_array() {
        return Err(CliError::InvalidInput(format!(
            "{}: expected a single document, found a list",
            path.display()
        )));
    }
    Ok(serde_json::from_value(value)?)
}

/// Load a list of documents; a single document becomes a list of one
pub fn load_many<T: DeserializeOwned>(path: &Path) -> CliResult<Vec<T>> {
    match read_value(path)? {
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| serde_json::from_value(item).map_err(CliError::from))
            .collect(),
        serde_json::Value::Null => Ok(Vec::new()),
        value => Ok(vec![serde_json::from_value(value)?]),
    }
}

/// Parse a `KEY=VALUE` argument
pub fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .filter(|(key, _)| !key.is_empty())
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", arg))
}
