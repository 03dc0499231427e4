use super::{ConfigFormat, ExclusionRules};
use crate::error::PackError;
use std::path::Path;

/// Rules together with the raw top-level keys they were read from
#[derive(Debug, Clone)]
pub struct ParsedRules {
    /// Parsed exclusion rules
    pub rules: ExclusionRules,
    /// Top-level keys present in the source document, in document order
    pub keys: Vec<String>,
}

/// Read and parse a rules file, choosing the format from its extension
///
/// # Errors
///
/// Returns [`PackError::Config`] if the file is absent, unreadable or
/// malformed.
pub fn parse_rules_file(path: &Path) -> Result<ParsedRules, PackError> {
    if !path.exists() {
        return Err(PackError::config(path, "file does not exist"));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| PackError::config(path, format!("cannot read file: {e}")))?;

    parse_rules_str(&content, ConfigFormat::from_path(path), path)
}

/// Parse rules from a string; `origin` is only used in error messages
///
/// # Errors
///
/// Returns [`PackError::Config`] if `content` is not a mapping with
/// string-list values under the known keys.
pub fn parse_rules_str(
    content: &str,
    format: ConfigFormat,
    origin: &Path,
) -> Result<ParsedRules, PackError> {
    match format {
        ConfigFormat::Json => parse_json(content, origin),
        ConfigFormat::Toml => parse_toml(content, origin),
    }
}

fn parse_json(content: &str, origin: &Path) -> Result<ParsedRules, PackError> {
    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| PackError::config(origin, format!("invalid JSON: {e}")))?;

    // Structs also deserialize from sequences, so insist on an object here.
    let serde_json::Value::Object(map) = value else {
        return Err(PackError::config(
            origin,
            "top-level value must be a mapping",
        ));
    };

    let keys = map.keys().cloned().collect();
    let rules = serde_json::from_value(serde_json::Value::Object(map))
        .map_err(|e| PackError::config(origin, format!("invalid rules: {e}")))?;

    Ok(ParsedRules { rules, keys })
}

fn parse_toml(content: &str, origin: &Path) -> Result<ParsedRules, PackError> {
    let table: toml::Table = toml::from_str(content)
        .map_err(|e| PackError::config(origin, format!("invalid TOML: {e}")))?;

    let keys = table.keys().cloned().collect();
    let rules = toml::Value::Table(table)
        .try_into::<ExclusionRules>()
        .map_err(|e| PackError::config(origin, format!("invalid rules: {e}")))?;

    Ok(ParsedRules { rules, keys })
}
