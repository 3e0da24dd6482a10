use std::collections::HashMap;
use anyhow::{anyhow, Result};

use crate::model::task::{Priority, Severity, Status};
use crate::service::dto::TaskDraft;

/// Field names accepted as `key:value` arguments. Any unique prefix works.
pub const FIELD_KEYS: [&str; 6] = ["due", "time", "status", "priority", "severity", "description"];

#[derive(Debug, PartialEq)]
pub struct ParsedInput {
    pub title: String,
    /// Keyed by the full field name.
    pub fields: HashMap<String, String>,
}

/// Splits arguments into title words and `key:value` fields.
///
/// Only the first colon separates key from value, so `time:10:30` works. An
/// argument whose key is not a field name stays part of the title
/// (`"Standup 10:00"`); a key that matches several fields is an error.
pub fn parse_args(args: &[String], candidates: &[&str]) -> Result<ParsedInput> {
    let mut title_parts = Vec::new();
    let mut fields = HashMap::new();

    for arg in args {
        if let Some((key, value)) = arg.split_once(':') {
            if !key.is_empty() {
                if let Some(full_key) = match_key(key, candidates)? {
                    fields.insert(full_key, value.to_string());
                    continue;
                }
            }
        }
        title_parts.push(arg.as_str());
    }

    Ok(ParsedInput {
        title: title_parts.join(" "),
        fields,
    })
}

pub fn expand_key(key: &str, candidates: &[&str]) -> Result<String> {
    match_key(key, candidates)?.ok_or_else(|| anyhow!("Unknown key: '{}'", key))
}

fn match_key(key: &str, candidates: &[&str]) -> Result<Option<String>> {
    let key = key.to_lowercase();

    // 1. Exact match
    if candidates.contains(&key.as_str()) {
        return Ok(Some(key));
    }

    // 2. Prefix match
    let matches: Vec<&str> = candidates
        .iter()
        .filter(|&&c| c.starts_with(&key))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(Some(matches[0].to_string())),
        0 => Ok(None),
        _ => Err(anyhow!("Ambiguous key: '{}' matches {:?}", key, matches)),
    }
}

/// Expands an enumerated value to its canonical spelling: exact match first
/// (ignoring case), then a unique prefix (`h` -> `High`, `in` -> `In Progress`).
/// `Ok(None)` means no known value matched.
fn expand_value(value: &str, canonical: &[&str]) -> Result<Option<String>> {
    let needle = value.trim().to_lowercase();
    if let Some(exact) = canonical.iter().find(|c| c.to_lowercase() == needle) {
        return Ok(Some(exact.to_string()));
    }

    let matches: Vec<&str> = canonical
        .iter()
        .filter(|c| c.to_lowercase().starts_with(&needle))
        .cloned()
        .collect();

    match matches.len() {
        1 => Ok(Some(matches[0].to_string())),
        0 => Ok(None),
        _ => Err(anyhow!("Ambiguous value: '{}' matches {:?}", value, matches)),
    }
}

/// Writes parsed fields into `draft`, returning warnings for enum values that
/// matched nothing. Those values are kept verbatim.
pub fn apply_fields(draft: &mut TaskDraft, fields: &HashMap<String, String>) -> Result<Vec<String>> {
    let statuses: Vec<&str> = Status::ALL.iter().map(|s| s.as_str()).collect();
    let priorities: Vec<&str> = Priority::ALL.iter().map(|p| p.as_str()).collect();
    let severities: Vec<&str> = Severity::ALL.iter().map(|s| s.as_str()).collect();

    let mut warnings = Vec::new();
    let mut enum_field = |name: &str, value: &str, canonical: &[&str]| -> Result<String> {
        match expand_value(value, canonical)? {
            Some(v) => Ok(v),
            None => {
                warnings.push(format!("Unknown {} '{}', expected one of {:?}", name, value, canonical));
                Ok(value.to_string())
            }
        }
    };

    for (key, value) in fields {
        match key.as_str() {
            "due" => draft.due_date = value.clone(),
            "time" => draft.time = Some(value.clone()),
            "description" => draft.description = Some(value.clone()),
            "status" => draft.status = Some(enum_field("status", value, &statuses)?),
            "priority" => draft.priority = Some(enum_field("priority", value, &priorities)?),
            "severity" => draft.severity = Some(enum_field("severity", value, &severities)?),
            other => return Err(anyhow!("Unknown key: '{}'", other)),
        }
    }

    Ok(warnings)
}
