// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rule file TOML parsing

use crate::{Rule, RuleSet, TitleMatch};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while reading a rule file
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid format: {0}")]
    InvalidFormat(String),
    #[error("no rules defined")]
    NoRules,
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Read and parse a rule file
pub fn load_rules(path: &Path) -> Result<RuleSet, RuleError> {
    let content = std::fs::read_to_string(path).map_err(|source| RuleError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_rules(&content)
}

/// Parse rules from TOML content.
///
/// ```toml
/// [[rule]]
/// channel = "Arte"
/// title = { contains = "Journal" }
/// ```
pub fn parse_rules(content: &str) -> Result<RuleSet, RuleError> {
    let raw: toml::Value = toml::from_str(content)?;
    let table = raw
        .as_table()
        .ok_or_else(|| RuleError::InvalidFormat("root must be a table".to_string()))?;

    let entries = match table.get("rule") {
        None => return Err(RuleError::NoRules),
        Some(value) => value
            .as_array()
            .ok_or_else(|| RuleError::InvalidFormat("rule must be an array of tables".into()))?,
    };

    let mut rules = Vec::with_capacity(entries.len());
    for (index, value) in entries.iter().enumerate() {
        rules.push(parse_rule(index, value)?);
    }

    if rules.is_empty() {
        return Err(RuleError::NoRules);
    }
    Ok(RuleSet { rules })
}

fn parse_rule(index: usize, value: &toml::Value) -> Result<Rule, RuleError> {
    let table = value
        .as_table()
        .ok_or_else(|| RuleError::InvalidFormat(format!("rule {index} must be a table")))?;

    let channel = optional_string(table, "channel", index)?;

    let title = match table.get("title") {
        None => {
            tracing::warn!(rule = index, "rule has no title condition and never matches");
            None
        }
        Some(toml::Value::String(exact)) => Some(TitleMatch {
            is: Some(exact.clone()),
            contains: None,
        }),
        Some(toml::Value::Table(t)) => {
            let is = optional_string(t, "is", index)?;
            let contains = optional_string(t, "contains", index)?;
            if is.is_none() && contains.is_none() {
                return Err(RuleError::InvalidFormat(format!(
                    "rule {index}: title needs `is` or `contains`"
                )));
            }
            Some(TitleMatch { is, contains })
        }
        Some(_) => {
            return Err(RuleError::InvalidFormat(format!(
                "rule {index}: title must be a string or a table"
            )))
        }
    };

    Ok(Rule { channel, title })
}

fn optional_string(
    table: &toml::map::Map<String, toml::Value>,
    key: &str,
    index: usize,
) -> Result<Option<String>, RuleError> {
    match table.get(key) {
        None => Ok(None),
        Some(toml::Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(RuleError::InvalidFormat(format!(
            "rule {index}: {key} must be a string"
        ))),
    }
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
