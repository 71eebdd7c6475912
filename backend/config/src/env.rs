//! Environment variable substitution for config values.
//!
//! Supports `${VAR_NAME}` syntax in string values, resolved at load time.
//! Only uppercase `[A-Z_][A-Z0-9_]*` variable names are matched.
//! `$${}` escapes to a literal `${}`.

use anyhow::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::HashMap;

/// Pattern matching valid uppercase env var names.
static ENV_VAR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap());

/// Error returned for missing env vars.
#[derive(Debug, thiserror::Error)]
#[error("Missing env var \"{var_name}\" referenced at config path: {config_path}")]
pub struct MissingEnvVarError {
    pub var_name: String,
    pub config_path: String,
}

/// Substitute `${VAR}` references in a config JSON value tree.
///
/// Walks the entire value tree recursively; only string leaves are processed.
/// Returns an error if any referenced env var is not set or is empty.
pub fn resolve_env_vars(value: &Value) -> Result<Value> {
    substitute_value(value, &std::env::vars().collect(), "")
}

/// Substitute env vars using a provided map (useful for testing).
pub fn resolve_env_vars_with(value: &Value, env: &HashMap<String, String>) -> Result<Value> {
    substitute_value(value, env, "")
}

fn substitute_value(value: &Value, env: &HashMap<String, String>, path: &str) -> Result<Value> {
    match value {
        Value::String(s) => {
            let substituted = substitute_string(s, env, path)?;
            Ok(Value::String(substituted))
        }
        Value::Array(arr) => {
            let result: Result<Vec<_>> = arr
                .iter()
                .enumerate()
                .map(|(i, v)| substitute_value(v, env, &format!("{path}[{i}]")))
                .collect();
            Ok(Value::Array(result?))
        }
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                let child_path = if path.is_empty() {
                    k.clone()
                } else {
                    format!("{path}.{k}")
                };
                result.insert(k.clone(), substitute_value(v, env, &child_path)?);
            }
            Ok(Value::Object(result))
        }
        // Primitives pass through unchanged.
        other => Ok(other.clone()),
    }
}

fn substitute_string(s: &str, env: &HashMap<String, String>, path: &str) -> Result<String> {
    let mut result = String::with_capacity(s.len());
    let mut last = 0;

    for caps in ENV_VAR_PATTERN.captures_iter(s) {
        let whole = caps.get(0).unwrap();
        let var_name = &caps[1];

        // `$${VAR}` escapes to a literal `${VAR}`.
        if whole.start() > 0 && s.as_bytes()[whole.start() - 1] == b'$' {
            result.push_str(&s[last..whole.start() - 1]);
            result.push_str(whole.as_str());
            last = whole.end();
            continue;
        }

        result.push_str(&s[last..whole.start()]);
        match env.get(var_name) {
            Some(v) if !v.is_empty() => result.push_str(v),
            _ => {
                return Err(MissingEnvVarError {
                    var_name: var_name.to_string(),
                    config_path: path.to_string(),
                }
                .into())
            }
        }
        last = whole.end();
    }

    result.push_str(&s[last..]);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitutes_string_leaves() {
        let value = json!({
            "destinations": [{"db_id": "${JOURNAL_DB}"}],
        });
        let resolved =
            resolve_env_vars_with(&value, &env(&[("JOURNAL_DB", "db-123")])).unwrap();
        assert_eq!(resolved["destinations"][0]["db_id"], "db-123");
    }

    #[test]
    fn test_missing_var_reports_path() {
        let value = json!({"db_id": "${NOT_SET}"});
        let err = resolve_env_vars_with(&value, &env(&[])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("NOT_SET"), "{msg}");
        assert!(msg.contains("db_id"), "{msg}");
    }

    #[test]
    fn test_escaped_reference_is_literal() {
        let value = json!("$${KEEP}");
        let resolved = resolve_env_vars_with(&value, &env(&[])).unwrap();
        assert_eq!(resolved, json!("${KEEP}"));
    }

    #[test]
    fn test_non_string_leaves_untouched() {
        let value = json!({"port": 5000, "flag": true});
        let resolved = resolve_env_vars_with(&value, &env(&[])).unwrap();
        assert_eq!(resolved, value);
    }
}
