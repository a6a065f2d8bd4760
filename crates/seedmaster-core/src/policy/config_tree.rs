//! Small helpers for reading policy-specific fields out of the hierarchical
//! `services.NuRandomService.*` configuration subtree.
//!
//! The subtree is represented as a [`toml::Value`] rather than a fixed
//! `#[derive(Deserialize)]` struct because the per-engine offset/seed tables
//! in `preDefinedOffset`/`preDefinedSeed` are genuinely heterogeneous
//! (`moduleLabel -> int | { instanceName -> int }`) and read more plainly as
//! tree lookups than as a strongly-typed shape.

use toml::Value;

use crate::error::ConfigurationError;

/// Keys every policy recognizes regardless of kind (spec.md §4.1).
const COMMON_KEYS: &[&str] = &["policy", "verbosity", "endOfJobSummary"];

/// Warn (via `tracing::warn!`) about any top-level key in `tree` that is
/// neither a common key nor in `recognized`. Unknown keys are tolerated,
/// not rejected, here -- spec.md §6 notes the policy factory tolerates them
/// even though the host's own config validator may reject them; this is
/// the "at least warn" half of that sentence.
pub fn warn_unknown_keys(tree: &Value, policy: &'static str, recognized: &[&str]) {
    let Some(table) = tree.as_table() else {
        return;
    };
    for key in table.keys() {
        if COMMON_KEYS.contains(&key.as_str()) || recognized.contains(&key.as_str()) {
            continue;
        }
        tracing::warn!(policy, key = key.as_str(), "unrecognized configuration key");
    }
}

/// Read a required, non-negative integer field.
pub fn require_non_negative_i64(
    tree: &Value,
    policy: &'static str,
    key: &'static str,
) -> Result<i64, ConfigurationError> {
    let value = tree
        .get(key)
        .and_then(Value::as_integer)
        .ok_or(ConfigurationError::MissingRequiredKey { policy, key })?;
    if value < 0 {
        return Err(ConfigurationError::OutOfRange { policy, key, value });
    }
    Ok(value)
}

/// Read an optional non-negative integer field.
pub fn optional_non_negative_i64(
    tree: &Value,
    policy: &'static str,
    key: &'static str,
) -> Result<Option<i64>, ConfigurationError> {
    match tree.get(key).and_then(Value::as_integer) {
        Some(value) if value < 0 => Err(ConfigurationError::OutOfRange { policy, key, value }),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Read a boolean field, falling back to `default` when absent.
pub fn bool_or(tree: &Value, key: &str, default: bool) -> bool {
    tree.get(key).and_then(Value::as_bool).unwrap_or(default)
}

/// Read a signed integer field, falling back to `default` when absent.
pub fn i64_or(tree: &Value, key: &str, default: i64) -> i64 {
    tree.get(key).and_then(Value::as_integer).unwrap_or(default)
}

/// Read a string field, falling back to `default` when absent.
pub fn str_or<'a>(tree: &'a Value, key: &str, default: &'a str) -> &'a str {
    tree.get(key).and_then(Value::as_str).unwrap_or(default)
}

/// Look up the offset/seed tabulated for `(module_label, instance_name)` in a
/// `moduleLabel -> (int | { instanceName -> int })` tree.
///
/// A plain integer under `module_label` is shorthand for "the default
/// instance" and only matches an empty `instance_name`.
pub fn lookup_engine_value(tree: &Value, module_label: &str, instance_name: &str) -> Option<i64> {
    let key = if module_label.is_empty() {
        "<global>"
    } else {
        module_label
    };
    match tree.get(key)? {
        Value::Integer(v) => {
            if instance_name.is_empty() {
                Some(*v)
            } else {
                None
            }
        }
        Value::Table(t) => t.get(instance_name).and_then(Value::as_integer),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml_text: &str) -> Value {
        toml_text.parse::<Value>().expect("valid toml fixture")
    }

    #[test]
    fn flat_entry_matches_only_default_instance() {
        let tree = parse("modA = 7\n");
        assert_eq!(lookup_engine_value(&tree, "modA", ""), Some(7));
        assert_eq!(lookup_engine_value(&tree, "modA", "x"), None);
    }

    #[test]
    fn table_entry_matches_by_instance_name() {
        let tree = parse("[modB]\nx = 9\n");
        assert_eq!(lookup_engine_value(&tree, "modB", "x"), Some(9));
        assert_eq!(lookup_engine_value(&tree, "modB", "y"), None);
    }

    #[test]
    fn missing_module_label_is_none() {
        let tree = parse("modA = 7\n");
        assert_eq!(lookup_engine_value(&tree, "modC", ""), None);
    }

    #[test]
    fn warn_unknown_keys_does_not_panic_on_recognized_or_unrecognized_keys() {
        let tree = parse("baseSeed = 1\ncheckRange = true\ntypoedKey = 1\n");
        warn_unknown_keys(&tree, "autoIncrement", &["baseSeed", "checkRange", "maxUniqueEngines"]);
    }

    #[test]
    fn warn_unknown_keys_ignores_the_common_keys() {
        let tree = parse("policy = \"autoIncrement\"\nverbosity = 1\nendOfJobSummary = true\n");
        warn_unknown_keys(&tree, "autoIncrement", &["baseSeed"]);
    }

    #[test]
    fn require_non_negative_rejects_negative() {
        let tree = parse("baseSeed = -1\n");
        let err = require_non_negative_i64(&tree, "autoIncrement", "baseSeed").unwrap_err();
        assert_eq!(err.error_code(), "S1003");
    }

    #[test]
    fn require_non_negative_rejects_missing() {
        let tree = parse("");
        let err = require_non_negative_i64(&tree, "autoIncrement", "baseSeed").unwrap_err();
        assert_eq!(err.error_code(), "S1002");
    }
}
