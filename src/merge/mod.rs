//! Configuration merging
//!
//! Deep-merges an override mapping onto a base mapping.
//!
//! ## Merge Rules
//!
//! For every key in the override (later overrides earlier):
//! 1. Key missing from base: the override value is added as-is
//! 2. Both values are mappings: merged recursively
//! 3. Anything else (scalars, null, sequences, type mismatches): the override
//!    value replaces the base value
//!
//! Keys that only exist in the base are kept unchanged. Sequences are never
//! merged element-wise, and an explicit `null` clears the base value.
//!
//! ## Example Usage
//!
//! ```
//! use serde_json::json;
//! use shared_config::merge::merge_values;
//!
//! let base = json!({"display": {"Theme": "Light", "Scale": 100}});
//! let overrides = json!({"display": {"Theme": "Dark"}});
//!
//! let merged = merge_values(&base, &overrides)?;
//! assert_eq!(merged, json!({"display": {"Theme": "Dark", "Scale": 100}}));
//! # Ok::<(), shared_config::merge::MergeError>(())
//! ```

/// Any JSON-shaped configuration value
pub type ConfigValue = serde_json::Value;

/// String-keyed configuration mapping (insertion ordered)
pub type Mapping = serde_json::Map<String, ConfigValue>;

#[derive(Debug, thiserror::Error)]
pub enum MergeError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, MergeError>;

/// Merge `overrides` onto `base`, returning a new mapping
///
/// Neither input is modified.
pub fn merge(base: &Mapping, overrides: &Mapping) -> Mapping {
    let mut result = base.clone();

    for (key, value) in overrides {
        let merged = match (result.get(key), value) {
            (Some(ConfigValue::Object(existing)), ConfigValue::Object(nested)) => {
                ConfigValue::Object(merge(existing, nested))
            }
            _ => value.clone(),
        };
        result.insert(key.clone(), merged);
    }

    result
}

/// Merge two dynamically typed values
///
/// Both values must be mappings at the top level.
pub fn merge_values(base: &ConfigValue, overrides: &ConfigValue) -> Result<ConfigValue> {
    let base = expect_mapping(base, "base")?;
    let overrides = expect_mapping(overrides, "override")?;
    Ok(ConfigValue::Object(merge(base, overrides)))
}

/// Fold any number of override layers onto `base`, left to right
pub fn merge_layers<'a, I>(base: &Mapping, layers: I) -> Mapping
where
    I: IntoIterator<Item = &'a Mapping>,
{
    layers
        .into_iter()
        .fold(base.clone(), |acc, layer| merge(&acc, layer))
}

/// Take ownership of a value as a mapping or fail with InvalidArgument
pub fn into_mapping(value: ConfigValue, role: &str) -> Result<Mapping> {
    match value {
        ConfigValue::Object(map) => Ok(map),
        other => Err(not_a_mapping(&other, role)),
    }
}

fn expect_mapping<'a>(value: &'a ConfigValue, role: &str) -> Result<&'a Mapping> {
    value.as_object().ok_or_else(|| not_a_mapping(value, role))
}

fn not_a_mapping(value: &ConfigValue, role: &str) -> MergeError {
    MergeError::InvalidArgument(format!(
        "{} configuration must be a mapping, got {}",
        role,
        kind_name(value)
    ))
}

fn kind_name(value: &ConfigValue) -> &'static str {
    match value {
        ConfigValue::Null => "null",
        ConfigValue::Bool(_) => "boolean",
        ConfigValue::Number(_) => "number",
        ConfigValue::String(_) => "string",
        ConfigValue::Array(_) => "sequence",
        ConfigValue::Object(_) => "mapping",
    }
}
