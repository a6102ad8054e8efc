//! Settings resolution: merge all layers and produce a typed [`Settings`].
//!
//! Operates on pre-loaded data with no I/O, so every layer can be tested with
//! synthetic input. Steps:
//!
//! 1. Validate the settings file (if strict)
//! 2. Parse the file into a `toml::Table`
//! 3. Deep-merge `TOYGEN__*` environment variables on top
//! 4. Deep-merge command-line overrides on top (highest priority)
//! 5. Deserialize into the settings layer and let confique fill defaults

use std::path::PathBuf;

use confique::Config;
use toml::{Table, Value};

use crate::error::ToygenError;
use crate::settings::{self, Settings};
use crate::validate;

/// Everything needed to resolve settings. No I/O happens here.
#[derive(Debug, Clone, Default)]
pub struct SettingsInput {
    /// Settings file path and contents, if one was found.
    pub file: Option<(PathBuf, String)>,
    /// Raw environment pairs (`std::env::vars().collect()` or synthetic data).
    pub env_vars: Vec<(String, String)>,
    /// Env var prefix. `None` disables the environment layer.
    pub env_prefix: Option<String>,
    /// Command-line overrides as `(dotted_key, value)` pairs.
    pub overrides: Vec<(String, Value)>,
    /// Reject unknown keys in the settings file.
    pub strict: bool,
}

impl SettingsInput {
    /// Input with the standard `TOYGEN` env prefix and strict mode on.
    pub fn new() -> Self {
        Self {
            env_prefix: Some(settings::ENV_PREFIX.to_string()),
            strict: true,
            ..Self::default()
        }
    }
}

pub fn resolve_settings(input: SettingsInput) -> Result<Settings, ToygenError> {
    let mut merged = Table::new();

    if let Some((path, content)) = &input.file {
        if input.strict {
            validate::validate_unknown_settings(content, path)?;
        }
        let table: Table = toml::from_str(content).map_err(|source| ToygenError::SettingsParse {
            path: path.clone(),
            source,
        })?;
        merged = deep_merge(merged, table);
    }

    if let Some(prefix) = &input.env_prefix {
        merged = deep_merge(merged, env_to_table(prefix, input.env_vars));
    }

    if !input.overrides.is_empty() {
        merged = deep_merge(merged, overrides_to_table(&input.overrides)?);
    }

    let layer: <Settings as Config>::Layer =
        Value::Table(merged)
            .try_into()
            .map_err(|e: toml::de::Error| ToygenError::InvalidSetting {
                key: "<merged>".into(),
                reason: e.to_string(),
            })?;

    Ok(Settings::builder().preloaded(layer).load()?)
}

/// Build a table from `{PREFIX}__*` variables.
///
/// `__` separates nesting levels and segments are lowercased, so
/// `TOYGEN__ARTIFACTS__FLAGS` maps to `artifacts.flags`. Every setting is a
/// path or file name, so values stay strings.
fn env_to_table(prefix: &str, vars: Vec<(String, String)>) -> Table {
    let needle = format!("{prefix}__");
    let mut table = Table::new();

    for (key, value) in vars {
        let Some(rest) = key.strip_prefix(&needle).filter(|r| !r.is_empty()) else {
            continue;
        };
        let segments: Vec<String> = rest.split("__").map(str::to_lowercase).collect();
        table = deep_merge(table, nest(&segments, Value::String(value)));
    }

    table
}

/// Expand dotted-key overrides into a nested table. Later entries win.
///
/// Keys must name a setting; anything else is rejected.
fn overrides_to_table(entries: &[(String, Value)]) -> Result<Table, ToygenError> {
    let valid = settings::valid_keys();
    let mut table = Table::new();

    for (dotted_key, value) in entries {
        if !valid.contains(dotted_key) {
            return Err(ToygenError::InvalidSetting {
                key: dotted_key.clone(),
                reason: "no such setting".into(),
            });
        }
        let segments: Vec<&str> = dotted_key.split('.').collect();
        table = deep_merge(table, nest(&segments, value.clone()));
    }

    Ok(table)
}

/// Wrap `value` in one table per key segment: `["a", "b"]` gives `{a = {b = value}}`.
fn nest<S: AsRef<str>>(segments: &[S], value: Value) -> Table {
    let mut value = value;
    for segment in segments.iter().skip(1).rev() {
        let mut table = Table::new();
        table.insert(segment.as_ref().to_string(), value);
        value = Value::Table(table);
    }
    let mut root = Table::new();
    if let Some(first) = segments.first() {
        root.insert(first.as_ref().to_string(), value);
    }
    root
}

/// Overlay wins, except where both sides hold a table: those merge recursively.
fn deep_merge(mut base: Table, overlay: Table) -> Table {
    for (key, value) in overlay {
        let merged = match (base.remove(&key), value) {
            (Some(Value::Table(b)), Value::Table(o)) => Value::Table(deep_merge(b, o)),
            (_, v) => v,
        };
        base.insert(key, merged);
    }
    base
}
