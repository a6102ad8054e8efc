//! Strict-mode check for settings files.
//!
//! Deserializes the file into the all-optional settings layer through
//! `serde_ignored`, collecting every key the layer does not consume. Each
//! unknown key is reported with a best-effort line number.

use std::path::Path;

use confique::Config;

use crate::error::ToygenError;
use crate::settings::Settings;

type SettingsLayer = <Settings as Config>::Layer;

/// Reject settings files containing keys that [`Settings`] does not define.
pub fn validate_unknown_settings(content: &str, path: &Path) -> Result<(), ToygenError> {
    let mut unknown: Vec<String> = Vec::new();

    let deserializer = toml::Deserializer::new(content);
    let _layer: SettingsLayer = serde_ignored::deserialize(deserializer, |ignored| {
        unknown.push(ignored.to_string());
    })
    .map_err(|source| ToygenError::SettingsParse {
        path: path.to_path_buf(),
        source,
    })?;

    if unknown.is_empty() {
        return Ok(());
    }

    let errors = unknown
        .into_iter()
        .map(|key| ToygenError::UnknownSetting {
            line: key_line(content, &key),
            key,
            path: path.to_path_buf(),
        })
        .collect();
    Err(ToygenError::UnknownSettings(errors))
}

/// 1-indexed line of a dotted key's assignment, or 0 if it cannot be found.
///
/// Tracks `[section]` headers so `artifacts.typo` is only matched inside
/// `[artifacts]`. Quoted keys and inline tables are not handled.
fn key_line(content: &str, dotted_key: &str) -> usize {
    let (section, leaf) = match dotted_key.rsplit_once('.') {
        Some((section, leaf)) => (section, leaf),
        None => ("", dotted_key),
    };

    let mut current = String::new();
    for (idx, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if let Some(header) = line
            .strip_prefix('[')
            .filter(|h| !h.starts_with('['))
            .and_then(|h| h.strip_suffix(']'))
        {
            current = header
                .split('.')
                .map(str::trim)
                .collect::<Vec<_>>()
                .join(".");
            continue;
        }
        if current != section {
            continue;
        }
        if let Some(rest) = line.strip_prefix(leaf)
            && rest.trim_start().starts_with('=')
        {
            return idx + 1;
        }
    }
    0
}
