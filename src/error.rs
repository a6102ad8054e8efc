use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToygenError {
    #[error(
        "Too many distinct flags: {count} (including the reserved multiplexer flag) exceeds the {capacity}-bit flag field"
    )]
    FlagCapacity { count: usize, capacity: usize },

    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unknown setting '{key}' in {path} (line {line})")]
    UnknownSetting {
        key: String,
        path: PathBuf,
        line: usize,
    },

    #[error("Unknown settings in settings file")]
    UnknownSettings(Vec<ToygenError>),

    #[error("Failed to parse {path}: {source}")]
    SettingsParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Settings error: {0}")]
    Settings(#[from] confique::Error),

    #[error("Invalid value for setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Failed to render header: {0}")]
    Render(#[from] std::fmt::Error),
}
