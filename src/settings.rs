//! Tool settings: where to read the `.config` and where to put the headers.
//!
//! Settings are layered, lowest priority first:
//!
//! ```text
//! Compiled defaults     #[config(default = ...)]
//!        ↑ overridden by
//! Settings file         --settings FILE, or ./toygen.toml when present
//!        ↑ overridden by
//! Environment vars      TOYGEN__OUTPUT_DIR, TOYGEN__ARTIFACTS__FLAGS, ...
//!        ↑ overridden by
//! Command line          --input, --output-dir
//! ```
//!
//! The layering itself lives in [`resolve`](crate::resolve).

use std::collections::BTreeSet;
use std::path::PathBuf;

use confique::Config;
use confique::meta::{FieldKind, Meta};
use serde::{Deserialize, Serialize};

/// Default settings file name, looked up in the working directory.
pub const SETTINGS_FILE_NAME: &str = "toygen.toml";

/// Prefix for settings environment variables (`TOYGEN__<KEY>`).
pub const ENV_PREFIX: &str = "TOYGEN";

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Settings {
    /// The kconfig-style input file.
    #[config(default = ".config")]
    pub input: PathBuf,

    /// Directory the generated headers are written to. Created if missing.
    #[config(default = "generated")]
    pub output_dir: PathBuf,

    /// File names of the generated headers, relative to `output_dir`.
    #[config(nested)]
    pub artifacts: ArtifactNames,
}

#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ArtifactNames {
    /// CFG_/USE_/SKIP_ macros for every config symbol.
    #[config(default = "config.h")]
    pub config: String,

    /// NEWTOY registration lines for enabled commands.
    #[config(default = "newtoys.h")]
    pub newtoys: String,

    /// OPTSTR_ and HELP_ strings for enabled commands.
    #[config(default = "options.h")]
    pub options: String,

    /// FLAG_ bit definitions.
    #[config(default = "flags.h")]
    pub flags: String,
}

impl Settings {
    /// Settings with every value at its compiled default.
    pub fn defaults() -> Result<Self, confique::Error> {
        Self::builder().load()
    }

    pub fn config_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.config)
    }

    pub fn newtoys_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.newtoys)
    }

    pub fn options_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.options)
    }

    pub fn flags_path(&self) -> PathBuf {
        self.output_dir.join(&self.artifacts.flags)
    }
}

/// A commented TOML template built from the doc comments and defaults above.
pub fn template() -> String {
    confique::toml::template::<Settings>(confique::toml::FormatOptions::default())
}

/// All dotted leaf keys, e.g. `input`, `artifacts.flags`.
pub fn valid_keys() -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    collect_keys(&Settings::META, "", &mut keys);
    keys
}

fn collect_keys(meta: &Meta, prefix: &str, keys: &mut BTreeSet<String>) {
    for field in meta.fields {
        let dotted = if prefix.is_empty() {
            field.name.to_string()
        } else {
            format!("{prefix}.{}", field.name)
        };
        match &field.kind {
            FieldKind::Leaf { .. } => {
                keys.insert(dotted);
            }
            FieldKind::Nested { meta, .. } => collect_keys(meta, &dotted, keys),
        }
    }
}
