//! Settings file discovery and input loading.
//!
//! An explicitly named settings file must exist. Without one, `toygen.toml`
//! is looked up in the given directory and silently skipped when missing.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ToygenError;
use crate::settings::SETTINGS_FILE_NAME;

/// Load the settings file, if any. Returns `(path, contents)`.
pub fn load_settings_file(
    explicit: Option<&Path>,
    dir: &Path,
) -> Result<Option<(PathBuf, String)>, ToygenError> {
    if let Some(path) = explicit {
        let content = read_text(path)?;
        return Ok(Some((path.to_path_buf(), content)));
    }

    let path = dir.join(SETTINGS_FILE_NAME);
    match std::fs::read_to_string(&path) {
        Ok(content) => {
            debug!(path = %path.display(), "found settings file");
            Ok(Some((path, content)))
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ToygenError::Read { path, source }),
    }
}

/// Read a whole text file, mapping failures to [`ToygenError::Read`].
pub fn read_text(path: &Path) -> Result<String, ToygenError> {
    std::fs::read_to_string(path).map_err(|source| ToygenError::Read {
        path: path.to_path_buf(),
        source,
    })
}
