//! The generation pipeline.
//!
//! [`generate`] is pure: it turns the text of a `.config` into the four
//! header artifacts held in memory. [`write_artifacts`] then puts them on
//! disk. Each file is written to a temporary file in its target directory and
//! renamed into place, so a failed run never leaves a half-written header
//! behind. A generation error (flag overflow) means nothing is written.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::catalog::{self, CommandSpec};
use crate::defines;
use crate::entry;
use crate::error::ToygenError;
use crate::flags;
use crate::settings::Settings;
use crate::types::ArtifactKind;

/// The generated headers of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub config_h: String,
    pub newtoys_h: String,
    pub options_h: String,
    pub flags_h: String,
}

impl Artifacts {
    pub fn get(&self, kind: ArtifactKind) -> &str {
        match kind {
            ArtifactKind::Config => &self.config_h,
            ArtifactKind::Newtoys => &self.newtoys_h,
            ArtifactKind::Options => &self.options_h,
            ArtifactKind::Flags => &self.flags_h,
        }
    }
}

/// Generate all artifacts against the built-in command catalog.
pub fn generate(content: &str) -> Result<Artifacts, ToygenError> {
    generate_with(catalog::COMMANDS, content)
}

/// Generate all artifacts against an explicit command catalog.
pub fn generate_with(catalog: &[CommandSpec], content: &str) -> Result<Artifacts, ToygenError> {
    let entries = entry::parse_config(content);
    let config_h = defines::emit_defines(&entries)?;

    let commands = catalog::enabled_commands_in(catalog, &entries);
    let registrations = catalog::emit_registrations(&commands)?;

    let names = commands.iter().flat_map(|cmd| cmd.flags.iter().copied());
    let assignment = flags::allocate(names)?;

    debug!(
        entries = entries.len(),
        commands = commands.len(),
        flags = assignment.len(),
        "generated artifacts"
    );

    Ok(Artifacts {
        config_h,
        newtoys_h: registrations.newtoys,
        options_h: registrations.options,
        flags_h: assignment.to_header()?,
    })
}

/// Write every artifact to its configured path. Returns the paths written.
pub fn write_artifacts(
    artifacts: &Artifacts,
    settings: &Settings,
) -> Result<Vec<PathBuf>, ToygenError> {
    let targets = [
        (settings.config_path(), &artifacts.config_h),
        (settings.newtoys_path(), &artifacts.newtoys_h),
        (settings.options_path(), &artifacts.options_h),
        (settings.flags_path(), &artifacts.flags_h),
    ];

    let mut written = Vec::with_capacity(targets.len());
    for (path, content) in targets {
        write_atomic(&path, content)?;
        info!(path = %path.display(), bytes = content.len(), "wrote artifact");
        written.push(path);
    }
    Ok(written)
}

/// Replace `path` with `content` via a temp file in the same directory.
fn write_atomic(path: &Path, content: &str) -> Result<(), ToygenError> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let write_err = |source: std::io::Error| ToygenError::Write {
        path: path.to_path_buf(),
        source,
    };

    std::fs::create_dir_all(dir).map_err(|source| ToygenError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    if let Some(perms) = header_permissions(path) {
        tmp.as_file().set_permissions(perms).map_err(write_err)?;
    }
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Mode for a replaced header: the existing file's, else 0644.
#[cfg(unix)]
fn header_permissions(path: &Path) -> Option<std::fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    let perms = std::fs::metadata(path)
        .map(|meta| meta.permissions())
        .unwrap_or_else(|_| std::fs::Permissions::from_mode(0o644));
    Some(perms)
}

#[cfg(not(unix))]
fn header_permissions(path: &Path) -> Option<std::fs::Permissions> {
    std::fs::metadata(path).ok().map(|meta| meta.permissions())
}
