use std::fmt;
use std::path::PathBuf;

/// One of the generated headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ArtifactKind {
    /// `config.h`: CFG_/USE_/SKIP_ macros.
    Config,
    /// `newtoys.h`: command registrations.
    Newtoys,
    /// `options.h`: option strings and help texts.
    Options,
    /// `flags.h`: flag bit definitions.
    Flags,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArtifactKind::Config => "config",
            ArtifactKind::Newtoys => "newtoys",
            ArtifactKind::Options => "options",
            ArtifactKind::Flags => "flags",
        };
        f.write_str(name)
    }
}

/// A generator operation, independent of any CLI framework.
/// The CLI layer converts parsed clap args into this.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Regenerate every header and write it to the output directory.
    Generate,
    /// Generate and print one header without writing anything.
    Show { artifact: ArtifactKind },
    /// Produce a commented settings template.
    Template { output: Option<PathBuf> },
}
