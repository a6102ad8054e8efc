//! Result type for generator operations.

use std::fmt;
use std::path::PathBuf;

/// Result of an [`Action`](crate::Action). Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Headers written to disk, in write order.
    Generated { files: Vec<PathBuf> },
    /// One header's contents.
    Artifact(String),
    /// A settings template.
    Template(String),
    /// Confirmation that a template was written to a file.
    TemplateWritten { path: PathBuf },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Generated { files } => {
                for path in files {
                    writeln!(f, "Generated {}", path.display())?;
                }
                Ok(())
            }
            Outcome::Artifact(text) | Outcome::Template(text) => write!(f, "{text}"),
            Outcome::TemplateWritten { path } => {
                writeln!(f, "Settings template written to {}", path.display())
            }
        }
    }
}
