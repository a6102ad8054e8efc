//! Clap front end for the `toygen` binary.
//!
//! Compiled only with the `clap` Cargo feature (on by default). Parsed
//! arguments are turned into an [`Action`] plus a [`ToygenBuilder`]
//! carrying the command-line settings overrides; everything after that goes
//! through the clap-free core.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::builder::{Toygen, ToygenBuilder};
use crate::types::{Action, ArtifactKind};

/// Generate toolkit build headers from a kconfig-style .config file.
#[derive(Debug, Parser)]
#[command(name = "toygen", version)]
pub struct Cli {
    /// Settings file to use instead of ./toygen.toml.
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// The .config file to read.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Directory the headers are written to.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Regenerate all headers (the default).
    Generate,
    /// Print one generated header to stdout without writing files.
    Show {
        #[arg(value_enum)]
        artifact: ArtifactKind,
    },
    /// Print a commented settings template.
    Settings {
        /// Write to a file instead of stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

impl Cli {
    /// Convert the parsed subcommand into a framework-agnostic [`Action`].
    /// No subcommand means `generate`.
    pub fn action(&self) -> Action {
        match &self.command {
            None | Some(Command::Generate) => Action::Generate,
            Some(Command::Show { artifact }) => Action::Show {
                artifact: *artifact,
            },
            Some(Command::Settings { output }) => Action::Template {
                output: output.clone(),
            },
        }
    }

    /// A builder carrying `--settings`, `--input` and `--output-dir`.
    pub fn builder(&self) -> ToygenBuilder {
        let mut builder = Toygen::builder()
            .set_path("input", self.input.as_deref())
            .set_path("output_dir", self.output_dir.as_deref());
        if let Some(path) = &self.settings {
            builder = builder.settings_file(path);
        }
        builder
    }

    /// Default log filter for the `-v` count.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}
