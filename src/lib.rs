//! Build-time header generator for a multi-command toolkit. Point it at a
//! kconfig-style `.config` and it writes the headers the C build includes.
//!
//! ```ignore
//! let toygen = Toygen::builder().load()?;
//! toygen.handle(&Action::Generate)?;
//! ```
//!
//! That call reads `.config`, and writes `generated/config.h`,
//! `generated/newtoys.h`, `generated/options.h` and `generated/flags.h`.
//!
//! # Input
//!
//! One statement per line, the format `make menuconfig` produces:
//!
//! ```text
//! CONFIG_TOYBOX=y
//! CONFIG_CAT=y
//! # CONFIG_LS is not set
//! CONFIG_TOYBOX_UID_SYS=100
//! ```
//!
//! Anything else (comments, blank lines) is ignored. If a symbol appears more
//! than once, every occurrence is emitted to `config.h` in order, and command
//! selection uses the last one.
//!
//! # Output
//!
//! | Header | Contents |
//! |--------|----------|
//! | `config.h` | `CFG_S`, `USE_S(...)`, `SKIP_S(...)` for every symbol |
//! | `newtoys.h` | `USE_S(NEWTOY(name, "optstr", placement))` per enabled command |
//! | `options.h` | `OPTSTR_name` and `HELP_name` per enabled command |
//! | `flags.h` | `FLAG_x (1ULL<<n)` per distinct flag of the enabled commands |
//!
//! The command table lives in [`catalog`]. Flag bits are shared across
//! commands and must fit in one 64-bit word; see [`flags`] for the
//! allocation rules. Running out of bits is an error
//! ([`ToygenError::FlagCapacity`]) and nothing is written.
//!
//! Headers are built in memory first and each one is replaced through a
//! temporary file and a rename, so a failed run leaves the previous headers
//! intact.
//!
//! # Settings
//!
//! Paths come from [`Settings`], resolved from compiled defaults, an optional
//! `toygen.toml`, `TOYGEN__*` environment variables and command-line
//! overrides, in increasing priority. Unknown keys in `toygen.toml` are
//! rejected with their line number.
//!
//! # Logging
//!
//! The library emits [`tracing`] events and never installs a subscriber. The
//! `toygen` binary logs to stderr, filtered by `RUST_LOG` or `-v`.

pub mod catalog;
pub mod defines;
pub mod entry;
pub mod error;
pub mod flags;
pub mod generate;
pub mod settings;
pub mod types;

mod builder;
#[cfg(feature = "clap")]
pub mod cli;
mod file;
mod ops;
mod resolve;
mod validate;

pub use builder::{Toygen, ToygenBuilder};
pub use catalog::{COMMANDS, CommandSpec};
pub use entry::{ConfigEntries, ConfigEntry, EntryState, parse_config};
pub use error::ToygenError;
pub use flags::{FlagAssignment, FlagName, allocate};
pub use generate::{Artifacts, generate, generate_with, write_artifacts};
pub use ops::Outcome;
pub use resolve::{SettingsInput, resolve_settings};
pub use settings::Settings;
pub use types::{Action, ArtifactKind};
