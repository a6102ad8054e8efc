//! The fixed table of commands the generator knows about.
//!
//! Adding a command is a data change: append a [`CommandSpec`] to
//! [`COMMANDS`]. A command is emitted when its config symbol is enabled
//! (`CONFIG_<SYMBOL>=y`). The multiplexer is always emitted first.
//!
//! Each enabled command contributes three lines across two artifacts:
//!
//! ```text
//! newtoys.h:  USE_CAT(NEWTOY(cat, "uvte", TOYFLAG_BIN))
//! options.h:  #define OPTSTR_cat "uvte"
//!             #define HELP_cat "usage: cat ..."
//! ```

use std::fmt::{self, Write};

use tracing::debug;

use crate::entry::ConfigEntries;

/// Config symbol of the multiplexer command.
pub const MULTIPLEXER_SYMBOL: &str = "TOYBOX";

/// First line of `options.h`.
pub const OPTIONS_HEADER: &str = "// Command options strings and help texts";

/// One known command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    /// Config symbol without the `CONFIG_` prefix, e.g. `CAT`.
    pub symbol: &'static str,
    /// Command name as invoked, e.g. `cat`.
    pub name: &'static str,
    /// Option string as C string-literal contents (escapes are kept verbatim).
    pub optstr: &'static str,
    /// Placement flags passed to `NEWTOY`.
    pub placement: &'static str,
    pub help: &'static str,
    /// Flag names the option string contributes to the shared flag field.
    pub flags: &'static [&'static str],
}

pub static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        symbol: MULTIPLEXER_SYMBOL,
        name: "toybox",
        optstr: "l",
        placement: "TOYFLAG_USR|TOYFLAG_BIN",
        help: "Toybox multiplexer",
        flags: &["l"],
    },
    CommandSpec {
        symbol: "CAT",
        name: "cat",
        optstr: "uvte",
        placement: "TOYFLAG_BIN",
        help: "usage: cat [-uvtAbeEnstTvxXy] [FILE...] Concatenate files to stdout",
        flags: &["u", "v", "t", "e"],
    },
    CommandSpec {
        symbol: "LS",
        name: "ls",
        optstr: r"(sort):(color):;(full-time)(show-control-chars)\377(block-size)#=1024<1\241(group-directories-first)\376ZgoACFHLNRSUXabcdfhilmnopqrstuwx",
        placement: "TOYFLAG_BIN",
        help: "usage: ls [opts] [path...] List directory contents",
        flags: &[
            "1",
            "A",
            "C",
            "F",
            "H",
            "L",
            "N",
            "R",
            "S",
            "U",
            "X",
            "X21",
            "X7E",
            "Z",
            "a",
            "b",
            "block_size",
            "c",
            "color",
            "d",
            "f",
            "full_time",
            "g",
            "group_directories_first",
            "h",
            "i",
            "k",
            "l",
            "m",
            "n",
            "o",
            "p",
            "q",
            "r",
            "s",
            "show_control_chars",
            "sort",
            "t",
            "u",
            "v",
            "w",
            "x",
        ],
    },
];

/// Registration output: the `newtoys.h` and `options.h` artifacts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registrations {
    pub newtoys: String,
    pub options: String,
}

/// Enabled commands from [`COMMANDS`], multiplexer first.
pub fn enabled_commands(entries: &ConfigEntries) -> Vec<&'static CommandSpec> {
    enabled_commands_in(COMMANDS, entries)
}

/// Enabled commands from an arbitrary catalog, multiplexer first, then in
/// catalog order.
pub fn enabled_commands_in<'a>(
    catalog: &'a [CommandSpec],
    entries: &ConfigEntries,
) -> Vec<&'a CommandSpec> {
    let (multiplexer, rest): (Vec<&CommandSpec>, Vec<&CommandSpec>) = catalog
        .iter()
        .filter(|cmd| entries.is_enabled(cmd.symbol))
        .partition(|cmd| cmd.symbol == MULTIPLEXER_SYMBOL);

    let enabled: Vec<&CommandSpec> = multiplexer.into_iter().chain(rest).collect();
    debug!(
        commands = ?enabled.iter().map(|c| c.name).collect::<Vec<_>>(),
        "enabled commands"
    );
    enabled
}

/// Render `newtoys.h` and `options.h` for the given commands, in order.
pub fn emit_registrations(commands: &[&CommandSpec]) -> Result<Registrations, fmt::Error> {
    let mut newtoys = String::new();
    let mut options = String::new();
    options.push_str(OPTIONS_HEADER);
    options.push('\n');

    for cmd in commands {
        let CommandSpec {
            symbol,
            name,
            optstr,
            placement,
            help,
            ..
        } = cmd;
        writeln!(
            newtoys,
            "USE_{symbol}(NEWTOY({name}, \"{optstr}\", {placement}))"
        )?;
        writeln!(options, "#define OPTSTR_{name} \"{optstr}\"")?;
        writeln!(options, "#define HELP_{name} \"{help}\"")?;
    }

    Ok(Registrations { newtoys, options })
}
