//! `config.h` emission: one `CFG_`/`USE_`/`SKIP_` block per config entry.
//!
//! `USE_S(...)` and `SKIP_S(...)` are complementary. When `S` is active the
//! first passes its arguments through and the second swallows them; when it
//! is inactive the roles are swapped.

use std::fmt::{self, Write};

use crate::entry::{ConfigEntries, ConfigEntry};

/// The only symbol with an alias: `CFG_HELP` mirrors `CFG_TOYBOX_HELP`.
const HELP_SYMBOL: &str = "TOYBOX_HELP";

/// Render `config.h` for all entries, in file order.
pub fn emit_defines(entries: &ConfigEntries) -> Result<String, fmt::Error> {
    let mut out = String::new();
    for entry in entries {
        push_entry(&mut out, entry)?;
    }
    Ok(out)
}

fn push_entry(out: &mut String, entry: &ConfigEntry) -> fmt::Result {
    let symbol = &entry.symbol;
    let value = entry.state.value();

    writeln!(out, "#define CFG_{symbol} {value}")?;
    if entry.state.is_active() {
        writeln!(out, "#define USE_{symbol}(...) __VA_ARGS__")?;
        writeln!(out, "#define SKIP_{symbol}(...)")?;
    } else {
        writeln!(out, "#define USE_{symbol}(...)")?;
        writeln!(out, "#define SKIP_{symbol}(...) __VA_ARGS__")?;
    }
    if symbol == HELP_SYMBOL {
        writeln!(out, "#define CFG_HELP {value}")?;
    }
    Ok(())
}
