//! Parsing of kconfig-style `.config` files into typed entries.
//!
//! Three line shapes are recognized, tried in this order:
//!
//! ```text
//! CONFIG_CAT=y                  -> Enabled
//! # CONFIG_LS is not set        -> Disabled
//! CONFIG_TOYBOX_UID_SYS=100     -> Valued("100")
//! ```
//!
//! Every other line (blank lines, ordinary comments, garbage) is skipped
//! silently. A `.config` is produced by tooling, so the parser is permissive
//! rather than strict.

use tracing::debug;

const PREFIX: &str = "CONFIG_";

/// The state a config line assigns to its symbol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState {
    /// `CONFIG_S=y`
    Enabled,
    /// `# CONFIG_S is not set`
    Disabled,
    /// `CONFIG_S=<value>` with `n`/`y` normalized to `0`/`1`.
    Valued(String),
}

impl EntryState {
    /// The literal bound to `CFG_<symbol>`.
    pub fn value(&self) -> &str {
        match self {
            EntryState::Enabled => "1",
            EntryState::Disabled => "0",
            EntryState::Valued(v) => v,
        }
    }

    /// Whether `USE_<symbol>` should expand its arguments.
    ///
    /// A valued entry counts as active unless its value is literally `0`.
    pub fn is_active(&self) -> bool {
        match self {
            EntryState::Enabled => true,
            EntryState::Disabled => false,
            EntryState::Valued(v) => v != "0",
        }
    }
}

/// One recognized line of the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigEntry {
    pub symbol: String,
    pub state: EntryState,
}

impl ConfigEntry {
    pub fn new(symbol: impl Into<String>, state: EntryState) -> Self {
        Self {
            symbol: symbol.into(),
            state,
        }
    }
}

/// All entries of one config file, in file order.
///
/// Duplicate symbols are kept. Lookups resolve to the last occurrence, which
/// matches what a C preprocessor sees after textual redefinition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEntries {
    entries: Vec<ConfigEntry>,
}

impl ConfigEntries {
    pub fn iter(&self) -> impl Iterator<Item = &ConfigEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// State of the last entry for `symbol`, if any.
    pub fn state_of(&self, symbol: &str) -> Option<&EntryState> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.symbol == symbol)
            .map(|e| &e.state)
    }

    /// True when the last entry for `symbol` is `CONFIG_<symbol>=y`.
    pub fn is_enabled(&self, symbol: &str) -> bool {
        matches!(self.state_of(symbol), Some(EntryState::Enabled))
    }
}

impl From<Vec<ConfigEntry>> for ConfigEntries {
    fn from(entries: Vec<ConfigEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a ConfigEntries {
    type Item = &'a ConfigEntry;
    type IntoIter = std::slice::Iter<'a, ConfigEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Parse the full text of a config file.
pub fn parse_config(content: &str) -> ConfigEntries {
    let entries: Vec<ConfigEntry> = content.lines().filter_map(parse_line).collect();
    debug!(entries = entries.len(), "parsed config entries");
    ConfigEntries::from(entries)
}

/// Parse a single line. Returns `None` for anything that is not a config statement.
pub fn parse_line(line: &str) -> Option<ConfigEntry> {
    let line = line.trim();
    parse_enabled(line)
        .or_else(|| parse_disabled(line))
        .or_else(|| parse_valued(line))
}

fn parse_enabled(line: &str) -> Option<ConfigEntry> {
    let (symbol, value) = split_assignment(line)?;
    (value == "y").then(|| ConfigEntry::new(symbol, EntryState::Enabled))
}

fn parse_disabled(line: &str) -> Option<ConfigEntry> {
    let rest = line.strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix(PREFIX)?;
    let (symbol, tail) = take_symbol(rest)?;

    // At least one whitespace character must separate the symbol from `is`.
    if !tail.starts_with(char::is_whitespace) {
        return None;
    }
    let words: Vec<&str> = tail.split_whitespace().collect();
    (words == ["is", "not", "set"]).then(|| ConfigEntry::new(symbol, EntryState::Disabled))
}

fn parse_valued(line: &str) -> Option<ConfigEntry> {
    let (symbol, value) = split_assignment(line)?;
    Some(ConfigEntry::new(
        symbol,
        EntryState::Valued(normalize(value.trim())),
    ))
}

/// Split `CONFIG_<SYMBOL>=<rest>` into symbol and raw right-hand side.
fn split_assignment(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix(PREFIX)?;
    let (symbol, tail) = take_symbol(rest)?;
    let value = tail.strip_prefix('=')?;
    Some((symbol, value))
}

/// Take the leading `[A-Z0-9_]+` run. Fails on an empty run.
fn take_symbol(s: &str) -> Option<(&str, &str)> {
    let end = s
        .find(|c: char| !is_symbol_char(c))
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    Some(s.split_at(end))
}

fn is_symbol_char(c: char) -> bool {
    c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'
}

fn normalize(value: &str) -> String {
    match value {
        "n" => "0".to_string(),
        "y" => "1".to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(line: &str) -> Option<EntryState> {
        parse_line(line).map(|e| e.state)
    }

    #[test]
    fn enabled_line() {
        let entry = parse_line("CONFIG_CAT=y").unwrap();
        assert_eq!(entry.symbol, "CAT");
        assert_eq!(entry.state, EntryState::Enabled);
    }

    #[test]
    fn enabled_line_with_surrounding_whitespace() {
        assert_eq!(state("   CONFIG_CAT=y \t"), Some(EntryState::Enabled));
    }

    #[test]
    fn disabled_line() {
        let entry = parse_line("# CONFIG_LS is not set").unwrap();
        assert_eq!(entry.symbol, "LS");
        assert_eq!(entry.state, EntryState::Disabled);
    }

    #[test]
    fn disabled_line_flexible_whitespace() {
        assert_eq!(state("#CONFIG_LS   is\tnot  set"), Some(EntryState::Disabled));
    }

    #[test]
    fn disabled_line_requires_exact_words() {
        assert_eq!(state("# CONFIG_LS is not set yet"), None);
        assert_eq!(state("# CONFIG_LS is set"), None);
        assert_eq!(state("# CONFIG_LSis not set"), None);
    }

    #[test]
    fn valued_line_keeps_text() {
        assert_eq!(
            state("CONFIG_TOYBOX_UID_SYS=100"),
            Some(EntryState::Valued("100".into()))
        );
        assert_eq!(
            state(r#"CONFIG_PREFIX="/usr""#),
            Some(EntryState::Valued(r#""/usr""#.into()))
        );
    }

    #[test]
    fn valued_line_normalizes_y_and_n() {
        assert_eq!(state("CONFIG_FOO=n"), Some(EntryState::Valued("0".into())));
        assert_eq!(state("CONFIG_FOO= y"), Some(EntryState::Valued("1".into())));
    }

    #[test]
    fn valued_line_trims_value() {
        assert_eq!(
            state("CONFIG_FOO=  42  "),
            Some(EntryState::Valued("42".into()))
        );
    }

    #[test]
    fn empty_value_is_valued() {
        assert_eq!(state("CONFIG_FOO="), Some(EntryState::Valued(String::new())));
    }

    #[test]
    fn non_statements_ignored() {
        assert_eq!(state(""), None);
        assert_eq!(state("# Automatically generated make config"), None);
        assert_eq!(state("CONFIG_lower=y"), None);
        assert_eq!(state("CONFIG_=y"), None);
        assert_eq!(state("CONFIG_FOO"), None);
        assert_eq!(state("XCONFIG_FOO=y"), None);
    }

    #[test]
    fn parse_preserves_order() {
        let text = "\
# header comment
CONFIG_TOYBOX=y

# CONFIG_LS is not set
CONFIG_CAT=y
CONFIG_TOYBOX_UID_SYS=100
";
        let entries = parse_config(text);
        let symbols: Vec<&str> = entries.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(symbols, ["TOYBOX", "LS", "CAT", "TOYBOX_UID_SYS"]);
    }

    #[test]
    fn duplicate_symbol_last_occurrence_wins() {
        let entries = parse_config("CONFIG_CAT=y\n# CONFIG_CAT is not set\n");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries.state_of("CAT"), Some(&EntryState::Disabled));
        assert!(!entries.is_enabled("CAT"));

        let entries = parse_config("# CONFIG_CAT is not set\nCONFIG_CAT=y\n");
        assert!(entries.is_enabled("CAT"));
    }

    #[test]
    fn valued_one_is_not_enabled() {
        let entries = parse_config("CONFIG_CAT=1\n");
        assert!(!entries.is_enabled("CAT"));
        assert_eq!(entries.state_of("CAT"), Some(&EntryState::Valued("1".into())));
    }

    #[test]
    fn activity_of_states() {
        assert!(EntryState::Enabled.is_active());
        assert!(!EntryState::Disabled.is_active());
        assert!(EntryState::Valued("100".into()).is_active());
        assert!(!EntryState::Valued("0".into()).is_active());
    }
}
