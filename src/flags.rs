//! Flag-bit allocation for `flags.h`.
//!
//! Every distinct flag name referenced by an enabled command gets one bit in
//! a single 64-bit field. The namespace is global: two commands that both
//! define `-v` share one `FLAG_v` bit.
//!
//! Allocation is deterministic. The multiplexer flag is pinned to bit 0, the
//! remaining names are visited in byte-lexicographic order, and each takes
//! the next free bit after the previous assignment (wrapping at 64).

use std::collections::BTreeSet;
use std::fmt::{self, Write};

use tracing::debug;

use crate::error::ToygenError;

/// Width of the flag field in bits.
pub const FLAG_CAPACITY: usize = 64;

/// Flag owned by the multiplexer command, always at bit 0.
pub const RESERVED_FLAG: &str = "l";

/// First line of `flags.h`.
pub const FLAGS_HEADER: &str = "// generated/flags.h - generated flag definitions";

/// A short option character or a long option identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlagName(String);

impl FlagName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_reserved(&self) -> bool {
        self.0 == RESERVED_FLAG
    }
}

impl From<&str> for FlagName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for FlagName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<char> for FlagName {
    fn from(c: char) -> Self {
        Self(c.to_string())
    }
}

impl fmt::Display for FlagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Names bound to bit positions, in assignment order (reserved flag first).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagAssignment {
    bits: Vec<(FlagName, u8)>,
}

impl FlagAssignment {
    pub fn iter(&self) -> impl Iterator<Item = (&FlagName, u8)> {
        self.bits.iter().map(|(name, pos)| (name, *pos))
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn position(&self, name: &str) -> Option<u8> {
        self.bits
            .iter()
            .find(|(n, _)| n.as_str() == name)
            .map(|(_, pos)| *pos)
    }

    /// The single-bit mask for `name`.
    pub fn mask(&self, name: &str) -> Option<u64> {
        self.position(name).map(|pos| 1u64 << pos)
    }

    /// Render `flags.h`.
    pub fn to_header(&self) -> Result<String, fmt::Error> {
        let mut out = String::new();
        writeln!(out, "{FLAGS_HEADER}\n")?;
        for (name, pos) in self.iter() {
            writeln!(out, "#define FLAG_{name} (1ULL<<{pos})")?;
        }
        Ok(out)
    }
}

/// Assign a bit to every distinct name, plus the reserved multiplexer flag.
///
/// Input order and duplicates do not affect the result. Fails when the
/// distinct names, together with the reserved flag, do not fit in
/// [`FLAG_CAPACITY`] bits.
pub fn allocate<I>(names: I) -> Result<FlagAssignment, ToygenError>
where
    I: IntoIterator,
    I::Item: Into<FlagName>,
{
    let sorted: BTreeSet<FlagName> = names
        .into_iter()
        .map(Into::into)
        .filter(|name| !name.is_reserved())
        .collect();

    let count = sorted.len() + 1;
    if count > FLAG_CAPACITY {
        return Err(ToygenError::FlagCapacity {
            count,
            capacity: FLAG_CAPACITY,
        });
    }

    let mut used = [false; FLAG_CAPACITY];
    used[0] = true;
    let mut bits = Vec::with_capacity(count);
    bits.push((FlagName::from(RESERVED_FLAG), 0u8));

    let mut cursor = 1;
    for name in sorted {
        // The capacity check above guarantees a free slot exists.
        let Some(pos) = next_free(&used, cursor) else {
            return Err(ToygenError::FlagCapacity {
                count,
                capacity: FLAG_CAPACITY,
            });
        };
        used[pos] = true;
        bits.push((name, pos as u8));
        cursor = (pos + 1) % FLAG_CAPACITY;
    }

    debug!(flags = bits.len(), "allocated flag bits");
    Ok(FlagAssignment { bits })
}

/// First unused position at or after `start`, wrapping once around the field.
fn next_free(used: &[bool; FLAG_CAPACITY], start: usize) -> Option<usize> {
    (0..FLAG_CAPACITY)
        .map(|offset| (start + offset) % FLAG_CAPACITY)
        .find(|&pos| !used[pos])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    /// `n` distinct synthetic long names, none equal to the reserved flag.
    fn synthetic(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("opt_{i:02}")).collect()
    }

    #[test]
    fn reserved_flag_at_zero_even_when_absent() {
        let flags = allocate(Vec::<&str>::new()).unwrap();
        assert_eq!(flags.len(), 1);
        assert_eq!(flags.position("l"), Some(0));
    }

    #[test]
    fn cat_flags_in_lexicographic_order() {
        let flags = allocate(["l", "u", "v", "t", "e"]).unwrap();
        let got: Vec<(&str, u8)> = flags.iter().map(|(n, p)| (n.as_str(), p)).collect();
        assert_eq!(got, [("l", 0), ("e", 1), ("t", 2), ("u", 3), ("v", 4)]);
    }

    #[test]
    fn reserved_name_not_reassigned() {
        let flags = allocate(["a", "l", "z"]).unwrap();
        assert_eq!(flags.len(), 3);
        assert_eq!(flags.position("l"), Some(0));
        assert_eq!(flags.iter().filter(|(n, _)| n.as_str() == "l").count(), 1);
    }

    #[test]
    fn duplicates_collapse() {
        let flags = allocate(["v", "v", "x", "v"]).unwrap();
        assert_eq!(flags.len(), 3);
    }

    #[test]
    fn input_order_irrelevant() {
        let a = allocate(["color", "a", "Z", "1", "X21"]).unwrap();
        let b = allocate(["X21", "1", "Z", "a", "color"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_header().unwrap(), b.to_header().unwrap());
    }

    #[test]
    fn byte_order_puts_digits_and_uppercase_first() {
        let flags = allocate(["a", "Z", "1", "X21"]).unwrap();
        assert_eq!(flags.position("1"), Some(1));
        assert_eq!(flags.position("X21"), Some(2));
        assert_eq!(flags.position("Z"), Some(3));
        assert_eq!(flags.position("a"), Some(4));
    }

    #[test]
    fn positions_unique() {
        let flags = allocate(synthetic(63)).unwrap();
        let positions: HashSet<u8> = flags.iter().map(|(_, p)| p).collect();
        assert_eq!(positions.len(), flags.len());
        assert!(positions.iter().all(|&p| (p as usize) < FLAG_CAPACITY));
    }

    #[test]
    fn exactly_full_field_succeeds() {
        // 63 names plus the reserved flag fill all 64 bits.
        let flags = allocate(synthetic(63)).unwrap();
        assert_eq!(flags.len(), FLAG_CAPACITY);
        assert_eq!(flags.mask("opt_62"), Some(1u64 << 63));
    }

    #[test]
    fn one_over_capacity_fails() {
        let err = allocate(synthetic(64)).unwrap_err();
        match err {
            ToygenError::FlagCapacity { count, capacity } => {
                assert_eq!(count, 65);
                assert_eq!(capacity, 64);
            }
            other => panic!("Expected FlagCapacity, got: {other:?}"),
        }
    }

    #[test]
    fn reserved_name_does_not_count_twice() {
        let mut names = synthetic(63);
        names.push("l".into());
        assert!(allocate(names).is_ok());
    }

    #[test]
    fn header_format() {
        let flags = allocate(['u', 'v']).unwrap();
        assert_eq!(
            flags.to_header().unwrap(),
            "// generated/flags.h - generated flag definitions\n\
             \n\
             #define FLAG_l (1ULL<<0)\n\
             #define FLAG_u (1ULL<<1)\n\
             #define FLAG_v (1ULL<<2)\n"
        );
    }

    #[test]
    fn next_free_wraps() {
        let mut used = [true; FLAG_CAPACITY];
        used[3] = false;
        assert_eq!(next_free(&used, 10), Some(3));
        used[3] = true;
        assert_eq!(next_free(&used, 10), None);
    }
}
