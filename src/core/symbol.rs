//! IUPAC nucleotide symbols: ambiguity expansion and complementation.
//!
//! The ambiguity table follows the IUPAC standard. Each class lists the
//! concrete bases a symbol stands for *plus* the ambiguity codes it
//! subsumes, so a primer symbol also matches reads that themselves carry
//! ambiguity codes (an `M` in a primer matches an `M` in a read). `N` and
//! `X` are full wildcards.

/// Concrete symbols represented by each IUPAC code, keyed by uppercase symbol.
///
/// `N`/`X` map to the empty string and are treated as wildcards by callers.
const AMBIGUITY_VALUES: [(u8, &str); 16] = [
    (b'A', "A"),
    (b'C', "C"),
    (b'G', "G"),
    (b'T', "T"),
    (b'M', "ACM"),
    (b'R', "AGR"),
    (b'W', "ATW"),
    (b'S', "CGS"),
    (b'Y', "CTY"),
    (b'K', "GTK"),
    (b'V', "ACGMRSV"),
    (b'H', "ACTMWYH"),
    (b'D', "AGTRWKD"),
    (b'B', "CGTSYKB"),
    (b'N', ""),
    (b'X', ""),
];

/// Expand an IUPAC symbol to the set of symbols it matches.
///
/// For `A`/`C`/`G`/`T` this is the singleton set; for ambiguity codes it is
/// the defined superset; for the wildcards `N`/`X` it is `None`-like in the
/// sense that the returned slice is empty (they match any symbol).
///
/// Returns `None` for symbols outside the IUPAC alphabet.
#[must_use]
pub fn expand(symbol: u8) -> Option<&'static str> {
    let upper = symbol.to_ascii_uppercase();
    AMBIGUITY_VALUES
        .iter()
        .find(|(s, _)| *s == upper)
        .map(|(_, values)| *values)
}

/// Regex fragment matching one IUPAC symbol.
///
/// Derived from [`AMBIGUITY_VALUES`] so the two views of the table cannot
/// drift: unambiguous bases render as themselves, ambiguity codes as a
/// character class over their expansion, and the wildcards `N`/`X` as `.`.
#[must_use]
pub fn class_pattern(symbol: u8) -> Option<String> {
    let values = expand(symbol)?;
    Some(match values.len() {
        0 => ".".to_string(),
        1 => values.to_string(),
        _ => format!("[{values}]"),
    })
}

/// Watson-Crick complement of an IUPAC symbol, case preserved.
///
/// Symbols outside the alphabet pass through unchanged; they are rejected
/// later when the pattern generator validates the primer.
#[must_use]
pub fn complement(symbol: u8) -> u8 {
    let complemented = match symbol.to_ascii_uppercase() {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'M' => b'K',
        b'K' => b'M',
        b'R' => b'Y',
        b'Y' => b'R',
        b'W' => b'W',
        b'S' => b'S',
        b'V' => b'B',
        b'B' => b'V',
        b'H' => b'D',
        b'D' => b'H',
        b'N' => b'N',
        b'X' => b'X',
        other => other,
    };

    if symbol.is_ascii_lowercase() {
        complemented.to_ascii_lowercase()
    } else {
        complemented
    }
}

/// Reverse-complement a sequence of IUPAC symbols.
#[must_use]
pub fn reverse_complement(sequence: &[u8]) -> Vec<u8> {
    sequence.iter().rev().copied().map(complement).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_concrete_bases() {
        assert_eq!(expand(b'A'), Some("A"));
        assert_eq!(expand(b'c'), Some("C"));
        assert_eq!(expand(b'G'), Some("G"));
        assert_eq!(expand(b't'), Some("T"));
    }

    #[test]
    fn test_expand_ambiguity_codes() {
        assert_eq!(expand(b'M'), Some("ACM"));
        assert_eq!(expand(b'B'), Some("CGTSYKB"));
        assert_eq!(expand(b'N'), Some(""));
        assert_eq!(expand(b'X'), Some(""));
    }

    #[test]
    fn test_expand_unknown_symbol() {
        assert_eq!(expand(b'E'), None);
        assert_eq!(expand(b'-'), None);
        assert_eq!(expand(b'U'), None);
    }

    #[test]
    fn test_class_pattern() {
        assert_eq!(class_pattern(b'A').as_deref(), Some("A"));
        assert_eq!(class_pattern(b'm').as_deref(), Some("[ACM]"));
        assert_eq!(class_pattern(b'N').as_deref(), Some("."));
        assert_eq!(class_pattern(b'Z'), None);
    }

    #[test]
    fn test_class_pattern_covers_the_whole_table() {
        for (symbol, values) in AMBIGUITY_VALUES {
            let class = class_pattern(symbol).unwrap();
            match values.len() {
                0 => assert_eq!(class, "."),
                1 => assert_eq!(class, values),
                _ => assert_eq!(class, format!("[{values}]")),
            }
        }
    }

    #[test]
    fn test_reverse_complement_standard_bases() {
        assert_eq!(reverse_complement(b"ACGT"), b"ACGT");
        assert_eq!(reverse_complement(b"AAAA"), b"TTTT");
        assert_eq!(reverse_complement(b"ATCG"), b"CGAT");
    }

    #[test]
    fn test_reverse_complement_iupac() {
        assert_eq!(reverse_complement(b"R"), b"Y");
        assert_eq!(reverse_complement(b"K"), b"M");
        // S and W are palindromic
        assert_eq!(reverse_complement(b"SW"), b"WS");
        assert_eq!(reverse_complement(b"B"), b"V");
        assert_eq!(reverse_complement(b"D"), b"H");
        assert_eq!(reverse_complement(b"N"), b"N");
    }

    #[test]
    fn test_reverse_complement_preserves_case() {
        assert_eq!(reverse_complement(b"acgt"), b"acgt");
        assert_eq!(reverse_complement(b"AcGt"), b"aCgT");
    }
}
