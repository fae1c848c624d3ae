//! Compiled primer matcher.
//!
//! Pattern sets from every primer are unioned, deduplicated, ordered
//! longest-first, and compiled into a single regex alternation. The regex
//! engine's leftmost, first-alternative-wins semantics combined with that
//! ordering give the required behavior: the leftmost match wins, and among
//! patterns that could match at the same position the one spanning the most
//! primer bases (the most specific) wins.

use std::cmp::Reverse;
use std::collections::HashSet;

use regex::bytes::Regex;
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::symbol::reverse_complement;
use crate::core::types::Orientation;
use crate::matching::pattern::{generate, Pattern, MAX_MISMATCHES};

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("invalid IUPAC symbol in primer: {0:?}")]
    InvalidSymbol(char),

    #[error("at most {MAX_MISMATCHES} mismatches are supported, got {0}")]
    UnsupportedMismatchCount(u8),

    #[error("no usable primer sequences were provided")]
    NoPrimers,

    #[error("failed to compile pattern alternation: {0}")]
    Compile(#[from] regex::Error),
}

/// Matched `[start, end)` offsets into a searched sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// A set of primers compiled for searching, built once per run and read-only
/// thereafter.
#[derive(Debug)]
pub struct PrimerMatcher {
    regex: Regex,
    patterns: Vec<Pattern>,
    primer_count: usize,
}

impl PrimerMatcher {
    /// Compile a matcher for a set of primers under a mismatch budget.
    ///
    /// Primers are reverse-complemented first when the orientation requires
    /// it. Patterns are deduplicated across primers, so two primers whose
    /// generated pattern sets coincide collapse to one entry. Empty primer
    /// entries are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `MatcherError::UnsupportedMismatchCount` for budgets above 2,
    /// `MatcherError::InvalidSymbol` for non-IUPAC primer symbols,
    /// `MatcherError::NoPrimers` when nothing usable remains, and
    /// `MatcherError::Compile` if the alternation fails to compile.
    pub fn build(
        primers: &[Vec<u8>],
        mismatches: u8,
        orientation: Orientation,
    ) -> Result<Self, MatcherError> {
        let mut patterns: Vec<Pattern> = Vec::new();
        let mut seen = HashSet::new();
        let mut primer_count = 0;

        for primer in primers {
            if primer.is_empty() {
                warn!("skipping empty primer entry");
                continue;
            }
            primer_count += 1;

            let oriented = if orientation.complements_primers() {
                reverse_complement(primer)
            } else {
                primer.clone()
            };

            for pattern in generate(&oriented, mismatches)? {
                if seen.insert(pattern.render()) {
                    patterns.push(pattern);
                }
            }
        }

        if patterns.is_empty() {
            return Err(MatcherError::NoPrimers);
        }

        // Longest-first alternation order; the sort is stable so ties keep
        // input order and stay deterministic.
        patterns.sort_by_key(|pattern| Reverse(pattern.bases()));

        let alternation = patterns
            .iter()
            .map(Pattern::render)
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&alternation)?;

        debug!(
            primers = primer_count,
            patterns = patterns.len(),
            "compiled primer matcher"
        );

        Ok(Self {
            regex,
            patterns,
            primer_count,
        })
    }

    /// Find the leftmost, most-specific match in a sequence.
    ///
    /// The sequence must already be uppercased; the clip engine takes care
    /// of that for records.
    #[must_use]
    pub fn find_first(&self, sequence: &[u8]) -> Option<Span> {
        self.regex.find(sequence).map(|m| Span {
            start: m.start(),
            end: m.end(),
        })
    }

    /// Number of non-empty primer entries compiled in.
    #[must_use]
    pub fn primer_count(&self) -> usize {
        self.primer_count
    }

    /// The deduplicated patterns in alternation order.
    #[must_use]
    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }
}
