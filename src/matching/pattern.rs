//! Pattern generation for one primer under a mismatch budget.
//!
//! A primer plus a budget of `m` tolerated mismatches expands into a family
//! of match patterns:
//!
//! 1. The primer itself, with each IUPAC symbol replaced by its class
//!    expression.
//! 2. **Boundary truncations**: for each `i` in `1..=m`, the primer with its
//!    first `i` bases removed, anchored to the start of the read (the primer
//!    ran off the 5' end), and the primer with its last `i` bases removed,
//!    anchored to the end of the read. Each truncation spends `i` of the
//!    budget and recurses with the remainder.
//! 3. **Substitution masks**: every single position (when `m >= 1`) and every
//!    unordered pair of positions (when `m >= 2`) replaced by a wildcard.
//!
//! Ambiguity expansion and wildcarding can coincide, so the result is
//! deduplicated with set semantics keyed by the rendered pattern text,
//! preserving first-insertion order.

use std::collections::HashSet;

use crate::core::symbol::class_pattern;
use crate::matching::matcher::MatcherError;

/// Largest supported mismatch budget. The truncation/mask expansion is
/// combinatorial; budgets above this are rejected rather than allowed to
/// blow up.
pub const MAX_MISMATCHES: u8 = 2;

/// One match expression for a (possibly truncated) primer segment.
///
/// `bases` is the number of primer bases the pattern spans, which is what
/// the longest-first ordering sorts on. The regex text length is not
/// meaningful for ordering since ambiguity classes inflate it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Pattern {
    expr: String,
    bases: usize,
    anchor_start: bool,
    anchor_end: bool,
}

impl Pattern {
    /// Build the class-expanded expression for a primer segment.
    fn from_sequence(segment: &[u8]) -> Result<Self, MatcherError> {
        let mut expr = String::with_capacity(segment.len());
        for &symbol in segment {
            let class = class_pattern(symbol)
                .ok_or(MatcherError::InvalidSymbol(symbol as char))?;
            expr.push_str(&class);
        }

        Ok(Self {
            expr,
            bases: segment.len(),
            anchor_start: false,
            anchor_end: false,
        })
    }

    fn anchored_start(mut self) -> Self {
        self.anchor_start = true;
        self
    }

    fn anchored_end(mut self) -> Self {
        self.anchor_end = true;
        self
    }

    /// Number of primer bases this pattern spans.
    #[must_use]
    pub fn bases(&self) -> usize {
        self.bases
    }

    /// Render the pattern as a regex fragment, anchors included.
    #[must_use]
    pub fn render(&self) -> String {
        let mut rendered = String::with_capacity(self.expr.len() + 2);
        if self.anchor_start {
            rendered.push('^');
        }
        rendered.push_str(&self.expr);
        if self.anchor_end {
            rendered.push('$');
        }
        rendered
    }
}

/// Generate the deduplicated pattern set for one primer.
///
/// The primer is uppercased first; matching is case-insensitive by
/// normalization on both sides.
///
/// # Errors
///
/// Returns `MatcherError::UnsupportedMismatchCount` for budgets above
/// [`MAX_MISMATCHES`] and `MatcherError::InvalidSymbol` for symbols outside
/// the IUPAC alphabet.
pub fn generate(primer: &[u8], mismatches: u8) -> Result<Vec<Pattern>, MatcherError> {
    if mismatches > MAX_MISMATCHES {
        return Err(MatcherError::UnsupportedMismatchCount(mismatches));
    }

    let upper = primer.to_ascii_uppercase();
    let mut patterns = Vec::new();
    expand_into(&upper, mismatches, &mut patterns)?;

    let mut seen = HashSet::new();
    patterns.retain(|pattern| seen.insert(pattern.render()));

    Ok(patterns)
}

fn expand_into(
    segment: &[u8],
    mismatches: u8,
    out: &mut Vec<Pattern>,
) -> Result<(), MatcherError> {
    out.push(Pattern::from_sequence(segment)?);

    for i in 1..=mismatches {
        let cut = usize::from(i);
        // A truncation that consumes the whole segment would leave an empty
        // pattern matching everywhere.
        if cut >= segment.len() {
            break;
        }

        // Primer running off the start of the read: the match must begin at
        // the first position.
        let mut tail = Vec::new();
        expand_into(&segment[cut..], mismatches - i, &mut tail)?;
        out.extend(tail.into_iter().map(Pattern::anchored_start));

        // Mirror for the end of the read.
        let mut head = Vec::new();
        expand_into(&segment[..segment.len() - cut], mismatches - i, &mut head)?;
        out.extend(head.into_iter().map(Pattern::anchored_end));
    }

    if mismatches >= 1 {
        for i in 0..segment.len() {
            let mut masked = segment.to_vec();
            masked[i] = b'N';
            out.push(Pattern::from_sequence(&masked)?);
        }
    }

    if mismatches >= 2 {
        for i in 0..segment.len() {
            for j in i + 1..segment.len() {
                let mut masked = segment.to_vec();
                masked[i] = b'N';
                masked[j] = b'N';
                out.push(Pattern::from_sequence(&masked)?);
            }
        }
    }

    Ok(())
}
