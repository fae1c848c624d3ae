//! Primer matching engine and clip decisions.
//!
//! This module provides the core matching functionality:
//!
//! - [`pattern`]: expands one primer plus a mismatch budget into its family
//!   of match patterns (ambiguity classes, boundary truncations,
//!   substitution wildcards)
//! - [`PrimerMatcher`](matcher::PrimerMatcher): all primers' patterns
//!   compiled into one searchable alternation
//! - [`ClipEngine`](clip::ClipEngine): turns a match (or its absence) into a
//!   [`ClipOutcome`](crate::core::types::ClipOutcome) under the run policy
//! - [`RunStats`](stats::RunStats): outcome counters for end-of-run reporting
//!
//! ## Matching semantics
//!
//! The matcher returns the **leftmost** match in a sequence; among patterns
//! that could match at the same position, the one spanning the most primer
//! bases wins. That tie-break is implemented purely by ordering: patterns
//! are sorted longest-first before being joined into a single regex
//! alternation, and the regex engine tries alternatives in order at each
//! position. Compiling one combined automaton keeps per-record search cost
//! independent of the primer count.

pub mod clip;
pub mod matcher;
pub mod pattern;
pub mod stats;

pub use matcher::MatcherError;
