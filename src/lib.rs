//! # primer-clip
//!
//! A library for finding PCR primer sequences in sequencing reads and
//! clipping them off.
//!
//! Primer sequences may contain IUPAC ambiguity codes (`N`, `R`, `Y`, ...),
//! and matching can tolerate up to two differences per primer: base
//! substitutions, or bases missing because the read starts or ends inside
//! the primer. Each primer is expanded into a family of match patterns,
//! every primer's family is compiled into one alternation, and each read is
//! searched once regardless of how many primers are loaded.
//!
//! A forward primer match removes the primer and everything before it; a
//! reverse primer match removes the primer and everything after it. Reads
//! whose kept part falls below a length floor are discarded, and reads with
//! no match are kept or discarded by policy.
//!
//! ## Example
//!
//! ```rust
//! use primer_clip::core::types::Orientation;
//! use primer_clip::matching::clip::ClipEngine;
//! use primer_clip::matching::matcher::PrimerMatcher;
//!
//! let primers = vec![b"AACCGG".to_vec()];
//! let matcher = PrimerMatcher::build(&primers, 1, Orientation::Forward).unwrap();
//! let engine = ClipEngine::new(&matcher, Orientation::Forward, 20, false);
//!
//! let outcome = engine.decide(b"TTAACCGGACGTACGTACGTACGTACGTACGT");
//! println!("{outcome:?}");
//! ```
//!
//! ## Modules
//!
//! - [`core`]: IUPAC symbol tables, orientations, and the record model
//! - [`matching`]: pattern generation, the compiled matcher, clip decisions,
//!   and run statistics
//! - [`parsing`]: FASTA/FASTQ/SFF record stream adapters
//! - [`cli`]: command-line interface implementation
//! - [`utils`]: validation helpers

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::record::Record;
pub use crate::core::types::{ClipOutcome, Orientation};
pub use crate::matching::clip::ClipEngine;
pub use crate::matching::matcher::{MatcherError, PrimerMatcher, Span};
pub use crate::matching::stats::RunStats;
pub use crate::parsing::ParseError;
