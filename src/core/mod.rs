//! Core data types for primer matching and read clipping.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`symbol`]: the IUPAC ambiguity table, per-symbol regex classes, and
//!   reverse-complementation
//! - [`Record`](record::Record): the uniform record view format adapters
//!   hand to the clip engine
//! - [`Orientation`](types::Orientation), [`ClipOutcome`](types::ClipOutcome):
//!   run configuration and per-record decisions
//!
//! ## IUPAC Ambiguity Codes
//!
//! | Symbol | Matches |
//! |--------|---------|
//! | A/C/G/T | itself |
//! | M | A, C |
//! | R | A, G |
//! | W | A, T |
//! | S | C, G |
//! | Y | C, T |
//! | K | G, T |
//! | V/H/D/B | three bases each |
//! | N, X | any base |
//!
//! Each class also matches the ambiguity codes it subsumes, so primers and
//! reads may both carry IUPAC codes.

pub mod record;
pub mod symbol;
pub mod types;
