//! Command-line interface for primer-clip.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **clip**: Clip primer matches out of a FASTA/FASTQ/SFF read file
//! - **patterns**: Show the compiled match patterns for a primer file
//!
//! ## Usage
//!
//! ```text
//! # Clip forward primers, dropping clipped reads shorter than 50 bases
//! primer-clip clip reads.fastq -p primers.fa -o clipped.fastq --min-length 50
//!
//! # Tolerate one mismatch and keep reads with no primer
//! primer-clip clip reads.sff -p primers.fa -o clipped.sff -m 1 --keep-unmatched
//!
//! # Reverse-strand primers: match the reverse complement, keep the head
//! primer-clip clip reads.fa -p primers.fa -o clipped.fa --orientation reverse-complement
//!
//! # JSON report for scripting
//! primer-clip clip reads.fastq -p primers.fa -o out.fastq --format json
//!
//! # Inspect what a primer expands to at a mismatch budget
//! primer-clip patterns primers.fa -m 2
//! ```

use clap::{Parser, Subcommand};

use crate::core::types::Orientation;

pub mod clip;
pub mod patterns;

#[derive(Parser)]
#[command(name = "primer-clip")]
#[command(version)]
#[command(about = "Clip primer sequences off sequencing reads")]
#[command(
    long_about = "primer-clip locates PCR primer sequences in sequencing reads and trims them off.\n\nPrimers may contain IUPAC ambiguity codes and may be matched with up to two tolerated differences (substitutions, or bases missing at a read boundary). Forward primers are cut away together with everything before them; reverse primers together with everything after them. FASTA and FASTQ reads are rewritten; SFF reads only have their quality trim points moved."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clip primer matches out of a read file
    Clip(clip::ClipArgs),

    /// Show the compiled match patterns for a primer file
    Patterns(patterns::PatternsArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Primer orientation as given on the command line.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OrientationArg {
    /// Primer reads 5'-3' into the insert; cut it and everything before it
    #[default]
    Forward,
    /// Primer sequence as it appears at the 3' end; cut it and everything after
    Reverse,
    /// Like reverse, but primers are reverse-complemented before matching
    ReverseComplement,
}

impl From<OrientationArg> for Orientation {
    fn from(arg: OrientationArg) -> Self {
        match arg {
            OrientationArg::Forward => Orientation::Forward,
            OrientationArg::Reverse => Orientation::Reverse,
            OrientationArg::ReverseComplement => Orientation::ReverseComplement,
        }
    }
}
