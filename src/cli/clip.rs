use std::path::{Path, PathBuf};

use clap::Args;

use crate::cli::{OrientationArg, OutputFormat};
use crate::core::types::Orientation;
use crate::matching::clip::ClipEngine;
use crate::matching::matcher::PrimerMatcher;
use crate::matching::pattern::MAX_MISMATCHES;
use crate::matching::stats::RunStats;
use crate::parsing::{fasta, fastq, sff};
use crate::utils::validation::check_distinct_paths;

#[derive(Args)]
pub struct ClipArgs {
    /// Input read file (FASTA, FASTQ, or SFF; FASTA/FASTQ may be gzipped)
    #[arg(required = true)]
    pub input: PathBuf,

    /// FASTA file of primer sequences (IUPAC ambiguity codes allowed)
    #[arg(short, long)]
    pub primers: PathBuf,

    /// Output file, written in the input's format
    #[arg(short, long)]
    pub output: PathBuf,

    /// Input format (auto-detected from the extension by default)
    #[arg(long)]
    pub input_format: Option<InputFormat>,

    /// Primer orientation, which decides what a match cuts away
    #[arg(long, value_enum, default_value = "forward")]
    pub orientation: OrientationArg,

    /// Number of tolerated differences per primer (substitutions, or bases
    /// missing at a read boundary)
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=MAX_MISMATCHES as i64))]
    pub mismatches: u8,

    /// Discard reads whose kept part is shorter than this
    #[arg(long, default_value = "0")]
    pub min_length: usize,

    /// Keep reads in which no primer was found (subject to --min-length)
    #[arg(long)]
    pub keep_unmatched: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    Fasta,
    Fastq,
    Sff,
}

/// Execute clip subcommand
///
/// # Errors
///
/// Returns an error if the paths alias each other, the primer file is
/// unusable, or the input cannot be read or the output written.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: ClipArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    check_distinct_paths(&[
        ("input", &args.input),
        ("primers", &args.primers),
        ("output", &args.output),
    ])?;

    let primers = fasta::load_primers(&args.primers)?;
    if verbose {
        eprintln!(
            "Loaded {} primer sequences from {}",
            primers.len(),
            args.primers.display()
        );
    }

    let orientation = Orientation::from(args.orientation);
    let matcher = PrimerMatcher::build(&primers, args.mismatches, orientation)?;
    if verbose {
        eprintln!(
            "Compiled {} match patterns at {} tolerated difference(s)",
            matcher.patterns().len(),
            args.mismatches
        );
    }

    let engine = ClipEngine::new(&matcher, orientation, args.min_length, args.keep_unmatched);
    let mut stats = RunStats::default();

    let input_format = args
        .input_format
        .unwrap_or_else(|| detect_format(&args.input));
    match input_format {
        InputFormat::Fasta => fasta::clip_file(&args.input, &args.output, &engine, &mut stats)?,
        InputFormat::Fastq => fastq::clip_file(&args.input, &args.output, &engine, &mut stats)?,
        InputFormat::Sff => sff::clip_file(&args.input, &args.output, &engine, &mut stats)?,
    }

    match format {
        OutputFormat::Text => print_text_report(&stats, &engine),
        OutputFormat::Json => print_json_report(&args, orientation, &stats, &matcher)?,
    }

    Ok(())
}

/// Detect input format from file extension
fn detect_format(path: &Path) -> InputFormat {
    if fastq::is_fastq_file(path) {
        InputFormat::Fastq
    } else if sff::is_sff_file(path) {
        InputFormat::Sff
    } else {
        // FASTA extensions, and the fallback for anything unrecognized
        InputFormat::Fasta
    }
}

fn print_text_report(stats: &RunStats, engine: &ClipEngine<'_>) {
    println!(
        "Kept {} clipped reads, discarded {} short.",
        stats.clipped, stats.short_clipped
    );
    if engine.keep_unmatched() {
        println!(
            "Kept {} reads with no primer, discarded {} short.",
            stats.kept_unmatched, stats.short_unmatched
        );
    } else {
        println!("Discarded {} reads with no primer.", stats.short_unmatched);
    }
    println!("Processed {} reads in total.", stats.total());
}

fn print_json_report(
    args: &ClipArgs,
    orientation: Orientation,
    stats: &RunStats,
    matcher: &PrimerMatcher,
) -> anyhow::Result<()> {
    let output = serde_json::json!({
        "input": args.input.display().to_string(),
        "output": args.output.display().to_string(),
        "primers": matcher.primer_count(),
        "patterns": matcher.patterns().len(),
        "mismatches": args.mismatches,
        "orientation": orientation,
        "min_length": args.min_length,
        "keep_unmatched": args.keep_unmatched,
        "stats": stats,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_format() {
        assert!(matches!(
            detect_format(Path::new("reads.fastq.gz")),
            InputFormat::Fastq
        ));
        assert!(matches!(
            detect_format(Path::new("reads.sff")),
            InputFormat::Sff
        ));
        assert!(matches!(
            detect_format(Path::new("reads.fa")),
            InputFormat::Fasta
        ));
        // Unknown extensions fall back to FASTA
        assert!(matches!(
            detect_format(Path::new("reads.txt")),
            InputFormat::Fasta
        ));
    }
}
