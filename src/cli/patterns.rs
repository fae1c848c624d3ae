use std::path::PathBuf;

use clap::Args;

use crate::cli::{OrientationArg, OutputFormat};
use crate::core::types::Orientation;
use crate::matching::matcher::PrimerMatcher;
use crate::matching::pattern::MAX_MISMATCHES;
use crate::parsing::fasta;

#[derive(Args)]
pub struct PatternsArgs {
    /// FASTA file of primer sequences (IUPAC ambiguity codes allowed)
    #[arg(required = true)]
    pub primers: PathBuf,

    /// Primer orientation applied before pattern generation
    #[arg(long, value_enum, default_value = "forward")]
    pub orientation: OrientationArg,

    /// Number of tolerated differences per primer
    #[arg(short, long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=MAX_MISMATCHES as i64))]
    pub mismatches: u8,
}

/// Execute patterns subcommand
///
/// # Errors
///
/// Returns an error if the primer file cannot be loaded or the patterns
/// cannot be compiled.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: PatternsArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let primers = fasta::load_primers(&args.primers)?;
    let orientation = Orientation::from(args.orientation);
    let matcher = PrimerMatcher::build(&primers, args.mismatches, orientation)?;

    if verbose {
        eprintln!(
            "{} primer sequences expanded to {} patterns",
            matcher.primer_count(),
            matcher.patterns().len()
        );
    }

    match format {
        OutputFormat::Text => {
            println!("bases\tpattern");
            for pattern in matcher.patterns() {
                println!("{}\t{}", pattern.bases(), pattern.render());
            }
        }
        OutputFormat::Json => {
            let output: Vec<serde_json::Value> = matcher
                .patterns()
                .iter()
                .map(|pattern| {
                    serde_json::json!({
                        "bases": pattern.bases(),
                        "pattern": pattern.render(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
