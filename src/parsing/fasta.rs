//! FASTA adapter: primer loading and read clipping.
//!
//! Uses noodles for parsing and writing. Supports both uncompressed and
//! gzip compressed files.
//!
//! Supported extensions:
//! - `.fa`, `.fasta`, `.fna` (uncompressed)
//! - `.fa.gz`, `.fasta.gz`, `.fna.gz` (gzip compressed)

use std::ffi::OsStr;
use std::path::Path;

use noodles::fasta;

use crate::core::record::Record;
use crate::core::types::ClipOutcome;
use crate::matching::clip::ClipEngine;
use crate::matching::stats::RunStats;
use crate::parsing::{create_text_writer, open_text_reader, ParseError};
use crate::utils::validation::check_primer_limit;

/// Check if the path has a FASTA extension
pub fn is_fasta_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".fa.gz")
        || path_str.ends_with(".fasta.gz")
        || path_str.ends_with(".fna.gz")
    {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fa" | "fasta" | "fna")
    )
}

/// Load primer sequences from a FASTA file.
///
/// Duplicate raw entries are permitted and harmless; deduplication happens
/// later at the pattern level.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, `ParseError::Noodles`
/// if parsing fails, `ParseError::EmptyPrimerFile` if no entries are found,
/// or `ParseError::TooManyPrimers` if the limit is exceeded.
pub fn load_primers(path: &Path) -> Result<Vec<Vec<u8>>, ParseError> {
    let mut reader = fasta::io::Reader::new(open_text_reader(path)?);
    let mut primers = Vec::new();

    for result in reader.records() {
        let record = result
            .map_err(|e| ParseError::Noodles(format!("failed to parse primer record: {e}")))?;

        if check_primer_limit(primers.len()).is_some() {
            return Err(ParseError::TooManyPrimers(primers.len()));
        }

        primers.push(record.sequence().as_ref().to_vec());
    }

    if primers.is_empty() {
        return Err(ParseError::EmptyPrimerFile(
            path.display().to_string(),
        ));
    }

    Ok(primers)
}

/// Clip primer matches out of a FASTA file, writing surviving records to
/// `output`.
///
/// # Errors
///
/// Returns `ParseError::Io` on read/write failures and `ParseError::Noodles`
/// on malformed input records; the run aborts on the first malformed record.
pub fn clip_file(
    input: &Path,
    output: &Path,
    engine: &ClipEngine<'_>,
    stats: &mut RunStats,
) -> Result<(), ParseError> {
    let mut reader = fasta::io::Reader::new(open_text_reader(input)?);
    let mut writer = fasta::io::Writer::new(create_text_writer(output)?);

    for result in reader.records() {
        let fasta_record = result
            .map_err(|e| ParseError::Noodles(format!("failed to parse FASTA record: {e}")))?;

        let record = Record {
            name: String::from_utf8_lossy(fasta_record.name()).into_owned(),
            sequence: fasta_record.sequence().as_ref().to_vec(),
            quality: None,
            clip_window: None,
        };

        let outcome = engine.decide(record.effective());
        stats.record(&outcome);

        match outcome {
            ClipOutcome::Clipped { start, end } => {
                let clipped = fasta::Record::new(
                    fasta_record.definition().clone(),
                    fasta::record::Sequence::from(record.sequence[start..end].to_vec()),
                );
                writer.write_record(&clipped)?;
            }
            ClipOutcome::KeptUnmatched => {
                writer.write_record(&fasta_record)?;
            }
            ClipOutcome::DiscardedShortAfterClip | ClipOutcome::DiscardedShortUnmatched => {}
        }
    }

    Ok(())
}
