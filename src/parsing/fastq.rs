//! FASTQ adapter: read clipping with quality kept in lock-step.

use std::ffi::OsStr;
use std::path::Path;

use noodles::fastq;

use crate::core::record::Record;
use crate::core::types::ClipOutcome;
use crate::matching::clip::ClipEngine;
use crate::matching::stats::RunStats;
use crate::parsing::{create_text_writer, open_text_reader, ParseError};

/// Check if the path has a FASTQ extension
pub fn is_fastq_file(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();

    if path_str.ends_with(".fastq.gz") || path_str.ends_with(".fq.gz") {
        return true;
    }

    matches!(
        path.extension()
            .and_then(OsStr::to_str)
            .map(str::to_lowercase)
            .as_deref(),
        Some("fastq" | "fq")
    )
}

/// Clip primer matches out of a FASTQ file, writing surviving records to
/// `output` with quality scores sliced to the same bounds as the sequence.
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
    let mut reader = fastq::io::Reader::new(open_text_reader(input)?);
    let mut writer = fastq::io::Writer::new(create_text_writer(output)?);

    for result in reader.records() {
        let fastq_record = result
            .map_err(|e| ParseError::Noodles(format!("failed to parse FASTQ record: {e}")))?;

        let record = Record {
            name: String::from_utf8_lossy(fastq_record.name()).into_owned(),
            sequence: fastq_record.sequence().to_vec(),
            quality: Some(fastq_record.quality_scores().to_vec()),
            clip_window: None,
        };

        let outcome = engine.decide(record.effective());
        stats.record(&outcome);

        match outcome {
            ClipOutcome::Clipped { start, end } => {
                let quality = record.quality.as_deref().unwrap_or_default();
                let clipped = fastq::Record::new(
                    fastq_record.definition().clone(),
                    record.sequence[start..end].to_vec(),
                    quality[start..end].to_vec(),
                );
                writer.write_record(&clipped)?;
            }
            ClipOutcome::KeptUnmatched => {
                writer.write_record(&fastq_record)?;
            }
            ClipOutcome::DiscardedShortAfterClip | ClipOutcome::DiscardedShortUnmatched => {}
        }
    }

    Ok(())
}
