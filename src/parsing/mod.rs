//! Record stream adapters for the supported sequence formats.
//!
//! Each adapter reads records from one format, hands the clip engine the
//! uniform [`Record`](crate::core::record::Record) view, and applies the
//! returned [`ClipOutcome`](crate::core::types::ClipOutcome):
//!
//! - [`fasta`]: primer file loading plus FASTA read clipping (sequence only)
//! - [`fastq`]: FASTQ read clipping (sequence and quality in lock-step)
//! - [`sff`]: Standard Flowgram Format; only the quality trim points move,
//!   bases, qualities and flow data pass through unmodified
//!
//! FASTA and FASTQ files may be gzip compressed on input and output; SFF is
//! a seekable binary format and is never compressed here.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

pub mod fasta;
pub mod fastq;
pub mod sff;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("invalid SFF file: {0}")]
    InvalidSff(String),

    #[error("no primer sequences found in {0}")]
    EmptyPrimerFile(String),

    #[error("too many primers: {0} exceeds maximum allowed (10000)")]
    TooManyPrimers(usize),
}

/// Check if the path is a gzipped file
pub(crate) fn is_gzipped(path: &Path) -> bool {
    let path_str = path.to_string_lossy().to_lowercase();
    path_str.ends_with(".gz") || path_str.ends_with(".bgz")
}

/// Open a text-format file for buffered reading, decompressing gzip
/// transparently based on the extension.
pub(crate) fn open_text_reader(path: &Path) -> Result<Box<dyn BufRead>, ParseError> {
    let file = File::open(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Create a text-format output file, gzip-compressing when the extension
/// asks for it.
pub(crate) fn create_text_writer(path: &Path) -> Result<Box<dyn Write>, ParseError> {
    let file = File::create(path)?;
    if is_gzipped(path) {
        Ok(Box::new(BufWriter::new(GzEncoder::new(
            file,
            Compression::default(),
        ))))
    } else {
        Ok(Box::new(BufWriter::new(file)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_gzipped() {
        assert!(is_gzipped(Path::new("reads.fastq.gz")));
        assert!(is_gzipped(Path::new("reads.fa.bgz")));
        assert!(!is_gzipped(Path::new("reads.fastq")));
        assert!(!is_gzipped(Path::new("reads.sff")));
    }
}
