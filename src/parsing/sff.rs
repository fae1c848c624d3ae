//! Standard Flowgram Format (SFF) adapter.
//!
//! SFF is the big-endian binary container used by 454/Roche instruments. A
//! file is a common header followed by one block per read; each read carries
//! its bases, per-base qualities, flowgram values, and 1-based quality and
//! adapter trim points (0 meaning "none"). Clipping an SFF read never touches
//! the sequence data: only `clip_qual_left`/`clip_qual_right` move.
//!
//! The reader skips an embedded index block if one is present; the writer
//! emits no index and back-patches the read count once the stream is
//! complete, so the write target must be seekable.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::core::record::Record;
use crate::core::types::ClipOutcome;
use crate::matching::clip::ClipEngine;
use crate::matching::stats::RunStats;
use crate::parsing::ParseError;

const SFF_MAGIC: [u8; 4] = *b".sff";
const SFF_VERSION: [u8; 4] = [0, 0, 0, 1];

/// Fixed-size portion of the common header, through the flowgram format code.
const COMMON_HEADER_FIXED_LEN: usize = 31;

/// Byte offset of the number-of-reads field, patched by the writer on finish.
const READ_COUNT_OFFSET: u64 = 20;

/// Check if the path has an SFF extension
pub fn is_sff_file(path: &Path) -> bool {
    path.extension()
        .and_then(std::ffi::OsStr::to_str)
        .map(str::to_lowercase)
        .as_deref()
        == Some("sff")
}

fn pad_to_8(len: usize) -> usize {
    (8 - len % 8) % 8
}

/// Common (file-level) SFF header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SffCommonHeader {
    pub index_offset: u64,
    pub index_length: u32,
    pub read_count: u32,
    pub flows_per_read: u16,
    pub flowgram_format: u8,
    pub flow_chars: Vec<u8>,
    pub key_sequence: Vec<u8>,
}

/// One SFF read. Trim points are kept in their raw 1-based on-disk form
/// (0 meaning "none") so reads that are not clipped further round-trip
/// byte-faithfully; [`SffRead::clip_qual_window`] gives the decoded window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SffRead {
    pub name: Vec<u8>,
    /// Raw quality trim points.
    pub clip_qual: (u16, u16),
    /// Raw adapter trim points, passed through unmodified.
    pub clip_adapter: (u16, u16),
    pub flowgram_values: Vec<u16>,
    pub flow_index_per_base: Vec<u8>,
    pub bases: Vec<u8>,
    pub quality_scores: Vec<u8>,
}

impl SffRead {
    /// Quality trim window as a 0-based half-open range into `bases`.
    #[must_use]
    pub fn clip_qual_window(&self) -> (usize, usize) {
        window_from_raw(self.clip_qual.0, self.clip_qual.1, self.bases.len())
    }
}

/// Convert raw 1-based trim points (0 = none) to a 0-based half-open window.
fn window_from_raw(left: u16, right: u16, bases: usize) -> (usize, usize) {
    let right = if right == 0 {
        bases
    } else {
        (right as usize).min(bases)
    };
    let left = (left as usize).saturating_sub(1).min(right);
    (left, right)
}

/// Convert a 0-based half-open window back to raw 1-based trim points.
fn raw_from_window(window: (usize, usize)) -> Result<(u16, u16), ParseError> {
    let left = u16::try_from(window.0 + 1)
        .map_err(|_| ParseError::InvalidSff("clip point exceeds u16 range".to_string()))?;
    let right = u16::try_from(window.1)
        .map_err(|_| ParseError::InvalidSff("clip point exceeds u16 range".to_string()))?;
    Ok((left, right))
}

/// Streaming SFF reader.
#[derive(Debug)]
pub struct SffReader<R> {
    inner: R,
    header: SffCommonHeader,
    offset: u64,
    reads_returned: u32,
}

impl<R: Read> SffReader<R> {
    /// Parse the common header and position the stream at the first read.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSff` on a bad magic number, version, or
    /// flowgram format code, and `ParseError::Io` on truncated input.
    pub fn new(mut inner: R) -> Result<Self, ParseError> {
        let mut fixed = [0u8; COMMON_HEADER_FIXED_LEN];
        inner.read_exact(&mut fixed)?;

        if fixed[0..4] != SFF_MAGIC {
            return Err(ParseError::InvalidSff("bad magic number".to_string()));
        }
        if fixed[4..8] != SFF_VERSION {
            return Err(ParseError::InvalidSff(format!(
                "unsupported version {:?}",
                &fixed[4..8]
            )));
        }

        let index_offset = u64::from_be_bytes(fixed[8..16].try_into().unwrap());
        let index_length = u32::from_be_bytes(fixed[16..20].try_into().unwrap());
        let read_count = u32::from_be_bytes(fixed[20..24].try_into().unwrap());
        let header_length = u16::from_be_bytes(fixed[24..26].try_into().unwrap());
        let key_length = u16::from_be_bytes(fixed[26..28].try_into().unwrap());
        let flows_per_read = u16::from_be_bytes(fixed[28..30].try_into().unwrap());
        let flowgram_format = fixed[30];

        if flowgram_format != 1 {
            return Err(ParseError::InvalidSff(format!(
                "unsupported flowgram format code {flowgram_format}"
            )));
        }

        let mut flow_chars = vec![0u8; usize::from(flows_per_read)];
        inner.read_exact(&mut flow_chars)?;
        let mut key_sequence = vec![0u8; usize::from(key_length)];
        inner.read_exact(&mut key_sequence)?;

        let consumed = COMMON_HEADER_FIXED_LEN + flow_chars.len() + key_sequence.len();
        let padding = usize::from(header_length)
            .checked_sub(consumed)
            .ok_or_else(|| ParseError::InvalidSff("header length too small".to_string()))?;
        io::copy(
            &mut (&mut inner).take(padding as u64),
            &mut io::sink(),
        )?;

        Ok(Self {
            inner,
            header: SffCommonHeader {
                index_offset,
                index_length,
                read_count,
                flows_per_read,
                flowgram_format,
                flow_chars,
                key_sequence,
            },
            offset: u64::from(header_length),
            reads_returned: 0,
        })
    }

    #[must_use]
    pub fn header(&self) -> &SffCommonHeader {
        &self.header
    }

    fn take(&mut self, len: usize) -> Result<Vec<u8>, ParseError> {
        let mut buf = vec![0u8; len];
        self.inner.read_exact(&mut buf)?;
        self.offset += len as u64;
        Ok(buf)
    }

    /// The index block may sit between read blocks; skip it when the stream
    /// is positioned on it.
    fn maybe_skip_index(&mut self) -> Result<(), ParseError> {
        if self.header.index_length > 0 && self.offset == self.header.index_offset {
            let end = self.header.index_offset + u64::from(self.header.index_length);
            let aligned_end = end + (8 - end % 8) % 8;
            let skip = aligned_end - self.offset;
            io::copy(&mut (&mut self.inner).take(skip), &mut io::sink())?;
            self.offset = aligned_end;
        }
        Ok(())
    }

    /// Read the next record, or `None` when the declared read count is
    /// exhausted.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSff` on inconsistent block sizes and
    /// `ParseError::Io` on truncated input.
    pub fn next_read(&mut self) -> Result<Option<SffRead>, ParseError> {
        if self.reads_returned == self.header.read_count {
            return Ok(None);
        }
        self.maybe_skip_index()?;

        let fixed = self.take(16)?;
        let read_header_length = u16::from_be_bytes(fixed[0..2].try_into().unwrap());
        let name_length = u16::from_be_bytes(fixed[2..4].try_into().unwrap());
        let number_of_bases = u32::from_be_bytes(fixed[4..8].try_into().unwrap()) as usize;
        let clip_qual_left = u16::from_be_bytes(fixed[8..10].try_into().unwrap());
        let clip_qual_right = u16::from_be_bytes(fixed[10..12].try_into().unwrap());
        let clip_adapter_left = u16::from_be_bytes(fixed[12..14].try_into().unwrap());
        let clip_adapter_right = u16::from_be_bytes(fixed[14..16].try_into().unwrap());

        let name = self.take(usize::from(name_length))?;
        let consumed = 16 + usize::from(name_length);
        let padding = usize::from(read_header_length)
            .checked_sub(consumed)
            .ok_or_else(|| ParseError::InvalidSff("read header length too small".to_string()))?;
        self.take(padding)?;

        let flow_bytes = self.take(2 * usize::from(self.header.flows_per_read))?;
        let flowgram_values = flow_bytes
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        let flow_index_per_base = self.take(number_of_bases)?;
        let bases = self.take(number_of_bases)?;
        let quality_scores = self.take(number_of_bases)?;

        let data_len = 2 * usize::from(self.header.flows_per_read) + 3 * number_of_bases;
        self.take(pad_to_8(data_len))?;

        self.reads_returned += 1;

        Ok(Some(SffRead {
            name,
            clip_qual: (clip_qual_left, clip_qual_right),
            clip_adapter: (clip_adapter_left, clip_adapter_right),
            flowgram_values,
            flow_index_per_base,
            bases,
            quality_scores,
        }))
    }
}

/// Streaming SFF writer. The read count is back-patched by
/// [`SffWriter::finish`], which must be called after the last read.
pub struct SffWriter<W: Write + Seek> {
    inner: W,
    flows_per_read: u16,
    reads_written: u32,
}

impl<W: Write + Seek> SffWriter<W> {
    /// Write a common header mirroring `header`, with no index block and a
    /// placeholder read count.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` on write failures.
    pub fn new(mut inner: W, header: &SffCommonHeader) -> Result<Self, ParseError> {
        let fixed =
            COMMON_HEADER_FIXED_LEN + header.flow_chars.len() + header.key_sequence.len();
        let header_length = fixed + pad_to_8(fixed);

        inner.write_all(&SFF_MAGIC)?;
        inner.write_all(&SFF_VERSION)?;
        inner.write_all(&0u64.to_be_bytes())?; // index offset
        inner.write_all(&0u32.to_be_bytes())?; // index length
        inner.write_all(&0u32.to_be_bytes())?; // read count, patched later
        inner.write_all(
            &u16::try_from(header_length)
                .map_err(|_| ParseError::InvalidSff("header too large".to_string()))?
                .to_be_bytes(),
        )?;
        inner.write_all(
            &u16::try_from(header.key_sequence.len())
                .map_err(|_| ParseError::InvalidSff("key sequence too long".to_string()))?
                .to_be_bytes(),
        )?;
        inner.write_all(&header.flows_per_read.to_be_bytes())?;
        inner.write_all(&[header.flowgram_format])?;
        inner.write_all(&header.flow_chars)?;
        inner.write_all(&header.key_sequence)?;
        inner.write_all(&vec![0u8; header_length - fixed])?;

        Ok(Self {
            inner,
            flows_per_read: header.flows_per_read,
            reads_written: 0,
        })
    }

    /// Append one read block.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidSff` when the read's arrays disagree with
    /// each other or with the common header, and `ParseError::Io` on write
    /// failures.
    pub fn write_read(&mut self, read: &SffRead) -> Result<(), ParseError> {
        let bases = read.bases.len();
        if read.quality_scores.len() != bases || read.flow_index_per_base.len() != bases {
            return Err(ParseError::InvalidSff(
                "per-base arrays have mismatched lengths".to_string(),
            ));
        }
        if read.flowgram_values.len() != usize::from(self.flows_per_read) {
            return Err(ParseError::InvalidSff(
                "flowgram length disagrees with common header".to_string(),
            ));
        }

        let name_length = u16::try_from(read.name.len())
            .map_err(|_| ParseError::InvalidSff("read name too long".to_string()))?;
        let number_of_bases = u32::try_from(bases)
            .map_err(|_| ParseError::InvalidSff("too many bases in read".to_string()))?;

        let header_fixed = 16 + read.name.len();
        let read_header_length = header_fixed + pad_to_8(header_fixed);

        self.inner.write_all(
            &u16::try_from(read_header_length)
                .map_err(|_| ParseError::InvalidSff("read header too large".to_string()))?
                .to_be_bytes(),
        )?;
        self.inner.write_all(&name_length.to_be_bytes())?;
        self.inner.write_all(&number_of_bases.to_be_bytes())?;
        self.inner.write_all(&read.clip_qual.0.to_be_bytes())?;
        self.inner.write_all(&read.clip_qual.1.to_be_bytes())?;
        self.inner.write_all(&read.clip_adapter.0.to_be_bytes())?;
        self.inner.write_all(&read.clip_adapter.1.to_be_bytes())?;
        self.inner.write_all(&read.name)?;
        self.inner
            .write_all(&vec![0u8; read_header_length - header_fixed])?;

        for value in &read.flowgram_values {
            self.inner.write_all(&value.to_be_bytes())?;
        }
        self.inner.write_all(&read.flow_index_per_base)?;
        self.inner.write_all(&read.bases)?;
        self.inner.write_all(&read.quality_scores)?;

        let data_len = 2 * usize::from(self.flows_per_read) + 3 * bases;
        self.inner.write_all(&vec![0u8; pad_to_8(data_len)])?;

        self.reads_written += 1;
        Ok(())
    }

    /// Patch the read count into the header and flush.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` on seek/write failures.
    pub fn finish(mut self) -> Result<(), ParseError> {
        self.inner.flush()?;
        self.inner.seek(SeekFrom::Start(READ_COUNT_OFFSET))?;
        self.inner.write_all(&self.reads_written.to_be_bytes())?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Clip primer matches out of an SFF file by moving quality trim points,
/// writing surviving reads to `output`.
///
/// All sequence, quality, flow and adapter-clip data passes through
/// unmodified; discarded reads are simply not written.
///
/// # Errors
///
/// Returns `ParseError::Io` on read/write failures and
/// `ParseError::InvalidSff` on malformed input.
pub fn clip_file(
    input: &Path,
    output: &Path,
    engine: &ClipEngine<'_>,
    stats: &mut RunStats,
) -> Result<(), ParseError> {
    let mut reader = SffReader::new(BufReader::new(File::open(input)?))?;
    let mut writer = SffWriter::new(BufWriter::new(File::create(output)?), reader.header())?;

    while let Some(mut read) = reader.next_read()? {
        let (left, right) = read.clip_qual_window();
        let record = Record {
            name: String::from_utf8_lossy(&read.name).into_owned(),
            sequence: read.bases.clone(),
            quality: Some(read.quality_scores.clone()),
            clip_window: Some((left, right)),
        };

        let outcome = engine.decide(record.effective());
        stats.record(&outcome);

        match outcome {
            ClipOutcome::Clipped { start, end } => {
                // Bounds are relative to the old window; only the trim
                // points move.
                read.clip_qual = raw_from_window((left + start, left + end))?;
                writer.write_read(&read)?;
            }
            ClipOutcome::KeptUnmatched => {
                writer.write_read(&read)?;
            }
            ClipOutcome::DiscardedShortAfterClip | ClipOutcome::DiscardedShortUnmatched => {}
        }
    }

    writer.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::NamedTempFile;

    use crate::core::types::Orientation;
    use crate::matching::matcher::PrimerMatcher;

    fn test_header() -> SffCommonHeader {
        SffCommonHeader {
            index_offset: 0,
            index_length: 0,
            read_count: 0,
            flows_per_read: 8,
            flowgram_format: 1,
            flow_chars: b"TACGTACG".to_vec(),
            key_sequence: b"TCAG".to_vec(),
        }
    }

    fn test_read(name: &str, bases: &[u8], clip_qual: (u16, u16)) -> SffRead {
        SffRead {
            name: name.as_bytes().to_vec(),
            clip_qual,
            clip_adapter: (0, 0),
            flowgram_values: vec![100; 8],
            flow_index_per_base: vec![1; bases.len()],
            bases: bases.to_vec(),
            quality_scores: vec![40; bases.len()],
        }
    }

    #[test]
    fn test_window_from_raw() {
        // 0 means "no clip"
        assert_eq!(window_from_raw(0, 0, 10), (0, 10));
        // 1-based first base / inclusive last base
        assert_eq!(window_from_raw(3, 8, 10), (2, 8));
        assert_eq!(window_from_raw(1, 10, 10), (0, 10));
        // right is clamped to the read, left to the right edge
        assert_eq!(window_from_raw(0, 50, 10), (0, 10));
        assert_eq!(window_from_raw(9, 4, 10), (4, 4));
    }

    #[test]
    fn test_raw_from_window() {
        assert_eq!(raw_from_window((0, 10)).unwrap(), (1, 10));
        assert_eq!(raw_from_window((2, 8)).unwrap(), (3, 8));
    }

    #[test]
    fn test_write_then_read_roundtrip() {
        // Second read has the raw "no clip" zeros, which must survive as-is.
        let reads = vec![
            test_read("read1", b"TCAGAACCGGTTTT", (5, 14)),
            test_read("r2", b"TCAGGTGTGTGT", (0, 0)),
        ];

        let mut buffer = Cursor::new(Vec::new());
        let mut writer = SffWriter::new(&mut buffer, &test_header()).unwrap();
        for read in &reads {
            writer.write_read(read).unwrap();
        }
        writer.finish().unwrap();

        let mut reader = SffReader::new(Cursor::new(buffer.into_inner())).unwrap();
        assert_eq!(reader.header().read_count, 2);
        assert_eq!(reader.header().flow_chars, b"TACGTACG");
        assert_eq!(reader.header().key_sequence, b"TCAG");

        let first = reader.next_read().unwrap().unwrap();
        assert_eq!(first, reads[0]);
        let second = reader.next_read().unwrap().unwrap();
        assert_eq!(second, reads[1]);
        assert!(reader.next_read().unwrap().is_none());
    }

    #[test]
    fn test_reader_rejects_bad_magic() {
        let err = SffReader::new(Cursor::new(vec![0u8; 64])).unwrap_err();
        assert!(matches!(err, ParseError::InvalidSff(_)));
    }

    #[test]
    fn test_clip_file_moves_trim_points_only() {
        let input = NamedTempFile::with_suffix(".sff").unwrap();
        let output = NamedTempFile::with_suffix(".sff").unwrap();

        {
            let file = File::create(input.path()).unwrap();
            let mut writer = SffWriter::new(BufWriter::new(file), &test_header()).unwrap();
            // Window [4, 14): AACCGGTTTT
            writer
                .write_read(&test_read("match", b"TCAGAACCGGTTTT", (5, 14)))
                .unwrap();
            // Window [4, 12): no primer
            writer
                .write_read(&test_read("negative", b"TCAGGTGTGTGT", (5, 12)))
                .unwrap();
            writer.finish().unwrap();
        }

        let primers = vec![b"AACCGG".to_vec()];
        let matcher = PrimerMatcher::build(&primers, 0, Orientation::Forward).unwrap();
        let engine = ClipEngine::new(&matcher, Orientation::Forward, 3, false);
        let mut stats = RunStats::default();

        clip_file(input.path(), output.path(), &engine, &mut stats).unwrap();

        assert_eq!(stats.clipped, 1);
        assert_eq!(stats.short_unmatched, 1);

        let mut reader = SffReader::new(BufReader::new(File::open(output.path()).unwrap())).unwrap();
        assert_eq!(reader.header().read_count, 1);

        let read = reader.next_read().unwrap().unwrap();
        assert_eq!(read.name, b"match");
        // Forward primer at window offset [0, 6): left trim moves to 4 + 6,
        // written back in 1-based form.
        assert_eq!(read.clip_qual, (11, 14));
        assert_eq!(read.clip_qual_window(), (10, 14));
        // Sequence and flow data untouched.
        assert_eq!(read.bases, b"TCAGAACCGGTTTT");
        assert_eq!(read.flowgram_values, vec![100; 8]);
        assert!(reader.next_read().unwrap().is_none());
    }

    #[test]
    fn test_kept_unmatched_read_keeps_raw_trim_points() {
        let input = NamedTempFile::with_suffix(".sff").unwrap();
        let output = NamedTempFile::with_suffix(".sff").unwrap();

        {
            let file = File::create(input.path()).unwrap();
            let mut writer = SffWriter::new(BufWriter::new(file), &test_header()).unwrap();
            writer
                .write_read(&test_read("untrimmed", b"TCAGGTGTGTGT", (0, 0)))
                .unwrap();
            writer.finish().unwrap();
        }

        let primers = vec![b"AACCGG".to_vec()];
        let matcher = PrimerMatcher::build(&primers, 0, Orientation::Forward).unwrap();
        let engine = ClipEngine::new(&matcher, Orientation::Forward, 0, true);
        let mut stats = RunStats::default();

        clip_file(input.path(), output.path(), &engine, &mut stats).unwrap();
        assert_eq!(stats.kept_unmatched, 1);

        // No clip happened, so the raw zeros are not rewritten as (1, n).
        let mut reader = SffReader::new(BufReader::new(File::open(output.path()).unwrap())).unwrap();
        let read = reader.next_read().unwrap().unwrap();
        assert_eq!(read.clip_qual, (0, 0));
    }
}
