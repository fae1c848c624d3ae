//! Clip decision engine.
//!
//! One engine is built per run from the compiled matcher plus the run
//! policy (orientation, length floor, keep-unmatched flag), and every format
//! adapter calls the same [`ClipEngine::decide`] on each record's effective
//! sequence. The engine has no side effects; applying the returned bounds to
//! the record (slicing quality in lock-step, moving SFF trim points) is the
//! adapter's job.

use crate::core::types::{ClipOutcome, Orientation};
use crate::matching::matcher::PrimerMatcher;

pub struct ClipEngine<'a> {
    matcher: &'a PrimerMatcher,
    orientation: Orientation,
    min_len: usize,
    keep_unmatched: bool,
}

impl<'a> ClipEngine<'a> {
    #[must_use]
    pub fn new(
        matcher: &'a PrimerMatcher,
        orientation: Orientation,
        min_len: usize,
        keep_unmatched: bool,
    ) -> Self {
        Self {
            matcher,
            orientation,
            min_len,
            keep_unmatched,
        }
    }

    /// Decide what to do with one record.
    ///
    /// The sequence is uppercased here so matching is case-insensitive;
    /// returned bounds index into the caller's original (effective) sequence.
    #[must_use]
    pub fn decide(&self, effective: &[u8]) -> ClipOutcome {
        let upper = effective.to_ascii_uppercase();

        match self.matcher.find_first(&upper) {
            Some(span) => {
                let (start, end) = if self.orientation.keeps_tail() {
                    // Forward primer: take everything after it.
                    (span.end, effective.len())
                } else {
                    // Reverse primer: take everything before it.
                    (0, span.start)
                };

                if end - start >= self.min_len {
                    ClipOutcome::Clipped { start, end }
                } else {
                    ClipOutcome::DiscardedShortAfterClip
                }
            }
            None => {
                if self.keep_unmatched && effective.len() >= self.min_len {
                    ClipOutcome::KeptUnmatched
                } else {
                    ClipOutcome::DiscardedShortUnmatched
                }
            }
        }
    }

    #[must_use]
    pub fn keep_unmatched(&self) -> bool {
        self.keep_unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher(primers: &[&[u8]], mismatches: u8) -> PrimerMatcher {
        let primers: Vec<Vec<u8>> = primers.iter().map(|p| p.to_vec()).collect();
        PrimerMatcher::build(&primers, mismatches, Orientation::Forward).unwrap()
    }

    #[test]
    fn test_forward_cut_keeps_tail() {
        // Primer occupies [3, 8) of a 20-base read.
        let m = matcher(&[b"CCCCC"], 0);
        let engine = ClipEngine::new(&m, Orientation::Forward, 0, false);
        let read = b"AAACCCCCGTGTGTGTGTGT";
        assert_eq!(
            engine.decide(read),
            ClipOutcome::Clipped { start: 8, end: 20 }
        );
    }

    #[test]
    fn test_reverse_cut_keeps_head() {
        // Primer occupies [12, 17) of a 20-base read.
        let m = matcher(&[b"CCCCC"], 0);
        let engine = ClipEngine::new(&m, Orientation::Reverse, 0, false);
        let read = b"GTGTGTGTGTGTCCCCCGTG";
        assert_eq!(
            engine.decide(read),
            ClipOutcome::Clipped { start: 0, end: 12 }
        );
    }

    #[test]
    fn test_short_after_clip_is_discarded() {
        let m = matcher(&[b"CCCCC"], 0);
        let engine = ClipEngine::new(&m, Orientation::Forward, 13, false);
        let read = b"AAACCCCCGTGTGTGTGTGT"; // 12 bases left after the cut
        assert_eq!(engine.decide(read), ClipOutcome::DiscardedShortAfterClip);
    }

    #[test]
    fn test_keep_unmatched_policy() {
        let m = matcher(&[b"CCCCC"], 0);

        let keeping = ClipEngine::new(&m, Orientation::Forward, 4, true);
        assert_eq!(keeping.decide(b"GTGTGTGT"), ClipOutcome::KeptUnmatched);
        assert_eq!(
            keeping.decide(b"GTG"),
            ClipOutcome::DiscardedShortUnmatched
        );

        let dropping = ClipEngine::new(&m, Orientation::Forward, 4, false);
        assert_eq!(
            dropping.decide(b"GTGTGTGT"),
            ClipOutcome::DiscardedShortUnmatched
        );
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let m = matcher(&[b"CCCCC"], 0);
        let engine = ClipEngine::new(&m, Orientation::Forward, 0, false);
        assert_eq!(
            engine.decide(b"aaacccccgtgt"),
            ClipOutcome::Clipped { start: 8, end: 12 }
        );
    }

    #[test]
    fn test_reclipping_clipped_output_finds_nothing() {
        let m = matcher(&[b"AACCGG"], 0);
        let engine = ClipEngine::new(&m, Orientation::Forward, 0, true);

        let read = b"AACCGGTTTT";
        let ClipOutcome::Clipped { start, end } = engine.decide(read) else {
            panic!("expected a clip");
        };

        // Re-running on the clipped output: the primer is gone.
        assert_eq!(engine.decide(&read[start..end]), ClipOutcome::KeptUnmatched);
    }
}
