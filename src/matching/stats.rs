//! Outcome counters for a clipping run.

use serde::Serialize;

use crate::core::types::ClipOutcome;

/// Counters over a stream of records, incremented exactly once per record
/// and read at end of run for reporting.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Records clipped and kept.
    pub clipped: u64,
    /// Records clipped but discarded for falling below the length floor.
    pub short_clipped: u64,
    /// Unmatched records kept under the keep-unmatched policy.
    pub kept_unmatched: u64,
    /// Unmatched records not emitted (too short, or policy disabled).
    pub short_unmatched: u64,
}

impl RunStats {
    pub fn record(&mut self, outcome: &ClipOutcome) {
        match outcome {
            ClipOutcome::Clipped { .. } => self.clipped += 1,
            ClipOutcome::KeptUnmatched => self.kept_unmatched += 1,
            ClipOutcome::DiscardedShortAfterClip => self.short_clipped += 1,
            ClipOutcome::DiscardedShortUnmatched => self.short_unmatched += 1,
        }
    }

    /// Total records processed.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.clipped + self.short_clipped + self.kept_unmatched + self.short_unmatched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_outcome_hits_one_counter() {
        let mut stats = RunStats::default();
        stats.record(&ClipOutcome::Clipped { start: 1, end: 5 });
        stats.record(&ClipOutcome::Clipped { start: 0, end: 9 });
        stats.record(&ClipOutcome::KeptUnmatched);
        stats.record(&ClipOutcome::DiscardedShortAfterClip);
        stats.record(&ClipOutcome::DiscardedShortUnmatched);

        assert_eq!(stats.clipped, 2);
        assert_eq!(stats.kept_unmatched, 1);
        assert_eq!(stats.short_clipped, 1);
        assert_eq!(stats.short_unmatched, 1);
        assert_eq!(stats.total(), 5);
    }
}
