use serde::Serialize;

/// Which end of a read a primer is expected on, and how the primer file
/// should be interpreted.
///
/// `Forward` primers sit at the 5' end: a match keeps everything after the
/// primer. `Reverse` and `ReverseComplement` primers sit at the 3' end: a
/// match keeps everything before the primer. `ReverseComplement` additionally
/// reverse-complements each primer sequence before pattern generation, for
/// primer files written in the orientation of the opposite strand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Orientation {
    Forward,
    Reverse,
    ReverseComplement,
}

impl Orientation {
    /// True when the kept region is everything after the match.
    #[must_use]
    pub fn keeps_tail(self) -> bool {
        matches!(self, Self::Forward)
    }

    /// True when primers must be reverse-complemented before matching.
    #[must_use]
    pub fn complements_primers(self) -> bool {
        matches!(self, Self::ReverseComplement)
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => write!(f, "forward"),
            Self::Reverse => write!(f, "reverse"),
            Self::ReverseComplement => write!(f, "reverse-complement"),
        }
    }
}

/// Decision for a single record, computed once and consumed immediately by
/// the format adapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipOutcome {
    /// A primer matched and the remaining region meets the length floor.
    /// `start..end` are offsets into the record's effective sequence.
    Clipped { start: usize, end: usize },

    /// No primer matched; the keep-unmatched policy retains the record.
    KeptUnmatched,

    /// A primer matched but the remaining region is below the length floor.
    DiscardedShortAfterClip,

    /// No primer matched and the record is not retained, either because it
    /// is below the length floor or because the keep-unmatched policy is off.
    DiscardedShortUnmatched,
}

impl ClipOutcome {
    /// True when the adapter should emit the record.
    #[must_use]
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Clipped { .. } | Self::KeptUnmatched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_cut_side() {
        assert!(Orientation::Forward.keeps_tail());
        assert!(!Orientation::Reverse.keeps_tail());
        assert!(!Orientation::ReverseComplement.keeps_tail());
    }

    #[test]
    fn test_orientation_primer_handling() {
        assert!(!Orientation::Forward.complements_primers());
        assert!(!Orientation::Reverse.complements_primers());
        assert!(Orientation::ReverseComplement.complements_primers());
    }

    #[test]
    fn test_outcome_emission() {
        assert!(ClipOutcome::Clipped { start: 0, end: 4 }.is_emitted());
        assert!(ClipOutcome::KeptUnmatched.is_emitted());
        assert!(!ClipOutcome::DiscardedShortAfterClip.is_emitted());
        assert!(!ClipOutcome::DiscardedShortUnmatched.is_emitted());
    }
}
