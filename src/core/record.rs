/// Uniform view of one sequencing read, as handed to the clip engine.
///
/// Format adapters build one of these per input record, ask the engine for a
/// decision on [`Record::effective`], and then apply the resulting bounds to
/// their own format-native record. The clip window is used only by the SFF
/// adapter, where prior quality trimming restricts the active sub-range of
/// the raw sequence; when absent the whole sequence is in scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record identifier, for diagnostics only.
    pub name: String,

    /// Raw sequence as read from the file, case preserved.
    pub sequence: Vec<u8>,

    /// Per-base quality scores, same length as `sequence` when present.
    pub quality: Option<Vec<u8>>,

    /// Active `[left, right)` sub-range of `sequence`, when the format
    /// carries trim points.
    pub clip_window: Option<(usize, usize)>,
}

impl Record {
    /// The sequence region primer search runs over.
    #[must_use]
    pub fn effective(&self) -> &[u8] {
        match self.clip_window {
            Some((left, right)) => &self.sequence[left..right],
            None => &self.sequence,
        }
    }

    #[must_use]
    pub fn effective_len(&self) -> usize {
        self.effective().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_without_window() {
        let record = Record {
            name: "r1".to_string(),
            sequence: b"ACGTACGT".to_vec(),
            quality: None,
            clip_window: None,
        };
        assert_eq!(record.effective(), b"ACGTACGT");
        assert_eq!(record.effective_len(), 8);
    }

    #[test]
    fn test_effective_with_window() {
        let record = Record {
            name: "r1".to_string(),
            sequence: b"ACGTACGT".to_vec(),
            quality: None,
            clip_window: Some((2, 6)),
        };
        assert_eq!(record.effective(), b"GTAC");
        assert_eq!(record.effective_len(), 4);
    }
}
