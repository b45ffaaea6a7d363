//! Line-level change statistics between canonical documents
//!
//! Change *detection* is structural equality in [`crate::Document`];
//! these stats only describe the size of a detected change for logging
//! and pass reports.

use similar::{ChangeTag, TextDiff};

/// Summary of a textual change between two canonical serializations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffStats {
    pub lines_added: usize,
    pub lines_removed: usize,
    /// Similarity ratio (0.0 to 1.0)
    pub similarity: f64,
}

impl DiffStats {
    /// Compare two canonical texts line by line.
    pub fn compute(old: &str, new: &str) -> Self {
        if old == new {
            return Self {
                lines_added: 0,
                lines_removed: 0,
                similarity: 1.0,
            };
        }

        let text_diff = TextDiff::from_lines(old, new);
        let similarity = text_diff.ratio() as f64;

        let mut lines_added = 0;
        let mut lines_removed = 0;
        for change in text_diff.iter_all_changes() {
            match change.tag() {
                ChangeTag::Insert => lines_added += 1,
                ChangeTag::Delete => lines_removed += 1,
                ChangeTag::Equal => {}
            }
        }

        Self {
            lines_added,
            lines_removed,
            similarity,
        }
    }
}
