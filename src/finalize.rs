//! Whole-table finalization safety net.
//!
//! Both passes re-check invariants the chunked pipeline already enforces:
//! under correct upstream behavior each removes zero rows, and that no-op
//! relationship is asserted by the integration tests. They are kept as
//! defense in depth over the materialized output.

use serde::Serialize;
use tracing::info;

use crate::data::Corpus;
use crate::dedup::{Signature, SignatureIndex};

/// Before/after/removed row counts reported by a finalization pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct FilterStats {
    /// Rows before the pass.
    pub before: usize,
    /// Rows after the pass.
    pub after: usize,
    /// Rows removed by the pass.
    pub removed: usize,
}

impl FilterStats {
    fn from_counts(before: usize, after: usize) -> Self {
        Self {
            before,
            after,
            removed: before - after,
        }
    }
}

/// Drop every row whose label is missing, keeping order.
pub fn remove_missing_labels(corpus: Corpus) -> (Corpus, FilterStats) {
    let Corpus { schema, rows } = corpus;
    let before = rows.len();
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|row| row.label(&schema).is_some())
        .collect();
    let stats = FilterStats::from_counts(before, rows.len());
    info!(
        before = stats.before,
        after = stats.after,
        removed = stats.removed,
        "removed rows with missing labels"
    );
    (Corpus { schema, rows }, stats)
}

/// Drop rows whose `(text, label)` pair duplicates an earlier row, keeping
/// the first occurrence. Text has already been normalized upstream, so this
/// compares already-cleaned values with the same signature equality the
/// chunked pass used.
pub fn remove_duplicates(corpus: Corpus) -> (Corpus, FilterStats) {
    let Corpus { schema, rows } = corpus;
    let before = rows.len();
    let mut index = SignatureIndex::new();
    let rows: Vec<_> = rows
        .into_iter()
        .filter(|row| {
            let text = row.text(&schema).unwrap_or("").to_string();
            let label = row.label(&schema).unwrap_or("").to_string();
            index.insert(Signature::new(text, label))
        })
        .collect();
    let stats = FilterStats::from_counts(before, rows.len());
    info!(
        before = stats.before,
        after = stats.after,
        removed = stats.removed,
        "removed duplicate rows"
    );
    (Corpus { schema, rows }, stats)
}
