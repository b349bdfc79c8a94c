//! Duplicate-signature tracking and per-chunk processing.
//!
//! The signature index is the only mutable state shared across chunks of a
//! run. It is created empty per run, threaded as an explicit `&mut` argument
//! through the sequential chunk loop, and never shared with anything else:
//! first-occurrence-wins correctness depends on in-order, single-writer
//! mutation. Nothing is ever removed from it.

use indexmap::IndexSet;

use crate::data::{Chunk, Record};
use crate::normalize::TextNormalizer;
use crate::table::TableSchema;
use crate::types::{LabelValue, NormalizedText};

/// Deduplication key: normalized text paired with the opaque label scalar.
/// Two records are duplicates iff their signatures are equal (exact string
/// equality, not fuzzy).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// Text after the full normalization pipeline.
    pub text: NormalizedText,
    /// Label value, compared as an opaque scalar.
    pub label: LabelValue,
}

impl Signature {
    /// Build a signature from already-normalized text and a present label.
    pub fn new(text: NormalizedText, label: LabelValue) -> Self {
        Self { text, label }
    }
}

/// Append-only, insertion-ordered set of signatures kept so far in one run.
#[derive(Debug, Default)]
pub struct SignatureIndex {
    seen: IndexSet<Signature>,
}

impl SignatureIndex {
    /// Create an empty index for a fresh run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a signature; returns `true` iff it was not already present.
    pub fn insert(&mut self, signature: Signature) -> bool {
        self.seen.insert(signature)
    }

    /// Whether a signature has already been kept.
    pub fn contains(&self, signature: &Signature) -> bool {
        self.seen.contains(signature)
    }

    /// Number of distinct signatures kept so far.
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    /// Whether no signature has been kept yet.
    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Kept signatures in first-occurrence order.
    pub fn iter(&self) -> impl Iterator<Item = &Signature> {
        self.seen.iter()
    }
}

/// Clean and deduplicate one chunk against the shared index.
///
/// Records with a missing label are dropped first; surviving records get a
/// normalized text field; records whose signature is already in `index` are
/// dropped silently. Kept records come back in their original relative order,
/// with each kept signature inserted into `index` at decision time.
///
/// Must be invoked strictly sequentially across chunks: the decision for
/// chunk *N* depends on every insertion made by chunks *1..N-1*.
pub fn process_chunk(
    schema: &TableSchema,
    chunk: Chunk,
    normalizer: &TextNormalizer,
    index: &mut SignatureIndex,
) -> Vec<Record> {
    let mut kept = Vec::new();
    for record in chunk {
        let Some(label) = record.label(schema) else {
            continue;
        };
        let label = label.to_string();
        let normalized = normalizer.normalize(record.text(schema));
        if index.insert(Signature::new(normalized.clone(), label)) {
            kept.push(record.with_text(schema, normalized));
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::for_test(vec!["text", "label"], 0, 1)
    }

    fn record(text: &str, label: &str) -> Record {
        Record::new(vec![text.to_string(), label.to_string()])
    }

    #[test]
    fn insert_reports_first_occurrence() {
        let mut index = SignatureIndex::new();
        let sig = Signature::new("ok".into(), "A".into());
        assert!(index.insert(sig.clone()));
        assert!(!index.insert(sig.clone()));
        assert!(index.contains(&sig));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn chunk_drops_missing_labels_and_duplicates_in_order() {
        let schema = schema();
        let normalizer = TextNormalizer::default();
        let mut index = SignatureIndex::new();

        let chunk = vec![
            record("alpha", "A"),
            record("unlabeled", ""),
            record("beta", "B"),
            record("alpha", "A"),
        ];
        let kept = process_chunk(&schema, chunk, &normalizer, &mut index);

        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].text(&schema), Some("alpha"));
        assert_eq!(kept[1].text(&schema), Some("beta"));
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn duplicates_are_detected_across_chunks() {
        let schema = schema();
        let normalizer = TextNormalizer::default();
        let mut index = SignatureIndex::new();

        let first = process_chunk(&schema, vec![record("ok", "A")], &normalizer, &mut index);
        assert_eq!(first.len(), 1);

        let second = process_chunk(
            &schema,
            vec![record("ok", "A"), record("ok", "B")],
            &normalizer,
            &mut index,
        );
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].label(&schema), Some("B"));
    }

    #[test]
    fn signatures_compare_post_normalization_text() {
        let schema = schema();
        let normalizer = TextNormalizer::default();
        let mut index = SignatureIndex::new();

        // Same visible text after markup stripping, so the second row is a duplicate.
        let chunk = vec![record("<b>rust</b> code", "A"), record("rust   code", "A")];
        let kept = process_chunk(&schema, chunk, &normalizer, &mut index);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].text(&schema), Some("rust code"));
    }
}
