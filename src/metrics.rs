//! Label distribution summaries for cleaned and split corpora.
//!
//! The JSON-serializable [`SplitSummary`] is the data contract consumed by
//! external plotting/reporting; nothing in the pipeline reads it back.

use indexmap::IndexMap;
use serde::Serialize;

use crate::data::label_tokens;
use crate::splits::SplitCorpora;
use crate::types::LabelToken;

/// Count label tokens over an iterator of label values.
///
/// Keys come back sorted so summaries are deterministic.
pub fn label_distribution<'a>(
    labels: impl Iterator<Item = &'a str>,
) -> IndexMap<LabelToken, usize> {
    let mut counts: IndexMap<LabelToken, usize> = IndexMap::new();
    for label in labels {
        for token in label_tokens(label) {
            *counts.entry(token.to_string()).or_insert(0) += 1;
        }
    }
    counts.sort_keys();
    counts
}

/// Per-split sizes and label distributions.
#[derive(Clone, Debug, Serialize)]
pub struct SplitSummary {
    /// Row count per split, in canonical split order.
    pub sizes: IndexMap<String, usize>,
    /// Label-token counts per split, in canonical split order.
    pub labels: IndexMap<String, IndexMap<LabelToken, usize>>,
}

/// Summarize a partition for external reporting.
pub fn split_summary(corpora: &SplitCorpora) -> SplitSummary {
    let mut sizes = IndexMap::new();
    let mut labels = IndexMap::new();
    for (split, corpus) in corpora.iter() {
        sizes.insert(split.as_str().to_string(), corpus.len());
        labels.insert(split.as_str().to_string(), label_distribution(corpus.labels()));
    }
    SplitSummary { sizes, labels }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_distribution_counts_multilabel_tokens() {
        let labels = ["a;b", "a", "b;c", "a"];
        let counts = label_distribution(labels.iter().copied());
        let entries: Vec<(&str, usize)> = counts
            .iter()
            .map(|(token, count)| (token.as_str(), *count))
            .collect();
        assert_eq!(entries, vec![("a", 3), ("b", 2), ("c", 1)]);
    }

    #[test]
    fn label_distribution_is_empty_for_no_labels() {
        let counts = label_distribution(std::iter::empty());
        assert!(counts.is_empty());
    }
}
