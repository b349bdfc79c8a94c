//! Deterministic multilabel-aware train/validation/test splitting.
//!
//! Consumes a cleaned corpus (unique `(text, label)` pairs, no missing
//! labels) and partitions its rows into three disjoint subsets that cover the
//! input, approximately preserving per-label frequency balance. Rows are
//! visited in a seeded shuffle order and greedily assigned to the split with
//! the largest remaining per-label deficit, so the same seed and corpus
//! always produce the same partition.

use std::collections::HashMap;
use std::fmt;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use serde::{Deserialize, Serialize};

use crate::config::SplitConfig;
use crate::constants::splits::ALL_SPLITS;
use crate::data::{label_tokens, Corpus};
use crate::errors::PipelineError;
use crate::types::LabelToken;

/// Logical dataset partitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SplitLabel {
    /// Training split.
    Train,
    /// Validation split.
    Validation,
    /// Test split.
    Test,
}

impl SplitLabel {
    /// Stable lowercase name used in summaries and file naming.
    pub fn as_str(self) -> &'static str {
        match self {
            SplitLabel::Train => "train",
            SplitLabel::Validation => "validation",
            SplitLabel::Test => "test",
        }
    }

    fn ordinal(self) -> usize {
        match self {
            SplitLabel::Train => 0,
            SplitLabel::Validation => 1,
            SplitLabel::Test => 2,
        }
    }
}

impl fmt::Display for SplitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ratio configuration for train/validation/test assignment.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SplitRatios {
    /// Fraction assigned to train.
    pub train: f64,
    /// Fraction assigned to validation.
    pub validation: f64,
    /// Fraction assigned to test.
    pub test: f64,
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self {
            train: 0.8,
            validation: 0.1,
            test: 0.1,
        }
    }
}

impl SplitRatios {
    /// Validate that ratios are non-negative and sum to `1.0` (within epsilon).
    pub fn normalized(self) -> Result<Self, PipelineError> {
        if self.train < 0.0 || self.validation < 0.0 || self.test < 0.0 {
            return Err(PipelineError::Configuration(
                "split ratios must be non-negative".to_string(),
            ));
        }
        let sum = self.train + self.validation + self.test;
        if (sum - 1.0).abs() > 1e-6 {
            return Err(PipelineError::Configuration(
                "split ratios must sum to 1.0".to_string(),
            ));
        }
        Ok(self)
    }

    fn of(self, split: SplitLabel) -> f64 {
        match split {
            SplitLabel::Train => self.train,
            SplitLabel::Validation => self.validation,
            SplitLabel::Test => self.test,
        }
    }
}

/// The three disjoint corpora produced by [`split_corpus`].
#[derive(Clone, Debug)]
pub struct SplitCorpora {
    /// Training subset.
    pub train: Corpus,
    /// Validation subset.
    pub validation: Corpus,
    /// Test subset.
    pub test: Corpus,
}

impl SplitCorpora {
    /// Iterate the subsets in canonical split order.
    pub fn iter(&self) -> impl Iterator<Item = (SplitLabel, &Corpus)> {
        ALL_SPLITS.into_iter().map(move |split| {
            let corpus = match split {
                SplitLabel::Train => &self.train,
                SplitLabel::Validation => &self.validation,
                SplitLabel::Test => &self.test,
            };
            (split, corpus)
        })
    }
}

/// Partition `corpus` into train/validation/test subsets.
///
/// Assignment is greedy iterative stratification: rows are visited in a
/// seeded shuffle order, and each row goes to the split with the largest
/// remaining deficit summed over the row's label tokens, tie-broken by
/// overall remaining split capacity and then canonical split order. Relative
/// row order within each subset follows the input corpus.
pub fn split_corpus(corpus: Corpus, config: &SplitConfig) -> Result<SplitCorpora, PipelineError> {
    let ratios = config.ratios.normalized()?;
    let assignments = assign_splits(&corpus, ratios, config.seed);

    let Corpus { schema, rows } = corpus;
    let mut train = Vec::new();
    let mut validation = Vec::new();
    let mut test = Vec::new();
    for (row, split) in rows.into_iter().zip(assignments) {
        match split {
            SplitLabel::Train => train.push(row),
            SplitLabel::Validation => validation.push(row),
            SplitLabel::Test => test.push(row),
        }
    }

    Ok(SplitCorpora {
        train: Corpus {
            schema: schema.clone(),
            rows: train,
        },
        validation: Corpus {
            schema: schema.clone(),
            rows: validation,
        },
        test: Corpus { schema, rows: test },
    })
}

/// Compute one split label per row, indexed like `corpus.rows`.
fn assign_splits(corpus: &Corpus, ratios: SplitRatios, seed: u64) -> Vec<SplitLabel> {
    let row_tokens: Vec<Vec<LabelToken>> = corpus
        .rows
        .iter()
        .map(|row| {
            row.label(&corpus.schema)
                .map(|label| label_tokens(label).map(str::to_string).collect())
                .unwrap_or_default()
        })
        .collect();

    // Per-label target counts for each split.
    let mut desired: HashMap<&str, [f64; 3]> = HashMap::new();
    for tokens in &row_tokens {
        for token in tokens {
            let targets = desired.entry(token.as_str()).or_insert([0.0; 3]);
            for split in ALL_SPLITS {
                targets[split.ordinal()] += ratios.of(split);
            }
        }
    }

    let total = corpus.rows.len() as f64;
    let mut split_capacity = [
        total * ratios.train,
        total * ratios.validation,
        total * ratios.test,
    ];

    let mut order: Vec<usize> = (0..corpus.rows.len()).collect();
    order.shuffle(&mut StdRng::seed_from_u64(seed));

    let mut assignments = vec![SplitLabel::Train; corpus.rows.len()];
    for row_idx in order {
        let tokens = &row_tokens[row_idx];
        let mut best = SplitLabel::Train;
        let mut best_key = (f64::NEG_INFINITY, f64::NEG_INFINITY);
        for split in ALL_SPLITS {
            let slot = split.ordinal();
            let label_deficit: f64 = tokens
                .iter()
                .filter_map(|token| desired.get(token.as_str()))
                .map(|targets| targets[slot])
                .sum();
            let key = (label_deficit, split_capacity[slot]);
            if key.0 > best_key.0 || (key.0 == best_key.0 && key.1 > best_key.1) {
                best = split;
                best_key = key;
            }
        }

        let slot = best.ordinal();
        for token in tokens {
            if let Some(targets) = desired.get_mut(token.as_str()) {
                targets[slot] -= 1.0;
            }
        }
        split_capacity[slot] -= 1.0;
        assignments[row_idx] = best;
    }
    assignments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Record;
    use crate::table::TableSchema;

    fn corpus(labels: &[&str]) -> Corpus {
        Corpus {
            schema: TableSchema::for_test(vec!["text", "label"], 0, 1),
            rows: labels
                .iter()
                .enumerate()
                .map(|(idx, label)| Record::new(vec![format!("row {idx}"), label.to_string()]))
                .collect(),
        }
    }

    fn config(seed: u64) -> SplitConfig {
        SplitConfig {
            seed,
            ..SplitConfig::default()
        }
    }

    #[test]
    fn ratios_must_sum_to_one() {
        let bad = SplitRatios {
            train: 0.5,
            validation: 0.2,
            test: 0.2,
        };
        assert!(bad.normalized().is_err());
        assert!(SplitRatios::default().normalized().is_ok());
    }

    #[test]
    fn partition_is_disjoint_and_covering() {
        let labels: Vec<&str> = (0..60)
            .map(|idx| if idx % 2 == 0 { "A" } else { "A;B" })
            .collect();
        let input = corpus(&labels);
        let total = input.len();
        let splits = split_corpus(input, &config(7)).expect("split");

        let mut seen: Vec<&str> = Vec::new();
        for (_, subset) in splits.iter() {
            for row in &subset.rows {
                seen.push(row.text(&subset.schema).expect("text"));
            }
        }
        assert_eq!(seen.len(), total);
        let mut deduped = seen.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), total);
    }

    #[test]
    fn same_seed_gives_same_partition() {
        let labels: Vec<&str> = (0..40).map(|idx| if idx % 3 == 0 { "A" } else { "B" }).collect();
        let first = split_corpus(corpus(&labels), &config(99)).expect("split");
        let second = split_corpus(corpus(&labels), &config(99)).expect("split");
        assert_eq!(first.train.rows, second.train.rows);
        assert_eq!(first.validation.rows, second.validation.rows);
        assert_eq!(first.test.rows, second.test.rows);
    }

    #[test]
    fn sizes_track_ratios() {
        let labels = vec!["A"; 100];
        let splits = split_corpus(corpus(&labels), &config(42)).expect("split");
        assert_eq!(splits.train.len(), 80);
        assert_eq!(splits.validation.len(), 10);
        assert_eq!(splits.test.len(), 10);
    }

    #[test]
    fn every_split_sees_a_frequent_label() {
        let labels: Vec<&str> = (0..100)
            .map(|idx| if idx % 2 == 0 { "common" } else { "common;rare" })
            .collect();
        let splits = split_corpus(corpus(&labels), &config(3)).expect("split");
        for (_, subset) in splits.iter() {
            assert!(
                subset
                    .labels()
                    .flat_map(label_tokens)
                    .any(|token| token == "common"),
                "each split should carry the frequent label"
            );
        }
    }
}
