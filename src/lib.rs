#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

/// Command-line entry points used by the `corpusprep` binary.
pub mod app;
/// Pipeline and split configuration types.
pub mod config;
/// Centralized constants used across the pipeline, normalizer, and splitter.
pub mod constants;
/// Record, chunk, and corpus types.
pub mod data;
/// Signature index and per-chunk clean/dedup processing.
pub mod dedup;
/// Whole-table finalization safety net.
pub mod finalize;
/// Label distribution and split summary helpers.
pub mod metrics;
/// Text normalization pipeline (markup, stopwords, stray characters).
pub mod normalize;
/// Chunked table reading and the sequential pipeline driver.
pub mod pipeline;
/// Deterministic multilabel-aware train/validation/test splitting.
pub mod splits;
/// Fixed per-language stopword sets.
pub mod stopwords;
/// Delimited-table schema and I/O.
pub mod table;
/// Shared type aliases.
pub mod types;

mod errors;

pub use config::{CleanConfig, SplitConfig};
pub use data::{label_tokens, Chunk, Corpus, Record};
pub use dedup::{process_chunk, Signature, SignatureIndex};
pub use errors::PipelineError;
pub use finalize::{remove_duplicates, remove_missing_labels, FilterStats};
pub use metrics::{label_distribution, split_summary, SplitSummary};
pub use normalize::{
    clean_markup, remove_asterisks, remove_stopwords, CleanOutcome, MarkupError, TextNormalizer,
};
pub use pipeline::process_file;
pub use splits::{split_corpus, SplitCorpora, SplitLabel, SplitRatios};
pub use stopwords::Language;
pub use table::{read_table, write_table, ChunkedReader, TableSchema};
pub use types::{ColumnName, LabelToken, LabelValue, NormalizedText};
