use std::io;

use thiserror::Error;

use crate::types::ColumnName;

/// Error type for configuration, table I/O, and split-assignment failures.
///
/// Per-record normalization failures are deliberately absent: they are
/// recovered locally by the normalizer and never propagate (see
/// [`crate::normalize::CleanOutcome`]).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("required column '{0}' is missing from the table header")]
    MissingColumn(ColumnName),
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("table read/write failed: {0}")]
    Table(#[from] csv::Error),
    #[error("split assignment failed: {0}")]
    Split(String),
}
