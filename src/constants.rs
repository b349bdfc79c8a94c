use crate::splits::SplitLabel;

/// Constants used by table schema resolution and the multilabel contract.
pub mod table {
    /// Canonical column holding the free-text field.
    pub const TEXT_COLUMN: &str = "text";
    /// Canonical column holding the label scalar.
    pub const LABEL_COLUMN: &str = "label";
    /// Delimiter separating label tokens inside one label value.
    pub const MULTILABEL_DELIMITER: char = ';';
}

/// Constants used by the chunked pipeline driver.
pub mod pipeline {
    /// Default number of rows read per chunk.
    pub const DEFAULT_CHUNK_SIZE: usize = 10_000;
}

/// Constants used by the text normalizer.
pub mod normalize {
    /// Characters removed from visible text during markup stripping.
    pub const STRIPPED_CHARS: [char; 2] = ['?', '\u{FFFD}'];
    /// Stray character removed as the final normalization step.
    pub const STRAY_CHAR: char = '*';
    /// Upper bound on HTML entity body length before giving up on decoding.
    pub const ENTITY_MAX_LEN: usize = 10;
}

/// Constants used by split assignment and persisted split tables.
pub mod splits {
    use super::SplitLabel;

    /// Canonical split iteration order used for assignment tie-breaks and output.
    pub const ALL_SPLITS: [SplitLabel; 3] =
        [SplitLabel::Train, SplitLabel::Validation, SplitLabel::Test];
    /// Default deterministic seed for split shuffling.
    pub const DEFAULT_SEED: u64 = 42;
    /// Output filename for the training split.
    pub const TRAIN_FILENAME: &str = "train.csv";
    /// Output filename for the validation split.
    pub const VALIDATION_FILENAME: &str = "val.csv";
    /// Output filename for the test split.
    pub const TEST_FILENAME: &str = "test.csv";
}
