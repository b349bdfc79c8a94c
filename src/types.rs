/// Text after the full normalization pipeline has been applied.
/// Example: `Senior Rust Engineer distributed storage`
pub type NormalizedText = String;
/// Raw label value, treated as an opaque scalar by the dedup core.
/// Example: `engineering;backend`
pub type LabelValue = String;
/// Single label token extracted from a semicolon-delimited label value.
/// Examples: `engineering`, `backend`
pub type LabelToken = String;
/// Column name in a table header.
/// Examples: `text`, `label`, `id`
pub type ColumnName = String;
