use crate::constants::table::MULTILABEL_DELIMITER;
use crate::table::TableSchema;

/// One table row, holding every column value in schema order.
///
/// A field value is *missing* iff it is the empty string (the delimited-text
/// encoding of null). Records are immutable values; normalization produces a
/// new record via [`Record::with_text`] rather than editing in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Record {
    fields: Vec<String>,
}

impl Record {
    /// Build a record from column values in schema order.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// All column values in schema order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The free-text field, or `None` when missing.
    pub fn text(&self, schema: &TableSchema) -> Option<&str> {
        self.field(schema.text_idx())
    }

    /// The label field, or `None` when missing.
    pub fn label(&self, schema: &TableSchema) -> Option<&str> {
        self.field(schema.label_idx())
    }

    /// A copy of this record with the text field replaced.
    pub fn with_text(&self, schema: &TableSchema, text: String) -> Record {
        let mut fields = self.fields.clone();
        fields[schema.text_idx()] = text;
        Record { fields }
    }

    fn field(&self, idx: usize) -> Option<&str> {
        self.fields
            .get(idx)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }
}

/// A bounded, ordered slice of the source table processed as a unit.
pub type Chunk = Vec<Record>;

/// The ordered output table: all kept records across all chunks, in
/// (chunk order, intra-chunk order).
#[derive(Clone, Debug)]
pub struct Corpus {
    /// Column schema shared by every row.
    pub schema: TableSchema,
    /// Kept rows in output order.
    pub rows: Vec<Record>,
}

impl Corpus {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the corpus holds no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over present label values in row order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().filter_map(|row| row.label(&self.schema))
    }
}

/// Split a label value into its multilabel tokens.
///
/// This is the downstream splitter's view of the label; the dedup core treats
/// the same value as an opaque scalar.
pub fn label_tokens(label: &str) -> impl Iterator<Item = &str> {
    label
        .split(MULTILABEL_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> TableSchema {
        TableSchema::for_test(vec!["id", "text", "label"], 1, 2)
    }

    #[test]
    fn empty_fields_read_as_missing() {
        let record = Record::new(vec!["7".into(), "".into(), "".into()]);
        assert_eq!(record.text(&schema()), None);
        assert_eq!(record.label(&schema()), None);
    }

    #[test]
    fn with_text_leaves_original_untouched() {
        let record = Record::new(vec!["7".into(), "raw".into(), "A".into()]);
        let updated = record.with_text(&schema(), "clean".to_string());
        assert_eq!(record.text(&schema()), Some("raw"));
        assert_eq!(updated.text(&schema()), Some("clean"));
        assert_eq!(updated.label(&schema()), Some("A"));
    }

    #[test]
    fn label_tokens_split_and_drop_empties() {
        let tokens: Vec<&str> = label_tokens("engineering; backend;;ml").collect();
        assert_eq!(tokens, vec!["engineering", "backend", "ml"]);
    }
}
