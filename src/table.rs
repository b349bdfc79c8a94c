use std::fs::File;
use std::path::Path;

use crate::constants::table::{LABEL_COLUMN, TEXT_COLUMN};
use crate::data::{Chunk, Corpus, Record};
use crate::errors::PipelineError;
use crate::types::ColumnName;

/// Column layout of a source table, resolved from its header row.
///
/// The schema requires `text` and `label` columns; every other column is
/// carried through the pipeline untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSchema {
    headers: Vec<ColumnName>,
    text_idx: usize,
    label_idx: usize,
}

impl TableSchema {
    /// Resolve the schema from a header row.
    ///
    /// A header without a `text` or `label` column is malformed input and
    /// therefore fatal.
    pub fn from_headers(headers: &csv::StringRecord) -> Result<Self, PipelineError> {
        let headers: Vec<ColumnName> = headers.iter().map(str::to_string).collect();
        let position = |name: &str| {
            headers
                .iter()
                .position(|header| header == name)
                .ok_or_else(|| PipelineError::MissingColumn(name.to_string()))
        };
        let text_idx = position(TEXT_COLUMN)?;
        let label_idx = position(LABEL_COLUMN)?;
        Ok(Self {
            headers,
            text_idx,
            label_idx,
        })
    }

    /// Column names in table order.
    pub fn headers(&self) -> &[ColumnName] {
        &self.headers
    }

    /// Index of the text column.
    pub fn text_idx(&self) -> usize {
        self.text_idx
    }

    /// Index of the label column.
    pub fn label_idx(&self) -> usize {
        self.label_idx
    }

    #[cfg(test)]
    pub(crate) fn for_test(headers: Vec<&str>, text_idx: usize, label_idx: usize) -> Self {
        Self {
            headers: headers.into_iter().map(str::to_string).collect(),
            text_idx,
            label_idx,
        }
    }
}

/// Sequential chunked reader over a delimited UTF-8 table.
///
/// Chunks are yielded in source order and hold at most `chunk_size` rows.
/// Any read or parse error (including ragged rows) is propagated immediately:
/// source failures are fatal to the run and never retried.
#[derive(Debug)]
pub struct ChunkedReader {
    reader: csv::Reader<File>,
    schema: TableSchema,
    chunk_size: usize,
}

impl ChunkedReader {
    /// Open `path` and resolve its schema from the header row.
    pub fn open(path: &Path, chunk_size: usize) -> Result<Self, PipelineError> {
        if chunk_size == 0 {
            return Err(PipelineError::Configuration(
                "chunk size must be a positive integer".to_string(),
            ));
        }
        let mut reader = csv::Reader::from_path(path)?;
        let schema = TableSchema::from_headers(reader.headers()?)?;
        Ok(Self {
            reader,
            schema,
            chunk_size,
        })
    }

    /// The resolved column schema.
    pub fn schema(&self) -> &TableSchema {
        &self.schema
    }

    /// Read the next chunk, or `None` once the source is exhausted.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk>, PipelineError> {
        let mut chunk = Chunk::with_capacity(self.chunk_size.min(1024));
        for row in self.reader.records().take(self.chunk_size) {
            let row = row?;
            chunk.push(Record::new(row.iter().map(str::to_string).collect()));
        }
        if chunk.is_empty() {
            return Ok(None);
        }
        Ok(Some(chunk))
    }
}

/// Read a whole table into memory (used by the splitter, which needs the
/// full cleaned corpus at once).
pub fn read_table(path: &Path) -> Result<Corpus, PipelineError> {
    let mut reader = ChunkedReader::open(path, usize::MAX)?;
    let schema = reader.schema().clone();
    let rows = reader.next_chunk()?.unwrap_or_default();
    Ok(Corpus { schema, rows })
}

/// Write a corpus as a delimited table with the same column schema it was
/// read with.
pub fn write_table(path: &Path, corpus: &Corpus) -> Result<(), PipelineError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(corpus.schema.headers())?;
    for row in &corpus.rows {
        writer.write_record(row.fields())?;
    }
    writer.flush()?;
    Ok(())
}
