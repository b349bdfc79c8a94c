//! Sequential chunked pipeline driver.

use std::path::Path;

use tracing::info;

use crate::config::CleanConfig;
use crate::data::Corpus;
use crate::dedup::{process_chunk, SignatureIndex};
use crate::errors::PipelineError;
use crate::normalize::TextNormalizer;
use crate::table::ChunkedReader;

/// Read `path` in bounded-size chunks, clean and deduplicate each chunk
/// against a fresh run-scoped signature index, and return the accumulated
/// corpus in (chunk order, intra-chunk order).
///
/// Per-chunk kept counts are reported as `tracing` events; they are purely
/// observational. A source read or parse failure aborts the whole run: there
/// is no well-defined partial result to salvage mid-chunk-boundary.
pub fn process_file(path: &Path, config: &CleanConfig) -> Result<Corpus, PipelineError> {
    let mut reader = ChunkedReader::open(path, config.chunk_size)?;
    let schema = reader.schema().clone();
    let normalizer = TextNormalizer::new(config.language);

    let mut index = SignatureIndex::new();
    let mut rows = Vec::new();
    let mut chunk_no = 0usize;

    while let Some(chunk) = reader.next_chunk()? {
        chunk_no += 1;
        let read = chunk.len();
        let kept = process_chunk(&schema, chunk, &normalizer, &mut index);
        info!(chunk = chunk_no, read, kept = kept.len(), "processed chunk");
        rows.extend(kept);
    }

    Ok(Corpus { schema, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;

    fn write_fixture(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let temp = tempfile::tempdir().expect("failed creating tempdir");
        let path = temp.path().join("input.csv");
        let mut file = File::create(&path).expect("fixture file");
        file.write_all(contents.as_bytes()).expect("fixture write");
        (temp, path)
    }

    fn config(chunk_size: usize) -> CleanConfig {
        CleanConfig {
            chunk_size,
            ..CleanConfig::default()
        }
    }

    #[test]
    fn keeps_first_occurrence_across_chunk_boundaries() {
        // "ok,A" appears in chunk 1 (row 2) and chunk 2 (row 1).
        let (_temp, path) = write_fixture("text,label\nfirst,X\nok,A\nok,A\nlast,Y\n");
        let corpus = process_file(&path, &config(2)).expect("pipeline run");

        let texts: Vec<_> = corpus
            .rows
            .iter()
            .map(|row| row.text(&corpus.schema).unwrap_or(""))
            .collect();
        assert_eq!(texts, vec!["first", "ok", "last"]);
    }

    #[test]
    fn missing_label_rows_never_reach_the_output() {
        let (_temp, path) = write_fixture("text,label\nkeep,A\ndrop me,\n");
        let corpus = process_file(&path, &config(10)).expect("pipeline run");
        assert_eq!(corpus.len(), 1);
        assert!(corpus.rows.iter().all(|row| row.label(&corpus.schema).is_some()));
    }

    #[test]
    fn unreadable_source_is_fatal() {
        let temp = tempfile::tempdir().expect("failed creating tempdir");
        let missing = temp.path().join("nope.csv");
        assert!(process_file(&missing, &config(10)).is_err());
    }
}
