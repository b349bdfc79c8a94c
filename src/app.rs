//! Command-line entry points shared by the `corpusprep` binary.

use std::fs;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::config::{CleanConfig, SplitConfig};
use crate::constants::pipeline::DEFAULT_CHUNK_SIZE;
use crate::constants::splits::{
    DEFAULT_SEED, TEST_FILENAME, TRAIN_FILENAME, VALIDATION_FILENAME,
};
use crate::errors::PipelineError;
use crate::finalize::{remove_duplicates, remove_missing_labels};
use crate::metrics::split_summary;
use crate::pipeline::process_file;
use crate::splits::{split_corpus, SplitRatios};
use crate::table::{read_table, write_table};

#[derive(Debug, Parser)]
#[command(
    name = "corpusprep",
    disable_help_subcommand = true,
    about = "Clean, deduplicate, and split labeled text corpora",
    long_about = "Process a delimited text table in bounded-size chunks: normalize the text \
                  field, drop rows with missing labels, remove duplicate (text, label) pairs \
                  with first-occurrence-wins semantics, and optionally partition the cleaned \
                  table into train/validation/test subsets."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Clean and deduplicate a source table.
    Clean(CleanArgs),
    /// Partition a cleaned table into train/validation/test tables.
    Split(SplitArgs),
}

#[derive(Debug, Args)]
struct CleanArgs {
    /// Input table (CSV with at least `text` and `label` columns).
    input: PathBuf,
    /// Output path for the cleaned table.
    output: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_CHUNK_SIZE,
        help = "Rows read per chunk (bounds peak input-read memory)"
    )]
    chunk_size: usize,
}

#[derive(Debug, Args)]
struct SplitArgs {
    /// Cleaned input table.
    input: PathBuf,
    #[arg(
        long,
        default_value = "data",
        help = "Directory receiving train.csv, val.csv, and test.csv"
    )]
    output_dir: PathBuf,
    #[arg(
        long,
        default_value_t = DEFAULT_SEED,
        help = "Deterministic seed used for split assignment"
    )]
    seed: u64,
    #[arg(
        long = "split-ratios",
        value_name = "TRAIN,VALIDATION,TEST",
        value_parser = parse_split_ratios_arg,
        default_value = "0.8,0.1,0.1",
        help = "Comma-separated split ratios that must sum to 1.0"
    )]
    ratios: SplitRatios,
    #[arg(long, help = "Optional path for a JSON label-distribution summary")]
    summary: Option<PathBuf>,
}

/// Parse and run the CLI.
pub fn run() -> Result<(), PipelineError> {
    match Cli::parse().command {
        Command::Clean(args) => run_clean(args),
        Command::Split(args) => run_split(args),
    }
}

fn run_clean(args: CleanArgs) -> Result<(), PipelineError> {
    let config = CleanConfig {
        chunk_size: args.chunk_size,
        ..CleanConfig::default()
    };
    let corpus = process_file(&args.input, &config)?;
    let (corpus, _) = remove_missing_labels(corpus);
    let (corpus, _) = remove_duplicates(corpus);
    write_table(&args.output, &corpus)?;
    info!(rows = corpus.len(), output = %args.output.display(), "cleaned table written");
    Ok(())
}

fn run_split(args: SplitArgs) -> Result<(), PipelineError> {
    let corpus = read_table(&args.input)?;
    let config = SplitConfig {
        ratios: args.ratios,
        seed: args.seed,
    };
    let corpora = split_corpus(corpus, &config)?;

    fs::create_dir_all(&args.output_dir)?;
    write_table(&args.output_dir.join(TRAIN_FILENAME), &corpora.train)?;
    write_table(&args.output_dir.join(VALIDATION_FILENAME), &corpora.validation)?;
    write_table(&args.output_dir.join(TEST_FILENAME), &corpora.test)?;

    let summary = split_summary(&corpora);
    for (split, size) in &summary.sizes {
        info!(split = %split, rows = size, "split written");
    }
    if let Some(path) = args.summary {
        let payload = serde_json::to_string_pretty(&summary)
            .map_err(|err| PipelineError::Split(err.to_string()))?;
        fs::write(&path, payload)?;
        info!(summary = %path.display(), "split summary written");
    }
    Ok(())
}

fn parse_split_ratios_arg(raw: &str) -> Result<SplitRatios, String> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err("expected three comma-separated ratios".to_string());
    }
    let parse = |part: &str| {
        part.parse::<f64>()
            .map_err(|_| format!("invalid ratio '{part}'"))
    };
    let ratios = SplitRatios {
        train: parse(parts[0])?,
        validation: parse(parts[1])?,
        test: parse(parts[2])?,
    };
    ratios.normalized().map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_ratio_arg_parses_valid_triples() {
        let ratios = parse_split_ratios_arg("0.7, 0.2, 0.1").expect("parse");
        assert!((ratios.train - 0.7).abs() < 1e-9);
        assert!((ratios.validation - 0.2).abs() < 1e-9);
        assert!((ratios.test - 0.1).abs() < 1e-9);
    }

    #[test]
    fn split_ratio_arg_rejects_bad_input() {
        assert!(parse_split_ratios_arg("0.8,0.2").is_err());
        assert!(parse_split_ratios_arg("a,b,c").is_err());
        assert!(parse_split_ratios_arg("0.5,0.4,0.3").is_err());
    }
}
