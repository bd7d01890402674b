use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use cribcheck::config::Config;
use cribcheck::corpus::loader::load_corpus;
use cribcheck::corpus::Corpus;
use cribcheck::eval;
use cribcheck::features::containment::containment_for;
use cribcheck::features::lcs::lcs_for;
use cribcheck::features::table::{
    build_features, correlation_matrix, select_training_arrays, LCS_COLUMN,
};
use cribcheck::manifest::RunManifest;
use cribcheck::output::csv::{read_labeled_csv, read_prediction_labels, write_labeled_csv};
use cribcheck::output::terminal;
use cribcheck::split::assign_partitions;

/// Cribcheck: similarity feature engineering for plagiarism classification.
///
/// Turns a catalog of answer and source documents into labeled train/test
/// feature matrices for an external classifier.
#[derive(Parser)]
#[command(name = "cribcheck", version, about)]
struct Cli {
    /// Catalog CSV (File,Task,Category)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory holding the raw documents
    #[arg(long, global = true)]
    corpus_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build features and write train.csv, test.csv, and manifest.json
    Prepare {
        /// Override the sampling seed
        #[arg(long)]
        seed: Option<u64>,

        /// Comma-separated feature columns to keep (e.g. c_1,c_5,lcs_word)
        #[arg(long, value_delimiter = ',')]
        features: Option<Vec<String>>,

        /// Output directory for the CSVs and manifest
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },

    /// Score a single answer file against its task's source
    Score {
        /// Catalog file name of the answer (e.g. g0pB_taskd.txt)
        file: String,
    },

    /// Show the train/test/orig partition breakdown
    Split {
        /// Override the sampling seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Summarize feature columns and their correlations
    Inspect,

    /// Compare external predictions against held-out test labels
    Evaluate {
        /// CSV with one predicted label per row
        predictions: PathBuf,

        /// Ground-truth CSV (defaults to <out dir>/test.csv)
        #[arg(long)]
        test_csv: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("cribcheck=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(catalog) = cli.catalog {
        config.catalog = catalog;
    }
    if let Some(corpus_dir) = cli.corpus_dir {
        config.corpus_dir = corpus_dir;
    }

    match cli.command {
        Commands::Prepare {
            seed,
            features,
            out_dir,
        } => {
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(features) = features {
                config.selected_features = features;
            }
            if let Some(out_dir) = out_dir {
                config.out_dir = out_dir;
            }
            prepare(&config)
        }

        Commands::Score { file } => score(&config, &file),

        Commands::Split { seed } => {
            if let Some(seed) = seed {
                config.seed = seed;
            }
            show_split(&config)
        }

        Commands::Inspect => inspect(&config),

        Commands::Evaluate {
            predictions,
            test_csv,
        } => {
            let test_csv = test_csv.unwrap_or_else(|| config.out_dir.join("test.csv"));
            evaluate_predictions(&predictions, &test_csv)
        }
    }
}

fn load(config: &Config) -> Result<Corpus> {
    config.require_corpus()?;
    load_corpus(&config.catalog, &config.corpus_dir)
        .with_context(|| format!("loading corpus from {}", config.catalog.display()))
}

/// Full pipeline: load, split, score, select, materialize.
fn prepare(config: &Config) -> Result<()> {
    config.require_features()?;
    let corpus = load(config)?;

    println!("Assigning train/test partitions (seed {})...", config.seed);
    let split = assign_partitions(&corpus, &config.split_config());

    println!(
        "Building similarity features for {} records...",
        corpus.len()
    );
    let table = build_features(&corpus, config.ngram_range())?;

    let (train, test) =
        select_training_arrays(&corpus, &split, &table, &config.selected_features)?;

    let train_path = config.out_dir.join("train.csv");
    let test_path = config.out_dir.join("test.csv");
    write_labeled_csv(&train, &train_path)?;
    write_labeled_csv(&test, &test_path)?;

    let manifest = RunManifest::new(
        config.seed,
        (config.ngram_min, config.ngram_max),
        table.columns().to_vec(),
        config.selected_features.clone(),
        train.len(),
        test.len(),
    );
    let manifest_path = config.out_dir.join("manifest.json");
    manifest.write(&manifest_path)?;

    info!(train = train.len(), test = test.len(), "arrays written");
    println!();
    println!(
        "  {} {} rows -> {}",
        "train".bright_green(),
        train.len(),
        train_path.display()
    );
    println!(
        "  {} {} rows -> {}",
        "test".bright_yellow(),
        test.len(),
        test_path.display()
    );
    println!("  manifest -> {}", manifest_path.display());
    Ok(())
}

fn score(config: &Config, file: &str) -> Result<()> {
    config.require_features()?;
    let corpus = load(config)?;

    let record = corpus.get(file)?;
    if record.is_source() {
        anyhow::bail!("'{file}' is a source text; sources are never scored against themselves");
    }

    let mut scores = Vec::new();
    for n in config.ngram_range() {
        scores.push((format!("c_{n}"), containment_for(&corpus, n, file)?));
    }
    scores.push((LCS_COLUMN.to_string(), lcs_for(&corpus, file)?));

    terminal::display_score_detail(record, &scores);
    Ok(())
}

fn show_split(config: &Config) -> Result<()> {
    let corpus = load(config)?;
    let split = assign_partitions(&corpus, &config.split_config());
    terminal::display_split_summary(&corpus, &split);
    Ok(())
}

fn inspect(config: &Config) -> Result<()> {
    config.require_features()?;
    let corpus = load(config)?;
    let table = build_features(&corpus, config.ngram_range())?;
    let correlation = correlation_matrix(&table, &corpus)?;
    terminal::display_feature_summary(&table, &corpus, &correlation);
    Ok(())
}

fn evaluate_predictions(predictions: &Path, test_csv: &Path) -> Result<()> {
    let truth = read_labeled_csv(test_csv)
        .with_context(|| format!("reading ground truth from {}", test_csv.display()))?;
    let predicted = read_prediction_labels(predictions)
        .with_context(|| format!("reading predictions from {}", predictions.display()))?;

    let report = eval::evaluate(&truth.labels, &predicted)?;
    terminal::display_evaluation(&report);
    Ok(())
}
