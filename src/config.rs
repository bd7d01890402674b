// Central configuration for a pipeline run.
//
// Values come from environment variables with working defaults for the
// standard corpus layout; the .env file is loaded at startup via dotenvy
// and CLI flags override after load.

use std::env;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use anyhow::Result;

use crate::split::SplitConfig;

/// Everything a prepare run needs to know.
pub struct Config {
    /// Catalog CSV listing File,Task,Category per document.
    pub catalog: PathBuf,
    /// Directory holding the raw answer and source documents.
    pub corpus_dir: PathBuf,
    /// Where train.csv, test.csv, and manifest.json land.
    pub out_dir: PathBuf,
    /// Seed shared by both stratified sampling phases.
    pub seed: u64,
    /// Inclusive n-gram range for the containment columns.
    pub ngram_min: usize,
    pub ngram_max: usize,
    /// Feature columns written to the train/test CSVs.
    pub selected_features: Vec<String>,
    /// Test records drawn per (task, category) group of plagiarized answers.
    pub plagiarized_test_per_group: usize,
    /// Test records drawn per (task, category) group of clean answers.
    pub clean_test_per_group: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let seed = match env::var("CRIBCHECK_SEED") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| anyhow::anyhow!("CRIBCHECK_SEED must be an integer, got '{raw}'"))?,
            Err(_) => 1,
        };

        let selected_features = match env::var("CRIBCHECK_FEATURES") {
            Ok(raw) => raw.split(',').map(|s| s.trim().to_string()).collect(),
            Err(_) => vec![
                "c_1".to_string(),
                "c_5".to_string(),
                "lcs_word".to_string(),
            ],
        };

        Ok(Self {
            catalog: env::var("CRIBCHECK_CATALOG")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data/file_information.csv")),
            corpus_dir: env::var("CRIBCHECK_CORPUS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            out_dir: env::var("CRIBCHECK_OUT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("models")),
            seed,
            ngram_min: 1,
            ngram_max: 6,
            selected_features,
            plagiarized_test_per_group: 1,
            clean_test_per_group: 2,
        })
    }

    /// Check that the catalog and corpus directory exist.
    /// Call this before any operation that reads documents.
    pub fn require_corpus(&self) -> Result<()> {
        if !self.catalog.is_file() {
            anyhow::bail!(
                "catalog not found at {}.\n\
                 Set CRIBCHECK_CATALOG or pass --catalog.",
                self.catalog.display()
            );
        }
        if !self.corpus_dir.is_dir() {
            anyhow::bail!(
                "corpus directory not found at {}.\n\
                 Set CRIBCHECK_CORPUS_DIR or pass --corpus-dir.",
                self.corpus_dir.display()
            );
        }
        Ok(())
    }

    /// Check the n-gram range and selected features are usable.
    pub fn require_features(&self) -> Result<()> {
        if self.ngram_min == 0 {
            anyhow::bail!("n-gram sizes start at 1");
        }
        if self.ngram_min > self.ngram_max {
            anyhow::bail!("empty n-gram range {}..={}", self.ngram_min, self.ngram_max);
        }
        if self.selected_features.is_empty() {
            anyhow::bail!("no feature columns selected");
        }
        Ok(())
    }

    pub fn ngram_range(&self) -> RangeInclusive<usize> {
        self.ngram_min..=self.ngram_max
    }

    pub fn split_config(&self) -> SplitConfig {
        SplitConfig {
            seed: self.seed,
            plagiarized_test_per_group: self.plagiarized_test_per_group,
            clean_test_per_group: self.clean_test_per_group,
        }
    }
}
