// Run manifest: the JSON record of what a prepare run produced.
//
// Downstream jobs read the selected feature names and seed from here
// instead of re-deriving them from CLI history. Written next to
// train.csv and test.csv.

use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    /// RFC 3339 timestamp of the prepare run.
    pub created_at: String,
    pub seed: u64,
    /// Inclusive n-gram range used for the containment columns.
    pub ngram_range: (usize, usize),
    /// Every column the feature table held.
    pub feature_columns: Vec<String>,
    /// The columns actually written to train.csv and test.csv.
    pub selected_features: Vec<String>,
    pub train_rows: usize,
    pub test_rows: usize,
}

impl RunManifest {
    pub fn new(
        seed: u64,
        ngram_range: (usize, usize),
        feature_columns: Vec<String>,
        selected_features: Vec<String>,
        train_rows: usize,
        test_rows: usize,
    ) -> Self {
        Self {
            created_at: Utc::now().to_rfc3339(),
            seed,
            ngram_range,
            feature_columns,
            selected_features,
            train_rows,
            test_rows,
        }
    }

    /// Serialize to pretty JSON at `path`.
    pub fn write(&self, path: &Path) -> Result<(), PipelineError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn read(path: &Path) -> Result<Self, PipelineError> {
        Ok(serde_json::from_str(&fs::read_to_string(path)?)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_round_trip() {
        let manifest = RunManifest::new(
            1,
            (1, 6),
            vec!["c_1".to_string(), "lcs_word".to_string()],
            vec!["c_1".to_string()],
            75,
            20,
        );
        let json = serde_json::to_string(&manifest).unwrap();
        let back: RunManifest = serde_json::from_str(&json).unwrap();
        assert_eq!(back.seed, 1);
        assert_eq!(back.ngram_range, (1, 6));
        assert_eq!(back.train_rows, 75);
        assert_eq!(back.selected_features, vec!["c_1".to_string()]);
    }
}
