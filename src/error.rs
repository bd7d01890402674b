// Error taxonomy for the feature pipeline.
//
// Scoring is pure and deterministic, so nothing here is retryable. Any
// scoring error aborts the batch: downstream training needs a complete
// rectangular feature matrix, and a partial table is worse than no table.

use std::io;

use thiserror::Error;

/// Everything that can go wrong between the catalog CSV and the final
/// labeled matrices.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Catalog row carried a category label outside the fixed set.
    #[error("unknown category label '{0}' (expected non, heavy, light, cut, or orig)")]
    UnknownCategory(String),

    /// A task has no source record to compare answers against.
    #[error("task '{0}' has no source record")]
    MissingSource(String),

    /// A task has more than one source record.
    #[error("task '{task}' has {count} source records, expected exactly one")]
    DuplicateSource { task: String, count: usize },

    /// Two catalog rows share a file id. The file id is the join key for
    /// labels, partitions, and feature rows, so it must be unique.
    #[error("file '{0}' appears more than once in the catalog")]
    DuplicateFile(String),

    /// Lookup by file id failed.
    #[error("no record for file '{0}'")]
    UnknownFile(String),

    /// A selected feature name does not exist in the feature table.
    #[error("unknown feature column '{0}'")]
    UnknownFeature(String),

    /// Answer text too short to score (fewer than n tokens for containment,
    /// empty for LCS). Raised instead of silently producing NaN.
    #[error("text too short to score: {detail}")]
    DegenerateText { detail: String },

    /// A document listed in the catalog could not be read.
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    /// A labeled CSV row could not be parsed back into numbers.
    #[error("malformed labeled csv '{path}': {detail}")]
    MalformedCsv { path: String, detail: String },

    /// Predicted labels do not line up one-to-one with the ground truth rows.
    #[error("prediction count {predicted} does not match ground truth count {expected}")]
    PredictionShape { expected: usize, predicted: usize },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Attach the offending file id to a degenerate-text error raised by
    /// one of the low-level scorers. Other variants pass through untouched.
    pub(crate) fn for_file(self, file: &str) -> Self {
        match self {
            PipelineError::DegenerateText { detail } => PipelineError::DegenerateText {
                detail: format!("{file}: {detail}"),
            },
            other => other,
        }
    }
}
