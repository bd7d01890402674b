// Feature table assembly: every similarity column across the whole corpus.
//
// Rows are built in corpus order and carry the record's file id. The file
// id, not row position, is the join key when train/test arrays are
// assembled, so reordering a table cannot silently misalign labels.
//
// Source rows hold the sentinel in every column: a source is never
// scored against itself.

use std::ops::RangeInclusive;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::containment::containment_for;
use super::lcs::lcs_for;
use crate::corpus::record::Partition;
use crate::corpus::Corpus;
use crate::error::PipelineError;
use crate::split::SplitAssignment;

/// Feature value recorded for source rows instead of a similarity score.
pub const SOURCE_SENTINEL: f64 = -1.0;

/// Name of the normalized LCS column.
pub const LCS_COLUMN: &str = "lcs_word";

/// One record's feature values, keyed by file id.
#[derive(Debug, Clone)]
pub struct FeatureRow {
    pub file: String,
    /// Values aligned with the table's column names.
    pub values: Vec<f64>,
}

/// The complete similarity feature matrix for a corpus.
#[derive(Debug, Clone)]
pub struct FeatureTable {
    columns: Vec<String>,
    rows: Vec<FeatureRow>,
}

impl FeatureTable {
    /// Column names: `c_1`..`c_k` for containment, then `lcs_word`.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in corpus order.
    pub fn rows(&self) -> &[FeatureRow] {
        &self.rows
    }

    /// Index of a named column.
    pub fn column_index(&self, name: &str) -> Result<usize, PipelineError> {
        self.columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| PipelineError::UnknownFeature(name.to_string()))
    }
}

/// Build the full feature table: one containment column per n-gram size
/// in `ngram_range`, plus the normalized LCS column.
///
/// Fails fast on the first scoring error; a partial table is never
/// returned.
pub fn build_features(
    corpus: &Corpus,
    ngram_range: RangeInclusive<usize>,
) -> Result<FeatureTable, PipelineError> {
    let mut columns: Vec<String> = ngram_range.clone().map(|n| format!("c_{n}")).collect();
    columns.push(LCS_COLUMN.to_string());

    let pb = ProgressBar::new(corpus.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("  Features [{bar:30}] {pos}/{len} ({eta})")
            .unwrap(),
    );

    let mut rows = Vec::with_capacity(corpus.len());
    for record in corpus.records() {
        let mut values = Vec::with_capacity(columns.len());
        if record.is_source() {
            values.resize(columns.len(), SOURCE_SENTINEL);
        } else {
            for n in ngram_range.clone() {
                values.push(containment_for(corpus, n, &record.file)?);
            }
            values.push(lcs_for(corpus, &record.file)?);
        }
        rows.push(FeatureRow {
            file: record.file.clone(),
            values,
        });
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!(
        columns = columns.len(),
        rows = rows.len(),
        "feature table built"
    );
    Ok(FeatureTable { columns, rows })
}

/// Feature matrix plus aligned class labels for one partition.
#[derive(Debug, Clone, Default)]
pub struct LabeledMatrix {
    pub features: Vec<Vec<f64>>,
    pub labels: Vec<i8>,
}

impl LabeledMatrix {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Slice the feature table into train and test arrays.
///
/// Each row is joined to its class label and partition through the file
/// id it carries. Source rows feed neither array. Returns (train, test).
pub fn select_training_arrays(
    corpus: &Corpus,
    split: &SplitAssignment,
    table: &FeatureTable,
    selected: &[String],
) -> Result<(LabeledMatrix, LabeledMatrix), PipelineError> {
    let indices: Vec<usize> = selected
        .iter()
        .map(|name| table.column_index(name))
        .collect::<Result<_, _>>()?;

    let mut train = LabeledMatrix::default();
    let mut test = LabeledMatrix::default();

    for row in table.rows() {
        let record = corpus.get(&row.file)?;
        let target = match split.partition(&row.file) {
            Some(Partition::Train) => &mut train,
            Some(Partition::Test) => &mut test,
            _ => continue,
        };
        target
            .features
            .push(indices.iter().map(|&i| row.values[i]).collect());
        target.labels.push(record.class());
    }

    Ok((train, test))
}

/// Absolute Pearson correlation between every pair of feature columns,
/// computed over non-source rows only.
///
/// Source rows all hold the sentinel and would fake a perfect correlation
/// between every pair, so they are excluded.
pub fn correlation_matrix(
    table: &FeatureTable,
    corpus: &Corpus,
) -> Result<Vec<Vec<f64>>, PipelineError> {
    let width = table.columns().len();
    let mut column_values: Vec<Vec<f64>> = vec![Vec::new(); width];

    for row in table.rows() {
        if corpus.get(&row.file)?.is_source() {
            continue;
        }
        for (column, &value) in column_values.iter_mut().zip(&row.values) {
            column.push(value);
        }
    }

    let mut matrix = vec![vec![0.0; width]; width];
    for i in 0..width {
        matrix[i][i] = 1.0;
        for j in (i + 1)..width {
            let r = pearson(&column_values[i], &column_values[j]).abs();
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }
    Ok(matrix)
}

/// Pearson correlation coefficient; 0.0 when either side has no variance.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || a.len() != b.len() {
        return 0.0;
    }
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        cov += (x - mean_a) * (y - mean_b);
        var_a += (x - mean_a).powi(2);
        var_b += (y - mean_b).powi(2);
    }

    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}
