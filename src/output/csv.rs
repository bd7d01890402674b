// Labeled CSV materialization: the contract with the external trainer.
//
// No header row. Column 0 is the integer class label; the remaining
// columns are feature values with fixed six-decimal precision. These
// files are the only artifacts the remote training collaborator consumes.

use std::fs;
use std::path::Path;

use crate::error::PipelineError;
use crate::features::table::LabeledMatrix;

/// Write one labeled matrix to `path`, creating parent directories as
/// needed.
pub fn write_labeled_csv(matrix: &LabeledMatrix, path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    for (features, label) in matrix.features.iter().zip(&matrix.labels) {
        let mut row = Vec::with_capacity(features.len() + 1);
        row.push(label.to_string());
        row.extend(features.iter().map(|value| format!("{value:.6}")));
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Read a labeled CSV back into memory: labels from column 0, features
/// from the rest. Used by `evaluate` against the ground-truth test file.
pub fn read_labeled_csv(path: &Path) -> Result<LabeledMatrix, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut matrix = LabeledMatrix::default();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let mut fields = row.iter();
        let label = fields
            .next()
            .ok_or_else(|| malformed(path, line, "empty row"))?;
        matrix.labels.push(parse_label(label, path, line)?);
        matrix.features.push(
            fields
                .map(|field| {
                    field
                        .parse::<f64>()
                        .map_err(|_| malformed(path, line, &format!("bad feature '{field}'")))
                })
                .collect::<Result<_, _>>()?,
        );
    }
    Ok(matrix)
}

/// Read a predictions CSV: one predicted label per row, first column.
/// Tolerates float renderings like `1.0` from collaborator runtimes.
pub fn read_prediction_labels(path: &Path) -> Result<Vec<i8>, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    let mut labels = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row?;
        let field = row
            .get(0)
            .ok_or_else(|| malformed(path, line, "empty row"))?;
        labels.push(parse_label(field, path, line)?);
    }
    Ok(labels)
}

fn parse_label(field: &str, path: &Path, line: usize) -> Result<i8, PipelineError> {
    field
        .trim()
        .parse::<f64>()
        .map(|value| value.round() as i8)
        .map_err(|_| malformed(path, line, &format!("bad label '{field}'")))
}

fn malformed(path: &Path, line: usize, detail: &str) -> PipelineError {
    PipelineError::MalformedCsv {
        path: path.display().to_string(),
        detail: format!("row {}: {detail}", line + 1),
    }
}
