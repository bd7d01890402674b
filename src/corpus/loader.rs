// Catalog loading: file_information.csv plus the documents it lists.
//
// The catalog is the single input contract: a header row of
// File,Task,Category followed by one row per document. Row order in the
// catalog becomes corpus row order.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use super::normalize::normalize;
use super::record::{Category, Record};
use super::Corpus;
use crate::error::PipelineError;

/// One row of the catalog CSV, as written on disk.
#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "Task")]
    task: String,
    #[serde(rename = "Category")]
    category: String,
}

/// Read the catalog and every document it references, producing a
/// validated corpus.
///
/// Documents are read as bytes and decoded lossily; stray non-UTF-8
/// bytes become replacement characters and are stripped by `normalize`
/// along with the rest of the punctuation.
pub fn load_corpus(catalog: &Path, corpus_dir: &Path) -> Result<Corpus, PipelineError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(catalog)?;

    let mut records = Vec::new();
    for row in reader.deserialize() {
        let row: CatalogRow = row?;
        let category = Category::parse(&row.category)?;

        let path = corpus_dir.join(&row.file);
        let raw = fs::read(&path).map_err(|source| PipelineError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let text = normalize(&String::from_utf8_lossy(&raw));

        records.push(Record {
            file: row.file,
            task: row.task,
            category,
            text,
        });
    }

    info!(records = records.len(), "catalog loaded");
    Corpus::new(records)
}
