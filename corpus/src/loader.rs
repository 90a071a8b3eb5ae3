//! Reads the line-delimited corpus.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CorpusError, Result};
use crate::model::CorpusRecord;

/// Loads every record of the corpus file at `path`.
///
/// # Errors
///
/// Returns [`CorpusError::Open`] if the file cannot be opened, and any error
/// of [`read_corpus`] for its contents.
pub fn load_corpus(path: &Path) -> Result<Vec<CorpusRecord>> {
    let file = File::open(path).map_err(|source| CorpusError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let records = read_corpus(BufReader::new(file))?;
    info!(path = %path.display(), records = records.len(), "corpus loaded");
    Ok(records)
}

/// Parses newline-delimited JSON records from `reader`. Blank lines are
/// skipped.
///
/// # Errors
///
/// Returns the first read, JSON, or missing-field error encountered; no
/// records are returned in that case.
pub fn read_corpus<R: BufRead>(reader: R) -> Result<Vec<CorpusRecord>> {
    let mut records = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| CorpusError::Read { line: line_no, source })?;
        if line.trim().is_empty() {
            debug!(line = line_no, "skipping blank corpus line");
            continue;
        }
        let value = serde_json::from_str(&line).map_err(|source| CorpusError::Json {
            line: line_no,
            source,
        })?;
        records.push(CorpusRecord::from_value(value, line_no)?);
    }
    Ok(records)
}
