//! Supplementary corpus of machine-translated lemmas.
//!
//! The file is a single JSON array of `{entry, abbr_pos, translation}`
//! objects. Filtering against the main corpus happens in the dictionary
//! crate; this module only reads the file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{CorpusError, Result};

/// One machine-translated lemma.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedEntry {
    /// Polish headword.
    pub entry: String,
    /// Abbreviated part of speech, used as the morphological category.
    pub abbr_pos: String,
    /// English translation, used as the only gloss.
    pub translation: String,
}

/// Loads the translated corpus at `path`.
///
/// # Errors
///
/// Returns [`CorpusError::Open`] if the file cannot be read and
/// [`CorpusError::TranslatedCorpus`] if it is not a JSON array of entries.
pub fn load_translated(path: &Path) -> Result<Vec<TranslatedEntry>> {
    let text = fs::read_to_string(path).map_err(|source| CorpusError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let entries: Vec<TranslatedEntry> =
        serde_json::from_str(&text).map_err(|source| CorpusError::TranslatedCorpus {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), entries = entries.len(), "translated corpus loaded");
    Ok(entries)
}
