//! Fatal input errors.
//!
//! Every variant aborts the run. Record-level problems that are not fatal
//! (wrong category, inflected-only entries) are handled by the classifier in
//! `kindle-dictionary` and never surface here.

use std::io;
use std::path::PathBuf;

/// Result type for corpus loading, defaulting to [`CorpusError`].
pub type Result<T, E = CorpusError> = std::result::Result<T, E>;

/// Errors raised while reading the corpus or the translated corpus.
#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    /// The input file could not be opened or read as a whole.
    #[error("cannot read {}: {source}", .path.display())]
    Open {
        /// Path of the file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Reading a single line failed (e.g. invalid UTF-8).
    #[error("read error at line {line}: {source}")]
    Read {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A line is not valid JSON, or a field has the wrong JSON shape.
    #[error("malformed JSON at line {line}: {source}")]
    Json {
        /// 1-based line number.
        line: usize,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A record lacks one of the fields every entry must carry.
    #[error("record at line {line} is missing required field `{field}`")]
    MissingField {
        /// 1-based line number.
        line: usize,
        /// Name of the corpus field.
        field: &'static str,
    },

    /// A required field is present but is not a string.
    #[error("record at line {line}: field `{field}` must be a string")]
    InvalidField {
        /// 1-based line number.
        line: usize,
        /// Name of the corpus field.
        field: &'static str,
    },

    /// The translated corpus is not a JSON array of entries.
    #[error("malformed translated corpus {}: {source}", .path.display())]
    TranslatedCorpus {
        /// Path of the translated corpus.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
