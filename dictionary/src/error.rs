//! Error type for dictionary assembly.

use std::io;
use std::path::PathBuf;

use kindle_corpus::CorpusError;

/// Result type defaulting to [`DictionaryError`].
pub type Result<T, E = DictionaryError> = std::result::Result<T, E>;

/// Errors raised while configuring or assembling the dictionary.
#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    /// The corpus or translated corpus could not be loaded.
    #[error(transparent)]
    Corpus(#[from] CorpusError),

    /// The configuration file could not be read.
    #[error("cannot read config {}: {source}", .path.display())]
    ConfigRead {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::DictionaryConfig`].
    #[error("invalid config {}: {source}", .path.display())]
    Config {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// A configuration value is out of range.
    #[error("invalid config value for `{key}`: {reason}")]
    ConfigValue {
        /// Configuration key.
        key: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// No collation table exists for the requested locale.
    #[error("unsupported collation locale `{0}`")]
    UnsupportedLocale(String),

    /// The generation lexicon could not be read.
    #[error("cannot read lexicon {}: {source}", .path.display())]
    Lexicon {
        /// Path of the lexicon file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The morphological generator failed for one word.
    #[error("generator failed for `{word}`: {reason}")]
    Generator {
        /// Word passed to the generator.
        word: String,
        /// Failure description.
        reason: String,
    },

    /// A lemma was given a dictionary id twice.
    #[error("lemma `{headword}` already has a dictionary id")]
    IdAlreadyAssigned {
        /// Headword of the lemma.
        headword: String,
    },
}
