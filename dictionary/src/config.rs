//! Build configuration.
//!
//! Values come from an optional TOML file; the `pl-kindle-dict` binary then
//! overrides individual keys from its command line.
//!
//! ```toml
//! corpus = "kaikki.org-dictionary-Polish.json"
//! lexicon = "sgjp-20240128.tab"
//! out_dir = "build"
//! chunk_size = 10000
//! stats = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{DictionaryError, Result};

/// Default corpus file name, as published by kaikki.org.
pub const DEFAULT_CORPUS: &str = "kaikki.org-dictionary-Polish.json";
/// Default lemmas per markup document.
pub const DEFAULT_CHUNK_SIZE: usize = 10_000;

/// Everything the assembler needs to know besides the corpus contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DictionaryConfig {
    /// Line-delimited JSON corpus.
    pub corpus: PathBuf,
    /// Optional machine-translated supplementary corpus.
    pub translated_corpus: Option<PathBuf>,
    /// Optional SGJP generation table; without it no inflections are emitted.
    pub lexicon: Option<PathBuf>,
    /// Output directory for markup, package, and stats files.
    pub out_dir: PathBuf,
    /// File stem shared by the markup chunks and the OPF package.
    pub output_stem: String,
    /// Lemmas per markup document.
    pub chunk_size: usize,
    /// Collation locale name.
    pub locale: String,
    /// Book title written to the OPF package.
    pub title: String,
    /// Language of the headwords.
    pub in_language: String,
    /// Language of the definitions.
    pub out_language: String,
    /// Write the stats and discarded-entries documents.
    pub stats: bool,
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            corpus: PathBuf::from(DEFAULT_CORPUS),
            translated_corpus: None,
            lexicon: None,
            out_dir: PathBuf::from("build"),
            output_stem: "PL_EN_dict".to_string(),
            chunk_size: DEFAULT_CHUNK_SIZE,
            locale: "pl".to_string(),
            title: "Polish-English Dictionary".to_string(),
            in_language: "pl".to_string(),
            out_language: "en".to_string(),
            stats: false,
        }
    }
}

impl DictionaryConfig {
    /// Reads a TOML configuration file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::ConfigRead`] if the file cannot be read,
    /// [`DictionaryError::Config`] if it does not parse, and
    /// [`DictionaryError::ConfigValue`] if a value is out of range.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| DictionaryError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = toml::from_str(&text).map_err(|source| DictionaryError::Config {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::ConfigValue`] for a zero chunk size or an
    /// output stem that is empty or contains a path separator.
    pub fn validate(&self) -> Result<()> {
        if self.chunk_size == 0 {
            return Err(DictionaryError::ConfigValue {
                key: "chunk_size",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.output_stem.is_empty() || self.output_stem.contains(['/', '\\']) {
            return Err(DictionaryError::ConfigValue {
                key: "output_stem",
                reason: format!("`{}` is not a plain file stem", self.output_stem),
            });
        }
        Ok(())
    }

    /// Name of the markup document holding chunk `index` (0-based).
    pub fn chunk_file_name(&self, index: usize) -> String {
        format!("{}_{}.html", self.output_stem, index + 1)
    }

    /// Lemmas per markup document, never less than one, even for a config
    /// that skipped [`DictionaryConfig::validate`].
    pub fn chunk_len(&self) -> usize {
        self.chunk_size.max(1)
    }

    /// Name of the markup document holding the lemma at 1-based `position`.
    pub fn chunk_file_for_position(&self, position: usize) -> String {
        self.chunk_file_name(position.saturating_sub(1) / self.chunk_len())
    }

    /// Name of the OPF package document.
    pub fn opf_file_name(&self) -> String {
        format!("{}.opf", self.output_stem)
    }
}
