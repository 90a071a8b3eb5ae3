//! Morphological generator capability.
//!
//! The builder never talks to a morphological engine directly: it is handed
//! a [`FormGenerator`] by whoever runs the build. [`SgjpLexicon`] implements
//! the capability over a tab-separated SGJP/Morfeusz dictionary dump, one
//! generated form per line:
//!
//! ```text
//! psa	pies:Sm1	subst:sg:gen.acc:m2	nazwa_pospolita
//! psami	pies:Sm1	subst:pl:inst:m2	nazwa_pospolita
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::{DictionaryError, Result};

/// One candidate produced by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedForm {
    /// Inflected surface form.
    pub surface_form: String,
    /// Lemma the form was generated from, including any homonym suffix.
    pub base_form: String,
    /// Colon-separated morphosyntactic tags.
    pub tags: String,
    /// Frequency/classification column of the generator output.
    pub frequency: String,
    /// Stylistic qualifiers (`daw.`, `pot.`, ...).
    pub qualifiers: Vec<String>,
}

/// Produces every inflected form of a word.
pub trait FormGenerator {
    /// Returns all candidates for `word`, in generator order. Unknown words
    /// yield an empty list.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Generator`] if the generator cannot answer
    /// for this word. Callers treat that as "no forms".
    fn generate(&self, word: &str) -> Result<Vec<GeneratedForm>>;
}

/// Generator backed by an in-memory SGJP table.
#[derive(Debug, Clone, Default)]
pub struct SgjpLexicon {
    forms: HashMap<String, Vec<GeneratedForm>>,
    rejected_lines: usize,
}

impl SgjpLexicon {
    /// Creates an empty lexicon that knows no words.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads the table at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::Lexicon`] if the file cannot be opened or
    /// read.
    pub fn load(path: &Path) -> Result<Self> {
        let lexicon = File::open(path)
            .and_then(|file| Self::from_reader(BufReader::new(file)))
            .map_err(|source| DictionaryError::Lexicon {
                path: path.to_path_buf(),
                source,
            })?;
        info!(
            path = %path.display(),
            lemmas = lexicon.lemma_count(),
            rejected_lines = lexicon.rejected_lines,
            "generation lexicon loaded"
        );
        Ok(lexicon)
    }

    /// Reads a table from `reader`. Blank and `#` lines are skipped; lines
    /// with fewer than three columns are dropped and counted.
    ///
    /// # Errors
    ///
    /// Returns any I/O error raised while reading.
    pub fn from_reader<R: BufRead>(reader: R) -> io::Result<Self> {
        let mut lexicon = Self::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            match parse_line(&line) {
                Some(forms) => forms.into_iter().for_each(|form| lexicon.insert(form)),
                None => {
                    debug!(line = index + 1, "dropping malformed lexicon line");
                    lexicon.rejected_lines += 1;
                }
            }
        }
        Ok(lexicon)
    }

    /// Adds one form, indexed under its lemma without homonym suffix.
    pub fn insert(&mut self, form: GeneratedForm) {
        let key = lookup_key(&form.base_form).to_string();
        self.forms.entry(key).or_default().push(form);
    }

    /// Number of distinct lemmas known.
    pub fn lemma_count(&self) -> usize {
        self.forms.len()
    }

    /// Number of lines dropped while reading.
    pub fn rejected_lines(&self) -> usize {
        self.rejected_lines
    }
}

impl FormGenerator for SgjpLexicon {
    fn generate(&self, word: &str) -> Result<Vec<GeneratedForm>> {
        Ok(self.forms.get(word).cloned().unwrap_or_default())
    }
}

/// `pies:Sm1` → `pies`. A lemma that is itself only punctuation is kept.
fn lookup_key(lemma: &str) -> &str {
    match lemma.split_once(':') {
        Some((word, _)) if !word.is_empty() => word,
        _ => lemma,
    }
}

fn parse_line(line: &str) -> Option<Vec<GeneratedForm>> {
    let mut columns = line.split('\t');
    let surface_form = columns.next().filter(|c| !c.is_empty())?;
    let base_form = columns.next().filter(|c| !c.is_empty())?;
    let tags = columns.next().filter(|c| !c.is_empty())?;
    let frequency = columns.next().unwrap_or_default();
    let qualifiers: Vec<String> = columns
        .next()
        .unwrap_or_default()
        .split('|')
        .filter(|q| !q.is_empty())
        .map(str::to_string)
        .collect();

    Some(
        expand_tags(tags)
            .into_iter()
            .map(|tags| GeneratedForm {
                surface_form: surface_form.to_string(),
                base_form: base_form.to_string(),
                tags,
                frequency: frequency.to_string(),
                qualifiers: qualifiers.clone(),
            })
            .collect(),
    )
}

/// Expands dotted alternatives into one tag string per combination:
/// `subst:pl:nom.voc:m2` → `subst:pl:nom:m2`, `subst:pl:voc:m2`.
pub fn expand_tags(tags: &str) -> Vec<String> {
    tags.split(':').fold(vec![String::new()], |prefixes, segment| {
        let expanded: Vec<String> = prefixes
            .iter()
            .flat_map(|prefix| {
                segment.split('.').map(move |alternative| {
                    if prefix.is_empty() {
                        alternative.to_string()
                    } else {
                        format!("{prefix}:{alternative}")
                    }
                })
            })
            .collect();
        expanded
    })
}
