//! Corpus record types.
//!
//! Only the fields the dictionary builder reads are typed. The full JSON
//! object is kept in [`CorpusRecord::raw`] for discard reporting.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

use crate::error::{CorpusError, Result};

/// Corpus field holding the headword.
pub const HEADWORD_FIELD: &str = "word";
/// Corpus field holding the part-of-speech category.
pub const MORPH_CATEGORY_FIELD: &str = "pos";
const SENSES_FIELD: &str = "senses";
const FORMS_FIELD: &str = "forms";

/// One sense of a corpus entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Meaning {
    /// Definition strings, possibly empty for structurally incomplete senses.
    #[serde(default)]
    pub glosses: Vec<String>,
    /// Base word(s) this sense is an inflected form of.
    #[serde(default, deserialize_with = "form_of_targets")]
    pub form_of: Option<Vec<String>>,
}

impl Meaning {
    /// Creates a plain sense with the given glosses.
    pub fn new<I, S>(glosses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            glosses: glosses.into_iter().map(Into::into).collect(),
            form_of: None,
        }
    }

    /// Creates a sense marking the entry as an inflected form of `base`.
    pub fn inflection_of<S: Into<String>>(gloss: S, base: S) -> Self {
        Self {
            glosses: vec![gloss.into()],
            form_of: Some(vec![base.into()]),
        }
    }

    /// Returns true if the sense names at least one base word.
    pub fn is_inflection(&self) -> bool {
        self.form_of.as_ref().is_some_and(|targets| !targets.is_empty())
    }
}

/// A related-form annotation (`forms[]` in the corpus), such as the
/// perfective partner of an imperfective verb.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FormAnnotation {
    /// The related surface form.
    #[serde(default)]
    pub form: Option<String>,
    /// Labels describing the relation (e.g. `perfective`).
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A single entry of the line-delimited corpus.
#[derive(Debug, Clone, PartialEq)]
pub struct CorpusRecord {
    /// Headword (`word`).
    pub headword: String,
    /// Coarse part-of-speech tag (`pos`).
    pub morph_category: String,
    /// Senses in source order (`senses`).
    pub meanings: Vec<Meaning>,
    /// Related-form annotations (`forms`).
    pub forms: Vec<FormAnnotation>,
    /// The record exactly as read from the corpus.
    pub raw: Value,
}

impl CorpusRecord {
    /// Builds a record from one parsed corpus line.
    ///
    /// `line` is the 1-based line number used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::MissingField`] if `word` or `pos` is absent and
    /// [`CorpusError::InvalidField`] if either is not a string.
    ///
    /// Nothing else is fatal: a sense of the wrong shape is kept as a
    /// glossless sense, and a forms entry of the wrong shape is dropped.
    pub fn from_value(raw: Value, line: usize) -> Result<Self> {
        let headword = required_str(&raw, HEADWORD_FIELD, line)?;
        let morph_category = required_str(&raw, MORPH_CATEGORY_FIELD, line)?;

        let meanings = array_field(&raw, SENSES_FIELD)
            .map(|sense| {
                Meaning::deserialize(sense).unwrap_or_else(|err| {
                    debug!(line, error = %err, "malformed sense kept without glosses");
                    Meaning::default()
                })
            })
            .collect();
        let forms = array_field(&raw, FORMS_FIELD)
            .filter_map(|form| match FormAnnotation::deserialize(form) {
                Ok(form) => Some(form),
                Err(err) => {
                    debug!(line, error = %err, "malformed forms entry dropped");
                    None
                }
            })
            .collect();

        Ok(Self {
            headword,
            morph_category,
            meanings,
            forms,
            raw,
        })
    }
}

/// Elements of an array field; a missing or non-array field has none.
fn array_field<'v>(raw: &'v Value, field: &str) -> impl Iterator<Item = &'v Value> {
    raw.get(field)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
        .iter()
}

fn required_str(raw: &Value, field: &'static str, line: usize) -> Result<String> {
    match raw.get(field) {
        None | Some(Value::Null) => Err(CorpusError::MissingField { line, field }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(CorpusError::InvalidField { line, field }),
    }
}

/// Older extracts list `form_of` targets as strings, newer ones as
/// `{"word": ..}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum FormOfTarget {
    Word(String),
    Object { word: String },
}

fn form_of_targets<'de, D>(deserializer: D) -> std::result::Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let targets: Option<Vec<FormOfTarget>> = Option::deserialize(deserializer)?;
    Ok(targets.map(|targets| {
        targets
            .into_iter()
            .map(|target| match target {
                FormOfTarget::Word(word) | FormOfTarget::Object { word } => word,
            })
            .collect()
    }))
}
