//! The dictionary entry.

use std::cell::OnceCell;
use std::fmt;

use kindle_corpus::{CorpusRecord, FormAnnotation, Meaning, TranslatedEntry};
use serde::Serialize;
use serde_json::Value;

use crate::error::{DictionaryError, Result};
use crate::inflection::{DerivedForm, InflectionGenerator};

/// Corpus category of verbs; only verbs take part in aspect linking.
pub const VERB_CATEGORY: &str = "verb";

/// Attribution carried by lemmas built from the translated corpus.
pub const MACHINE_TRANSLATED_MARKER: &str = "machine translated";

/// One renderable definition, derived from a sense with at least one gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Definition {
    /// First gloss of the sense.
    pub text: String,
    /// Whether the sense is an inflected form of another word.
    pub is_derived: bool,
    /// First base word named by the sense, or empty.
    pub derived_from: String,
}

/// A dictionary entry built from one accepted corpus record or one
/// translated-corpus entry.
#[derive(Debug, Clone)]
pub struct Lemma {
    headword: String,
    morph_category: String,
    meanings: Vec<Meaning>,
    forms: Vec<FormAnnotation>,
    dictionary_id: OnceCell<String>,
    machine_translated: String,
    raw: Option<Value>,
}

impl Lemma {
    /// Creates a lemma with no related forms and no source record.
    pub fn new(
        headword: impl Into<String>,
        morph_category: impl Into<String>,
        meanings: Vec<Meaning>,
    ) -> Self {
        Self {
            headword: headword.into(),
            morph_category: morph_category.into(),
            meanings,
            forms: Vec::new(),
            dictionary_id: OnceCell::new(),
            machine_translated: String::new(),
            raw: None,
        }
    }

    /// Builds the lemma for a corpus record, keeping the record's raw JSON.
    pub fn from_record(record: CorpusRecord) -> Self {
        Self {
            forms: record.forms,
            raw: Some(record.raw),
            ..Self::new(record.headword, record.morph_category, record.meanings)
        }
    }

    /// Builds the lemma for a translated-corpus entry: one sense whose only
    /// gloss is the translation.
    pub fn from_translation(entry: TranslatedEntry) -> Self {
        Self {
            machine_translated: MACHINE_TRANSLATED_MARKER.to_string(),
            ..Self::new(entry.entry, entry.abbr_pos, vec![Meaning::new([entry.translation])])
        }
    }

    /// The dictionary key.
    pub fn headword(&self) -> &str {
        &self.headword
    }

    /// Coarse part-of-speech tag.
    pub fn morph_category(&self) -> &str {
        &self.morph_category
    }

    /// Senses in source order.
    pub fn meanings(&self) -> &[Meaning] {
        &self.meanings
    }

    /// Related-form annotations of the source record.
    pub fn forms(&self) -> &[FormAnnotation] {
        &self.forms
    }

    /// Source record as read from the corpus, if any.
    pub fn raw(&self) -> Option<&Value> {
        self.raw.as_ref()
    }

    /// Consumes the lemma, returning its source record (`null` for
    /// translated lemmas).
    pub fn into_raw(self) -> Value {
        self.raw.unwrap_or(Value::Null)
    }

    /// Attribution marker, empty unless machine translated.
    pub fn machine_translated(&self) -> &str {
        &self.machine_translated
    }

    /// Whether the lemma is a verb.
    pub fn is_verb(&self) -> bool {
        self.morph_category == VERB_CATEGORY
    }

    /// Position in the final sort order, once assigned.
    pub fn dictionary_id(&self) -> Option<&str> {
        self.dictionary_id.get().map(String::as_str)
    }

    /// Records the lemma's 1-based position in the sorted dictionary.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::IdAlreadyAssigned`] on a second call.
    pub fn assign_id(&mut self, position: usize) -> Result<()> {
        self.dictionary_id
            .set(position.to_string())
            .map_err(|_| DictionaryError::IdAlreadyAssigned {
                headword: self.headword.clone(),
            })
    }

    /// One definition per sense with a non-empty gloss list, using the first
    /// gloss. Senses without glosses are skipped.
    pub fn definitions(&self) -> Vec<Definition> {
        self.meanings
            .iter()
            .filter_map(|meaning| {
                let text = meaning.glosses.first()?;
                let derived_from = meaning
                    .form_of
                    .as_ref()
                    .and_then(|targets| targets.first())
                    .cloned()
                    .unwrap_or_default();
                Some(Definition {
                    text: text.clone(),
                    is_derived: meaning.is_inflection(),
                    derived_from,
                })
            })
            .collect()
    }

    /// True iff the lemma has definitions and every one is an inflected
    /// form of another word. An empty definition list is not "only derived".
    pub fn is_only_derived_form(&self) -> bool {
        let definitions = self.definitions();
        !definitions.is_empty() && definitions.iter().all(|definition| definition.is_derived)
    }

    /// Inflected forms of the headword, filtered and sorted.
    pub fn derived_forms(&self, inflection: &InflectionGenerator<'_>) -> Vec<DerivedForm> {
        inflection.derived_forms(&self.headword)
    }
}

impl fmt::Display for Lemma {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {} - {} definition(s)",
            self.headword,
            self.morph_category,
            self.definitions().len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CorpusRecord {
        CorpusRecord::from_value(value, 1).unwrap()
    }

    #[test]
    fn definitions_use_first_gloss_in_source_order() {
        let lemma = Lemma::from_record(record(json!({
            "pos": "noun",
            "word": "pies",
            "senses": [
                {"glosses": ["A dog (Canis lupus familiaris).", "second gloss"]},
                {"glosses": ["A male dog."]},
                {"glosses": ["A male fox or badger."]}
            ]
        })));
        let texts: Vec<_> = lemma.definitions().into_iter().map(|d| d.text).collect();
        assert_eq!(
            texts,
            ["A dog (Canis lupus familiaris).", "A male dog.", "A male fox or badger."]
        );
    }

    #[test]
    fn senses_without_glosses_are_skipped() {
        let lemma = Lemma::new(
            "kot",
            "noun",
            vec![Meaning::new(Vec::<String>::new()), Meaning::new(["cat"]), Meaning::default()],
        );
        assert_eq!(
            lemma.definitions(),
            [Definition {
                text: "cat".into(),
                is_derived: false,
                derived_from: String::new(),
            }]
        );
    }

    #[test]
    fn derived_definition_names_its_base() {
        let lemma = Lemma::from_record(record(json!({
            "pos": "noun",
            "word": "psa",
            "senses": [{"glosses": ["accusative/genitive singular of pies"], "form_of": ["pies"]}]
        })));
        assert_eq!(
            lemma.definitions(),
            [Definition {
                text: "accusative/genitive singular of pies".into(),
                is_derived: true,
                derived_from: "pies".into(),
            }]
        );
        assert!(lemma.is_only_derived_form());
    }

    #[test]
    fn mixed_senses_are_not_only_derived() {
        let lemma = Lemma::new(
            "pac",
            "noun",
            vec![Meaning::inflection_of("genitive plural of paca", "paca"), Meaning::new(["thud"])],
        );
        assert!(!lemma.is_only_derived_form());
    }

    #[test]
    fn empty_definitions_are_not_only_derived() {
        let no_senses = Lemma::new("x", "noun", Vec::new());
        assert!(!no_senses.is_only_derived_form());

        // A glossless inflection sense produces no definition either.
        let glossless = Lemma::new(
            "y",
            "noun",
            vec![Meaning {
                glosses: Vec::new(),
                form_of: Some(vec!["z".into()]),
            }],
        );
        assert!(glossless.definitions().is_empty());
        assert!(!glossless.is_only_derived_form());
    }

    #[test]
    fn id_is_assigned_once() {
        let mut lemma = Lemma::new("pies", "noun", vec![Meaning::new(["A dog."])]);
        assert_eq!(lemma.dictionary_id(), None);
        lemma.assign_id(3).unwrap();
        assert_eq!(lemma.dictionary_id(), Some("3"));
        assert!(matches!(
            lemma.assign_id(4),
            Err(DictionaryError::IdAlreadyAssigned { .. })
        ));
        assert_eq!(lemma.dictionary_id(), Some("3"));
    }

    #[test]
    fn translated_lemma_carries_marker() {
        let lemma = Lemma::from_translation(TranslatedEntry {
            entry: "kot".into(),
            abbr_pos: "noun".into(),
            translation: "cat".into(),
        });
        assert_eq!(lemma.machine_translated(), MACHINE_TRANSLATED_MARKER);
        assert_eq!(lemma.definitions()[0].text, "cat");
        assert_eq!(lemma.into_raw(), Value::Null);
    }
}
