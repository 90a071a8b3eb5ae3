//! Property-based tests for record classification and definitions.

use kindle_corpus::CorpusRecord;
use kindle_dictionary::classifier::IGNORED_CATEGORIES;
use kindle_dictionary::{classify, AlphabetCollator, Classification, DiscardBucket, Lemma};
use kindle_dictionary::{FormGenerator, GeneratedForm, InflectionGenerator};
use proptest::prelude::*;
use serde_json::{json, Value};

fn gloss() -> impl Strategy<Value = String> {
    "[a-z ]{1,12}"
}

/// A sense with 0-2 glosses and an optional `form_of` list of 0-2 words.
fn sense() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(gloss(), 0..3),
        prop::option::of(prop::collection::vec("[a-ząęłóśźż]{1,8}", 0..3)),
    )
        .prop_map(|(glosses, form_of)| match form_of {
            Some(targets) => json!({"glosses": glosses, "form_of": targets}),
            None => json!({"glosses": glosses}),
        })
}

/// A sense that is an inflection of another word.
fn derived_sense() -> impl Strategy<Value = Value> {
    (
        prop::collection::vec(gloss(), 1..3),
        prop::collection::vec("[a-z]{1,8}", 1..3),
    )
        .prop_map(|(glosses, targets)| json!({"glosses": glosses, "form_of": targets}))
}

fn glossless_sense() -> impl Strategy<Value = Value> {
    Just(json!({"glosses": []}))
}

fn record(category: &str, senses: Vec<Value>) -> CorpusRecord {
    CorpusRecord::from_value(json!({"pos": category, "word": "słowo", "senses": senses}), 1)
        .unwrap()
}

fn bucket(record: CorpusRecord) -> Option<DiscardBucket> {
    match classify(record) {
        Classification::Accepted(_) => None,
        Classification::Rejected(bucket, _) => Some(bucket),
    }
}

struct Echo;

impl FormGenerator for Echo {
    fn generate(&self, word: &str) -> kindle_dictionary::Result<Vec<GeneratedForm>> {
        Ok(vec![GeneratedForm {
            surface_form: word.to_string(),
            base_form: word.to_string(),
            tags: "subst:sg:nom:m1".to_string(),
            frequency: String::new(),
            qualifiers: Vec::new(),
        }])
    }
}

proptest! {
    /// Ignored categories are rejected as such whatever the senses say.
    #[test]
    fn prop_ignored_category_always_wins(
        category in prop::sample::select(IGNORED_CATEGORIES),
        senses in prop::collection::vec(sense(), 0..4),
    ) {
        prop_assert_eq!(bucket(record(category, senses)), Some(DiscardBucket::InvalidCategory));
    }

    /// A record whose glossed senses are all inflections is only-derived,
    /// however many glossless senses it also has.
    #[test]
    fn prop_all_derived_is_discarded(
        derived in prop::collection::vec(derived_sense(), 1..4),
        empty in prop::collection::vec(glossless_sense(), 0..3),
    ) {
        let senses: Vec<Value> = derived.into_iter().chain(empty).collect();
        prop_assert_eq!(bucket(record("noun", senses)), Some(DiscardBucket::OnlyDerived));
    }

    /// One definition per glossed sense, first gloss, source order.
    #[test]
    fn prop_definitions_skip_glossless_senses(
        senses in prop::collection::vec(sense(), 0..6),
    ) {
        let expected: Vec<String> = senses
            .iter()
            .filter_map(|s| s["glosses"].as_array()?.first()?.as_str().map(str::to_string))
            .collect();
        let lemma = Lemma::from_record(record("noun", senses));
        let texts: Vec<String> = lemma.definitions().into_iter().map(|d| d.text).collect();
        prop_assert_eq!(texts, expected);
    }

    /// Every record resolves to exactly one outcome, and acceptance implies
    /// at least one definition that is not an inflection.
    #[test]
    fn prop_accepted_lemmas_have_an_own_definition(
        senses in prop::collection::vec(sense(), 0..5),
    ) {
        if let Classification::Accepted(lemma) = classify(record("adj", senses)) {
            prop_assert!(lemma.definitions().iter().any(|d| !d.is_derived));
        }
    }

    /// Headwords containing a space never get inflections.
    #[test]
    fn prop_multi_word_headwords_have_no_forms(a in "[a-z]{1,8}", b in "[a-z]{1,8}") {
        let collator = AlphabetCollator::for_locale("pl").unwrap();
        let inflection = InflectionGenerator::new(&Echo, &collator);
        let phrase = format!("{a} {b}");
        prop_assert!(inflection.derived_forms(&phrase).is_empty());
        prop_assert_eq!(inflection.derived_forms(&a).len(), 1);
    }
}
