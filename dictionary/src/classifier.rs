//! Decides which corpus records become headwords.
//!
//! Rules, first match wins:
//!
//! 1. the category is in [`IGNORED_CATEGORIES`] → [`DiscardBucket::InvalidCategory`];
//! 2. the lemma has no definitions → [`DiscardBucket::EmptyDefinitions`];
//! 3. every definition is an inflected form → [`DiscardBucket::OnlyDerived`];
//! 4. otherwise the lemma is accepted.
//!
//! Rejected records are kept verbatim for the discarded-entries report.

use std::collections::BTreeMap;

use kindle_corpus::CorpusRecord;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::lemma::Lemma;

/// Wiktionary categories that never become headwords.
pub const IGNORED_CATEGORIES: &[&str] = &[
    "name",
    "character",
    "punct",
    "abbrev",
    "det",
    "infix",
    "particle",
    "phrase",
    "prefix",
    "prep_phrase",
    "suffix",
];

/// Why a record was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiscardBucket {
    /// Category in the ignore set.
    InvalidCategory,
    /// No sense with a gloss.
    EmptyDefinitions,
    /// Every glossed sense is an inflected form of another word.
    OnlyDerived,
}

impl DiscardBucket {
    /// Every bucket, in rule order.
    pub const ALL: [DiscardBucket; 3] = [
        DiscardBucket::InvalidCategory,
        DiscardBucket::EmptyDefinitions,
        DiscardBucket::OnlyDerived,
    ];

    /// Name used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DiscardBucket::InvalidCategory => "invalid_category",
            DiscardBucket::EmptyDefinitions => "empty_definitions",
            DiscardBucket::OnlyDerived => "only_derived",
        }
    }
}

/// Outcome of classifying one record.
#[derive(Debug)]
pub enum Classification {
    /// The record becomes a headword.
    Accepted(Lemma),
    /// The record is discarded; the raw JSON is returned for reporting.
    Rejected(DiscardBucket, Value),
}

/// Classifies one corpus record.
pub fn classify(record: CorpusRecord) -> Classification {
    if IGNORED_CATEGORIES.contains(&record.morph_category.as_str()) {
        return Classification::Rejected(DiscardBucket::InvalidCategory, record.raw);
    }

    let lemma = Lemma::from_record(record);
    if lemma.definitions().is_empty() {
        Classification::Rejected(DiscardBucket::EmptyDefinitions, lemma.into_raw())
    } else if lemma.is_only_derived_form() {
        Classification::Rejected(DiscardBucket::OnlyDerived, lemma.into_raw())
    } else {
        Classification::Accepted(lemma)
    }
}

/// Rejected records grouped by bucket.
#[derive(Debug, Default, Clone)]
pub struct DiscardedEntries {
    buckets: BTreeMap<DiscardBucket, Vec<Value>>,
}

impl DiscardedEntries {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Files a rejected record under `bucket`.
    pub fn record(&mut self, bucket: DiscardBucket, raw: Value) {
        self.buckets.entry(bucket).or_default().push(raw);
    }

    /// Records in `bucket`, in corpus order.
    pub fn entries(&self, bucket: DiscardBucket) -> &[Value] {
        self.buckets.get(&bucket).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of records in `bucket`.
    pub fn count(&self, bucket: DiscardBucket) -> usize {
        self.entries(bucket).len()
    }

    /// Number of rejected records overall.
    pub fn total(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }

    /// Per-bucket counts keyed `<bucket>_count`, every bucket present.
    pub fn counts(&self) -> BTreeMap<String, usize> {
        DiscardBucket::ALL
            .iter()
            .map(|&bucket| (format!("{}_count", bucket.as_str()), self.count(bucket)))
            .collect()
    }

    /// The full report: each bucket's records plus its `<bucket>_count`.
    pub fn to_json(&self) -> Value {
        let mut report = Map::new();
        for bucket in DiscardBucket::ALL {
            report.insert(
                bucket.as_str().to_string(),
                Value::Array(self.entries(bucket).to_vec()),
            );
        }
        for (key, count) in self.counts() {
            report.insert(key, Value::from(count));
        }
        Value::Object(report)
    }
}

/// Classifies every record, returning accepted lemmas in corpus order and
/// the discarded records.
pub fn extract_head_words(records: Vec<CorpusRecord>) -> (Vec<Lemma>, DiscardedEntries) {
    let mut lemmas = Vec::with_capacity(records.len());
    let mut discarded = DiscardedEntries::new();

    for record in records {
        match classify(record) {
            Classification::Accepted(lemma) => lemmas.push(lemma),
            Classification::Rejected(bucket, raw) => {
                debug!(bucket = bucket.as_str(), word = ?raw.get("word"), "record discarded");
                discarded.record(bucket, raw);
            }
        }
    }

    info!(
        accepted = lemmas.len(),
        invalid_category = discarded.count(DiscardBucket::InvalidCategory),
        empty_definitions = discarded.count(DiscardBucket::EmptyDefinitions),
        only_derived = discarded.count(DiscardBucket::OnlyDerived),
        "head words extracted"
    );
    (lemmas, discarded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> CorpusRecord {
        CorpusRecord::from_value(value, 1).unwrap()
    }

    fn full_noun() -> Value {
        json!({
            "pos": "noun",
            "word": "pies",
            "forms": [{"form": "piesek", "tags": ["diminutive"]}],
            "senses": [
                {"tags": ["animate", "masculine"], "glosses": ["A dog (Canis lupus familiaris)."]},
                {"tags": ["animate", "masculine"], "glosses": ["A male dog."]}
            ]
        })
    }

    fn derived_noun() -> Value {
        json!({
            "pos": "noun",
            "word": "psa",
            "senses": [{
                "tags": ["accusative", "form-of", "genitive"],
                "glosses": ["accusative/genitive singular of pies"],
                "form_of": ["pies"]
            }]
        })
    }

    fn invalid_category() -> Value {
        json!({
            "pos": "character",
            "word": "A",
            "senses": [{"glosses": ["The first letter of the Polish alphabet."]}]
        })
    }

    fn bucket_of(value: Value) -> Option<DiscardBucket> {
        match classify(record(value)) {
            Classification::Accepted(_) => None,
            Classification::Rejected(bucket, _) => Some(bucket),
        }
    }

    #[test]
    fn plain_noun_is_accepted() {
        match classify(record(json!({"pos": "noun", "word": "pies", "senses": [{"glosses": ["A dog."]}]}))) {
            Classification::Accepted(lemma) => {
                assert_eq!(lemma.headword(), "pies");
                let definitions = lemma.definitions();
                assert_eq!(definitions.len(), 1);
                assert_eq!(definitions[0].text, "A dog.");
                assert!(!definitions[0].is_derived);
            }
            other => panic!("expected acceptance, got {other:?}"),
        }
    }

    #[test]
    fn inflected_only_record_is_discarded() {
        assert_eq!(bucket_of(derived_noun()), Some(DiscardBucket::OnlyDerived));
    }

    #[test]
    fn every_ignored_category_is_rejected() {
        for category in IGNORED_CATEGORIES {
            let mut value = invalid_category();
            value["pos"] = json!(category);
            assert_eq!(bucket_of(value), Some(DiscardBucket::InvalidCategory), "{category}");
        }
    }

    #[test]
    fn category_rule_takes_precedence() {
        let mut value = derived_noun();
        value["pos"] = json!("det");
        assert_eq!(bucket_of(value), Some(DiscardBucket::InvalidCategory));
    }

    #[test]
    fn glossless_record_goes_to_empty_definitions() {
        let value = json!({"pos": "noun", "word": "abak", "senses": [{"tags": ["masculine"]}]});
        assert_eq!(bucket_of(value), Some(DiscardBucket::EmptyDefinitions));
        let value = json!({"pos": "noun", "word": "abak"});
        assert_eq!(bucket_of(value), Some(DiscardBucket::EmptyDefinitions));
        let value = json!({"pos": "noun", "word": "abak", "senses": [{"glosses": null}]});
        assert_eq!(bucket_of(value), Some(DiscardBucket::EmptyDefinitions));
    }

    #[test]
    fn rejected_records_are_kept_verbatim() {
        let corpus = vec![
            record(full_noun()),
            record(derived_noun()),
            record(invalid_category()),
        ];
        let (lemmas, discarded) = extract_head_words(corpus);

        assert_eq!(lemmas.len(), 1);
        assert_eq!(lemmas[0].headword(), "pies");
        assert_eq!(lemmas[0].morph_category(), "noun");
        assert_eq!(discarded.entries(DiscardBucket::OnlyDerived), [derived_noun()]);
        assert_eq!(discarded.entries(DiscardBucket::InvalidCategory), [invalid_category()]);
        assert_eq!(discarded.count(DiscardBucket::EmptyDefinitions), 0);
        assert_eq!(discarded.total(), 2);
    }

    #[test]
    fn report_lists_every_bucket() {
        let mut discarded = DiscardedEntries::new();
        discarded.record(DiscardBucket::OnlyDerived, derived_noun());
        let report = discarded.to_json();
        assert_eq!(report["only_derived_count"], json!(1));
        assert_eq!(report["invalid_category_count"], json!(0));
        assert_eq!(report["empty_definitions"], json!([]));
        assert_eq!(report["only_derived"][0]["word"], json!("psa"));
    }
}
