//! Merges the machine-translated supplementary corpus into the accepted
//! lemmas. Runs before sorting so the merged lemmas get ids like any other.

use std::collections::HashSet;

use kindle_corpus::TranslatedEntry;
use tracing::{debug, info};

use crate::lemma::Lemma;

/// Appends one lemma per usable translated entry to `lemmas` and returns how
/// many were added.
///
/// An entry is skipped if its headword is already present, if its
/// translation is empty or only repeats the headword (ignoring case), or if
/// an earlier entry in `entries` had the same headword.
pub fn merge_translated(lemmas: &mut Vec<Lemma>, entries: Vec<TranslatedEntry>) -> usize {
    let mut known: HashSet<String> = lemmas.iter().map(|l| l.headword().to_string()).collect();
    let before = lemmas.len();
    let offered = entries.len();

    for entry in entries {
        let translation = entry.translation.trim();
        if translation.is_empty() || translation.to_lowercase() == entry.entry.to_lowercase() {
            debug!(entry = %entry.entry, "translation adds nothing, skipped");
            continue;
        }
        if !known.insert(entry.entry.clone()) {
            debug!(entry = %entry.entry, "headword already present, skipped");
            continue;
        }
        lemmas.push(Lemma::from_translation(entry));
    }

    let added = lemmas.len() - before;
    info!(offered, added, "translated lemmas merged");
    added
}
