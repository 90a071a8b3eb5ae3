//! Build statistics, written next to the markup when requested.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::classifier::DiscardedEntries;
use crate::lemma::Lemma;

/// Summary of one dictionary build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DictionaryStats {
    /// Headwords in the dictionary.
    pub lemmas_count: usize,
    /// Headwords per first character.
    pub lemmas_per_letter: BTreeMap<String, usize>,
    /// Newlines across all markup documents.
    pub dict_lines: usize,
    /// Bytes across all markup documents.
    pub dict_bytes: usize,
    /// Number of markup documents.
    pub chunk_count: usize,
    /// Rejected records per bucket, keyed `<bucket>_count`.
    pub discarded_entries_counts: BTreeMap<String, usize>,
}

impl DictionaryStats {
    /// Collects statistics over the sorted lemmas and rendered documents.
    pub fn collect(lemmas: &[Lemma], documents: &[String], discarded: &DiscardedEntries) -> Self {
        let mut lemmas_per_letter = BTreeMap::new();
        for first in lemmas.iter().filter_map(|l| l.headword().chars().next()) {
            *lemmas_per_letter.entry(first.to_string()).or_insert(0) += 1;
        }

        Self {
            lemmas_count: lemmas.len(),
            lemmas_per_letter,
            dict_lines: documents.iter().map(|d| d.matches('\n').count()).sum(),
            dict_bytes: documents.iter().map(String::len).sum(),
            chunk_count: documents.len(),
            discarded_entries_counts: discarded.counts(),
        }
    }

    /// File name of the stats document for `revision`.
    pub fn file_name(revision: &str) -> String {
        format!("dictionary_stats_{revision}.json")
    }

    /// File name of the discarded-entries document for `revision`.
    pub fn discarded_file_name(revision: &str) -> String {
        format!("discarded_entries_{revision}.json")
    }
}
