//! Turns raw generator output into the inflected forms listed under a
//! headword.
//!
//! For a single-word headword the generator's candidates are filtered in
//! generator order:
//!
//! 1. drop candidates tagged as unknown (`ign`) or carrying an ignored tag;
//! 2. drop candidates with a disallowed qualifier;
//! 3. keep only the first surviving candidate per surface form;
//! 4. strip the gender tags `m1`/`m2`/`m3`, which differ between generator
//!    builds;
//!
//! and the result is sorted by surface form in collation order.

use std::collections::HashSet;

use serde::Serialize;
use tracing::warn;

use crate::collation::{sort_by_collation, Collation};
use crate::generator::{FormGenerator, GeneratedForm};

/// Tag the generator uses for words it does not know.
pub const UNKNOWN_WORD_TAG: &str = "ign";

/// Tags marking vocalic/negated/depreciative variants, abbreviations and
/// agglutinates that make poor lookup targets.
pub const IGNORED_TAGS: &[&str] = &[
    "wok", "nwok", "neg", "depr", "pun", "nakc", "aglt", "adja", "brev",
];

/// Qualifiers marking archaic forms and forms written together with a
/// preposition.
pub const BAD_QUALIFIERS: &[&str] = &["daw.", "pisane_łącznie_z_przyimkiem"];

/// Tags removed from every kept form.
pub const VOLATILE_TAGS: &[&str] = &["m1", "m2", "m3"];

/// An inflected form listed under a headword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedForm {
    /// The inflected word.
    pub surface_form: String,
    /// Colon-separated tags, volatile tags removed.
    pub tag_string: String,
}

impl DerivedForm {
    /// Creates a form.
    pub fn new(surface_form: impl Into<String>, tag_string: impl Into<String>) -> Self {
        Self {
            surface_form: surface_form.into(),
            tag_string: tag_string.into(),
        }
    }
}

/// Wraps a generator and a collation into the inflection step.
#[derive(Clone, Copy)]
pub struct InflectionGenerator<'a> {
    generator: &'a dyn FormGenerator,
    collation: &'a dyn Collation,
}

impl<'a> InflectionGenerator<'a> {
    /// Creates the step over the given capabilities.
    pub fn new(generator: &'a dyn FormGenerator, collation: &'a dyn Collation) -> Self {
        Self {
            generator,
            collation,
        }
    }

    /// Returns the filtered, sorted inflected forms of `headword`.
    ///
    /// Multi-word headwords have no forms. A failing generator call is
    /// logged and also yields no forms.
    pub fn derived_forms(&self, headword: &str) -> Vec<DerivedForm> {
        if headword.contains(' ') {
            return Vec::new();
        }

        let candidates = match self.generator.generate(headword) {
            Ok(candidates) => candidates,
            Err(err) => {
                warn!(%headword, error = %err, "generator failed, listing no inflections");
                return Vec::new();
            }
        };

        let mut seen = HashSet::new();
        let mut kept: Vec<DerivedForm> = Vec::new();
        for candidate in candidates {
            if !is_wanted(&candidate) || seen.contains(&candidate.surface_form) {
                continue;
            }
            seen.insert(candidate.surface_form.clone());
            kept.push(DerivedForm {
                tag_string: strip_volatile_tags(&candidate.tags),
                surface_form: candidate.surface_form,
            });
        }

        sort_by_collation(self.collation, &mut kept, |form| form.surface_form.as_str());
        kept
    }
}

fn is_wanted(candidate: &GeneratedForm) -> bool {
    let bad_tag = candidate
        .tags
        .split(':')
        .any(|tag| tag == UNKNOWN_WORD_TAG || IGNORED_TAGS.contains(&tag));
    let bad_qualifier = candidate
        .qualifiers
        .iter()
        .any(|qualifier| BAD_QUALIFIERS.contains(&qualifier.as_str()));
    !bad_tag && !bad_qualifier
}

fn strip_volatile_tags(tags: &str) -> String {
    tags.split(':')
        .filter(|tag| !VOLATILE_TAGS.contains(tag))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collation::AlphabetCollator;
    use crate::error::{DictionaryError, Result};

    struct Fixed(Vec<GeneratedForm>);

    impl FormGenerator for Fixed {
        fn generate(&self, _word: &str) -> Result<Vec<GeneratedForm>> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl FormGenerator for Failing {
        fn generate(&self, word: &str) -> Result<Vec<GeneratedForm>> {
            Err(DictionaryError::Generator {
                word: word.to_string(),
                reason: "engine unavailable".to_string(),
            })
        }
    }

    fn candidate(surface: &str, tags: &str) -> GeneratedForm {
        GeneratedForm {
            surface_form: surface.to_string(),
            base_form: "pies".to_string(),
            tags: tags.to_string(),
            frequency: String::new(),
            qualifiers: Vec::new(),
        }
    }

    fn forms_of(generator: &dyn FormGenerator, headword: &str) -> Vec<DerivedForm> {
        let collator = AlphabetCollator::for_locale("pl").unwrap();
        InflectionGenerator::new(generator, &collator).derived_forms(headword)
    }

    #[test]
    fn multi_word_headwords_have_no_forms() {
        let generator = Fixed(vec![candidate("pismo", "subst:sg:nom:n")]);
        assert!(forms_of(&generator, "pismo klinowe").is_empty());
    }

    #[test]
    fn first_duplicate_wins() {
        let generator = Fixed(vec![
            candidate("psa", "subst:sg:gen:m2"),
            candidate("psa", "subst:sg:acc:m2"),
        ]);
        assert_eq!(forms_of(&generator, "pies"), [DerivedForm::new("psa", "subst:sg:gen")]);
    }

    #[test]
    fn rejected_candidate_does_not_shadow_later_duplicate() {
        let generator = Fixed(vec![
            candidate("psa", "subst:sg:gen:m2:depr"),
            candidate("psa", "subst:sg:acc:m2"),
        ]);
        assert_eq!(forms_of(&generator, "pies"), [DerivedForm::new("psa", "subst:sg:acc")]);
    }

    #[test]
    fn ignored_and_unknown_tags_are_dropped() {
        let generator = Fixed(vec![
            candidate("pies", "ign"),
            candidate("psu", "subst:sg:dat:m2"),
            candidate("psie", "subst:sg:loc:m2:nakc"),
            candidate("pieskie", "adja"),
        ]);
        assert_eq!(forms_of(&generator, "pies"), [DerivedForm::new("psu", "subst:sg:dat")]);
    }

    #[test]
    fn bad_qualifiers_are_dropped() {
        let mut archaic = candidate("psowie", "subst:pl:nom:m1");
        archaic.qualifiers = vec!["pot.".to_string(), "daw.".to_string()];
        let generator = Fixed(vec![archaic, candidate("psy", "subst:pl:nom:m2")]);
        assert_eq!(forms_of(&generator, "pies"), [DerivedForm::new("psy", "subst:pl:nom")]);
    }

    #[test]
    fn volatile_gender_tags_are_stripped() {
        let generator = Fixed(vec![candidate("dobry", "adj:sg:nom:m1:pos")]);
        assert_eq!(forms_of(&generator, "dobry")[0].tag_string, "adj:sg:nom:pos");
    }

    #[test]
    fn forms_sort_in_collation_order() {
        let generator = Fixed(vec![
            candidate("żaba", "x"),
            candidate("zebra", "x"),
            candidate("źdźbło", "x"),
            candidate("ząb", "x"),
        ]);
        let surfaces: Vec<_> = forms_of(&generator, "z")
            .into_iter()
            .map(|f| f.surface_form)
            .collect();
        assert_eq!(surfaces, ["ząb", "zebra", "źdźbło", "żaba"]);
    }

    #[test]
    fn generator_failure_yields_no_forms() {
        assert!(forms_of(&Failing, "pies").is_empty());
    }
}
