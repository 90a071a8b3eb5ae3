//! Cross-references between the two aspects of a verb.
//!
//! Polish verbs come in perfective/imperfective pairs that are separate
//! headwords. The corpus records the partner in the `forms` annotations of
//! a verb (`{"form": "podjąć", "tags": ["perfective"]}`); when the partner is
//! itself a verb headword of the dictionary, the entry links to it.

use std::collections::HashMap;

use crate::lemma::Lemma;

/// Verb headwords of the final dictionary. Built once after ids are
/// assigned and only read afterwards.
#[derive(Debug, Default)]
pub struct VerbIndex<'a> {
    verbs: HashMap<&'a str, &'a Lemma>,
}

impl<'a> VerbIndex<'a> {
    /// Indexes every verb in `lemmas`. When several verbs share a headword
    /// the last one is kept.
    pub fn build(lemmas: &'a [Lemma]) -> Self {
        let verbs = lemmas
            .iter()
            .filter(|lemma| lemma.is_verb())
            .map(|lemma| (lemma.headword(), lemma))
            .collect();
        Self { verbs }
    }

    /// Looks up a verb headword.
    pub fn get(&self, headword: &str) -> Option<&'a Lemma> {
        self.verbs.get(headword).copied()
    }

    /// Number of indexed verbs.
    pub fn len(&self) -> usize {
        self.verbs.len()
    }

    /// Whether no verb was indexed.
    pub fn is_empty(&self) -> bool {
        self.verbs.is_empty()
    }
}

/// A resolved link to the other aspect of a verb.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AspectLink {
    /// Aspect label of the partner, e.g. `perfective`.
    pub tag: String,
    /// Partner headword.
    pub form: String,
    /// Dictionary id of the partner.
    pub target_id: String,
}

/// Resolves the aspect partner of `lemma`.
///
/// Uses the first forms annotation that has both a form and a tag. Returns
/// `None` when there is no such annotation, when the form is not a verb
/// headword, or when the partner has no id yet.
pub fn find_alternative_aspect(lemma: &Lemma, index: &VerbIndex<'_>) -> Option<AspectLink> {
    let (form, tag) = lemma.forms().iter().find_map(|annotation| {
        let form = annotation.form.as_deref().filter(|f| !f.is_empty())?;
        let tag = annotation.tags.first()?;
        Some((form, tag))
    })?;

    let target = index.get(form)?;
    Some(AspectLink {
        tag: tag.clone(),
        form: form.to_string(),
        target_id: target.dictionary_id()?.to_string(),
    })
}
