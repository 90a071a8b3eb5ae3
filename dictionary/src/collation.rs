//! Locale-aware string ordering.
//!
//! A collator is built once from a locale name and passed to every step that
//! orders headwords or inflected forms. Comparison is multi-level:
//!
//! 1. primary: letters by their position in the locale alphabet, case
//!    folded; digits sort before letters; whitespace and punctuation are
//!    ignored; accented letters outside the alphabet fold to their base
//!    letter (`é` → `e`);
//! 2. secondary: lowercase before uppercase;
//! 3. tertiary: code point order of the NFC text, so the order is total.

use std::cmp::Ordering;
use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

use crate::error::{DictionaryError, Result};

/// Polish alphabet, including the letters only found in loanwords.
pub const POLISH_ALPHABET: &str = "aąbcćdeęfghijklłmnńoópqrsśtuvwxyzźż";

const DIGIT_BASE: u32 = 1;
const LETTER_BASE: u32 = 0x100;
const FOREIGN_BASE: u32 = 0x1000;

/// Comparison key produced by a [`Collation`]. Keys compare in collation
/// order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CollationKey {
    primary: Vec<u32>,
    secondary: Vec<u8>,
    tertiary: String,
}

/// A string ordering.
pub trait Collation {
    /// Returns the key that orders `text`.
    fn sort_key(&self, text: &str) -> CollationKey;

    /// Compares two strings.
    fn compare(&self, a: &str, b: &str) -> Ordering {
        self.sort_key(a).cmp(&self.sort_key(b))
    }
}

/// Sorts `items` by the string `key` returns, in collation order. Equal keys
/// keep their relative order.
pub fn sort_by_collation<T, F>(collation: &dyn Collation, items: &mut [T], key: F)
where
    F: Fn(&T) -> &str,
{
    items.sort_by_cached_key(|item| collation.sort_key(key(item)));
}

/// Collator driven by an alphabet table.
#[derive(Debug, Clone)]
pub struct AlphabetCollator {
    locale: String,
    weights: HashMap<char, u32>,
}

impl AlphabetCollator {
    /// Builds the collator for a named locale. `pl`, `pl_PL` and
    /// `pl_PL.utf8` (any case) select Polish.
    ///
    /// # Errors
    ///
    /// Returns [`DictionaryError::UnsupportedLocale`] for any other name.
    pub fn for_locale(name: &str) -> Result<Self> {
        let language = name
            .split(['_', '-', '.'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match language.as_str() {
            "pl" => Ok(Self::from_alphabet(name, POLISH_ALPHABET)),
            _ => Err(DictionaryError::UnsupportedLocale(name.to_string())),
        }
    }

    /// Builds a collator from an ordered lowercase alphabet.
    pub fn from_alphabet(locale: &str, alphabet: &str) -> Self {
        let weights = alphabet
            .chars()
            .zip(LETTER_BASE..)
            .collect::<HashMap<_, _>>();
        Self {
            locale: locale.to_string(),
            weights,
        }
    }

    /// Locale name the collator was built for.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    fn primary_weight(&self, lower: char) -> u32 {
        if let Some(&weight) = self.weights.get(&lower) {
            return weight;
        }
        if let Some(digit) = lower.to_digit(10) {
            return DIGIT_BASE + digit;
        }
        // Fold letters the alphabet lacks onto their base letter.
        let base = lower.nfd().next().unwrap_or(lower);
        match self.weights.get(&base) {
            Some(&weight) => weight,
            None => FOREIGN_BASE + u32::from(lower),
        }
    }
}

impl Collation for AlphabetCollator {
    fn sort_key(&self, text: &str) -> CollationKey {
        let composed: String = text.nfc().collect();
        let mut primary = Vec::with_capacity(composed.len());
        let mut secondary = Vec::with_capacity(composed.len());

        for ch in composed.chars().filter(|c| c.is_alphanumeric()) {
            secondary.push(u8::from(ch.is_uppercase()));
            for lower in ch.to_lowercase() {
                primary.push(self.primary_weight(lower));
            }
        }

        CollationKey {
            primary,
            secondary,
            tertiary: composed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn polish() -> AlphabetCollator {
        AlphabetCollator::for_locale("pl_PL.utf8").unwrap()
    }

    fn sorted(words: &[&str]) -> Vec<String> {
        let mut words: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        sort_by_collation(&polish(), &mut words, |w| w.as_str());
        words
    }

    #[test]
    fn polish_alphabet_order() {
        let scrambled = [
            "k", "l", "a", "ą", "i", "b", "h", "j", "c", "ę", "f", "g", "ć", "d", "e", "ł", "m",
            "n", "ż", "ń", "y", "z", "ś", "t", "u", "v", "ó", "p", "q", "r", "s", "w", "x", "ź",
            "o",
        ];
        let expected: Vec<String> = POLISH_ALPHABET.chars().map(String::from).collect();
        assert_eq!(sorted(&scrambled), expected);
    }

    #[test]
    fn diacritics_sort_after_plain_letter_words() {
        assert_eq!(sorted(&["z", "ż", "ź", "zbyt"]), ["z", "zbyt", "ź", "ż"]);
    }

    #[test]
    fn diacritic_letters_are_not_interleaved() {
        assert_eq!(
            sorted(&["łza", "lzy", "lato", "łabędź"]),
            ["lato", "lzy", "łabędź", "łza"]
        );
    }

    #[test]
    fn case_is_secondary() {
        assert_eq!(sorted(&["Bąk", "bąk", "Ala", "ala"]), ["ala", "Ala", "bąk", "Bąk"]);
    }

    #[test]
    fn spaces_and_punctuation_are_ignored_at_primary_level() {
        assert_eq!(
            sorted(&["pismowy", "pismo klinowe", "-anka", "ananas"]),
            ["ananas", "-anka", "pismo klinowe", "pismowy"]
        );
    }

    #[test]
    fn foreign_accents_fold_to_base_letter() {
        assert_eq!(sorted(&["ez", "éa", "eb"]), ["éa", "eb", "ez"]);
    }

    #[test]
    fn decomposed_input_matches_composed() {
        let collator = polish();
        let decomposed = "z\u{0307}aba";
        assert_eq!(collator.compare(decomposed, "żaba"), Ordering::Equal);
    }

    #[test]
    fn digits_before_letters() {
        assert_eq!(sorted(&["a", "1"]), ["1", "a"]);
    }

    #[test]
    fn unknown_locale_is_rejected() {
        assert!(matches!(
            AlphabetCollator::for_locale("tlh"),
            Err(DictionaryError::UnsupportedLocale(_))
        ));
    }
}
