//! Kindle dictionary builder for the Polish Wiktionary extract.
//!
//! Turns the kaikki.org corpus into Kindle `idx:` markup documents and an
//! OPF package ready for `kindlegen`. Every accepted headword lists its
//! inflected forms, so the device can look up `psa` and land on `pies`.
//!
//! # Entry Point
//!
//! ```no_run
//! use kindle_dictionary::{generate, load_lexicon, DictionaryConfig};
//!
//! let config = DictionaryConfig::default();
//! let lexicon = load_lexicon(&config).expect("lexicon");
//! let report = generate(&config, &lexicon, "dev").expect("dictionary build failed");
//! println!("{} headwords", report.lemma_count);
//! ```
//!
//! # Pipeline
//!
//! 1. [`classifier`] accepts or discards each corpus record;
//! 2. [`augment`] merges the machine-translated supplement;
//! 3. [`collation`] orders headwords and [`lemma::Lemma::assign_id`] numbers them;
//! 4. [`inflection`] and [`aspect`] enrich each entry;
//! 5. [`markup`], [`package`] and [`stats`] produce the output files.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod aspect;
pub mod assembler;
pub mod augment;
pub mod classifier;
pub mod collation;
pub mod config;
pub mod error;
pub mod generator;
pub mod inflection;
pub mod lemma;
pub mod markup;
pub mod package;
pub mod stats;
pub mod writer;

pub use aspect::{find_alternative_aspect, AspectLink, VerbIndex};
pub use assembler::{
    generate, load_lexicon, AssembledDictionary, BuildReport, DictionaryAssembler,
};
pub use classifier::{classify, extract_head_words, Classification, DiscardBucket, DiscardedEntries};
pub use collation::{AlphabetCollator, Collation};
pub use config::DictionaryConfig;
pub use error::{DictionaryError, Result};
pub use generator::{FormGenerator, GeneratedForm, SgjpLexicon};
pub use inflection::{DerivedForm, InflectionGenerator};
pub use lemma::{Definition, Lemma};
pub use stats::DictionaryStats;
