//! Typed view of the kaikki.org Polish Wiktionary extract.
//!
//! The extract is a file of newline-delimited JSON objects, one per
//! Wiktionary entry. This crate reads it into [`CorpusRecord`]s, keeping the
//! raw JSON of every record so rejected entries can be reported verbatim.
//! It also reads the optional supplementary corpus of machine-translated
//! lemmas.
//!
//! # Entry Point
//!
//! ```no_run
//! use std::path::Path;
//! use kindle_corpus::load_corpus;
//!
//! let records = load_corpus(Path::new("kaikki.org-dictionary-Polish.json"))
//!     .expect("corpus should load");
//! println!("{} records", records.len());
//! ```
//!
//! Any record missing `word` or `pos` aborts loading: the corpus is either
//! read completely or not at all.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

pub mod error;
pub mod loader;
pub mod model;
pub mod translated;

pub use error::{CorpusError, Result};
pub use loader::{load_corpus, read_corpus};
pub use model::{CorpusRecord, FormAnnotation, Meaning};
pub use translated::{load_translated, TranslatedEntry};
