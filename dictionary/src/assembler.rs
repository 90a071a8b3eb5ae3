//! Pipeline orchestration.
//!
//! `load → classify → merge translated → sort → assign ids → link aspects →
//! render chunks → write (→ stats)`. Each stage runs to completion before the
//! next starts; nothing is written until every chunk has been rendered.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use kindle_corpus::{load_corpus, load_translated, CorpusRecord, TranslatedEntry};
use tracing::{info, warn};

use crate::aspect::{find_alternative_aspect, VerbIndex};
use crate::classifier::{extract_head_words, DiscardedEntries};
use crate::collation::{sort_by_collation, AlphabetCollator, Collation};
use crate::config::DictionaryConfig;
use crate::generator::{FormGenerator, SgjpLexicon};
use crate::inflection::InflectionGenerator;
use crate::lemma::Lemma;
use crate::markup::{render_document, AspectReference};
use crate::package::render_opf;
use crate::stats::DictionaryStats;
use crate::{augment, error, writer};

/// Report of what was built.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Headwords in the dictionary.
    pub lemma_count: usize,
    /// Headwords that came from the translated corpus.
    pub translated_count: usize,
    /// Rejected records per bucket, keyed `<bucket>_count`.
    pub discarded: BTreeMap<String, usize>,
    /// Markup documents written.
    pub chunk_count: usize,
    /// Newlines across all markup documents.
    pub dict_lines: usize,
    /// Bytes across all markup documents.
    pub dict_bytes: usize,
    /// Files written.
    pub files: Vec<PathBuf>,
    /// Path of the OPF package.
    pub opf: PathBuf,
}

/// Lemmas in final order with ids assigned, plus what was discarded.
#[derive(Debug)]
pub struct AssembledDictionary {
    /// Sorted lemmas; the lemma at index `i` has id `i + 1`.
    pub lemmas: Vec<Lemma>,
    /// Records rejected by the classifier.
    pub discarded: DiscardedEntries,
    /// How many lemmas came from the translated corpus.
    pub translated_count: usize,
}

/// Runs the in-memory stages of the pipeline over injected capabilities.
pub struct DictionaryAssembler<'a> {
    config: &'a DictionaryConfig,
    collation: &'a dyn Collation,
    generator: &'a dyn FormGenerator,
}

impl<'a> DictionaryAssembler<'a> {
    /// Creates an assembler.
    pub fn new(
        config: &'a DictionaryConfig,
        collation: &'a dyn Collation,
        generator: &'a dyn FormGenerator,
    ) -> Self {
        Self {
            config,
            collation,
            generator,
        }
    }

    /// Classifies `records`, merges `translated`, sorts by headword and
    /// assigns ids.
    ///
    /// # Errors
    ///
    /// Returns [`error::DictionaryError::IdAlreadyAssigned`] if a lemma
    /// already carried an id.
    pub fn assemble(
        &self,
        records: Vec<CorpusRecord>,
        translated: Vec<TranslatedEntry>,
    ) -> error::Result<AssembledDictionary> {
        let (mut lemmas, discarded) = extract_head_words(records);
        let translated_count = augment::merge_translated(&mut lemmas, translated);

        sort_by_collation(self.collation, &mut lemmas, Lemma::headword);
        for (index, lemma) in lemmas.iter_mut().enumerate() {
            lemma.assign_id(index + 1)?;
        }
        info!(lemmas = lemmas.len(), "lemmas sorted and numbered");

        Ok(AssembledDictionary {
            lemmas,
            discarded,
            translated_count,
        })
    }

    /// Renders the markup documents, `chunk_size` lemmas each. An empty
    /// dictionary still yields one (empty) document.
    pub fn render(&self, dictionary: &AssembledDictionary) -> Vec<String> {
        let index = VerbIndex::build(&dictionary.lemmas);
        let inflection = InflectionGenerator::new(self.generator, self.collation);
        info!(verbs = index.len(), "verb index built");

        let mut documents: Vec<String> = dictionary
            .lemmas
            .chunks(self.config.chunk_len())
            .map(|chunk| {
                let entries: Vec<String> = chunk
                    .iter()
                    .map(|lemma| self.render_lemma(lemma, &index, &inflection))
                    .collect();
                render_document(&entries)
            })
            .collect();
        if documents.is_empty() {
            documents.push(render_document(&[]));
        }
        info!(chunks = documents.len(), "markup rendered");
        documents
    }

    fn render_lemma(
        &self,
        lemma: &Lemma,
        index: &VerbIndex<'_>,
        inflection: &InflectionGenerator<'_>,
    ) -> String {
        let forms = lemma.derived_forms(inflection);
        let link = if lemma.is_verb() {
            find_alternative_aspect(lemma, index)
        } else {
            None
        };
        let target_file = link
            .as_ref()
            .and_then(|link| link.target_id.parse::<usize>().ok())
            .map(|position| self.config.chunk_file_for_position(position));

        let aspect = link
            .as_ref()
            .zip(target_file.as_deref())
            .map(|(link, chunk_file)| AspectReference { link, chunk_file });
        lemma.lemma_markup(&forms, aspect)
    }
}

/// Opens the configured generation lexicon, or an empty one when none is
/// configured.
///
/// # Errors
///
/// Returns an error if the configured lexicon cannot be read.
pub fn load_lexicon(config: &DictionaryConfig) -> Result<SgjpLexicon> {
    match &config.lexicon {
        Some(path) => SgjpLexicon::load(path)
            .with_context(|| format!("Cannot load lexicon: {}", path.display())),
        None => {
            warn!("no generation lexicon configured, entries will list no inflections");
            Ok(SgjpLexicon::new())
        }
    }
}

/// Builds the whole dictionary described by `config` into `config.out_dir`.
///
/// `revision` names the stats files.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, an input cannot be
/// loaded, or any output file cannot be written. Input errors abort before
/// anything is written.
pub fn generate(
    config: &DictionaryConfig,
    generator: &dyn FormGenerator,
    revision: &str,
) -> Result<BuildReport> {
    config.validate()?;
    let collator = AlphabetCollator::for_locale(&config.locale)?;

    let records = load_corpus(&config.corpus)
        .with_context(|| format!("Cannot load corpus: {}", config.corpus.display()))?;
    let translated = match &config.translated_corpus {
        Some(path) => load_translated(path)
            .with_context(|| format!("Cannot load translated corpus: {}", path.display()))?,
        None => Vec::new(),
    };

    let assembler = DictionaryAssembler::new(config, &collator, generator);
    let dictionary = assembler.assemble(records, translated)?;
    let documents = assembler.render(&dictionary);

    let mut report = BuildReport {
        lemma_count: dictionary.lemmas.len(),
        translated_count: dictionary.translated_count,
        discarded: dictionary.discarded.counts(),
        chunk_count: documents.len(),
        ..BuildReport::default()
    };

    let mut chunk_files = Vec::with_capacity(documents.len());
    for (index, document) in documents.iter().enumerate() {
        let name = config.chunk_file_name(index);
        let path = config.out_dir.join(&name);
        writer::write(&path, document)?;
        report.dict_lines += document.matches('\n').count();
        report.dict_bytes += document.len();
        report.files.push(path);
        chunk_files.push(name);
    }

    let opf = config.out_dir.join(config.opf_file_name());
    writer::write(&opf, &render_opf(config, &chunk_files))?;
    report.files.push(opf.clone());
    report.opf = opf;

    if config.stats {
        let stats = DictionaryStats::collect(&dictionary.lemmas, &documents, &dictionary.discarded);
        let stats_path = config.out_dir.join(DictionaryStats::file_name(revision));
        writer::write_json(&stats_path, &stats)?;
        report.files.push(stats_path);

        let discarded_path = config.out_dir.join(DictionaryStats::discarded_file_name(revision));
        writer::write_json(&discarded_path, &dictionary.discarded.to_json())?;
        report.files.push(discarded_path);
    }

    info!(
        lemmas = report.lemma_count,
        chunks = report.chunk_count,
        out_dir = %config.out_dir.display(),
        "dictionary written"
    );
    Ok(report)
}
