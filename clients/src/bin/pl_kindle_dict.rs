//! `pl-kindle-dict`: builds the Polish-English Kindle dictionary from the
//! kaikki.org Polish Wiktionary extract.
//!
//! **Outputs (`<out>/`):**
//! - `PL_EN_dict_<n>.html`: dictionary markup, `--chunk-size` entries each
//! - `PL_EN_dict.opf`: package document for `kindlegen`
//! - `dictionary_stats_<rev>.json`, `discarded_entries_<rev>.json`: with `--stats`
//! - `PL_EN_dict.mobi`: with `--kindlegen <path>`
//!
//! **Usage:**
//! ```
//! pl-kindle-dict [--config <toml>] [--corpus <jsonl>] [--lexicon <tab>] [--out <path>] [--stats]
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{bail, Context, Result};
use clap::Parser;
use kindle_dictionary::{generate, load_lexicon, DictionaryConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Build the Polish-English Kindle dictionary.
#[derive(Parser)]
#[command(
    name = "pl-kindle-dict",
    about = "Build the Polish-English Kindle dictionary"
)]
struct Args {
    /// TOML build configuration; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Line-delimited JSON corpus.
    #[arg(long)]
    corpus: Option<PathBuf>,

    /// Machine-translated supplementary corpus (JSON array).
    #[arg(long)]
    translated: Option<PathBuf>,

    /// SGJP generation table used to list inflected forms.
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Output directory.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Entries per markup document.
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Also write the stats and discarded-entries documents.
    #[arg(long)]
    stats: bool,

    /// Build revision used to name the stats documents.
    #[arg(long, env = "DICT_BUILD_REVISION")]
    revision: Option<String>,

    /// Run this `kindlegen` executable on the package after building.
    #[arg(long)]
    kindlegen: Option<PathBuf>,

    /// Log at debug level unless `RUST_LOG` says otherwise.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn into_config(self) -> Result<(DictionaryConfig, Option<String>, Option<PathBuf>)> {
        let mut config = match &self.config {
            Some(path) => DictionaryConfig::load(path)?,
            None => DictionaryConfig::default(),
        };
        if let Some(corpus) = self.corpus {
            config.corpus = corpus;
        }
        if self.translated.is_some() {
            config.translated_corpus = self.translated;
        }
        if self.lexicon.is_some() {
            config.lexicon = self.lexicon;
        }
        if let Some(out) = self.out {
            config.out_dir = out;
        }
        if let Some(chunk_size) = self.chunk_size {
            config.chunk_size = chunk_size;
        }
        config.stats |= self.stats;
        config.validate()?;
        Ok((config, self.revision, self.kindlegen))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let (config, revision, kindlegen) = args.into_config()?;
    let revision = revision.unwrap_or_else(current_revision);

    let lexicon = load_lexicon(&config)?;
    let report = generate(&config, &lexicon, &revision)?;

    println!(
        "Dictionary built: {} headwords ({} machine translated), {} documents, {} lines",
        report.lemma_count, report.translated_count, report.chunk_count, report.dict_lines
    );
    for (bucket, count) in &report.discarded {
        println!("  Discarded {bucket}: {count}");
    }
    for path in &report.files {
        println!("  Written: {}", path.display());
    }

    if let Some(kindlegen) = kindlegen {
        run_kindlegen(&kindlegen, &report.opf)?;
        println!("  Packaged with {}", kindlegen.display());
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// `git describe --always`, or `unknown` outside a repository.
fn current_revision() -> String {
    let described = Command::new("git")
        .args(["describe", "--always"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|stdout| stdout.trim().to_string())
        .filter(|revision| !revision.is_empty());
    match described {
        Some(revision) => revision,
        None => {
            warn!("cannot determine build revision, using `unknown`");
            "unknown".to_string()
        }
    }
}

/// kindlegen exits with 1 when the book was built with warnings.
fn kindlegen_succeeded(code: Option<i32>) -> bool {
    matches!(code, Some(0 | 1))
}

fn run_kindlegen(kindlegen: &Path, opf: &Path) -> Result<()> {
    let opf_dir = opf
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let opf_name = opf.file_name().unwrap_or(opf.as_os_str());
    info!(kindlegen = %kindlegen.display(), opf = %opf.display(), "running kindlegen");

    let status = Command::new(kindlegen)
        .arg(opf_name)
        .args(["-c2", "-verbose", "-dont_append_source"])
        .current_dir(opf_dir)
        .status()
        .with_context(|| format!("Cannot run kindlegen: {}", kindlegen.display()))?;
    if !kindlegen_succeeded(status.code()) {
        bail!("kindlegen failed with {status}");
    }
    Ok(())
}
