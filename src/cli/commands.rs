//! Command implementations for the Glaive CLI.

use std::sync::Arc;
use std::time::Instant;

use ahash::AHashMap;

use crate::cli::args::*;
use crate::cli::corpus::{Corpus, StoredFields};
use crate::cli::output::{ExpansionReport, HitReport, SearchReport, output_result};
use crate::config::{ExpansionConfig, GlaiveConfig, SearchConfig};
use crate::error::Result;
use crate::expand::{ExactExpander, Expander, FuzzyExpander, PrefixExpander};
use crate::search::Searcher;

/// Execute a CLI command.
pub fn execute_command(args: GlaiveArgs) -> Result<()> {
    let config = load_config(&args)?;
    match &args.command {
        Command::Prefix(prefix_args) => prefix_search(prefix_args, &config, &args),
        Command::Fuzzy(fuzzy_args) => fuzzy_search(fuzzy_args, &config, &args),
        Command::Terms(terms_args) => show_terms(terms_args, &config, &args),
    }
}

/// Load the configuration file, or the defaults when none is given.
fn load_config(args: &GlaiveArgs) -> Result<GlaiveConfig> {
    match &args.config {
        Some(path) => {
            log::debug!("loading configuration from {}", path.display());
            GlaiveConfig::from_json_file(path)
        }
        None => Ok(GlaiveConfig::default()),
    }
}

/// A searcher over a loaded corpus plus its stored values.
struct LoadedCorpus {
    searcher: Searcher,
    stored: AHashMap<u64, StoredFields>,
}

fn open_corpus(corpus: &CorpusArgs, config: &GlaiveConfig) -> Result<LoadedCorpus> {
    let (dictionary, stored) = Corpus::load(&corpus.corpus)?.into_parts();
    Ok(LoadedCorpus {
        searcher: Searcher::new(Arc::new(dictionary), *config),
        stored,
    })
}

/// Overlay command line options on the configured expansion parameters.
fn expansion_config(options: &FuzzyOptions, config: &GlaiveConfig) -> ExpansionConfig {
    let mut expansion = config.expansion;
    if let Some(min_similarity) = options.min_similarity {
        expansion.min_similarity = min_similarity;
    }
    if let Some(prefix_length) = options.prefix_length {
        expansion.prefix_length = prefix_length;
    }
    if let Some(max_terms) = options.max_terms {
        expansion.max_terms = max_terms;
    }
    expansion
}

/// Search with a prefix expansion.
fn prefix_search(args: &PrefixArgs, config: &GlaiveConfig, cli_args: &GlaiveArgs) -> Result<()> {
    let max_terms = args.max_terms.unwrap_or(config.expansion.max_terms);
    let expander = Expander::from(
        PrefixExpander::new(args.corpus.field.as_str(), args.prefix.as_str()).max_terms(max_terms),
    );
    let search = SearchConfig {
        top_k: args.top_k.or(config.search.top_k),
        ..config.search
    };

    run_search(&args.corpus, &expander, search, config, cli_args)
}

/// Search with a fuzzy expansion.
fn fuzzy_search(args: &FuzzyArgs, config: &GlaiveConfig, cli_args: &GlaiveArgs) -> Result<()> {
    let expander = Expander::from(
        FuzzyExpander::new(args.corpus.field.as_str(), args.text.as_str())
            .with_config(expansion_config(&args.fuzzy, config)),
    );
    let search = SearchConfig {
        top_k: args.top_k.or(config.search.top_k),
        timeout_ms: args.timeout_ms.or(config.search.timeout_ms),
        ..config.search
    };

    run_search(&args.corpus, &expander, search, config, cli_args)
}

/// Expand and execute on a freshly loaded corpus; the time budget starts after loading.
fn run_search(
    corpus: &CorpusArgs,
    expander: &Expander,
    search: SearchConfig,
    config: &GlaiveConfig,
    cli_args: &GlaiveArgs,
) -> Result<()> {
    let loaded = open_corpus(corpus, config)?;
    let start_time = Instant::now();
    let deadline = search.deadline();

    let expansion = expander.expand(loaded.searcher.dictionary(), &deadline)?;
    let results = loaded
        .searcher
        .execute(expander.field(), expansion.terms(), search.top_k, &deadline)?;

    let hits = results
        .hits
        .iter()
        .map(|hit| HitReport {
            doc_id: hit.doc_id,
            score: hit.score,
            stored: loaded.stored.get(&hit.doc_id).cloned().unwrap_or_default(),
        })
        .collect();

    let report = SearchReport {
        expansion: ExpansionReport::new(expander.kind(), &expansion),
        hits,
        total_hits: results.total_hits,
        max_score: results.max_score,
        duration_ms: start_time.elapsed().as_millis() as u64,
    };
    output_result(&report, cli_args)
}

/// Print the expansion of a query without searching.
fn show_terms(args: &TermsArgs, config: &GlaiveConfig, cli_args: &GlaiveArgs) -> Result<()> {
    let field = args.corpus.field.as_str();
    let text = args.text.as_str();
    let expansion = expansion_config(&args.fuzzy, config);

    let expander = match args.mode {
        ExpansionMode::Exact => Expander::from(ExactExpander::new(field, text)),
        ExpansionMode::Prefix => {
            Expander::from(PrefixExpander::new(field, text).max_terms(expansion.max_terms))
        }
        ExpansionMode::Fuzzy => {
            Expander::from(FuzzyExpander::new(field, text).with_config(expansion))
        }
    };

    let loaded = open_corpus(&args.corpus, config)?;
    let expansion = expander.expand(loaded.searcher.dictionary(), &config.search.deadline())?;
    output_result(&ExpansionReport::new(expander.kind(), &expansion), cli_args)
}
