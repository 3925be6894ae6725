//! Expansion and execution against one dictionary snapshot.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::cancel::Deadline;
use crate::config::{ExpansionConfig, GlaiveConfig};
use crate::dictionary::{DictionarySnapshots, TermDictionary};
use crate::error::{GlaiveError, Result};
use crate::expand::{ExpandedTerm, Expander, Expansion, FuzzyExpander, PrefixExpander};
use crate::search::collector::{ScoredHit, collector_for};
use crate::search::scoring::{TermScorer, scorer_for};
use crate::search::union::WeightedUnion;

/// Search results: hits in result order plus totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    /// The retained hits, best first.
    pub hits: Vec<ScoredHit>,
    /// Total number of matching documents, including hits cut by the limit.
    pub total_hits: u64,
    /// Maximum score in the results.
    pub max_score: f32,
}

/// Runs expansions and queries against a single dictionary snapshot.
///
/// A searcher never observes a newer snapshot than the one it was created
/// with, so handles captured by its expansions stay valid for its executions.
/// Create a new searcher to see newly published dictionaries.
#[derive(Debug)]
pub struct Searcher {
    dictionary: Arc<dyn TermDictionary>,
    scorer: Box<dyn TermScorer>,
    config: GlaiveConfig,
}

impl Searcher {
    /// Create a searcher over `dictionary` using the scoring model of `config`.
    pub fn new(dictionary: Arc<dyn TermDictionary>, config: GlaiveConfig) -> Self {
        Searcher {
            dictionary,
            scorer: scorer_for(config.search.scoring),
            config,
        }
    }

    /// Create a searcher over the current snapshot.
    pub fn from_snapshots(snapshots: &DictionarySnapshots, config: GlaiveConfig) -> Self {
        Self::new(snapshots.snapshot(), config)
    }

    /// Replace the term scorer.
    pub fn with_scorer(mut self, scorer: Box<dyn TermScorer>) -> Self {
        self.scorer = scorer;
        self
    }

    /// Get the dictionary snapshot.
    pub fn dictionary(&self) -> &dyn TermDictionary {
        self.dictionary.as_ref()
    }

    /// Get the configuration.
    pub fn config(&self) -> &GlaiveConfig {
        &self.config
    }

    /// Get the term scorer.
    pub fn scorer(&self) -> &dyn TermScorer {
        self.scorer.as_ref()
    }

    /// Expand `prefix` to every term of `field` starting with it.
    pub fn expand_prefix(&self, field: &str, prefix: &str, max_terms: usize) -> Result<Expansion> {
        let expander = Expander::from(PrefixExpander::new(field, prefix).max_terms(max_terms));
        expander.expand(self.dictionary(), &Deadline::none())
    }

    /// Expand `text` to every term of `field` similar enough to it.
    pub fn expand_fuzzy(
        &self,
        field: &str,
        text: &str,
        min_similarity: f32,
        prefix_length: usize,
        max_terms: usize,
        deadline: &Deadline,
    ) -> Result<Expansion> {
        let config = ExpansionConfig::default()
            .min_similarity(min_similarity)
            .prefix_length(prefix_length)
            .max_terms(max_terms);
        let expander = Expander::from(FuzzyExpander::new(field, text).with_config(config));
        expander.expand(self.dictionary(), deadline)
    }

    /// Score and rank the documents matching any of `terms`.
    ///
    /// A document's score is the sum over its matching terms of the term's
    /// weight times the scorer's rating. `top_k` bounds the number of hits
    /// returned but not `total_hits`. `deadline` is checked before every
    /// document; once it expires the whole execution fails.
    pub fn execute(
        &self,
        field: &str,
        terms: &[ExpandedTerm],
        top_k: Option<usize>,
        deadline: &Deadline,
    ) -> Result<SearchResults> {
        if let Some(stray) = terms.iter().find(|t| t.term.field() != field) {
            return Err(GlaiveError::invalid_parameter(format!(
                "term {} does not belong to field '{field}'",
                stray.term
            )));
        }
        if terms.is_empty() {
            return Ok(SearchResults::default());
        }

        let stats = self.dictionary.field_stats(field)?.unwrap_or_default();
        let mut union = WeightedUnion::open(self.dictionary(), terms)?;
        let mut collector = collector_for(top_k);

        loop {
            deadline.check("query execution")?;
            let Some(doc) = union.next_doc()? else {
                break;
            };

            let score: f32 = doc
                .matches
                .iter()
                .map(|m| {
                    let term = &terms[m.term_index];
                    term.weight * self.scorer.score(doc.doc_id, m.term_freq, term.doc_freq, &stats)
                })
                .sum();
            collector.collect(doc.doc_id, score)?;
        }

        let hits = collector.results();
        let max_score = hits.first().map_or(0.0, |hit| hit.score);
        let results = SearchResults {
            total_hits: collector.total_hits(),
            max_score,
            hits,
        };

        log::debug!(
            "executed {} terms on '{field}': {} matching documents, {} returned",
            terms.len(),
            results.total_hits,
            results.hits.len()
        );
        Ok(results)
    }

    /// Expand with `expander`, then execute on the same snapshot.
    pub fn search(
        &self,
        expander: &Expander,
        top_k: Option<usize>,
        deadline: &Deadline,
    ) -> Result<SearchResults> {
        let expansion = expander.expand(self.dictionary(), deadline)?;
        self.execute(expander.field(), expansion.terms(), top_k, deadline)
    }

    /// Expand and execute with the configured limit and time budget.
    pub fn search_with_defaults(&self, expander: &Expander) -> Result<SearchResults> {
        let deadline = self.config.search.deadline();
        self.search(expander, self.config.search.top_k, &deadline)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};

    use super::*;
    use crate::config::ScoringModel;
    use crate::dictionary::MemoryTermDictionaryBuilder;
    use crate::search::scoring::ConstantScorer;

    fn searcher(scoring: ScoringModel) -> Searcher {
        let mut builder = MemoryTermDictionaryBuilder::new();
        builder.add_document(0, "body", ["aaaaa"]).unwrap();
        builder.add_document(1, "body", ["aaaab", "aaaaa"]).unwrap();
        builder.add_document(2, "body", ["aaabb"]).unwrap();
        builder.add_document(3, "body", ["bbbbb"]).unwrap();
        builder.add_document(4, "title", ["aaaaa"]).unwrap();
        let config = GlaiveConfig::default();
        Searcher::new(
            Arc::new(builder.build()),
            GlaiveConfig {
                search: config.search.scoring(scoring),
                ..config
            },
        )
    }

    #[test]
    fn test_fuzzy_search_with_constant_scores() {
        let searcher = searcher(ScoringModel::Constant);
        let expansion = searcher
            .expand_fuzzy("body", "aaaaa", 0.5, 0, 1024, &Deadline::none())
            .unwrap();
        assert_eq!(expansion.texts(), vec!["aaaaa", "aaaab", "aaabb"]);

        let results = searcher
            .execute("body", expansion.terms(), None, &Deadline::none())
            .unwrap();
        let ranked: Vec<(u64, f32)> = results.hits.iter().map(|h| (h.doc_id, h.score)).collect();

        assert_eq!(results.total_hits, 3);
        assert_eq!(ranked[0].0, 1);
        assert!((ranked[0].1 - 1.8).abs() < 1e-5);
        assert_eq!(ranked[1].0, 0);
        assert!((ranked[1].1 - 1.0).abs() < 1e-5);
        assert_eq!(ranked[2].0, 2);
        assert!((ranked[2].1 - 0.6).abs() < 1e-5);
        assert!((results.max_score - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_top_k_keeps_total() {
        let searcher = searcher(ScoringModel::TfIdf);
        let expansion = searcher.expand_prefix("body", "aaa", 10).unwrap();
        let results = searcher
            .execute("body", expansion.terms(), Some(1), &Deadline::none())
            .unwrap();
        assert_eq!(results.hits.len(), 1);
        assert_eq!(results.total_hits, 3);
        assert_eq!(results.hits[0].doc_id, 1);
    }

    #[test]
    fn test_term_from_other_field_rejected() {
        let searcher = searcher(ScoringModel::TfIdf);
        let expansion = searcher.expand_prefix("title", "a", 10).unwrap();
        let err = searcher
            .execute("body", expansion.terms(), None, &Deadline::none())
            .unwrap_err();
        assert!(matches!(err, GlaiveError::InvalidParameter(_)));
    }

    #[test]
    fn test_empty_expansion_is_empty_result() {
        let searcher = searcher(ScoringModel::TfIdf);
        let expander = Expander::from(PrefixExpander::new("body", "zzz"));
        let results = searcher.search(&expander, None, &Deadline::none()).unwrap();
        assert!(results.hits.is_empty());
        assert_eq!(results.total_hits, 0);
        assert_eq!(results.max_score, 0.0);
    }

    #[test]
    fn test_expired_deadline_discards_hits() {
        let searcher = searcher(ScoringModel::TfIdf);
        let expansion = searcher.expand_prefix("body", "a", 10).unwrap();
        let expired = Deadline::at(Instant::now() - Duration::from_millis(1));
        assert!(matches!(
            searcher.execute("body", expansion.terms(), None, &expired),
            Err(GlaiveError::Cancelled(_))
        ));
    }

    #[test]
    fn test_custom_scorer() {
        let searcher = searcher(ScoringModel::Bm25).with_scorer(Box::new(ConstantScorer));
        assert_eq!(searcher.scorer().name(), "constant");

        let expander = Expander::from(FuzzyExpander::new("body", "aaaab"));
        let results = searcher.search_with_defaults(&expander).unwrap();
        // doc 1 holds "aaaab" (1.0) and "aaaaa" (0.8)
        assert_eq!(results.hits[0].doc_id, 1);
        assert!((results.hits[0].score - 1.8).abs() < 1e-5);
    }

    #[test]
    fn test_snapshot_isolation() {
        let mut builder = MemoryTermDictionaryBuilder::new();
        builder.add_document(0, "body", ["old"]).unwrap();
        let snapshots = DictionarySnapshots::new(Arc::new(builder.build()));
        let before = Searcher::from_snapshots(&snapshots, GlaiveConfig::default());

        let mut builder = MemoryTermDictionaryBuilder::new();
        builder.add_document(0, "body", ["new"]).unwrap();
        snapshots.publish(Arc::new(builder.build()));
        let after = Searcher::from_snapshots(&snapshots, GlaiveConfig::default());

        assert_eq!(before.expand_prefix("body", "", 10).unwrap().texts(), vec!["old"]);
        assert_eq!(after.expand_prefix("body", "", 10).unwrap().texts(), vec!["new"]);
    }
}
