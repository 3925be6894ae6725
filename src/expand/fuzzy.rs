//! Fuzzy expansion for approximate term matching.
//!
//! A fuzzy expansion accepts every term of the field whose edit-distance
//! similarity to the query reaches a minimum:
//!
//! ```text
//! similarity = 1 - distance(query, candidate) / min(len(query), len(candidate))
//! ```
//!
//! Only terms that share the query's first `prefix_length` characters are
//! compared at all. Those terms form one contiguous band of the sorted
//! dictionary, so a larger prefix length shrinks the scan directly. The
//! prefix only narrows the candidate set: the distance is always computed
//! between the whole query and the whole candidate.

use crate::cancel::Deadline;
use crate::config::ExpansionConfig;
use crate::dictionary::TermDictionary;
use crate::enumerator::{TermEnumerator, TermRange};
use crate::error::Result;
use crate::expand::{Expansion, ExpansionCollector};
use crate::levenshtein::LevenshteinMatcher;

/// Expands a possibly misspelled term to similar dictionary terms.
///
/// # Example
///
/// ```
/// use glaive::cancel::Deadline;
/// use glaive::dictionary::MemoryTermDictionaryBuilder;
/// use glaive::expand::FuzzyExpander;
///
/// let mut builder = MemoryTermDictionaryBuilder::new();
/// builder.add_document(0, "body", ["segment", "student", "window"]).unwrap();
/// let dict = builder.build();
///
/// let expansion = FuzzyExpander::new("body", "stellent")
///     .min_similarity(0.5)
///     .expand(&dict, &Deadline::none())
///     .unwrap();
/// assert_eq!(expansion.texts(), vec!["segment", "student"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyExpander {
    field: String,
    text: String,
    config: ExpansionConfig,
}

impl FuzzyExpander {
    /// Create a new fuzzy expander with default settings.
    pub fn new<F, T>(field: F, text: T) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        FuzzyExpander {
            field: field.into(),
            text: text.into(),
            config: ExpansionConfig::default(),
        }
    }

    /// Replace all expansion parameters.
    pub fn with_config(mut self, config: ExpansionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the minimum similarity, within [0, 1].
    pub fn min_similarity(mut self, min_similarity: f32) -> Self {
        self.config.min_similarity = min_similarity;
        self
    }

    /// Set the number of leading characters that must match exactly.
    pub fn prefix_length(mut self, prefix_length: usize) -> Self {
        self.config.prefix_length = prefix_length;
        self
    }

    /// Set the maximum number of terms to expand to.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.config.max_terms = max_terms;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the query text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the expansion parameters.
    pub fn config(&self) -> &ExpansionConfig {
        &self.config
    }

    /// Expand against `dictionary`.
    ///
    /// Parameters are validated before the dictionary is touched. `deadline`
    /// is checked before every candidate comparison.
    pub fn expand(&self, dictionary: &dyn TermDictionary, deadline: &Deadline) -> Result<Expansion> {
        let matcher = LevenshteinMatcher::new(self.text.as_str());
        self.config.validate_fuzzy(matcher.query_len())?;

        // An empty query is dissimilar to every term.
        if matcher.query_len() == 0 {
            return Ok(Expansion::empty(self.field.as_str()));
        }

        let prefix: String = self.text.chars().take(self.config.prefix_length).collect();
        let mut terms = TermEnumerator::open(dictionary, &self.field, TermRange::Prefix(prefix))?;
        let mut accepted = ExpansionCollector::new(&self.field, self.config.max_terms);

        loop {
            deadline.check("fuzzy expansion")?;
            let Some(entry) = terms.advance()? else {
                break;
            };

            if let Some(found) = matcher.similar(entry.term.text(), self.config.min_similarity) {
                log::trace!(
                    "fuzzy '{}' accepted {} (distance {}, similarity {:.3})",
                    self.text,
                    entry.term,
                    found.distance,
                    found.similarity
                );
                accepted.accept(entry, found.similarity)?;
            }
        }

        Ok(accepted.finish(terms.scanned()))
    }
}
