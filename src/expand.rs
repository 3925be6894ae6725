//! Term expansion.
//!
//! An expansion turns one query term into the weighted set of dictionary
//! terms that are actually searched for. The kinds of expansion are the
//! variants of [`Expander`]; each produces an [`Expansion`] whose terms are
//! in ascending term order, carry a weight in (0, 1], and number at most the
//! configured maximum. Exceeding the maximum is reported as
//! [`GlaiveError::ExpansionTooBroad`], never silently truncated.

pub mod exact;
pub mod fuzzy;
pub mod prefix;

use serde::{Deserialize, Serialize};

use crate::cancel::Deadline;
use crate::dictionary::TermDictionary;
use crate::error::{GlaiveError, Result};
use crate::term::{PostingHandle, Term, TermEntry};

pub use self::exact::ExactExpander;
pub use self::fuzzy::FuzzyExpander;
pub use self::prefix::PrefixExpander;

/// A dictionary term selected by an expansion, with its weight.
///
/// The posting handle and document frequency are captured during
/// enumeration so execution never has to seek again. They are only valid
/// against the dictionary snapshot the expansion ran on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedTerm {
    /// The matched term.
    pub term: Term,
    /// Weight in (0, 1]: 1.0 for exact and prefix matches, the similarity for fuzzy ones.
    pub weight: f32,
    /// Number of documents containing the term.
    pub doc_freq: u64,
    /// Posting list of the term.
    pub handle: PostingHandle,
}

impl ExpandedTerm {
    /// Create an expanded term from a dictionary entry.
    pub fn new(entry: TermEntry, weight: f32) -> Result<Self> {
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(GlaiveError::invalid_parameter(format!(
                "weight of {} must be within (0, 1], got {weight}",
                entry.term
            )));
        }
        Ok(ExpandedTerm {
            term: entry.term,
            weight,
            doc_freq: entry.doc_freq,
            handle: entry.handle,
        })
    }
}

/// The outcome of one expansion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    field: String,
    terms: Vec<ExpandedTerm>,
    scanned: u64,
}

impl Expansion {
    /// An expansion that matched nothing.
    pub fn empty<S: Into<String>>(field: S) -> Self {
        Expansion {
            field: field.into(),
            terms: Vec::new(),
            scanned: 0,
        }
    }

    /// The expanded field.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Accepted terms in ascending term order.
    pub fn terms(&self) -> &[ExpandedTerm] {
        &self.terms
    }

    /// Take the accepted terms.
    pub fn into_terms(self) -> Vec<ExpandedTerm> {
        self.terms
    }

    /// Number of accepted terms.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether nothing was accepted.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Number of dictionary entries inspected.
    pub fn scanned(&self) -> u64 {
        self.scanned
    }

    /// Texts of the accepted terms.
    pub fn texts(&self) -> Vec<&str> {
        self.terms.iter().map(|t| t.term.text()).collect()
    }

    /// The accepted term with the given text.
    pub fn get(&self, text: &str) -> Option<&ExpandedTerm> {
        self.terms
            .binary_search_by(|t| t.term.text().cmp(text))
            .ok()
            .map(|index| &self.terms[index])
    }
}

/// Accumulates accepted terms up to a limit.
#[derive(Debug)]
pub(crate) struct ExpansionCollector {
    field: String,
    limit: usize,
    terms: Vec<ExpandedTerm>,
}

impl ExpansionCollector {
    pub(crate) fn new(field: &str, limit: usize) -> Self {
        ExpansionCollector {
            field: field.to_string(),
            limit,
            terms: Vec::new(),
        }
    }

    /// Accept a term; fails once more than `limit` terms have been accepted.
    pub(crate) fn accept(&mut self, entry: TermEntry, weight: f32) -> Result<()> {
        if self.terms.len() >= self.limit {
            log::warn!(
                "expansion of field '{}' rejected: more than {} terms",
                self.field,
                self.limit
            );
            return Err(GlaiveError::expansion_too_broad(&self.field, self.limit));
        }
        self.terms.push(ExpandedTerm::new(entry, weight)?);
        Ok(())
    }

    pub(crate) fn finish(self, scanned: u64) -> Expansion {
        Expansion {
            field: self.field,
            terms: self.terms,
            scanned,
        }
    }
}

/// A way of expanding one query term.
#[derive(Debug, Clone, PartialEq)]
pub enum Expander {
    /// The term itself, if present.
    Exact(ExactExpander),
    /// Every term starting with a literal prefix.
    Prefix(PrefixExpander),
    /// Every term within a minimum edit-distance similarity.
    Fuzzy(FuzzyExpander),
}

impl Expander {
    /// Run the expansion against a dictionary snapshot.
    pub fn expand(&self, dictionary: &dyn TermDictionary, deadline: &Deadline) -> Result<Expansion> {
        let expansion = match self {
            Expander::Exact(exact) => exact.expand(dictionary)?,
            Expander::Prefix(prefix) => prefix.expand(dictionary)?,
            Expander::Fuzzy(fuzzy) => fuzzy.expand(dictionary, deadline)?,
        };

        log::debug!(
            "{} expansion on '{}': scanned {} terms, accepted {}",
            self.kind(),
            self.field(),
            expansion.scanned(),
            expansion.len()
        );
        Ok(expansion)
    }

    /// The field this expander targets.
    pub fn field(&self) -> &str {
        match self {
            Expander::Exact(exact) => exact.field(),
            Expander::Prefix(prefix) => prefix.field(),
            Expander::Fuzzy(fuzzy) => fuzzy.field(),
        }
    }

    /// Short name of the expansion kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Expander::Exact(_) => "exact",
            Expander::Prefix(_) => "prefix",
            Expander::Fuzzy(_) => "fuzzy",
        }
    }
}

impl From<ExactExpander> for Expander {
    fn from(expander: ExactExpander) -> Self {
        Expander::Exact(expander)
    }
}

impl From<PrefixExpander> for Expander {
    fn from(expander: PrefixExpander) -> Self {
        Expander::Prefix(expander)
    }
}

impl From<FuzzyExpander> for Expander {
    fn from(expander: FuzzyExpander) -> Self {
        Expander::Fuzzy(expander)
    }
}
