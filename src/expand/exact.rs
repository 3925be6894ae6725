//! Exact-term expansion.

use crate::dictionary::TermDictionary;
use crate::error::Result;
use crate::expand::{Expansion, ExpansionCollector};
use crate::term::Term;

/// Expands to the query term itself when the dictionary contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactExpander {
    term: Term,
}

impl ExactExpander {
    /// Create a new exact expander.
    pub fn new<F, T>(field: F, text: T) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        ExactExpander {
            term: Term::new(field, text),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        self.term.field()
    }

    /// Get the term.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// Expand against `dictionary`.
    pub fn expand(&self, dictionary: &dyn TermDictionary) -> Result<Expansion> {
        let mut accepted = ExpansionCollector::new(self.term.field(), 1);
        let entry = dictionary.term_entry(&self.term)?;
        let scanned = u64::from(entry.is_some());

        if let Some(entry) = entry {
            accepted.accept(entry, 1.0)?;
        }
        Ok(accepted.finish(scanned))
    }
}
