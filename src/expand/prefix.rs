//! Prefix expansion.

use crate::config::DEFAULT_MAX_TERMS;
use crate::dictionary::TermDictionary;
use crate::enumerator::{TermEnumerator, TermRange};
use crate::error::{GlaiveError, Result};
use crate::expand::{Expansion, ExpansionCollector};

/// Expands a literal prefix to every term of the field that starts with it.
///
/// The matching terms form one contiguous band of the sorted dictionary, so
/// the scan seeks once and stops at the first term past the band. Every
/// term gets weight 1.0. An empty prefix matches the whole field, subject to
/// the same term limit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixExpander {
    field: String,
    prefix: String,
    max_terms: usize,
}

impl PrefixExpander {
    /// Create a new prefix expander.
    pub fn new<F, P>(field: F, prefix: P) -> Self
    where
        F: Into<String>,
        P: Into<String>,
    {
        PrefixExpander {
            field: field.into(),
            prefix: prefix.into(),
            max_terms: DEFAULT_MAX_TERMS,
        }
    }

    /// Set the maximum number of terms.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Get the maximum number of terms.
    pub fn get_max_terms(&self) -> usize {
        self.max_terms
    }

    /// Expand against `dictionary`.
    pub fn expand(&self, dictionary: &dyn TermDictionary) -> Result<Expansion> {
        if self.max_terms == 0 {
            return Err(GlaiveError::invalid_parameter("max_terms must be at least 1"));
        }

        let mut terms = TermEnumerator::open(
            dictionary,
            &self.field,
            TermRange::Prefix(self.prefix.clone()),
        )?;
        let mut accepted = ExpansionCollector::new(&self.field, self.max_terms);

        while let Some(entry) = terms.advance()? {
            accepted.accept(entry, 1.0)?;
        }

        Ok(accepted.finish(terms.scanned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{MemoryTermDictionary, MemoryTermDictionaryBuilder};

    fn categories() -> MemoryTermDictionary {
        let mut builder = MemoryTermDictionaryBuilder::new();
        for (doc, text) in ["/Computers", "/Computers/Mac", "/Computers/Windows"]
            .iter()
            .enumerate()
        {
            builder.add_term(doc as u64, "category", text, 1).unwrap();
        }
        builder.add_term(3, "category", "/Books", 1).unwrap();
        builder.build()
    }

    #[test]
    fn test_prefix_query() {
        let dict = categories();

        let expansion = PrefixExpander::new("category", "/Computers")
            .expand(&dict)
            .unwrap();
        assert_eq!(
            expansion.texts(),
            vec!["/Computers", "/Computers/Mac", "/Computers/Windows"]
        );
        assert!(expansion.terms().iter().all(|t| t.weight == 1.0));

        let expansion = PrefixExpander::new("category", "/Computers/Mac")
            .expand(&dict)
            .unwrap();
        assert_eq!(expansion.texts(), vec!["/Computers/Mac"]);
    }

    #[test]
    fn test_empty_prefix_matches_field() {
        let dict = categories();
        let expansion = PrefixExpander::new("category", "").expand(&dict).unwrap();
        assert_eq!(expansion.len(), 4);

        let err = PrefixExpander::new("category", "")
            .max_terms(3)
            .expand(&dict)
            .unwrap_err();
        assert!(matches!(err, GlaiveError::ExpansionTooBroad { limit: 3, .. }));
    }

    #[test]
    fn test_no_match_is_empty_success() {
        let dict = categories();
        assert!(PrefixExpander::new("category", "/Z").expand(&dict).unwrap().is_empty());
        assert!(PrefixExpander::new("other", "/").expand(&dict).unwrap().is_empty());
    }

    #[test]
    fn test_limit_is_inclusive() {
        let dict = categories();
        let expansion = PrefixExpander::new("category", "/Computers")
            .max_terms(3)
            .expand(&dict)
            .unwrap();
        assert_eq!(expansion.len(), 3);
    }

    #[test]
    fn test_zero_limit_rejected() {
        let dict = categories();
        let err = PrefixExpander::new("category", "/")
            .max_terms(0)
            .expand(&dict)
            .unwrap_err();
        assert!(matches!(err, GlaiveError::InvalidParameter(_)));
    }
}
