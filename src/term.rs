//! Terms and per-term dictionary information.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single indexed token value: a (field, text) pair.
///
/// Terms order by field first and by text within a field, so fields
/// partition the term space. Text comparison is plain lexicographic byte
/// order, which for UTF-8 coincides with code point order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Term {
    field: String,
    text: String,
}

impl Term {
    /// Create a new term.
    pub fn new<F, T>(field: F, text: T) -> Self
    where
        F: Into<String>,
        T: Into<String>,
    {
        Term {
            field: field.into(),
            text: text.into(),
        }
    }

    /// Get the field name.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Get the term text.
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.text)
    }
}

/// Non-owning reference to a posting list held by a term dictionary.
///
/// A handle is only meaningful to the dictionary (snapshot) that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostingHandle(u64);

impl PostingHandle {
    /// Wrap a dictionary-specific posting address.
    pub fn new(raw: u64) -> Self {
        PostingHandle(raw)
    }

    /// The raw dictionary-specific address.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// One entry of a term dictionary.
#[derive(Debug, Clone, PartialEq)]
pub struct TermEntry {
    /// The term.
    pub term: Term,
    /// Number of documents containing this term.
    pub doc_freq: u64,
    /// Handle to the term's posting list.
    pub handle: PostingHandle,
}

impl TermEntry {
    /// Create a new term entry.
    pub fn new(term: Term, doc_freq: u64, handle: PostingHandle) -> Self {
        TermEntry {
            term,
            doc_freq,
            handle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_ordering() {
        let a = Term::new("body", "apple");
        let b = Term::new("body", "banana");
        let c = Term::new("title", "aardvark");

        assert!(a < b);
        // Field partitions the space before text is compared.
        assert!(b < c);
        assert_eq!(a, Term::new("body", "apple"));
    }

    #[test]
    fn test_term_display() {
        let term = Term::new("text", "café");
        assert_eq!(term.to_string(), "text:café");
        assert_eq!(term.field(), "text");
        assert_eq!(term.text(), "café");
    }
}
