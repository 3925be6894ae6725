//! Term dictionary access.
//!
//! A [`TermDictionary`] is the sorted, seekable set of all distinct terms of
//! every field together with each term's posting list. It is read-only at
//! query time. Implementations must guarantee that a scan started at any
//! term yields entries in strictly increasing order within a field, with no
//! gaps or duplicates.
//!
//! This crate ships [`MemoryTermDictionary`] as an in-memory implementation;
//! on-disk index formats plug in by implementing the trait.

pub mod memory;
pub mod posting;
pub mod snapshot;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::term::{PostingHandle, Term, TermEntry};

pub use self::memory::{MemoryTermDictionary, MemoryTermDictionaryBuilder};
pub use self::posting::{Posting, PostingIterator, PostingList, SlicePostingIterator};
pub use self::snapshot::DictionarySnapshots;

/// Position of a scan within one field of a term dictionary.
///
/// The position is an opaque, dictionary-specific ordinal. A cursor is a
/// plain value; it holds no borrow of the dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermCursor {
    field: String,
    position: u64,
}

impl TermCursor {
    /// Create a cursor for `field` at `position`.
    pub fn new<S: Into<String>>(field: S, position: u64) -> Self {
        TermCursor {
            field: field.into(),
            position,
        }
    }

    /// The field being scanned.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The current position.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Move the cursor to a new position.
    pub fn set_position(&mut self, position: u64) {
        self.position = position;
    }
}

/// Per-field statistics used by scoring functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldStats {
    /// Number of documents with at least one term in the field.
    pub doc_count: u64,
    /// Number of distinct terms in the field.
    pub term_count: u64,
    /// Sum of document frequencies over all terms of the field.
    pub sum_doc_freq: u64,
}

/// Read-only access to a sorted term dictionary.
///
/// Every method may fail; failures are reported as
/// [`GlaiveError::DictionaryUnavailable`](crate::error::GlaiveError::DictionaryUnavailable)
/// and propagated unchanged by the query core.
pub trait TermDictionary: Send + Sync + Debug {
    /// Locate the first term of `field` that is greater than or equal to `text`.
    ///
    /// Must cost at most O(log N) in the number of distinct terms.
    fn seek(&self, field: &str, text: &str) -> Result<TermCursor>;

    /// Return the entry at the cursor and advance it.
    ///
    /// Returns `None` at the end of the field. Amortized O(1).
    fn next(&self, cursor: &mut TermCursor) -> Result<Option<TermEntry>>;

    /// Iterate the posting list behind `handle` in ascending document order.
    ///
    /// The iterator is finite; calling this again restarts the list.
    fn postings(&self, handle: PostingHandle) -> Result<Box<dyn PostingIterator + '_>>;

    /// Statistics for `field`, or `None` if the field has no terms.
    fn field_stats(&self, field: &str) -> Result<Option<FieldStats>>;

    /// Look up a single term exactly.
    fn term_entry(&self, term: &Term) -> Result<Option<TermEntry>> {
        let mut cursor = self.seek(term.field(), term.text())?;
        match self.next(&mut cursor)? {
            Some(entry) if entry.term == *term => Ok(Some(entry)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor() {
        let mut cursor = TermCursor::new("body", 3);
        assert_eq!(cursor.field(), "body");
        assert_eq!(cursor.position(), 3);

        cursor.set_position(4);
        assert_eq!(cursor.position(), 4);
    }

    #[test]
    fn test_term_entry_lookup() {
        let mut builder = MemoryTermDictionaryBuilder::new();
        builder.add_term(0, "body", "home", 1).unwrap();
        builder.add_term(1, "body", "test", 2).unwrap();
        let dict = builder.build();

        let entry = dict.term_entry(&Term::new("body", "test")).unwrap().unwrap();
        assert_eq!(entry.doc_freq, 1);

        assert!(dict.term_entry(&Term::new("body", "tes")).unwrap().is_none());
        assert!(dict.term_entry(&Term::new("title", "test")).unwrap().is_none());
    }
}
