//! Posting lists.
//!
//! A posting list is the ascending, duplicate-free sequence of documents
//! containing a term, with the term's frequency in each document.

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single posting in a posting list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Document ID.
    pub doc_id: u64,
    /// Term frequency in the document.
    pub term_freq: u32,
}

impl Posting {
    /// Create a new posting.
    pub fn new(doc_id: u64, term_freq: u32) -> Self {
        Posting { doc_id, term_freq }
    }
}

/// A posting list for a specific term.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostingList {
    /// The postings, sorted by document ID.
    postings: Vec<Posting>,
    /// Total frequency across all documents.
    total_term_freq: u64,
}

impl PostingList {
    /// Create a new empty posting list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a posting, keeping the list sorted.
    ///
    /// Adding a document that is already present merges the frequencies.
    pub fn add_posting(&mut self, posting: Posting) {
        self.total_term_freq += posting.term_freq as u64;

        match self
            .postings
            .binary_search_by_key(&posting.doc_id, |p| p.doc_id)
        {
            Ok(pos) => self.postings[pos].term_freq += posting.term_freq,
            Err(pos) => self.postings.insert(pos, posting),
        }
    }

    /// Number of documents containing the term.
    pub fn doc_freq(&self) -> u64 {
        self.postings.len() as u64
    }

    /// Total occurrences of the term.
    pub fn total_term_freq(&self) -> u64 {
        self.total_term_freq
    }

    /// Get the length of the posting list.
    pub fn len(&self) -> usize {
        self.postings.len()
    }

    /// Check if the posting list is empty.
    pub fn is_empty(&self) -> bool {
        self.postings.is_empty()
    }

    /// Borrow the postings.
    pub fn as_slice(&self) -> &[Posting] {
        &self.postings
    }

    /// Get an iterator over the postings.
    pub fn iter(&'_ self) -> SlicePostingIterator<'_> {
        SlicePostingIterator::new(&self.postings)
    }
}

/// Lazy ascending iteration over a posting list.
pub trait PostingIterator: Send + Debug {
    /// Advance to the next posting; `None` once exhausted.
    fn next(&mut self) -> Result<Option<Posting>>;

    /// Number of postings this iterator yields in total.
    fn cost(&self) -> u64;
}

/// A posting iterator over a borrowed slice.
#[derive(Debug, Clone)]
pub struct SlicePostingIterator<'a> {
    postings: &'a [Posting],
    position: usize,
}

impl<'a> SlicePostingIterator<'a> {
    /// Create a new iterator over `postings`.
    pub fn new(postings: &'a [Posting]) -> Self {
        SlicePostingIterator {
            postings,
            position: 0,
        }
    }
}

impl PostingIterator for SlicePostingIterator<'_> {
    fn next(&mut self) -> Result<Option<Posting>> {
        let posting = self.postings.get(self.position).copied();
        if posting.is_some() {
            self.position += 1;
        }
        Ok(posting)
    }

    fn cost(&self) -> u64 {
        self.postings.len() as u64
    }
}
