//! In-memory term dictionary.
//!
//! Each field keeps its distinct terms in a sorted array with a parallel
//! array of posting handles, so seeking is a binary search and advancing is
//! an index increment. Posting lists live in one dictionary-owned vector and
//! a [`PostingHandle`] is simply an index into it.

use std::collections::BTreeMap;

use ahash::{AHashMap, AHashSet};

use crate::dictionary::posting::{Posting, PostingIterator, PostingList};
use crate::dictionary::{FieldStats, TermCursor, TermDictionary};
use crate::error::{GlaiveError, Result};
use crate::term::{PostingHandle, Term, TermEntry};

/// Sorted terms of one field.
#[derive(Debug, Clone, Default)]
struct FieldTerms {
    /// Sorted, distinct term texts.
    terms: Vec<String>,
    /// Posting list index for each term (parallel array).
    postings: Vec<usize>,
    /// Number of documents with at least one term in this field.
    doc_count: u64,
    /// Sum of document frequencies.
    sum_doc_freq: u64,
}

impl FieldTerms {
    fn lower_bound(&self, text: &str) -> usize {
        match self
            .terms
            .binary_search_by(|probe| probe.as_str().cmp(text))
        {
            Ok(pos) => pos,
            Err(pos) => pos,
        }
    }
}

/// An immutable, in-memory [`TermDictionary`].
///
/// Build one with [`MemoryTermDictionaryBuilder`]. Once built the dictionary
/// never changes, so any number of queries may read it concurrently.
#[derive(Debug, Clone, Default)]
pub struct MemoryTermDictionary {
    fields: AHashMap<String, FieldTerms>,
    posting_lists: Vec<PostingList>,
}

impl MemoryTermDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder.
    pub fn builder() -> MemoryTermDictionaryBuilder {
        MemoryTermDictionaryBuilder::new()
    }

    /// Names of all fields, sorted.
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.fields.keys().map(String::as_str).collect();
        fields.sort_unstable();
        fields
    }

    /// Number of distinct terms in `field`.
    pub fn term_count(&self, field: &str) -> usize {
        self.fields.get(field).map_or(0, |f| f.terms.len())
    }

    /// The posting list behind `handle`.
    pub fn posting_list(&self, handle: PostingHandle) -> Option<&PostingList> {
        self.posting_lists.get(handle.raw() as usize)
    }
}

impl TermDictionary for MemoryTermDictionary {
    fn seek(&self, field: &str, text: &str) -> Result<TermCursor> {
        let position = self.fields.get(field).map_or(0, |f| f.lower_bound(text));
        Ok(TermCursor::new(field, position as u64))
    }

    fn next(&self, cursor: &mut TermCursor) -> Result<Option<TermEntry>> {
        let Some(field_terms) = self.fields.get(cursor.field()) else {
            return Ok(None);
        };

        let position = cursor.position() as usize;
        let Some(text) = field_terms.terms.get(position) else {
            return Ok(None);
        };

        let index = field_terms.postings[position];
        let doc_freq = self.posting_lists[index].doc_freq();
        cursor.set_position(position as u64 + 1);

        Ok(Some(TermEntry::new(
            Term::new(cursor.field(), text.as_str()),
            doc_freq,
            PostingHandle::new(index as u64),
        )))
    }

    fn postings(&self, handle: PostingHandle) -> Result<Box<dyn PostingIterator + '_>> {
        let list = self.posting_list(handle).ok_or_else(|| {
            GlaiveError::dictionary(format!("unknown posting handle {}", handle.raw()))
        })?;
        Ok(Box::new(list.iter()))
    }

    fn field_stats(&self, field: &str) -> Result<Option<FieldStats>> {
        Ok(self.fields.get(field).map(|f| FieldStats {
            doc_count: f.doc_count,
            term_count: f.terms.len() as u64,
            sum_doc_freq: f.sum_doc_freq,
        }))
    }
}

/// Builder for [`MemoryTermDictionary`].
///
/// Terms are added already analysed; this builder does no tokenisation.
///
/// # Example
///
/// ```
/// use glaive::dictionary::{MemoryTermDictionaryBuilder, TermDictionary};
///
/// let mut builder = MemoryTermDictionaryBuilder::new();
/// builder.add_document(0, "category", ["/Computers"]).unwrap();
/// builder.add_document(1, "category", ["/Computers/Mac"]).unwrap();
/// let dict = builder.build();
///
/// assert_eq!(dict.field_stats("category").unwrap().unwrap().term_count, 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryTermDictionaryBuilder {
    fields: AHashMap<String, BTreeMap<String, PostingList>>,
    field_docs: AHashMap<String, AHashSet<u64>>,
}

impl MemoryTermDictionaryBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `text` occurs `term_freq` times in `field` of `doc_id`.
    pub fn add_term(&mut self, doc_id: u64, field: &str, text: &str, term_freq: u32) -> Result<()> {
        if text.is_empty() {
            return Err(GlaiveError::invalid_parameter(format!(
                "empty term in field '{field}' of document {doc_id}"
            )));
        }
        if term_freq == 0 {
            return Err(GlaiveError::invalid_parameter(format!(
                "term '{text}' in document {doc_id} has zero frequency"
            )));
        }

        self.fields
            .entry(field.to_string())
            .or_default()
            .entry(text.to_string())
            .or_default()
            .add_posting(Posting::new(doc_id, term_freq));
        self.field_docs
            .entry(field.to_string())
            .or_default()
            .insert(doc_id);

        Ok(())
    }

    /// Add every term of an already-analysed field value.
    ///
    /// Repeated terms accumulate into the term frequency.
    pub fn add_document<I, S>(&mut self, doc_id: u64, field: &str, terms: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for term in terms {
            self.add_term(doc_id, field, term.as_ref(), 1)?;
        }
        Ok(())
    }

    /// Freeze the builder into an immutable dictionary.
    pub fn build(self) -> MemoryTermDictionary {
        let mut fields = AHashMap::with_capacity(self.fields.len());
        let mut posting_lists = Vec::new();

        for (field, terms) in self.fields {
            let mut field_terms = FieldTerms {
                terms: Vec::with_capacity(terms.len()),
                postings: Vec::with_capacity(terms.len()),
                doc_count: self.field_docs.get(&field).map_or(0, |d| d.len() as u64),
                sum_doc_freq: 0,
            };

            // BTreeMap iteration is already sorted.
            for (text, list) in terms {
                field_terms.sum_doc_freq += list.doc_freq();
                field_terms.terms.push(text);
                field_terms.postings.push(posting_lists.len());
                posting_lists.push(list);
            }

            fields.insert(field, field_terms);
        }

        MemoryTermDictionary {
            fields,
            posting_lists,
        }
    }
}
