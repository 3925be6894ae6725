//! Disjunction over the posting lists of expanded terms.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use crate::dictionary::{PostingIterator, TermDictionary};
use crate::error::{GlaiveError, Result};
use crate::expand::ExpandedTerm;

/// One term's contribution to a matched document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermMatch {
    /// Index of the term in the slice the union was opened with.
    pub term_index: usize,
    /// Occurrences of the term in the document.
    pub term_freq: u32,
}

/// A document matched by at least one term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocMatch {
    /// The document.
    pub doc_id: u64,
    /// Every matching term, in ascending term index.
    pub matches: Vec<TermMatch>,
}

/// Head of one posting list inside the merge heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PostingHead {
    doc_id: u64,
    term_index: usize,
    term_freq: u32,
}

impl PartialOrd for PostingHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PostingHead {
    fn cmp(&self, other: &Self) -> Ordering {
        self.doc_id
            .cmp(&other.doc_id)
            .then_with(|| self.term_index.cmp(&other.term_index))
    }
}

/// K-way merge of posting lists yielding each matching document once.
///
/// Documents come out in ascending id order. All terms listing a document
/// are gathered before the union moves past it, so no per-term result set
/// is ever materialised.
#[derive(Debug)]
pub struct WeightedUnion<'d> {
    iterators: Vec<Box<dyn PostingIterator + 'd>>,
    heap: BinaryHeap<Reverse<PostingHead>>,
    cost: u64,
}

impl<'d> WeightedUnion<'d> {
    /// Open the posting lists of `terms` through their captured handles.
    pub fn open(dictionary: &'d dyn TermDictionary, terms: &[ExpandedTerm]) -> Result<Self> {
        let mut iterators = Vec::with_capacity(terms.len());
        let mut heap = BinaryHeap::with_capacity(terms.len());
        let mut cost = 0;

        for (term_index, term) in terms.iter().enumerate() {
            let mut postings = dictionary.postings(term.handle)?;
            cost += postings.cost();

            if let Some(posting) = postings.next()? {
                heap.push(Reverse(PostingHead {
                    doc_id: posting.doc_id,
                    term_index,
                    term_freq: posting.term_freq,
                }));
            }
            iterators.push(postings);
        }

        Ok(WeightedUnion {
            iterators,
            heap,
            cost,
        })
    }

    /// Total number of postings across all lists.
    pub fn cost(&self) -> u64 {
        self.cost
    }

    /// Advance to the next matching document.
    pub fn next_doc(&mut self) -> Result<Option<DocMatch>> {
        let Some(Reverse(first)) = self.heap.pop() else {
            return Ok(None);
        };

        let doc_id = first.doc_id;
        let mut matches = vec![TermMatch {
            term_index: first.term_index,
            term_freq: first.term_freq,
        }];
        self.refill(first)?;

        while let Some(Reverse(head)) = self.heap.peek().copied() {
            if head.doc_id != doc_id {
                break;
            }
            self.heap.pop();
            matches.push(TermMatch {
                term_index: head.term_index,
                term_freq: head.term_freq,
            });
            self.refill(head)?;
        }

        Ok(Some(DocMatch { doc_id, matches }))
    }

    /// Push the successor of `head` from the same posting list.
    fn refill(&mut self, head: PostingHead) -> Result<()> {
        let Some(postings) = self.iterators.get_mut(head.term_index) else {
            return Ok(());
        };
        let Some(posting) = postings.next()? else {
            return Ok(());
        };

        if posting.doc_id <= head.doc_id {
            return Err(GlaiveError::dictionary(format!(
                "posting list of term {} out of order: document {} after {}",
                head.term_index, posting.doc_id, head.doc_id
            )));
        }

        self.heap.push(Reverse(PostingHead {
            doc_id: posting.doc_id,
            term_index: head.term_index,
            term_freq: posting.term_freq,
        }));
        Ok(())
    }
}
