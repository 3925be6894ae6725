//! Collectors for gathering scored hits.
//!
//! Every collector returns hits ordered by descending score, with ties
//! broken by ascending document id.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{GlaiveError, Result};

/// A matched document with its score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoredHit {
    /// Document id.
    pub doc_id: u64,
    /// Summed weighted term scores.
    pub score: f32,
}

impl ScoredHit {
    /// Create a new hit.
    pub fn new(doc_id: u64, score: f32) -> Self {
        ScoredHit { doc_id, score }
    }

    /// Result order: higher score first, then lower document id.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .score
            .total_cmp(&self.score)
            .then_with(|| self.doc_id.cmp(&other.doc_id))
    }
}

/// Trait for collecting scored hits.
pub trait Collector: Send + Debug {
    /// Collect a document hit.
    fn collect(&mut self, doc_id: u64, score: f32) -> Result<()>;

    /// Get the collected hits in result order.
    fn results(&self) -> Vec<ScoredHit>;

    /// Get the total number of hits collected, including any not retained.
    fn total_hits(&self) -> u64;

    /// Reset the collector for a new search.
    fn reset(&mut self);
}

/// Create the collector for an optional hit limit.
pub fn collector_for(top_k: Option<usize>) -> Box<dyn Collector> {
    match top_k {
        Some(k) => Box::new(TopDocsCollector::new(k)),
        None => Box::new(AllDocsCollector::new()),
    }
}

/// Heap entry whose greatest element is the worst-ranked hit.
#[derive(Debug, Clone, Copy)]
struct RankedHit(ScoredHit);

impl PartialEq for RankedHit {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for RankedHit {}

impl PartialOrd for RankedHit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RankedHit {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.rank_cmp(&other.0)
    }
}

/// A collector that keeps the top N hits.
#[derive(Debug)]
pub struct TopDocsCollector {
    /// Maximum number of hits to keep.
    max_docs: usize,
    /// Kept hits; the heap top is the worst of them.
    hits: BinaryHeap<RankedHit>,
    /// Total number of documents collected.
    total_hits: u64,
}

impl TopDocsCollector {
    /// Create a new top docs collector.
    pub fn new(max_docs: usize) -> Self {
        TopDocsCollector {
            max_docs,
            hits: BinaryHeap::with_capacity(max_docs.min(1024)),
            total_hits: 0,
        }
    }

    /// Get the maximum number of hits to keep.
    pub fn max_docs(&self) -> usize {
        self.max_docs
    }

    /// Get the worst kept hit once the collector is full.
    pub fn threshold(&self) -> Option<ScoredHit> {
        if self.hits.len() < self.max_docs {
            None
        } else {
            self.hits.peek().map(|hit| hit.0)
        }
    }
}

impl Collector for TopDocsCollector {
    fn collect(&mut self, doc_id: u64, score: f32) -> Result<()> {
        if score.is_nan() {
            return Err(GlaiveError::other(format!("score of document {doc_id} is NaN")));
        }
        self.total_hits += 1;
        if self.max_docs == 0 {
            return Ok(());
        }

        let hit = ScoredHit::new(doc_id, score);
        match self.threshold() {
            None => self.hits.push(RankedHit(hit)),
            Some(worst) if hit.rank_cmp(&worst) == Ordering::Less => {
                // Replace the worst hit
                self.hits.pop();
                self.hits.push(RankedHit(hit));
            }
            Some(_) => {}
        }

        Ok(())
    }

    fn results(&self) -> Vec<ScoredHit> {
        let mut results: Vec<ScoredHit> = self.hits.iter().map(|hit| hit.0).collect();
        results.sort_by(ScoredHit::rank_cmp);
        results
    }

    fn total_hits(&self) -> u64 {
        self.total_hits
    }

    fn reset(&mut self) {
        self.hits.clear();
        self.total_hits = 0;
    }
}

/// A collector that keeps every hit.
#[derive(Debug, Default)]
pub struct AllDocsCollector {
    hits: Vec<ScoredHit>,
}

impl AllDocsCollector {
    /// Create a new all docs collector.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for AllDocsCollector {
    fn collect(&mut self, doc_id: u64, score: f32) -> Result<()> {
        if score.is_nan() {
            return Err(GlaiveError::other(format!("score of document {doc_id} is NaN")));
        }
        self.hits.push(ScoredHit::new(doc_id, score));
        Ok(())
    }

    fn results(&self) -> Vec<ScoredHit> {
        let mut results = self.hits.clone();
        results.sort_by(ScoredHit::rank_cmp);
        results
    }

    fn total_hits(&self) -> u64 {
        self.hits.len() as u64
    }

    fn reset(&mut self) {
        self.hits.clear();
    }
}
