//! Term scoring functions.
//!
//! A [`TermScorer`] rates how well one term matches one document. The
//! searcher multiplies that rating by the expanded term's weight and sums the
//! products over every term a document matches. Every scorer here returns a
//! non-negative value.

use std::fmt::Debug;

use crate::config::ScoringModel;
use crate::dictionary::FieldStats;

/// Trait for term scoring functions.
pub trait TermScorer: Send + Sync + Debug {
    /// Score `term_freq` occurrences of a term found in `doc_freq` documents
    /// of a field described by `stats`.
    fn score(&self, doc_id: u64, term_freq: u32, doc_freq: u64, stats: &FieldStats) -> f32;

    /// Get the name of this scorer.
    fn name(&self) -> &'static str;
}

/// Create the scorer selected by a scoring model.
pub fn scorer_for(model: ScoringModel) -> Box<dyn TermScorer> {
    match model {
        ScoringModel::TfIdf => Box::new(TfIdfScorer),
        ScoringModel::Bm25 => Box::new(Bm25Scorer::default()),
        ScoringModel::Constant => Box::new(ConstantScorer),
    }
}

/// Classic TF-IDF: `sqrt(tf) * idf^2` with `idf = 1 + ln(N / (df + 1))`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TfIdfScorer;

impl TfIdfScorer {
    /// Calculate the IDF component.
    pub fn idf(doc_freq: u64, doc_count: u64) -> f32 {
        let n = doc_count as f32;
        let df = doc_freq as f32;
        (1.0 + (n / (df + 1.0)).ln()).max(0.0)
    }
}

impl TermScorer for TfIdfScorer {
    fn score(&self, _doc_id: u64, term_freq: u32, doc_freq: u64, stats: &FieldStats) -> f32 {
        if term_freq == 0 {
            return 0.0;
        }
        let idf = Self::idf(doc_freq, stats.doc_count);
        (term_freq as f32).sqrt() * idf * idf
    }

    fn name(&self) -> &'static str {
        "tf_idf"
    }
}

/// Okapi BM25.
///
/// Field lengths are not indexed, so every document is treated as having
/// the average field length and the `b` normalisation cancels out.
#[derive(Debug, Clone, Copy)]
pub struct Bm25Scorer {
    k1: f32,
    b: f32,
}

impl Default for Bm25Scorer {
    fn default() -> Self {
        Bm25Scorer { k1: 1.2, b: 0.75 }
    }
}

impl Bm25Scorer {
    /// Create a BM25 scorer with custom parameters.
    pub fn with_params(k1: f32, b: f32) -> Self {
        Bm25Scorer { k1, b }
    }

    /// Get the k1 parameter.
    pub fn k1(&self) -> f32 {
        self.k1
    }

    /// Get the b parameter.
    pub fn b(&self) -> f32 {
        self.b
    }

    /// Calculate the IDF component.
    ///
    /// `ln(1 + (N - df + 0.5) / (df + 0.5))`, which stays positive even for
    /// terms found in every document.
    pub fn idf(doc_freq: u64, doc_count: u64) -> f32 {
        let n = doc_count.max(doc_freq) as f32;
        let df = doc_freq as f32;
        (1.0 + (n - df + 0.5) / (df + 0.5)).ln()
    }

    /// Calculate the TF component; `length_ratio` is field length over average field length.
    fn tf(&self, term_freq: f32, length_ratio: f32) -> f32 {
        let norm_factor = 1.0 - self.b + self.b * length_ratio;
        (term_freq * (self.k1 + 1.0)) / (term_freq + self.k1 * norm_factor)
    }
}

impl TermScorer for Bm25Scorer {
    fn score(&self, _doc_id: u64, term_freq: u32, doc_freq: u64, stats: &FieldStats) -> f32 {
        if term_freq == 0 || doc_freq == 0 {
            return 0.0;
        }
        Self::idf(doc_freq, stats.doc_count) * self.tf(term_freq as f32, 1.0)
    }

    fn name(&self) -> &'static str {
        "bm25"
    }
}

/// Scores every matching term 1.0, so a hit's score is the sum of its term weights.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConstantScorer;

impl TermScorer for ConstantScorer {
    fn score(&self, _doc_id: u64, _term_freq: u32, _doc_freq: u64, _stats: &FieldStats) -> f32 {
        1.0
    }

    fn name(&self) -> &'static str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(doc_count: u64) -> FieldStats {
        FieldStats {
            doc_count,
            term_count: 10,
            sum_doc_freq: 20,
        }
    }

    #[test]
    fn test_tf_idf() {
        let scorer = TfIdfScorer;
        let rare = scorer.score(0, 1, 1, &stats(100));
        let common = scorer.score(0, 1, 50, &stats(100));
        assert!(rare > common);

        let once = scorer.score(0, 1, 10, &stats(100));
        let four_times = scorer.score(0, 4, 10, &stats(100));
        assert!((four_times - 2.0 * once).abs() < 1e-4);

        assert_eq!(scorer.score(0, 0, 10, &stats(100)), 0.0);
        assert_eq!(scorer.name(), "tf_idf");
    }

    #[test]
    fn test_tf_idf_never_negative() {
        let scorer = TfIdfScorer;
        // An empty field sends the log to negative infinity; the idf is floored at 0.
        assert!(scorer.score(0, 3, 100, &stats(100)) >= 0.0);
        assert!(scorer.score(0, 3, 5, &stats(0)) >= 0.0);
    }

    #[test]
    fn test_bm25() {
        let scorer = Bm25Scorer::default();
        assert_eq!(scorer.k1(), 1.2);
        assert_eq!(scorer.b(), 0.75);

        let rare = scorer.score(0, 1, 1, &stats(100));
        let common = scorer.score(0, 1, 100, &stats(100));
        assert!(rare > common);
        assert!(common > 0.0);

        // term frequency saturates at k1 + 1
        let saturated = scorer.score(0, 1000, 1, &stats(100));
        assert!(saturated < Bm25Scorer::idf(1, 100) * 2.2 + 1e-4);
        assert!(saturated > scorer.score(0, 1, 1, &stats(100)));
    }

    #[test]
    fn test_constant() {
        let scorer = ConstantScorer;
        assert_eq!(scorer.score(7, 3, 9, &stats(100)), 1.0);
    }

    #[test]
    fn test_scorer_for() {
        assert_eq!(scorer_for(ScoringModel::TfIdf).name(), "tf_idf");
        assert_eq!(scorer_for(ScoringModel::Bm25).name(), "bm25");
        assert_eq!(scorer_for(ScoringModel::Constant).name(), "constant");
    }
}
