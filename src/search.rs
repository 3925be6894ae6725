//! Query execution over expanded terms.
//!
//! [`WeightedUnion`] merges the posting lists of an expansion,
//! a [`TermScorer`] rates each matching term, and a [`Collector`] ranks the
//! documents. [`Searcher`] ties these together with the expanders.

pub mod collector;
pub mod scoring;
pub mod searcher;
pub mod union;

pub use self::collector::{AllDocsCollector, Collector, ScoredHit, TopDocsCollector};
pub use self::scoring::{Bm25Scorer, ConstantScorer, TermScorer, TfIdfScorer};
pub use self::searcher::{SearchResults, Searcher};
pub use self::union::{DocMatch, TermMatch, WeightedUnion};
