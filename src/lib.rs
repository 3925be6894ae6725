//! # Glaive
//!
//! Query expansion and approximate term matching for full-text search.
//!
//! ## Features
//!
//! - Prefix expansion over a sorted term dictionary
//! - Fuzzy expansion by Levenshtein similarity with prefix-band pruning
//! - Weighted disjunction of posting lists with pluggable term scoring
//! - Top-K collection with deterministic tie-breaking
//! - Deadlines and cancellation for long-running queries
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use glaive::prelude::*;
//!
//! let mut builder = MemoryTermDictionaryBuilder::new();
//! builder.add_document(0, "text", ["aaaaa"]).unwrap();
//! builder.add_document(1, "text", ["aaaab"]).unwrap();
//! builder.add_document(2, "text", ["bbbbb"]).unwrap();
//!
//! let searcher = Searcher::new(Arc::new(builder.build()), GlaiveConfig::default());
//! let expander = Expander::from(FuzzyExpander::new("text", "aaaaa"));
//! let results = searcher.search(&expander, Some(10), &Deadline::none()).unwrap();
//!
//! assert_eq!(results.total_hits, 2);
//! assert_eq!(results.hits[0].doc_id, 0);
//! ```

pub mod cancel;
pub mod cli;
pub mod config;
pub mod dictionary;
pub mod enumerator;
pub mod error;
pub mod expand;
pub mod levenshtein;
pub mod search;
pub mod term;

pub mod prelude {
    pub use crate::cancel::{CancellationToken, Deadline};
    pub use crate::config::{ExpansionConfig, GlaiveConfig, ScoringModel, SearchConfig};
    pub use crate::dictionary::{
        DictionarySnapshots, MemoryTermDictionary, MemoryTermDictionaryBuilder, TermDictionary,
    };
    pub use crate::error::{GlaiveError, Result};
    pub use crate::expand::{
        ExactExpander, ExpandedTerm, Expander, Expansion, FuzzyExpander, PrefixExpander,
    };
    pub use crate::search::{ScoredHit, SearchResults, Searcher};
    pub use crate::term::Term;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
