//! Configuration for expansion and search.
//!
//! All options have defaults, so a configuration file only needs to name
//! the values it changes:
//!
//! ```json
//! {
//!   "expansion": { "min_similarity": 0.7, "max_terms": 256 },
//!   "search": { "top_k": 10, "scoring": "bm25" }
//! }
//! ```

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cancel::Deadline;
use crate::error::{GlaiveError, Result};

/// Default minimum similarity for fuzzy expansion.
pub const DEFAULT_MIN_SIMILARITY: f32 = 0.5;

/// Default required exact prefix length for fuzzy expansion.
pub const DEFAULT_PREFIX_LENGTH: usize = 0;

/// Default maximum number of terms an expansion may produce.
pub const DEFAULT_MAX_TERMS: usize = 1024;

/// Parameters of a term expansion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpansionConfig {
    /// Minimum similarity a fuzzy candidate must reach, within [0, 1].
    pub min_similarity: f32,
    /// Number of leading characters a fuzzy candidate must share with the query.
    pub prefix_length: usize,
    /// Maximum number of accepted terms; more is an error.
    pub max_terms: usize,
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        ExpansionConfig {
            min_similarity: DEFAULT_MIN_SIMILARITY,
            prefix_length: DEFAULT_PREFIX_LENGTH,
            max_terms: DEFAULT_MAX_TERMS,
        }
    }
}

impl ExpansionConfig {
    /// Set the minimum similarity.
    pub fn min_similarity(mut self, min_similarity: f32) -> Self {
        self.min_similarity = min_similarity;
        self
    }

    /// Set the required prefix length.
    pub fn prefix_length(mut self, prefix_length: usize) -> Self {
        self.prefix_length = prefix_length;
        self
    }

    /// Set the maximum number of terms.
    pub fn max_terms(mut self, max_terms: usize) -> Self {
        self.max_terms = max_terms;
        self
    }

    /// Check `max_terms`.
    pub fn validate_max_terms(&self) -> Result<()> {
        if self.max_terms == 0 {
            return Err(GlaiveError::invalid_parameter("max_terms must be at least 1"));
        }
        Ok(())
    }

    /// Check every parameter of a fuzzy expansion of a query `query_len` characters long.
    pub fn validate_fuzzy(&self, query_len: usize) -> Result<()> {
        if !self.min_similarity.is_finite() || !(0.0..=1.0).contains(&self.min_similarity) {
            return Err(GlaiveError::invalid_parameter(format!(
                "min_similarity must be within [0, 1], got {}",
                self.min_similarity
            )));
        }
        if self.prefix_length > query_len {
            return Err(GlaiveError::invalid_parameter(format!(
                "prefix_length {} exceeds query length {query_len}",
                self.prefix_length
            )));
        }
        self.validate_max_terms()
    }
}

/// Which term scoring function to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringModel {
    /// Classic TF-IDF.
    #[default]
    TfIdf,
    /// Okapi BM25.
    Bm25,
    /// Every matching term scores 1.0, so a hit's score is its summed weights.
    Constant,
}

/// Parameters of query execution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of hits; unbounded when `None`.
    pub top_k: Option<usize>,
    /// Time budget per query in milliseconds; none when `None`.
    pub timeout_ms: Option<u64>,
    /// Term scoring function.
    pub scoring: ScoringModel,
}

impl SearchConfig {
    /// Set the hit limit.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the time budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Set the scoring model.
    pub fn scoring(mut self, scoring: ScoringModel) -> Self {
        self.scoring = scoring;
        self
    }

    /// A deadline starting now, from `timeout_ms`.
    pub fn deadline(&self) -> Deadline {
        match self.timeout_ms {
            Some(ms) => Deadline::after(Duration::from_millis(ms)),
            None => Deadline::none(),
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlaiveConfig {
    /// Expansion defaults.
    pub expansion: ExpansionConfig,
    /// Execution defaults.
    pub search: SearchConfig,
}

impl GlaiveConfig {
    /// Parse a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
