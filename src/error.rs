//! Error types for the Glaive library.
//!
//! All fallible operations return [`Result`], whose error type is the
//! [`GlaiveError`] enum. The variants follow the way a query fails:
//!
//! - [`GlaiveError::InvalidParameter`]: rejected before the dictionary is touched.
//! - [`GlaiveError::ExpansionTooBroad`]: the caller may narrow the query and retry.
//! - [`GlaiveError::Cancelled`]: the deadline passed or the query was aborted.
//! - [`GlaiveError::DictionaryUnavailable`]: the term dictionary failed.
//!
//! # Examples
//!
//! ```
//! use glaive::error::{GlaiveError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(GlaiveError::invalid_parameter("min_similarity must be within [0, 1]"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Glaive operations.
#[derive(Error, Debug)]
pub enum GlaiveError {
    /// A query parameter is outside its domain.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// An expansion accepted more terms than allowed.
    #[error("Expansion too broad: more than {limit} terms matched in field '{field}'")]
    ExpansionTooBroad {
        /// The field being expanded.
        field: String,
        /// The configured maximum number of terms.
        limit: usize,
    },

    /// Deadline exceeded or explicit cancellation.
    #[error("Operation cancelled: {0}")]
    Cancelled(String),

    /// The term dictionary collaborator failed.
    #[error("Dictionary unavailable: {0}")]
    DictionaryUnavailable(String),

    /// I/O errors (configuration and corpus files)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with GlaiveError.
pub type Result<T> = std::result::Result<T, GlaiveError>;

impl GlaiveError {
    /// Create a new invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        GlaiveError::InvalidParameter(msg.into())
    }

    /// Create a new expansion-too-broad error.
    pub fn expansion_too_broad<S: Into<String>>(field: S, limit: usize) -> Self {
        GlaiveError::ExpansionTooBroad {
            field: field.into(),
            limit,
        }
    }

    /// Create a new cancelled error.
    pub fn cancelled<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Cancelled(msg.into())
    }

    /// Create a new dictionary error.
    pub fn dictionary<S: Into<String>>(msg: S) -> Self {
        GlaiveError::DictionaryUnavailable(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        GlaiveError::Other(msg.into())
    }

    /// Whether the caller can retry after narrowing the query.
    ///
    /// Only [`GlaiveError::ExpansionTooBroad`] is retryable: raising
    /// `min_similarity` or `prefix_length`, or lengthening a prefix, shrinks
    /// the candidate band. Everything else is fatal to the call.
    pub fn is_retryable(&self) -> bool {
        matches!(self, GlaiveError::ExpansionTooBroad { .. })
    }
}
