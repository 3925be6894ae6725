//! Command Line Interface for Glaive.

pub mod args;
pub mod commands;
pub mod corpus;
pub mod output;

// Re-export commonly used types
pub use args::*;
pub use commands::*;
pub use corpus::*;
pub use output::*;
