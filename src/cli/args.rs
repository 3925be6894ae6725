//! Command line argument parsing for the Glaive CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Glaive - query expansion and approximate term matching
#[derive(Parser, Debug, Clone)]
#[command(name = "glaive")]
#[command(about = "Expand prefix and fuzzy queries over a term dictionary and rank the matches")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GlaiveArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl GlaiveArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Search for documents containing terms that start with a prefix
    Prefix(PrefixArgs),

    /// Search for documents containing terms similar to a word
    Fuzzy(FuzzyArgs),

    /// Show the terms a query expands to, without searching
    Terms(TermsArgs),
}

/// Corpus and field shared by every command
#[derive(Args, Debug, Clone)]
pub struct CorpusArgs {
    /// Corpus file (JSON lines, one document per line)
    #[arg(value_name = "CORPUS")]
    pub corpus: PathBuf,

    /// Field to expand and search in
    #[arg(long)]
    pub field: String,
}

/// Arguments for prefix search
#[derive(Parser, Debug, Clone)]
pub struct PrefixArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Literal term prefix
    #[arg(value_name = "PREFIX")]
    pub prefix: String,

    /// Maximum number of expanded terms
    #[arg(long)]
    pub max_terms: Option<usize>,

    /// Maximum number of hits to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,
}

/// Arguments for fuzzy search
#[derive(Parser, Debug, Clone)]
pub struct FuzzyArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Possibly misspelled word
    #[arg(value_name = "TEXT")]
    pub text: String,

    #[command(flatten)]
    pub fuzzy: FuzzyOptions,

    /// Maximum number of hits to return
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Time budget in milliseconds
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

/// Expansion options; unset values come from the configuration
#[derive(Args, Debug, Clone, Default)]
pub struct FuzzyOptions {
    /// Minimum similarity within [0, 1]
    #[arg(short = 's', long)]
    pub min_similarity: Option<f32>,

    /// Number of leading characters that must match exactly
    #[arg(short = 'p', long)]
    pub prefix_length: Option<usize>,

    /// Maximum number of expanded terms
    #[arg(long)]
    pub max_terms: Option<usize>,
}

/// Arguments for showing an expansion
#[derive(Parser, Debug, Clone)]
pub struct TermsArgs {
    #[command(flatten)]
    pub corpus: CorpusArgs,

    /// Query text
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Kind of expansion
    #[arg(short, long, default_value = "prefix")]
    pub mode: ExpansionMode,

    #[command(flatten)]
    pub fuzzy: FuzzyOptions,
}

/// Kinds of expansion selectable from the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpansionMode {
    /// The term itself
    Exact,
    /// Terms starting with the text
    Prefix,
    /// Terms similar to the text
    Fuzzy,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
