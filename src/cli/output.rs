//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{GlaiveArgs, OutputFormat};
use crate::cli::corpus::StoredFields;
use crate::error::Result;
use crate::expand::Expansion;

/// One expanded term as reported.
#[derive(Debug, Serialize, Deserialize)]
pub struct TermReport {
    pub text: String,
    pub weight: f32,
    pub doc_freq: u64,
}

/// Result structure for the `terms` command.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExpansionReport {
    pub field: String,
    pub kind: String,
    pub scanned: u64,
    pub terms: Vec<TermReport>,
}

impl ExpansionReport {
    /// Summarise an expansion.
    pub fn new(kind: &str, expansion: &Expansion) -> Self {
        ExpansionReport {
            field: expansion.field().to_string(),
            kind: kind.to_string(),
            scanned: expansion.scanned(),
            terms: expansion
                .terms()
                .iter()
                .map(|t| TermReport {
                    text: t.term.text().to_string(),
                    weight: t.weight,
                    doc_freq: t.doc_freq,
                })
                .collect(),
        }
    }
}

/// One hit as reported, with its stored values.
#[derive(Debug, Serialize, Deserialize)]
pub struct HitReport {
    pub doc_id: u64,
    pub score: f32,
    #[serde(skip_serializing_if = "StoredFields::is_empty", default)]
    pub stored: StoredFields,
}

/// Result structure for the `prefix` and `fuzzy` commands.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchReport {
    pub expansion: ExpansionReport,
    pub hits: Vec<HitReport>,
    pub total_hits: u64,
    pub max_score: f32,
    pub duration_ms: u64,
}

/// Human-readable rendering of a result.
pub trait HumanOutput {
    /// Write the result for a reader at the given verbosity.
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()>;
}

impl HumanOutput for ExpansionReport {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        writeln!(out, "Expanded Terms:")?;
        writeln!(out, "═══════════════")?;
        for term in &self.terms {
            writeln!(
                out,
                "{}:{}  (weight {:.3}, {} docs)",
                self.field, term.text, term.weight, term.doc_freq
            )?;
        }
        if verbosity > 0 {
            writeln!(out)?;
            writeln!(
                out,
                "{} expansion accepted {} of {} scanned terms",
                self.kind,
                self.terms.len(),
                self.scanned
            )?;
        }
        Ok(())
    }
}

impl HumanOutput for SearchReport {
    fn write_human(&self, out: &mut dyn Write, verbosity: u8) -> io::Result<()> {
        if verbosity > 1 {
            self.expansion.write_human(out, verbosity)?;
            writeln!(out)?;
        }

        writeln!(out, "Search Results:")?;
        writeln!(out, "═══════════════")?;

        for (i, hit) in self.hits.iter().enumerate() {
            writeln!(out)?;
            writeln!(
                out,
                "Result {}: document {} (Score: {:.3})",
                i + 1,
                hit.doc_id,
                hit.score
            )?;
            if !hit.stored.is_empty() {
                writeln!(out, "─────────────")?;
                for (name, value) in &hit.stored {
                    match value.as_str() {
                        Some(text) => writeln!(out, "{name}: {text}")?,
                        None => writeln!(out, "{name}: {value}")?,
                    }
                }
            }
        }

        writeln!(out)?;
        writeln!(out, "Total hits: {}", self.total_hits)?;
        if verbosity > 0 {
            writeln!(
                out,
                "Expanded to {} terms; search time: {}ms",
                self.expansion.terms.len(),
                self.duration_ms
            )?;
        }
        Ok(())
    }
}

/// Output a result in the selected format.
pub fn output_result<T>(result: &T, args: &GlaiveArgs) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(result, args.output_format, args.pretty, args.verbosity(), &mut out)
}

/// Write a result in `format` to `out`.
pub fn write_result<T>(
    result: &T,
    format: OutputFormat,
    pretty: bool,
    verbosity: u8,
    out: &mut dyn Write,
) -> Result<()>
where
    T: Serialize + HumanOutput,
{
    match format {
        OutputFormat::Human => result.write_human(out, verbosity)?,
        OutputFormat::Json => {
            let json = if pretty {
                serde_json::to_string_pretty(result)?
            } else {
                serde_json::to_string(result)?
            };
            writeln!(out, "{json}")?;
        }
    }
    Ok(())
}
