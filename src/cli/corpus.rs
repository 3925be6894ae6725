//! Loading a JSON-lines corpus into a term dictionary.
//!
//! Each non-empty line is one document:
//!
//! ```json
//! {"id": 0, "fields": {"category": ["/Computers"]}, "stored": {"title": "Macs"}}
//! ```
//!
//! Field arrays hold already-analysed terms. Stored values are kept only for
//! printing hits.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::dictionary::{MemoryTermDictionary, MemoryTermDictionaryBuilder};
use crate::error::{GlaiveError, Result};

/// Stored values of one document, by name.
pub type StoredFields = BTreeMap<String, serde_json::Value>;

/// One line of a corpus file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Document id.
    pub id: u64,
    /// Analysed terms per field.
    #[serde(default)]
    pub fields: BTreeMap<String, Vec<String>>,
    /// Values shown with hits.
    #[serde(default)]
    pub stored: StoredFields,
}

/// A loaded corpus.
#[derive(Debug)]
pub struct Corpus {
    dictionary: MemoryTermDictionary,
    stored: AHashMap<u64, StoredFields>,
    document_count: usize,
}

impl Corpus {
    /// Load a corpus file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let corpus = Self::from_reader(BufReader::new(file))?;
        log::info!(
            "loaded {} documents from {}",
            corpus.document_count,
            path.as_ref().display()
        );
        Ok(corpus)
    }

    /// Read a corpus from JSON lines.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut builder = MemoryTermDictionaryBuilder::new();
        let mut stored = AHashMap::new();
        let mut document_count = 0;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let document: CorpusDocument = serde_json::from_str(&line).map_err(|e| {
                GlaiveError::other(format!("corpus line {}: {e}", index + 1))
            })?;
            if stored.contains_key(&document.id) {
                return Err(GlaiveError::other(format!(
                    "corpus line {}: duplicate document id {}",
                    index + 1,
                    document.id
                )));
            }

            for (field, terms) in &document.fields {
                builder.add_document(document.id, field, terms)?;
            }
            stored.insert(document.id, document.stored);
            document_count += 1;
        }

        Ok(Corpus {
            dictionary: builder.build(),
            stored,
            document_count,
        })
    }

    /// The term dictionary built from the corpus.
    pub fn dictionary(&self) -> &MemoryTermDictionary {
        &self.dictionary
    }

    /// Split into the dictionary and the stored values.
    pub fn into_parts(self) -> (MemoryTermDictionary, AHashMap<u64, StoredFields>) {
        (self.dictionary, self.stored)
    }

    /// Stored values of a document.
    pub fn stored(&self, doc_id: u64) -> Option<&StoredFields> {
        self.stored.get(&doc_id)
    }

    /// Number of documents.
    pub fn document_count(&self) -> usize {
        self.document_count
    }
}
