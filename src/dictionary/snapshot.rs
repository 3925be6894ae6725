//! Snapshot publication for term dictionaries.
//!
//! Readers take an [`Arc`] of the current dictionary and keep it for the
//! whole query, so they observe one immutable view even while a writer
//! publishes a replacement.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;

use crate::dictionary::TermDictionary;

/// Holds the current dictionary snapshot.
#[derive(Debug)]
pub struct DictionarySnapshots {
    current: RwLock<Arc<dyn TermDictionary>>,
    generation: AtomicU64,
}

impl DictionarySnapshots {
    /// Start with `initial` as generation 0.
    pub fn new(initial: Arc<dyn TermDictionary>) -> Self {
        DictionarySnapshots {
            current: RwLock::new(initial),
            generation: AtomicU64::new(0),
        }
    }

    /// The current snapshot.
    pub fn snapshot(&self) -> Arc<dyn TermDictionary> {
        Arc::clone(&*self.current.read())
    }

    /// Replace the current snapshot, returning the previous one.
    ///
    /// Queries already holding the previous snapshot are unaffected.
    pub fn publish(&self, next: Arc<dyn TermDictionary>) -> Arc<dyn TermDictionary> {
        let mut current = self.current.write();
        let previous = std::mem::replace(&mut *current, next);
        let generation = self.generation.fetch_add(1, Ordering::AcqRel) + 1;
        log::debug!("published term dictionary generation {generation}");
        previous
    }

    /// Number of snapshots published after the initial one.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }
}
