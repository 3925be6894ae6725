//! Bounded, monotonic enumeration of dictionary terms.
//!
//! A [`TermEnumerator`] is an owned cursor over one field of a
//! [`TermDictionary`], restricted to a [`TermRange`]. Each call to
//! [`advance`](TermEnumerator::advance) yields a term strictly greater than
//! the previous one, or signals the end of the range. The enumerator is
//! closed explicitly with [`close`](TermEnumerator::close) and implicitly when
//! dropped, so every exit path of the code that opened it releases the
//! cursor.

use crate::dictionary::{TermCursor, TermDictionary};
use crate::error::{GlaiveError, Result};
use crate::term::TermEntry;

/// The lexicographic range an enumerator is allowed to visit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TermRange {
    /// Every term greater than or equal to the start, up to the end of the field.
    From(String),
    /// The contiguous band of terms starting with the prefix.
    Prefix(String),
}

impl TermRange {
    /// The term text the scan seeks to.
    pub fn start(&self) -> &str {
        match self {
            TermRange::From(start) => start,
            TermRange::Prefix(prefix) => prefix,
        }
    }

    /// Whether `text` lies inside the range.
    pub fn contains(&self, text: &str) -> bool {
        match self {
            TermRange::From(start) => text >= start.as_str(),
            TermRange::Prefix(prefix) => text.starts_with(prefix.as_str()),
        }
    }
}

/// An owned cursor over a range of one field's terms.
#[derive(Debug)]
pub struct TermEnumerator<'d> {
    dictionary: &'d dyn TermDictionary,
    field: String,
    range: TermRange,
    /// `None` once closed.
    cursor: Option<TermCursor>,
    last: Option<String>,
    scanned: u64,
}

impl<'d> TermEnumerator<'d> {
    /// Open an enumerator positioned at the first term of `field` inside `range`.
    pub fn open(dictionary: &'d dyn TermDictionary, field: &str, range: TermRange) -> Result<Self> {
        let cursor = dictionary.seek(field, range.start())?;
        log::trace!("opened term enumerator on '{field}' at {:?}", range);

        Ok(TermEnumerator {
            dictionary,
            field: field.to_string(),
            range,
            cursor: Some(cursor),
            last: None,
            scanned: 0,
        })
    }

    /// Open an enumerator over every term of `field` greater than or equal to `start`.
    pub fn open_from(dictionary: &'d dyn TermDictionary, field: &str, start: &str) -> Result<Self> {
        Self::open(dictionary, field, TermRange::From(start.to_string()))
    }

    /// Yield the next term of the range.
    ///
    /// Returns `None` at the end of the range and on every call after it.
    /// The enumerator closes itself on end of range and on error.
    pub fn advance(&mut self) -> Result<Option<TermEntry>> {
        let result = self.step();
        match &result {
            Ok(Some(_)) => {}
            Ok(None) | Err(_) => self.close(),
        }
        result
    }

    fn step(&mut self) -> Result<Option<TermEntry>> {
        let Some(cursor) = self.cursor.as_mut() else {
            return Ok(None);
        };

        let Some(entry) = self.dictionary.next(cursor)? else {
            return Ok(None);
        };
        self.scanned += 1;

        if entry.term.field() != self.field {
            return Err(GlaiveError::dictionary(format!(
                "scan of field '{}' returned term {}",
                self.field, entry.term
            )));
        }

        let text = entry.term.text();
        if let Some(last) = &self.last
            && text <= last.as_str()
        {
            return Err(GlaiveError::dictionary(format!(
                "term dictionary out of order: '{text}' after '{last}' in field '{}'",
                self.field
            )));
        }

        if !self.range.contains(text) {
            // A prefix band ends at the first term past it. Anything else
            // outside the range means the seek landed too early.
            return match self.range {
                TermRange::Prefix(_) if text > self.range.start() => Ok(None),
                _ => Err(GlaiveError::dictionary(format!(
                    "seek for '{}' in field '{}' returned '{text}'",
                    self.range.start(),
                    self.field
                ))),
            };
        }

        self.last = Some(text.to_string());
        Ok(Some(entry))
    }

    /// Release the underlying cursor. Idempotent.
    pub fn close(&mut self) {
        if self.cursor.take().is_some() {
            log::trace!(
                "closed term enumerator on '{}' after {} terms",
                self.field,
                self.scanned
            );
        }
    }

    /// Whether the enumerator still holds its cursor.
    pub fn is_open(&self) -> bool {
        self.cursor.is_some()
    }

    /// Number of dictionary entries read so far.
    pub fn scanned(&self) -> u64 {
        self.scanned
    }

    /// The field being enumerated.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Drop for TermEnumerator<'_> {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{
        FieldStats, MemoryTermDictionary, MemoryTermDictionaryBuilder, PostingIterator,
    };
    use crate::term::{PostingHandle, Term};

    fn build_dict() -> MemoryTermDictionary {
        let mut builder = MemoryTermDictionaryBuilder::new();
        for (doc, text) in ["/Computers", "/Computers/Mac", "/Computers/Windows", "/Games"]
            .iter()
            .enumerate()
        {
            builder.add_term(doc as u64, "category", text, 1).unwrap();
        }
        builder.build()
    }

    fn collect(mut terms: TermEnumerator<'_>) -> Vec<String> {
        let mut out = Vec::new();
        while let Some(entry) = terms.advance().unwrap() {
            out.push(entry.term.text().to_string());
        }
        assert!(!terms.is_open());
        out
    }

    #[test]
    fn test_prefix_range_stops_at_band_end() {
        let dict = build_dict();
        let terms = TermEnumerator::open(
            &dict,
            "category",
            TermRange::Prefix("/Computers".to_string()),
        )
        .unwrap();
        assert_eq!(
            collect(terms),
            vec!["/Computers", "/Computers/Mac", "/Computers/Windows"]
        );
    }

    #[test]
    fn test_from_range_runs_to_field_end() {
        let dict = build_dict();
        let terms = TermEnumerator::open_from(&dict, "category", "/Computers/N").unwrap();
        assert_eq!(collect(terms), vec!["/Computers/Windows", "/Games"]);
    }

    #[test]
    fn test_advance_after_end_keeps_returning_none() {
        let dict = build_dict();
        let mut terms =
            TermEnumerator::open(&dict, "category", TermRange::Prefix("/G".to_string())).unwrap();
        assert!(terms.advance().unwrap().is_some());
        assert!(terms.advance().unwrap().is_none());
        assert!(terms.advance().unwrap().is_none());
        assert_eq!(terms.scanned(), 1);
    }

    #[test]
    fn test_explicit_close() {
        let dict = build_dict();
        let mut terms = TermEnumerator::open_from(&dict, "category", "").unwrap();
        assert!(terms.is_open());
        terms.close();
        terms.close();
        assert!(!terms.is_open());
        assert!(terms.advance().unwrap().is_none());
    }

    /// Yields its terms in the stored order, whatever that is.
    #[derive(Debug)]
    struct UnsortedDictionary {
        terms: Vec<&'static str>,
    }

    impl TermDictionary for UnsortedDictionary {
        fn seek(&self, field: &str, _text: &str) -> Result<TermCursor> {
            Ok(TermCursor::new(field, 0))
        }

        fn next(&self, cursor: &mut TermCursor) -> Result<Option<TermEntry>> {
            let position = cursor.position() as usize;
            let Some(text) = self.terms.get(position) else {
                return Ok(None);
            };
            cursor.set_position(position as u64 + 1);
            Ok(Some(TermEntry::new(
                Term::new(cursor.field(), *text),
                1,
                PostingHandle::new(position as u64),
            )))
        }

        fn postings(&self, _handle: PostingHandle) -> Result<Box<dyn PostingIterator + '_>> {
            Err(GlaiveError::dictionary("no postings"))
        }

        fn field_stats(&self, _field: &str) -> Result<Option<FieldStats>> {
            Ok(None)
        }
    }

    #[test]
    fn test_out_of_order_dictionary_is_reported_and_closes() {
        let dict = UnsortedDictionary {
            terms: vec!["b", "a"],
        };
        let mut terms = TermEnumerator::open_from(&dict, "f", "").unwrap();
        assert!(terms.advance().unwrap().is_some());

        let err = terms.advance().unwrap_err();
        assert!(matches!(err, GlaiveError::DictionaryUnavailable(_)));
        assert!(!terms.is_open());
    }

    #[test]
    fn test_early_seek_is_reported() {
        let dict = UnsortedDictionary {
            terms: vec!["a", "m"],
        };
        let mut terms = TermEnumerator::open_from(&dict, "f", "c").unwrap();
        assert!(matches!(
            terms.advance(),
            Err(GlaiveError::DictionaryUnavailable(_))
        ));
    }
}
