//! Scripture lookup seam and citation formatting.
//!
//! [`VerseSource`] is what the substitution engine reads verses from; the
//! session's [`VerseCorpus`] is the usual implementation, but tests and
//! other hosts can supply their own.

use std::sync::Arc;

use crate::bible::books::{resolve_book, BookDescriptor};
use crate::bible::corpus::VerseCorpus;
use crate::constants::citation::RANGE_VERSE_SEPARATOR;
use crate::services::matcher::ReferenceMatch;
use crate::types::{BookId, VerseRecord};

/// Read-only verse lookup.
pub trait VerseSource {
    /// Whether verse data is available yet.
    fn is_loaded(&self) -> bool;

    /// Look up one verse.
    fn find_verse(&self, book: &BookId, chapter: u32, verse: u32) -> Option<&VerseRecord>;

    /// Look up `start..=end` in ascending verse order.
    fn find_range(&self, book: &BookId, chapter: u32, start: u32, end: u32) -> Vec<&VerseRecord>;
}

impl VerseSource for VerseCorpus {
    fn is_loaded(&self) -> bool {
        Self::is_loaded(self)
    }

    fn find_verse(&self, book: &BookId, chapter: u32, verse: u32) -> Option<&VerseRecord> {
        Self::find_verse(self, book, chapter, verse)
    }

    fn find_range(&self, book: &BookId, chapter: u32, start: u32, end: u32) -> Vec<&VerseRecord> {
        Self::find_range(self, book, chapter, start, end)
    }
}

impl<T: VerseSource + ?Sized> VerseSource for Arc<T> {
    fn is_loaded(&self) -> bool {
        (**self).is_loaded()
    }

    fn find_verse(&self, book: &BookId, chapter: u32, verse: u32) -> Option<&VerseRecord> {
        (**self).find_verse(book, chapter, verse)
    }

    fn find_range(&self, book: &BookId, chapter: u32, start: u32, end: u32) -> Vec<&VerseRecord> {
        (**self).find_range(book, chapter, start, end)
    }
}

/// A trigger whose book token resolved to a canonical book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptureRef {
    /// The resolved book.
    pub book: &'static BookDescriptor,
    /// Chapter number.
    pub chapter: u32,
    /// Starting verse.
    pub start_verse: u32,
    /// Ending verse, for ranges only.
    pub end_verse: Option<u32>,
}

impl ScriptureRef {
    /// Resolve the book token of a trigger. `None` if the book is unknown.
    pub fn resolve(found: &ReferenceMatch) -> Option<Self> {
        let book = resolve_book(&found.raw_book_token)?;
        Some(Self {
            book,
            chapter: found.chapter,
            start_verse: found.start_verse,
            end_verse: found.end_verse,
        })
    }

    /// Identifier of the resolved book.
    pub fn book_id(&self) -> BookId {
        self.book.book_id()
    }

    /// Format as a display label (e.g. "창세기 1:1-5").
    pub fn label(&self) -> String {
        match self.end_verse {
            Some(end) => format!("{} {}:{}-{}", self.book.name, self.chapter, self.start_verse, end),
            None => format!("{} {}:{}", self.book.name, self.chapter, self.start_verse),
        }
    }

    /// Whether the address can exist at all: the chapter is within the
    /// book and a range does not run backwards.
    pub fn is_addressable(&self) -> bool {
        self.book.has_chapter(self.chapter)
            && self.end_verse.is_none_or(|end| end >= self.start_verse)
    }
}

/// Join range verses as `"<n>. <text>"`, separated by single spaces.
pub fn format_range_text(verses: &[&VerseRecord]) -> String {
    verses
        .iter()
        .map(|v| format!("{}{}{}", v.verse, RANGE_VERSE_SEPARATOR, v.text))
        .collect::<Vec<_>>()
        .join(" ")
}
