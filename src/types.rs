//! Core type definitions for compile-time safety.
//!
//! Book identifiers get a newtype wrapper so they cannot be mixed up with
//! book names or raw user tokens, and citations are a fixed-shape record
//! rather than an open attribute map.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical book identifier (`GEN`, `1SA`, `REV`, ...).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub String);

impl BookId {
    /// Create a new `BookId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the inner string value.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for BookId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BookId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for BookId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for BookId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for BookId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Which half of the canon a book belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Testament {
    /// 구약, Genesis through Malachi.
    Old,
    /// 신약, Matthew through Revelation.
    New,
}

/// One verse of the loaded corpus.
///
/// Field names follow the dataset's JSON shape
/// (`{bookId, bookName, chapter, verse, text}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerseRecord {
    /// Canonical book identifier.
    pub book_id: BookId,
    /// Display name of the book as stored in the dataset.
    pub book_name: String,
    /// Chapter number (1-based).
    pub chapter: u32,
    /// Verse number (1-based).
    pub verse: u32,
    /// Verse text.
    pub text: String,
}

/// A structured citation inserted into the document in place of a trigger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CitationNode {
    /// Human-readable label, e.g. `창세기 1:1` or `창세기 1:1-4`.
    pub reference: String,
    /// Resolved book identifier.
    pub book_id: BookId,
    /// Chapter number as typed.
    pub chapter: u32,
    /// First verse as typed.
    pub start_verse: u32,
    /// Last verse as typed, only for range citations.
    pub end_verse: Option<u32>,
    /// Verse text, or a diagnostic placeholder when no data was available.
    pub verse_text: String,
}

impl CitationNode {
    /// Whether this citation covers a verse range.
    pub const fn is_range(&self) -> bool {
        self.end_verse.is_some()
    }

    /// Plain-text rendering used when the host cannot show structured content.
    pub fn plain_text(&self) -> String {
        format!("[{}] {}", self.reference, self.verse_text)
    }
}

impl fmt::Display for CitationNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.reference, self.verse_text)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn verse_record_reads_dataset_shape() {
        let json = r#"{"bookId":"GEN","bookName":"창세기","chapter":1,"verse":1,"text":"태초에"}"#;
        let record: VerseRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.book_id, "GEN");
        assert_eq!(record.book_name, "창세기");
        assert_eq!(record.chapter, 1);
        assert_eq!(record.verse, 1);
    }

    #[test]
    fn citation_serializes_with_camel_case_attributes() {
        let node = CitationNode {
            reference: "창세기 1:1-2".to_string(),
            book_id: BookId::new("GEN"),
            chapter: 1,
            start_verse: 1,
            end_verse: Some(2),
            verse_text: "1. a 2. b".to_string(),
        };
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["bookId"], "GEN");
        assert_eq!(value["startVerse"], 1);
        assert_eq!(value["endVerse"], 2);
        assert_eq!(value["verseText"], "1. a 2. b");
        assert!(node.is_range());
    }

    #[test]
    fn citation_plain_text() {
        let node = CitationNode {
            reference: "요한복음 3:16".to_string(),
            book_id: BookId::new("JHN"),
            chapter: 3,
            start_verse: 16,
            end_verse: None,
            verse_text: "하나님이 세상을".to_string(),
        };
        assert_eq!(node.plain_text(), "[요한복음 3:16] 하나님이 세상을");
        assert_eq!(node.to_string(), node.plain_text());
        assert!(!node.is_range());
    }
}
