//! In-memory verse corpus.
//!
//! The corpus is populated once per session and read-only afterwards.
//! Until that happens every lookup comes back empty; callers decide what
//! to show in the meantime.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::types::{BookId, VerseRecord};

/// Ordering key: book, then chapter, then verse.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct VerseKey {
    book: BookId,
    chapter: u32,
    verse: u32,
}

impl VerseKey {
    fn new(book: &BookId, chapter: u32, verse: u32) -> Self {
        Self { book: book.clone(), chapter, verse }
    }
}

#[derive(Debug, Default)]
struct CorpusIndex {
    verses: BTreeMap<VerseKey, VerseRecord>,
}

impl CorpusIndex {
    fn build(records: impl IntoIterator<Item = VerseRecord>) -> Self {
        let mut verses = BTreeMap::new();
        let mut duplicates = 0usize;
        let mut empty = 0usize;

        for record in records {
            if record.text.trim().is_empty() {
                empty += 1;
                continue;
            }
            let key = VerseKey::new(&record.book_id, record.chapter, record.verse);
            if verses.contains_key(&key) {
                duplicates += 1;
                continue;
            }
            verses.insert(key, record);
        }

        if duplicates > 0 {
            tracing::warn!("Discarded {duplicates} duplicate verse addresses while loading corpus");
        }
        if empty > 0 {
            tracing::warn!("Skipped {empty} verse records with empty text");
        }
        tracing::info!("Verse corpus loaded with {} verses", verses.len());

        Self { verses }
    }
}

/// Load-once, read-many verse table.
#[derive(Debug, Default)]
pub struct VerseCorpus {
    index: OnceLock<CorpusIndex>,
}

impl VerseCorpus {
    /// Create an empty, not-yet-loaded corpus.
    pub const fn new() -> Self {
        Self { index: OnceLock::new() }
    }

    /// Create a corpus that is already loaded with `records`.
    pub fn with_records(records: impl IntoIterator<Item = VerseRecord>) -> Self {
        let corpus = Self::new();
        corpus.load_once(records);
        corpus
    }

    /// Populate the corpus from `records` if it has not been populated yet.
    ///
    /// Returns `true` only for the call that performed the load. Later
    /// calls are no-ops and their records are dropped.
    pub fn load_once(&self, records: impl IntoIterator<Item = VerseRecord>) -> bool {
        if self.index.get().is_some() {
            if records.into_iter().next().is_some() {
                tracing::warn!("Verse corpus already loaded; dropping records from redundant load");
            }
            return false;
        }

        let mut populated = false;
        self.index.get_or_init(|| {
            populated = true;
            CorpusIndex::build(records)
        });
        if !populated {
            tracing::warn!("Verse corpus loaded concurrently; dropping records from redundant load");
        }
        populated
    }

    /// Whether the corpus has been populated.
    pub fn is_loaded(&self) -> bool {
        self.index.get().is_some()
    }

    /// Number of verses held (zero before loading).
    pub fn len(&self) -> usize {
        self.index.get().map_or(0, |idx| idx.verses.len())
    }

    /// Whether no verses are available.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Look up a single verse.
    pub fn find_verse(&self, book: &BookId, chapter: u32, verse: u32) -> Option<&VerseRecord> {
        self.index.get()?.verses.get(&VerseKey::new(book, chapter, verse))
    }

    /// Look up verses `start..=end` of a chapter in ascending verse order.
    ///
    /// An inverted range yields nothing.
    pub fn find_range(&self, book: &BookId, chapter: u32, start: u32, end: u32) -> Vec<&VerseRecord> {
        let Some(index) = self.index.get() else {
            return Vec::new();
        };
        if end < start {
            return Vec::new();
        }

        let from = VerseKey::new(book, chapter, start);
        let to = VerseKey::new(book, chapter, end);
        index.verses.range(from..=to).map(|(_, record)| record).collect()
    }
}
