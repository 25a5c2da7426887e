//! Application constants.
//!
//! Centralizes magic numbers and user-facing strings for better maintainability.

/// Citation text constants.
pub mod citation {
    /// Verse text inserted when the verse corpus has not finished loading.
    pub const CORPUS_NOT_LOADED: &str =
        "성경 데이터를 아직 불러오지 못했습니다. 잠시 후 다시 입력해 주세요.";

    /// Verse text inserted when the book resolved but no verse exists at the address.
    pub const VERSE_NOT_FOUND: &str = "해당 구절을 찾을 수 없습니다.";

    /// Separator between a verse number and its text in a range citation.
    pub const RANGE_VERSE_SEPARATOR: &str = ". ";
}

/// Editor / matcher constants.
pub mod editor {
    /// Maximum number of characters before the cursor the matcher looks at.
    pub const MAX_TEXT_BEFORE: usize = 500;

    /// Stand-in character for a citation atom in the plain-text view.
    pub const OBJECT_REPLACEMENT: char = '\u{FFFC}';

    /// Maximum number of undo steps retained.
    pub const MAX_UNDO_DEPTH: usize = 200;
}

/// Corpus loading constants.
pub mod corpus {
    /// Application data sub-directory.
    pub const DATA_DIR_NAME: &str = "holyref";

    /// Default dataset file name inside the data directory.
    pub const DEFAULT_DATA_FILE: &str = "bible-data.json";

    /// Default HTTP timeout for fetching the dataset.
    pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 10;
}
