//! Scripture trigger recognition.
//!
//! Two trigger forms are recognized while typing, each completed by a
//! whitespace keystroke:
//!
//! - single verse: `/창1:1`
//! - verse range: `/창1:1-4`
//!
//! The book token must be Hangul syllables; anything else simply does not
//! match, since the user is most likely writing ordinary text.

use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Regex matching a single-verse trigger at the end of the text.
#[allow(clippy::expect_used)]
static RE_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/([가-힣]+)([0-9]+):([0-9]+)\s$").expect("valid regex: RE_SINGLE")
});

/// Regex matching a verse-range trigger at the end of the text.
#[allow(clippy::expect_used)]
static RE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/([가-힣]+)([0-9]+):([0-9]+)-([0-9]+)\s$").expect("valid regex: RE_RANGE")
});

/// A recognized trigger and the fields captured from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceMatch {
    /// Book name or abbreviation as typed.
    pub raw_book_token: String,
    /// Chapter number.
    pub chapter: u32,
    /// First (or only) verse.
    pub start_verse: u32,
    /// Last verse, present only for range triggers.
    pub end_verse: Option<u32>,
    /// Document positions from the leading `/` up to, not including, the
    /// terminating whitespace.
    pub trigger_span: Range<usize>,
}

impl ReferenceMatch {
    /// Whether this is a range trigger.
    pub const fn is_range(&self) -> bool {
        self.end_verse.is_some()
    }
}

/// Check whether typing `typed` at `cursor` completes a trigger.
///
/// `text_before` is the document text immediately before the cursor (as
/// returned by [`Document::text_before_cursor`](crate::services::editor::Document::text_before_cursor)).
/// The returned span is expressed in document positions.
pub fn match_keystroke(text_before: &str, cursor: usize, typed: char) -> Option<ReferenceMatch> {
    if !typed.is_whitespace() {
        return None;
    }

    let mut candidate = String::with_capacity(text_before.len() + typed.len_utf8());
    candidate.push_str(text_before);
    candidate.push(typed);

    let found = match_text(&candidate)?;
    let origin = cursor.checked_sub(text_before.chars().count())?;
    Some(ReferenceMatch {
        trigger_span: origin + found.trigger_span.start..origin + found.trigger_span.end,
        ..found
    })
}

/// Match a trigger (including its terminating whitespace) at the end of `text`.
///
/// The returned span is in character offsets within `text`.
pub fn match_text(text: &str) -> Option<ReferenceMatch> {
    if let Some(caps) = RE_RANGE.captures(text) {
        return from_captures(text, &caps, true);
    }
    RE_SINGLE
        .captures(text)
        .and_then(|caps| from_captures(text, &caps, false))
}

fn from_captures(text: &str, caps: &Captures<'_>, is_range: bool) -> Option<ReferenceMatch> {
    let whole = caps.get(0)?;
    let raw_book_token = caps.get(1)?.as_str().to_string();
    let chapter = caps.get(2)?.as_str().parse::<u32>().ok()?;
    let start_verse = caps.get(3)?.as_str().parse::<u32>().ok()?;
    let end_verse = if is_range {
        Some(caps.get(4)?.as_str().parse::<u32>().ok()?)
    } else {
        None
    };

    // The match ends with exactly one whitespace character, which is not
    // part of the span.
    let start = text[..whole.start()].chars().count();
    let end = start + whole.as_str().chars().count() - 1;

    tracing::debug!(book = %raw_book_token, chapter, start_verse, ?end_verse, "scripture trigger matched");

    Some(ReferenceMatch {
        raw_book_token,
        chapter,
        start_verse,
        end_verse,
        trigger_span: start..end,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn single_verse_trigger() {
        let m = match_keystroke("/창1:1", 5, ' ').unwrap();
        assert_eq!(m.raw_book_token, "창");
        assert_eq!(m.chapter, 1);
        assert_eq!(m.start_verse, 1);
        assert_eq!(m.end_verse, None);
        assert_eq!(m.trigger_span, 0..5);
        assert!(!m.is_range());
    }

    #[test]
    fn range_trigger() {
        let m = match_keystroke("/창1:1-4", 7, ' ').unwrap();
        assert_eq!(m.raw_book_token, "창");
        assert_eq!(m.start_verse, 1);
        assert_eq!(m.end_verse, Some(4));
        assert_eq!(m.trigger_span, 0..7);
        assert!(m.is_range());
    }

    #[test]
    fn full_book_name_and_multi_digit_fields() {
        let m = match_keystroke("/고린도전서13:4-7", 12, ' ').unwrap();
        assert_eq!(m.raw_book_token, "고린도전서");
        assert_eq!(m.chapter, 13);
        assert_eq!(m.start_verse, 4);
        assert_eq!(m.end_verse, Some(7));
    }

    #[test]
    fn span_is_offset_by_preceding_text() {
        let text = "오늘 본문은 /요3:16";
        let cursor = 100;
        let m = match_keystroke(text, cursor, ' ').unwrap();
        let origin = cursor - text.chars().count();
        assert_eq!(m.trigger_span, origin + 7..cursor);
    }

    #[test]
    fn requires_whitespace_keystroke() {
        assert!(match_keystroke("/창1:1", 5, '2').is_none());
        assert!(match_keystroke("/창1:1", 5, '.').is_none());
        assert!(match_keystroke("/창1:1", 5, '\t').is_some());
    }

    #[test]
    fn incomplete_triggers_do_not_fire() {
        assert!(match_keystroke("/창1", 3, ' ').is_none());
        assert!(match_keystroke("/창1:", 4, ' ').is_none());
        assert!(match_keystroke("/창1:1-", 6, ' ').is_none());
        assert!(match_keystroke("창1:1", 4, ' ').is_none());
        assert!(match_keystroke("/1:1", 4, ' ').is_none());
    }

    #[test]
    fn non_hangul_book_token_does_not_fire() {
        assert!(match_keystroke("/Gen1:1", 7, ' ').is_none());
        assert!(match_keystroke("/ㅊ1:1", 5, ' ').is_none());
        assert!(match_keystroke("/창 1:1", 6, ' ').is_none());
    }

    #[test]
    fn trigger_must_end_at_cursor() {
        assert!(match_keystroke("/창1:1 이어서", 9, ' ').is_none());
    }

    #[test]
    fn citation_placeholder_breaks_a_trigger() {
        assert!(match_keystroke("/창\u{FFFC}1:1", 6, ' ').is_none());
    }

    #[test]
    fn overflowing_numbers_do_not_fire() {
        assert!(match_keystroke("/창99999999999:1", 15, ' ').is_none());
    }

    #[test]
    fn later_slash_wins_over_earlier_text() {
        let m = match_text("a/b //시23:1 ").unwrap();
        assert_eq!(m.raw_book_token, "시");
        assert_eq!(m.trigger_span, 5..11);
    }

    #[test]
    fn cursor_smaller_than_text_is_rejected() {
        assert!(match_keystroke("/창1:1", 2, ' ').is_none());
    }
}
