//! Trigger-to-citation substitution.
//!
//! Each whitespace keystroke runs through the same short pipeline:
//!
//! 1. the matcher checks whether the keystroke completes a trigger;
//! 2. the book token is resolved; an unknown book stops here and the
//!    document is left untouched;
//! 3. the verse(s) are looked up, falling back to a placeholder when the
//!    corpus is not loaded or the address has no verses;
//! 4. the trigger span is replaced by the citation (plus the delimiter)
//!    in one document edit.
//!
//! There is no retry or pending state. A user who triggered too early
//! simply retypes the reference once the corpus has loaded.

use crate::constants::citation::{CORPUS_NOT_LOADED, VERSE_NOT_FOUND};
use crate::error::Result;
use crate::services::editor::{Document, Inline};
use crate::services::matcher::{self, ReferenceMatch};
use crate::services::scripture::{format_range_text, ScriptureRef, VerseSource};
use crate::types::CitationNode;

/// Why a placeholder was inserted instead of verse text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderReason {
    /// The verse corpus has not been loaded yet.
    CorpusNotLoaded,
    /// The corpus is loaded but has nothing at the requested address.
    VerseNotFound,
}

impl PlaceholderReason {
    /// Diagnostic text shown in place of the verse.
    pub const fn message(self) -> &'static str {
        match self {
            Self::CorpusNotLoaded => CORPUS_NOT_LOADED,
            Self::VerseNotFound => VERSE_NOT_FOUND,
        }
    }
}

/// Outcome of one keystroke.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Substitution {
    /// The keystroke did not complete a trigger.
    NoTrigger,
    /// A trigger was typed but its book name is unknown; nothing changed.
    Unresolved {
        /// The book token as typed.
        book_token: String,
    },
    /// The trigger was replaced with real verse text.
    Inserted(CitationNode),
    /// The trigger was replaced with a placeholder citation.
    Placeholder {
        /// The inserted citation, carrying the diagnostic text.
        citation: CitationNode,
        /// Which diagnostic was used.
        reason: PlaceholderReason,
    },
}

impl Substitution {
    /// Whether the document was edited and the delimiter keystroke consumed.
    ///
    /// When this is `false` the host inserts the keystroke itself.
    pub const fn consumed_input(&self) -> bool {
        matches!(self, Self::Inserted(_) | Self::Placeholder { .. })
    }

    /// The citation that was (or would be) inserted, if any.
    pub const fn citation(&self) -> Option<&CitationNode> {
        match self {
            Self::Inserted(citation) | Self::Placeholder { citation, .. } => Some(citation),
            Self::NoTrigger | Self::Unresolved { .. } => None,
        }
    }
}

enum Lookup {
    NotLoaded,
    NotFound,
    Found(String),
}

/// Turns typed scripture triggers into citations.
#[derive(Debug, Clone)]
pub struct SubstitutionEngine<S> {
    source: S,
}

impl<S: VerseSource> SubstitutionEngine<S> {
    /// Create an engine reading verses from `source`.
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    /// The verse source this engine reads from.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Process a keystroke that is about to be typed at the document cursor.
    ///
    /// On a substitution the keystroke is written after the citation as part
    /// of the same edit; otherwise the document is not touched.
    pub fn handle_keystroke<D: Document + ?Sized>(&self, doc: &mut D, typed: char) -> Result<Substitution> {
        let Some(found) = matcher::match_keystroke(&doc.text_before_cursor(), doc.cursor(), typed) else {
            return Ok(Substitution::NoTrigger);
        };
        self.substitute(doc, &found, typed)
    }

    /// Replace a recognized trigger in `doc`, writing `delimiter` after the citation.
    pub fn substitute<D: Document + ?Sized>(
        &self,
        doc: &mut D,
        found: &ReferenceMatch,
        delimiter: char,
    ) -> Result<Substitution> {
        let outcome = self.resolve_citation(found);
        if let Some(citation) = outcome.citation() {
            doc.replace_range(
                found.trigger_span.clone(),
                vec![Inline::Citation(citation.clone()), Inline::Text(delimiter.to_string())],
            )?;

            if let Substitution::Placeholder { reason, .. } = &outcome {
                tracing::info!("Inserted placeholder for {} ({reason:?})", citation.reference);
            } else {
                tracing::info!("Inserted citation {}", citation.reference);
            }
        }
        Ok(outcome)
    }

    /// Build the citation for a trigger without touching any document.
    pub fn resolve_citation(&self, found: &ReferenceMatch) -> Substitution {
        let Some(reference) = ScriptureRef::resolve(found) else {
            tracing::debug!("Unresolved book name in trigger: {}", found.raw_book_token);
            return Substitution::Unresolved { book_token: found.raw_book_token.clone() };
        };

        let (verse_text, reason) = match self.look_up(&reference) {
            Lookup::Found(text) => (text, None),
            Lookup::NotLoaded => (
                PlaceholderReason::CorpusNotLoaded.message().to_string(),
                Some(PlaceholderReason::CorpusNotLoaded),
            ),
            Lookup::NotFound => (
                PlaceholderReason::VerseNotFound.message().to_string(),
                Some(PlaceholderReason::VerseNotFound),
            ),
        };

        let citation = CitationNode {
            reference: reference.label(),
            book_id: reference.book_id(),
            chapter: reference.chapter,
            start_verse: reference.start_verse,
            end_verse: reference.end_verse,
            verse_text,
        };

        match reason {
            Some(reason) => Substitution::Placeholder { citation, reason },
            None => Substitution::Inserted(citation),
        }
    }

    fn look_up(&self, reference: &ScriptureRef) -> Lookup {
        if !self.source.is_loaded() {
            return Lookup::NotLoaded;
        }
        if !reference.is_addressable() {
            return Lookup::NotFound;
        }

        let book_id = reference.book_id();
        match reference.end_verse {
            None => self
                .source
                .find_verse(&book_id, reference.chapter, reference.start_verse)
                .map_or(Lookup::NotFound, |v| Lookup::Found(v.text.clone())),
            Some(end) => {
                let verses = self
                    .source
                    .find_range(&book_id, reference.chapter, reference.start_verse, end);
                if verses.is_empty() {
                    Lookup::NotFound
                } else {
                    Lookup::Found(format_range_text(&verses))
                }
            }
        }
    }
}
