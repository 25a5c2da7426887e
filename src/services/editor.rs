//! Document model contract and an in-memory sermon document.
//!
//! The substitution engine only needs three things from a document: the
//! cursor, the text just before it, and an atomic "replace this range with
//! that content" edit. [`Document`] captures that contract so the engine can
//! be tested independently of any UI; [`SermonDocument`] is the
//! implementation used by the terminal editor.

use std::ops::Range;

use crate::constants::editor::{MAX_TEXT_BEFORE, MAX_UNDO_DEPTH, OBJECT_REPLACEMENT};
use crate::error::{Error, Result};
use crate::types::CitationNode;

/// Inline content that can be written into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    /// Plain text.
    Text(String),
    /// A structured verse citation.
    Citation(CitationNode),
}

/// Operations the substitution engine needs from a document.
///
/// Positions count characters, with every citation occupying exactly one
/// position.
pub trait Document {
    /// Current cursor position.
    fn cursor(&self) -> usize;

    /// Text of the current paragraph up to the cursor.
    ///
    /// Citations appear as U+FFFC so that no trigger can span across one.
    fn text_before_cursor(&self) -> String;

    /// Replace `range` with `content` as a single undoable edit, leaving the
    /// cursor after the inserted content.
    fn replace_range(&mut self, range: Range<usize>, content: Vec<Inline>) -> Result<()>;

    /// Insert text at the cursor.
    fn insert_text(&mut self, text: &str) -> Result<()> {
        let at = self.cursor();
        self.replace_range(at..at, vec![Inline::Text(text.to_string())])
    }
}

/// One position in a [`SermonDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// A single character (`'\n'` separates paragraphs).
    Char(char),
    /// A citation node.
    Citation(CitationNode),
}

#[derive(Debug, Clone)]
struct Snapshot {
    atoms: Vec<Atom>,
    cursor: usize,
}

/// In-memory document with snapshot-based undo/redo.
#[derive(Debug, Clone, Default)]
pub struct SermonDocument {
    atoms: Vec<Atom>,
    cursor: usize,
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl SermonDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `text`, cursor at the end, no history.
    pub fn from_text(text: &str) -> Self {
        let atoms: Vec<Atom> = text.chars().map(Atom::Char).collect();
        let cursor = atoms.len();
        Self { atoms, cursor, ..Self::default() }
    }

    /// Number of positions in the document.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the document has no content.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Raw document content.
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Move the cursor, clamped to the document bounds.
    pub fn set_cursor(&mut self, position: usize) {
        self.cursor = position.min(self.atoms.len());
    }

    /// Insert a single character at the cursor.
    pub fn insert_char(&mut self, c: char) -> Result<()> {
        let at = self.cursor;
        self.replace_range(at..at, vec![Inline::Text(c.to_string())])
    }

    /// Delete the position before the cursor (backspace). Returns whether anything changed.
    pub fn delete_backward(&mut self) -> Result<bool> {
        if self.cursor == 0 {
            return Ok(false);
        }
        let at = self.cursor;
        self.replace_range(at - 1..at, Vec::new())?;
        Ok(true)
    }

    /// Delete the position at the cursor (delete). Returns whether anything changed.
    pub fn delete_forward(&mut self) -> Result<bool> {
        if self.cursor >= self.atoms.len() {
            return Ok(false);
        }
        let at = self.cursor;
        self.replace_range(at..at + 1, Vec::new())?;
        Ok(true)
    }

    /// Move the cursor one position left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move the cursor one position right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.atoms.len());
    }

    /// Move the cursor to the start of its paragraph.
    pub fn move_home(&mut self) {
        self.cursor = self.paragraph_start();
    }

    /// Move the cursor to the end of its paragraph.
    pub fn move_end(&mut self) {
        self.cursor = self.atoms[self.cursor..]
            .iter()
            .position(|a| *a == Atom::Char('\n'))
            .map_or(self.atoms.len(), |offset| self.cursor + offset);
    }

    /// Undo the last edit. Returns whether there was one.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo_stack.pop() else {
            return false;
        };
        self.redo_stack.push(self.snapshot());
        self.restore(previous);
        true
    }

    /// Redo the last undone edit. Returns whether there was one.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo_stack.pop() else {
            return false;
        };
        self.undo_stack.push(self.snapshot());
        self.restore(next);
        true
    }

    /// Whether an undo step is available.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Whether a redo step is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Plain-text rendering with citations expanded to `[reference] text`.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for atom in &self.atoms {
            match atom {
                Atom::Char(c) => out.push(*c),
                Atom::Citation(node) => out.push_str(&node.plain_text()),
            }
        }
        out
    }

    /// Citations in document order.
    pub fn citations(&self) -> impl Iterator<Item = &CitationNode> {
        self.atoms.iter().filter_map(|a| match a {
            Atom::Citation(node) => Some(node),
            Atom::Char(_) => None,
        })
    }

    /// Paragraphs as slices of atoms (newlines excluded).
    pub fn lines(&self) -> Vec<&[Atom]> {
        self.atoms.split(|a| *a == Atom::Char('\n')).collect()
    }

    /// Cursor as (paragraph index, offset within paragraph).
    pub fn cursor_line_col(&self) -> (usize, usize) {
        let line = self.atoms[..self.cursor]
            .iter()
            .filter(|a| **a == Atom::Char('\n'))
            .count();
        (line, self.cursor - self.paragraph_start())
    }

    fn paragraph_start(&self) -> usize {
        self.atoms[..self.cursor]
            .iter()
            .rposition(|a| *a == Atom::Char('\n'))
            .map_or(0, |nl| nl + 1)
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot { atoms: self.atoms.clone(), cursor: self.cursor }
    }

    fn restore(&mut self, snapshot: Snapshot) {
        self.atoms = snapshot.atoms;
        self.cursor = snapshot.cursor.min(self.atoms.len());
    }
}

impl Document for SermonDocument {
    fn cursor(&self) -> usize {
        self.cursor
    }

    fn text_before_cursor(&self) -> String {
        let start = self
            .paragraph_start()
            .max(self.cursor.saturating_sub(MAX_TEXT_BEFORE));
        self.atoms[start..self.cursor]
            .iter()
            .map(|a| match a {
                Atom::Char(c) => *c,
                Atom::Citation(_) => OBJECT_REPLACEMENT,
            })
            .collect()
    }

    fn replace_range(&mut self, range: Range<usize>, content: Vec<Inline>) -> Result<()> {
        if range.start > range.end || range.end > self.atoms.len() {
            return Err(Error::document(format!(
                "range {}..{} outside document of length {}",
                range.start,
                range.end,
                self.atoms.len()
            )));
        }

        let mut inserted = Vec::new();
        for item in content {
            match item {
                Inline::Text(text) => inserted.extend(text.chars().map(Atom::Char)),
                Inline::Citation(node) => inserted.push(Atom::Citation(node)),
            }
        }

        self.undo_stack.push(self.snapshot());
        if self.undo_stack.len() > MAX_UNDO_DEPTH {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();

        let new_cursor = range.start + inserted.len();
        let _removed: Vec<Atom> = self.atoms.splice(range, inserted).collect();
        self.cursor = new_cursor;
        Ok(())
    }
}
