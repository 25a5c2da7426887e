//! Editing services.
//!
//! The pieces between a keystroke and a citation: the document contract,
//! trigger matching, verse lookup, and the substitution pipeline. None of
//! them depend on the terminal UI.

pub mod editor;
pub mod matcher;
pub mod scripture;
pub mod substitution;

pub use editor::{Document, Inline, SermonDocument};
pub use matcher::ReferenceMatch;
pub use scripture::{ScriptureRef, VerseSource};
pub use substitution::{PlaceholderReason, Substitution, SubstitutionEngine};
