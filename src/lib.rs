//! `holyref` - Korean Bible reference recognition for sermon editing.
//!
//! Typing a shorthand trigger such as `/창1:1` followed by a space replaces
//! the trigger with a citation carrying the canonical reference and verse
//! text. The crate provides the book table, the verse corpus and its
//! loaders, the trigger matcher, the substitution engine, and a terminal
//! editor built on top of them.

// Re-export public modules for use in integration tests and as a library
pub mod app;
pub mod bible;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod services;
pub mod types;
pub mod ui;
