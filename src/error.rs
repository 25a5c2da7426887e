//! Application error types.
//!
//! Provides unified error handling with actionable context for debugging.
//! Expected lookup outcomes (unknown book, missing verse, corpus not loaded)
//! are not errors; they are reported through `services::substitution::Substitution`.

use thiserror::Error;

/// Application result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS, non-success status)
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Dataset parsing error
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File or URL that failed to parse, if known.
        file: Option<String>,
        /// Description of the parse failure.
        message: String,
    },

    /// Verse corpus error
    #[error("Verse corpus error: {0}")]
    Corpus(String),

    /// The document model rejected an edit
    #[error("Document edit rejected: {0}")]
    Document(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with origin context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<String>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a document-edit error
    pub fn document(message: impl Into<String>) -> Self {
        Self::Document(message.into())
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}
