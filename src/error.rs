/// Error handling module for the lexgraph library.
///
/// This module defines the error types shared by the scanner/tokenizer core
/// and the digraph algorithms, along with a crate-wide `Result` alias.
use crate::scanner::Cursor;
use thiserror::Error;

/// Main error type for the lexgraph library.
#[derive(Debug, Error)]
pub enum Error {
    /// No rule in the active rule set matched at a non-end position.
    /// The tokenizer is left positioned at the failing cursor.
    #[error("no rule matched at line {}, column {} (offset {})", position.line, position.column, position.offset)]
    Tokenization {
        /// Position at which every rule declined.
        position: Cursor,
    },

    /// A token requested through `Tokenizer::expect` had a kind outside the
    /// expected set.
    #[error("expected one of {expected:?} but found {found} at line {}, column {}", position.line, position.column)]
    UnexpectedToken {
        /// Token kinds the caller would have accepted.
        expected: Vec<&'static str>,
        /// Rendering of the token (or end of input) actually seen.
        found: String,
        /// Position of the offending token.
        position: Cursor,
    },

    /// Topological sorting could not place every node.
    #[error("graph contains a cycle through node {node}")]
    Cycle {
        /// One node participating in a cycle, rendered via `Debug`.
        node: String,
    },

    /// An operation referenced a node or edge id absent from the graph.
    #[error("node or edge {id} does not exist")]
    NotFound {
        /// The missing id, rendered via `Debug`.
        id: String,
    },

    /// A rule pattern failed to compile.
    #[error("invalid rule pattern: {source}")]
    Pattern {
        #[from]
        source: regex::Error,
    },
}

/// Convenience type alias for Results in the lexgraph library.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Creates a `NotFound` error for the given graph id.
    pub(crate) fn not_found(id: &impl std::fmt::Debug) -> Self {
        Error::NotFound {
            id: format!("{id:?}"),
        }
    }

    /// Creates a `Cycle` error naming the given node.
    pub(crate) fn cycle(id: &impl std::fmt::Debug) -> Self {
        Error::Cycle {
            node: format!("{id:?}"),
        }
    }

    /// Returns the position associated with this error, if any.
    pub fn position(&self) -> Option<Cursor> {
        match self {
            Error::Tokenization { position } => Some(*position),
            Error::UnexpectedToken { position, .. } => Some(*position),
            _ => None,
        }
    }
}
