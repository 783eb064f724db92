//! Error handling for the minic front end

use crate::utils::Span;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Front-end error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The grammar could not reduce the current token. Recoverable: the
    /// parser records it and skips to the nearest synchronization point.
    #[error("Syntax error at line {line}, column {column}: {kind} '{value}'")]
    Syntax {
        /// Kind name of the offending token
        kind: String,
        /// Source lexeme of the offending token
        value: String,
        line: u32,
        column: u32,
    },

    /// The token stream ran out in the middle of a construct. Not
    /// recoverable: the parse aborts.
    #[error("Unexpected end of input")]
    UnexpectedEof,

    #[error("IO error: {0}")]
    Io(String),
}

impl Error {
    /// Get the span associated with this error
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::Syntax { line, column, .. } => Some(Span::new(*line, *column)),
            Self::UnexpectedEof | Self::Io(_) => None,
        }
    }
}
