//! Source location tracking
#![allow(dead_code)]

/// Position of a token in the source (1-based line and column)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    /// Create a new span
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Synthetic span for tokens with no real source position, such as
    /// the end-of-input token the parser pads its stream with
    pub fn dummy() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Default for Span {
    fn default() -> Self {
        Self::dummy()
    }
}
