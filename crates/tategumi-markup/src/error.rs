//! Markup and stream error types.

use thiserror::Error;

/// Errors produced while lexing markup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkupError {
    /// A quoted attribute value was never closed.
    #[error("unclosed attribute literal starting at byte {offset} in '{source_text}'")]
    UnclosedLiteral {
        /// Byte offset of the opening quote.
        offset: usize,
        /// The attribute source being lexed.
        source_text: String,
    },
    /// A tag opened with `<` was never closed with `>`.
    #[error("unterminated tag starting at byte {offset}")]
    UnterminatedTag {
        /// Byte offset of the `<`.
        offset: usize,
    },
}

/// Errors produced by invalid token stream usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StreamError {
    /// Seeking past the end of the stream.
    #[error("stream position {pos} out of range (length {len})")]
    OutOfRange {
        /// The requested position.
        pos: usize,
        /// Number of tokens in the stream.
        len: usize,
    },
    /// Stepping back from the first token.
    #[error("cannot step back before the start of the stream")]
    BeforeStart,
}
