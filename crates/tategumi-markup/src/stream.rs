//! Pull-based token streams.
//!
//! A [`TokenStream`] is a cursor over an already-lexed token list. Layout
//! pulls tokens one at a time, peeks ahead for line-breaking decisions and
//! rewinds to positions it has already visited when a line is hyphenated or
//! a word is split. Seeking never moves past the end.

use crate::error::StreamError;

/// A cursor over a token list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenStream<T> {
    tokens: Vec<T>,
    pos: usize,
}

impl<T> Default for TokenStream<T> {
    fn default() -> Self {
        Self {
            tokens: Vec::new(),
            pos: 0,
        }
    }
}

impl<T: Clone> TokenStream<T> {
    /// Create a stream positioned at the first token.
    #[must_use]
    pub const fn new(tokens: Vec<T>) -> Self {
        Self { tokens, pos: 0 }
    }

    /// Returns `true` while unread tokens remain.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }

    /// Read the current token and advance.
    pub fn get(&mut self) -> Option<T> {
        let token = self.tokens.get(self.pos).cloned()?;
        self.pos += 1;
        Some(token)
    }

    /// Look at the token `offset` places after the cursor without consuming.
    #[must_use]
    pub fn peek(&self, offset: usize) -> Option<&T> {
        self.tokens.get(self.pos + offset)
    }

    /// Step back one token.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::BeforeStart`] at position zero.
    pub const fn prev(&mut self) -> Result<(), StreamError> {
        if self.pos == 0 {
            return Err(StreamError::BeforeStart);
        }
        self.pos -= 1;
        Ok(())
    }

    /// The index of the next token to be read.
    #[must_use]
    pub const fn pos(&self) -> usize {
        self.pos
    }

    /// Seek to an absolute position. `len()` is allowed and means "at end".
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::OutOfRange`] beyond the end of the stream.
    pub fn set_pos(&mut self, pos: usize) -> Result<(), StreamError> {
        if pos > self.tokens.len() {
            return Err(StreamError::OutOfRange {
                pos,
                len: self.tokens.len(),
            });
        }
        self.pos = pos;
        Ok(())
    }

    /// Move the cursor back to the first token.
    pub const fn rewind(&mut self) {
        self.pos = 0;
    }

    /// Consume tokens while `pred` holds and return them.
    pub fn take_while(&mut self, mut pred: impl FnMut(&T) -> bool) -> Vec<T> {
        let mut taken = Vec::new();
        while let Some(token) = self.tokens.get(self.pos) {
            if !pred(token) {
                break;
            }
            taken.push(token.clone());
            self.pos += 1;
        }
        taken
    }

    /// Overwrite the token at `pos`. Used to write back the rest of a split word.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::OutOfRange`] if `pos` is not a token index.
    pub fn replace(&mut self, pos: usize, token: T) -> Result<(), StreamError> {
        let len = self.tokens.len();
        let slot = self
            .tokens
            .get_mut(pos)
            .ok_or(StreamError::OutOfRange { pos, len })?;
        *slot = token;
        Ok(())
    }

    /// Insert a token before everything else. The cursor must still be at zero.
    pub fn push_front(&mut self, token: T) {
        self.tokens.insert(0, token);
    }

    /// All tokens, read or not.
    #[must_use]
    pub fn tokens(&self) -> &[T] {
        &self.tokens
    }

    /// Mutable access to one token.
    pub fn token_mut(&mut self, pos: usize) -> Option<&mut T> {
        self.tokens.get_mut(pos)
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` for a stream with no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
