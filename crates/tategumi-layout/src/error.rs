//! Layout error types.

use thiserror::Error;

use tategumi_markup::StreamError;

/// Errors surfaced by the layout engine.
///
/// Ordinary overflow is never an error; it is a
/// [`LayoutResult`](crate::rendering::LayoutResult) code handled inside the
/// rendering context. Only the cases below escape it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The page has no room for content.
    #[error("invalid page size {width}x{height}")]
    InvalidPageSize {
        /// Page width in pixels.
        width: i32,
        /// Page height in pixels.
        height: i32,
    },
    /// An element was rolled back too many times; its context was terminated.
    #[error("too many rollbacks in <{markup}> (retried {count} times)")]
    RollbackExhausted {
        /// Markup name of the terminated context.
        markup: String,
        /// Retry count of the offending element.
        count: u32,
    },
    /// A token stream was used outside its bounds.
    #[error(transparent)]
    Stream(#[from] StreamError),
    /// The page guard stopped layout.
    #[error("page limit of {0} reached")]
    PageLimit(usize),
}

/// A style value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid value '{value}' for '{property}'")]
pub struct InvalidValue {
    /// Property name.
    pub property: String,
    /// The rejected value.
    pub value: String,
}
