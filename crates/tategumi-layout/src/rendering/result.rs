//! Results of adding an element to a rendering context.

use strum_macros::{AsRefStr, Display};

/// What happened when an element was offered to a context.
///
/// Generators keep pulling elements while the result is one of the
/// "continue" codes and build their output on anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum LayoutResult {
    /// Added, and there is room for more.
    Ok,
    /// Not added and not cached; the element takes no room or never fits.
    Skip,
    /// The block is full or a forced break follows.
    BreakAfter,
    /// No more elements.
    Eof,
    /// The element was cached too often; the context was terminated.
    TooManyRollback,
    /// The element has no measure.
    Zero,
    /// The line ends at a forced break.
    LineBreak,
    /// The line is full.
    Overflow,
}

impl LayoutResult {
    /// Returns `true` for the codes a block generator keeps pulling on.
    #[must_use]
    pub const fn is_block_continue(self) -> bool {
        matches!(self, Self::Ok | Self::Skip)
    }

    /// Returns `true` for the codes a line generator keeps pulling on.
    #[must_use]
    pub const fn is_inline_continue(self) -> bool {
        matches!(self, Self::Ok | Self::Skip | Self::Zero)
    }
}
