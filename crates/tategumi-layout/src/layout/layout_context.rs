//! One block context and one inline context.

use crate::layout::block_context::BlockContext;
use crate::layout::inline_context::InlineContext;

/// The accumulators of a rendering context.
#[derive(Debug, Clone, Default)]
pub struct LayoutContext {
    /// Block axis.
    pub block: BlockContext,
    /// Inline axis.
    pub inline: InlineContext,
}

impl LayoutContext {
    /// Fresh accumulators for `max_extent` by `max_measure`.
    #[must_use]
    pub fn new(max_measure: i32, max_extent: i32) -> Self {
        Self {
            block: BlockContext::new(max_extent),
            inline: InlineContext::new(max_measure),
        }
    }

    /// Measure left on the line.
    #[must_use]
    pub const fn rest_measure(&self) -> i32 {
        self.inline.rest_measure()
    }

    /// Extent left in the block.
    #[must_use]
    pub const fn rest_extent(&self) -> i32 {
        self.block.rest_extent()
    }

    /// Nothing placed on either axis yet.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.block.cur_extent == 0 && self.inline.cur_measure == 0
    }
}
