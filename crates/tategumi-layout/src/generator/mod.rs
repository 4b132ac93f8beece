//! Box generators.
//!
//! A generator is the yield loop of one [`GeneratorKind`]: each call to
//! [`LayoutEngine::yield_box`] pulls elements from the context's cache,
//! child and stream, offers them to the context's accumulators, and builds
//! one box from what fit. Generators are resumable: whatever did not fit
//! stays in the stream or the cache for the next call.

mod block;
mod float;
mod inline;
mod parallel;
mod text;

use strum_macros::{AsRefStr, Display};
use tategumi_common::layout_trace;

use crate::error::LayoutError;
use crate::layout::LayoutBox;
use crate::rendering::{ContextId, ContextState, LayoutEngine};

/// The closed set of generator kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum GeneratorKind {
    /// Stacks child boxes along the block axis.
    Block,
    /// Builds lines, or an inline box inside someone else's line.
    Inline,
    /// A block that sits inside a line.
    InlineBlock,
    /// Builds text runs from a text stream.
    Text,
    /// `<ul>` and `<ol>`: a block that measures its markers first.
    List,
    /// A list item with its marker inside the first line.
    InsideListItem,
    /// A list item laid out as marker and body columns.
    OutsideListItem,
    /// A block that measures its columns first.
    Table,
    /// Cells laid out as columns.
    TableRow,
    /// One table cell.
    TableCell,
    /// A float root: floats and the flow beside them.
    Float,
    /// Columns of uniform extent.
    Parallel,
    /// A prebuilt box handed out once.
    Lazy,
}

impl GeneratorKind {
    /// Kinds whose output goes into a line.
    #[must_use]
    pub const fn is_inline_level(self) -> bool {
        matches!(self, Self::Inline | Self::InlineBlock | Self::Text)
    }

    /// Kinds that yield their columns side by side.
    #[must_use]
    pub const fn is_parallel(self) -> bool {
        matches!(self, Self::Parallel | Self::TableRow | Self::OutsideListItem)
    }
}

impl LayoutEngine {
    /// Produce the next box of `id`, or `None` when nothing fit.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if a stream was driven out of range.
    pub fn yield_box(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        let kind = self.ctx(id).generator;
        let output = match kind {
            GeneratorKind::Block
            | GeneratorKind::InlineBlock
            | GeneratorKind::List
            | GeneratorKind::InsideListItem
            | GeneratorKind::Table
            | GeneratorKind::TableCell => self.yield_block(id)?,
            GeneratorKind::Inline => self.yield_inline(id)?,
            GeneratorKind::Text => self.yield_text(id)?,
            GeneratorKind::Float => self.yield_float(id)?,
            GeneratorKind::Parallel | GeneratorKind::TableRow | GeneratorKind::OutsideListItem => {
                self.yield_parallel(id)?
            }
            GeneratorKind::Lazy => self.ctx_mut(id).lazy_output.take(),
        };
        if output.is_some() {
            self.ctx_mut(id).yield_count += 1;
        }
        layout_trace!(
            "Yield",
            "{kind} <{}> -> {}",
            self.style_of(id).markup_name(),
            output.as_ref().map_or_else(|| "none".to_string(), |b| format!("{:?}", b.size))
        );
        Ok(output)
    }

    /// Whether `id` can produce more output.
    #[must_use]
    pub fn has_next(&self, id: ContextId) -> bool {
        let ctx = self.ctx(id);
        if ctx.state != ContextState::Accumulating {
            return false;
        }
        if !ctx.cache.is_empty() {
            return true;
        }
        match ctx.generator {
            GeneratorKind::Lazy => ctx.lazy_output.is_some(),
            kind if kind.is_parallel() => ctx.parallel.iter().any(|&c| self.has_next(c)),
            GeneratorKind::Float => {
                ctx.floats.iter().any(|&c| self.has_next(c))
                    || ctx.space.is_some_and(|c| self.has_next(c))
            }
            _ => ctx.child.is_some_and(|c| self.has_next(c)) || self.stream_has_next(id),
        }
    }
}
