//! Rendering contexts.
//!
//! Every markup element being laid out owns one [`RenderingContext`]. The
//! contexts live in an arena inside [`LayoutEngine`] and point at each other
//! by [`ContextId`]: a context knows its parent, its current child and, for
//! floats and parallel columns, its sub-generators. A context holds the
//! style it lays out, a cursor into a token stream, the accumulators of the
//! output it is building and a rollback cache for elements that did not fit.
//!
//! The engine methods in this module and its siblings are the operations of
//! a context; the [`generator`](crate::generator) module strings them into
//! the per-kind yield loops.

mod add;
mod create;
mod float;
mod hyphenate;
mod list;
mod result;
mod table;

pub(crate) use add::has_ruby_text;
pub(crate) use create::force_css;
pub use list::ListContext;
pub use result::LayoutResult;

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use strum_macros::{AsRefStr, Display};
use tategumi_markup::{MarkupToken, TokenStream};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::generator::GeneratorKind;
use crate::layout::{Clearance, Element, FloatMark, LayoutBox, LayoutContext, PartitionSet};
use crate::style::flow::{BoxFlow, BoxSize, LogicalSide};
use crate::style::keywords::BoxSizing;
use crate::style::{CascadeResolver, PreloadMap, StyleId, StyleNode, StyleTree};
use crate::text::{FontMetrics, TextToken};

/// Handle of a context in the engine arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ContextId(pub(crate) usize);

/// Handle of a token stream in the engine arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StreamId(pub(crate) usize);

/// A token source. Several contexts may read the same stream: an inline
/// root reads its block's stream and a float space reads its parent's.
#[derive(Debug, Clone)]
pub(crate) enum Stream {
    Markup(TokenStream<MarkupToken>),
    Text(TokenStream<TextToken>),
}

impl Stream {
    fn has_next(&self) -> bool {
        match self {
            Self::Markup(stream) => stream.has_next(),
            Self::Text(stream) => stream.has_next(),
        }
    }
}

/// Lifecycle of a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ContextState {
    /// Still producing output.
    #[default]
    Accumulating,
    /// Gave up on its remaining content, or its content ended early.
    Exhausted,
    /// Stopped after too many rollbacks.
    Terminated,
}

/// The per-element layout state.
#[derive(Debug, Clone)]
pub struct RenderingContext {
    pub(crate) style: StyleId,
    pub(crate) stream: Option<StreamId>,
    pub(crate) layout: Option<LayoutContext>,
    pub(crate) parent: Option<ContextId>,
    pub(crate) child: Option<ContextId>,
    pub(crate) generator: GeneratorKind,
    /// Most recent last; `pop` replays the most recent element first.
    pub(crate) cache: Vec<Element>,
    pub(crate) state: ContextState,
    pub(crate) yield_count: usize,
    /// Floated sub-generators of a float root.
    pub(crate) floats: Vec<ContextId>,
    /// The flow beside the floats of a float root.
    pub(crate) space: Option<ContextId>,
    /// Columns of a parallel generator.
    pub(crate) parallel: Vec<ContextId>,
    pub(crate) float_space: bool,
    pub(crate) float_mark: Option<FloatMark>,
    pub(crate) clearance: Option<Clearance>,
    pub(crate) list_context: Option<ListContext>,
    pub(crate) table_partition: Option<PartitionSet>,
    pub(crate) lazy_output: Option<LayoutBox>,
}

impl RenderingContext {
    pub(crate) const fn new(
        style: StyleId,
        stream: Option<StreamId>,
        parent: Option<ContextId>,
        generator: GeneratorKind,
    ) -> Self {
        Self {
            style,
            stream,
            layout: None,
            parent,
            child: None,
            generator,
            cache: Vec::new(),
            state: ContextState::Accumulating,
            yield_count: 0,
            floats: Vec::new(),
            space: None,
            parallel: Vec::new(),
            float_space: false,
            float_mark: None,
            clearance: None,
            list_context: None,
            table_partition: None,
            lazy_output: None,
        }
    }

    /// The style laid out by this context.
    #[must_use]
    pub const fn style(&self) -> StyleId {
        self.style
    }

    /// Generator kind.
    #[must_use]
    pub const fn generator(&self) -> GeneratorKind {
        self.generator
    }

    /// Lifecycle state.
    #[must_use]
    pub const fn state(&self) -> ContextState {
        self.state
    }

    /// Parent context.
    #[must_use]
    pub const fn parent(&self) -> Option<ContextId> {
        self.parent
    }

    /// Current child context.
    #[must_use]
    pub const fn child(&self) -> Option<ContextId> {
        self.child
    }

    /// Accumulators of the output being built.
    #[must_use]
    pub const fn layout(&self) -> Option<&LayoutContext> {
        self.layout.as_ref()
    }

    /// Elements waiting in the rollback cache.
    #[must_use]
    pub fn cached(&self) -> &[Element] {
        &self.cache
    }

    /// Outputs produced so far.
    #[must_use]
    pub const fn yield_count(&self) -> usize {
        self.yield_count
    }
}

/// Document-wide bookkeeping.
#[derive(Debug, Clone, Default)]
pub(crate) struct Registry {
    pub(crate) anchors: BTreeMap<String, usize>,
    pub(crate) page_count: usize,
    pub(crate) next_block_id: usize,
    pub(crate) line_count: usize,
}

/// The document context: owns every style, context and stream, plus the
/// collaborators the contexts share.
pub struct LayoutEngine {
    pub(crate) styles: StyleTree,
    pub(crate) contexts: Vec<RenderingContext>,
    pub(crate) streams: Vec<Stream>,
    pub(crate) config: LayoutConfig,
    pub(crate) cascade: Rc<dyn CascadeResolver>,
    pub(crate) metrics: Box<dyn FontMetrics>,
    pub(crate) preloads: PreloadMap,
    pub(crate) page: BoxSize,
    pub(crate) root: ContextId,
    pub(crate) registry: Registry,
    pub(crate) diagnostics: Vec<LayoutError>,
}

impl fmt::Debug for LayoutEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LayoutEngine")
            .field("page", &self.page)
            .field("styles", &self.styles.len())
            .field("contexts", &self.contexts.len())
            .field("pages", &self.registry.page_count)
            .finish_non_exhaustive()
    }
}

impl LayoutEngine {
    pub(crate) fn ctx(&self, id: ContextId) -> &RenderingContext {
        &self.contexts[id.0]
    }

    pub(crate) fn ctx_mut(&mut self, id: ContextId) -> &mut RenderingContext {
        &mut self.contexts[id.0]
    }

    pub(crate) fn style_of(&self, id: ContextId) -> &StyleNode {
        self.styles.get(self.ctx(id).style)
    }

    pub(crate) fn flow_of(&self, id: ContextId) -> BoxFlow {
        self.style_of(id).flow
    }

    pub(crate) fn layout_of(&self, id: ContextId) -> Option<&LayoutContext> {
        self.ctx(id).layout.as_ref()
    }

    /// The accumulators of a context, for callers driving it by hand.
    pub fn layout_mut(&mut self, id: ContextId) -> Option<&mut LayoutContext> {
        self.ctx_mut(id).layout.as_mut()
    }

    /// A context.
    #[must_use]
    pub fn context(&self, id: ContextId) -> &RenderingContext {
        self.ctx(id)
    }

    /// The context of the document root.
    #[must_use]
    pub const fn root_context(&self) -> ContextId {
        self.root
    }

    /// The style tree.
    #[must_use]
    pub const fn styles(&self) -> &StyleTree {
        &self.styles
    }

    /// Engine tunables.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    pub(crate) fn markup_stream(&mut self, id: ContextId) -> Option<&mut TokenStream<MarkupToken>> {
        let stream = self.ctx(id).stream?;
        match &mut self.streams[stream.0] {
            Stream::Markup(stream) => Some(stream),
            Stream::Text(_) => None,
        }
    }

    pub(crate) fn text_stream(&mut self, id: ContextId) -> Option<&mut TokenStream<TextToken>> {
        let stream = self.ctx(id).stream?;
        match &mut self.streams[stream.0] {
            Stream::Text(stream) => Some(stream),
            Stream::Markup(_) => None,
        }
    }

    pub(crate) fn stream_has_next(&self, id: ContextId) -> bool {
        self.ctx(id)
            .stream
            .is_some_and(|stream| self.streams[stream.0].has_next())
    }

    /// `id` and its ancestors, nearest first.
    pub(crate) fn lineage(&self, id: ContextId) -> impl Iterator<Item = ContextId> + '_ {
        std::iter::successors(Some(id), |&c| self.ctx(c).parent)
    }

    /// Nothing was placed yet in `id` or any of its ancestors, and no float
    /// sits beside it, so whatever `id` cannot place now will not fit
    /// anywhere later either.
    #[must_use]
    pub fn is_fresh(&self, id: ContextId) -> bool {
        self.lineage(id).all(|c| {
            let ctx = self.ctx(c);
            !(ctx.float_space && ctx.float_mark.is_some())
                && ctx.layout.as_ref().is_none_or(LayoutContext::is_fresh)
        })
    }

    /// An inline context that builds whole lines of its block, as opposed
    /// to one that builds a box inside someone else's line.
    #[must_use]
    pub fn is_inline_root(&self, id: ContextId) -> bool {
        let ctx = self.ctx(id);
        if !matches!(ctx.generator, GeneratorKind::Inline) {
            return false;
        }
        if matches!(self.style_of(id).markup_name(), "body" | "li-body") {
            return true;
        }
        ctx.parent
            .is_none_or(|parent| self.ctx(parent).style == ctx.style)
    }

    /// The nearest ancestor whose stream continues after this context's
    /// content ends, which is where the next line's first token comes from.
    pub(crate) fn sibling_context(&self, id: ContextId) -> Option<ContextId> {
        let style = self.ctx(id).style;
        if self.styles.get(style).markup_name() == "rt" {
            return None;
        }
        let parent = self.ctx(id).parent?;
        self.lineage(parent)
            .find(|&c| self.ctx(c).style != style)
            .or(Some(parent))
    }

    pub(crate) fn root_style(&self) -> &StyleNode {
        self.style_of(self.root)
    }

    /// Root content measure as seen from `flow`.
    pub(crate) fn root_content_measure(&self, flow: BoxFlow) -> i32 {
        flow.measure_of(self.root_content_size())
    }

    /// Root content extent as seen from `flow`.
    pub(crate) fn root_content_extent(&self, flow: BoxFlow) -> i32 {
        flow.extent_of(self.root_content_size())
    }

    fn root_content_size(&self) -> BoxSize {
        let root = self.root_style();
        root.flow.box_size(root.content_measure, root.content_extent)
    }

    /// Reset the accumulators of `id` for one more output.
    ///
    /// A child whose flow differs from its parent's is laid out across the
    /// parent: its lines run along the parent's block axis, so its measure
    /// is what is left of the parent's extent and its extent is the
    /// parent's line measure.
    pub fn init_layout_context(&mut self, id: ContextId) {
        let style_id = self.ctx(id).style;
        let flipped = self
            .ctx(id)
            .parent
            .is_some_and(|parent| self.flow_of(parent) != self.flow_of(id));
        let layout = if flipped {
            let parent = self.ctx(id).parent.and_then(|p| self.layout_of(p));
            let (inline_max, block_max) = parent.map_or((None, None), |l| {
                (Some(l.rest_extent()), Some(l.inline.max_measure))
            });
            self.styles.update_context_size(style_id, inline_max, block_max);
            let style = self.styles.get(style_id);
            LayoutContext::new(style.content_measure, style.content_extent)
        } else if self.ctx(id).generator.is_inline_level() {
            LayoutContext::new(self.context_max_measure(id), self.context_max_extent(id))
        } else {
            let measure = self.styles.get(style_id).content_measure;
            LayoutContext::new(measure, self.context_max_extent(id))
        };
        self.ctx_mut(id).layout = Some(layout);
    }

    /// Line measure available to `id`: what is left of the parent's line,
    /// capped by its own content measure. Ruby text sees the whole line.
    #[must_use]
    pub fn context_max_measure(&self, id: ContextId) -> i32 {
        let style = self.style_of(id);
        let parent = self.ctx(id).parent.and_then(|p| self.layout_of(p));
        if style.markup_name() == "rt" {
            if let Some(parent) = parent {
                return parent.inline.max_measure;
            }
        }
        parent
            .map_or(style.content_measure, LayoutContext::rest_measure)
            .min(style.content_measure)
    }

    /// Extent available to `id`: what is left of the parent's block, capped
    /// by a static extent, less the before edge on the first output.
    #[must_use]
    pub fn context_max_extent(&self, id: ContextId) -> i32 {
        let ctx = self.ctx(id);
        let style = self.style_of(id);
        let rest = ctx
            .parent
            .and_then(|p| self.layout_of(p))
            .map_or(style.extent, LayoutContext::rest_extent);
        let rest = style.static_extent.map_or(rest, |size| rest.min(size));
        let no_edge = matches!(ctx.generator, GeneratorKind::Text) || self.is_inline_root(id);
        let edge = if no_edge || ctx.yield_count > 0 {
            0
        } else {
            match style.box_sizing {
                BoxSizing::MarginBox => style.edge_side(LogicalSide::Before),
                BoxSizing::BorderBox => style.inner_edge_side(LogicalSide::Before),
                BoxSizing::ContentBox => 0,
            }
        };
        (rest - edge).max(0)
    }
}
