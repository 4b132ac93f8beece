//! Block generator.

use tategumi_common::layout_trace;
use tategumi_common::warning::warn_once;
use tategumi_markup::MarkupToken;

use crate::error::LayoutError;
use crate::layout::{BoxEdge, BoxType, Element, LayoutBox};
use crate::rendering::{ContextId, ContextState, LayoutEngine};
use crate::style::flow::LogicalSide;
use crate::style::values::CssMap;

/// What a child context had to offer.
pub(crate) enum ChildOutput {
    /// A box.
    Box(LayoutBox),
    /// Nothing fits here; the parent must end its output and retry later.
    Flush,
    /// The child is done.
    Done,
}

impl LayoutEngine {
    /// Yield one block box of `id`.
    pub(crate) fn yield_block(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        self.init_layout_context(id);
        if let Some(clearance) = self.yield_clearance(id) {
            let flow = self.flow_of(id);
            return Ok((!clearance.is_void(flow)).then_some(clearance));
        }
        loop {
            let element = self.block_next_element(id)?;
            if !self.add_block_element(id, element).is_block_continue() {
                break;
            }
        }
        Ok(self.create_block_output(id))
    }

    /// Ask the current child of `id` for a box.
    ///
    /// A child that yields nothing while it still has content is either
    /// waiting for room (the parent flushes and comes back on a later page)
    /// or can never be placed, when nothing was placed around it yet.
    pub(crate) fn next_child_output(&mut self, id: ContextId) -> Result<ChildOutput, LayoutError> {
        let Some(child) = self.ctx(id).child else {
            return Ok(ChildOutput::Done);
        };
        if self.has_next(child) {
            if let Some(output) = self.yield_box(child)? {
                return Ok(ChildOutput::Box(output));
            }
            if self.has_next(child) {
                if !self.is_fresh(id) {
                    return Ok(ChildOutput::Flush);
                }
                warn_once(
                    "Layout",
                    &format!(
                        "content of <{}> does not fit in an empty page, skipped",
                        self.style_of(child).markup_name()
                    ),
                );
                self.ctx_mut(child).state = ContextState::Exhausted;
            }
        }
        self.ctx_mut(id).child = None;
        Ok(ChildOutput::Done)
    }

    /// Next block-level element of `id`: the cache first, then the child,
    /// then a new child for the next token of the stream.
    pub(crate) fn block_next_element(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        loop {
            // STEP 1: Replay the cache.
            if let Some(element) = self.pop_cache(id) {
                match element {
                    Element::Box(output) => return Ok(Some(*output)),
                    Element::Text(_) => continue,
                }
            }

            // STEP 2: Drain the current child.
            match self.next_child_output(id)? {
                ChildOutput::Box(output) => return Ok(Some(output)),
                ChildOutput::Flush => return Ok(None),
                ChildOutput::Done => {}
            }

            // STEP 3: Start a child for the next token.
            let Some(token) = self.markup_stream(id).and_then(|stream| stream.get()) else {
                return Ok(None);
            };
            let tag = match token {
                MarkupToken::Text(text) if text.chars().all(char::is_whitespace) => continue,
                MarkupToken::Text(_) => {
                    self.rewind_markup(id)?;
                    let _ = self.create_inline_root(id);
                    continue;
                }
                MarkupToken::Tag(tag) if tag.is_close_tag() => continue,
                MarkupToken::Tag(tag) => tag,
            };

            let parent_style = self.ctx(id).style;
            let style = self.create_style(tag.clone(), Some(parent_style), &CssMap::new());
            if self.styles.is_disabled(style, &self.config) && !self.styles.get(style).is_page_break() {
                self.styles.remove_child(style);
                continue;
            }
            if self.breaks_before(id, style) {
                self.rewind_markup(id)?;
                self.styles.remove_child(style);
                return Ok(Some(self.create_page_break(style)));
            }
            if self.styles.get(style).is_page_break() {
                return Ok(Some(self.create_page_break(style)));
            }
            self.register_anchor(&tag);

            let node = self.styles.get(style);
            if node.is_floated() {
                if let Some(output) = self.create_float_generator(id, style)? {
                    return Ok(Some(output));
                }
                continue;
            }
            if !node.display.is_block_level() {
                self.styles.remove_child(style);
                self.rewind_markup(id)?;
                let _ = self.create_inline_root(id);
                continue;
            }
            let _ = self.create_child_block_generator(id, style);
        }
    }

    pub(crate) fn rewind_markup(&mut self, id: ContextId) -> Result<(), LayoutError> {
        if let Some(stream) = self.markup_stream(id) {
            stream.prev()?;
        }
        Ok(())
    }

    /// Edge of an output of `id`: a box split across pages keeps its before
    /// edge on the first part and its after edge on the last.
    pub(crate) fn output_edge(&self, id: ContextId, first: bool, has_next: bool) -> Option<BoxEdge> {
        let style = self.style_of(id);
        let flow = style.flow;
        let mut edge = style.edge?;
        if style.markup_name() != "hr" {
            if !first {
                edge.clear_side(flow, LogicalSide::Before);
            }
            if has_next {
                edge.clear_side(flow, LogicalSide::After);
            }
        }
        (!edge.is_zero()).then_some(edge)
    }

    /// Build the block box of `id` from its accumulated elements.
    pub(crate) fn create_block_output(&mut self, id: ContextId) -> Option<LayoutBox> {
        let has_next = self.has_next(id);
        let style_id = self.ctx(id).style;
        let first = self.ctx(id).yield_count == 0;
        let float_space = self.ctx(id).float_space;
        let layout = self.ctx_mut(id).layout.as_mut()?;
        let break_after = layout.block.break_after;
        let auto_extent = layout.block.cur_extent;
        let max_extent = layout.block.max_extent;
        let elements = layout.block.take_elements();
        if elements.is_empty() && !break_after {
            return None;
        }

        let style = self.styles.get(style_id);
        let flow = style.flow;
        let reserved = if has_next { 0 } else { style.edge_side(LogicalSide::After) };
        let extent = if auto_extent == 0 {
            0
        } else if style.is_root() || style.markup_name() == "body" {
            max_extent - reserved
        } else if float_space {
            auto_extent.min(style.content_extent)
        } else if style.static_extent.is_some() {
            style.content_extent
        } else {
            auto_extent
        };

        let edge = self.output_edge(id, first, has_next);
        let style_break_after = !has_next && style.break_after;
        let measure = style.content_measure;

        let mut output = self.new_box(style_id, BoxType::Block, flow.box_size(measure, extent.max(0)));
        output.edge = edge;
        output.break_after = break_after || style_break_after;
        output.char_count = elements.iter().map(|e| e.char_count).sum();
        output.elements = elements.into_iter().map(Element::from).collect();
        output.block_id = Some(self.next_block_id());
        layout_trace!(
            "Block",
            "<{}> output {} elements, extent {extent}",
            output.markup,
            output.elements.len()
        );
        Some(output)
    }
}
