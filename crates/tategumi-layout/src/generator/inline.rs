//! Inline generator.
//!
//! [§ 9.4.2 Inline formatting contexts](https://www.w3.org/TR/CSS2/visuren.html#inline-formatting)
//!
//! > In an inline formatting context, boxes are laid out horizontally, one
//! > after the other, beginning at the top of a containing block.
//!
//! An inline root builds whole lines for its block. A nested inline (a
//! `<b>` inside a line) builds the box that its part of the line needs, and
//! hands it to the line above.

use tategumi_common::warning::warn_once;
use tategumi_markup::MarkupToken;

use crate::error::LayoutError;
use crate::generator::block::ChildOutput;
use crate::layout::{BoxEdge, BoxType, EdgeSizes, Element, LayoutBox};
use crate::rendering::{ContextId, ContextState, LayoutEngine};
use crate::style::flow::LogicalSide;
use crate::style::keywords::TextAlign;
use crate::style::values::{CssMap, CssValue, floor_px};

impl LayoutEngine {
    /// Yield one line (or one inline box) of `id`.
    pub(crate) fn yield_inline(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        self.init_layout_context(id);
        loop {
            let element = self.inline_next_element(id)?;
            if !self.add_inline_element(id, element).is_inline_continue() {
                break;
            }
        }
        Ok(self.create_line_box(id))
    }

    /// Next inline element of `id`.
    ///
    /// Block-level content ends an inline root: the root gives up and its
    /// block reads the tag again. Inside a nested inline there is no block
    /// to return to, so the content is laid out inline.
    pub(crate) fn inline_next_element(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
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
                MarkupToken::Text(text) => {
                    let _ = self.create_child_text_generator(id, &text);
                    continue;
                }
                MarkupToken::Tag(tag) if tag.is_close_tag() => continue,
                MarkupToken::Tag(tag) => tag,
            };
            if tag.name() == "br" {
                if let Some(layout) = self.layout_mut(id) {
                    layout.inline.line_break = true;
                }
                return Ok(None);
            }

            let parent_style = self.ctx(id).style;
            let style = self.create_style(tag.clone(), Some(parent_style), &CssMap::new());
            let node = self.styles.get(style);
            let block_level = node.is_page_break()
                || node.is_floated()
                || (node.display.is_block_level() && !node.display.is_inline_block());
            if !node.is_page_break() && self.styles.is_disabled(style, &self.config) {
                self.styles.remove_child(style);
                continue;
            }
            if block_level {
                if self.is_inline_root(id) {
                    self.styles.remove_child(style);
                    self.rewind_markup(id)?;
                    self.ctx_mut(id).state = ContextState::Exhausted;
                    return Ok(None);
                }
                warn_once(
                    "Layout",
                    &format!(
                        "block <{}> inside inline <{}>, laid out inline",
                        tag.name(),
                        self.style_of(id).markup_name()
                    ),
                );
            }
            self.register_anchor(&tag);
            if let Err(atomic) = self.create_child_inline_generator(id, style) {
                return Ok(Some(atomic));
            }
        }
    }

    /// Build the line box of `id` from its accumulated elements.
    pub(crate) fn create_line_box(&mut self, id: ContextId) -> Option<LayoutBox> {
        let is_root = self.is_inline_root(id);
        let root_measure = if is_root { self.context_max_measure(id) } else { 0 };
        let line_no = self
            .ctx(id)
            .parent
            .and_then(|p| self.layout_of(p))
            .map_or(0, |l| l.block.line_no);
        let style_id = self.ctx(id).style;

        let inline = &mut self.ctx_mut(id).layout.as_mut()?.inline;
        if inline.is_empty() && inline.hanging.is_none() {
            return None;
        }
        let empty = inline.is_empty();
        let cur_measure = inline.cur_measure;
        let max_extent = inline.max_extent();
        let max_font_size = inline.max_font_size;
        let (line_break, line_over, hyphenated) =
            (inline.line_break, inline.line_over, inline.hyphenated);
        let hanging = inline.hanging.take();
        let char_count = inline.char_count;
        let elements = inline.take_elements();

        let style = self.styles.get(style_id);
        let flow = style.flow;
        let font = style.font.size;
        let measure = if is_root {
            root_measure
        } else if style.static_measure.is_some() {
            style.content_measure
        } else {
            cur_measure
        };
        let void_line = !line_break
            && !elements.is_empty()
            && elements
                .iter()
                .all(|e| e.as_box().is_some_and(|b| b.layout_extent(flow) == 0));
        let extent = if empty || void_line {
            0
        } else if max_extent > 0 {
            max_extent
        } else {
            font
        };
        let max_font_size = max_font_size.max(font);
        let line_height = style.line_height();
        let text_align = style.text_align;
        let edge = style.edge;

        let mut output = self.new_box(style_id, BoxType::LineBlock, flow.box_size(measure, extent));
        output.elements = elements;
        output.char_count = char_count;
        output.max_extent = extent;
        output.max_font_size = max_font_size;
        output.has_line_break = line_break;
        output.line_over = line_over;
        output.hyphenated = hyphenated;
        output.hanging = hanging;
        if extent == 0 {
            return Some(output);
        }
        if !is_root {
            output.edge = edge;
            return Some(output);
        }

        output.line_no = Some(line_no);
        output.inline_measure = cur_measure;

        // [§ 7.1 Text Alignment](https://www.w3.org/TR/css-text-3/#text-align-property)
        let gap = (measure - cur_measure).max(0);
        let indent = match text_align {
            TextAlign::Start => 0,
            TextAlign::Center => gap / 2,
            TextAlign::End => gap,
        };
        if indent > 0 {
            let side = flow.physical_side(LogicalSide::Start);
            let _ = output
                .css
                .insert(format!("padding-{side}"), CssValue::from(format!("{indent}px")));
        }

        // [§ 10.8 Line height calculations](https://www.w3.org/TR/CSS2/visudet.html#line-height)
        let line_extent = floor_px(f64::from(max_font_size) * line_height);
        if line_extent > extent {
            let mut padding = EdgeSizes::default();
            padding.set(flow, LogicalSide::After, line_extent - extent);
            output.edge = Some(BoxEdge::with_padding(padding));
        }
        Some(output)
    }
}
