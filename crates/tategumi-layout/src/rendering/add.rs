//! Offering elements to a context, and the rollback cache.

use tategumi_common::layout_trace;
use tategumi_common::warning::warn_once;

use crate::error::LayoutError;
use crate::layout::{BoxType, Element, HangingMark, LayoutBox, LayoutContext};
use crate::rendering::{ContextId, ContextState, LayoutEngine, LayoutResult};
use crate::style::flow::LogicalSide;
use crate::text::TextToken;
use crate::text::token::TextKind;

impl LayoutEngine {
    /// Offer a block-level box to the block accumulator of `id`.
    ///
    /// A box that would overflow first gives up its after edge when that is
    /// enough, or when it is taller than the page anyway. A box taller than
    /// the page even then is dropped. Anything else that does not fit goes
    /// to the rollback cache and ends the output.
    pub fn add_block_element(&mut self, id: ContextId, element: Option<LayoutBox>) -> LayoutResult {
        let Some(mut element) = element else {
            return LayoutResult::Eof;
        };
        let flow = self.flow_of(id);
        if element.is_void(flow) {
            if element.break_after {
                if let Some(layout) = self.layout_mut(id) {
                    layout.block.break_after = true;
                }
                return LayoutResult::BreakAfter;
            }
            return LayoutResult::Skip;
        }
        let reserved = if self.has_next(id) { 0 } else { self.after_edge(id) };
        let root_extent = self.root_content_extent(flow);
        let Some(layout) = self.layout_of(id) else {
            return LayoutResult::Eof;
        };
        let max = layout.block.max_extent - reserved;
        let cur = layout.block.cur_extent;
        let mut extent = element.layout_extent(flow);
        let mut next = cur + extent;

        if next > max {
            let over = next - max;
            let oversize = extent > root_extent;
            if let Some(edge) = element.edge.as_mut() {
                if edge.after(flow) >= over || oversize {
                    let _ = edge.cancel_after(flow, over);
                    extent = element.layout_extent(flow);
                    next = cur + extent;
                }
            }
            if next > max && extent > root_extent {
                warn_once(
                    "Layout",
                    &format!(
                        "<{}> is larger than the page, skipped",
                        element.oversize_markup(flow, root_extent)
                    ),
                );
                return LayoutResult::Skip;
            }
        }

        if next > max {
            let result = self.push_cache(id, element.into());
            if result != LayoutResult::Ok {
                return result;
            }
            if let Some(layout) = self.layout_mut(id) {
                layout.block.break_after = true;
            }
            return LayoutResult::BreakAfter;
        }

        let break_after = element.break_after;
        if element.line_no.is_some() {
            self.registry.line_count += 1;
        }
        let Some(layout) = self.layout_mut(id) else {
            return LayoutResult::Eof;
        };
        if element.box_type == BoxType::LineBlock && element.line_no.is_some() {
            layout.block.line_no += 1;
        }
        layout.block.add_element(element, extent);
        if next >= max || break_after {
            layout.block.break_after = true;
            return LayoutResult::BreakAfter;
        }
        LayoutResult::Ok
    }

    /// Offer a box to the line of `id`.
    pub fn add_inline_element(&mut self, id: ContextId, element: Option<LayoutBox>) -> LayoutResult {
        let Some(mut element) = element else {
            return LayoutResult::Eof;
        };
        let flow = self.flow_of(id);
        let measure = element.layout_measure(flow);
        let hanging = element.hanging.take();
        if measure == 0 && !element.has_line_break {
            if let Some(mark) = hanging {
                self.add_hanging_punctuation(id, mark);
            }
            return LayoutResult::Zero;
        }
        let root_measure = self.root_content_measure(flow);
        let Some(layout) = self.layout_of(id) else {
            return LayoutResult::Eof;
        };
        let (cur, max) = (layout.inline.cur_measure, layout.inline.max_measure);
        let next = cur + measure;

        // Only what no line of the page can take is dropped. The rest waits
        // in the cache for a wider line.
        if layout.inline.is_empty() && next > max && measure > root_measure {
            warn_once(
                "Layout",
                &format!("<{}> is wider than the line, skipped", element.markup),
            );
            return LayoutResult::Skip;
        }

        if next <= max {
            let (line_break, line_over) = (element.has_line_break, element.line_over);
            if let Some(layout) = self.layout_mut(id) {
                layout.inline.add_box(element, measure, flow);
            }
            if let Some(mark) = hanging {
                self.add_hanging_punctuation(id, mark);
            }
            let Some(layout) = self.layout_mut(id) else {
                return LayoutResult::Eof;
            };
            if line_break {
                layout.inline.line_break = true;
                return LayoutResult::LineBreak;
            }
            if line_over {
                layout.inline.line_over = true;
                return LayoutResult::Overflow;
            }
            if next >= max {
                return LayoutResult::Overflow;
            }
            return LayoutResult::Ok;
        }

        element.hanging = hanging;
        let result = self.push_cache(id, element.into());
        if result != LayoutResult::Ok {
            return result;
        }
        LayoutResult::Overflow
    }

    /// Offer a text token to the line of the text context `id`.
    pub fn add_text_element(&mut self, id: ContextId, token: Option<TextToken>) -> LayoutResult {
        let Some(token) = token else {
            return LayoutResult::Eof;
        };
        let style = self.style_of(id);
        let (letter_spacing, content_measure, pre) =
            (style.letter_spacing, style.content_measure, style.is_pre());
        let measure = token.advance(letter_spacing);
        if measure == 0 {
            return LayoutResult::Zero;
        }
        let next_is_word = self
            .text_stream(id)
            .and_then(|stream| stream.peek(0))
            .is_some_and(TextToken::is_word);
        let root_measure = self.root_content_measure(self.flow_of(id));
        let Some(layout) = self.layout_of(id) else {
            return LayoutResult::Eof;
        };
        let (cur, max) = (layout.inline.cur_measure, layout.inline.max_measure);

        // A space between the line start and a word is not shown.
        if cur == 0 && max == content_measure && !pre && next_is_word && token.is_white_space() {
            return LayoutResult::Skip;
        }

        let next = cur + measure;
        if cur == 0 && next > max && measure > root_measure {
            warn_once(
                "Layout",
                &format!("'{}' is wider than the line, skipped", token.data),
            );
            return LayoutResult::Skip;
        }
        if next <= max {
            if let Some(layout) = self.layout_mut(id) {
                layout.inline.add_text(token, measure);
            }
        } else {
            let result = self.push_cache(id, token.into());
            if result != LayoutResult::Ok {
                return result;
            }
        }
        if next >= max {
            if let Some(layout) = self.layout_mut(id) {
                layout.inline.line_over = true;
            }
            return LayoutResult::Overflow;
        }
        LayoutResult::Ok
    }

    /// Put an element that did not fit back into the cache of `id`.
    ///
    /// Each element counts how often it was cached. Once the count reaches
    /// `max_rollback_count` the element can never be placed, so the context
    /// is terminated and the failure is recorded.
    pub fn push_cache(&mut self, id: ContextId, mut element: Element) -> LayoutResult {
        let count = {
            let count = element.cache_count_mut();
            *count += 1;
            *count
        };
        layout_trace!("Cache", "push into <{}> (count {count})", self.style_of(id).markup_name());
        if count >= self.config.max_rollback_count {
            let markup = self.style_of(id).markup_name().to_string();
            warn_once(
                "Layout",
                &format!("too many rollbacks in <{markup}>, rest of its content skipped"),
            );
            self.ctx_mut(id).state = ContextState::Terminated;
            self.diagnostics
                .push(LayoutError::RollbackExhausted { markup, count });
            return LayoutResult::TooManyRollback;
        }
        self.ctx_mut(id).cache.push(element);
        LayoutResult::Ok
    }

    /// Take the most recently cached element of `id`.
    ///
    /// The element is replayed as it was cached, except for the flags that
    /// described where it ended last time.
    pub fn pop_cache(&mut self, id: ContextId) -> Option<Element> {
        let mut element = self.ctx_mut(id).cache.pop()?;
        if let Element::Box(output) = &mut element {
            output.break_after = false;
            if output.line_over {
                output.line_over = false;
                let flow = output.flow;
                if let Some(edge) = output.edge.as_mut() {
                    edge.clear_side(flow, LogicalSide::End);
                }
            }
        }
        Some(element)
    }

    /// [§ 3.1 Hanging Punctuation](https://www.w3.org/TR/css-text-3/#hanging-punctuation-property)
    ///
    /// > When a punctuation mark hangs, it is not considered when measuring
    /// > the line's contents for fit.
    ///
    /// The mark is placed on the line of the style it belongs to, with zero
    /// measure. Any other context keeps it for its own output, which carries
    /// it one level further up.
    pub(crate) fn add_hanging_punctuation(&mut self, id: ContextId, mark: HangingMark) {
        let style = self.ctx(id).style;
        if mark.style != style {
            if let Some(layout) = self.layout_mut(id) {
                layout.inline.hanging = Some(mark);
            }
            return;
        }
        let flow = self.flow_of(id);
        let font = mark.token.font_size.max(self.style_of(id).font.size);
        let mut output = self.new_box(style, BoxType::TextBlock, flow.box_size(0, font));
        output.css.clear();
        output.hanging_char = true;
        output.char_count = mark.token.char_count();
        output.max_font_size = font;
        output.elements.push(Element::Text(mark.token));
        if let Some(layout) = self.layout_mut(id) {
            layout.inline.add_box(output, 0, flow);
        }
    }
}

/// Rt annotations add their own extent to a text run.
pub(crate) fn has_ruby_text(layout: &LayoutContext) -> bool {
    layout
        .inline
        .elements()
        .iter()
        .filter_map(Element::as_text)
        .any(|token| token.kind == TextKind::Ruby && token.rt.is_some())
}
