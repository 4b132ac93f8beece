//! Text generator.
//!
//! Turns a text stream into text runs. Whitespace is collapsed here unless
//! the style preserves it, words that do not fit the rest of the line are
//! cut or carried to the next line, and once a run ends the line-break
//! rules may move its end (see `rendering::hyphenate`).

use tategumi_common::warning::warn_once;

use crate::error::LayoutError;
use crate::layout::{BoxType, Element, LayoutBox};
use crate::rendering::{ContextId, LayoutEngine};
use crate::rendering::has_ruby_text;
use crate::text::TextToken;
use crate::text::spacing::apply_spacing;
use crate::text::token::rt_extent;

impl LayoutEngine {
    /// Yield one text run of `id`.
    pub(crate) fn yield_text(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        self.init_layout_context(id);
        loop {
            let token = self.text_next_element(id)?;
            if !self.add_text_element(id, token).is_inline_continue() {
                break;
            }
        }
        self.create_text_output(id)
    }

    /// Next token of `id`, measured and fitted to the rest of the line.
    pub(crate) fn text_next_element(&mut self, id: ContextId) -> Result<Option<TextToken>, LayoutError> {
        let token = match self.pop_cache(id) {
            Some(Element::Text(token)) => token,
            Some(Element::Box(_)) | None => match self.read_text_token(id) {
                Some(token) => token,
                None => return Ok(None),
            },
        };
        if token.is_word() {
            return self.fit_word(id, token).map(Some);
        }
        Ok(Some(token))
    }

    /// Read and measure the next token from the stream.
    ///
    /// [§ 4.1.1 Phase I: Collapsing and Transformation](https://www.w3.org/TR/css-text-3/#white-space-phase-1)
    ///
    /// > Any collapsible space immediately following another collapsible
    /// > space is collapsed to have zero advance width.
    fn read_text_token(&mut self, id: ContextId) -> Option<TextToken> {
        let pre = self.style_of(id).is_pre();
        let font = self.style_of(id).font.size;
        let flow = self.flow_of(id);
        let stream = self.text_stream(id)?;
        let mut token = stream.get()?;
        if token.is_white_space() {
            if !pre {
                let _ = stream.take_while(TextToken::is_white_space);
                " ".clone_into(&mut token.data);
            } else if token.is_newline() {
                if token.data == "\r" && stream.peek(0).is_some_and(|t| t.data == "\n") {
                    let _ = stream.get();
                }
                if let Some(layout) = self.layout_mut(id) {
                    layout.inline.line_break = true;
                }
                return None;
            } else if token.data == "\t" {
                " ".clone_into(&mut token.data);
            }
        }
        let next = stream.peek(0).cloned();

        if !token.has_metrics {
            token.set_metrics(&*self.metrics, font, flow, &self.config);
        }
        if self.config.kerning {
            let prev = self
                .layout_of(id)
                .and_then(|l| l.inline.last())
                .and_then(Element::as_text)
                .cloned();
            apply_spacing(&mut token, prev.as_ref(), next.as_ref());
        }
        Some(token)
    }

    /// Fit a word to the rest of the line.
    ///
    /// A word that fits, or that fits an empty line and may not be broken,
    /// is returned as is; in the second case it overflows and waits for the
    /// next line in the cache. Anything else is cut at the line end, and the
    /// rest goes back into the stream at the word's position.
    fn fit_word(&mut self, id: ContextId, mut token: TextToken) -> Result<TextToken, LayoutError> {
        let style = self.style_of(id);
        let (letter_spacing, break_all, flow) = (style.letter_spacing, style.is_break_all(), style.flow);
        let Some(layout) = self.layout_of(id) else {
            return Ok(token);
        };
        let rest = layout.inline.rest_measure();
        let line_empty = layout.inline.cur_measure == 0;
        let advance = token.advance(letter_spacing);
        if advance <= rest {
            return Ok(token);
        }
        if advance <= self.line_max_measure(id) && !break_all {
            return Ok(token);
        }

        let body_rest = rest - token.space_before - letter_spacing;
        let pos = token.pos;
        let head = token.cut_measure(&*self.metrics, flow, body_rest);
        match (head, pos) {
            (Some(mut head), Some(pos)) => {
                head.body_size = head.body_size.min(rest);
                if let Some(stream) = self.text_stream(id) {
                    stream.replace(pos, token)?;
                    stream.set_pos(pos)?;
                }
                Ok(head)
            }
            _ if !line_empty => Ok(token),
            _ => {
                warn_once(
                    "Layout",
                    &format!("word '{}' cannot be cut to the line, skipped", token.data),
                );
                token.data.clear();
                token.body_size = 0;
                token.space_before = 0;
                token.space_after = 0;
                Ok(token)
            }
        }
    }

    /// Measure of a whole line around `id`: the max measure of the inline
    /// root the text belongs to.
    fn line_max_measure(&self, id: ContextId) -> i32 {
        self.lineage(id)
            .find(|&c| self.is_inline_root(c))
            .and_then(|c| self.layout_of(c))
            .map_or_else(
                || self.root_content_measure(self.flow_of(id)),
                |l| l.inline.max_measure,
            )
    }

    /// Finish the run of `id`, applying the line-break rules first.
    pub(crate) fn create_text_output(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        if self.layout_of(id).is_none_or(|l| l.inline.is_empty()) {
            return Ok(None);
        }
        if self.is_hyphenate_enable(id) {
            self.hyphenate(id)?;
        }
        Ok(self.create_text_box(id))
    }

    fn create_text_box(&mut self, id: ContextId) -> Option<LayoutBox> {
        let style_id = self.ctx(id).style;
        let pos = self.text_stream(id).map(|stream| stream.pos());
        let style = self.styles.get(style_id);
        let (flow, font) = (style.flow, style.font.size);
        let layout = self.layout_of(id)?;
        let empty = layout.inline.elements().is_empty();
        let extent = if empty {
            0
        } else if let Some(empha) = &style.text_empha {
            empha.extent(font, &self.config)
        } else if has_ruby_text(layout) {
            font + rt_extent(font, &self.config)
        } else {
            font
        };
        let measure = layout.inline.cur_measure;

        let mut output = self.new_box(style_id, BoxType::TextBlock, flow.box_size(measure, extent));
        let inline = &mut self.ctx_mut(id).layout.as_mut()?.inline;
        output.char_count = inline.char_count;
        output.max_extent = extent;
        output.max_font_size = font;
        output.has_line_break = inline.line_break;
        output.line_over = inline.line_over;
        output.hyphenated = inline.hyphenated;
        output.hanging = inline.hanging.take();
        output.elements = inline.take_elements();
        output.pos = pos;
        Some(output)
    }
}
