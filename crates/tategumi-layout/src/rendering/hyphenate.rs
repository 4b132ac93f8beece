//! Line-break rules applied when a text run ends.
//!
//! [§ 5.2 Breaking Rules for Letters](https://www.w3.org/TR/css-text-3/#line-break-property)
//!
//! > Certain characters must not be placed at the start of a line, and
//! > certain others must not be placed at the end of a line.
//!
//! A run that filled its line looks at the token that would start the next
//! line. A head-NG character there may hang past the line end; otherwise the
//! end of the line is swept back until neither rule is broken, and the
//! swept tokens are read again on the next line. When the run itself is
//! over, the next token lives in a sibling's stream and only the simple
//! cases are handled.

use tategumi_common::layout_trace;
use tategumi_markup::MarkupToken;

use crate::error::LayoutError;
use crate::layout::{Element, HangingMark};
use crate::rendering::{ContextId, LayoutEngine};
use crate::style::StyleId;
use crate::text::TextToken;
use crate::text::char_class::is_head_ng;
use crate::text::token::TextKind;

impl LayoutEngine {
    /// Whether the run of `id` ended close enough to the line end for the
    /// line-break rules to matter.
    pub(crate) fn is_hyphenate_enable(&self, id: ContextId) -> bool {
        let style = self.style_of(id);
        if !style.is_hyphenation_enabled() {
            return false;
        }
        let Some(layout) = self.layout_of(id) else {
            return false;
        };
        if layout.inline.is_empty() || layout.inline.line_break {
            return false;
        }
        let font = style.font.size;
        let head_advance = self
            .ctx(id)
            .cache
            .last()
            .and_then(Element::as_text)
            .map_or(0, |token| token.advance(style.letter_spacing));
        head_advance > font || layout.inline.rest_measure() < font
    }

    /// Apply the line-break rules to the run of `id`.
    ///
    /// # Errors
    ///
    /// Returns a [`LayoutError`] if a stream position recorded on a token
    /// is out of range.
    pub(crate) fn hyphenate(&mut self, id: ContextId) -> Result<(), LayoutError> {
        let cached = self.ctx(id).cache.last().and_then(Element::as_text).cloned();
        let Some(stream) = self.text_stream(id) else {
            return Ok(());
        };
        let (head, next) = match cached {
            Some(head) => (Some(head), stream.peek(0).cloned()),
            None => (stream.peek(0).cloned(), stream.peek(1).cloned()),
        };
        let Some(head) = head else {
            return self.hyphenate_sibling(id);
        };

        // STEP 1: A head-NG character that would start the next line hangs.
        if self.style_of(id).is_hanging_punctuation_enabled()
            && head.as_char().is_some_and(is_head_ng)
            && !next.as_ref().is_some_and(TextToken::is_head_ng)
        {
            return self.hang_head(id, head);
        }

        // STEP 2: Sweep the line end back.
        let Some(index) = self.layout_of(id).and_then(|l| l.inline.hyphenate_sweep(&head)) else {
            return Ok(());
        };
        let letter_spacing = self.style_of(id).letter_spacing;
        let flow = self.flow_of(id);
        let Some(layout) = self.layout_of(id) else {
            return Ok(());
        };
        let elements = layout.inline.elements();
        let last_word = (index + 1 == elements.len())
            .then(|| elements[index].as_text())
            .flatten()
            .filter(|token| token.is_word() && token.char_count() >= 2)
            .cloned();

        if let Some(mut word) = last_word {
            // A single swept word only gives up its last character.
            let old_advance = word.advance(letter_spacing);
            let Some(pos) = word.pos else {
                return Ok(());
            };
            let Some(tail) = word.cut_tail(&*self.metrics, flow) else {
                return Ok(());
            };
            if let Some(stream) = self.text_stream(id) {
                stream.replace(pos, tail)?;
                stream.set_pos(pos)?;
            }
            let delta = word.advance(letter_spacing) - old_advance;
            if let Some(layout) = self.layout_mut(id) {
                layout.inline.replace_last(Element::Text(word), delta);
            }
        } else {
            let swept = &elements[index..];
            let measure: i32 = swept
                .iter()
                .filter_map(Element::as_text)
                .map(|token| token.advance(letter_spacing))
                .sum();
            let Some(pos) = swept.first().and_then(Element::as_text).and_then(|t| t.pos) else {
                return Ok(());
            };
            if let Some(layout) = self.layout_mut(id) {
                let _ = layout.inline.split_off(index, measure);
            }
            if let Some(stream) = self.text_stream(id) {
                stream.set_pos(pos)?;
            }
        }
        layout_trace!("Hyphenate", "swept line end back to element {index}");
        self.end_hyphenated_line(id);
        Ok(())
    }

    /// Put `head` at the end of the line with zero measure.
    fn hang_head(&mut self, id: ContextId, mut head: TextToken) -> Result<(), LayoutError> {
        if !head.has_metrics {
            let font = self.style_of(id).font.size;
            let flow = self.flow_of(id);
            head.set_metrics(&*self.metrics, font, flow, &self.config);
        }
        if let Some(stream) = self.text_stream(id) {
            match head.pos {
                Some(pos) => stream.set_pos(pos + 1)?,
                None => {
                    let _ = stream.get();
                }
            }
        }
        layout_trace!("Hyphenate", "hang '{}'", head.data);
        if let Some(layout) = self.layout_mut(id) {
            layout.inline.add_text(head, 0);
        }
        self.end_hyphenated_line(id);
        Ok(())
    }

    /// The next line starts in a sibling's stream.
    ///
    /// A head-NG character at the start of the sibling's next text becomes a
    /// hanging mark carried up to the sibling's line. Otherwise a tail-NG
    /// character at the end of this run moves to the next line.
    fn hyphenate_sibling(&mut self, id: ContextId) -> Result<(), LayoutError> {
        let Some(sibling) = self.sibling_context(id) else {
            return Ok(());
        };
        let sibling_style = self.ctx(sibling).style;
        let sibling_font = self.styles.get(sibling_style).font.size;
        let Some(rest) = self.layout_of(id).map(|l| l.inline.rest_measure()) else {
            return Ok(());
        };
        if rest > sibling_font {
            return Ok(());
        }

        if self.style_of(id).is_hanging_punctuation_enabled() {
            if let Some(mark) = self.take_sibling_head(sibling, sibling_style, sibling_font)? {
                if let Some(layout) = self.layout_mut(id) {
                    layout.inline.hanging = Some(mark);
                }
                return Ok(());
            }
        }

        let letter_spacing = self.style_of(id).letter_spacing;
        let Some(layout) = self.layout_of(id) else {
            return Ok(());
        };
        let elements = layout.inline.elements();
        let Some(tail) = elements.last().and_then(Element::as_text) else {
            return Ok(());
        };
        if elements.len() < 2 || tail.kind != TextKind::Char || !tail.is_tail_ng() {
            return Ok(());
        }
        let measure = tail.advance(letter_spacing);
        let Some(pos) = tail.pos else {
            return Ok(());
        };
        if let Some(layout) = self.layout_mut(id) {
            let _ = layout.inline.pop(measure);
        }
        if let Some(stream) = self.text_stream(id) {
            stream.set_pos(pos)?;
        }
        self.end_hyphenated_line(id);
        Ok(())
    }

    /// Take a hanging head-NG character off the front of the next text of
    /// `sibling`'s stream.
    fn take_sibling_head(
        &mut self,
        sibling: ContextId,
        style: StyleId,
        font: i32,
    ) -> Result<Option<HangingMark>, LayoutError> {
        let Some(stream) = self.markup_stream(sibling) else {
            return Ok(None);
        };
        let Some(MarkupToken::Text(text)) = stream.peek(0) else {
            return Ok(None);
        };
        let mut chars = text.chars();
        let Some(first) = chars.next() else {
            return Ok(None);
        };
        if !is_head_ng(first) || chars.next().is_some_and(is_head_ng) {
            return Ok(None);
        }
        let rest = text[first.len_utf8()..].to_string();
        let pos = stream.pos();
        stream.replace(pos, MarkupToken::Text(rest))?;

        let flow = self.styles.get(style).flow;
        let mut token = TextToken::char(first);
        token.set_metrics(&*self.metrics, font, flow, &self.config);
        layout_trace!("Hyphenate", "hang '{first}' from the next sibling");
        Ok(Some(HangingMark { token, style }))
    }

    fn end_hyphenated_line(&mut self, id: ContextId) {
        self.ctx_mut(id).cache.clear();
        if let Some(layout) = self.layout_mut(id) {
            layout.inline.line_break = true;
            layout.inline.hyphenated = true;
        }
    }
}
