//! Inline axis accumulator.

use crate::layout::layout_box::{Element, HangingMark, LayoutBox};
use crate::style::flow::BoxFlow;
use crate::text::TextToken;

/// Collects the elements of one line along the inline axis.
#[derive(Debug, Clone, Default)]
pub struct InlineContext {
    /// Measure used so far.
    pub cur_measure: i32,
    /// Measure available.
    pub max_measure: i32,
    /// Largest font of any element.
    pub max_font_size: i32,
    /// Shown characters.
    pub char_count: usize,
    /// The line ends at a forced break.
    pub line_break: bool,
    /// The line ended because the next element did not fit.
    pub line_over: bool,
    /// The line end was moved by the line-break rules.
    pub hyphenated: bool,
    /// A hanging character waiting for its owning line.
    pub hanging: Option<HangingMark>,
    max_extent: i32,
    elements: Vec<Element>,
}

impl InlineContext {
    /// An empty line with `max_measure` available.
    #[must_use]
    pub fn new(max_measure: i32) -> Self {
        Self {
            max_measure,
            ..Self::default()
        }
    }

    /// `max_measure - cur_measure`
    #[must_use]
    pub const fn rest_measure(&self) -> i32 {
        self.max_measure - self.cur_measure
    }

    /// A line with no elements and no forced break.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.line_break && self.elements.is_empty()
    }

    /// Largest extent of any element, zero for an empty line.
    #[must_use]
    pub fn max_extent(&self) -> i32 {
        if self.is_empty() { 0 } else { self.max_extent }
    }

    /// Add a text token that takes `measure`.
    pub fn add_text(&mut self, token: TextToken, measure: i32) {
        self.cur_measure += measure;
        self.char_count += token.char_count();
        self.max_font_size = self.max_font_size.max(token.font_size);
        self.elements.push(Element::Text(token));
    }

    /// Add a box that takes `measure`. Its extent and font raise the line's.
    pub fn add_box(&mut self, element: LayoutBox, measure: i32, flow: BoxFlow) {
        self.cur_measure += measure;
        self.char_count += element.char_count;
        let extent = element.layout_extent(flow).max(element.max_extent);
        self.max_extent = self.max_extent.max(extent);
        self.max_font_size = self.max_font_size.max(element.max_font_size);
        if element.hyphenated {
            self.hyphenated = true;
        }
        self.elements.push(element.into());
    }

    /// Raise the line extent without adding anything.
    pub fn raise_extent(&mut self, extent: i32) {
        self.max_extent = self.max_extent.max(extent);
    }

    /// The elements in line order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The last element.
    #[must_use]
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Remove the last element. The caller gives back its `measure`.
    pub fn pop(&mut self, measure: i32) -> Option<Element> {
        let element = self.elements.pop()?;
        self.cur_measure -= measure;
        self.char_count = self.char_count.saturating_sub(element.char_count());
        Some(element)
    }

    /// Remove `elements[index..]`. The caller gives back their `measure`.
    pub fn split_off(&mut self, index: usize, measure: i32) -> Vec<Element> {
        let tail = self.elements.split_off(index.min(self.elements.len()));
        self.cur_measure -= measure;
        let removed: usize = tail.iter().map(Element::char_count).sum();
        self.char_count = self.char_count.saturating_sub(removed);
        tail
    }

    /// Replace the last element in place, adjusting the measure by `delta`.
    pub fn replace_last(&mut self, element: Element, delta: i32) {
        if let Some(last) = self.elements.last_mut() {
            let removed = last.char_count();
            *last = element;
            self.char_count = self.char_count.saturating_sub(removed) + last.char_count();
            self.cur_measure += delta;
        }
    }

    /// Take every element.
    pub fn take_elements(&mut self) -> Vec<Element> {
        std::mem::take(&mut self.elements)
    }

    /// [§ 5.2 Breaking Rules for Letters](https://www.w3.org/TR/css-text-3/#line-break-property)
    ///
    /// > Certain characters must not be placed at the start of a line, and
    /// > certain others must not be placed at the end of a line.
    ///
    /// `head` is the token that would start the next line. Walks back from
    /// the tail while the next line would begin with a head-NG character or
    /// the current one would end with a tail-NG character, and returns the
    /// index of the first element that must move to the next line.
    ///
    /// Returns `None` when nothing has to move, when the tail is a divided
    /// word, and when every element would move.
    #[must_use]
    pub fn hyphenate_sweep(&self, head: &TextToken) -> Option<usize> {
        let tail = self.elements.last()?.as_text()?;
        if !tail.is_tail_ng() && !head.is_head_ng() {
            return None;
        }
        if tail.is_word() && tail.divided {
            return None;
        }
        let mut head_ng = head.is_head_ng();
        let mut kept = self.elements.len();
        while kept > 0 {
            let Some(tail) = self.elements[kept - 1].as_text() else {
                break;
            };
            if tail.is_word() && tail.divided {
                break;
            }
            if !head_ng && !tail.is_tail_ng() {
                break;
            }
            head_ng = tail.is_head_ng();
            kept -= 1;
        }
        (kept > 0 && kept < self.elements.len()).then_some(kept)
    }
}
