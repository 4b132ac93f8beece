//! Text-level tokens.
//!
//! Text is lexed into characters, half-width words, tate-chu-yoko runs and
//! ruby pairs. A token carries its position in the text stream so that
//! hyphenation can rewind to it, and its measured body size once metrics
//! were applied for a given font.

use serde::Serialize;

use crate::config::LayoutConfig;
use crate::style::flow::BoxFlow;
use crate::style::values::floor_px;
use crate::text::char_class::{
    is_head_ng, is_kerning_char, is_tail_ng, is_white_space, is_zenkaku,
};
use crate::text::metrics::FontMetrics;

/// The kind of a text token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextKind {
    /// One character.
    Char,
    /// A run of half-width characters laid out sideways as one unit.
    Word,
    /// Tate-chu-yoko: a short horizontal run set upright in one em.
    Tcy,
    /// Base text with an optional annotation.
    Ruby,
}

/// One text token.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextToken {
    /// Token kind.
    pub kind: TextKind,
    /// The text (the base text for ruby).
    pub data: String,
    /// Ruby annotation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rt: Option<String>,
    /// Index in the owning text stream.
    #[serde(skip)]
    pub pos: Option<usize>,
    /// Measured advance without spacing, once metrics are set.
    pub body_size: i32,
    /// Font size used for the metrics.
    pub font_size: i32,
    /// Ideographic spacing inserted before the glyph.
    pub space_before: i32,
    /// Ideographic spacing inserted after the glyph.
    pub space_after: i32,
    /// A word that was split at a line end.
    pub divided: bool,
    /// Metrics were applied.
    #[serde(skip)]
    pub has_metrics: bool,
    /// Rollback counter.
    #[serde(skip)]
    pub cache_count: u32,
}

impl TextToken {
    fn new(kind: TextKind, data: &str) -> Self {
        Self {
            kind,
            data: data.to_string(),
            rt: None,
            pos: None,
            body_size: 0,
            font_size: 0,
            space_before: 0,
            space_after: 0,
            divided: false,
            has_metrics: false,
            cache_count: 0,
        }
    }

    /// A single character.
    #[must_use]
    pub fn char(c: char) -> Self {
        Self::new(TextKind::Char, c.encode_utf8(&mut [0; 4]))
    }

    /// A half-width word.
    #[must_use]
    pub fn word(data: &str) -> Self {
        Self::new(TextKind::Word, data)
    }

    /// A tate-chu-yoko run.
    #[must_use]
    pub fn tcy(data: &str) -> Self {
        Self::new(TextKind::Tcy, data)
    }

    /// A ruby pair.
    #[must_use]
    pub fn ruby(rb: &str, rt: Option<&str>) -> Self {
        let mut token = Self::new(TextKind::Ruby, rb);
        token.rt = rt.map(str::to_string);
        token
    }

    /// Set the stream position.
    #[must_use]
    pub const fn at(mut self, pos: usize) -> Self {
        self.pos = Some(pos);
        self
    }

    /// The first character.
    #[must_use]
    pub fn first_char(&self) -> Option<char> {
        self.data.chars().next()
    }

    /// The character of a `Char` token.
    #[must_use]
    pub fn as_char(&self) -> Option<char> {
        match self.kind {
            TextKind::Char => self.first_char(),
            _ => None,
        }
    }

    /// Collapsible whitespace character.
    #[must_use]
    pub fn is_white_space(&self) -> bool {
        self.as_char().is_some_and(is_white_space)
    }

    /// A newline character.
    #[must_use]
    pub fn is_newline(&self) -> bool {
        matches!(self.as_char(), Some('\n' | '\r'))
    }

    /// A character that must not begin a line.
    #[must_use]
    pub fn is_head_ng(&self) -> bool {
        self.as_char().is_some_and(is_head_ng)
    }

    /// A character that must not end a line.
    #[must_use]
    pub fn is_tail_ng(&self) -> bool {
        self.as_char().is_some_and(is_tail_ng)
    }

    /// Returns `true` for a word token.
    #[must_use]
    pub fn is_word(&self) -> bool {
        self.kind == TextKind::Word
    }

    /// Number of characters this token shows.
    #[must_use]
    pub fn char_count(&self) -> usize {
        match self.kind {
            TextKind::Char | TextKind::Tcy => 1,
            TextKind::Word | TextKind::Ruby => self.data.chars().count(),
        }
    }

    /// Advance along the line, spacing and letter spacing included.
    #[must_use]
    pub const fn advance(&self, letter_spacing: i32) -> i32 {
        self.body_size + self.space_before + self.space_after + letter_spacing
    }

    /// Measure the token for `font_size`.
    pub fn set_metrics(
        &mut self,
        metrics: &dyn FontMetrics,
        font_size: i32,
        flow: BoxFlow,
        config: &LayoutConfig,
    ) {
        self.font_size = font_size;
        self.body_size = match self.kind {
            TextKind::Char => match self.first_char() {
                Some(c) if config.kerning && is_kerning_char(c) => font_size / 2,
                Some(c) if is_white_space(c) && flow.is_vertical() => font_size / 2,
                Some(c) => metrics.char_advance(c, font_size, flow),
                None => 0,
            },
            TextKind::Word => metrics.text_advance(&self.data, font_size, flow),
            TextKind::Tcy => font_size,
            TextKind::Ruby => {
                let rb = metrics.text_advance(&self.data, font_size, flow);
                let rt = self.rt.as_deref().map_or(0, |rt| {
                    metrics.text_advance(rt, rt_font_size(font_size, config), flow)
                });
                rb.max(rt)
            }
        };
        self.has_metrics = true;
    }

    /// Split a word so that the returned head fits in `measure`.
    ///
    /// `self` keeps the rest. Both halves are marked divided. Returns `None`
    /// when not even one character fits or the token is not a word.
    pub fn cut_measure(
        &mut self,
        metrics: &dyn FontMetrics,
        flow: BoxFlow,
        measure: i32,
    ) -> Option<Self> {
        if self.kind != TextKind::Word {
            return None;
        }
        let mut used = 0;
        let mut split = 0;
        for (i, c) in self.data.char_indices() {
            let advance = metrics.char_advance(c, self.font_size, flow);
            if used + advance > measure {
                break;
            }
            used += advance;
            split = i + c.len_utf8();
        }
        if split == 0 || split >= self.data.len() {
            return None;
        }
        Some(self.split_at(split, metrics, flow))
    }

    /// Split off the last character of a word; `self` keeps the head.
    ///
    /// Used when a line-end sweep would otherwise carry the whole word to
    /// the next line.
    pub fn cut_tail(&mut self, metrics: &dyn FontMetrics, flow: BoxFlow) -> Option<Self> {
        if self.kind != TextKind::Word || self.data.chars().count() < 2 {
            return None;
        }
        let split = self.data.char_indices().last().map(|(i, _)| i)?;
        let head = self.split_at(split, metrics, flow);
        let tail = std::mem::replace(self, head);
        Some(tail)
    }

    fn split_at(&mut self, split: usize, metrics: &dyn FontMetrics, flow: BoxFlow) -> Self {
        let rest = self.data.split_off(split);
        let mut head = self.clone();
        head.space_after = 0;
        head.body_size = metrics.text_advance(&head.data, head.font_size, flow);
        head.divided = true;
        self.data = rest;
        self.space_before = 0;
        self.body_size = metrics.text_advance(&self.data, self.font_size, flow);
        self.divided = true;
        head
    }

    /// Whether this token's glyph is full width.
    #[must_use]
    pub fn is_zenkaku(&self) -> bool {
        self.first_char().is_some_and(is_zenkaku)
    }
}

/// Font size of ruby annotations.
#[must_use]
pub fn rt_font_size(font_size: i32, config: &LayoutConfig) -> i32 {
    floor_px(f64::from(font_size) * config.rt_rate).max(1)
}

/// Extent a ruby annotation adds to a line: the rt font, rounded up to even.
#[must_use]
pub fn rt_extent(font_size: i32, config: &LayoutConfig) -> i32 {
    let extent = rt_font_size(font_size, config);
    if extent % 2 == 0 { extent } else { extent + 1 }
}
