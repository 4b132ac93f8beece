//! Font metrics.
//!
//! Glyph shaping is outside the engine; layout only needs advances. The
//! engine asks a [`FontMetrics`] implementation and ships
//! [`ApproximateFontMetrics`] for tests and for callers without font data.

use crate::style::flow::BoxFlow;
use crate::style::values::floor_px;
use crate::text::char_class::is_zenkaku;

/// Font metrics interface for text measurement during layout.
///
/// Implementors provide the advance of each glyph along the line. The
/// engine sums them for words and ruby, and compares the result against the
/// remaining inline measure to decide line breaks.
pub trait FontMetrics {
    /// Advance of one character at `font_size` in `flow`.
    fn char_advance(&self, ch: char, font_size: i32, flow: BoxFlow) -> i32;

    /// Advance of a run of characters. Defaults to the sum of the chars.
    fn text_advance(&self, text: &str, font_size: i32, flow: BoxFlow) -> i32 {
        text.chars()
            .map(|c| self.char_advance(c, font_size, flow))
            .sum()
    }
}

/// Approximate font metrics using fixed ratios.
///
/// Full-width characters advance one em in every flow. Half-width
/// characters advance half an em, which matches the common case of a CJK
/// face with proportional latin glyphs set at roughly half width.
///
/// This is used as a fallback when no font is available, and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproximateFontMetrics;

impl FontMetrics for ApproximateFontMetrics {
    fn char_advance(&self, ch: char, font_size: i32, _flow: BoxFlow) -> i32 {
        const HALF_WIDTH_RATIO: f64 = 0.5;
        if is_zenkaku(ch) {
            font_size
        } else {
            floor_px(f64::from(font_size) * HALF_WIDTH_RATIO)
        }
    }
}
