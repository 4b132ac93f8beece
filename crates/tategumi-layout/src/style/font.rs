//! Font and emphasis values.

use crate::config::LayoutConfig;
use crate::style::values::floor_px;

/// [§ 3 Basic Font Properties](https://www.w3.org/TR/css-fonts-4/#basic-font-props)
///
/// Only the size and line height take part in layout. Family, weight and
/// style are carried through to the output css.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    /// Font size in pixels, clamped to `[1, max_font_size]`.
    pub size: i32,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
    /// `font-family`
    pub family: Option<String>,
    /// `font-weight`
    pub weight: Option<String>,
    /// `font-style`
    pub style: Option<String>,
}

impl Font {
    /// The root font.
    #[must_use]
    pub fn root(config: &LayoutConfig) -> Self {
        Self {
            size: config.default_font_size.clamp(1, config.max_font_size.max(1)),
            line_height: config.default_line_height,
            family: None,
            weight: None,
            style: None,
        }
    }

    /// Extent of one line of this font: `floor(size * line_height)`.
    #[must_use]
    pub fn line_extent(&self) -> i32 {
        floor_px(f64::from(self.size) * self.line_height)
    }
}

/// Parse a `line-height` value into a multiple of `font_size`.
///
/// Accepts a bare number (`1.8`), a percentage (`180%`) or a length in
/// pixels (`28px`).
#[must_use]
pub fn parse_line_height(value: &str, font_size: i32) -> Option<f64> {
    let value = value.trim();
    if let Some(percent) = value.strip_suffix('%') {
        return percent.trim().parse::<f64>().ok().map(|p| p / 100.0);
    }
    if let Some(px) = value.strip_suffix("px") {
        let px = px.trim().parse::<f64>().ok()?;
        return (font_size > 0).then(|| px / f64::from(font_size));
    }
    value.parse::<f64>().ok()
}

/// [§ 3 Emphasis Marks](https://www.w3.org/TR/css-text-decor-3/#emphasis-marks)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEmpha {
    /// Mark style such as `filled dot` or `open sesame`.
    pub style: String,
}

impl TextEmpha {
    /// Extent of a text run carrying emphasis marks:
    /// `font_size + floor(font_size * empha_rate)`.
    #[must_use]
    pub fn extent(&self, font_size: i32, config: &LayoutConfig) -> i32 {
        font_size + floor_px(f64::from(font_size) * config.empha_rate)
    }
}
