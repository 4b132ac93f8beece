//! Engine configuration.
//!
//! Every tunable of the layout engine lives in one [`LayoutConfig`] value
//! that is handed to [`LayoutEngine`](crate::LayoutEngine) at construction
//! and never mutated afterwards.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::style::flow::BoxFlow;

/// Layout tunables.
///
/// Deserializable with every field optional, so a JSON config only needs the
/// values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// How often one element may be pushed back into a rollback cache
    /// before its context is terminated.
    pub max_rollback_count: u32,
    /// Root font size in pixels.
    pub default_font_size: i32,
    /// Font sizes are clamped to `[1, max_font_size]`.
    pub max_font_size: i32,
    /// Line height as a multiple of the largest font on the line.
    pub default_line_height: f64,
    /// Outside list indent is `(1 + rate) * widest marker`.
    pub list_spacing_rate: f64,
    /// Ruby text font size as a fraction of the base font size.
    pub rt_rate: f64,
    /// Emphasis mark extent as a fraction of the font size.
    pub empha_rate: f64,
    /// Enable half-width brackets and ideographic spacing.
    pub kerning: bool,
    /// Flow of the root element when the style sheet does not set one.
    pub default_flow: BoxFlow,
    /// Markup that is never laid out.
    pub disabled_markups: Vec<String>,
    /// Tags that never have content or an end tag.
    pub single_tags: Vec<String>,
    /// Keyword font sizes (`small`, `x-large`, ...) as css length strings.
    pub abs_font_sizes: BTreeMap<String, String>,
    /// Stop after this many pages even if content remains.
    pub max_page_count: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let abs_font_sizes = [
            ("xx-small", "0.5em"),
            ("x-small", "0.7em"),
            ("small", "0.8em"),
            ("medium", "1em"),
            ("large", "1.2em"),
            ("x-large", "1.5em"),
            ("xx-large", "2em"),
            ("larger", "1.2em"),
            ("smaller", "0.8em"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            max_rollback_count: 5,
            default_font_size: 16,
            max_font_size: 90,
            default_line_height: 2.0,
            list_spacing_rate: 0.4,
            rt_rate: 0.5,
            empha_rate: 1.0,
            kerning: true,
            default_flow: BoxFlow::VerticalRl,
            disabled_markups: ["script", "style", "noscript", "head", "meta", "title", "link"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            single_tags: tategumi_markup::SINGLE_TAGS
                .iter()
                .map(|&s| s.to_string())
                .collect(),
            abs_font_sizes,
            max_page_count: 10_000,
        }
    }
}
