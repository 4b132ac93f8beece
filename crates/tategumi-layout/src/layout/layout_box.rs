//! Output boxes.
//!
//! A [`LayoutBox`] is what generators yield: a physical size, an optional
//! edge, and elements that are either nested boxes or text tokens. The
//! finished tree of one page is handed to a
//! [`BoxRenderer`](crate::render::BoxRenderer).

use std::any::Any;

use serde::Serialize;
use strum_macros::Display;

use crate::layout::box_edge::BoxEdge;
use crate::style::flow::{BoxFlow, BoxSize};
use crate::style::keywords::DisplayKind;
use crate::style::node::StyleId;
use crate::style::values::{BoxHook, CssMap};
use crate::text::TextToken;

/// What a box holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum BoxType {
    /// Stacked boxes along the block axis.
    #[default]
    Block,
    /// One line: boxes and text runs along the inline axis.
    LineBlock,
    /// A run of text tokens.
    TextBlock,
}

/// One element of a box.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Element {
    /// A nested box.
    Box(Box<LayoutBox>),
    /// A text token.
    Text(TextToken),
}

impl Element {
    /// The box, if this element is one.
    #[must_use]
    pub fn as_box(&self) -> Option<&LayoutBox> {
        match self {
            Self::Box(b) => Some(b),
            Self::Text(_) => None,
        }
    }

    /// The text token, if this element is one.
    #[must_use]
    pub const fn as_text(&self) -> Option<&TextToken> {
        match self {
            Self::Text(token) => Some(token),
            Self::Box(_) => None,
        }
    }

    /// Shown characters.
    #[must_use]
    pub fn char_count(&self) -> usize {
        match self {
            Self::Box(b) => b.char_count,
            Self::Text(token) => token.char_count(),
        }
    }

    /// How often this element went through a rollback cache.
    pub const fn cache_count_mut(&mut self) -> &mut u32 {
        match self {
            Self::Box(b) => &mut b.cache_count,
            Self::Text(token) => &mut token.cache_count,
        }
    }
}

impl From<LayoutBox> for Element {
    fn from(layout_box: LayoutBox) -> Self {
        Self::Box(Box::new(layout_box))
    }
}

impl From<TextToken> for Element {
    fn from(token: TextToken) -> Self {
        Self::Text(token)
    }
}

/// A head-NG character that hangs past the end of a line.
///
/// It travels up through the boxes of a line until it reaches the context
/// of `style`, which appends it with zero measure.
#[derive(Debug, Clone, PartialEq)]
pub struct HangingMark {
    /// The hanging character.
    pub token: TextToken,
    /// The style whose line receives the character.
    pub style: StyleId,
}

/// A laid out box.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutBox {
    /// What the box holds.
    #[serde(rename = "type")]
    pub box_type: BoxType,
    /// Display of the producing style.
    pub display: DisplayKind,
    /// Flow of the producing style.
    pub flow: BoxFlow,
    /// Physical content size.
    pub size: BoxSize,
    /// Padding, border and margin.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge: Option<BoxEdge>,
    /// Children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub elements: Vec<Element>,
    /// Raw content of lazy boxes, shown as is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Markup name of the producing style.
    pub markup: String,
    /// Markup classes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    /// Css passed through to renderers.
    #[serde(skip_serializing_if = "CssMap::is_empty")]
    pub css: CssMap,
    /// Document-unique id of a block box.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_id: Option<usize>,
    /// Line number of a root line within its block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_no: Option<usize>,
    /// Shown characters, nested boxes included.
    pub char_count: usize,
    /// Largest extent of anything on a line.
    pub max_extent: i32,
    /// Largest font on a line.
    pub max_font_size: i32,
    /// Measure actually used by a root line.
    pub inline_measure: i32,
    /// The page (or enclosing block) ends after this box.
    pub break_after: bool,
    /// Placed at the end of its block.
    pub pushed: bool,
    /// Placed at the front of its block.
    pub pulled: bool,
    /// The line end was moved by the line-break rules.
    pub hyphenated: bool,
    /// The line ended because the next element did not fit.
    pub line_over: bool,
    /// The line ended at a forced break.
    pub has_line_break: bool,
    /// This text box is a hanging character.
    pub hanging_char: bool,
    /// A hanging character on its way to its owning line.
    #[serde(skip)]
    pub hanging: Option<HangingMark>,
    /// Stream position a text box ended at.
    #[serde(skip)]
    pub pos: Option<usize>,
    /// Rollback counter.
    #[serde(skip)]
    pub cache_count: u32,
    /// The `oncreate` hook of the producing style.
    #[serde(skip)]
    pub hook: Option<BoxHook>,
    /// The producing style.
    #[serde(skip)]
    pub style: Option<StyleId>,
}

impl LayoutBox {
    /// An empty box of the given kind and size.
    #[must_use]
    pub fn new(box_type: BoxType, flow: BoxFlow, size: BoxSize) -> Self {
        Self {
            box_type,
            flow,
            size,
            ..Self::default()
        }
    }

    /// Content measure in `flow`.
    #[must_use]
    pub const fn content_measure(&self, flow: BoxFlow) -> i32 {
        flow.measure_of(self.size)
    }

    /// Content extent in `flow`.
    #[must_use]
    pub const fn content_extent(&self, flow: BoxFlow) -> i32 {
        flow.extent_of(self.size)
    }

    /// Measure including the edge, as a parent in `flow` sees it.
    #[must_use]
    pub fn layout_measure(&self, flow: BoxFlow) -> i32 {
        self.content_measure(flow) + self.edge.map_or(0, |edge| edge.measure(flow))
    }

    /// Extent including the edge, as a parent in `flow` sees it.
    #[must_use]
    pub fn layout_extent(&self, flow: BoxFlow) -> i32 {
        self.content_extent(flow) + self.edge.map_or(0, |edge| edge.extent(flow))
    }

    /// Overwrite the content extent.
    pub const fn resize_extent(&mut self, flow: BoxFlow, extent: i32) {
        flow.set_extent(&mut self.size, extent);
    }

    /// A box with no extent and no line break takes no room. Consumers treat
    /// it as absent, but its `break_after` still counts.
    #[must_use]
    pub fn is_void(&self, flow: BoxFlow) -> bool {
        self.layout_extent(flow) == 0 && !self.has_line_break
    }

    /// Run the `oncreate` hook, if any, with the renderer's output handle.
    pub fn invoke_hook(&self, output: &mut dyn Any) {
        if let Some(hook) = &self.hook {
            hook.call(output, self);
        }
    }

    /// Markup of the innermost box whose extent exceeds `limit`. Line and
    /// wrapper boxes only inherit the extent of the child that is too large.
    #[must_use]
    pub fn oversize_markup(&self, flow: BoxFlow, limit: i32) -> &str {
        self.boxes()
            .find(|child| child.layout_extent(flow) > limit)
            .map_or(self.markup.as_str(), |child| child.oversize_markup(flow, limit))
    }

    /// Nested boxes.
    pub fn boxes(&self) -> impl Iterator<Item = &Self> {
        self.elements.iter().filter_map(Element::as_box)
    }

    /// All text of the box, nested boxes included, hanging characters too.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }
}

fn collect_text(layout_box: &LayoutBox, out: &mut String) {
    if let Some(content) = &layout_box.content {
        out.push_str(content);
    }
    for element in &layout_box.elements {
        match element {
            Element::Box(b) => collect_text(b, out),
            Element::Text(token) => {
                out.push_str(&token.data);
                if let Some(rt) = &token.rt {
                    out.push('(');
                    out.push_str(rt);
                    out.push(')');
                }
            }
        }
    }
}
