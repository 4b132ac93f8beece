//! Style nodes.
//!
//! A [`StyleNode`] is the resolved style of one markup element. Nodes are
//! created lazily, when a generator descends into the element, and live in
//! a [`StyleTree`] arena addressed by [`StyleId`]. Values are computed once
//! at creation; afterwards only [`StyleTree::update_context_size`] and
//! callback css writes change a node.

use std::collections::BTreeMap;
use std::str::FromStr;

use tategumi_common::warning::warn_once;
use tategumi_markup::Tag;

use crate::config::LayoutConfig;
use crate::layout::box_edge::{BoxEdge, EdgeSizes};
use crate::style::cascade::{CascadeResolver, parse_declarations};
use crate::style::flow::{BoxFlow, BoxSize, LogicalSide, PhysicalSide};
use crate::style::font::{Font, TextEmpha, parse_line_height};
use crate::style::keywords::{
    BoxSizing, ClearKind, DisplayKind, FloatDirection, HangingPunctuation, TextAlign, WhiteSpace,
    WordBreak,
};
use crate::style::list_marker::ListStyle;
use crate::style::selector::SelectorQuery;
use crate::style::selector_context::SelectorContext;
use crate::style::values::{
    BoxHook, ComputedFn, CssMap, CssValue, PropValue, UnitBase, resolve_length,
};
use crate::text::TextOrientation;

/// Handle of a node in a [`StyleTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StyleId(pub(crate) usize);

/// Image sizes known before layout, keyed by the `data-preload-id` attribute.
pub type PreloadMap = BTreeMap<String, BoxSize>;

/// Everything style creation reads but never writes.
#[derive(Clone, Copy)]
pub struct StyleEnv<'a> {
    /// The cascade.
    pub cascade: &'a dyn CascadeResolver,
    /// Engine tunables.
    pub config: &'a LayoutConfig,
    /// Preloaded image sizes.
    pub preloads: &'a PreloadMap,
    /// Physical page size; the root's outer size.
    pub page: BoxSize,
}

/// Properties the engine turns into node fields. Everything else is passed
/// through to the output css of boxes.
const MANAGED_PROPERTIES: &[&str] = &[
    "display",
    "flow",
    "writing-mode",
    "box-sizing",
    "font-size",
    "line-height",
    "measure",
    "extent",
    "width",
    "height",
    "float",
    "clear",
    "content",
    "white-space",
    "word-break",
    "hanging-punctuation",
    "text-align",
    "text-emphasis",
    "text-emphasis-style",
    "letter-spacing",
    "list-style",
    "list-style-type",
    "list-style-position",
    "break-before",
    "break-after",
    "page-break-before",
    "page-break-after",
    "text-orientation",
    "text-combine-upright",
    "border-collapse",
];

/// The resolved style of one markup element.
#[derive(Debug, Clone)]
pub struct StyleNode {
    /// The markup, possibly rewritten by a callback.
    pub markup: Tag,
    /// Parent node.
    pub parent: Option<StyleId>,
    /// Children realized so far, in order.
    pub children: Vec<StyleId>,
    /// The sibling realized just before this node.
    pub prev_sibling: Option<StyleId>,
    /// Registered css after cascade, inline style, `onload` and force.
    pub css: CssMap,
    /// The `oncreate` hook.
    pub hook: Option<BoxHook>,
    /// Inner markup to lay out, `::before` and `::after` included.
    pub content: String,

    /// `display`
    pub display: DisplayKind,
    /// Writing flow.
    pub flow: BoxFlow,
    /// `box-sizing`
    pub box_sizing: BoxSizing,
    /// Font.
    pub font: Font,
    /// Edge, or `None` when every side is zero.
    pub edge: Option<BoxEdge>,

    /// Measure from an attribute or css, if any.
    pub static_measure: Option<i32>,
    /// Extent from an attribute or css, if any.
    pub static_extent: Option<i32>,
    /// Outer measure.
    pub measure: i32,
    /// Outer extent.
    pub extent: i32,
    /// Measure available to content.
    pub content_measure: i32,
    /// Extent available to content.
    pub content_extent: i32,

    /// `word-break` (inherited).
    pub word_break: WordBreak,
    /// `white-space` (inherited).
    pub white_space: WhiteSpace,
    /// `hanging-punctuation` (inherited).
    pub hanging_punctuation: HangingPunctuation,
    /// `text-align` (inherited).
    pub text_align: TextAlign,
    /// `text-emphasis-style` (inherited).
    pub text_empha: Option<TextEmpha>,
    /// `letter-spacing` in pixels.
    pub letter_spacing: i32,
    /// `text-orientation` (inherited).
    pub text_orientation: TextOrientation,
    /// `text-combine-upright: all`.
    pub text_combine: bool,
    /// `list-style` (inherited).
    pub list_style: Option<ListStyle>,
    /// `float`
    pub float_direction: Option<FloatDirection>,
    /// `clear`
    pub clear: Option<ClearKind>,
    /// `break-before: always`
    pub break_before: bool,
    /// `break-after: always`
    pub break_after: bool,
    /// `border-collapse: collapse` (inherited).
    pub border_collapse: bool,
    /// The `pushed` attribute: the box goes to the end of its block.
    pub pushed: bool,
    /// The `pulled` attribute: the box goes to the front of its block.
    pub pulled: bool,
    /// The `lazy` attribute: the content is output unlaid as one box.
    pub lazy: bool,
}

impl StyleNode {
    /// Lowercased markup name.
    #[must_use]
    pub fn markup_name(&self) -> &str {
        self.markup.name()
    }

    /// Returns `true` for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// Returns `true` for `pre` white space.
    #[must_use]
    pub const fn is_pre(&self) -> bool {
        matches!(self.white_space, WhiteSpace::Pre)
    }

    /// Returns `true` when the line-start sweep may run.
    #[must_use]
    pub const fn is_hyphenation_enabled(&self) -> bool {
        !matches!(self.word_break, WordBreak::KeepAll)
    }

    /// Returns `true` when stops and commas may hang past the line end.
    #[must_use]
    pub const fn is_hanging_punctuation_enabled(&self) -> bool {
        matches!(self.hanging_punctuation, HangingPunctuation::AllowEnd)
    }

    /// Returns `true` for `word-break: break-all`.
    #[must_use]
    pub const fn is_break_all(&self) -> bool {
        matches!(self.word_break, WordBreak::BreakAll)
    }

    /// Returns `true` if the node floats.
    #[must_use]
    pub const fn is_floated(&self) -> bool {
        self.float_direction.is_some()
    }

    /// Returns `true` for the engine's page break markers.
    #[must_use]
    pub fn is_page_break(&self) -> bool {
        matches!(self.markup.name(), "page-break" | "end-page")
    }

    /// Line height multiple.
    #[must_use]
    pub const fn line_height(&self) -> f64 {
        self.font.line_height
    }

    /// Extent of one line at this node's font: `floor(size * line_height)`.
    #[must_use]
    pub fn auto_line_extent(&self) -> i32 {
        self.font.line_extent()
    }

    /// Total edge of one logical side, zero without an edge.
    #[must_use]
    pub fn edge_side(&self, side: LogicalSide) -> i32 {
        self.edge.map_or(0, |edge| edge.side(self.flow, side))
    }

    /// Padding and border of one logical side, zero without an edge.
    #[must_use]
    pub fn inner_edge_side(&self, side: LogicalSide) -> i32 {
        self.edge.map_or(0, |edge| edge.inner_side(self.flow, side))
    }

    /// Css values that the engine does not consume, for renderers.
    #[must_use]
    pub fn output_css(&self) -> CssMap {
        let mut css: CssMap = self
            .css
            .iter()
            .filter(|(name, _)| !is_managed(name))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        if let Some(family) = &self.font.family {
            let _ = css.insert("font-family".to_string(), family.as_str().into());
        }
        if let Some(weight) = &self.font.weight {
            let _ = css.insert("font-weight".to_string(), weight.as_str().into());
        }
        if let Some(style) = &self.font.style {
            let _ = css.insert("font-style".to_string(), style.as_str().into());
        }
        css
    }
}

fn is_managed(name: &str) -> bool {
    MANAGED_PROPERTIES.contains(&name)
        || name.starts_with("margin")
        || name.starts_with("padding")
        || name.starts_with("border")
        || name.starts_with("font")
}

/// Arena of style nodes.
#[derive(Debug, Clone, Default)]
pub struct StyleTree {
    nodes: Vec<StyleNode>,
}

impl StyleTree {
    /// An empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The node behind a handle.
    ///
    /// Handles are only minted by this tree, so they are always in range.
    #[must_use]
    pub fn get(&self, id: StyleId) -> &StyleNode {
        &self.nodes[id.0]
    }

    /// Mutable node access.
    pub fn get_mut(&mut self, id: StyleId) -> &mut StyleNode {
        &mut self.nodes[id.0]
    }

    /// Number of nodes ever created, removed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no node was created yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: StyleId) -> impl Iterator<Item = StyleId> + '_ {
        std::iter::successors(self.get(id).parent, |&p| self.get(p).parent)
    }

    /// The root-first path of tags ending at `id`.
    fn path(&self, id: Option<StyleId>) -> Vec<&Tag> {
        let Some(id) = id else {
            return Vec::new();
        };
        let mut path: Vec<&Tag> = self.ancestors(id).map(|a| &self.get(a).markup).collect();
        path.reverse();
        path.push(&self.get(id).markup);
        path
    }

    /// Resolve and link a new node under `parent`.
    ///
    /// [§ 6.1 Cascade Sorting Order](https://www.w3.org/TR/css-cascade-4/#cascade-sort)
    ///
    /// Values are registered in this order, later ones winning:
    /// 1. the cascade (computed callbacks run here, `onload` is held back)
    /// 2. the inline `style` attribute
    /// 3. the `onload` callback
    /// 4. `force`, the engine's own values
    pub fn create(
        &mut self,
        mut markup: Tag,
        parent: Option<StyleId>,
        force: &CssMap,
        env: &StyleEnv<'_>,
    ) -> StyleId {
        // STEP 1: Preloaded image sizes become attributes.
        let preload = markup
            .attrs()
            .data("preload-id")
            .and_then(|key| env.preloads.get(key))
            .copied();
        if let Some(size) = preload {
            markup.attrs_mut().set("width", &size.width.to_string());
            markup.attrs_mut().set("height", &size.height.to_string());
        }

        // STEP 2: Cascade. A pseudo-element is resolved against the path of
        // its originating element.
        let properties = {
            let mut path = self.path(parent);
            match markup.pseudo_element_name() {
                Some(pseudo) => env.cascade.resolve_pseudo(&SelectorQuery::new(path), pseudo),
                None => {
                    path.push(&markup);
                    env.cascade.resolve(&SelectorQuery::new(path))
                }
            }
        };

        let child_index = parent.map_or(0, |p| self.get(p).children.len());
        let mut css = CssMap::new();
        let mut hook = None;
        let mut onload: Option<ComputedFn> = None;
        for (name, value) in properties {
            match value {
                PropValue::Literal(value) => {
                    let _ = css.insert(name, value);
                }
                PropValue::Computed(f) if name == "onload" => onload = Some(f),
                PropValue::Computed(f) => {
                    let value = {
                        let mut ctx =
                            SelectorContext::new(self, parent, &mut markup, &mut css, child_index);
                        f(&mut ctx)
                    };
                    if let Some(value) = value {
                        let _ = css.insert(name, value);
                    }
                }
                PropValue::Hook(h) => hook = Some(h),
            }
        }

        // STEP 3: Inline style.
        let inline = markup.attr("style").map(parse_declarations);
        for (name, value) in inline.into_iter().flatten() {
            if let PropValue::Literal(value) = value {
                let _ = css.insert(name, value);
            }
        }

        // STEP 4: onload.
        if let Some(f) = onload {
            let mut ctx = SelectorContext::new(self, parent, &mut markup, &mut css, child_index);
            let _ = f(&mut ctx);
        }

        // STEP 5: Forced values.
        for (name, value) in force {
            let _ = css.insert(name.clone(), value.clone());
        }

        // STEP 6: Content, with generated `::before` and `::after`.
        let content = self.load_content(&markup, &css, parent, env);

        // STEP 7: Computed fields and sizes.
        let node = self.compute(markup, parent, css, hook, content, env);

        // STEP 8: Link.
        let id = StyleId(self.nodes.len());
        let prev_sibling = parent.and_then(|p| self.get(p).children.last().copied());
        self.nodes.push(StyleNode {
            prev_sibling,
            ..node
        });
        if let Some(p) = parent {
            self.get_mut(p).children.push(id);
        }

        // STEP 9: Collapse against the previous sibling.
        self.collapse_margin(id);
        self.collapse_border(id);
        id
    }

    /// Unlink a node from its parent. Used for nodes created only to be
    /// inspected (float candidates, list item measurements).
    pub fn remove_child(&mut self, id: StyleId) {
        if let Some(parent) = self.get(id).parent {
            self.get_mut(parent).children.retain(|&child| child != id);
        }
    }

    fn load_content(
        &self,
        markup: &Tag,
        css: &CssMap,
        parent: Option<StyleId>,
        env: &StyleEnv<'_>,
    ) -> String {
        let base = match css.get("content").and_then(CssValue::as_str) {
            Some(content) => unquote(content).to_string(),
            None => markup.content().to_string(),
        };
        if markup.is_pseudo_element() || markup.is_self_closing() {
            return base;
        }
        let pseudo_content = |pseudo: &str| {
            let mut path = self.path(parent);
            path.push(markup);
            let properties = env.cascade.resolve_pseudo(&SelectorQuery::new(path), pseudo);
            match properties.get("content") {
                Some(PropValue::Literal(value)) => value
                    .as_str()
                    .map(unquote)
                    .filter(|text| !text.is_empty())
                    .map(|text| format!("<::{pseudo}>{text}</::{pseudo}>")),
                _ => None,
            }
        };
        let mut content = pseudo_content("before").unwrap_or_default();
        content.push_str(&base);
        if let Some(after) = pseudo_content("after") {
            content.push_str(&after);
        }
        content
    }

    fn compute(
        &self,
        markup: Tag,
        parent: Option<StyleId>,
        css: CssMap,
        hook: Option<BoxHook>,
        content: String,
        env: &StyleEnv<'_>,
    ) -> StyleNode {
        let parent_node = parent.map(|p| self.get(p));
        let config = env.config;

        // Display, flow, box-sizing.
        let display = if markup.name() == "li-body" {
            DisplayKind::Block
        } else {
            keyword(&css, "display").unwrap_or_default()
        };
        let parent_flow = parent_node.map_or(config.default_flow, |p| p.flow);
        let flow = match css_str(&css, "flow").or_else(|| css_str(&css, "writing-mode")) {
            None | Some("inherit") => parent_flow,
            Some("flip") => parent_flow.flip(),
            Some(name) => BoxFlow::from_str(name).unwrap_or_else(|_| {
                warn_once("Style", &format!("invalid value '{name}' for 'flow'"));
                parent_flow
            }),
        };
        let lazy = markup.attrs().has("lazy");
        let box_sizing = if lazy {
            BoxSizing::ContentBox
        } else {
            keyword(&css, "box-sizing").unwrap_or_default()
        };

        // Font.
        let parent_font = parent_node.map_or_else(|| Font::root(config), |p| p.font.clone());
        let font = load_font(&css, &parent_font, config);

        // Parent content box, the base of percentages.
        let (parent_measure, parent_extent) = parent_node.map_or(
            (flow.measure_of(env.page), flow.extent_of(env.page)),
            |p| (p.content_measure, p.content_extent),
        );
        let base = |percent_base| UnitBase {
            font_size: font.size,
            root_font_size: config.default_font_size,
            percent_base,
        };

        // Edge.
        let load = |prefix: &str, suffix: &str| {
            load_edge_sizes(&css, prefix, suffix, flow, base(parent_measure), base(parent_extent))
        };
        let padding = load("padding", "");
        let mut margin = load("margin", "");
        let border = load("border", "-width");
        if display.is_inline() {
            margin.set(flow, LogicalSide::Before, 0);
            margin.set(flow, LogicalSide::After, 0);
        }
        let edge = BoxEdge {
            padding,
            border,
            margin,
        };
        let edge = (!edge.is_zero()).then_some(edge);

        // Text rules.
        let word_break = keyword(&css, "word-break")
            .or_else(|| parent_node.map(|p| p.word_break))
            .unwrap_or_default();
        let white_space = keyword(&css, "white-space")
            .or_else(|| parent_node.map(|p| p.white_space))
            .unwrap_or_default();
        let hanging_punctuation = keyword(&css, "hanging-punctuation")
            .or_else(|| parent_node.map(|p| p.hanging_punctuation))
            .unwrap_or_default();
        let text_align = keyword(&css, "text-align")
            .or_else(|| parent_node.map(|p| p.text_align))
            .unwrap_or_default();
        let text_empha = match css_str(&css, "text-emphasis-style")
            .or_else(|| css_str(&css, "text-emphasis"))
        {
            Some("none") => None,
            Some(style) => Some(TextEmpha {
                style: style.to_string(),
            }),
            None => parent_node.and_then(|p| p.text_empha.clone()),
        };
        let letter_spacing = css.get("letter-spacing").map_or(0, |value| {
            length("letter-spacing", value, base(parent_measure)).unwrap_or(0)
        });
        let text_orientation = keyword(&css, "text-orientation")
            .or_else(|| parent_node.map(|p| p.text_orientation))
            .unwrap_or_default();
        let text_combine = markup.name() == "tcy"
            || matches!(
                css_str(&css, "text-combine-upright"),
                Some("all" | "horizontal")
            );

        // Lists, floats, breaks.
        let list_style = load_list_style(&css).or_else(|| parent_node.and_then(|p| p.list_style));
        let float_direction = match css_str(&css, "float") {
            None | Some("none") => None,
            Some(_) => keyword(&css, "float"),
        };
        let clear = match css_str(&css, "clear") {
            None | Some("none") => None,
            Some(_) => keyword(&css, "clear"),
        };
        let break_before = is_forced_break(&css, "break-before", "page-break-before");
        let break_after = is_forced_break(&css, "break-after", "page-break-after");
        let border_collapse = match css_str(&css, "border-collapse") {
            Some("collapse") => true,
            Some("separate") => false,
            _ => parent_node.is_some_and(|p| p.border_collapse),
        };

        // Static size: attribute first, then css; the physical name of the
        // axis first, then the logical one.
        let static_size = |physical: &str, logical: &str, percent_base: i32| {
            let attr = markup
                .attr(physical)
                .or_else(|| markup.attr(logical))
                .map(CssValue::from);
            let value = attr.or_else(|| css.get(physical).or_else(|| css.get(logical)).cloned())?;
            length(logical, &value, base(percent_base)).map(|size| size.max(0))
        };
        let static_measure = static_size(flow.measure_prop(), "measure", parent_measure);
        let static_extent = static_size(flow.extent_prop(), "extent", parent_extent);

        let mut node = StyleNode {
            pushed: markup.attrs().has("pushed"),
            pulled: markup.attrs().has("pulled"),
            markup,
            parent,
            children: Vec::new(),
            prev_sibling: None,
            css,
            hook,
            content,
            display,
            flow,
            box_sizing,
            font,
            edge,
            static_measure,
            static_extent,
            measure: 0,
            extent: 0,
            content_measure: 0,
            content_extent: 0,
            word_break,
            white_space,
            hanging_punctuation,
            text_align,
            text_empha,
            letter_spacing,
            text_orientation,
            text_combine,
            list_style,
            float_direction,
            clear,
            break_before,
            break_after,
            border_collapse,
            lazy,
        };
        init_context_size(
            &mut node,
            static_measure.unwrap_or(parent_measure),
            static_extent.unwrap_or(parent_extent),
        );
        node
    }

    /// Re-derive the size of `id` and, top down, of its descendants.
    ///
    /// `measure`/`extent` override the outer size; `None` falls back to the
    /// static size, then to the parent's content size. Markers and tables
    /// keep their size.
    pub fn update_context_size(&mut self, id: StyleId, measure: Option<i32>, extent: Option<i32>) {
        let node = self.get(id);
        if node.markup.name() == "::marker" || node.display == DisplayKind::Table {
            return;
        }
        let (parent_measure, parent_extent) = node.parent.map_or(
            (node.measure, node.extent),
            |p| (self.get(p).content_measure, self.get(p).content_extent),
        );
        let outer_measure = measure.or(node.static_measure).unwrap_or(parent_measure);
        let outer_extent = extent.or(node.static_extent).unwrap_or(parent_extent);
        init_context_size(self.get_mut(id), outer_measure, outer_extent);

        let children = self.get(id).children.clone();
        for child in children {
            self.update_context_size(child, None, None);
        }
    }

    /// Pin the static size of `id` and re-derive its size. Used for the
    /// float space, whose size changes with every float group.
    pub fn update_static_size(&mut self, id: StyleId, measure: i32, extent: i32) {
        let node = self.get_mut(id);
        node.static_measure = Some(measure);
        node.static_extent = Some(extent);
        self.update_context_size(id, Some(measure), Some(extent));
    }

    /// Whether a node must not produce a rendering context.
    #[must_use]
    pub fn is_disabled(&self, id: StyleId, config: &LayoutConfig) -> bool {
        let node = self.get(id);
        let markup = &node.markup;
        if markup.is_close_tag() || node.display == DisplayKind::None {
            return true;
        }
        if config.disabled_markups.iter().any(|m| m == markup.name()) {
            return true;
        }
        if !markup.is_self_closing() && node.content.is_empty() {
            return true;
        }
        if node.content_measure <= 0 || node.content_extent <= 0 {
            return true;
        }
        let root_measure = self
            .ancestors(id)
            .last()
            .map_or(node.content_measure, |root| self.get(root).content_measure);
        node.content_measure > root_measure
    }

    /// [§ 8.3.1 Collapsing margins](https://www.w3.org/TR/CSS2/box.html#collapsing-margins)
    ///
    /// The gap between two block siblings is the larger of the two margins,
    /// so the later node keeps only what exceeds its predecessor's after
    /// margin.
    fn collapse_margin(&mut self, id: StyleId) {
        let node = self.get(id);
        if !node.display.is_block_level() || node.display.is_table_part() {
            return;
        }
        let flow = node.flow;
        let Some(prev) = node.prev_sibling.map(|p| self.get(p)) else {
            return;
        };
        if !prev.display.is_block_level() || prev.display.is_table_part() {
            return;
        }
        let prev_after = prev.edge.map_or(0, |e| e.margin.get(flow, LogicalSide::After));
        let node = self.get_mut(id);
        let Some(edge) = node.edge.as_mut() else {
            return;
        };
        let before = edge.margin.get(flow, LogicalSide::Before);
        if prev_after > 0 && before > 0 {
            edge.margin.set(flow, LogicalSide::Before, (before - prev_after).max(0));
        }
        if edge.is_zero() {
            node.edge = None;
        }
    }

    /// [§ 17.6.2 The collapsing border model](https://www.w3.org/TR/CSS2/tables.html#collapsing-borders)
    ///
    /// Adjacent borders are drawn once: a cell drops its start border next
    /// to a cell with an end border, a row or block drops its before border
    /// under a sibling with an after border.
    fn collapse_border(&mut self, id: StyleId) {
        let node = self.get(id);
        if !node.border_collapse || node.display == DisplayKind::Table {
            return;
        }
        let flow = node.flow;
        let (shared, own) = if node.display == DisplayKind::TableCell {
            (LogicalSide::End, LogicalSide::Start)
        } else {
            (LogicalSide::After, LogicalSide::Before)
        };
        let Some(prev) = node.prev_sibling.map(|p| self.get(p)) else {
            return;
        };
        if prev.edge.map_or(0, |e| e.border.get(flow, shared)) == 0 {
            return;
        }
        let node = self.get_mut(id);
        if let Some(edge) = node.edge.as_mut() {
            edge.border.set(flow, own, 0);
            if edge.is_zero() {
                node.edge = None;
            }
        }
    }
}

/// Derive content size from the outer size and box-sizing.
fn init_context_size(node: &mut StyleNode, measure: i32, extent: i32) {
    let flow = node.flow;
    let (edge_measure, edge_extent) = match (node.box_sizing, node.edge) {
        (_, None) | (BoxSizing::ContentBox, _) => (0, 0),
        (BoxSizing::BorderBox, Some(edge)) => (edge.inner_measure(flow), edge.inner_extent(flow)),
        (BoxSizing::MarginBox, Some(edge)) => (edge.measure(flow), edge.extent(flow)),
    };
    node.measure = measure.max(0);
    node.extent = extent.max(0);
    node.content_measure = (measure - edge_measure).max(0);
    node.content_extent = (extent - edge_extent).max(0);
}

fn css_str<'a>(css: &'a CssMap, name: &str) -> Option<&'a str> {
    css.get(name).and_then(CssValue::as_str)
}

/// Parse a keyword property, warning once and ignoring values that do not
/// parse.
fn keyword<T: FromStr>(css: &CssMap, name: &str) -> Option<T> {
    let value = css_str(css, name)?;
    if value == "inherit" {
        return None;
    }
    T::from_str(value).map_or_else(
        |_| {
            warn_once("Style", &format!("invalid value '{value}' for '{name}'"));
            None
        },
        Some,
    )
}

fn length(name: &str, value: &CssValue, base: UnitBase) -> Option<i32> {
    resolve_length(name, value, base).map_or_else(
        |err| {
            warn_once("Style", &err.to_string());
            None
        },
        Some,
    )
}

fn unquote(text: &str) -> &str {
    text.trim().trim_matches(['"', '\''])
}

fn load_font(css: &CssMap, parent: &Font, config: &LayoutConfig) -> Font {
    let mut font = parent.clone();
    if let Some(value) = css.get("font-size") {
        let value = value
            .as_str()
            .and_then(|name| config.abs_font_sizes.get(name))
            .map_or_else(|| value.clone(), |abs| CssValue::from(abs.as_str()));
        // `em` and `%` in font-size are relative to the parent font.
        let base = UnitBase {
            font_size: parent.size,
            root_font_size: config.default_font_size,
            percent_base: parent.size,
        };
        if let Some(size) = length("font-size", &value, base) {
            font.size = size.clamp(1, config.max_font_size.max(1));
        }
    }
    match css.get("line-height") {
        Some(CssValue::Float(rate)) => font.line_height = *rate,
        Some(CssValue::Int(px)) if font.size > 0 => {
            font.line_height = f64::from(*px) / f64::from(font.size);
        }
        Some(CssValue::Str(text)) => match parse_line_height(text, font.size) {
            Some(rate) => font.line_height = rate,
            None => warn_once("Style", &format!("invalid value '{text}' for 'line-height'")),
        },
        _ => {}
    }
    if let Some(family) = css_str(css, "font-family") {
        font.family = Some(family.to_string());
    }
    if let Some(weight) = css_str(css, "font-weight") {
        font.weight = Some(weight.to_string());
    }
    if let Some(style) = css_str(css, "font-style") {
        font.style = Some(style.to_string());
    }
    font
}

/// Logical property names of one side: `margin-before` and
/// `margin-block-start` both name the before side.
fn logical_names(prefix: &str, suffix: &str, side: LogicalSide) -> [String; 2] {
    let css_name = match side {
        LogicalSide::Before => "block-start",
        LogicalSide::After => "block-end",
        LogicalSide::Start => "inline-start",
        LogicalSide::End => "inline-end",
    };
    [
        format!("{prefix}-{side}{suffix}"),
        format!("{prefix}-{css_name}{suffix}"),
    ]
}

/// Read one edge layer: the shorthand, then physical sides, then logical
/// sides.
///
/// The shorthand takes one to four lengths in `before end after start`
/// order, or a map keyed by logical side names.
fn load_edge_sizes(
    css: &CssMap,
    prefix: &str,
    suffix: &str,
    flow: BoxFlow,
    measure_base: UnitBase,
    extent_base: UnitBase,
) -> EdgeSizes {
    let mut sizes = EdgeSizes::default();
    let base_of = |side: LogicalSide| match side {
        LogicalSide::Before | LogicalSide::After => extent_base,
        LogicalSide::Start | LogicalSide::End => measure_base,
    };
    let shorthand = format!("{prefix}{suffix}");
    let set = |sizes: &mut EdgeSizes, side: LogicalSide, value: &CssValue| {
        if let Some(size) = length(&shorthand, value, base_of(side)) {
            sizes.set(flow, side, size.max(0));
        }
    };

    match css.get(&shorthand) {
        Some(CssValue::Map(map)) => {
            for (name, value) in map {
                if let Ok(side) = LogicalSide::from_str(name) {
                    set(&mut sizes, side, value);
                }
            }
        }
        Some(CssValue::Str(text)) => {
            let parts: Vec<CssValue> = text.split_whitespace().map(CssValue::from).collect();
            // [§ 4.2 Shorthands](https://www.w3.org/TR/css-box-4/#margin-shorthand)
            let [before, end, after, start] = match parts.as_slice() {
                [all] => [all, all, all, all],
                [block, inline] => [block, inline, block, inline],
                [before, inline, after] => [before, inline, after, inline],
                [before, end, after, start, ..] => [before, end, after, start],
                [] => return sizes,
            };
            set(&mut sizes, LogicalSide::Before, before);
            set(&mut sizes, LogicalSide::End, end);
            set(&mut sizes, LogicalSide::After, after);
            set(&mut sizes, LogicalSide::Start, start);
        }
        Some(value) => {
            for side in LogicalSide::ALL {
                set(&mut sizes, side, value);
            }
        }
        None => {}
    }

    for physical in [
        PhysicalSide::Top,
        PhysicalSide::Right,
        PhysicalSide::Bottom,
        PhysicalSide::Left,
    ] {
        let Some(value) = css.get(&format!("{prefix}-{physical}{suffix}")) else {
            continue;
        };
        let side = LogicalSide::ALL
            .into_iter()
            .find(|&side| flow.physical_side(side) == physical)
            .unwrap_or(LogicalSide::Before);
        set(&mut sizes, side, value);
    }

    for side in LogicalSide::ALL {
        for name in logical_names(prefix, suffix, side) {
            if let Some(value) = css.get(&name) {
                set(&mut sizes, side, value);
            }
        }
    }
    sizes
}

fn load_list_style(css: &CssMap) -> Option<ListStyle> {
    let shorthand = css_str(css, "list-style").map(ListStyle::parse_shorthand);
    let kind = keyword(css, "list-style-type");
    let position = keyword(css, "list-style-position");
    if shorthand.is_none() && kind.is_none() && position.is_none() {
        return None;
    }
    let mut style = shorthand.unwrap_or_default();
    if let Some(kind) = kind {
        style.kind = kind;
    }
    if let Some(position) = position {
        style.position = position;
    }
    Some(style)
}

/// [§ 3.1 Breaks Between Boxes](https://www.w3.org/TR/css-break-3/#break-between)
fn is_forced_break(css: &CssMap, name: &str, legacy: &str) -> bool {
    matches!(
        css_str(css, name).or_else(|| css_str(css, legacy)),
        Some("always" | "page" | "left" | "right" | "recto" | "verso")
    )
}
