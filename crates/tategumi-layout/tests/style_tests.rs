//! Integration tests for style resolution: cascade order, sizes and edges.

use tategumi_layout::style::keywords::{DisplayKind, HangingPunctuation};
use tategumi_layout::style::node::StyleEnv;
use tategumi_layout::style::{
    BoxFlow, BoxSize, CssMap, CssValue, LogicalSide, PreloadMap, PropValue, PropertyMap, StyleId,
    StyleSheet, StyleTree,
};
use tategumi_layout::LayoutConfig;
use tategumi_markup::{HtmlLexer, Tag};

const PAGE: BoxSize = BoxSize {
    width: 600,
    height: 400,
};

/// A style tree under a horizontal `<html>` root sized to [`PAGE`].
struct Fixture {
    sheet: StyleSheet,
    config: LayoutConfig,
    preloads: PreloadMap,
    tree: StyleTree,
}

impl Fixture {
    fn new(css: &str) -> Self {
        let mut sheet = StyleSheet::user_agent();
        sheet.add_css(css);
        Self::with_sheet(sheet)
    }

    fn with_sheet(sheet: StyleSheet) -> Self {
        Self {
            sheet,
            config: LayoutConfig {
                default_flow: BoxFlow::HorizontalTb,
                ..LayoutConfig::default()
            },
            preloads: PreloadMap::new(),
            tree: StyleTree::new(),
        }
    }

    fn create_tag(&mut self, tag: Tag, parent: Option<StyleId>, force: &CssMap) -> StyleId {
        let env = StyleEnv {
            cascade: &self.sheet,
            config: &self.config,
            preloads: &self.preloads,
            page: PAGE,
        };
        self.tree.create(tag, parent, force, &env)
    }

    fn root(&mut self) -> StyleId {
        self.create_tag(Tag::with_content("html", "本文"), None, &CssMap::new())
    }

    /// Style the first tag of `src` under `parent`.
    fn create(&mut self, src: &str, parent: StyleId) -> StyleId {
        self.create_tag(first_tag(src), Some(parent), &CssMap::new())
    }
}

fn first_tag(src: &str) -> Tag {
    HtmlLexer::new(src)
        .tokenize()
        .into_iter()
        .find_map(|token| token.as_tag().cloned())
        .expect("source should contain a tag")
}

// ---------------------------------------------------------------------------
// Sizes
//
// The default box-sizing is margin-box: a static measure covers the margin,
// border and padding, and content gets what is left.
// ---------------------------------------------------------------------------

#[test]
fn test_root_takes_page_size() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let node = fx.tree.get(root);
    assert_eq!(node.flow, BoxFlow::HorizontalTb);
    assert_eq!(node.measure, 600);
    assert_eq!(node.extent, 400);
    assert_eq!(node.content_measure, 600);
}

#[test]
fn test_margin_box_subtracts_whole_edge() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let div = fx.create(r#"<div style="measure: 300px; margin: 10px">本</div>"#, root);
    let node = fx.tree.get(div);
    assert_eq!(node.static_measure, Some(300));
    assert_eq!(node.measure, 300);
    assert_eq!(node.content_measure, 280);
    assert_eq!(node.content_extent, 380);
}

#[test]
fn test_border_box_keeps_margin_outside() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let div = fx.create(
        r#"<div style="box-sizing: border-box; width: 300px; padding: 5px; margin: 10px">本</div>"#,
        root,
    );
    assert_eq!(fx.tree.get(div).content_measure, 290);
}

#[test]
fn test_content_box_ignores_edge() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let div = fx.create(
        r#"<div style="box-sizing: content-box; measure: 300px; padding: 5px">本</div>"#,
        root,
    );
    assert_eq!(fx.tree.get(div).content_measure, 300);
}

#[test]
fn test_width_attribute_is_static_measure() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let div = fx.create(r#"<div width="120">本</div>"#, root);
    assert_eq!(fx.tree.get(div).static_measure, Some(120));
    assert_eq!(fx.tree.get(div).content_measure, 120);
}

#[test]
fn test_percent_measure() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let div = fx.create(r#"<div style="measure: 50%">本</div>"#, root);
    assert_eq!(fx.tree.get(div).measure, 300);
}

#[test]
fn test_update_static_size_propagates() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let outer = fx.create("<div>本</div>", root);
    let inner = fx.create("<p>本</p>", outer);
    fx.tree.update_static_size(outer, 200, 100);
    assert_eq!(fx.tree.get(outer).content_measure, 200);
    assert_eq!(fx.tree.get(inner).content_measure, 200);
    // The paragraph's after margin comes out of the new extent.
    assert_eq!(fx.tree.get(inner).content_extent, 84);
}

// ---------------------------------------------------------------------------
// Edges
//
// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
// ---------------------------------------------------------------------------

#[test]
fn test_logical_margin_maps_to_flow() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let p = fx.create("<p>本</p>", root);
    let node = fx.tree.get(p);
    assert_eq!(node.edge_side(LogicalSide::After), 16);
    assert_eq!(node.edge_side(LogicalSide::Before), 0);
}

#[test]
fn test_inline_drops_block_margins() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let span = fx.create(r#"<span style="margin: 10px">本</span>"#, root);
    let node = fx.tree.get(span);
    assert_eq!(node.display, DisplayKind::Inline);
    assert_eq!(node.edge_side(LogicalSide::Before), 0);
    assert_eq!(node.edge_side(LogicalSide::After), 0);
    assert_eq!(node.edge_side(LogicalSide::Start), 10);
}

#[test]
fn test_sibling_margins_collapse() {
    let mut fx = Fixture::new("h2 { margin-block-start: 24px; }");
    let root = fx.root();
    let _ = fx.create("<p>本</p>", root);
    let h2 = fx.create("<h2>題</h2>", root);
    // 24px before, 16px after the paragraph: only the excess remains.
    assert_eq!(fx.tree.get(h2).edge_side(LogicalSide::Before), 8);
}

#[test]
fn test_zero_edge_is_none() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let div = fx.create("<div>本</div>", root);
    assert!(fx.tree.get(div).edge.is_none());
}

// ---------------------------------------------------------------------------
// Cascade order
//
// [§ 6.4 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
// ---------------------------------------------------------------------------

#[test]
fn test_specificity_beats_order() {
    let mut fx = Fixture::new("#lead { font-size: 20px; } p { font-size: 30px; }");
    let root = fx.root();
    let p = fx.create(r#"<p id="lead">本</p>"#, root);
    assert_eq!(fx.tree.get(p).font.size, 20);
}

#[test]
fn test_later_rule_wins_on_tie() {
    let mut fx = Fixture::new(".a { font-size: 20px; } .b { font-size: 24px; }");
    let root = fx.root();
    let p = fx.create(r#"<p class="a b">本</p>"#, root);
    assert_eq!(fx.tree.get(p).font.size, 24);
}

#[test]
fn test_inline_style_beats_sheet() {
    let mut fx = Fixture::new("#lead { font-size: 20px; }");
    let root = fx.root();
    let p = fx.create(r#"<p id="lead" style="font-size: 2em">本</p>"#, root);
    assert_eq!(fx.tree.get(p).font.size, 32);
}

#[test]
fn test_force_beats_inline_style() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let mut force = CssMap::new();
    let _ = force.insert("display".to_string(), "block".into());
    let span = fx.create_tag(
        first_tag(r#"<span style="display: inline">本</span>"#),
        Some(root),
        &force,
    );
    assert_eq!(fx.tree.get(span).display, DisplayKind::Block);
}

#[test]
fn test_descendant_combinator() {
    let mut fx = Fixture::new("div p { font-size: 10px; }");
    let root = fx.root();
    let direct = fx.create("<p>本</p>", root);
    let div = fx.create("<div><p>本</p></div>", root);
    let nested = fx.create("<p>本</p>", div);
    assert_eq!(fx.tree.get(direct).font.size, 16);
    assert_eq!(fx.tree.get(nested).font.size, 10);
}

#[test]
fn test_text_rules_inherit() {
    let mut fx = Fixture::new("div { hanging-punctuation: allow-end; }");
    let root = fx.root();
    let div = fx.create("<div><p>本</p></div>", root);
    let p = fx.create("<p>本</p>", div);
    assert_eq!(
        fx.tree.get(p).hanging_punctuation,
        HangingPunctuation::AllowEnd
    );
    assert!(fx.tree.get(p).is_hanging_punctuation_enabled());
}

#[test]
fn test_display_none_is_disabled() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let script = fx.create("<script>x</script>", root);
    assert!(fx.tree.is_disabled(script, &fx.config));
    let p = fx.create("<p>本</p>", root);
    assert!(!fx.tree.is_disabled(p, &fx.config));
}

#[test]
fn test_empty_content_is_disabled() {
    let mut fx = Fixture::new("");
    let root = fx.root();
    let p = fx.create("<p></p>", root);
    assert!(fx.tree.is_disabled(p, &fx.config));
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

#[test]
fn test_computed_value_sees_context() {
    let mut sheet = StyleSheet::user_agent();
    let mut properties = PropertyMap::new();
    let _ = properties.insert(
        "font-size".to_string(),
        PropValue::computed(|ctx| {
            let parent = ctx.parent_font_size()?;
            Some(CssValue::Int(parent + 4))
        }),
    );
    sheet.add_rule("p", properties);
    let mut fx = Fixture::with_sheet(sheet);
    let root = fx.root();
    let p = fx.create("<p>本</p>", root);
    assert_eq!(fx.tree.get(p).font.size, 20);
}

#[test]
fn test_onload_rewrites_content() {
    let mut sheet = StyleSheet::user_agent();
    let mut properties = PropertyMap::new();
    let _ = properties.insert(
        "onload".to_string(),
        PropValue::computed(|ctx| {
            let content = format!("【{}】", ctx.content());
            ctx.set_content(content);
            None
        }),
    );
    sheet.add_rule("h1", properties);
    let mut fx = Fixture::with_sheet(sheet);
    let root = fx.root();
    let h1 = fx.create("<h1>題</h1>", root);
    assert_eq!(fx.tree.get(h1).content, "【題】");
}

#[test]
fn test_before_pseudo_element_content() {
    let mut fx = Fixture::new(r#"p::before { content: "※"; }"#);
    let root = fx.root();
    let p = fx.create("<p>本</p>", root);
    assert_eq!(fx.tree.get(p).content, "<::before>※</::before>本");
}
