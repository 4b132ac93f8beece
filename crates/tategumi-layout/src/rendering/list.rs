//! Lists and list items.
//!
//! [§ 3 Markers](https://www.w3.org/TR/css-lists-3/#markers)
//!
//! > The defining trait of a list item is its marker.
//!
//! A list measures the widest marker of its items once, and every outside
//! item is then laid out as two columns: the marker, and the body in the
//! rest of the measure.

use tategumi_markup::{HtmlLexer, MarkupToken, Tag};

use crate::generator::GeneratorKind;
use crate::rendering::create::force_css;
use crate::rendering::{ContextId, LayoutEngine, RenderingContext};
use crate::style::StyleId;
use crate::style::values::{CssMap, CssValue, floor_px};

/// Marker measurements shared by the items of one list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListContext {
    /// Measure of the marker column.
    pub indent: i32,
    /// Measure of the body column.
    pub body: i32,
    next_order: usize,
}

impl ListContext {
    /// The 1-based order of the next item, advancing the counter.
    pub fn next_order(&mut self) -> usize {
        let order = self.next_order;
        self.next_order += 1;
        order
    }
}

impl LayoutEngine {
    /// A `<ul>` or `<ol>` context with its markers measured.
    pub(crate) fn create_list(&mut self, parent: ContextId, style: StyleId) -> ContextId {
        let list = self.create_markup_context(parent, style, GeneratorKind::List);
        let list_context = self.create_list_context(style);
        self.ctx_mut(list).list_context = Some(list_context);
        list
    }

    /// Measure the markers of every item of the list `style`.
    ///
    /// The marker column is as wide as the widest marker text, widened by
    /// `list_spacing_rate`, and never narrower than one em.
    pub(crate) fn create_list_context(&mut self, style: StyleId) -> ListContext {
        let marker = self.create_style(Tag::with_content("::marker", ""), Some(style), &CssMap::new());
        let font = self.styles.get(marker).font.size;
        self.styles.remove_child(marker);

        let node = self.styles.get(style);
        let list_style = node.list_style.unwrap_or_default();
        let item_count = HtmlLexer::new(&node.content)
            .tokenize()
            .iter()
            .filter(|token| matches!(token, MarkupToken::Tag(tag) if tag.name() == "li" && !tag.is_close_tag()))
            .count();
        let max_marker = (1..=item_count)
            .map(|order| {
                self.metrics
                    .text_advance(&list_style.marker_text(order), font, node.flow)
            })
            .max()
            .unwrap_or(0);
        let indent = font.max(floor_px(f64::from(max_marker) * (1.0 + self.config.list_spacing_rate)));
        ListContext {
            indent,
            body: (node.content_measure - indent).max(0),
            next_order: 1,
        }
    }

    /// An item of the list `parent`.
    ///
    /// Outside markers get their own column next to the body. Inside
    /// markers become the first inline content of the item.
    pub(crate) fn create_list_item(&mut self, parent: ContextId, style: StyleId) -> ContextId {
        let Some(list_context) = self.ctx_mut(parent).list_context.as_mut() else {
            return self.create_markup_context(parent, style, GeneratorKind::Block);
        };
        let order = list_context.next_order();
        let (indent, body) = (list_context.indent, list_context.body);
        let node = self.styles.get(style);
        let list_style = node.list_style.unwrap_or_default();
        let marker_text = list_style.marker_text(order);

        if !list_style.is_outside() {
            let item = self.create_markup_context(parent, style, GeneratorKind::InsideListItem);
            if let Some(stream) = self.markup_stream(item) {
                stream.push_front(MarkupToken::Tag(Tag::with_content("::marker", &marker_text)));
            }
            return item;
        }

        let content = node.content.clone();
        let item = self.add_context(RenderingContext::new(
            style,
            None,
            Some(parent),
            GeneratorKind::OutsideListItem,
        ));
        let marker_style = self.create_style(
            Tag::with_content("::marker", &marker_text),
            Some(style),
            &force_css([("display", "block".into()), ("measure", CssValue::Int(indent))]),
        );
        let marker = self.create_markup_context(item, marker_style, GeneratorKind::Block);
        let body_style = self.create_style(
            Tag::with_content("li-body", &content),
            Some(style),
            &force_css([("display", "block".into()), ("measure", CssValue::Int(body))]),
        );
        let body = self.create_markup_context(item, body_style, GeneratorKind::Block);
        self.ctx_mut(item).parallel = vec![marker, body];
        item
    }
}
