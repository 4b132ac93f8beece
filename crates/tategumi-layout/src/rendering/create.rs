//! Creating styles, streams, contexts and the boxes that need no layout.

use tategumi_common::layout_trace;
use tategumi_markup::{HtmlLexer, MarkupToken, Tag, TokenStream};

use crate::generator::GeneratorKind;
use crate::layout::{BoxType, LayoutBox, LayoutContext};
use crate::rendering::{ContextId, LayoutEngine, RenderingContext, Stream, StreamId};
use crate::style::{BoxSize, StyleId};
use crate::style::flow::LogicalSide;
use crate::style::keywords::DisplayKind;
use crate::style::node::StyleEnv;
use crate::style::values::{CssMap, CssValue};
use crate::text::TextToken;

/// Build a force css map from literal pairs.
pub(crate) fn force_css<const N: usize>(pairs: [(&str, CssValue); N]) -> CssMap {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

impl LayoutEngine {
    /// Resolve a style for `markup` under `parent`.
    pub(crate) fn create_style(
        &mut self,
        markup: Tag,
        parent: Option<StyleId>,
        force: &CssMap,
    ) -> StyleId {
        let env = StyleEnv {
            cascade: &*self.cascade,
            config: &self.config,
            preloads: &self.preloads,
            page: self.page,
        };
        self.styles.create(markup, parent, force, &env)
    }

    pub(crate) fn lex_markup(&self, content: &str) -> TokenStream<MarkupToken> {
        let lexer = HtmlLexer::new(content).with_single_tags(&self.config.single_tags);
        TokenStream::new(lexer.tokenize())
    }

    pub(crate) fn add_markup_stream(&mut self, stream: TokenStream<MarkupToken>) -> StreamId {
        self.streams.push(Stream::Markup(stream));
        StreamId(self.streams.len() - 1)
    }

    pub(crate) fn add_text_stream(&mut self, stream: TokenStream<TextToken>) -> StreamId {
        self.streams.push(Stream::Text(stream));
        StreamId(self.streams.len() - 1)
    }

    pub(crate) fn add_context(&mut self, ctx: RenderingContext) -> ContextId {
        layout_trace!(
            "Context",
            "create {} for <{}>",
            ctx.generator,
            self.styles.get(ctx.style).markup_name()
        );
        self.contexts.push(ctx);
        ContextId(self.contexts.len() - 1)
    }

    /// A context reading a fresh markup stream of the style's content.
    pub(crate) fn create_markup_context(
        &mut self,
        parent: ContextId,
        style: StyleId,
        generator: GeneratorKind,
    ) -> ContextId {
        let stream = self.lex_markup(&self.styles.get(style).content);
        let stream = self.add_markup_stream(stream);
        self.add_context(RenderingContext::new(style, Some(stream), Some(parent), generator))
    }

    /// A context reading a text stream.
    pub(crate) fn create_text_context(
        &mut self,
        parent: ContextId,
        style: StyleId,
        stream: TokenStream<TextToken>,
    ) -> ContextId {
        let stream = self.add_text_stream(stream);
        self.add_context(RenderingContext::new(
            style,
            Some(stream),
            Some(parent),
            GeneratorKind::Text,
        ))
    }

    /// A one-shot context handing out a prebuilt box.
    pub(crate) fn create_lazy_context(
        &mut self,
        parent: ContextId,
        style: StyleId,
        output: LayoutBox,
    ) -> ContextId {
        let mut ctx = RenderingContext::new(style, None, Some(parent), GeneratorKind::Lazy);
        ctx.lazy_output = Some(output);
        self.add_context(ctx)
    }

    /// The context that turns the inline content of `parent`'s stream into
    /// lines. It shares the stream and the style of its block.
    pub fn create_inline_root(&mut self, parent: ContextId) -> ContextId {
        let ctx = self.ctx(parent);
        let root = RenderingContext::new(ctx.style, ctx.stream, Some(parent), GeneratorKind::Inline);
        let id = self.add_context(root);
        self.ctx_mut(parent).child = Some(id);
        id
    }

    /// Pick the generator for a block-level child style and attach it.
    pub(crate) fn create_child_block_generator(&mut self, parent: ContextId, style: StyleId) -> ContextId {
        let node = self.styles.get(style);
        let name = node.markup_name().to_string();
        let display = node.display;
        let child = if node.lazy || matches!(name.as_str(), "img" | "hr") {
            let output = self.create_atomic_box(style);
            self.create_lazy_context(parent, style, output)
        } else if display == DisplayKind::ListItem && self.ctx(parent).list_context.is_some() {
            self.create_list_item(parent, style)
        } else if display == DisplayKind::Table {
            self.create_table(parent, style)
        } else if display == DisplayKind::TableRow {
            self.create_table_row(parent, style)
        } else if display == DisplayKind::TableCell {
            self.create_markup_context(parent, style, GeneratorKind::TableCell)
        } else if matches!(name.as_str(), "ul" | "ol") {
            self.create_list(parent, style)
        } else {
            self.create_markup_context(parent, style, GeneratorKind::Block)
        };
        self.ctx_mut(parent).child = Some(child);
        child
    }

    /// Pick the generator for an inline child style.
    ///
    /// Returns `Err` with the box itself for atomic inline content, which
    /// goes straight into the line.
    pub(crate) fn create_child_inline_generator(
        &mut self,
        parent: ContextId,
        style: StyleId,
    ) -> Result<ContextId, LayoutBox> {
        let node = self.styles.get(style);
        if node.lazy || node.markup_name() == "img" {
            return Err(self.create_atomic_box(style));
        }
        let child = if node.display.is_inline_block() && style != self.ctx(parent).style {
            self.create_markup_context(parent, style, GeneratorKind::InlineBlock)
        } else if node.markup_name() == "ruby" {
            let stream = crate::text::lex_ruby(&node.content);
            self.create_text_context(parent, style, stream)
        } else if node.text_combine {
            let stream = crate::text::lex_tcy(&node.content);
            self.create_text_context(parent, style, stream)
        } else {
            self.create_markup_context(parent, style, GeneratorKind::Inline)
        };
        self.ctx_mut(parent).child = Some(child);
        Ok(child)
    }

    /// A text child of `parent` for a run of character data.
    pub(crate) fn create_child_text_generator(&mut self, parent: ContextId, text: &str) -> ContextId {
        let style = self.ctx(parent).style;
        let orientation = self.styles.get(style).text_orientation;
        let stream = crate::text::lex_text(text, orientation);
        let child = self.create_text_context(parent, style, stream);
        self.ctx_mut(parent).child = Some(child);
        child
    }

    /// Output of content laid out as one unit: lazy content, images and
    /// rules.
    pub(crate) fn create_atomic_box(&self, style: StyleId) -> LayoutBox {
        let node = self.styles.get(style);
        let flow = node.flow;
        let font = node.font.size;
        let (measure, extent, edge) = match node.markup_name() {
            "hr" => (node.content_measure, 2, node.edge),
            "img" if !node.lazy => (
                node.static_measure.map_or(font, |_| node.content_measure),
                node.static_extent.map_or(font, |_| node.content_extent),
                node.edge,
            ),
            _ => (node.content_measure, node.content_extent, node.edge),
        };
        let mut output = self.new_box(style, BoxType::Block, flow.box_size(measure, extent));
        output.edge = edge;
        if node.lazy {
            output.content = Some(node.content.clone());
        }
        if let Some(src) = node.markup.attr("src") {
            let _ = output.css.insert("src".to_string(), src.into());
        }
        output
    }

    /// A box carrying the identity of `style`.
    pub(crate) fn new_box(&self, style: StyleId, box_type: BoxType, size: BoxSize) -> LayoutBox {
        let node = self.styles.get(style);
        LayoutBox {
            display: node.display,
            markup: node.markup_name().to_string(),
            classes: node.markup.classes().to_vec(),
            css: node.output_css(),
            pushed: node.pushed,
            pulled: node.pulled,
            hook: node.hook.clone(),
            style: Some(style),
            ..LayoutBox::new(box_type, node.flow, size)
        }
    }

    /// A void box that ends the page.
    pub(crate) fn create_page_break(&self, style: StyleId) -> LayoutBox {
        let mut output = self.new_box(style, BoxType::Block, BoxSize::default());
        output.break_after = true;
        output
    }

    /// A blank block filling what is left of `id`'s block.
    pub(crate) fn create_white_space(&self, id: ContextId) -> LayoutBox {
        let style = self.ctx(id).style;
        let flow = self.flow_of(id);
        let measure = self.style_of(id).content_measure;
        let extent = self
            .layout_of(id)
            .map_or_else(|| self.context_max_extent(id), LayoutContext::rest_extent);
        let mut output = self.new_box(style, BoxType::Block, flow.box_size(measure, extent));
        output.css.clear();
        output
    }

    /// Give a block box its document-unique id.
    pub(crate) const fn next_block_id(&mut self) -> usize {
        let id = self.registry.next_block_id;
        self.registry.next_block_id += 1;
        id
    }

    /// Record `id` and `<a name>` targets on the page being laid out.
    pub(crate) fn register_anchor(&mut self, markup: &Tag) {
        let name = markup
            .id()
            .or_else(|| (markup.name() == "a").then(|| markup.attr("name")).flatten());
        if let Some(name) = name {
            let page = self.registry.page_count;
            let _ = self.registry.anchors.insert(name.to_string(), page);
        }
    }

    /// Whether a block with `style` must end the page before it starts.
    pub(crate) fn breaks_before(&self, id: ContextId, style: StyleId) -> bool {
        self.styles.get(style).break_before
            && self.layout_of(id).is_some_and(|l| l.block.cur_extent > 0)
    }

    /// The after edge `id` must keep room for on its last output.
    pub(crate) fn after_edge(&self, id: ContextId) -> i32 {
        self.style_of(id).edge_side(LogicalSide::After)
    }
}
