//! The document: building an engine for a markup string and paging it.

use std::rc::Rc;

use tategumi_common::layout_trace;
use tategumi_common::warning::{clear_warnings, warn_once};
use tategumi_markup::{HtmlLexer, MarkupToken, Tag};

use crate::config::LayoutConfig;
use crate::error::LayoutError;
use crate::generator::GeneratorKind;
use crate::layout::LayoutBox;
use crate::rendering::{ContextId, ContextState, LayoutEngine, Registry, RenderingContext};
use crate::style::values::CssMap;
use crate::style::{BoxSize, CascadeResolver, PreloadMap, StyleSheet, StyleTree};
use crate::text::{ApproximateFontMetrics, FontMetrics};

/// One laid out page.
#[derive(Debug, Clone)]
pub struct Page {
    /// 0-based page number.
    pub index: usize,
    /// The body box of the page.
    pub root: LayoutBox,
}

impl LayoutEngine {
    /// Prepare `markup` for layout on pages of `width` by `height` pixels.
    ///
    /// The markup is expected to be an html document; missing `<html>` and
    /// `<body>` wrappers are supplied.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPageSize`] unless both sides are
    /// positive.
    pub fn new(
        markup: &str,
        width: i32,
        height: i32,
        config: LayoutConfig,
        cascade: Rc<dyn CascadeResolver>,
    ) -> Result<Self, LayoutError> {
        if width <= 0 || height <= 0 {
            return Err(LayoutError::InvalidPageSize { width, height });
        }
        clear_warnings();

        let mut engine = Self {
            styles: StyleTree::new(),
            contexts: Vec::new(),
            streams: Vec::new(),
            config,
            cascade,
            metrics: Box::new(ApproximateFontMetrics),
            preloads: PreloadMap::new(),
            page: BoxSize { width, height },
            root: ContextId(0),
            registry: Registry::default(),
            diagnostics: Vec::new(),
        };

        // STEP 1: Find <html> and <body>, wrapping the markup as needed.
        let html = engine
            .find_tag(markup, "html")
            .unwrap_or_else(|| Tag::with_content("html", markup));
        let body = engine
            .find_tag(html.content(), "body")
            .unwrap_or_else(|| Tag::with_content("body", html.content()));

        // STEP 2: Styles, then the body context that pages are cut from.
        let html_style = engine.create_style(html, None, &CssMap::new());
        let body_style = engine.create_style(body, Some(html_style), &CssMap::new());
        let stream = engine.lex_markup(&engine.styles.get(body_style).content);
        let stream = engine.add_markup_stream(stream);
        engine.root = engine.add_context(RenderingContext::new(
            body_style,
            Some(stream),
            None,
            GeneratorKind::Block,
        ));
        Ok(engine)
    }

    /// An engine with the default configuration and the user-agent sheet.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPageSize`] unless both sides are
    /// positive.
    pub fn with_defaults(markup: &str, width: i32, height: i32) -> Result<Self, LayoutError> {
        Self::new(
            markup,
            width,
            height,
            LayoutConfig::default(),
            Rc::new(StyleSheet::user_agent()),
        )
    }

    /// Use `metrics` to measure text.
    #[must_use]
    pub fn with_metrics(mut self, metrics: Box<dyn FontMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Known image sizes, keyed by the `data-preload-id` of an `<img>`.
    #[must_use]
    pub fn with_preloads(mut self, preloads: PreloadMap) -> Self {
        self.preloads = preloads;
        self
    }

    fn find_tag(&self, markup: &str, name: &str) -> Option<Tag> {
        HtmlLexer::new(markup)
            .with_single_tags(&self.config.single_tags)
            .tokenize()
            .into_iter()
            .find_map(|token| match token {
                MarkupToken::Tag(tag) if tag.name() == name && !tag.is_close_tag() => Some(tag),
                _ => None,
            })
    }

    /// Whether more pages follow.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.has_next(self.root)
    }

    /// Lay out the next page.
    ///
    /// Returns `Ok(None)` once the document is done.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::PageLimit`] when `max_page_count` pages were
    /// produced and content remains, or a stream error if layout drove a
    /// token stream out of range.
    pub fn try_next_page(&mut self) -> Result<Option<Page>, LayoutError> {
        if !self.has_next(self.root) {
            return Ok(None);
        }
        if self.registry.page_count >= self.config.max_page_count {
            let limit = self.config.max_page_count;
            warn_once("Document", &format!("page limit of {limit} reached, layout stopped"));
            self.ctx_mut(self.root).state = ContextState::Terminated;
            return Err(LayoutError::PageLimit(limit));
        }

        let Some(root) = self.yield_box(self.root)? else {
            if self.has_next(self.root) {
                warn_once("Document", "no content fits on an empty page, layout stopped");
                self.ctx_mut(self.root).state = ContextState::Terminated;
            }
            return Ok(None);
        };
        let index = self.registry.page_count;
        self.registry.page_count += 1;
        layout_trace!("Document", "page {index} done, {} lines so far", self.registry.line_count);
        Ok(Some(Page { index, root }))
    }

    /// The page an anchor (an `id`, or the `name` of an `<a>`) was laid
    /// out on.
    #[must_use]
    pub fn anchor_page(&self, name: &str) -> Option<usize> {
        self.registry.anchors.get(name).copied()
    }

    /// Pages produced so far.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        self.registry.page_count
    }

    /// Root lines produced so far.
    #[must_use]
    pub const fn line_count(&self) -> usize {
        self.registry.line_count
    }

    /// Physical page size.
    #[must_use]
    pub const fn page_size(&self) -> BoxSize {
        self.page
    }

    /// Errors recorded during layout that did not stop it.
    #[must_use]
    pub fn diagnostics(&self) -> &[LayoutError] {
        &self.diagnostics
    }
}

impl Iterator for LayoutEngine {
    type Item = Page;

    /// The next page. An error ends the iteration and is kept in
    /// [`diagnostics`](LayoutEngine::diagnostics).
    fn next(&mut self) -> Option<Page> {
        match self.try_next_page() {
            Ok(page) => page,
            Err(err) => {
                self.diagnostics.push(err);
                None
            }
        }
    }
}
