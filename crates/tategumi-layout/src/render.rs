//! Walking finished pages.
//!
//! The engine emits an abstract box tree. A [`BoxRenderer`] receives it in
//! document order; [`render_page`] drives the walk and runs the `oncreate`
//! hook of each box against the renderer's output handle.

use std::any::Any;
use std::fmt::Write as _;

use crate::document::Page;
use crate::layout::{Element, LayoutBox};
use crate::text::TextToken;

/// Receives a page box tree in document order.
pub trait BoxRenderer {
    /// A new page starts.
    fn begin_page(&mut self, page: &Page);

    /// A box opens at `depth` (the page root is at depth 0).
    fn enter_box(&mut self, layout_box: &LayoutBox, depth: usize);

    /// A text token inside the box opened last.
    fn text(&mut self, token: &TextToken, depth: usize);

    /// The box opened at `depth` closes.
    fn leave_box(&mut self, layout_box: &LayoutBox, depth: usize);

    /// The handle `oncreate` hooks receive, if this renderer has one.
    fn hook_target(&mut self) -> Option<&mut dyn Any> {
        None
    }
}

/// Walk `page` into `renderer`.
pub fn render_page<R: BoxRenderer + ?Sized>(renderer: &mut R, page: &Page) {
    renderer.begin_page(page);
    render_box(renderer, &page.root, 0);
}

fn render_box<R: BoxRenderer + ?Sized>(renderer: &mut R, layout_box: &LayoutBox, depth: usize) {
    renderer.enter_box(layout_box, depth);
    if let Some(target) = renderer.hook_target() {
        layout_box.invoke_hook(target);
    }
    for element in &layout_box.elements {
        match element {
            Element::Box(child) => render_box(renderer, child, depth + 1),
            Element::Text(token) => renderer.text(token, depth + 1),
        }
    }
    renderer.leave_box(layout_box, depth);
}

/// Renders pages as an indented outline, one box per line, with the text
/// of each run on the line of its box.
#[derive(Debug, Default)]
pub struct TextTreeRenderer {
    out: String,
    line: Option<String>,
    text: String,
}

impl TextTreeRenderer {
    /// An empty renderer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The outline so far.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.flush();
        self.out
    }

    fn flush(&mut self) {
        if let Some(line) = self.line.take() {
            self.out.push_str(&line);
            if !self.text.is_empty() {
                let _ = write!(self.out, " \"{}\"", self.text);
            }
            self.out.push('\n');
        }
        self.text.clear();
    }
}

impl BoxRenderer for TextTreeRenderer {
    fn begin_page(&mut self, page: &Page) {
        self.flush();
        let _ = writeln!(self.out, "page {}", page.index + 1);
    }

    fn enter_box(&mut self, layout_box: &LayoutBox, depth: usize) {
        self.flush();
        let mut line = format!(
            "{:indent$}{} <{}> {}x{}",
            "",
            layout_box.box_type,
            layout_box.markup,
            layout_box.size.width,
            layout_box.size.height,
            indent = depth * 2 + 2
        );
        if layout_box.content.is_some() {
            line.push_str(" lazy");
        }
        self.line = Some(line);
    }

    fn text(&mut self, token: &TextToken, _depth: usize) {
        self.text.push_str(&token.data);
    }

    fn leave_box(&mut self, _layout_box: &LayoutBox, _depth: usize) {
        self.flush();
    }
}
