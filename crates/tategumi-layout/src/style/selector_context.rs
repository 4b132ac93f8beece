//! The view a computed property callback gets of the node being styled.

use tategumi_markup::Tag;

use crate::style::flow::BoxFlow;
use crate::style::node::{StyleId, StyleTree};
use crate::style::values::{CssMap, CssValue};

/// A node under construction, as seen by [`PropValue::Computed`] callbacks.
///
/// The node is not linked into the tree yet, so its markup and css are
/// borrowed separately from the (read-only) tree of its ancestors.
///
/// [`PropValue::Computed`]: crate::style::values::PropValue::Computed
pub struct SelectorContext<'a> {
    tree: &'a StyleTree,
    parent: Option<StyleId>,
    markup: &'a mut Tag,
    css: &'a mut CssMap,
    child_index: usize,
}

impl<'a> SelectorContext<'a> {
    pub(crate) const fn new(
        tree: &'a StyleTree,
        parent: Option<StyleId>,
        markup: &'a mut Tag,
        css: &'a mut CssMap,
        child_index: usize,
    ) -> Self {
        Self {
            tree,
            parent,
            markup,
            css,
            child_index,
        }
    }

    /// The markup being styled.
    #[must_use]
    pub fn markup(&self) -> &Tag {
        self.markup
    }

    /// Lowercased markup name.
    #[must_use]
    pub fn markup_name(&self) -> &str {
        self.markup.name()
    }

    /// One markup attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.markup.attr(name)
    }

    /// Overwrite a markup attribute.
    pub fn set_attr(&mut self, name: &str, value: &str) {
        self.markup.attrs_mut().set(name, value);
    }

    /// Raw inner markup.
    #[must_use]
    pub fn content(&self) -> &str {
        self.markup.content()
    }

    /// Replace the inner markup that will be laid out.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.markup.set_content(content);
    }

    /// A css value registered so far.
    #[must_use]
    pub fn css_attr(&self, name: &str) -> Option<&CssValue> {
        self.css.get(name)
    }

    /// Register a css value.
    pub fn set_css_attr(&mut self, name: &str, value: impl Into<CssValue>) {
        let _ = self.css.insert(name.to_string(), value.into());
    }

    /// Position among the element children of the parent, from zero.
    #[must_use]
    pub const fn child_index(&self) -> usize {
        self.child_index
    }

    /// `:first-child`
    #[must_use]
    pub const fn is_first_child(&self) -> bool {
        self.markup.flags().first_child
    }

    /// `:last-child`
    #[must_use]
    pub const fn is_last_child(&self) -> bool {
        self.markup.flags().last_child
    }

    /// `:only-child`
    #[must_use]
    pub const fn is_only_child(&self) -> bool {
        self.markup.flags().only_child
    }

    /// Markup name of the parent node.
    #[must_use]
    pub fn parent_markup_name(&self) -> Option<&str> {
        self.parent.map(|id| self.tree.get(id).markup.name())
    }

    /// Font size of the parent, or `None` at the root.
    #[must_use]
    pub fn parent_font_size(&self) -> Option<i32> {
        self.parent.map(|id| self.tree.get(id).font.size)
    }

    /// Flow of the parent, or `None` at the root.
    #[must_use]
    pub fn parent_flow(&self) -> Option<BoxFlow> {
        self.parent.map(|id| self.tree.get(id).flow)
    }

    /// Content measure of the parent, or `None` at the root.
    #[must_use]
    pub fn parent_content_measure(&self) -> Option<i32> {
        self.parent.map(|id| self.tree.get(id).content_measure)
    }

    /// Content extent of the parent, or `None` at the root.
    #[must_use]
    pub fn parent_content_extent(&self) -> Option<i32> {
        self.parent.map(|id| self.tree.get(id).content_extent)
    }
}
