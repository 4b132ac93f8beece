//! Markup tag model.
//!
//! A [`Tag`] is one element as the layout engine sees it: a name, its
//! attributes, the raw inner markup (lexed again only when layout descends
//! into it) and the structural pseudo-class flags of its position among its
//! siblings.

use tategumi_common::warning::warn_once;

use crate::attr::TagAttrs;

/// [Selectors § 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
///
/// Flags computed once per sibling list by the lexer. Only element siblings
/// count; text between them is ignored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StructuralFlags {
    /// `:first-child`
    pub first_child: bool,
    /// `:last-child`
    pub last_child: bool,
    /// `:only-child`
    pub only_child: bool,
    /// `:first-of-type`
    pub first_of_type: bool,
    /// `:last-of-type`
    pub last_of_type: bool,
    /// `:only-of-type`
    pub only_of_type: bool,
}

impl StructuralFlags {
    /// Look a flag up by its pseudo-class name (without the colon).
    #[must_use]
    pub fn matches(&self, pseudo_class: &str) -> Option<bool> {
        match pseudo_class {
            "first-child" => Some(self.first_child),
            "last-child" => Some(self.last_child),
            "only-child" => Some(self.only_child),
            "first-of-type" => Some(self.first_of_type),
            "last-of-type" => Some(self.last_of_type),
            "only-of-type" => Some(self.only_of_type),
            _ => None,
        }
    }
}

/// One markup element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tag {
    name: String,
    attrs: TagAttrs,
    content: String,
    src: String,
    flags: StructuralFlags,
    close: bool,
    self_closing: bool,
}

impl Tag {
    /// Build a tag from its start-tag source, e.g. `<p class="lead">`.
    ///
    /// A malformed attribute list is reported and dropped; the tag itself
    /// survives with no attributes.
    #[must_use]
    pub fn new(src: &str) -> Self {
        let inner = src
            .trim()
            .trim_start_matches('<')
            .trim_end_matches('>')
            .trim();
        let close = inner.starts_with('/');
        let self_closing = inner.ends_with('/');
        let inner = inner.trim_start_matches('/').trim_end_matches('/').trim();
        let name_end = inner
            .find(|c: char| c.is_whitespace())
            .unwrap_or(inner.len());
        let name = inner[..name_end].to_ascii_lowercase();
        let attrs = TagAttrs::parse(&inner[name_end..]).unwrap_or_else(|err| {
            warn_once("Markup", &err.to_string());
            TagAttrs::default()
        });
        Self {
            name,
            attrs,
            content: String::new(),
            src: src.to_string(),
            flags: StructuralFlags::default(),
            close,
            self_closing,
        }
    }

    /// Build a synthetic tag with a name and inner content.
    ///
    /// Used for the engine's own nodes (`::marker`, `li-body`, float roots).
    #[must_use]
    pub fn with_content(name: &str, content: &str) -> Self {
        Self {
            name: name.to_string(),
            src: format!("<{name}>"),
            content: content.to_string(),
            ..Self::default()
        }
    }

    /// The lowercased tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original start-tag source.
    #[must_use]
    pub fn src(&self) -> &str {
        &self.src
    }

    /// The attributes.
    #[must_use]
    pub const fn attrs(&self) -> &TagAttrs {
        &self.attrs
    }

    /// Mutable attributes.
    pub const fn attrs_mut(&mut self) -> &mut TagAttrs {
        &mut self.attrs
    }

    /// Shortcut for one attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name)
    }

    /// The `id` attribute.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attrs.get("id").filter(|id| !id.is_empty())
    }

    /// The class list.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        self.attrs.classes()
    }

    /// Raw inner markup.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Replace the raw inner markup.
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    /// Returns `true` for a stray `</name>` token.
    #[must_use]
    pub const fn is_close_tag(&self) -> bool {
        self.close
    }

    /// Returns `true` when written as `<name/>`.
    #[must_use]
    pub const fn is_self_closing(&self) -> bool {
        self.self_closing
    }

    /// Mark the tag as self-closing (used by the lexer for void tags).
    pub const fn set_self_closing(&mut self, self_closing: bool) {
        self.self_closing = self_closing;
    }

    /// Structural pseudo-class flags.
    #[must_use]
    pub const fn flags(&self) -> StructuralFlags {
        self.flags
    }

    /// Replace the structural flags.
    pub const fn set_flags(&mut self, flags: StructuralFlags) {
        self.flags = flags;
    }

    /// Returns `true` for engine pseudo-element nodes such as `::marker`.
    #[must_use]
    pub fn is_pseudo_element(&self) -> bool {
        self.name.starts_with("::")
    }

    /// The pseudo-element name without the `::` prefix.
    #[must_use]
    pub fn pseudo_element_name(&self) -> Option<&str> {
        self.name.strip_prefix("::")
    }
}
