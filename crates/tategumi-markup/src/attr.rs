//! Tag attribute lexing.
//!
//! [HTML § 13.1.2.3 Attributes](https://html.spec.whatwg.org/multipage/syntax.html#attributes-2)
//!
//! "Attributes for an element are expressed inside the element's start tag."
//!
//! Four syntaxes are accepted: empty (`hidden`), unquoted (`width=100`),
//! single-quoted and double-quoted. Names are lowercased. The `class`
//! attribute is split into a class list and `data-*` attributes are also
//! collected into a dataset keyed without the prefix.

use std::collections::BTreeMap;

use crate::error::MarkupError;

/// The attributes of one tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttrs {
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    dataset: BTreeMap<String, String>,
}

impl TagAttrs {
    /// Lex an attribute source such as `id="a" class='b c' hidden`.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::UnclosedLiteral`] when a quoted value never
    /// closes. Attributes read before the broken literal are lost; callers
    /// fall back to [`TagAttrs::default`].
    pub fn parse(src: &str) -> Result<Self, MarkupError> {
        let mut attrs = Self::default();
        let chars: Vec<(usize, char)> = src.char_indices().collect();
        let mut i = 0;
        while i < chars.len() {
            // STEP 1: Skip separators.
            while i < chars.len() && (chars[i].1.is_whitespace() || chars[i].1 == '/') {
                i += 1;
            }
            if i >= chars.len() {
                break;
            }

            // STEP 2: Attribute name runs to whitespace, '=' or the end.
            let name_start = i;
            while i < chars.len() && !chars[i].1.is_whitespace() && chars[i].1 != '=' {
                i += 1;
            }
            let name: String = chars[name_start..i].iter().map(|&(_, c)| c).collect();
            while i < chars.len() && chars[i].1.is_whitespace() {
                i += 1;
            }

            // STEP 3: No '=' means an empty attribute.
            if i >= chars.len() || chars[i].1 != '=' {
                attrs.set(&name, "");
                continue;
            }
            i += 1;
            while i < chars.len() && chars[i].1.is_whitespace() {
                i += 1;
            }
            if i >= chars.len() {
                attrs.set(&name, "");
                break;
            }

            // STEP 4: Quoted or unquoted value.
            let quote = chars[i].1;
            let value: String = if quote == '"' || quote == '\'' {
                let open = chars[i].0;
                i += 1;
                let value_start = i;
                while i < chars.len() && chars[i].1 != quote {
                    i += 1;
                }
                if i >= chars.len() {
                    return Err(MarkupError::UnclosedLiteral {
                        offset: open,
                        source_text: src.to_string(),
                    });
                }
                let value = chars[value_start..i].iter().map(|&(_, c)| c).collect();
                i += 1;
                value
            } else {
                let value_start = i;
                while i < chars.len() && !chars[i].1.is_whitespace() {
                    i += 1;
                }
                chars[value_start..i].iter().map(|&(_, c)| c).collect()
            };
            attrs.set(&name, &value);
        }
        Ok(attrs)
    }

    /// Set an attribute, keeping the class list and dataset in sync.
    pub fn set(&mut self, name: &str, value: &str) {
        let name = name.to_ascii_lowercase();
        if name.is_empty() {
            return;
        }
        if name == "class" {
            self.classes = value.split_whitespace().map(str::to_string).collect();
        }
        if let Some(key) = name.strip_prefix("data-") {
            let _ = self.dataset.insert(key.to_string(), value.to_string());
        }
        let _ = self.attrs.insert(name, value.to_string());
    }

    /// Get an attribute value.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns `true` if the attribute is present (even when empty).
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    /// Get a `data-*` attribute by its unprefixed key.
    #[must_use]
    pub fn data(&self, key: &str) -> Option<&str> {
        self.dataset.get(key).map(String::as_str)
    }

    /// The class list, in source order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Add a class if it is not present yet.
    pub fn add_class(&mut self, class: &str) {
        if !self.classes.iter().any(|c| c == class) {
            self.classes.push(class.to_string());
            let joined = self.classes.join(" ");
            let _ = self.attrs.insert("class".to_string(), joined);
        }
    }

    /// Iterate over all attributes in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
