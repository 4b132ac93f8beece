//! Style sheets and the cascade seam.
//!
//! The engine never parses css on its own behalf. It asks a
//! [`CascadeResolver`] for the properties of each node and merges the answer
//! with inline styles and its own forced values. [`StyleSheet`] is the
//! resolver shipped with the crate: rules parsed from css text or added with
//! callback values, matched by specificity and then by order.

use tategumi_common::warning::warn_once;

use crate::style::selector::{Selector, SelectorQuery, Specificity, parse_selector};
use crate::style::values::{CssValue, PropValue, PropertyMap};

/// Resolve the cascaded properties of a node.
pub trait CascadeResolver {
    /// Properties of the subject of `query`.
    fn resolve(&self, query: &SelectorQuery<'_>) -> PropertyMap;

    /// Properties of the `pseudo_element` (`marker`, `before`, `after`)
    /// originating from the subject of `query`.
    fn resolve_pseudo(&self, query: &SelectorQuery<'_>, pseudo_element: &str) -> PropertyMap;
}

/// One selector with its declarations.
#[derive(Debug, Clone)]
struct StyleRule {
    selector: Selector,
    order: usize,
    properties: PropertyMap,
}

/// [§ 6 Cascading](https://www.w3.org/TR/css-cascade-4/#cascading)
///
/// A list of rules. Later rules win over earlier rules of equal specificity.
#[derive(Debug, Clone, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// An empty sheet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse css text into a new sheet.
    #[must_use]
    pub fn parse(css: &str) -> Self {
        let mut sheet = Self::new();
        sheet.add_css(css);
        sheet
    }

    /// The user-agent sheet.
    #[must_use]
    pub fn user_agent() -> Self {
        Self::parse(crate::style::ua_stylesheet::UA_STYLESHEET)
    }

    /// Number of rules (one per selector of a selector list).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if the sheet has no rules.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Append the rules of a css text.
    ///
    /// [§ 5.3.3 Parse a stylesheet](https://www.w3.org/TR/css-syntax-3/#parse-stylesheet)
    ///
    /// Comments and at-rules are dropped. A rule whose selector cannot be
    /// parsed is reported once and skipped; the rest of the sheet survives.
    pub fn add_css(&mut self, css: &str) {
        let css = strip_comments(css);
        let mut rest = css.as_str();
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                warn_once("CSS", "unterminated rule block");
                break;
            };
            let prelude = rest[..open].trim();
            let block = &rest[open + 1..close];
            rest = &rest[close + 1..];
            if prelude.starts_with('@') {
                continue;
            }
            let properties = parse_declarations(block);
            for selector in prelude.split(',') {
                self.add_rule(selector, properties.clone());
            }
        }
    }

    /// Append a rule with the given properties, which may include
    /// [`PropValue::Computed`] callbacks and the `oncreate` hook.
    pub fn add_rule(&mut self, selector: &str, properties: PropertyMap) {
        let Some(selector) = parse_selector(selector) else {
            warn_once(
                "CSS",
                &format!("failed to parse selector '{}'", selector.trim()),
            );
            return;
        };
        let order = self.rules.len();
        self.rules.push(StyleRule {
            selector,
            order,
            properties,
        });
    }

    fn cascade(&self, query: &SelectorQuery<'_>, pseudo_element: Option<&str>) -> PropertyMap {
        // [§ 6.4 Specificity](https://www.w3.org/TR/css-cascade-4/#cascade-specificity)
        // "The declaration with the highest specificity wins."
        // [§ 6.5 Order of Appearance](https://www.w3.org/TR/css-cascade-4/#cascade-order)
        // "The last declaration in document order wins."
        let mut matched: Vec<(Specificity, usize, &PropertyMap)> = self
            .rules
            .iter()
            .filter(|rule| rule.selector.matches(query, pseudo_element))
            .map(|rule| (rule.selector.specificity, rule.order, &rule.properties))
            .collect();
        matched.sort_by_key(|&(specificity, order, _)| (specificity, order));

        let mut properties = PropertyMap::new();
        for (_, _, rule_properties) in matched {
            for (name, value) in rule_properties {
                let _ = properties.insert(name.clone(), value.clone());
            }
        }
        properties
    }
}

impl CascadeResolver for StyleSheet {
    fn resolve(&self, query: &SelectorQuery<'_>) -> PropertyMap {
        self.cascade(query, None)
    }

    fn resolve_pseudo(&self, query: &SelectorQuery<'_>, pseudo_element: &str) -> PropertyMap {
        self.cascade(query, Some(pseudo_element))
    }
}

fn strip_comments(css: &str) -> String {
    let mut out = String::with_capacity(css.len());
    let mut rest = css;
    while let Some(start) = rest.find("/*") {
        out.push_str(&rest[..start]);
        rest = rest[start + 2..]
            .find("*/")
            .map_or("", |end| &rest[start + 2 + end + 2..]);
    }
    out.push_str(rest);
    out
}

/// Parse a declaration list such as `font-size: 1.2em; color: red`.
///
/// Names are lowercased, values trimmed, `!important` dropped. Values stay
/// strings until the style node reads them.
#[must_use]
pub fn parse_declarations(block: &str) -> PropertyMap {
    block
        .split(';')
        .filter_map(|declaration| {
            let (name, value) = declaration.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim().trim_end_matches("!important").trim();
            if name.is_empty() || value.is_empty() {
                return None;
            }
            Some((name, PropValue::Literal(CssValue::from(value))))
        })
        .collect()
}
