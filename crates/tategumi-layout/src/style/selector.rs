//! Selector parsing and matching.
//!
//! This module implements the subset of
//! [Selectors Level 4](https://www.w3.org/TR/selectors-4/) a layout style
//! sheet needs: type, class, id, universal and attribute selectors,
//! the structural pseudo-classes the markup lexer records, pseudo-elements,
//! and the descendant and child combinators.
//!
//! Matching runs against a [`SelectorQuery`], the root-to-subject path of
//! tags. Styles are resolved top down, so the path is always complete when a
//! node is styled.

use tategumi_markup::Tag;

/// The element being matched and its ancestors, root first.
#[derive(Debug, Clone, Default)]
pub struct SelectorQuery<'a> {
    path: Vec<&'a Tag>,
}

impl<'a> SelectorQuery<'a> {
    /// Build a query from a root-first path. The last tag is the subject.
    #[must_use]
    pub const fn new(path: Vec<&'a Tag>) -> Self {
        Self { path }
    }

    /// The element being matched.
    #[must_use]
    pub fn subject(&self) -> Option<&'a Tag> {
        self.path.last().copied()
    }

    /// Ancestors of the subject, nearest first.
    pub fn ancestors(&self) -> impl Iterator<Item = &'a Tag> + '_ {
        self.path.iter().rev().skip(1).copied()
    }
}

/// [§ 5 Elemental selectors](https://www.w3.org/TR/selectors-4/#elemental-selectors)
///
/// A simple selector is a single condition on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Examples: `p`, `ruby`, `li-body`
    Type(String),

    /// [§ 6.6 Class selector](https://www.w3.org/TR/selectors-4/#class-html)
    Class(String),

    /// [§ 6.7 ID selector](https://www.w3.org/TR/selectors-4/#id-selectors)
    Id(String),

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal,

    /// [§ 6.4 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    ///
    /// `[name]` when the value is `None`, `[name=value]` otherwise.
    Attribute(String, Option<String>),

    /// [§ 14 Tree-Structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)
    ///
    /// One of the flags in [`StructuralFlags`](tategumi_markup::StructuralFlags).
    PseudoClass(String),

    /// Any pseudo-class the engine cannot evaluate (`:hover`, `:not(...)`).
    /// The compound never matches but the rule is kept.
    NeverMatch,
}

impl SimpleSelector {
    /// Check this condition against one tag.
    #[must_use]
    pub fn matches(&self, tag: &Tag) -> bool {
        match self {
            Self::Type(name) => tag.name().eq_ignore_ascii_case(name),
            Self::Class(class) => tag.classes().iter().any(|c| c == class),
            Self::Id(id) => tag.id() == Some(id.as_str()),
            Self::Universal => true,
            Self::Attribute(name, None) => tag.attrs().has(name),
            Self::Attribute(name, Some(value)) => tag.attr(name) == Some(value.as_str()),
            Self::PseudoClass(name) => tag.flags().matches(name).unwrap_or(false),
            Self::NeverMatch => false,
        }
    }
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// "A compound selector is a sequence of simple selectors that are not
/// separated by a combinator, and represents a set of simultaneous
/// conditions on a single element."
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The conditions, all of which must hold.
    pub simple_selectors: Vec<SimpleSelector>,
}

impl CompoundSelector {
    fn matches(&self, tag: &Tag) -> bool {
        self.simple_selectors.iter().all(|simple| simple.matches(tag))
    }
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// [§ 16.1 Descendant combinator](https://www.w3.org/TR/selectors-4/#descendant-combinators)
    /// "A selector of the form 'A B' represents an element B that is an
    /// arbitrary descendant of some ancestor element A."
    Descendant,

    /// [§ 16.2 Child combinator](https://www.w3.org/TR/selectors-4/#child-combinators)
    /// "A selector of the form 'A > B' represents an element B that is a
    /// direct child of element A."
    Child,
}

/// [§ 17 Calculating Specificity](https://www.w3.org/TR/selectors-4/#specificity-rules)
/// "count the number of ID selectors in the selector (= A), count the number
/// of class selectors, attributes selectors, and pseudo-classes in the
/// selector (= B), count the number of type selectors and pseudo-elements in
/// the selector (= C)"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Specificity(pub u32, pub u32, pub u32);

/// [§ 4.3 Complex selectors](https://www.w3.org/TR/selectors-4/#complex)
///
/// `ul > li.first p::before` is stored as subject `p`, pseudo-element
/// `before` and the chain `[(Descendant, li.first), (Child, ul)]`, right to
/// left, because matching starts at the subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The rightmost compound.
    pub subject: CompoundSelector,
    /// `(combinator, compound)` pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements)
    /// such as `marker`, `before` and `after`.
    pub pseudo_element: Option<String>,
    /// Specificity of the whole selector.
    pub specificity: Specificity,
}

impl Selector {
    /// Match the selector against a query.
    ///
    /// A selector with a pseudo-element only matches a pseudo-element query
    /// of the same name, and the rest of the selector is then matched
    /// against the query path (the originating element).
    #[must_use]
    pub fn matches(&self, query: &SelectorQuery<'_>, pseudo_element: Option<&str>) -> bool {
        if self.pseudo_element.as_deref() != pseudo_element {
            return false;
        }
        let Some(subject) = query.subject() else {
            return false;
        };
        if !self.subject.matches(subject) {
            return false;
        }

        let mut ancestors = query.ancestors();
        for (combinator, compound) in &self.combinators {
            match combinator {
                Combinator::Descendant => {
                    if !ancestors.by_ref().any(|tag| compound.matches(tag)) {
                        return false;
                    }
                }
                Combinator::Child => match ancestors.next() {
                    Some(tag) if compound.matches(tag) => {}
                    _ => return false,
                },
            }
        }
        true
    }
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-' || !c.is_ascii()
}

fn take_ident(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        let _ = chars.next();
    }
    ident
}

/// Parse one compound selector such as `li.item:first-child::marker`.
///
/// Returns the compound and its pseudo-element, or `None` when the text is
/// not a compound selector.
fn parse_compound(text: &str) -> Option<(CompoundSelector, Option<String>)> {
    let mut compound = CompoundSelector::default();
    let mut pseudo_element = None;
    let mut chars = text.chars().peekable();

    while let Some(&c) = chars.peek() {
        match c {
            '*' => {
                let _ = chars.next();
                compound.simple_selectors.push(SimpleSelector::Universal);
            }
            '.' | '#' => {
                let _ = chars.next();
                let ident = take_ident(&mut chars);
                if ident.is_empty() {
                    return None;
                }
                compound.simple_selectors.push(if c == '.' {
                    SimpleSelector::Class(ident)
                } else {
                    SimpleSelector::Id(ident)
                });
            }
            '[' => {
                let _ = chars.next();
                let inner: String = chars.by_ref().take_while(|&ch| ch != ']').collect();
                let (name, value) = match inner.split_once('=') {
                    Some((name, value)) => (
                        name.trim(),
                        Some(value.trim().trim_matches(['"', '\'']).to_string()),
                    ),
                    None => (inner.trim(), None),
                };
                if name.is_empty() {
                    return None;
                }
                compound
                    .simple_selectors
                    .push(SimpleSelector::Attribute(name.to_ascii_lowercase(), value));
            }
            ':' => {
                let _ = chars.next();
                if chars.peek() == Some(&':') {
                    let _ = chars.next();
                    let name = take_ident(&mut chars);
                    if name.is_empty() {
                        return None;
                    }
                    pseudo_element = Some(name.to_ascii_lowercase());
                    continue;
                }
                let name = take_ident(&mut chars).to_ascii_lowercase();
                if chars.peek() == Some(&'(') {
                    let _ = chars.by_ref().take_while(|&ch| ch != ')').count();
                    compound.simple_selectors.push(SimpleSelector::NeverMatch);
                    continue;
                }
                let simple = if tategumi_markup::StructuralFlags::default()
                    .matches(&name)
                    .is_some()
                {
                    SimpleSelector::PseudoClass(name)
                } else {
                    SimpleSelector::NeverMatch
                };
                compound.simple_selectors.push(simple);
            }
            _ if is_ident_char(c) => {
                let ident = take_ident(&mut chars).to_ascii_lowercase();
                compound.simple_selectors.push(SimpleSelector::Type(ident));
            }
            _ => return None,
        }
    }

    if compound.simple_selectors.is_empty() {
        if pseudo_element.is_none() {
            return None;
        }
        compound.simple_selectors.push(SimpleSelector::Universal);
    }
    Some((compound, pseudo_element))
}

fn compound_specificity(compound: &CompoundSelector) -> Specificity {
    let mut weight = Specificity::default();
    for simple in &compound.simple_selectors {
        match simple {
            SimpleSelector::Id(_) => weight.0 += 1,
            SimpleSelector::Class(_)
            | SimpleSelector::Attribute(..)
            | SimpleSelector::PseudoClass(_) => weight.1 += 1,
            SimpleSelector::Type(_) => weight.2 += 1,
            SimpleSelector::Universal | SimpleSelector::NeverMatch => {}
        }
    }
    weight
}

/// Parse one selector (no commas).
///
/// [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
///
/// Only the last compound may carry a pseudo-element. Returns `None` for
/// anything else this parser does not understand.
#[must_use]
pub fn parse_selector(raw: &str) -> Option<Selector> {
    // STEP 1: Split into compounds and combinators, left to right.
    let spaced = raw.replace('>', " > ");
    let mut compounds = Vec::new();
    let mut combinators = Vec::new();
    let mut pending = None;
    for word in spaced.split_whitespace() {
        if word == ">" {
            if compounds.is_empty() {
                return None;
            }
            pending = Some(Combinator::Child);
            continue;
        }
        if !compounds.is_empty() {
            combinators.push(pending.take().unwrap_or(Combinator::Descendant));
        }
        compounds.push(parse_compound(word)?);
    }
    if pending.is_some() {
        return None;
    }

    // STEP 2: Reverse so the subject comes first.
    let (subject, pseudo_element) = compounds.pop()?;
    if compounds.iter().any(|(_, pseudo)| pseudo.is_some()) {
        return None;
    }
    let chain: Vec<(Combinator, CompoundSelector)> = combinators
        .into_iter()
        .rev()
        .zip(compounds.into_iter().rev().map(|(compound, _)| compound))
        .collect();

    // STEP 3: Specificity over every compound, plus one C for the
    // pseudo-element.
    let mut specificity = compound_specificity(&subject);
    for (_, compound) in &chain {
        let weight = compound_specificity(compound);
        specificity.0 += weight.0;
        specificity.1 += weight.1;
        specificity.2 += weight.2;
    }
    if pseudo_element.is_some() {
        specificity.2 += 1;
    }

    Some(Selector {
        subject,
        combinators: chain,
        pseudo_element,
        specificity,
    })
}
