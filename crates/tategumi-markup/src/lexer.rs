//! Markup lexer.
//!
//! The lexer turns one level of markup into a flat list of sibling tokens.
//! A start tag swallows everything up to its matching end tag as raw
//! content, so nested markup is only lexed when the layout engine descends
//! into it. This keeps lexing proportional to what is actually laid out.

use tategumi_common::warning::warn_once;

use crate::error::MarkupError;
use crate::tag::{StructuralFlags, Tag};

/// Tags that never have content or an end tag.
///
/// [HTML § 13.1.2 Elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
/// plus the engine's own `page-break` and `end-page` markers.
pub const SINGLE_TAGS: &[&str] = &[
    "area",
    "base",
    "br",
    "col",
    "embed",
    "end-page",
    "hr",
    "img",
    "input",
    "link",
    "meta",
    "page-break",
    "param",
    "source",
    "wbr",
];

/// One token of a markup level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkupToken {
    /// An element with its raw inner content.
    Tag(Tag),
    /// A run of character data with entities decoded.
    Text(String),
}

impl MarkupToken {
    /// The tag, if this token is one.
    #[must_use]
    pub const fn as_tag(&self) -> Option<&Tag> {
        match self {
            Self::Tag(tag) => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// Returns `true` for text made only of whitespace.
    #[must_use]
    pub fn is_white_space_only(&self) -> bool {
        matches!(self, Self::Text(text) if text.chars().all(char::is_whitespace))
    }
}

/// Lexer for one level of markup.
#[derive(Debug, Clone)]
pub struct HtmlLexer {
    src: String,
    single_tags: Vec<String>,
}

impl HtmlLexer {
    /// Create a lexer with the default single tag list.
    #[must_use]
    pub fn new(src: &str) -> Self {
        Self {
            src: src.to_string(),
            single_tags: SINGLE_TAGS.iter().map(|&s| s.to_string()).collect(),
        }
    }

    /// Replace the list of tags that never have content.
    #[must_use]
    pub fn with_single_tags(mut self, single_tags: &[String]) -> Self {
        self.single_tags = single_tags.to_vec();
        self
    }

    /// Lex every sibling token.
    #[must_use]
    pub fn tokenize(&self) -> Vec<MarkupToken> {
        let src = self.src.as_str();
        let lower = src.to_ascii_lowercase();
        let mut tokens = Vec::new();
        let mut pos = 0;

        while pos < src.len() {
            let rest = &src[pos..];

            // STEP 1: Comments, doctypes and processing instructions vanish.
            if rest.starts_with("<!--") {
                pos = rest.find("-->").map_or(src.len(), |end| pos + end + 3);
                continue;
            }
            if rest.starts_with("<!") || rest.starts_with("<?") {
                pos = rest.find('>').map_or(src.len(), |end| pos + end + 1);
                continue;
            }

            // STEP 2: A tag starts with '<' followed by a name or '/'.
            if starts_tag(rest) {
                let Some(end) = rest.find('>') else {
                    warn_once(
                        "Markup",
                        &MarkupError::UnterminatedTag { offset: pos }.to_string(),
                    );
                    tokens.push(MarkupToken::Text(decode_entities(rest)));
                    break;
                };
                let mut tag = Tag::new(&rest[..=end]);
                pos += end + 1;
                if tag.is_close_tag() || tag.is_self_closing() || self.is_single(tag.name()) {
                    if !tag.is_close_tag() {
                        tag.set_self_closing(true);
                    }
                    tokens.push(MarkupToken::Tag(tag));
                    continue;
                }

                // STEP 3: Swallow content up to the matching end tag.
                match find_close(&lower[pos..], tag.name()) {
                    Some((content_end, close_end)) => {
                        tag.set_content(&src[pos..pos + content_end]);
                        pos += close_end;
                    }
                    None => {
                        tag.set_content(&src[pos..]);
                        pos = src.len();
                    }
                }
                tokens.push(MarkupToken::Tag(tag));
                continue;
            }

            // STEP 4: Text runs to the next '<'.
            let skip = usize::from(rest.starts_with('<'));
            let text_end = rest[skip..].find('<').map_or(rest.len(), |i| i + skip);
            tokens.push(MarkupToken::Text(decode_entities(&rest[..text_end])));
            pos += text_end;
        }

        set_structural_flags(&mut tokens);
        tokens
    }

    /// Lex and keep only tags named in `names`, dropping text and others.
    ///
    /// Used for table bodies (`tr`), rows (`td`, `th`) and lists (`li`).
    #[must_use]
    pub fn tokenize_filtered(&self, names: &[&str]) -> Vec<MarkupToken> {
        let mut tokens: Vec<MarkupToken> = self
            .tokenize()
            .into_iter()
            .filter(|token| {
                token
                    .as_tag()
                    .is_some_and(|tag| !tag.is_close_tag() && names.contains(&tag.name()))
            })
            .collect();
        set_structural_flags(&mut tokens);
        tokens
    }

    fn is_single(&self, name: &str) -> bool {
        self.single_tags.iter().any(|single| single == name)
    }
}

fn starts_tag(rest: &str) -> bool {
    if rest.starts_with("<::") {
        return true;
    }
    let mut chars = rest.chars();
    chars.next() == Some('<')
        && chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/')
}

/// Find the end tag matching an already-consumed start tag named `name`.
///
/// Returns `(content_end, after_close)` as byte offsets into `lower`.
fn find_close(lower: &str, name: &str) -> Option<(usize, usize)> {
    let open = format!("<{name}");
    let close = format!("</{name}");
    let mut depth = 1usize;
    let mut i = 0;
    while let Some(found) = lower[i..].find('<') {
        let at = i + found;
        let rest = &lower[at..];
        if rest.starts_with(&close) && name_ends(rest, close.len()) {
            let close_end = rest.find('>').map_or(lower.len(), |e| at + e + 1);
            depth -= 1;
            if depth == 0 {
                return Some((at, close_end));
            }
            i = close_end;
            continue;
        }
        if rest.starts_with(&open) && name_ends(rest, open.len()) {
            let tag_end = rest.find('>')?;
            if !rest[..tag_end].ends_with('/') {
                depth += 1;
            }
            i = at + tag_end + 1;
            continue;
        }
        i = at + 1;
    }
    None
}

fn name_ends(rest: &str, at: usize) -> bool {
    rest[at..]
        .chars()
        .next()
        .is_none_or(|c| c == '>' || c == '/' || c.is_whitespace())
}

/// Decode the handful of named entities that show up in running text.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&nbsp;", "\u{00a0}")
        .replace("&amp;", "&")
}

fn set_structural_flags(tokens: &mut [MarkupToken]) {
    let names: Vec<Option<String>> = tokens
        .iter()
        .map(|token| {
            token
                .as_tag()
                .filter(|tag| !tag.is_close_tag())
                .map(|tag| tag.name().to_string())
        })
        .collect();
    let elements: Vec<usize> = (0..tokens.len()).filter(|&i| names[i].is_some()).collect();
    let (Some(&first), Some(&last)) = (elements.first(), elements.last()) else {
        return;
    };
    for &i in &elements {
        let name = names[i].as_deref();
        let same_type: Vec<usize> = elements
            .iter()
            .copied()
            .filter(|&j| names[j].as_deref() == name)
            .collect();
        let flags = StructuralFlags {
            first_child: i == first,
            last_child: i == last,
            only_child: elements.len() == 1,
            first_of_type: same_type.first() == Some(&i),
            last_of_type: same_type.last() == Some(&i),
            only_of_type: same_type.len() == 1,
        };
        if let MarkupToken::Tag(tag) = &mut tokens[i] {
            tag.set_flags(flags);
        }
    }
}
