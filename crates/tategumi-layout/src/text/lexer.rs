//! Text lexer.
//!
//! Splits a run of character data into [`TextToken`]s: one token per
//! character except runs of half-width word characters, which become a
//! single word token. Every token is stamped with its stream index.

use strum_macros::{AsRefStr, Display, EnumString};
use tategumi_markup::{HtmlLexer, MarkupToken, TokenStream};

use crate::text::char_class::{is_white_space, is_word_char};
use crate::text::token::TextToken;

/// How a text run is oriented, which decides how it is tokenized.
///
/// [§ 5.1 Orienting Text](https://www.w3.org/TR/css-writing-modes-4/#text-orientation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum TextOrientation {
    /// Words sideways, other characters upright.
    #[default]
    Mixed,
    /// Every character upright, no words.
    Upright,
    /// The whole run is one sideways word.
    #[strum(serialize = "sideways", serialize = "sideways-right")]
    Sideways,
}

/// Lex text into a stream.
#[must_use]
pub fn lex_text(text: &str, orientation: TextOrientation) -> TokenStream<TextToken> {
    let tokens = match orientation {
        TextOrientation::Mixed => lex_mixed(text),
        TextOrientation::Upright => text.chars().map(TextToken::char).collect(),
        TextOrientation::Sideways if text.is_empty() => Vec::new(),
        TextOrientation::Sideways => vec![TextToken::word(text)],
    };
    stamp(tokens)
}

/// A single tate-chu-yoko token.
#[must_use]
pub fn lex_tcy(text: &str) -> TokenStream<TextToken> {
    stamp(vec![TextToken::tcy(text.trim())])
}

/// Ruby pairs from the inner markup of a `<ruby>` element.
///
/// Base text collects until an `<rt>` closes the pair. `<rb>` wraps base
/// text explicitly and `<rp>` fallback parentheses are dropped. Base text
/// left without an annotation becomes a pair with no `rt`.
#[must_use]
pub fn lex_ruby(content: &str) -> TokenStream<TextToken> {
    let mut tokens = Vec::new();
    let mut rb = String::new();
    for token in HtmlLexer::new(content).tokenize() {
        match token {
            MarkupToken::Text(text) => rb.push_str(text.trim()),
            MarkupToken::Tag(tag) => match tag.name() {
                "rb" => rb.push_str(&plain_text(tag.content())),
                "rt" => {
                    let rt = plain_text(tag.content());
                    tokens.push(TextToken::ruby(&rb, Some(&rt)));
                    rb.clear();
                }
                _ => {}
            },
        }
    }
    if !rb.is_empty() {
        tokens.push(TextToken::ruby(&rb, None));
    }
    stamp(tokens)
}

fn plain_text(markup: &str) -> String {
    HtmlLexer::new(markup)
        .tokenize()
        .into_iter()
        .map(|token| match token {
            MarkupToken::Text(text) => text,
            MarkupToken::Tag(tag) => plain_text(tag.content()),
        })
        .collect::<String>()
        .trim()
        .to_string()
}

fn lex_mixed(text: &str) -> Vec<TextToken> {
    let mut tokens = Vec::new();
    let mut word = String::new();
    for c in text.chars() {
        if is_word_char(c) && !is_white_space(c) {
            word.push(c);
            continue;
        }
        if !word.is_empty() {
            tokens.push(TextToken::word(&word));
            word.clear();
        }
        tokens.push(TextToken::char(c));
    }
    if !word.is_empty() {
        tokens.push(TextToken::word(&word));
    }
    tokens
}

fn stamp(tokens: Vec<TextToken>) -> TokenStream<TextToken> {
    TokenStream::new(
        tokens
            .into_iter()
            .enumerate()
            .map(|(i, token)| token.at(i))
            .collect(),
    )
}
