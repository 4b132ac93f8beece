//! Markup lexing and token streams for the tategumi layout engine.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag model** - name, attributes, classes, raw inner content and the
//!   structural pseudo-class flags of one markup element
//! - **Attribute lexer** - quoted, unquoted and boolean attributes
//! - **Markup lexer** - converts raw markup into a flat list of sibling
//!   tag/text tokens, each tag carrying its raw inner content so that the
//!   layout engine can lex children lazily when it descends
//! - **Token stream** - a pull-based cursor with peek, rewind and absolute
//!   seek, shared by the markup and text levels
//!
//! # Not Yet Implemented
//!
//! - Full HTML tree construction (implied end tags, foster parenting)
//! - Numeric character references beyond the common named ones

/// Tag attribute lexing.
pub mod attr;
/// Error types.
pub mod error;
/// Markup lexer producing sibling token lists.
pub mod lexer;
/// Pull-based token streams.
pub mod stream;
/// Markup tag model.
pub mod tag;

pub use attr::TagAttrs;
pub use error::{MarkupError, StreamError};
pub use lexer::{HtmlLexer, MarkupToken, SINGLE_TAGS};
pub use stream::TokenStream;
pub use tag::{StructuralFlags, Tag};
