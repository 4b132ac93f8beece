//! Text tokens, classification and measurement.

pub mod char_class;
pub mod lexer;
pub mod metrics;
pub mod spacing;
pub mod token;

pub use lexer::{TextOrientation, lex_ruby, lex_tcy, lex_text};
pub use metrics::{ApproximateFontMetrics, FontMetrics};
pub use token::{TextKind, TextToken};
