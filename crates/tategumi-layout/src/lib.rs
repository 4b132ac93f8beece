//! Incremental, paginated text layout for vertical and horizontal CJK text.
//!
//! # Scope
//!
//! This crate implements:
//! - **Style resolution** ([CSS Cascading Level 4](https://www.w3.org/TR/css-cascade-4/))
//!   - A style tree built lazily as layout descends
//!   - Literal, computed and hook property values
//!   - box-sizing, margin collapse and border collapse
//!   - A small CSS-like default cascade with a user-agent sheet
//!
//! - **Writing modes** ([CSS Writing Modes Level 4](https://www.w3.org/TR/css-writing-modes-4/))
//!   - Logical measure and extent over `horizontal-tb`, `vertical-rl` and `vertical-lr`
//!   - Children whose flow differs from their parent's
//!
//! - **Line layout** ([CSS Text Level 3](https://www.w3.org/TR/css-text-3/))
//!   - Whitespace collapsing and `pre`
//!   - Line-break rules for head-NG and tail-NG characters, hanging punctuation
//!   - Word cutting, ideographic spacing, ruby, tate-chu-yoko and emphasis marks
//!
//! - **Block layout** ([CSS 2.1 § 9 Visual formatting model](https://www.w3.org/TR/CSS2/visuren.html))
//!   - Pages cut from the document one at a time, resumable at any element
//!   - Floats and clearance, lists, tables
//!   - Forced page breaks
//!
//! # Not Yet Implemented
//!
//! - Font shaping; text is measured through a [`FontMetrics`] collaborator
//! - Full CSS syntax
//! - Image loading; images are sized from attributes or a preload table

/// Engine configuration.
pub mod config;
/// Page iteration.
pub mod document;
/// Error types.
pub mod error;
/// Box generators.
pub mod generator;
/// Layout data structures.
pub mod layout;
/// Walking finished pages.
pub mod render;
/// Rendering contexts.
pub mod rendering;
/// Style resolution.
pub mod style;
/// Text tokens and measurement.
pub mod text;

pub use config::LayoutConfig;
pub use document::Page;
pub use error::{InvalidValue, LayoutError};
pub use generator::GeneratorKind;
pub use layout::{BoxEdge, BoxType, EdgeSizes, Element, LayoutBox, Partition, PartitionSet, PartitionUnit};
pub use render::{BoxRenderer, TextTreeRenderer, render_page};
pub use rendering::{ContextId, ContextState, LayoutEngine, LayoutResult, RenderingContext};
pub use style::{BoxFlow, BoxSize, CascadeResolver, CssValue, LogicalSide, PropValue, StyleSheet};
pub use text::{ApproximateFontMetrics, FontMetrics, TextToken};
