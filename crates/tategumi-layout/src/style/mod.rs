//! Style resolution.
//!
//! - [`node`]: the style tree and per-node computed values
//! - [`cascade`] and [`selector`]: the default [`CascadeResolver`]
//! - [`flow`]: logical/physical direction mapping
//! - [`values`]: property values, callbacks and units

/// Cascade seam and the default style sheet.
pub mod cascade;
/// Writing flows and logical sides.
pub mod flow;
/// Font values.
pub mod font;
/// Keyword properties.
pub mod keywords;
/// List marker text.
pub mod list_marker;
/// Style nodes and the style tree.
pub mod node;
/// Selector parsing and matching.
pub mod selector;
/// What computed callbacks can see and change.
pub mod selector_context;
/// The user-agent sheet.
pub mod ua_stylesheet;
/// Property values and units.
pub mod values;

pub use cascade::{CascadeResolver, StyleSheet};
pub use flow::{BoxFlow, BoxSize, LogicalSide, PhysicalSide};
pub use node::{PreloadMap, StyleId, StyleNode, StyleTree};
pub use selector::SelectorQuery;
pub use selector_context::SelectorContext;
pub use values::{CssMap, CssValue, PropValue, PropertyMap};
