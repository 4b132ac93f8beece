//! Writing flow and logical/physical direction mapping.
//!
//! [§ 2 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
//!
//! Layout works entirely in logical terms. `measure` runs along the line and
//! `extent` runs across lines. Edges are `before`/`after` on the block axis
//! and `start`/`end` on the inline axis. Geometry only becomes physical when a
//! box stores its size, and that translation is a pure function of the flow.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// [§ 2 Block Flow Direction](https://www.w3.org/TR/css-writing-modes-4/#block-flow)
///
/// "The writing-mode property specifies whether lines of text are laid out
/// horizontally or vertically and the direction in which blocks progress."
///
/// The short names `lr-tb`, `tb-rl` and `tb-lr` (inline direction, then
/// block direction) are accepted as aliases.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "kebab-case")]
pub enum BoxFlow {
    /// Lines run left to right, blocks stack top to bottom.
    ///
    /// Mapping: before → top, after → bottom, start → left, end → right.
    #[strum(to_string = "horizontal-tb", serialize = "lr-tb")]
    HorizontalTb,

    /// Lines run top to bottom, blocks stack right to left.
    ///
    /// Mapping: before → right, after → left, start → top, end → bottom.
    #[default]
    #[strum(to_string = "vertical-rl", serialize = "tb-rl")]
    VerticalRl,

    /// Lines run top to bottom, blocks stack left to right.
    ///
    /// Mapping: before → left, after → right, start → top, end → bottom.
    #[strum(to_string = "vertical-lr", serialize = "tb-lr")]
    VerticalLr,
}

/// A flow-relative side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum LogicalSide {
    /// Block-start side.
    Before,
    /// Inline-end side.
    End,
    /// Block-end side.
    After,
    /// Inline-start side.
    Start,
}

impl LogicalSide {
    /// All sides in shorthand order (`before end after start`).
    pub const ALL: [Self; 4] = [Self::Before, Self::End, Self::After, Self::Start];
}

/// Physical side of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum PhysicalSide {
    /// Top edge of the box
    Top,
    /// Right edge of the box
    Right,
    /// Bottom edge of the box
    Bottom,
    /// Left edge of the box
    Left,
}

/// Physical size of a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct BoxSize {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl BoxFlow {
    /// Returns `true` for the vertical flows.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::VerticalRl | Self::VerticalLr)
    }

    /// [§ 6.2 Flow-relative Directions](https://www.w3.org/TR/css-writing-modes-4/#logical-directions)
    ///
    /// | Flow          | before | after  | start | end    |
    /// |---------------|--------|--------|-------|--------|
    /// | horizontal-tb | top    | bottom | left  | right  |
    /// | vertical-rl   | right  | left   | top   | bottom |
    /// | vertical-lr   | left   | right  | top   | bottom |
    #[must_use]
    pub const fn physical_side(self, side: LogicalSide) -> PhysicalSide {
        match (self, side) {
            (Self::HorizontalTb, LogicalSide::Before) => PhysicalSide::Top,
            (Self::HorizontalTb, LogicalSide::After) => PhysicalSide::Bottom,
            (Self::HorizontalTb, LogicalSide::Start) => PhysicalSide::Left,
            (Self::HorizontalTb, LogicalSide::End) => PhysicalSide::Right,
            (Self::VerticalRl, LogicalSide::Before) | (Self::VerticalLr, LogicalSide::After) => {
                PhysicalSide::Right
            }
            (Self::VerticalRl, LogicalSide::After) | (Self::VerticalLr, LogicalSide::Before) => {
                PhysicalSide::Left
            }
            (Self::VerticalRl | Self::VerticalLr, LogicalSide::Start) => PhysicalSide::Top,
            (Self::VerticalRl | Self::VerticalLr, LogicalSide::End) => PhysicalSide::Bottom,
        }
    }

    /// Physical property name of the measure axis.
    #[must_use]
    pub const fn measure_prop(self) -> &'static str {
        if self.is_vertical() { "height" } else { "width" }
    }

    /// Physical property name of the extent axis.
    #[must_use]
    pub const fn extent_prop(self) -> &'static str {
        if self.is_vertical() { "width" } else { "height" }
    }

    /// Build a physical size from logical lengths.
    #[must_use]
    pub const fn box_size(self, measure: i32, extent: i32) -> BoxSize {
        if self.is_vertical() {
            BoxSize {
                width: extent,
                height: measure,
            }
        } else {
            BoxSize {
                width: measure,
                height: extent,
            }
        }
    }

    /// The measure of a physical size.
    #[must_use]
    pub const fn measure_of(self, size: BoxSize) -> i32 {
        if self.is_vertical() { size.height } else { size.width }
    }

    /// The extent of a physical size.
    #[must_use]
    pub const fn extent_of(self, size: BoxSize) -> i32 {
        if self.is_vertical() { size.width } else { size.height }
    }

    /// Overwrite the measure of a physical size.
    pub const fn set_measure(self, size: &mut BoxSize, measure: i32) {
        if self.is_vertical() {
            size.height = measure;
        } else {
            size.width = measure;
        }
    }

    /// Overwrite the extent of a physical size.
    pub const fn set_extent(self, size: &mut BoxSize, extent: i32) {
        if self.is_vertical() {
            size.width = extent;
        } else {
            size.height = extent;
        }
    }

    /// The flow a `flow: flip` child takes: vertical becomes horizontal and
    /// horizontal becomes vertical-rl.
    #[must_use]
    pub const fn flip(self) -> Self {
        match self {
            Self::HorizontalTb => Self::VerticalRl,
            Self::VerticalRl | Self::VerticalLr => Self::HorizontalTb,
        }
    }
}
