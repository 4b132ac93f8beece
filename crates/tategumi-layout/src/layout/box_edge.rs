//! Box edges.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! Edges are stored physically (top/right/bottom/left) and read through the
//! active [`BoxFlow`], so a box keeps a single representation even when a
//! child with a different flow inspects it.

use serde::Serialize;

use crate::style::flow::{BoxFlow, LogicalSide, PhysicalSide};

/// Edge sizes for padding, border, or margin.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: i32,
    /// Right edge size.
    pub right: i32,
    /// Bottom edge size.
    pub bottom: i32,
    /// Left edge size.
    pub left: i32,
}

impl EdgeSizes {
    /// The same size on all four sides.
    #[must_use]
    pub const fn uniform(size: i32) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// Size of one physical side.
    #[must_use]
    pub const fn side(&self, side: PhysicalSide) -> i32 {
        match side {
            PhysicalSide::Top => self.top,
            PhysicalSide::Right => self.right,
            PhysicalSide::Bottom => self.bottom,
            PhysicalSide::Left => self.left,
        }
    }

    /// Overwrite one physical side.
    pub const fn set_side(&mut self, side: PhysicalSide, size: i32) {
        match side {
            PhysicalSide::Top => self.top = size,
            PhysicalSide::Right => self.right = size,
            PhysicalSide::Bottom => self.bottom = size,
            PhysicalSide::Left => self.left = size,
        }
    }

    /// Size of one logical side.
    #[must_use]
    pub const fn get(&self, flow: BoxFlow, side: LogicalSide) -> i32 {
        self.side(flow.physical_side(side))
    }

    /// Overwrite one logical side.
    pub const fn set(&mut self, flow: BoxFlow, side: LogicalSide, size: i32) {
        self.set_side(flow.physical_side(side), size);
    }

    /// `start + end`
    #[must_use]
    pub const fn measure(&self, flow: BoxFlow) -> i32 {
        self.get(flow, LogicalSide::Start) + self.get(flow, LogicalSide::End)
    }

    /// `before + after`
    #[must_use]
    pub const fn extent(&self, flow: BoxFlow) -> i32 {
        self.get(flow, LogicalSide::Before) + self.get(flow, LogicalSide::After)
    }

    /// Remove up to `size` from the after side and return what was removed.
    pub fn cancel_after(&mut self, flow: BoxFlow, size: i32) -> i32 {
        let after = self.get(flow, LogicalSide::After);
        let cancel = after.min(size).max(0);
        self.set(flow, LogicalSide::After, after - cancel);
        cancel
    }

    /// Returns `true` if every side is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.top == 0 && self.right == 0 && self.bottom == 0 && self.left == 0
    }
}

/// Padding, border and margin of one box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BoxEdge {
    /// Padding widths.
    pub padding: EdgeSizes,
    /// Border widths.
    pub border: EdgeSizes,
    /// Margin widths.
    pub margin: EdgeSizes,
}

impl BoxEdge {
    /// Edge that only has padding.
    #[must_use]
    pub const fn with_padding(padding: EdgeSizes) -> Self {
        Self {
            padding,
            border: EdgeSizes::uniform(0),
            margin: EdgeSizes::uniform(0),
        }
    }

    /// Total edge along the measure axis.
    #[must_use]
    pub const fn measure(&self, flow: BoxFlow) -> i32 {
        self.padding.measure(flow) + self.border.measure(flow) + self.margin.measure(flow)
    }

    /// Total edge along the extent axis.
    #[must_use]
    pub const fn extent(&self, flow: BoxFlow) -> i32 {
        self.padding.extent(flow) + self.border.extent(flow) + self.margin.extent(flow)
    }

    /// Padding and border along the measure axis (the border-box edge).
    #[must_use]
    pub const fn inner_measure(&self, flow: BoxFlow) -> i32 {
        self.padding.measure(flow) + self.border.measure(flow)
    }

    /// Padding and border along the extent axis (the border-box edge).
    #[must_use]
    pub const fn inner_extent(&self, flow: BoxFlow) -> i32 {
        self.padding.extent(flow) + self.border.extent(flow)
    }

    /// Total size of one logical side.
    #[must_use]
    pub const fn side(&self, flow: BoxFlow, side: LogicalSide) -> i32 {
        self.padding.get(flow, side) + self.border.get(flow, side) + self.margin.get(flow, side)
    }

    /// Padding and border of one logical side.
    #[must_use]
    pub const fn inner_side(&self, flow: BoxFlow, side: LogicalSide) -> i32 {
        self.padding.get(flow, side) + self.border.get(flow, side)
    }

    /// Total before edge.
    #[must_use]
    pub const fn before(&self, flow: BoxFlow) -> i32 {
        self.side(flow, LogicalSide::Before)
    }

    /// Total after edge.
    #[must_use]
    pub const fn after(&self, flow: BoxFlow) -> i32 {
        self.side(flow, LogicalSide::After)
    }

    /// Trim the after edge by up to `size` and return how much was trimmed.
    ///
    /// Margin goes first, then padding, then border, so that a box cut at a
    /// page boundary loses its invisible space before its visible frame.
    pub fn cancel_after(&mut self, flow: BoxFlow, size: i32) -> i32 {
        let mut rest = size;
        rest -= self.margin.cancel_after(flow, rest);
        if rest > 0 {
            rest -= self.padding.cancel_after(flow, rest);
        }
        if rest > 0 {
            rest -= self.border.cancel_after(flow, rest);
        }
        size - rest
    }

    /// Zero one logical side on all three layers.
    pub const fn clear_side(&mut self, flow: BoxFlow, side: LogicalSide) {
        self.padding.set(flow, side, 0);
        self.border.set(flow, side, 0);
        self.margin.set(flow, side, 0);
    }

    /// Returns `true` if no layer has any size.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.padding.is_zero() && self.border.is_zero() && self.margin.is_zero()
    }
}
