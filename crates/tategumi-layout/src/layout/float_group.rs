//! Float groups.
//!
//! [§ 9.5 Floats](https://www.w3.org/TR/CSS2/visuren.html#floats)
//!
//! > A float is a box that is shifted to the left or right on the current
//! > line.
//!
//! Consecutive floats of one direction are stacked side by side into a
//! [`FloatGroup`]. The float layout peels groups off a [`FloatGroupStack`]
//! largest extent first: each group takes its measure from the start (or
//! end) of the area, and the rest of the area beside it is filled by the
//! next group or by the normal flow.

use crate::layout::layout_box::LayoutBox;
use crate::style::flow::BoxFlow;
use crate::style::keywords::{ClearKind, FloatDirection};

/// Floats of one direction laid side by side.
#[derive(Debug, Clone)]
pub struct FloatGroup {
    direction: FloatDirection,
    elements: Vec<LayoutBox>,
    measure: i32,
    extent: i32,
    last: bool,
}

impl FloatGroup {
    /// An empty group.
    #[must_use]
    pub const fn new(direction: FloatDirection) -> Self {
        Self {
            direction,
            elements: Vec::new(),
            measure: 0,
            extent: 0,
            last: false,
        }
    }

    /// Add the next float of this direction.
    pub fn add(&mut self, element: LayoutBox, flow: BoxFlow) {
        self.measure += element.layout_measure(flow);
        self.extent = self.extent.max(element.layout_extent(flow));
        self.elements.push(element);
    }

    /// Float direction.
    #[must_use]
    pub const fn direction(&self) -> FloatDirection {
        self.direction
    }

    /// Sum of the float measures.
    #[must_use]
    pub const fn measure(&self) -> i32 {
        self.measure
    }

    /// Largest float extent.
    #[must_use]
    pub const fn extent(&self) -> i32 {
        self.extent
    }

    /// No group of this direction is left on the stack.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.last
    }

    /// Marker handed to the space beside this group.
    #[must_use]
    pub const fn mark(&self) -> FloatMark {
        FloatMark {
            direction: self.direction,
            last: self.last,
        }
    }

    /// The floats in inline order from the start of the area. End floats
    /// stack from the end, so the first of them is placed last.
    #[must_use]
    pub fn into_elements(self) -> Vec<LayoutBox> {
        let mut elements = self.elements;
        if self.direction == FloatDirection::End {
            elements.reverse();
        }
        elements
    }
}

/// Which float group a space was laid out beside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloatMark {
    /// Direction of the group.
    pub direction: FloatDirection,
    /// It was the last group of that direction.
    pub last: bool,
}

/// Float groups ordered so that `pop` yields the largest extent first.
#[derive(Debug, Clone, Default)]
pub struct FloatGroupStack {
    groups: Vec<FloatGroup>,
}

impl FloatGroupStack {
    /// Group the floats of both directions.
    ///
    /// Within one direction a new group starts whenever a float is taller
    /// than the group so far; the area beside a short group is narrower than
    /// beside a tall one, so they cannot share a row.
    #[must_use]
    pub fn new(flow: BoxFlow, start: Vec<LayoutBox>, end: Vec<LayoutBox>) -> Self {
        let mut groups = make_groups(flow, FloatDirection::Start, start);
        groups.extend(make_groups(flow, FloatDirection::End, end));
        groups.sort_by_key(FloatGroup::extent);
        Self { groups }
    }

    /// Returns `true` when no group is left.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of groups left.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Take the group with the largest extent. It is flagged last when no
    /// group of its direction stays behind.
    pub fn pop(&mut self) -> Option<FloatGroup> {
        let mut group = self.groups.pop()?;
        group.last = !self.groups.iter().any(|g| g.direction == group.direction);
        Some(group)
    }
}

fn make_groups(flow: BoxFlow, direction: FloatDirection, boxes: Vec<LayoutBox>) -> Vec<FloatGroup> {
    let mut groups: Vec<FloatGroup> = Vec::new();
    for element in boxes {
        let extent = element.layout_extent(flow);
        match groups.last_mut() {
            Some(group) if extent <= group.extent() => group.add(element, flow),
            _ => {
                let mut group = FloatGroup::new(direction);
                group.add(element, flow);
                groups.push(group);
            }
        }
    }
    groups
}

/// [§ 9.5.2 Controlling flow next to floats](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
///
/// Progress of a `clear` block. The block stays blank beside float groups
/// until the last group of every cleared direction was passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clearance {
    kind: ClearKind,
    start_done: bool,
    end_done: bool,
}

impl Clearance {
    /// Nothing cleared yet.
    #[must_use]
    pub const fn new(kind: ClearKind) -> Self {
        Self {
            kind,
            start_done: false,
            end_done: false,
        }
    }

    /// Whether `direction` must be cleared.
    #[must_use]
    pub const fn has_direction(&self, direction: FloatDirection) -> bool {
        matches!(
            (self.kind, direction),
            (ClearKind::Both, _)
                | (ClearKind::Start, FloatDirection::Start)
                | (ClearKind::End, FloatDirection::End)
        )
    }

    /// The last group of `direction` was passed.
    pub const fn set_done(&mut self, direction: FloatDirection) {
        match direction {
            FloatDirection::Start => self.start_done = true,
            FloatDirection::End => self.end_done = true,
        }
    }

    /// Every cleared direction was passed.
    #[must_use]
    pub const fn is_done(&self) -> bool {
        match self.kind {
            ClearKind::Start => self.start_done,
            ClearKind::End => self.end_done,
            ClearKind::Both => self.start_done && self.end_done,
        }
    }
}
