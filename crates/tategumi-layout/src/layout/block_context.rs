//! Block axis accumulator.

use crate::layout::layout_box::LayoutBox;

/// Collects the boxes of one block output along the block axis.
///
/// Boxes land in one of three buckets. `pulled` boxes go to the front,
/// `pushed` boxes go to the end and everything else keeps its order.
#[derive(Debug, Clone, Default)]
pub struct BlockContext {
    /// Extent used so far.
    pub cur_extent: i32,
    /// Extent available.
    pub max_extent: i32,
    /// The block must end after the current element.
    pub break_after: bool,
    /// Root lines added so far.
    pub line_no: usize,
    normal: Vec<LayoutBox>,
    pushed: Vec<LayoutBox>,
    pulled: Vec<LayoutBox>,
}

impl BlockContext {
    /// An empty context with `max_extent` available.
    #[must_use]
    pub fn new(max_extent: i32) -> Self {
        Self {
            max_extent,
            ..Self::default()
        }
    }

    /// `max_extent - cur_extent`
    #[must_use]
    pub const fn rest_extent(&self) -> i32 {
        self.max_extent - self.cur_extent
    }

    /// Add a box that takes `extent`.
    pub fn add_element(&mut self, element: LayoutBox, extent: i32) {
        self.cur_extent += extent;
        if element.pushed {
            self.pushed.push(element);
        } else if element.pulled {
            self.pulled.insert(0, element);
        } else {
            self.normal.push(element);
        }
    }

    /// Number of boxes added.
    #[must_use]
    pub fn len(&self) -> usize {
        self.normal.len() + self.pushed.len() + self.pulled.len()
    }

    /// Returns `true` before the first box.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every box: pulled, then normal, then pushed.
    pub fn take_elements(&mut self) -> Vec<LayoutBox> {
        let mut elements = std::mem::take(&mut self.pulled);
        elements.append(&mut self.normal);
        elements.append(&mut self.pushed);
        elements
    }
}
