//! Float generator.
//!
//! [§ 9.5.1 Positioning the float](https://www.w3.org/TR/CSS2/visuren.html#float-position)
//!
//! > A left-floating box that has another left-floating box to its left
//! > may not have its right outer edge to the right of its containing
//! > block's right edge.
//!
//! A float root yields its floats, groups them, and fills the area beside
//! and below each group with its float space, the flow that continues the
//! block the floats were declared in.

use tategumi_common::layout_trace;

use crate::error::LayoutError;
use crate::layout::{BoxType, Clearance, Element, FloatGroup, FloatGroupStack, FloatMark, LayoutBox};
use crate::rendering::{ContextId, LayoutEngine};
use crate::style::keywords::FloatDirection;

impl LayoutEngine {
    /// Yield the floats of `id` with the flow around them.
    pub(crate) fn yield_float(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        self.init_layout_context(id);
        let Some(layout) = self.layout_of(id) else {
            return Ok(None);
        };
        let (measure, extent) = (layout.inline.max_measure, layout.block.max_extent);

        // STEP 1: Yield every float.
        let mut starts = Vec::new();
        let mut ends = Vec::new();
        for float in self.ctx(id).floats.clone() {
            if !self.has_next(float) {
                continue;
            }
            let Some(output) = self.yield_box(float)? else {
                continue;
            };
            match self.style_of(float).float_direction {
                Some(FloatDirection::End) => ends.push(output),
                _ => starts.push(output),
            }
        }

        // STEP 2: Lay the groups out, largest first.
        let mut stack = FloatGroupStack::new(self.flow_of(id), starts, ends);
        layout_trace!("Float", "{} groups in {measure}x{extent}", stack.len());
        self.yield_float_stack(id, &mut stack, measure, extent, None)
    }

    /// Lay out the groups left on `stack` in an area of `measure` by
    /// `extent`. The space next to nothing but the outer group gets
    /// `outer_mark`.
    fn yield_float_stack(
        &mut self,
        id: ContextId,
        stack: &mut FloatGroupStack,
        measure: i32,
        extent: i32,
        outer_mark: Option<FloatMark>,
    ) -> Result<Option<LayoutBox>, LayoutError> {
        if measure <= 0 || extent <= 0 {
            return Ok(None);
        }
        let Some(group) = stack.pop() else {
            return self.yield_float_space(id, measure, extent, outer_mark);
        };
        let group_extent = group.extent().min(extent);
        let beside = self.yield_float_stack(
            id,
            stack,
            measure - group.measure(),
            group_extent,
            Some(group.mark()),
        )?;
        let wrapped = self.wrap_float(id, group, beside, measure, group_extent);

        let rest_extent = extent - group_extent;
        if rest_extent <= 0 {
            return Ok(Some(wrapped));
        }
        let below = self.yield_float_space(id, measure, rest_extent, outer_mark)?;
        let Some(below) = below else {
            return Ok(Some(wrapped));
        };
        Ok(Some(self.wrap_blocks(id, vec![wrapped, below], measure)))
    }

    /// Yield the float space of `id` into an area of `measure` by `extent`.
    fn yield_float_space(
        &mut self,
        id: ContextId,
        measure: i32,
        extent: i32,
        mark: Option<FloatMark>,
    ) -> Result<Option<LayoutBox>, LayoutError> {
        let Some(space) = self.ctx(id).space else {
            return Ok(None);
        };
        if !self.has_next(space) {
            return Ok(None);
        }
        let style = self.ctx(space).style;
        self.styles.update_static_size(style, measure, extent);
        self.ctx_mut(space).float_mark = mark;
        self.yield_box(space)
    }

    /// The floats of `group` and the area beside them, side by side.
    fn wrap_float(
        &self,
        id: ContextId,
        group: FloatGroup,
        beside: Option<LayoutBox>,
        measure: i32,
        extent: i32,
    ) -> LayoutBox {
        let style = self.ctx(id).style;
        let flow = self.flow_of(id);
        let direction = group.direction();
        let rest_measure = (measure - group.measure()).max(0);
        let mut beside = beside.unwrap_or_else(|| {
            let mut empty = self.new_box(style, BoxType::Block, flow.box_size(rest_measure, extent));
            empty.css.clear();
            empty
        });
        let edge_extent = beside.edge.map_or(0, |edge| edge.extent(flow));
        beside.resize_extent(flow, (extent - edge_extent).max(0));

        let floats = group.into_elements().into_iter().map(Element::from);
        let elements: Vec<Element> = match direction {
            FloatDirection::Start => floats.chain(std::iter::once(Element::from(beside))).collect(),
            FloatDirection::End => std::iter::once(Element::from(beside)).chain(floats).collect(),
        };
        let mut output = self.new_box(style, BoxType::LineBlock, flow.box_size(measure, extent));
        output.char_count = elements.iter().map(Element::char_count).sum();
        output.elements = elements;
        output
    }

    /// Blocks stacked along the block axis.
    fn wrap_blocks(&self, id: ContextId, blocks: Vec<LayoutBox>, measure: i32) -> LayoutBox {
        let style = self.ctx(id).style;
        let flow = self.flow_of(id);
        let extent = blocks.iter().map(|b| b.layout_extent(flow)).sum();
        let mut output = self.new_box(style, BoxType::Block, flow.box_size(measure, extent));
        output.char_count = blocks.iter().map(|b| b.char_count).sum();
        output.elements = blocks.into_iter().map(Element::from).collect();
        output
    }

    /// [§ 9.5.2 Controlling flow next to floats](https://www.w3.org/TR/CSS2/visuren.html#flow-control)
    ///
    /// > This property indicates which sides of an element's box(es) may
    /// > not be adjacent to an earlier floating box.
    ///
    /// A `clear` block inside a float space stays blank, as a white space
    /// box filling the area, until the area is no longer beside a float of
    /// a cleared direction. Returns that box while clearing.
    pub(crate) fn yield_clearance(&mut self, id: ContextId) -> Option<LayoutBox> {
        let kind = self.style_of(id).clear?;
        let mark = self
            .lineage(id)
            .find(|&c| self.ctx(c).float_space)
            .map(|c| self.ctx(c).float_mark)?;
        let clearance = self
            .ctx_mut(id)
            .clearance
            .get_or_insert_with(|| Clearance::new(kind));
        let Some(mark) = mark else {
            clearance.set_done(FloatDirection::Start);
            clearance.set_done(FloatDirection::End);
            return None;
        };
        if clearance.is_done() {
            return None;
        }
        if mark.last && clearance.has_direction(mark.direction) {
            clearance.set_done(mark.direction);
        }
        layout_trace!("Float", "clearance beside {} floats", mark.direction);
        Some(self.create_white_space(id))
    }
}
