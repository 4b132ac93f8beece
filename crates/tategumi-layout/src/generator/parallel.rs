//! Parallel generator.
//!
//! Columns laid out side by side along the inline axis, each yielding one
//! box per call. The row takes the extent of its tallest column and every
//! other column is stretched to it: table cells, and the marker and body
//! of an outside list item.

use tategumi_common::layout_trace;

use crate::error::LayoutError;
use crate::generator::GeneratorKind;
use crate::layout::{BoxType, Element, LayoutBox};
use crate::rendering::{ContextId, LayoutEngine, LayoutResult};

impl LayoutEngine {
    /// Yield one row of the columns of `id`.
    pub(crate) fn yield_parallel(&mut self, id: ContextId) -> Result<Option<LayoutBox>, LayoutError> {
        self.init_layout_context(id);
        let columns = self.ctx(id).parallel.clone();
        let mut outputs = Vec::with_capacity(columns.len());
        for &column in &columns {
            let output = if self.has_next(column) {
                self.yield_box(column)?
            } else {
                None
            };
            outputs.push(output);
        }
        if outputs.iter().all(Option::is_none) {
            return Ok(None);
        }

        // A marker never goes out without the first part of its body.
        if self.ctx(id).generator == GeneratorKind::OutsideListItem {
            if let [marker, body] = outputs.as_mut_slice() {
                let flow = self.flow_of(id);
                let body_waiting = body.as_ref().is_none_or(|b| b.is_void(flow))
                    && self.has_next(columns[1]);
                if body_waiting {
                    let Some(held) = marker.take() else {
                        return Ok(None);
                    };
                    if self.push_cache(columns[0], held.into()) == LayoutResult::Ok {
                        return Ok(None);
                    }
                    // The marker context is terminated; the body goes on alone.
                    layout_trace!("Parallel", "marker of <{}> dropped", self.style_of(id).markup_name());
                }
            }
        }

        let flow = self.flow_of(id);
        let wrap_extent = outputs
            .iter()
            .flatten()
            .map(|b| b.layout_extent(flow))
            .max()
            .unwrap_or(0);
        let mut elements = Vec::with_capacity(outputs.len());
        for (&column, output) in columns.iter().zip(outputs) {
            let mut output = output.unwrap_or_else(|| {
                let style = self.ctx(column).style;
                let measure = self.styles.get(style).content_measure;
                let mut empty = self.new_box(style, BoxType::Block, flow.box_size(measure, 0));
                empty.css.clear();
                empty.edge = self.output_edge(column, false, false);
                empty
            });
            let edge_extent = output.edge.map_or(0, |edge| edge.extent(flow));
            output.resize_extent(flow, (wrap_extent - edge_extent).max(0));
            elements.push(Element::from(output));
        }

        let has_next = self.has_next(id);
        let first = self.ctx(id).yield_count == 0;
        let style_id = self.ctx(id).style;
        let measure = self.styles.get(style_id).content_measure;
        let mut output = self.new_box(style_id, BoxType::LineBlock, flow.box_size(measure, wrap_extent));
        output.edge = self.output_edge(id, first, has_next);
        output.char_count = elements.iter().map(Element::char_count).sum();
        output.elements = elements;
        output.block_id = Some(self.next_block_id());
        layout_trace!(
            "Parallel",
            "<{}> row of {} columns, extent {wrap_extent}",
            output.markup,
            columns.len()
        );
        Ok(Some(output))
    }
}
