//! Layout data: edges, partitions, accumulators and output boxes.

pub mod block_context;
pub mod box_edge;
pub mod float_group;
pub mod inline_context;
pub mod layout_box;
pub mod layout_context;
pub mod partition;

pub use block_context::BlockContext;
pub use box_edge::{BoxEdge, EdgeSizes};
pub use float_group::{Clearance, FloatGroup, FloatGroupStack, FloatMark};
pub use inline_context::InlineContext;
pub use layout_box::{BoxType, Element, HangingMark, LayoutBox};
pub use layout_context::LayoutContext;
pub use partition::{Partition, PartitionSet, PartitionUnit};
