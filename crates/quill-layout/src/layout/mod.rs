//! Flow layout.
//!
//! One pass places every child:
//!
//! - Static and Relative children in top-to-bottom block flow, with
//!   float/clear and vertical margin collapsing. Relative children are then
//!   shifted by their offsets without disturbing their siblings.
//! - Overlapped children at an offset from their flow anchor, without
//!   consuming flow space.
//! - Absolute and Fixed children in a second pass, pinned to the container's
//!   edges once the flow-determined size is known.
//!
//! # Module Structure
//!
//! - [`anchor`] - The flow anchor shared by layout and the coordinate mapper
//! - [`flow`] - The measure/arrange routine
//! - [`snapshot`] - Resolved rectangles of one pass

pub mod anchor;
pub mod flow;
pub mod snapshot;

pub use anchor::FlowAnchor;
pub use flow::FlowLayout;
pub use snapshot::{ChildLayout, LayoutSnapshot};
