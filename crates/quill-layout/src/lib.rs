//! Mixed-mode box layout and border geometry for the Quill editor surface.
//!
//! # Scope
//!
//! This crate implements:
//! - **Container collection** - an ordered, index-stable arena of children
//!   with insert/remove/move/find and placeholder filling
//!
//! - **Flow layout** - one measure/arrange pass placing
//!   - Static children in block flow with float/clear and margin collapsing
//!   - Relative children as offset perturbations of their flow slot
//!   - Overlapped children at an offset from their flow anchor
//!   - Absolute and Fixed children pinned to the container's edges
//!
//! - **Coordinate mapping** - absolute rectangles to flow-relative
//!   descriptors `(preceding_index, offset, alignment)` and back
//!
//! - **Positioning state machine** - mode changes that keep the child where
//!   it is on screen, re-sequencing it in the collection as needed
//!
//! - **Border geometry and painting** - per-edge styled, rounded borders as
//!   closed paths, with a rectangle fast path, and a display list
//!
//! # Not Implemented
//!
//! - Text shaping and line breaking; plug in a [`ContentMeasure`]
//! - Hit-testing beyond point-to-child resolution
//! - Persistence formats

/// Points, sizes, rectangles and edge thicknesses.
pub mod box_model;
/// The ordered child arena.
pub mod collection;
/// Per-container layout settings.
pub mod config;
/// The container façade collaborators talk to.
pub mod container;
/// Error type for collection and lookup failures.
pub mod error;
/// The flow layout pass.
pub mod layout;
/// Absolute ⇄ flow-relative coordinate conversion.
pub mod mapper;
/// Per-child positioning metadata.
pub mod model;
/// Border geometry, display list and painter.
pub mod paint;
/// Positioning mode transitions.
pub mod positioning;
/// Colors and border specifications.
pub mod style;

pub use box_model::{EdgeSizes, Point, Rect, Size};
pub use collection::ChildCollection;
pub use config::{LayoutConfig, StaticTransition};
pub use container::{Container, HistoryReplay, LayoutEvent};
pub use error::{LayoutError, Result};
pub use layout::{ChildLayout, FlowAnchor, FlowLayout, LayoutSnapshot};
pub use mapper::{CoordinateMapper, FlowDescriptor};
pub use model::{
    BoxOffsets, ChildContent, ChildEntry, ChildId, ClearSide, ContentMeasure, FloatSide, HorizontalAlignment,
    IntrinsicMeasure, Positioning, Visibility,
};
pub use paint::{BorderGeometry, ClosedPath, DisplayCommand, DisplayList, PathSegment, Painter, Pen};
pub use positioning::Transition;
pub use style::{BorderEdge, BorderSpec, BorderStyle, ColorValue, Edge};
