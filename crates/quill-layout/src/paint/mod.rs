//! Painting
//!
//! Converts a laid-out container into a display list of drawing commands.
//! The display list can then be executed by any renderer.
//!
//! ```text
//! Container → Layout → Paint → Render
//!                        ↓
//!                   DisplayList
//! ```
//!
//! - [`geometry`] - Border contours, pixel snapping and per-edge pens
//! - [`display_list`] - Drawing commands
//! - [`painter`] - Walks the container in paint order

pub mod display_list;
pub mod geometry;
pub mod painter;

pub use display_list::{DisplayCommand, DisplayList};
pub use geometry::{
    BorderGeometry, ClosedPath, PathSegment, Pen, build_border_geometry, build_border_path, build_border_pens,
};
pub use painter::Painter;
