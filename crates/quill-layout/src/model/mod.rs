//! Per-child positioning metadata.
//!
//! - [`child`] - Child handles, entries and content measurement
//! - [`positioned`] - Positioning modes and box offsets
//! - [`float`] - Float and clear values

pub mod child;
pub mod float;
pub mod positioned;

pub use child::{
    ChildContent, ChildEntry, ChildId, ContentMeasure, HorizontalAlignment, IntrinsicMeasure,
    Visibility,
};
pub use float::{ClearSide, FloatSide};
pub use positioned::{BoxOffsets, Positioning};
