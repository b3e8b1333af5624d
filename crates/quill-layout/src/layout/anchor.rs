//! Flow anchors.
//!
//! An anchor is the nearest visible, non-floated Static or Relative child
//! that precedes a given collection index. Overlapped children and
//! flow-relative descriptors are expressed as an offset from it:
//!
//! ```text
//!   ┌──────── anchor ────────┐
//!   │                        │
//!   └────────────────────────┘
//!        margin.bottom
//!   ● ◄── origin (Left alignment: content.x + anchor margin.left)
//! ```
//!
//! With no anchor the origin is the content box's top-left corner.

use crate::box_model::{Point, Rect};
use crate::model::HorizontalAlignment;

/// Where flow-relative coordinates are measured from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FlowAnchor {
    /// Collection index of the anchoring child, `None` for the content origin.
    pub index: Option<usize>,
    /// Bottom of the anchor's margin box, in content-box coordinates.
    pub bottom: f64,
    /// The anchor's left margin.
    pub margin_left: f64,
}

impl FlowAnchor {
    /// The anchor used when nothing precedes: the content box origin.
    pub const ORIGIN: Self = Self {
        index: None,
        bottom: 0.0,
        margin_left: 0.0,
    };

    /// Build an anchor from a child's unperturbed flow rectangle.
    #[must_use]
    pub fn from_flow_rect(index: usize, flow_rect: Rect, content: Rect, margin_bottom: f64, margin_left: f64) -> Self {
        Self {
            index: Some(index),
            bottom: flow_rect.bottom() - content.y + margin_bottom,
            margin_left,
        }
    }

    /// Container-relative origin for a box of `width` aligned within `content`.
    #[must_use]
    pub fn origin(&self, alignment: Option<HorizontalAlignment>, content: Rect, width: f64) -> Point {
        let x = match alignment.unwrap_or(HorizontalAlignment::Left) {
            HorizontalAlignment::Left => content.x + self.margin_left,
            HorizontalAlignment::Center => content.x + (content.width - width) / 2.0,
            HorizontalAlignment::Right => content.right() - width,
        };
        Point::new(x, content.y + self.bottom)
    }
}
