//! Coordinate mapping between container-absolute pixels and flow-relative
//! descriptors.
//!
//! A flow-relative descriptor `(preceding_index, offset, alignment)` says
//! "insert me at `preceding_index`; I sit at `offset` from the flow anchor
//! before that index, aligned `alignment`". Converting an absolute rectangle
//! into a descriptor and back is exact for an unchanged set of anchors.
//!
//! The mapper reads a committed [`LayoutSnapshot`]; it never lays out itself.

use quill_common::warning::warn_once;
use serde::{Deserialize, Serialize};

use crate::box_model::{Point, Rect, Size};
use crate::collection::ChildCollection;
use crate::layout::{FlowAnchor, LayoutSnapshot};
use crate::model::{ChildId, HorizontalAlignment};

/// A position expressed relative to the flow.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlowDescriptor {
    /// Collection index the child belongs at: one past its anchor, or 0.
    pub preceding_index: usize,
    /// Offset from the anchor's aligned origin.
    pub offset: Point,
    /// Inferred horizontal alignment.
    pub alignment: HorizontalAlignment,
}

/// Converts between absolute and flow-relative coordinates.
pub struct CoordinateMapper<'a> {
    children: &'a ChildCollection,
    snapshot: &'a LayoutSnapshot,
}

impl<'a> CoordinateMapper<'a> {
    /// Map against the given children and their last committed layout.
    #[must_use]
    pub const fn new(children: &'a ChildCollection, snapshot: &'a LayoutSnapshot) -> Self {
        Self { children, snapshot }
    }

    /// Index of the last flow anchor whose top lies at or above `y`.
    ///
    /// Collapsed, floated and out-of-flow children are never anchors: a
    /// transform cannot hang off an invisible element. `exclude` is the child
    /// being repositioned, which must not anchor to itself.
    #[must_use]
    pub fn preceding_static_child_from_point(&self, y: f64, exclude: Option<ChildId>) -> Option<usize> {
        let mut found = None;
        for (index, (id, child)) in self.children.iter().enumerate() {
            if Some(id) == exclude || !child.is_flow_anchor() {
                continue;
            }
            let Some(layout) = self.snapshot.get(id) else {
                continue;
            };
            if layout.flow_rect.y <= y {
                found = Some(index);
            }
        }
        found
    }

    /// The anchor governing a child inserted at `index`: the last flow anchor
    /// strictly before it, or the content origin.
    #[must_use]
    pub fn anchor_for_index(&self, index: usize, exclude: Option<ChildId>) -> FlowAnchor {
        if index == 0 {
            return FlowAnchor::ORIGIN;
        }
        let found = self.children.find_backward(index - 1, true, |id, child| {
            Some(id) != exclude && child.is_flow_anchor()
        });
        found.map_or(FlowAnchor::ORIGIN, |anchor_index| self.anchor_at(anchor_index))
    }

    fn anchor_at(&self, index: usize) -> FlowAnchor {
        let Some(id) = self.children.id_at(index) else {
            return FlowAnchor::ORIGIN;
        };
        let entry = self.children.get(id);
        match (entry, self.snapshot.get(id)) {
            (Some(entry), Some(layout)) => FlowAnchor::from_flow_rect(
                index,
                layout.flow_rect,
                self.snapshot.content_box,
                entry.margin.bottom,
                entry.margin.left,
            ),
            _ => {
                warn_once("Mapper", &format!("anchor {id} has no layout; using the content origin"));
                FlowAnchor::ORIGIN
            }
        }
    }

    /// Infer the alignment whose reference edge is closest to `rect`.
    ///
    /// Distances are compared in the fixed order left, center, right; on an
    /// exact tie the earlier one wins. A rectangle whose right edge sticks out
    /// past `container_width` is clipped by the viewport and is always
    /// Left-aligned, so it does not jump when the viewport is resized.
    #[must_use]
    pub fn compute_horizontal_alignment(rect: Rect, content: Rect, container_width: f64) -> HorizontalAlignment {
        if rect.right() > container_width {
            return HorizontalAlignment::Left;
        }
        let candidates = [
            (HorizontalAlignment::Left, (rect.x - content.x).abs()),
            (HorizontalAlignment::Center, (rect.center_x() - content.center_x()).abs()),
            (HorizontalAlignment::Right, (rect.right() - content.right()).abs()),
        ];
        let mut best = candidates[0];
        for candidate in &candidates[1..] {
            // Strictly smaller only: ties keep the earlier candidate.
            if candidate.1 < best.1 {
                best = *candidate;
            }
        }
        best.0
    }

    /// Express an absolute rectangle as a flow-relative descriptor.
    #[must_use]
    pub fn to_relative(&self, rect: Rect, exclude: Option<ChildId>) -> FlowDescriptor {
        let anchor_index = self.preceding_static_child_from_point(rect.y, exclude);
        let anchor = anchor_index.map_or(FlowAnchor::ORIGIN, |index| self.anchor_at(index));
        let alignment = Self::compute_horizontal_alignment(rect, self.snapshot.content_box, self.snapshot.viewport_width);
        let origin = anchor.origin(Some(alignment), self.snapshot.content_box, rect.width);
        FlowDescriptor {
            preceding_index: anchor_index.map_or(0, |index| index + 1),
            offset: Point::new(rect.x - origin.x, rect.y - origin.y),
            alignment,
        }
    }

    /// Express a flow-relative descriptor as an absolute point for a box of `size`.
    #[must_use]
    pub fn to_absolute(&self, descriptor: &FlowDescriptor, size: Size, exclude: Option<ChildId>) -> Point {
        let anchor = self.anchor_for_index(descriptor.preceding_index, exclude);
        let origin = anchor.origin(Some(descriptor.alignment), self.snapshot.content_box, size.width);
        Point::new(origin.x + descriptor.offset.x, origin.y + descriptor.offset.y)
    }
}
