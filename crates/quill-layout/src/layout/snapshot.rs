//! Layout pass output.

use std::collections::HashMap;

use serde::Serialize;

use crate::box_model::{Rect, Size};
use crate::model::ChildId;

/// The resolved geometry of one child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChildLayout {
    /// The child.
    pub id: ChildId,
    /// Collection index at the time of the pass.
    pub index: usize,
    /// Final border-box rectangle, container-relative.
    pub rect: Rect,
    /// The flow slot before any offset was applied. Equal to `rect` for
    /// Static, Absolute and Fixed children.
    pub flow_rect: Rect,
}

/// Everything a layout pass resolved.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LayoutSnapshot {
    /// Laid-out children in collection order. Collapsed children are absent.
    pub children: Vec<ChildLayout>,
    /// Size the container asked for: max of flow extent, out-of-flow extent
    /// and configured minimums, plus padding.
    pub desired_size: Size,
    /// Size the container was given.
    pub actual_size: Size,
    /// Width that decides whether content is clipped: the available width when
    /// it was finite, otherwise the actual width.
    pub viewport_width: f64,
    /// Padding-adjusted box the flow was laid out in.
    pub content_box: Rect,
    #[serde(skip)]
    lookup: HashMap<ChildId, usize>,
}

impl LayoutSnapshot {
    pub(crate) fn new(
        children: Vec<ChildLayout>,
        desired_size: Size,
        viewport_width: f64,
        content_box: Rect,
    ) -> Self {
        let lookup = children
            .iter()
            .enumerate()
            .map(|(position, child)| (child.id, position))
            .collect();
        Self {
            children,
            desired_size,
            actual_size: desired_size,
            viewport_width,
            content_box,
            lookup,
        }
    }

    /// Geometry of one child, if it was laid out.
    #[must_use]
    pub fn get(&self, id: ChildId) -> Option<&ChildLayout> {
        self.lookup.get(&id).map(|&position| &self.children[position])
    }

    /// Final rectangle of one child, if it was laid out.
    #[must_use]
    pub fn rect_of(&self, id: ChildId) -> Option<Rect> {
        self.get(id).map(|child| child.rect)
    }
}
