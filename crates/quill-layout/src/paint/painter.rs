//! Painter - generates a display list from a laid-out container.
//!
//! Children are painted in paint order: flow children first, in collection
//! order, then Overlapped, Absolute and Fixed children on top. For each
//! child the background is painted before the border.

use crate::box_model::Rect;
use crate::container::Container;
use crate::model::ChildEntry;

use super::geometry::{BorderGeometry, build_border_geometry};
use super::{DisplayCommand, DisplayList};

/// Walks a container's committed layout and emits drawing commands.
pub struct Painter<'a> {
    container: &'a Container,
}

impl<'a> Painter<'a> {
    /// Create a painter over `container`'s last committed layout.
    #[must_use]
    pub const fn new(container: &'a Container) -> Self {
        Self { container }
    }

    /// Paint every visible, laid-out child and return the display list.
    #[must_use]
    pub fn paint(&self) -> DisplayList {
        let mut display_list = DisplayList::new();
        for id in self.container.paint_order() {
            let (Some(child), Some(rect)) = (
                self.container.children().get(id),
                self.container.snapshot().rect_of(id),
            ) else {
                continue;
            };
            self.paint_child(child, rect, &mut display_list);
        }
        display_list
    }

    fn paint_child(&self, child: &ChildEntry, rect: Rect, display_list: &mut DisplayList) {
        let geometry = build_border_geometry(rect, &child.border, self.container.config().pixel_snapping);

        if let Some(color) = child.background.filter(|color| !color.is_transparent()) {
            match &geometry {
                BorderGeometry::Rectangle { rect, .. } => display_list.push(DisplayCommand::FillRect { rect: *rect, color }),
                BorderGeometry::Path { path, .. } => display_list.push(DisplayCommand::FillPath {
                    path: path.clone(),
                    color,
                }),
            }
        }

        if child.border.is_empty() {
            return;
        }
        match geometry {
            BorderGeometry::Rectangle { rect, pen } => display_list.push(DisplayCommand::StrokeRect { rect, pen }),
            BorderGeometry::Path { path, pens } => display_list.push(DisplayCommand::StrokePath { path, pens }),
        }
    }
}
