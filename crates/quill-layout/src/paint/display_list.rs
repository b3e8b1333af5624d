//! Display list: drawing commands in painting order.

use crate::box_model::Rect;
use crate::style::ColorValue;

use super::geometry::{ClosedPath, Pen};

/// A single drawing command.
///
/// Commands are added to the display list in painting order (back to front).
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCommand {
    /// Fill a rectangle with a solid color.
    FillRect {
        /// The rectangle.
        rect: Rect,
        /// Fill color.
        color: ColorValue,
    },
    /// Fill the inside of a closed contour.
    ///
    /// Used for backgrounds behind rounded or partial borders so the corners
    /// clip the fill the same way they shape the border.
    FillPath {
        /// The contour.
        path: ClosedPath,
        /// Fill color.
        color: ColorValue,
    },
    /// Stroke a rectangle with one pen. The border fast path.
    StrokeRect {
        /// The rectangle traced by the stroke center.
        rect: Rect,
        /// The pen.
        pen: Pen,
    },
    /// Stroke the inked segments of a closed contour, each with its edge's pen.
    StrokePath {
        /// The contour.
        path: ClosedPath,
        /// Pens in `Edge::ALL` order.
        pens: [Pen; 4],
    },
}

/// A list of drawing commands in painting order.
///
/// Commands are stored back to front, so a renderer can simply iterate and
/// execute each one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayList {
    commands: Vec<DisplayCommand>,
}

impl DisplayList {
    /// Create an empty display list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Add a command to the display list.
    pub fn push(&mut self, command: DisplayCommand) {
        self.commands.push(command);
    }

    /// Get the commands in painting order.
    #[must_use]
    pub fn commands(&self) -> &[DisplayCommand] {
        &self.commands
    }

    /// Get the number of commands.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.commands.len()
    }

    /// Check if the display list is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
