//! Per-edge border specifications.
//!
//! Each of the four edges carries its own style, color, width and one corner
//! radius. The radius belongs to the edge's *leading* corner when walking the
//! rectangle clockwise from the top-left:
//!
//! ```text
//!   top.radius ──► ╭──────── top ────────╮ ◄── right.radius
//!                  │                      │
//!                 left                  right
//!                  │                      │
//!  left.radius ──► ╰─────── bottom ──────╯ ◄── bottom.radius
//! ```
//!
//! So an edge's two adjacent radii are its own and the clockwise-next edge's.

use quill_common::warning::warn_once;
use serde::{Deserialize, Serialize};

use super::color::ColorValue;

/// How an edge is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BorderStyle {
    /// The edge is not drawn but still shapes the closed contour.
    #[default]
    None,
    /// A continuous line.
    Solid,
    /// Dashes three widths long separated by one width.
    Dashed,
    /// Square dots one width long.
    Dotted,
    /// Alternating dash and dot.
    DashDot,
    /// A dash followed by two dots.
    DashDotDot,
}

impl BorderStyle {
    /// Dash pattern in multiples of the stroke width, `None` for continuous strokes.
    #[must_use]
    pub const fn dash_pattern(self) -> Option<&'static [f64]> {
        match self {
            Self::None | Self::Solid => None,
            Self::Dashed => Some(&[3.0, 1.0]),
            Self::Dotted => Some(&[1.0, 1.0]),
            Self::DashDot => Some(&[3.0, 1.0, 1.0, 1.0]),
            Self::DashDotDot => Some(&[3.0, 1.0, 1.0, 1.0, 1.0, 1.0]),
        }
    }
}

/// One of the four sides of a rectangle, in clockwise order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Top side.
    Top,
    /// Right side.
    Right,
    /// Bottom side.
    Bottom,
    /// Left side.
    Left,
}

impl Edge {
    /// All edges in clockwise order starting at the top.
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// The edge drawn after this one when walking clockwise.
    #[must_use]
    pub const fn clockwise_next(self) -> Self {
        match self {
            Self::Top => Self::Right,
            Self::Right => Self::Bottom,
            Self::Bottom => Self::Left,
            Self::Left => Self::Top,
        }
    }

    /// Bottom and right edges sit on the far side of the rectangle.
    #[must_use]
    pub const fn is_trailing(self) -> bool {
        matches!(self, Self::Right | Self::Bottom)
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// A single border edge.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderEdge {
    /// Stroke style.
    pub style: BorderStyle,
    /// Stroke color.
    pub color: ColorValue,
    /// Stroke width in pixels.
    pub width: f64,
    /// Radius of the edge's leading corner (see the module docs).
    pub radius: f64,
}

impl BorderEdge {
    /// A solid edge with square corners.
    #[must_use]
    pub const fn solid(width: f64, color: ColorValue) -> Self {
        Self {
            style: BorderStyle::Solid,
            color,
            width,
            radius: 0.0,
        }
    }

    /// Same edge with a different leading-corner radius.
    #[must_use]
    pub const fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// True if this edge produces visible ink.
    #[must_use]
    pub fn is_stroked(&self) -> bool {
        self.style != BorderStyle::None && self.width > 0.0
    }
}

/// The four edges of a child's border.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BorderSpec {
    /// Top edge; its radius is the top-left corner.
    pub top: BorderEdge,
    /// Right edge; its radius is the top-right corner.
    pub right: BorderEdge,
    /// Bottom edge; its radius is the bottom-right corner.
    pub bottom: BorderEdge,
    /// Left edge; its radius is the bottom-left corner.
    pub left: BorderEdge,
}

impl BorderSpec {
    /// The same edge on all four sides.
    #[must_use]
    pub const fn uniform(edge: BorderEdge) -> Self {
        Self {
            top: edge,
            right: edge,
            bottom: edge,
            left: edge,
        }
    }

    /// Borrow one edge.
    #[must_use]
    pub const fn edge(&self, edge: Edge) -> &BorderEdge {
        match edge {
            Edge::Top => &self.top,
            Edge::Right => &self.right,
            Edge::Bottom => &self.bottom,
            Edge::Left => &self.left,
        }
    }

    /// Mutably borrow one edge.
    pub const fn edge_mut(&mut self, edge: Edge) -> &mut BorderEdge {
        match edge {
            Edge::Top => &mut self.top,
            Edge::Right => &mut self.right,
            Edge::Bottom => &mut self.bottom,
            Edge::Left => &mut self.left,
        }
    }

    /// Edges in clockwise order starting at the top.
    #[must_use]
    pub const fn edges(&self) -> [BorderEdge; 4] {
        [self.top, self.right, self.bottom, self.left]
    }

    /// True if no edge is stroked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.edges().iter().any(BorderEdge::is_stroked)
    }

    /// Clamp negative or non-finite widths and radii to zero.
    ///
    /// Malformed specs are repaired, never rejected; each repair is reported
    /// once through the warning system.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        for edge in Edge::ALL {
            let side = self.edge_mut(edge);
            if !(side.width >= 0.0 && side.width.is_finite()) {
                warn_once(
                    "Border",
                    &format!("{} width {} clamped to 0", edge.name(), side.width),
                );
                side.width = 0.0;
            }
            if !(side.radius >= 0.0 && side.radius.is_finite()) {
                warn_once(
                    "Border",
                    &format!("{} radius {} clamped to 0", edge.name(), side.radius),
                );
                side.radius = 0.0;
            }
        }
        self
    }
}
