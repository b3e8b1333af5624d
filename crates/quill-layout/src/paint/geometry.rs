//! Border geometry.
//!
//! A border is one closed contour around the child's rectangle: four straight
//! segments, one per edge, joined by quarter-circle arcs where a corner is
//! rounded. Every segment knows whether it is inked, so an edge with style
//! `None` still shapes the contour that clips the background.
//!
//! ```text
//!   start ●──── top ────► ╮ arc (right's ink)
//!         ╭               │
//!   arc   │             right
//!  (top's │               │
//!   ink) left             ╯ arc (bottom's ink)
//!         ╰ ◄── bottom ───
//!     arc (left's ink)
//! ```
//!
//! Lines run along the center of each edge's stroke. With pixel snapping on,
//! a line of odd width sits on a half pixel and a line of even width on a
//! whole pixel, so strokes stay crisp; trailing (right/bottom) lines are
//! biased inward so thin borders are not clipped at the container edge.

use crate::box_model::{Point, Rect};
use crate::style::{BorderEdge, BorderSpec, BorderStyle, ColorValue, Edge};

/// How one edge is stroked.
#[derive(Debug, Clone, PartialEq)]
pub struct Pen {
    /// Stroke color.
    pub color: ColorValue,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash lengths in pixels, alternating on/off; `None` for a solid line.
    pub dash: Option<Vec<f64>>,
}

impl Pen {
    /// The pen for one edge.
    #[must_use]
    pub fn for_edge(edge: &BorderEdge) -> Self {
        let dash = edge
            .style
            .dash_pattern()
            .filter(|_| edge.width > 0.0)
            .map(|pattern| pattern.iter().map(|step| step * edge.width).collect());
        Self {
            color: edge.color,
            width: edge.width,
            dash,
        }
    }
}

/// One piece of a [`ClosedPath`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    /// A straight line from the current point to `to`.
    Line {
        /// End point.
        to: Point,
        /// Edge the line belongs to; selects the pen.
        edge: Edge,
        /// Whether the line is inked.
        stroked: bool,
    },
    /// A quarter circle from the current point to `to`, tangent to both
    /// lines meeting at `corner`.
    Arc {
        /// The square corner the arc rounds off.
        corner: Point,
        /// End point.
        to: Point,
        /// Arc radius.
        radius: f64,
        /// Edge whose pen inks the arc: the clockwise-next edge.
        edge: Edge,
        /// Whether the arc is inked.
        stroked: bool,
    },
}

impl PathSegment {
    /// End point of the segment.
    #[must_use]
    pub const fn end(&self) -> Point {
        match *self {
            Self::Line { to, .. } | Self::Arc { to, .. } => to,
        }
    }

    /// Edge whose pen strokes the segment.
    #[must_use]
    pub const fn edge(&self) -> Edge {
        match *self {
            Self::Line { edge, .. } | Self::Arc { edge, .. } => edge,
        }
    }

    /// Whether the segment is inked.
    #[must_use]
    pub const fn is_stroked(&self) -> bool {
        match *self {
            Self::Line { stroked, .. } | Self::Arc { stroked, .. } => stroked,
        }
    }
}

/// A closed contour: a start point and the segments walking clockwise back to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClosedPath {
    /// Where the contour starts: the start of the top line.
    pub start: Point,
    /// Segments in clockwise order.
    pub segments: Vec<PathSegment>,
}

impl ClosedPath {
    /// A rectangle as four inked lines, clockwise from the top-left.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let line = |x, y, edge| PathSegment::Line {
            to: Point::new(x, y),
            edge,
            stroked: true,
        };
        Self {
            start: rect.origin(),
            segments: vec![
                line(rect.right(), rect.y, Edge::Top),
                line(rect.right(), rect.bottom(), Edge::Right),
                line(rect.x, rect.bottom(), Edge::Bottom),
                line(rect.x, rect.y, Edge::Left),
            ],
        }
    }

    /// The start point followed by every segment's end point.
    #[must_use]
    pub fn corner_points(&self) -> Vec<Point> {
        std::iter::once(self.start)
            .chain(self.segments.iter().map(PathSegment::end))
            .collect()
    }

    /// True if every segment is inked.
    #[must_use]
    pub fn is_fully_stroked(&self) -> bool {
        self.segments.iter().all(PathSegment::is_stroked)
    }
}

/// The geometry that draws one border.
#[derive(Debug, Clone, PartialEq)]
pub enum BorderGeometry {
    /// Uniform solid border with square corners: a single stroked rectangle.
    Rectangle {
        /// The rectangle traced by the stroke center.
        rect: Rect,
        /// The shared pen.
        pen: Pen,
    },
    /// Anything else: a closed path with one pen per edge.
    Path {
        /// The contour.
        path: ClosedPath,
        /// Pens in `Edge::ALL` order.
        pens: [Pen; 4],
    },
}

impl BorderGeometry {
    /// The contour that clips the background.
    #[must_use]
    pub fn outline(&self) -> ClosedPath {
        match self {
            Self::Rectangle { rect, .. } => ClosedPath::from_rect(*rect),
            Self::Path { path, .. } => path.clone(),
        }
    }
}

/// Pens for the four edges in `Edge::ALL` order.
#[must_use]
pub fn build_border_pens(spec: &BorderSpec) -> [Pen; 4] {
    spec.edges().map(|edge| Pen::for_edge(&edge))
}

/// Build the geometry for a border around `rect`.
///
/// Takes the rectangle fast path when all four edges are solid with one color
/// and width and no corner is rounded; any radius forces the general path.
#[must_use]
pub fn build_border_geometry(rect: Rect, spec: &BorderSpec, snap: bool) -> BorderGeometry {
    let spec = spec.sanitized();
    if is_uniform_solid(&spec) {
        let path = build_border_path(rect, &spec, snap);
        let points = path.corner_points();
        let rect = Rect::new(
            points[0].x,
            points[0].y,
            points[1].x - points[0].x,
            points[2].y - points[1].y,
        );
        return BorderGeometry::Rectangle {
            rect,
            pen: Pen::for_edge(&spec.top),
        };
    }
    BorderGeometry::Path {
        path: build_border_path(rect, &spec, snap),
        pens: build_border_pens(&spec),
    }
}

fn is_uniform_solid(spec: &BorderSpec) -> bool {
    let top = spec.top;
    top.width > 0.0
        && spec.edges().iter().all(|edge| {
            edge.style == BorderStyle::Solid
                && edge.color == top.color
                && (edge.width - top.width).abs() < f64::EPSILON
                && edge.radius <= 0.0
        })
}

/// The general closed-path construction, with arcs wherever a radius is set.
///
/// Never fails: degenerate rectangles and oversized radii produce a valid,
/// possibly zero-area, contour.
#[must_use]
pub fn build_border_path(rect: Rect, spec: &BorderSpec, snap: bool) -> ClosedPath {
    let spec = spec.sanitized();
    let align = |value: f64, edge: Edge| {
        let width = spec.edge(edge).width;
        if snap { align_to_pixel(value, width, edge.is_trailing()) } else { value }
    };

    // Stroke center lines of each edge.
    let top = align(rect.y + spec.top.width / 2.0, Edge::Top);
    let right = align(rect.right() - spec.right.width / 2.0, Edge::Right);
    let bottom = align(rect.bottom() - spec.bottom.width / 2.0, Edge::Bottom);
    let left = align(rect.x + spec.left.width / 2.0, Edge::Left);
    // A rectangle thinner than its borders collapses onto its center line.
    let (left, right) = if right < left { (left.midpoint(right), left.midpoint(right)) } else { (left, right) };
    let (top, bottom) = if bottom < top { (top.midpoint(bottom), top.midpoint(bottom)) } else { (top, bottom) };

    let [tl, tr, br, bl] = scaled_radii(&spec, right - left, bottom - top);

    let stroked = |edge: Edge| spec.edge(edge).is_stroked();
    let mut segments = Vec::with_capacity(8);
    let corner = |segments: &mut Vec<PathSegment>, radius: f64, at: Point, to: Point, edge: Edge| {
        if radius > 0.0 {
            // The arc belongs to the edge drawn out of it.
            let edge = edge.clockwise_next();
            segments.push(PathSegment::Arc {
                corner: at,
                to,
                radius,
                edge,
                stroked: stroked(edge),
            });
        }
    };

    let start = Point::new(left + tl, top);
    segments.push(PathSegment::Line {
        to: Point::new(right - tr, top),
        edge: Edge::Top,
        stroked: stroked(Edge::Top),
    });
    corner(&mut segments, tr, Point::new(right, top), Point::new(right, top + tr), Edge::Top);
    segments.push(PathSegment::Line {
        to: Point::new(right, bottom - br),
        edge: Edge::Right,
        stroked: stroked(Edge::Right),
    });
    corner(&mut segments, br, Point::new(right, bottom), Point::new(right - br, bottom), Edge::Right);
    segments.push(PathSegment::Line {
        to: Point::new(left + bl, bottom),
        edge: Edge::Bottom,
        stroked: stroked(Edge::Bottom),
    });
    corner(&mut segments, bl, Point::new(left, bottom), Point::new(left, bottom - bl), Edge::Bottom);
    segments.push(PathSegment::Line {
        to: Point::new(left, top + tl),
        edge: Edge::Left,
        stroked: stroked(Edge::Left),
    });
    corner(&mut segments, tl, Point::new(left, top), start, Edge::Left);

    ClosedPath { start, segments }
}

/// Corner radii (top-left, top-right, bottom-right, bottom-left), scaled down
/// uniformly when adjacent radii would overlap along a side.
fn scaled_radii(spec: &BorderSpec, width: f64, height: f64) -> [f64; 4] {
    let radii = [spec.top.radius, spec.right.radius, spec.bottom.radius, spec.left.radius];
    let [tl, tr, br, bl] = radii;
    let sides = [(tl + tr, width), (tr + br, height), (br + bl, width), (bl + tl, height)];
    let scale = sides
        .iter()
        .filter(|(sum, _)| *sum > 0.0)
        .map(|(sum, length)| length.max(0.0) / sum)
        .fold(1.0_f64, f64::min);
    radii.map(|radius| radius * scale)
}

/// Snap a stroke center line to the pixel grid.
///
/// Odd widths sit on half pixels, even widths on whole pixels. Leading lines
/// round toward the top-left, trailing lines toward the bottom-right half
/// pixel, which keeps a 1px stroke inside the box on every side.
fn align_to_pixel(value: f64, width: f64, trailing: bool) -> f64 {
    if !value.is_finite() || width <= 0.0 {
        return value;
    }
    let odd = width.round().rem_euclid(2.0) >= 1.0;
    match (odd, trailing) {
        (true, false) => value.floor() + 0.5,
        (true, true) => value.ceil() - 0.5,
        (false, _) => value.round(),
    }
}
