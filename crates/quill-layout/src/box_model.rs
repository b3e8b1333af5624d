//! Box model primitives.
//!
//! Every rectangle the engine reports is expressed in container-relative
//! pixels: `(0, 0)` is the container's top-left corner, padding included.
//!
//! ```text
//! ┌──────────────────────── container ────────────────────────┐
//! │ padding.top                                               │
//! │   ┌──────────────── content origin ───────────────────┐   │
//! │   │ flow children start here                          │   │
//! │   └───────────────────────────────────────────────────┘   │
//! │ padding.bottom                                            │
//! └───────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

/// A point in container-relative pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Horizontal extent.
    pub width: f64,
    /// Vertical extent.
    pub height: f64,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// The zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

/// A rectangle positioned in 2D space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f64,
    /// Vertical position of the top-left corner.
    pub y: f64,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build a rectangle from an origin and a size.
    #[must_use]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// The top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The rectangle's size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (`x + width`).
    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    #[must_use]
    pub fn center_x(&self) -> f64 {
        self.width.mul_add(0.5, self.x)
    }

    /// Half-open containment test: the right and bottom edges are outside.
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Edge sizes for padding or margin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSizes {
    /// Top edge size.
    pub top: f64,
    /// Right edge size.
    pub right: f64,
    /// Bottom edge size.
    pub bottom: f64,
    /// Left edge size.
    pub left: f64,
}

impl EdgeSizes {
    /// The same size on all four edges.
    #[must_use]
    pub const fn uniform(size: f64) -> Self {
        Self {
            top: size,
            right: size,
            bottom: size,
            left: size,
        }
    }

    /// `left + right`
    #[must_use]
    pub fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// `top + bottom`
    #[must_use]
    pub fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Convert a persisted coordinate (NaN = unset/auto) into its in-memory form.
#[must_use]
pub fn offset_from_nan(value: f64) -> Option<f64> {
    if value.is_nan() { None } else { Some(value) }
}

/// Convert an in-memory coordinate into its persisted form (NaN = unset/auto).
#[must_use]
pub fn offset_to_nan(value: Option<f64>) -> f64 {
    value.unwrap_or(f64::NAN)
}
