//! Child entries.
//!
//! The container exclusively owns its children. Positioning metadata lives in
//! the entry itself and the entry lives in an arena slot, so collaborators hold
//! a [`ChildId`] handle rather than a reference: there is no ownership edge
//! from a child back to its container.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::box_model::{EdgeSizes, Size};
use crate::style::{BorderSpec, ColorValue};

use super::float::{ClearSide, FloatSide};
use super::positioned::{BoxOffsets, Positioning};

/// A stable handle to a child in a [`ChildCollection`](crate::ChildCollection).
///
/// Handles survive reordering. Once a child is removed its handle never
/// resolves again, even if the arena slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ChildId {
    /// Arena slot.
    pub slot: u32,
    /// Bumped every time the slot is reused.
    pub generation: u32,
}

impl fmt::Display for ChildId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.slot, self.generation)
    }
}

/// Whether a child takes part in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Visibility {
    /// Laid out and painted.
    #[default]
    Visible,
    /// Skipped by flow and painting, but still addressable in the collection.
    Collapsed,
}

/// Explicit horizontal alignment within the available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalAlignment {
    /// Against the left edge.
    Left,
    /// Centered.
    Center,
    /// Against the right edge.
    Right,
}

/// What the external content layer reports for a child.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChildContent {
    /// Content with a fixed intrinsic size (an image, a shape).
    Fixed(Size),
    /// Content that takes the full available width at a known height
    /// (a paragraph already shaped by the text layer).
    Fill {
        /// Height of the shaped content.
        height: f64,
    },
    /// A blank line inserted to backfill a flow gap.
    Placeholder {
        /// Height of one blank line.
        line_height: f64,
    },
}

impl Default for ChildContent {
    fn default() -> Self {
        Self::Fixed(Size::ZERO)
    }
}

/// One managed element and its positioning metadata.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChildEntry {
    /// Layout treatment.
    pub positioning: Positioning,
    /// Offsets; interpretation depends on `positioning`.
    pub offsets: BoxOffsets,
    /// Float direction. Meaningful only for Static children.
    pub float: Option<FloatSide>,
    /// Clearance. Meaningful only for Static children.
    pub clear: Option<ClearSide>,
    /// Outer margin. Vertical margins collapse between flow siblings.
    pub margin: EdgeSizes,
    /// Explicit width; `None` sizes to content.
    pub width: Option<f64>,
    /// Explicit height; `None` sizes to content.
    pub height: Option<f64>,
    /// Lower bound on the resolved width.
    pub min_width: f64,
    /// Lower bound on the resolved height.
    pub min_height: f64,
    /// Collapsed children are skipped by layout.
    pub visibility: Visibility,
    /// Explicit horizontal alignment; overrides the float direction.
    pub alignment: Option<HorizontalAlignment>,
    /// Border decoration.
    pub border: BorderSpec,
    /// Background fill, clipped to the border contour.
    pub background: Option<ColorValue>,
    /// Content reported by the content layer.
    pub content: ChildContent,
}

impl ChildEntry {
    /// A Static child of fixed intrinsic size.
    #[must_use]
    pub fn fixed(width: f64, height: f64) -> Self {
        Self {
            content: ChildContent::Fixed(Size::new(width, height)),
            ..Self::default()
        }
    }

    /// A Static child that fills the available width.
    #[must_use]
    pub fn block(height: f64) -> Self {
        Self {
            content: ChildContent::Fill { height },
            ..Self::default()
        }
    }

    /// A blank placeholder line.
    #[must_use]
    pub fn placeholder(line_height: f64) -> Self {
        Self {
            content: ChildContent::Placeholder { line_height },
            ..Self::default()
        }
    }

    /// Builder: set the positioning mode.
    #[must_use]
    pub const fn with_positioning(mut self, positioning: Positioning) -> Self {
        self.positioning = positioning;
        self
    }

    /// Builder: set the offsets.
    #[must_use]
    pub const fn with_offsets(mut self, offsets: BoxOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// Builder: set the margin.
    #[must_use]
    pub const fn with_margin(mut self, margin: EdgeSizes) -> Self {
        self.margin = margin;
        self
    }

    /// Builder: float to a side.
    #[must_use]
    pub const fn with_float(mut self, side: FloatSide) -> Self {
        self.float = Some(side);
        self
    }

    /// Builder: clear earlier floats.
    #[must_use]
    pub const fn with_clear(mut self, side: ClearSide) -> Self {
        self.clear = Some(side);
        self
    }

    /// Builder: set the border.
    #[must_use]
    pub const fn with_border(mut self, border: BorderSpec) -> Self {
        self.border = border;
        self
    }

    /// True unless collapsed.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    /// The effective float: floats only apply to Static children.
    #[must_use]
    pub fn effective_float(&self) -> Option<FloatSide> {
        match self.positioning {
            Positioning::Static => self.float,
            Positioning::Relative
            | Positioning::Absolute
            | Positioning::Fixed
            | Positioning::Overlapped => None,
        }
    }

    /// The effective clearance: clear only applies to Static children.
    #[must_use]
    pub fn effective_clear(&self) -> Option<ClearSide> {
        match self.positioning {
            Positioning::Static => self.clear,
            Positioning::Relative
            | Positioning::Absolute
            | Positioning::Fixed
            | Positioning::Overlapped => None,
        }
    }

    /// A visible, non-floated Static/Relative child: something later
    /// overlapped children and coordinate transforms can anchor to.
    #[must_use]
    pub fn is_flow_anchor(&self) -> bool {
        self.is_visible() && self.positioning.occupies_flow() && self.effective_float().is_none()
    }
}

/// Measures a child's desired size.
///
/// Text shaping and line breaking happen outside the engine; the text layer
/// plugs in by implementing this trait.
pub trait ContentMeasure {
    /// Desired border-box size of `child` given the available space.
    fn measure(&self, child: &ChildEntry, available: Size) -> Size;
}

/// Measurement straight from [`ChildContent`].
#[derive(Debug, Clone, Copy, Default)]
pub struct IntrinsicMeasure;

impl ContentMeasure for IntrinsicMeasure {
    fn measure(&self, child: &ChildEntry, available: Size) -> Size {
        match child.content {
            ChildContent::Fixed(size) => size,
            ChildContent::Fill { height } => Size::new(available.width, height),
            ChildContent::Placeholder { line_height } => Size::new(available.width, line_height),
        }
    }
}
