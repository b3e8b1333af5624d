//! Positioning modes.
//!
//! A child is laid out according to one of five modes:
//!
//! 1. **Static** - ordinary block flow, subject to float/clear and margin
//!    collapsing. Offsets do not apply.
//! 2. **Relative** - laid out in flow, then shifted by its offsets. The shift
//!    has no effect on the siblings that follow.
//! 3. **Absolute** / **Fixed** - removed from flow entirely and pinned to the
//!    container's edges by its offsets, in container-relative pixels.
//! 4. **Overlapped** - looks absolute, but its offsets are relative to the flow
//!    anchor that precedes it in the collection, so the document stays
//!    reflowable and serializable.

use serde::{Deserialize, Serialize};

use crate::box_model::{offset_from_nan, offset_to_nan};

/// How a child participates in layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Positioning {
    /// Normal block flow.
    #[default]
    Static,
    /// Flow position shifted by the box offsets.
    Relative,
    /// Pinned to the container edges, out of flow.
    Absolute,
    /// Like `Absolute`; there is no scrolling model so the reference is the same.
    Fixed,
    /// Visually free-floating, logically anchored to a flow index.
    Overlapped,
}

impl Positioning {
    /// Absolute and Fixed children are skipped by the flow pass.
    #[must_use]
    pub const fn is_out_of_flow(self) -> bool {
        match self {
            Self::Absolute | Self::Fixed => true,
            Self::Static | Self::Relative | Self::Overlapped => false,
        }
    }

    /// Static and Relative children consume vertical flow space.
    #[must_use]
    pub const fn occupies_flow(self) -> bool {
        match self {
            Self::Static | Self::Relative => true,
            Self::Absolute | Self::Fixed | Self::Overlapped => false,
        }
    }

    /// Offsets of Absolute/Fixed children are container-relative pixels; for
    /// every other mode they are flow-relative.
    #[must_use]
    pub const fn uses_absolute_coordinates(self) -> bool {
        self.is_out_of_flow()
    }
}

/// Box offsets. `None` is "auto".
///
/// For Absolute/Fixed children these are distances from the container's
/// edges. For Relative children they shift the flow position. For Overlapped
/// children `left`/`top` are the offset from the flow anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxOffsets {
    /// Distance from the left reference edge.
    pub left: Option<f64>,
    /// Distance from the top reference edge.
    pub top: Option<f64>,
    /// Distance from the right reference edge.
    pub right: Option<f64>,
    /// Distance from the bottom reference edge.
    pub bottom: Option<f64>,
}

impl BoxOffsets {
    /// Offsets with only `left` and `top` set.
    #[must_use]
    pub const fn at(left: f64, top: f64) -> Self {
        Self {
            left: Some(left),
            top: Some(top),
            right: None,
            bottom: None,
        }
    }

    /// Build from persisted values where NaN means unset.
    #[must_use]
    pub fn from_persisted(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left: offset_from_nan(left),
            top: offset_from_nan(top),
            right: offset_from_nan(right),
            bottom: offset_from_nan(bottom),
        }
    }

    /// Persisted form `[left, top, right, bottom]` with NaN for unset values.
    #[must_use]
    pub fn to_persisted(&self) -> [f64; 4] {
        [
            offset_to_nan(self.left),
            offset_to_nan(self.top),
            offset_to_nan(self.right),
            offset_to_nan(self.bottom),
        ]
    }

    /// Shift applied to a Relative child's flow position.
    ///
    /// If both sides are auto the shift is zero. If one is auto it becomes the
    /// negative of the other. If both are set the position is over-constrained
    /// and `left` (resp. `top`) wins.
    #[must_use]
    pub fn relative_shift(&self) -> (f64, f64) {
        let dx = match (self.left, self.right) {
            (None, None) => 0.0,
            (Some(left), _) => left,
            (None, Some(right)) => -right,
        };
        let dy = match (self.top, self.bottom) {
            (None, None) => 0.0,
            (Some(top), _) => top,
            (None, Some(bottom)) => -bottom,
        };
        (dx, dy)
    }
}
