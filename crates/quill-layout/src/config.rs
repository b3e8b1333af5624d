//! Container configuration.

use serde::{Deserialize, Serialize};

use crate::box_model::EdgeSizes;

/// What happens to a child's coordinates when it returns to Static mode.
///
/// Leaving Absolute/Overlapped for Static drops the child back into flow at
/// its collection index, so it visually jumps to its flow slot. Whether the
/// old horizontal offset should survive as a left margin is a product
/// decision, so it is configurable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StaticTransition {
    /// No coordinate rewrite; the child takes its flow slot.
    #[default]
    KeepFlow,
    /// Keep the horizontal position by turning the flow-relative left offset
    /// into the child's left margin.
    ApplyLeftMargin,
}

/// Per-container layout settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Inner padding between the container edge and flow content.
    pub padding: EdgeSizes,
    /// Lower bound on the container's content width.
    pub min_width: f64,
    /// Lower bound on the container's content height.
    pub min_height: f64,
    /// Height of each blank line synthesized when a child is lifted out of flow.
    pub placeholder_line_height: f64,
    /// Coordinate handling on transitions into Static.
    pub static_transition: StaticTransition,
    /// Align border strokes to the pixel grid.
    pub pixel_snapping: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: EdgeSizes::default(),
            min_width: 0.0,
            min_height: 0.0,
            placeholder_line_height: 16.0,
            static_transition: StaticTransition::KeepFlow,
            pixel_snapping: true,
        }
    }
}
