//! Float and clear values.
//!
//! A float is a flow participant pulled to one side, letting later floats
//! sit beside it instead of below. Floats do not consume vertical flow; the
//! first non-floated sibling terminates the current float run.

use serde::{Deserialize, Serialize};

/// Which side a Static child floats to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FloatSide {
    /// Pinned against the running left offset.
    Left,
    /// Pinned against the running right offset.
    Right,
}

/// Which earlier float runs a Static child must be placed below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClearSide {
    /// Below every left float in the current run.
    Left,
    /// Below every right float in the current run.
    Right,
    /// Below every float in the current run.
    Both,
}

impl ClearSide {
    /// True if this value clears floats on `side`.
    #[must_use]
    pub const fn clears(self, side: FloatSide) -> bool {
        matches!(
            (self, side),
            (Self::Both, _) | (Self::Left, FloatSide::Left) | (Self::Right, FloatSide::Right)
        )
    }
}
