//! Decoration values: colors and per-edge border specifications.

mod border;
mod color;

pub use border::{BorderEdge, BorderSpec, BorderStyle, Edge};
pub use color::ColorValue;
