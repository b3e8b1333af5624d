//! Software rendering for Quill display lists.
//!
//! ```text
//! Container → Layout → Paint → Render
//!                        ↓        ↓
//!                  DisplayList → Pixels
//! ```
//!
//! The renderer knows nothing about positioning or flow. It executes the
//! drawing commands of a [`quill_layout::DisplayList`] with tiny-skia and
//! saves the result as an image.

/// The tiny-skia backed renderer.
pub mod renderer;

pub use renderer::Renderer;
