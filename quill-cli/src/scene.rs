//! Scene files: a container configuration and its children as JSON.
//!
//! ```json
//! {
//!   "width": 400,
//!   "config": { "padding": { "top": 8, "left": 8 } },
//!   "children": [
//!     { "content": { "fill": { "height": 50 } } },
//!     { "positioning": "absolute", "offsets": { "left": 350, "right": 0, "top": 10 },
//!       "content": { "fixed": { "width": 80, "height": 20 } } }
//!   ]
//! }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use quill_layout::{ChildEntry, ChildId, Container, LayoutConfig, Size};
use serde::{Deserialize, Serialize};

/// Default width when neither the scene nor the command line gives one.
const DEFAULT_WIDTH: f64 = 800.0;

/// A serialized container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Scene {
    /// Available width; `None` lays out at the default width.
    pub width: Option<f64>,
    /// Available height; `None` is unconstrained.
    pub height: Option<f64>,
    /// Container settings.
    pub config: LayoutConfig,
    /// Children in flow order.
    pub children: Vec<ChildEntry>,
}

impl Scene {
    /// Read a scene from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).with_context(|| format!("failed to read scene '{}'", path.display()))?;
        Self::parse(&text).with_context(|| format!("failed to parse scene '{}'", path.display()))
    }

    /// Parse a scene from JSON text.
    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// The available size, with command-line overrides applied.
    pub fn available(&self, width: Option<f64>, height: Option<f64>) -> Size {
        Size::new(
            width.or(self.width).unwrap_or(DEFAULT_WIDTH),
            height.or(self.height).unwrap_or(f64::INFINITY),
        )
    }

    /// Build a container holding the scene's children, and their handles.
    pub fn build(&self) -> (Container, Vec<ChildId>) {
        let mut container = Container::new(self.config);
        let ids = self.children.iter().cloned().map(|child| container.push(child)).collect();
        (container, ids)
    }

    /// Capture a container's children back into a scene.
    pub fn from_container(container: &Container, available: Size) -> Self {
        Self {
            width: Some(available.width).filter(|width| width.is_finite()),
            height: Some(available.height).filter(|height| height.is_finite()),
            config: *container.config(),
            children: container.children().iter().map(|(_, child)| child.clone()).collect(),
        }
    }

    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
