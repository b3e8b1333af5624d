//! Common utilities for the Quill layout engine.
//!
//! This crate provides shared infrastructure used by all Quill components:
//! - **Warning System** - colored, deduplicated terminal output for inputs the
//!   engine had to repair (clamped borders, vanished anchors)

pub mod warning;
