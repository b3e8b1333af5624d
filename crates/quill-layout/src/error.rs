//! Layout errors.

use thiserror::Error;

use crate::model::ChildId;

/// Errors returned by collection and container operations.
///
/// Lookups of children that are no longer in the collection are expected:
/// earlier steps of the same operation may have removed them. Callers match on
/// [`LayoutError::NotFound`] rather than assuming presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The handle does not resolve to a child of this collection.
    #[error("child {0} not found in collection")]
    NotFound(ChildId),
    /// An insertion or move index past the end of the collection.
    #[error("index {index} out of range for collection of length {len}")]
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },
    /// A range that does not fit inside the collection.
    #[error("range {start}..{start}+{count} out of range for collection of length {len}")]
    InvalidRange {
        /// First index of the range.
        start: usize,
        /// Number of children in the range.
        count: usize,
        /// Collection length at the time of the call.
        len: usize,
    },
}

/// Shorthand for results of layout operations.
pub type Result<T> = std::result::Result<T, LayoutError>;
