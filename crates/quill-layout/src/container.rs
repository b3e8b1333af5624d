//! The container: the engine's public face.
//!
//! ```text
//! collaborator ──insert/remove/move──► ChildCollection
//!      │                                    │
//!      └──set_positioning──► state machine ─┤── CoordinateMapper
//!                                           ▼
//!                       layout() ──► FlowLayout ──► LayoutSnapshot ──► listeners
//! ```
//!
//! Every mutation marks the layout dirty. `layout` runs to completion and
//! commits its snapshot in one step; nested passes requested by the
//! positioning state machine commit the same way, so an interrupted outer
//! pass never observes half-written geometry.

use std::fmt;
use std::mem;

use crate::box_model::{Point, Rect, Size};
use crate::collection::ChildCollection;
use crate::config::LayoutConfig;
use crate::error::Result;
use crate::layout::{FlowLayout, LayoutSnapshot};
use crate::mapper::CoordinateMapper;
use crate::model::{BoxOffsets, ChildEntry, ChildId, ContentMeasure, IntrinsicMeasure, Positioning};
use crate::style::BorderSpec;

/// Which history operation is being replayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryReplay {
    /// An undo is in progress.
    Undo,
    /// A redo is in progress.
    Redo,
}

/// Sent to listeners after every committed layout pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEvent {
    /// Number of passes committed so far, this one included.
    pub pass: u64,
    /// Nesting depth of the pass; 1 for a top-level pass.
    pub depth: usize,
    /// Size the container asked for.
    pub desired_size: Size,
    /// Size the container was given.
    pub actual_size: Size,
}

type Listener = Box<dyn FnMut(&LayoutEvent)>;

/// A container that owns an ordered set of children and lays them out.
pub struct Container {
    pub(crate) children: ChildCollection,
    pub(crate) config: LayoutConfig,
    pub(crate) measure: Box<dyn ContentMeasure>,
    pub(crate) snapshot: LayoutSnapshot,
    available: Size,
    dirty: bool,
    history: Option<HistoryReplay>,
    layout_depth: usize,
    passes: u64,
    listeners: Vec<Listener>,
}

impl fmt::Debug for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Container")
            .field("children", &self.children.len())
            .field("config", &self.config)
            .field("available", &self.available)
            .field("dirty", &self.dirty)
            .field("history", &self.history)
            .field("passes", &self.passes)
            .finish_non_exhaustive()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new(LayoutConfig::default())
    }
}

impl Container {
    /// An empty container measuring content intrinsically.
    #[must_use]
    pub fn new(config: LayoutConfig) -> Self {
        Self::with_measure(config, Box::new(IntrinsicMeasure))
    }

    /// An empty container with a custom content measurer (the text layer).
    #[must_use]
    pub fn with_measure(config: LayoutConfig, measure: Box<dyn ContentMeasure>) -> Self {
        Self {
            children: ChildCollection::new(),
            config,
            measure,
            snapshot: LayoutSnapshot::default(),
            available: Size::new(f64::INFINITY, f64::INFINITY),
            dirty: true,
            history: None,
            layout_depth: 0,
            passes: 0,
            listeners: Vec::new(),
        }
    }

    /// The children in order.
    #[must_use]
    pub const fn children(&self) -> &ChildCollection {
        &self.children
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: LayoutConfig) {
        self.config = config;
        self.invalidate();
    }

    /// The last committed layout.
    #[must_use]
    pub const fn snapshot(&self) -> &LayoutSnapshot {
        &self.snapshot
    }

    /// True if something changed since the last committed layout.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the layout stale.
    pub const fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Number of committed layout passes.
    #[must_use]
    pub const fn pass_count(&self) -> u64 {
        self.passes
    }

    // ------------------------------------------------------------------
    // Collection operations
    // ------------------------------------------------------------------

    /// Insert a child at `index`. Its border spec is sanitized.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index > len`.
    pub fn insert(&mut self, index: usize, mut entry: ChildEntry) -> Result<ChildId> {
        entry.border = entry.border.sanitized();
        let id = self.children.insert(index, entry)?;
        self.invalidate();
        Ok(id)
    }

    /// Append a child. Its border spec is sanitized.
    pub fn push(&mut self, mut entry: ChildEntry) -> ChildId {
        entry.border = entry.border.sanitized();
        let id = self.children.push(entry);
        self.invalidate();
        id
    }

    /// Remove a child. The handle is dead afterwards.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the child is not in this container.
    pub fn remove(&mut self, id: ChildId) -> Result<ChildEntry> {
        let entry = self.children.remove(id)?;
        self.invalidate();
        Ok(entry)
    }

    /// Move a child so it ends up at `new_index`.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` or `IndexOutOfRange`.
    pub fn move_child(&mut self, id: ChildId, new_index: usize) -> Result<()> {
        self.children.move_child(id, new_index)?;
        self.invalidate();
        Ok(())
    }

    /// Move a run of children; see [`ChildCollection::move_range`].
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` or `IndexOutOfRange`.
    pub fn move_range(&mut self, start: usize, count: usize, new_index: usize) -> Result<()> {
        self.children.move_range(start, count, new_index)?;
        self.invalidate();
        Ok(())
    }

    /// Edit a child's metadata in place.
    ///
    /// Positioning changes made here bypass the state machine; use
    /// [`set_positioning`](Self::set_positioning) to keep the visual position.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the child is not in this container.
    pub fn update<F>(&mut self, id: ChildId, edit: F) -> Result<()>
    where
        F: FnOnce(&mut ChildEntry),
    {
        let entry = self.children.entry_mut(id)?;
        edit(entry);
        entry.border = entry.border.sanitized();
        self.invalidate();
        Ok(())
    }

    /// Replace a child's border. Negative widths and radii are clamped to 0.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the child is not in this container.
    pub fn set_border(&mut self, id: ChildId, border: BorderSpec) -> Result<()> {
        self.update(id, |entry| entry.border = border)
    }

    /// Replace a child's offsets, interpreted according to its current mode.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the child is not in this container.
    pub fn set_offsets(&mut self, id: ChildId, offsets: BoxOffsets) -> Result<()> {
        self.update(id, |entry| entry.offsets = offsets)
    }

    // ------------------------------------------------------------------
    // History guard
    // ------------------------------------------------------------------

    /// Enter undo/redo replay. While replaying, positioning changes record
    /// the new mode only and never run the state machine, so replaying a
    /// positioning change cannot record another one.
    pub const fn begin_history_replay(&mut self, kind: HistoryReplay) {
        self.history = Some(kind);
    }

    /// Leave undo/redo replay.
    pub const fn end_history_replay(&mut self) {
        self.history = None;
    }

    /// The replay in progress, if any.
    #[must_use]
    pub const fn history_replay(&self) -> Option<HistoryReplay> {
        self.history
    }

    /// True while an undo or redo is being replayed.
    #[must_use]
    pub const fn is_replaying_history(&self) -> bool {
        self.history.is_some()
    }

    // ------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------

    /// Register a layout-complete listener. Navigation and selection use it
    /// to re-query bounds.
    pub fn on_layout_complete<F>(&mut self, listener: F)
    where
        F: FnMut(&LayoutEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    /// Lay out for `available` and commit the result.
    ///
    /// Infinite dimensions mean "unconstrained". Zero or negative sizes still
    /// produce a complete, valid snapshot.
    pub fn layout(&mut self, available: Size) -> &LayoutSnapshot {
        self.available = available;
        self.layout_depth += 1;
        let snapshot = FlowLayout::new(&self.children, &self.config, self.measure.as_ref()).arrange(available);
        self.snapshot = snapshot;
        self.dirty = false;
        self.passes += 1;

        let event = LayoutEvent {
            pass: self.passes,
            depth: self.layout_depth,
            desired_size: self.snapshot.desired_size,
            actual_size: self.snapshot.actual_size,
        };
        // Listeners registered during notification are kept.
        let mut listeners = mem::take(&mut self.listeners);
        for listener in &mut listeners {
            listener(&event);
        }
        listeners.append(&mut self.listeners);
        self.listeners = listeners;

        self.layout_depth -= 1;
        &self.snapshot
    }

    /// Lay out again with the last available size.
    pub fn relayout(&mut self) -> &LayoutSnapshot {
        self.layout(self.available)
    }

    /// Lay out only if something changed.
    pub fn ensure_layout(&mut self) -> &LayoutSnapshot {
        if self.dirty {
            self.relayout()
        } else {
            &self.snapshot
        }
    }

    /// The last available size passed to [`layout`](Self::layout).
    #[must_use]
    pub const fn available(&self) -> Size {
        self.available
    }

    /// Resolved rectangle of a child from the last committed layout.
    ///
    /// `Ok(None)` means the child exists but has no geometry: it is
    /// collapsed or was added after the last pass.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the child is not in this container.
    pub fn bounds_of(&self, id: ChildId) -> Result<Option<Rect>> {
        let _ = self.children.entry(id)?;
        Ok(self.snapshot.rect_of(id))
    }

    /// Children in painting order: flow children in collection order, then
    /// Overlapped, Absolute and Fixed children in collection order.
    #[must_use]
    pub fn paint_order(&self) -> Vec<ChildId> {
        let (flow, lifted): (Vec<_>, Vec<_>) = self
            .children
            .iter()
            .filter(|(_, child)| child.is_visible())
            .partition(|(_, child)| child.positioning.occupies_flow());
        flow.into_iter().chain(lifted).map(|(id, _)| id).collect()
    }

    /// The topmost visible child whose rectangle contains `point`.
    #[must_use]
    pub fn child_at(&self, point: Point) -> Option<ChildId> {
        self.paint_order()
            .into_iter()
            .rev()
            .find(|&id| self.snapshot.rect_of(id).is_some_and(|rect| rect.contains(point)))
    }

    /// A mapper over the last committed layout.
    #[must_use]
    pub const fn mapper(&self) -> CoordinateMapper<'_> {
        CoordinateMapper::new(&self.children, &self.snapshot)
    }

    /// Reorder Absolute and Fixed children so each sits after the flow anchor
    /// its position implies. Must run before serialization.
    ///
    /// Afterwards, for every such child, the anchor derived from its rectangle
    /// is the anchor that physically precedes it, so physical and logical
    /// order agree. Running it again moves nothing. Returns the number of
    /// moves made.
    ///
    /// # Errors
    ///
    /// Propagates collection errors; none occur for a consistent container.
    pub fn normalize(&mut self) -> Result<usize> {
        let _ = self.ensure_layout();
        let mut moves = 0;
        // Moving an out-of-flow child never moves an anchor, so one sweep
        // settles everything; the bound only guards against surprises.
        for _ in 0..=self.children.len() {
            let mut changed = false;
            let ids = self.children.ids().to_vec();
            for id in ids {
                let Some(child) = self.children.get(id) else {
                    continue;
                };
                if !child.is_visible() || !child.positioning.uses_absolute_coordinates() {
                    continue;
                }
                let Some(rect) = self.snapshot.rect_of(id) else {
                    continue;
                };
                let Some(current) = self.children.index_of(id) else {
                    continue;
                };
                let mapper = self.mapper();
                let descriptor = mapper.to_relative(rect, Some(id));
                let physical = mapper.anchor_for_index(current, Some(id)).index;
                let logical = descriptor.preceding_index.checked_sub(1);
                if physical != logical {
                    self.children.move_range(current, 1, descriptor.preceding_index)?;
                    let _ = self.relayout();
                    moves += 1;
                    changed = true;
                }
            }
            if !changed {
                break;
            }
        }
        Ok(moves)
    }

    /// Set a child's positioning mode; see [`crate::positioning`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the child is not in this container.
    pub fn set_positioning(&mut self, id: ChildId, to: Positioning) -> Result<crate::positioning::Transition> {
        crate::positioning::transition(self, id, to)
    }
}
