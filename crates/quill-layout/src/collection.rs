//! Ordered child collection.
//!
//! Children live in an index-stable arena; the order vector holds their
//! handles. Order is the single source of truth for "what comes before what",
//! for Absolute and Overlapped children too.
//!
//! Removed slots are tombstoned and their generation bumped, so a stale
//! [`ChildId`] never aliases a newer child. Code that scans for neighbours and
//! then mutates the order snapshots indices first.

use crate::box_model::Size;
use crate::error::{LayoutError, Result};
use crate::model::{ChildEntry, ChildId, ContentMeasure};

#[derive(Debug, Clone, Default)]
struct Slot {
    generation: u32,
    entry: Option<ChildEntry>,
}

/// The container's ordered list of children.
#[derive(Debug, Clone, Default)]
pub struct ChildCollection {
    slots: Vec<Slot>,
    free: Vec<u32>,
    order: Vec<ChildId>,
}

impl ChildCollection {
    /// Create an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Number of children.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.order.len()
    }

    /// True if the collection has no children.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Child handles in order.
    #[must_use]
    pub fn ids(&self) -> &[ChildId] {
        &self.order
    }

    /// Children in order.
    pub fn iter(&self) -> impl Iterator<Item = (ChildId, &ChildEntry)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.get(id).map(|entry| (id, entry)))
    }

    /// Borrow a child.
    #[must_use]
    pub fn get(&self, id: ChildId) -> Option<&ChildEntry> {
        self.slots
            .get(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_ref())
    }

    /// Mutably borrow a child.
    pub fn get_mut(&mut self, id: ChildId) -> Option<&mut ChildEntry> {
        self.slots
            .get_mut(id.slot as usize)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.entry.as_mut())
    }

    /// Borrow a child, or fail with [`LayoutError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the handle is stale or foreign.
    pub fn entry(&self, id: ChildId) -> Result<&ChildEntry> {
        self.get(id).ok_or(LayoutError::NotFound(id))
    }

    /// Mutably borrow a child, or fail with [`LayoutError::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the handle is stale or foreign.
    pub fn entry_mut(&mut self, id: ChildId) -> Result<&mut ChildEntry> {
        self.get_mut(id).ok_or(LayoutError::NotFound(id))
    }

    /// True if the handle resolves.
    #[must_use]
    pub fn contains(&self, id: ChildId) -> bool {
        self.get(id).is_some()
    }

    /// Position of a child in the order.
    #[must_use]
    pub fn index_of(&self, id: ChildId) -> Option<usize> {
        if !self.contains(id) {
            return None;
        }
        self.order.iter().position(|&other| other == id)
    }

    /// Position of a child, or `-1` if it is not in the collection.
    #[must_use]
    pub fn index_of_raw(&self, id: ChildId) -> isize {
        self.index_of(id)
            .and_then(|index| isize::try_from(index).ok())
            .unwrap_or(-1)
    }

    /// Handle of the child at `index`.
    #[must_use]
    pub fn id_at(&self, index: usize) -> Option<ChildId> {
        self.order.get(index).copied()
    }

    fn allocate(&mut self, entry: ChildEntry) -> ChildId {
        if let Some(slot_index) = self.free.pop() {
            let slot = &mut self.slots[slot_index as usize];
            slot.entry = Some(entry);
            ChildId {
                slot: slot_index,
                generation: slot.generation,
            }
        } else {
            let slot_index = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 0,
                entry: Some(entry),
            });
            ChildId {
                slot: slot_index,
                generation: 0,
            }
        }
    }

    /// Insert a child before the child currently at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index > len()`.
    pub fn insert(&mut self, index: usize, entry: ChildEntry) -> Result<ChildId> {
        if index > self.order.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.order.len(),
            });
        }
        let id = self.allocate(entry);
        self.order.insert(index, id);
        Ok(id)
    }

    /// Append a child.
    pub fn push(&mut self, entry: ChildEntry) -> ChildId {
        let id = self.allocate(entry);
        self.order.push(id);
        id
    }

    /// Remove a child and hand back its entry. The handle is dead afterwards.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the handle is stale or foreign.
    pub fn remove(&mut self, id: ChildId) -> Result<ChildEntry> {
        let index = self.index_of(id).ok_or(LayoutError::NotFound(id))?;
        let removed = self.order.remove(index);
        let slot = &mut self.slots[removed.slot as usize];
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(removed.slot);
        slot.entry.take().ok_or(LayoutError::NotFound(id))
    }

    /// Move `count` children starting at `start` so they end up before the
    /// child that was at `new_index` before the move.
    ///
    /// A destination inside the moved range leaves the order unchanged.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRange` if the range does not fit, `IndexOutOfRange` if
    /// `new_index > len()`.
    pub fn move_range(&mut self, start: usize, count: usize, new_index: usize) -> Result<()> {
        let len = self.order.len();
        if start.checked_add(count).is_none_or(|end| end > len) {
            return Err(LayoutError::InvalidRange { start, count, len });
        }
        if new_index > len {
            return Err(LayoutError::IndexOutOfRange {
                index: new_index,
                len,
            });
        }
        // Index shift caused by taking the range out first.
        let target = if new_index >= start + count {
            new_index - count
        } else if new_index > start {
            start
        } else {
            new_index
        };
        if target == start || count == 0 {
            return Ok(());
        }
        let moved: Vec<ChildId> = self.order.drain(start..start + count).collect();
        let tail = self.order.split_off(target);
        self.order.extend(moved);
        self.order.extend(tail);
        Ok(())
    }

    /// Move one child so it sits at `new_index` once the move is done.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for a stale handle and `IndexOutOfRange` if
    /// `new_index >= len()`.
    pub fn move_child(&mut self, id: ChildId, new_index: usize) -> Result<()> {
        let index = self.index_of(id).ok_or(LayoutError::NotFound(id))?;
        if new_index >= self.order.len() {
            return Err(LayoutError::IndexOutOfRange {
                index: new_index,
                len: self.order.len(),
            });
        }
        let removed = self.order.remove(index);
        self.order.insert(new_index, removed);
        Ok(())
    }

    /// First index `>= from` whose child satisfies `predicate`.
    ///
    /// With `visible_only`, collapsed children are skipped.
    pub fn find_forward<P>(&self, from: usize, visible_only: bool, mut predicate: P) -> Option<usize>
    where
        P: FnMut(ChildId, &ChildEntry) -> bool,
    {
        (from..self.order.len()).find(|&index| self.matches(index, visible_only, &mut predicate))
    }

    /// Last index `<= from` whose child satisfies `predicate`.
    ///
    /// With `visible_only`, collapsed children are skipped.
    pub fn find_backward<P>(
        &self,
        from: usize,
        visible_only: bool,
        mut predicate: P,
    ) -> Option<usize>
    where
        P: FnMut(ChildId, &ChildEntry) -> bool,
    {
        if self.order.is_empty() {
            return None;
        }
        let from = from.min(self.order.len() - 1);
        (0..=from)
            .rev()
            .find(|&index| self.matches(index, visible_only, &mut predicate))
    }

    fn matches<P>(&self, index: usize, visible_only: bool, predicate: &mut P) -> bool
    where
        P: FnMut(ChildId, &ChildEntry) -> bool,
    {
        let id = self.order[index];
        self.get(id)
            .is_some_and(|entry| (!visible_only || entry.is_visible()) && predicate(id, entry))
    }

    /// Insert clones of `template` starting at `index` until their cumulative
    /// flow height reaches `target_height`.
    ///
    /// Heights are measured at `width` with `measure`, margins included. A
    /// template that measures zero height inserts nothing.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfRange` if `index > len()`.
    pub fn fill(
        &mut self,
        index: usize,
        template: &ChildEntry,
        target_height: f64,
        width: f64,
        measure: &dyn ContentMeasure,
    ) -> Result<Vec<ChildId>> {
        if index > self.order.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.order.len(),
            });
        }
        let measured = measure.measure(template, Size::new(width, f64::INFINITY));
        let step = template.height.unwrap_or(measured.height).max(template.min_height)
            + template.margin.vertical();
        let mut inserted = Vec::new();
        if !(step > 0.0 && step.is_finite()) {
            return Ok(inserted);
        }
        let mut filled = 0.0;
        while filled < target_height {
            inserted.push(self.insert(index + inserted.len(), template.clone())?);
            filled += step;
        }
        Ok(inserted)
    }
}
