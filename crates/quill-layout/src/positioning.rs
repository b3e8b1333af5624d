//! The positioning state machine.
//!
//! Changing a child's mode must not make it jump. Every transition captures
//! the rendered rectangle first and then rewrites the child's metadata so the
//! next layout reproduces that rectangle under the new mode:
//!
//! | from            | to                  | rewrite                                          |
//! |-----------------|---------------------|--------------------------------------------------|
//! | Static          | Absolute / Fixed    | fill the vacated slot, offsets = rendered origin |
//! | Static          | Overlapped          | fill the vacated slot, then as below             |
//! | any             | Overlapped          | re-sequence after the derived anchor, offsets    |
//! |                 |                     | = descriptor offset, alignment inferred, flow    |
//! |                 |                     | sizes pinned                                     |
//! | non-flow        | Relative            | re-sequence, pin size, offsets = shift from slot |
//! | any             | Static              | [`StaticTransition`] decides                     |
//! | Absolute        | Fixed (and back)    | mode only                                        |
//!
//! While an undo or redo is being replayed only the mode is recorded; the
//! history already holds the metadata rewrites.

use quill_common::warning::warn_once;
use serde::Serialize;

use crate::box_model::Rect;
use crate::config::StaticTransition;
use crate::container::Container;
use crate::error::Result;
use crate::mapper::FlowDescriptor;
use crate::model::{BoxOffsets, ChildEntry, ChildId, Positioning};

/// What a positioning change did.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    /// The child.
    pub id: ChildId,
    /// Mode before the change.
    pub from: Positioning,
    /// Mode after the change.
    pub to: Positioning,
    /// Collection index of the child afterwards.
    pub index: usize,
    /// Placeholder lines inserted to keep the following flow in place.
    pub fillers: Vec<ChildId>,
    /// Flow-relative position derived for the child, if one was needed.
    pub descriptor: Option<FlowDescriptor>,
    /// True if the change was recorded during history replay.
    pub replayed: bool,
}

/// Run one positioning transition on `container`.
pub(crate) fn transition(container: &mut Container, id: ChildId, to: Positioning) -> Result<Transition> {
    let from = container.children.entry(id)?.positioning;
    let mut report = Transition {
        id,
        from,
        to,
        index: 0,
        fillers: Vec::new(),
        descriptor: None,
        replayed: false,
    };

    if from == to {
        report.index = current_index(container, id)?;
        return Ok(report);
    }

    if container.is_replaying_history() {
        container.children.entry_mut(id)?.positioning = to;
        container.invalidate();
        report.index = current_index(container, id)?;
        report.replayed = true;
        return Ok(report);
    }

    // Capture what is on screen before touching anything.
    let _ = container.ensure_layout();
    let layout = container.snapshot.get(id).copied();
    let captured = layout.map(|layout| layout.rect);

    #[cfg(feature = "layout-trace")]
    eprintln!("[POSITION] {id} {from:?} -> {to:?} captured={captured:?}");

    let derived = derived_extents(container.children.entry(id)?);
    let margin = container.children.entry(id)?.margin;
    container.children.entry_mut(id)?.positioning = to;
    container.invalidate();

    if from.occupies_flow() && !to.occupies_flow()
        && let Some(layout) = layout
    {
        // Leaving the flow: keep whatever follows where it was.
        report.fillers = backfill(container, id, layout.flow_rect.height + margin.vertical())?;
    }

    match to {
        Positioning::Absolute | Positioning::Fixed => {
            let entry = container.children.entry_mut(id)?;
            if !from.uses_absolute_coordinates()
                && let Some(rect) = captured
            {
                entry.offsets = BoxOffsets::at(rect.x, rect.y);
                pin_size(entry, rect, true, true);
            }
        }
        Positioning::Overlapped => {
            if let Some(rect) = captured {
                let _ = container.relayout();
                let descriptor = resequence(container, id, rect)?;
                let entry = container.children.entry_mut(id)?;
                entry.offsets = BoxOffsets::at(descriptor.offset.x, descriptor.offset.y);
                entry.alignment = Some(descriptor.alignment);
                // Overlapped children are sized against the whole content
                // width with no margins, so a flow size has to be frozen.
                let from_flow = from.occupies_flow();
                pin_size(entry, rect, from_flow || derived.0, from_flow || derived.1);
                report.descriptor = Some(descriptor);
            }
        }
        Positioning::Relative => match (from, captured) {
            (Positioning::Static, _) | (_, None) => {
                container.children.entry_mut(id)?.offsets = BoxOffsets::default();
            }
            (_, Some(rect)) => {
                let _ = container.relayout();
                report.descriptor = Some(resequence(container, id, rect)?);
                // Zero offsets first so the new slot is unperturbed.
                {
                    let entry = container.children.entry_mut(id)?;
                    entry.offsets = BoxOffsets::default();
                    // Back in flow the child is measured against the line
                    // minus its margins; keep the size it was shown at.
                    pin_size(entry, rect, true, true);
                }
                container.invalidate();
                let slot = container.relayout().get(id).map(|layout| layout.flow_rect);
                if let Some(slot) = slot {
                    container.children.entry_mut(id)?.offsets = BoxOffsets::at(rect.x - slot.x, rect.y - slot.y);
                }
            }
        },
        Positioning::Static => {
            if let (StaticTransition::ApplyLeftMargin, Some(rect)) = (container.config.static_transition, captured) {
                let content = container.snapshot.content_box;
                container.children.entry_mut(id)?.margin.left = (rect.x - content.x).max(0.0);
            }
        }
    }

    container.invalidate();
    let _ = container.relayout();
    report.index = current_index(container, id)?;

    #[cfg(feature = "layout-trace")]
    eprintln!(
        "[POSITION] {id} now {to:?} at #{} rect={:?}",
        report.index,
        container.snapshot.rect_of(id)
    );

    Ok(report)
}

fn current_index(container: &Container, id: ChildId) -> Result<usize> {
    let _ = container.children.entry(id)?;
    Ok(container.children.index_of(id).unwrap_or_default())
}

/// Insert placeholder lines before `id` totalling at least `height`.
///
/// Lines come in whole multiples of `placeholder_line_height` and do not take
/// part in margin collapsing, so the flow that follows can end up lower by up
/// to one line (plus any margin that used to collapse).
fn backfill(container: &mut Container, id: ChildId, height: f64) -> Result<Vec<ChildId>> {
    let Some(index) = container.children.index_of(id) else {
        return Ok(Vec::new());
    };
    let template = ChildEntry::placeholder(container.config.placeholder_line_height);
    let width = container.snapshot.content_box.width;
    let fillers = container
        .children
        .fill(index, &template, height, width, container.measure.as_ref())?;
    if fillers.is_empty() && height > 0.0 {
        warn_once(
            "Positioning",
            "placeholder lines measure zero height; the flow below a lifted child will move up",
        );
    }
    // Force a pass so the mapper sees the fillers before going on.
    container.invalidate();
    let _ = container.relayout();
    Ok(fillers)
}

/// Move `id` to just after the anchor its rendered rectangle implies.
fn resequence(container: &mut Container, id: ChildId, rect: Rect) -> Result<FlowDescriptor> {
    let descriptor = container.mapper().to_relative(rect, Some(id));
    if let Some(current) = container.children.index_of(id) {
        // `move_range` accounts for the removal shift.
        container.children.move_range(current, 1, descriptor.preceding_index)?;
    }
    let _ = container.relayout();
    Ok(descriptor)
}

/// Whether width/height were stretched between opposite offsets rather than
/// set explicitly.
fn derived_extents(entry: &ChildEntry) -> (bool, bool) {
    if !entry.positioning.uses_absolute_coordinates() {
        return (false, false);
    }
    let offsets = entry.offsets;
    (
        entry.width.is_none() && offsets.left.is_some() && offsets.right.is_some(),
        entry.height.is_none() && offsets.top.is_some() && offsets.bottom.is_some(),
    )
}

/// Freeze a size the new mode could not reproduce on its own.
fn pin_size(entry: &mut ChildEntry, rect: Rect, width: bool, height: bool) {
    if width && entry.width.is_none() {
        entry.width = Some(rect.width);
    }
    if height && entry.height.is_none() {
        entry.height = Some(rect.height);
    }
}
