//! The flow layout routine.
//!
//! Children are visited in collection order. The running state is:
//!
//! ```text
//!   left_offset ──►┌float┐┌float┐         ┌float┐◄── right_offset
//!                  └─────┘└─────┘         └─────┘
//!   top_offset ──► ┌──────────── block ─────────────┐
//!                  └────────────────────────────────┘
//! ```
//!
//! Floats advance `left_offset`/`right_offset` but not `top_offset`; the
//! next non-floated child terminates the float run and advances
//! `top_offset` by its margin-box height. Vertical margins collapse:
//! a child's top margin only adds `max(top - previous_bottom, 0)`.

use crate::box_model::{Point, Rect, Size};
use crate::collection::ChildCollection;
use crate::config::LayoutConfig;
use crate::model::{ChildEntry, ChildId, ContentMeasure, FloatSide, HorizontalAlignment, Positioning};

use super::anchor::FlowAnchor;
use super::snapshot::{ChildLayout, LayoutSnapshot};

#[cfg(feature = "layout-trace")]
use std::cell::Cell;

#[cfg(feature = "layout-trace")]
thread_local! {
    static LAYOUT_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Running state of the flow pass, in content-box coordinates.
#[derive(Debug, Default)]
struct FlowState {
    left_offset: f64,
    right_offset: f64,
    top_offset: f64,
    last_bottom_margin: f64,
    /// Lowest margin-box bottom of the open left float run.
    left_run_bottom: Option<f64>,
    /// Lowest margin-box bottom of the open right float run.
    right_run_bottom: Option<f64>,
    anchor: FlowAnchor,
    extent: Size,
}

impl FlowState {
    fn include(&mut self, right: f64, bottom: f64) {
        self.extent.width = self.extent.width.max(right);
        self.extent.height = self.extent.height.max(bottom);
    }
}

/// Lays out the children of one container.
///
/// The layout is a pure function of the collection, the configuration, the
/// content measurer and the available size; it never mutates children, so a
/// nested pass cannot corrupt the state of an outer one.
pub struct FlowLayout<'a> {
    children: &'a ChildCollection,
    config: &'a LayoutConfig,
    measure: &'a dyn ContentMeasure,
}

impl<'a> FlowLayout<'a> {
    /// Prepare a pass over `children`.
    #[must_use]
    pub fn new(
        children: &'a ChildCollection,
        config: &'a LayoutConfig,
        measure: &'a dyn ContentMeasure,
    ) -> Self {
        Self {
            children,
            config,
            measure,
        }
    }

    /// Desired container size for the given available size.
    ///
    /// Infinite dimensions mean "unconstrained".
    #[must_use]
    pub fn measure(&self, available: Size) -> Size {
        self.run(available).desired_size
    }

    /// Resolve every child's rectangle for the given available size.
    #[must_use]
    pub fn arrange(&self, available: Size) -> LayoutSnapshot {
        self.run(available)
    }

    /// The core routine behind [`measure`](Self::measure) and
    /// [`arrange`](Self::arrange).
    fn run(&self, available: Size) -> LayoutSnapshot {
        #[cfg(feature = "layout-trace")]
        let depth = LAYOUT_DEPTH.with(|d| {
            let current = d.get();
            d.set(current + 1);
            current
        });
        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT] depth={depth} available={}x{} children={}",
            available.width,
            available.height,
            self.children.len()
        );

        let padding = self.config.padding;
        let available = Size::new(sanitize_available(available.width), sanitize_available(available.height));
        let content_width = (available.width - padding.horizontal()).max(0.0);
        let content_height = (available.height - padding.vertical()).max(0.0);

        // STEP 1: Flow participants and overlapped children, in order.
        let mut state = FlowState {
            anchor: FlowAnchor::ORIGIN,
            ..FlowState::default()
        };
        if content_width.is_finite() {
            state.extent.width = content_width;
        }
        let mut placed = Vec::with_capacity(self.children.len());
        let mut deferred = Vec::new();
        let mut overlapped = Vec::new();

        for (index, (id, child)) in self.children.iter().enumerate() {
            if !child.is_visible() {
                continue;
            }
            match child.positioning {
                Positioning::Absolute | Positioning::Fixed => deferred.push((index, id, child)),
                Positioning::Overlapped => {
                    // Anchors are resolved in order, so remember which one applies.
                    overlapped.push((placed.len(), index, id, child, state.anchor));
                    placed.push(None);
                }
                Positioning::Static | Positioning::Relative => {
                    let layout = self.place_flow_child(&mut state, index, id, child, content_width, content_height);
                    placed.push(Some(layout));
                }
            }
        }

        // Flow positions are known; translate into container coordinates.
        let offset = Point::new(padding.left, padding.top);
        let mut placed: Vec<Option<ChildLayout>> = placed
            .into_iter()
            .map(|layout| layout.map(|layout| translate(layout, offset)))
            .collect();

        let flow_width = if content_width.is_finite() {
            content_width
        } else {
            state.extent.width
        };
        let content_box = Rect::new(padding.left, padding.top, flow_width, state.extent.height);
        let mut out_of_flow_extent = Size::ZERO;

        for (position, index, id, child, anchor) in overlapped {
            let size = self.resolve_size(child, Size::new(flow_width, f64::INFINITY));
            let base = anchor.origin(child.alignment, content_box, size.width);
            let rect = Rect::new(
                base.x + child.offsets.left.unwrap_or(0.0),
                base.y + child.offsets.top.unwrap_or(0.0),
                size.width,
                size.height,
            );
            out_of_flow_extent.width = out_of_flow_extent.width.max(rect.right());
            out_of_flow_extent.height = out_of_flow_extent.height.max(rect.bottom());
            placed[position] = Some(ChildLayout {
                id,
                index,
                rect,
                flow_rect: Rect::from_origin_size(base, size),
            });
        }

        // STEP 2: Absolute children against the flow-determined size.
        let reference = Size::new(
            if available.width.is_finite() {
                available.width
            } else {
                state.extent.width + padding.horizontal()
            },
            (state.extent.height + padding.vertical())
                .max(self.config.min_height + padding.vertical())
                .max(if available.height.is_finite() { available.height } else { 0.0 }),
        );
        for (index, id, child) in deferred {
            let layout = self.place_absolute_child(index, id, child, reference);
            // Content anchored to the left/top edges grows the container;
            // content pinned only to the right/bottom edges cannot.
            if child.offsets.left.is_some() || child.offsets.right.is_none() {
                out_of_flow_extent.width = out_of_flow_extent.width.max(layout.rect.right());
            }
            if child.offsets.top.is_some() || child.offsets.bottom.is_none() {
                out_of_flow_extent.height = out_of_flow_extent.height.max(layout.rect.bottom());
            }
            let position = placed
                .iter()
                .position(|existing| existing.is_some_and(|existing| existing.index > index))
                .unwrap_or(placed.len());
            placed.insert(position, Some(layout));
        }

        // STEP 3: Container size.
        let desired_size = Size::new(
            (state.extent.width.max(self.config.min_width) + padding.horizontal()).max(out_of_flow_extent.width),
            (state.extent.height.max(self.config.min_height) + padding.vertical()).max(out_of_flow_extent.height),
        );
        let viewport_width = if available.width.is_finite() {
            available.width
        } else {
            desired_size.width
        };

        #[cfg(feature = "layout-trace")]
        {
            eprintln!(
                "[LAYOUT] depth={depth} desired={}x{}",
                desired_size.width, desired_size.height
            );
            LAYOUT_DEPTH.with(|d| d.set(depth));
        }

        LayoutSnapshot::new(placed.into_iter().flatten().collect(), desired_size, viewport_width, content_box)
    }

    /// Place one Static or Relative child and advance the flow state.
    fn place_flow_child(
        &self,
        state: &mut FlowState,
        index: usize,
        id: ChildId,
        child: &ChildEntry,
        content_width: f64,
        content_height: f64,
    ) -> ChildLayout {
        let margin = child.margin;
        let float = child.effective_float();

        // STEP 1: Clearance closes the matching float runs.
        if let Some(clear) = child.effective_clear() {
            if clear.clears(FloatSide::Left)
                && let Some(bottom) = state.left_run_bottom.take()
            {
                state.top_offset = state.top_offset.max(bottom);
                state.left_offset = 0.0;
            }
            if clear.clears(FloatSide::Right)
                && let Some(bottom) = state.right_run_bottom.take()
            {
                state.top_offset = state.top_offset.max(bottom);
                state.right_offset = 0.0;
            }
        }

        // STEP 2: Collapse the top margin against the previous bottom margin.
        let slot_top = state.top_offset + (margin.top - state.last_bottom_margin).max(0.0);

        // STEP 3: Resolve the size against what is left of the line.
        // Non-floated children flow as if the floats were not there.
        let (left_offset, right_offset) = if float.is_some() {
            (state.left_offset, state.right_offset)
        } else {
            (0.0, 0.0)
        };
        let available = Size::new(
            (content_width - left_offset - right_offset - margin.horizontal()).max(0.0),
            (content_height - slot_top - margin.bottom).max(0.0),
        );
        let size = self.resolve_size(child, available);

        // STEP 4: Horizontal position. An explicit alignment overrides the
        // float direction.
        let alignment = child.alignment.unwrap_or(match float {
            Some(FloatSide::Right) => HorizontalAlignment::Right,
            Some(FloatSide::Left) | None => HorizontalAlignment::Left,
        });
        let right_edge = if content_width.is_finite() {
            content_width
        } else {
            left_offset + margin.horizontal() + size.width
        };
        let x = match alignment {
            HorizontalAlignment::Left => left_offset + margin.left,
            HorizontalAlignment::Right => right_edge - right_offset - margin.right - size.width,
            HorizontalAlignment::Center => left_offset + margin.left + (available.width - size.width) / 2.0,
        };
        let flow_rect = Rect::new(x, slot_top, size.width, size.height);

        // STEP 5: Relative children are shifted; their slot stays put.
        let rect = match child.positioning {
            Positioning::Relative => {
                let (dx, dy) = child.offsets.relative_shift();
                Rect::new(flow_rect.x + dx, flow_rect.y + dy, size.width, size.height)
            }
            Positioning::Static
            | Positioning::Absolute
            | Positioning::Fixed
            | Positioning::Overlapped => flow_rect,
        };

        // STEP 6: Advance the running offsets.
        let margin_bottom_edge = flow_rect.bottom() + margin.bottom;
        match float {
            Some(FloatSide::Left) => {
                state.left_offset = flow_rect.right() + margin.right;
                state.left_run_bottom = Some(state.left_run_bottom.map_or(margin_bottom_edge, |b| b.max(margin_bottom_edge)));
            }
            Some(FloatSide::Right) => {
                state.right_offset = right_edge - flow_rect.x + margin.left;
                state.right_run_bottom = Some(state.right_run_bottom.map_or(margin_bottom_edge, |b| b.max(margin_bottom_edge)));
            }
            None => {
                state.left_offset = 0.0;
                state.right_offset = 0.0;
                state.left_run_bottom = None;
                state.right_run_bottom = None;
                state.top_offset = margin_bottom_edge;
                state.last_bottom_margin = margin.bottom;
                state.anchor = FlowAnchor {
                    index: Some(index),
                    bottom: margin_bottom_edge,
                    margin_left: margin.left,
                };
            }
        }
        state.include(flow_rect.right() + margin.right, margin_bottom_edge);

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT]   {id} #{index} {:?} float={float:?} rect=({}, {}, {}, {})",
            child.positioning, rect.x, rect.y, rect.width, rect.height
        );

        ChildLayout {
            id,
            index,
            rect,
            flow_rect,
        }
    }

    /// Place one Absolute or Fixed child against the container's edges.
    ///
    /// When both `left` and `right` (resp. `top` and `bottom`) are set and no
    /// explicit size is given, the size is derived from them rather than
    /// measured. Margins and padding do not apply.
    fn place_absolute_child(&self, index: usize, id: ChildId, child: &ChildEntry, reference: Size) -> ChildLayout {
        let offsets = child.offsets;
        let available = Size::new(
            (reference.width - offsets.left.unwrap_or(0.0) - offsets.right.unwrap_or(0.0)).max(0.0),
            (reference.height - offsets.top.unwrap_or(0.0) - offsets.bottom.unwrap_or(0.0)).max(0.0),
        );
        let mut sizing = child.clone();
        if sizing.width.is_none() && offsets.left.is_some() && offsets.right.is_some() {
            sizing.width = Some(available.width);
        }
        if sizing.height.is_none() && offsets.top.is_some() && offsets.bottom.is_some() {
            sizing.height = Some(available.height);
        }
        let size = self.resolve_size(&sizing, available);

        let x = match (offsets.left, offsets.right) {
            (Some(left), _) => left,
            (None, Some(right)) => reference.width - right - size.width,
            (None, None) => 0.0,
        };
        let y = match (offsets.top, offsets.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => reference.height - bottom - size.height,
            (None, None) => 0.0,
        };
        let rect = Rect::new(x, y, size.width, size.height);

        #[cfg(feature = "layout-trace")]
        eprintln!(
            "[LAYOUT]   {id} #{index} {:?} rect=({}, {}, {}, {})",
            child.positioning, rect.x, rect.y, rect.width, rect.height
        );

        ChildLayout {
            id,
            index,
            rect,
            flow_rect: rect,
        }
    }

    /// Explicit sizes win over the measured size; minimums apply last.
    fn resolve_size(&self, child: &ChildEntry, available: Size) -> Size {
        let desired = self.measure.measure(child, available);
        let width = child.width.unwrap_or(desired.width);
        let height = child.height.unwrap_or(desired.height);
        Size::new(
            finite_or_zero(width).max(child.min_width).max(0.0),
            finite_or_zero(height).max(child.min_height).max(0.0),
        )
    }
}

const fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Negative and NaN available sizes behave as zero; infinity is kept.
fn sanitize_available(value: f64) -> f64 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}

fn translate(layout: ChildLayout, offset: Point) -> ChildLayout {
    let shift = |rect: Rect| Rect::new(rect.x + offset.x, rect.y + offset.y, rect.width, rect.height);
    ChildLayout {
        rect: shift(layout.rect),
        flow_rect: shift(layout.flow_rect),
        ..layout
    }
}
