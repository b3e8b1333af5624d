//! Integration tests for the container façade: queries, notifications and
//! normalization.

use std::cell::RefCell;
use std::rc::Rc;

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use quill_common::warning::was_warned;
use quill_layout::{
    BorderEdge, BorderSpec, BorderStyle, BoxOffsets, ChildEntry, ColorValue, Container, DisplayCommand,
    LayoutError, Painter, Point, Positioning, Size,
};

fn absolute_at(x: f64, y: f64) -> ChildEntry {
    ChildEntry::fixed(30.0, 10.0)
        .with_positioning(Positioning::Absolute)
        .with_offsets(BoxOffsets::at(x, y))
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn test_child_at_prefers_children_painted_on_top() {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(50.0));
    let overlapped = container.push(
        ChildEntry::fixed(20.0, 20.0)
            .with_positioning(Positioning::Overlapped)
            .with_offsets(BoxOffsets::at(10.0, -40.0)),
    );
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    assert_eq!(container.child_at(Point::new(15.0, 15.0)), Some(overlapped));
    assert_eq!(container.child_at(Point::new(100.0, 25.0)), Some(a));
    assert_eq!(container.child_at(Point::new(100.0, 500.0)), None);
}

#[test]
fn test_paint_order_puts_lifted_children_last() {
    let mut container = Container::default();
    let lifted = container.push(absolute_at(0.0, 0.0));
    let a = container.push(ChildEntry::block(10.0));
    let b = container.push(ChildEntry::block(10.0));
    assert_eq!(container.paint_order(), vec![a, b, lifted]);
}

#[test]
fn test_bounds_of_removed_child_is_not_found() {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(10.0));
    let _ = container.layout(Size::new(100.0, 100.0));
    let _ = container.remove(a).unwrap();
    assert_eq!(container.bounds_of(a), Err(LayoutError::NotFound(a)));
}

#[test]
fn test_bounds_before_first_layout_are_empty() {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(10.0));
    assert!(container.is_dirty());
    assert_eq!(container.bounds_of(a), Ok(None));
    let _ = container.ensure_layout();
    assert!(container.bounds_of(a).unwrap().is_some());
}

#[test]
fn test_malformed_border_is_clamped() {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(10.0));
    let mut border = BorderSpec::uniform(BorderEdge::solid(2.0, ColorValue::BLACK));
    border.left.width = -3.0;
    border.top.radius = f64::NAN;
    container.set_border(a, border).unwrap();
    let stored = container.children().get(a).unwrap().border;
    assert!(stored.left.width.abs() < f64::EPSILON);
    assert!(stored.top.radius.abs() < f64::EPSILON);
    assert!(was_warned("Border", "left width -3 clamped to 0"));
}

// ---------------------------------------------------------------------------
// Notifications
// ---------------------------------------------------------------------------

#[test]
fn test_layout_complete_listeners_are_notified() {
    let events = Rc::new(RefCell::new(Vec::new()));
    let mut container = Container::default();
    let sink = Rc::clone(&events);
    container.on_layout_complete(move |event| sink.borrow_mut().push(*event));
    let _ = container.push(ChildEntry::block(10.0));

    let _ = container.layout(Size::new(100.0, f64::INFINITY));
    let _ = container.layout(Size::new(50.0, f64::INFINITY));

    let events = events.borrow();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].pass, 1);
    assert_eq!(events[1].pass, 2);
    assert_eq!(events[1].depth, 1);
    assert_eq!(events[1].desired_size, Size::new(50.0, 10.0));
}

#[test]
fn test_positioning_change_relayouts() {
    let count = Rc::new(RefCell::new(0_u32));
    let mut container = Container::default();
    let sink = Rc::clone(&count);
    container.on_layout_complete(move |_| *sink.borrow_mut() += 1);
    let a = container.push(ChildEntry::block(10.0));
    let _ = container.layout(Size::new(100.0, f64::INFINITY));
    let _ = container.set_positioning(a, Positioning::Absolute).unwrap();
    assert!(*count.borrow() > 1);
    assert!(!container.is_dirty());
}

// ---------------------------------------------------------------------------
// Normalize
// ---------------------------------------------------------------------------

#[test]
fn test_normalize_moves_absolute_child_after_its_anchor() {
    let mut container = Container::default();
    let x = container.push(absolute_at(10.0, 70.0));
    let a = container.push(ChildEntry::block(50.0));
    let b = container.push(ChildEntry::block(50.0));
    let _ = container.layout(Size::new(200.0, f64::INFINITY));

    assert_eq!(container.normalize().unwrap(), 1);
    assert_eq!(container.children().ids(), &[a, b, x]);
    assert_eq!(container.normalize().unwrap(), 0);
}

#[test]
fn test_normalize_moves_absolute_child_above_first_anchor_to_front() {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(50.0));
    let x = container.push(absolute_at(10.0, -20.0));
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    assert_eq!(container.normalize().unwrap(), 1);
    assert_eq!(container.children().ids(), &[x, a]);
}

#[test]
fn test_normalize_leaves_overlapped_children_alone() {
    let mut container = Container::default();
    let o = container.push(
        ChildEntry::fixed(10.0, 10.0)
            .with_positioning(Positioning::Overlapped)
            .with_offsets(BoxOffsets::at(0.0, 500.0)),
    );
    let a = container.push(ChildEntry::block(50.0));
    assert_eq!(container.normalize().unwrap(), 0);
    assert_eq!(container.children().ids(), &[o, a]);
}

#[quickcheck]
fn prop_normalize_is_idempotent(layout: Vec<(bool, u8, u16)>) -> TestResult {
    if layout.len() > 30 {
        return TestResult::discard();
    }
    let mut container = Container::default();
    for (absolute, height, y) in layout {
        let entry = if absolute {
            absolute_at(5.0, f64::from(y % 600))
        } else {
            ChildEntry::block(f64::from(height % 40) + 1.0)
        };
        let _ = container.push(entry);
    }
    let _ = container.layout(Size::new(300.0, f64::INFINITY));
    if container.normalize().is_err() {
        return TestResult::failed();
    }
    let order = container.children().ids().to_vec();
    let moves = container.normalize();
    TestResult::from_bool(moves == Ok(0) && container.children().ids() == order.as_slice())
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

#[test]
fn test_painter_emits_background_then_border() {
    let mut container = Container::default();
    let mut entry = ChildEntry::fixed(40.0, 20.0)
        .with_border(BorderSpec::uniform(BorderEdge::solid(1.0, ColorValue::BLACK).with_radius(4.0)));
    entry.background = Some(ColorValue::rgb(200, 220, 255));
    let _ = container.push(entry);
    let _ = container.push(ChildEntry::block(10.0));
    let _ = container.layout(Size::new(100.0, f64::INFINITY));

    let list = Painter::new(&container).paint();
    assert_eq!(list.len(), 2);
    assert!(matches!(list.commands()[0], DisplayCommand::FillPath { .. }));
    assert!(matches!(list.commands()[1], DisplayCommand::StrokePath { .. }));
}

#[test]
fn test_painter_uses_rectangle_fast_path() {
    let mut container = Container::default();
    let _ = container.push(
        ChildEntry::fixed(40.0, 20.0).with_border(BorderSpec::uniform(BorderEdge::solid(2.0, ColorValue::BLACK))),
    );
    let mut unstyled = ChildEntry::fixed(40.0, 20.0);
    unstyled.border.top.style = BorderStyle::None;
    let _ = container.push(unstyled);
    let _ = container.layout(Size::new(100.0, f64::INFINITY));

    let list = Painter::new(&container).paint();
    assert_eq!(list.len(), 1);
    assert!(matches!(list.commands()[0], DisplayCommand::StrokeRect { .. }));
}
