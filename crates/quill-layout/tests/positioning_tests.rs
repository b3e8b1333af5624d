//! Integration tests for positioning mode transitions.

use quill_layout::{
    BoxOffsets, ChildEntry, ChildId, Container, EdgeSizes, HistoryReplay, HorizontalAlignment,
    LayoutConfig, LayoutError, Positioning, Rect, Size, StaticTransition,
};

const TOLERANCE: f64 = 1e-9;

fn assert_same_rect(actual: Rect, expected: Rect) {
    assert!(
        (actual.x - expected.x).abs() < TOLERANCE
            && (actual.y - expected.y).abs() < TOLERANCE
            && (actual.width - expected.width).abs() < TOLERANCE
            && (actual.height - expected.height).abs() < TOLERANCE,
        "expected {expected:?}, got {actual:?}"
    );
}

fn rect(container: &Container, id: ChildId) -> Rect {
    container.bounds_of(id).unwrap().expect("child was laid out")
}

/// Helper: the 400px-wide container with a 50px block followed by a child
/// pinned between x=350 and the right edge.
fn pinned_scenario() -> (Container, ChildId, ChildId) {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(50.0));
    let b = container.push(
        ChildEntry::fixed(80.0, 20.0)
            .with_positioning(Positioning::Absolute)
            .with_offsets(BoxOffsets {
                left: Some(350.0),
                right: Some(0.0),
                top: Some(10.0),
                bottom: None,
            }),
    );
    let _ = container.layout(Size::new(400.0, f64::INFINITY));
    (container, a, b)
}

#[test]
fn test_absolute_to_overlapped_scenario() {
    let (mut container, _, b) = pinned_scenario();
    assert_same_rect(rect(&container, b), Rect::new(350.0, 10.0, 50.0, 20.0));

    let transition = container.set_positioning(b, Positioning::Overlapped).unwrap();
    let descriptor = transition.descriptor.expect("overlapped children get a descriptor");
    assert_eq!(descriptor.preceding_index, 1);
    assert_eq!(descriptor.alignment, HorizontalAlignment::Right);
    assert!(transition.fillers.is_empty());
    assert_eq!(transition.index, 1);

    let entry = container.children().get(b).unwrap();
    assert_eq!(entry.positioning, Positioning::Overlapped);
    assert_eq!(entry.alignment, Some(HorizontalAlignment::Right));
    assert_eq!(entry.width, Some(50.0));
    assert_same_rect(rect(&container, b), Rect::new(350.0, 10.0, 50.0, 20.0));
}

#[test]
fn test_overlapped_position_follows_its_anchor() {
    let (mut container, a, b) = pinned_scenario();
    let _ = container.set_positioning(b, Positioning::Overlapped).unwrap();
    container.update(a, |entry| entry.content = quill_layout::ChildContent::Fill { height: 80.0 }).unwrap();
    let _ = container.relayout();
    assert_same_rect(rect(&container, b), Rect::new(350.0, 40.0, 50.0, 20.0));
}

#[test]
fn test_static_to_absolute_backfills_the_flow() {
    let config = LayoutConfig {
        placeholder_line_height: 10.0,
        ..LayoutConfig::default()
    };
    let mut container = Container::new(config);
    let _ = container.push(ChildEntry::block(20.0));
    let b = container.push(ChildEntry::block(30.0).with_margin(EdgeSizes {
        bottom: 10.0,
        ..EdgeSizes::default()
    }));
    let c = container.push(ChildEntry::block(20.0));
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    let before_b = rect(&container, b);
    let before_c = rect(&container, c);

    let transition = container.set_positioning(b, Positioning::Absolute).unwrap();
    assert_eq!(transition.fillers.len(), 4);
    assert_eq!(container.children().len(), 7);
    assert_eq!(transition.index, 5);
    assert_same_rect(rect(&container, b), before_b);
    assert_same_rect(rect(&container, c), before_c);

    let entry = container.children().get(b).unwrap();
    assert_eq!(entry.offsets, BoxOffsets::at(0.0, 20.0));
}

#[test]
fn test_relative_to_absolute_keeps_the_shifted_position() {
    let mut container = Container::default();
    let a = container.push(
        ChildEntry::fixed(40.0, 10.0)
            .with_positioning(Positioning::Relative)
            .with_offsets(BoxOffsets::at(5.0, 7.0)),
    );
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    let before = rect(&container, a);
    let transition = container.set_positioning(a, Positioning::Absolute).unwrap();
    assert!(!transition.fillers.is_empty());
    assert_same_rect(rect(&container, a), before);
}

#[test]
fn test_absolute_to_relative_keeps_position() {
    let mut container = Container::default();
    let _ = container.push(ChildEntry::block(20.0));
    let _ = container.push(ChildEntry::block(20.0));
    let x = container.push(
        ChildEntry::fixed(30.0, 10.0)
            .with_positioning(Positioning::Absolute)
            .with_offsets(BoxOffsets::at(40.0, 25.0)),
    );
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    let transition = container.set_positioning(x, Positioning::Relative).unwrap();
    assert_eq!(transition.index, 2);
    assert_same_rect(rect(&container, x), Rect::new(40.0, 25.0, 30.0, 10.0));
    assert_eq!(container.children().get(x).unwrap().offsets, BoxOffsets::at(40.0, -15.0));
}

#[test]
fn test_absolute_to_overlapped_resequences_after_anchor() {
    let mut container = Container::default();
    let x = container.push(
        ChildEntry::fixed(30.0, 10.0)
            .with_positioning(Positioning::Absolute)
            .with_offsets(BoxOffsets::at(10.0, 70.0)),
    );
    let _ = container.push(ChildEntry::block(50.0));
    let b = container.push(ChildEntry::block(50.0));
    let _ = container.push(ChildEntry::block(50.0));
    let _ = container.layout(Size::new(200.0, f64::INFINITY));

    let transition = container.set_positioning(x, Positioning::Overlapped).unwrap();
    // x was first; it now follows b, whose top is the last at or above y=70.
    assert_eq!(transition.index, 2);
    assert_eq!(container.children().index_of(b), Some(1));
    assert_same_rect(rect(&container, x), Rect::new(10.0, 70.0, 30.0, 10.0));
}

/// Helper: a 400px container with 10px placeholder lines, a 30px block,
/// then `entry`, then a 20px block.
fn lifted_scenario(entry: ChildEntry) -> (Container, ChildId, ChildId) {
    let config = LayoutConfig {
        placeholder_line_height: 10.0,
        ..LayoutConfig::default()
    };
    let mut container = Container::new(config);
    let _ = container.push(ChildEntry::block(30.0));
    let b = container.push(entry);
    let c = container.push(ChildEntry::block(20.0));
    let _ = container.layout(Size::new(400.0, f64::INFINITY));
    (container, b, c)
}

#[test]
fn test_static_to_overlapped_keeps_rect_and_flow() {
    let (mut container, b, c) = lifted_scenario(ChildEntry::block(40.0).with_margin(EdgeSizes {
        left: 20.0,
        right: 20.0,
        ..EdgeSizes::default()
    }));
    let before_b = rect(&container, b);
    let before_c = rect(&container, c);
    assert_same_rect(before_b, Rect::new(20.0, 30.0, 360.0, 40.0));

    let transition = container.set_positioning(b, Positioning::Overlapped).unwrap();
    assert_eq!(transition.fillers.len(), 4);
    let descriptor = transition.descriptor.expect("overlapped children get a descriptor");
    assert_eq!(descriptor.alignment, HorizontalAlignment::Center);

    // The first filler starts at b's old top, so it becomes the anchor.
    let first_filler = container.children().index_of(transition.fillers[0]).unwrap();
    assert_eq!(transition.index, first_filler + 1);

    let entry = container.children().get(b).unwrap();
    assert_eq!(entry.width, Some(360.0));
    assert_eq!(entry.height, Some(40.0));
    assert_same_rect(rect(&container, b), before_b);
    assert_same_rect(rect(&container, c), before_c);
}

#[test]
fn test_relative_to_overlapped_keeps_rect_and_flow() {
    let (mut container, b, c) = lifted_scenario(
        ChildEntry::block(40.0)
            .with_positioning(Positioning::Relative)
            .with_offsets(BoxOffsets::at(7.0, 3.0))
            .with_margin(EdgeSizes {
                top: 5.0,
                left: 10.0,
                right: 10.0,
                ..EdgeSizes::default()
            }),
    );
    let before_b = rect(&container, b);
    let before_c = rect(&container, c);
    assert_same_rect(before_b, Rect::new(17.0, 38.0, 380.0, 40.0));

    let transition = container.set_positioning(b, Positioning::Overlapped).unwrap();
    // 40px of content plus the 5px top margin, rounded up to whole lines.
    assert_eq!(transition.fillers.len(), 5);
    let descriptor = transition.descriptor.expect("overlapped children get a descriptor");
    assert_eq!(descriptor.alignment, HorizontalAlignment::Right);
    let first_filler = container.children().index_of(transition.fillers[0]).unwrap();
    assert_eq!(transition.index, first_filler + 1);

    assert_same_rect(rect(&container, b), before_b);

    // Fillers are whole lines, so what follows may sit lower by less than one.
    let after_c = rect(&container, c);
    let shift = after_c.y - before_c.y;
    assert!((0.0..10.0).contains(&shift), "c moved by {shift}");
    assert!((after_c.x - before_c.x).abs() < TOLERANCE);
    assert!((after_c.width - before_c.width).abs() < TOLERANCE);
}

#[test]
fn test_overlapped_to_relative_keeps_its_size() {
    let mut container = Container::default();
    let _ = container.push(ChildEntry::block(30.0));
    let o = container.push(
        ChildEntry::block(20.0)
            .with_positioning(Positioning::Overlapped)
            .with_offsets(BoxOffsets::at(0.0, 10.0))
            .with_margin(EdgeSizes {
                left: 50.0,
                ..EdgeSizes::default()
            }),
    );
    let _ = container.layout(Size::new(400.0, f64::INFINITY));
    assert_same_rect(rect(&container, o), Rect::new(0.0, 40.0, 400.0, 20.0));

    let _ = container.set_positioning(o, Positioning::Relative).unwrap();
    let entry = container.children().get(o).unwrap();
    assert_eq!(entry.width, Some(400.0));
    assert_eq!(entry.offsets, BoxOffsets::at(-50.0, 10.0));
    assert_same_rect(rect(&container, o), Rect::new(0.0, 40.0, 400.0, 20.0));
}

#[test]
fn test_overlapped_to_static_keeps_flow_by_default() {
    let mut container = Container::default();
    let _ = container.push(ChildEntry::block(20.0));
    let o = container.push(
        ChildEntry::fixed(40.0, 10.0)
            .with_positioning(Positioning::Overlapped)
            .with_offsets(BoxOffsets::at(30.0, 5.0)),
    );
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    let _ = container.set_positioning(o, Positioning::Static).unwrap();
    assert_same_rect(rect(&container, o), Rect::new(0.0, 20.0, 40.0, 10.0));
}

#[test]
fn test_overlapped_to_static_can_keep_horizontal_position() {
    let config = LayoutConfig {
        static_transition: StaticTransition::ApplyLeftMargin,
        ..LayoutConfig::default()
    };
    let mut container = Container::new(config);
    let _ = container.push(ChildEntry::block(20.0));
    let o = container.push(
        ChildEntry::fixed(40.0, 10.0)
            .with_positioning(Positioning::Overlapped)
            .with_offsets(BoxOffsets::at(30.0, 5.0)),
    );
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    let _ = container.set_positioning(o, Positioning::Static).unwrap();
    assert!((container.children().get(o).unwrap().margin.left - 30.0).abs() < TOLERANCE);
    assert_same_rect(rect(&container, o), Rect::new(30.0, 20.0, 40.0, 10.0));
}

#[test]
fn test_static_to_relative_does_not_move() {
    let mut container = Container::default();
    let a = container.push(ChildEntry::block(20.0).with_offsets(BoxOffsets::at(99.0, 99.0)));
    let _ = container.layout(Size::new(200.0, f64::INFINITY));
    let before = rect(&container, a);
    let transition = container.set_positioning(a, Positioning::Relative).unwrap();
    assert!(transition.fillers.is_empty());
    assert_same_rect(rect(&container, a), before);
}

#[test]
fn test_absolute_to_fixed_changes_mode_only() {
    let (mut container, _, b) = pinned_scenario();
    let offsets = container.children().get(b).unwrap().offsets;
    let _ = container.set_positioning(b, Positioning::Fixed).unwrap();
    let entry = container.children().get(b).unwrap();
    assert_eq!(entry.positioning, Positioning::Fixed);
    assert_eq!(entry.offsets, offsets);
    assert_same_rect(rect(&container, b), Rect::new(350.0, 10.0, 50.0, 20.0));
}

#[test]
fn test_same_mode_is_a_no_op() {
    let (mut container, _, b) = pinned_scenario();
    let passes = container.pass_count();
    let transition = container.set_positioning(b, Positioning::Absolute).unwrap();
    assert_eq!(transition.from, transition.to);
    assert_eq!(container.pass_count(), passes);
}

#[test]
fn test_history_replay_records_mode_only() {
    let mut container = Container::default();
    let _ = container.push(ChildEntry::block(20.0));
    let b = container.push(ChildEntry::block(30.0));
    let _ = container.layout(Size::new(200.0, f64::INFINITY));

    container.begin_history_replay(HistoryReplay::Undo);
    assert!(container.is_replaying_history());
    let transition = container.set_positioning(b, Positioning::Absolute).unwrap();
    container.end_history_replay();

    assert!(transition.replayed);
    assert!(transition.fillers.is_empty());
    assert_eq!(container.children().len(), 2);
    let entry = container.children().get(b).unwrap();
    assert_eq!(entry.positioning, Positioning::Absolute);
    assert_eq!(entry.offsets, BoxOffsets::default());
    assert!(container.is_dirty());
}

#[test]
fn test_transition_of_removed_child_is_not_found() {
    let (mut container, a, _) = pinned_scenario();
    let _ = container.remove(a).unwrap();
    assert_eq!(
        container.set_positioning(a, Positioning::Absolute).unwrap_err(),
        LayoutError::NotFound(a)
    );
}
