//! Integration tests for absolute ⇄ flow-relative coordinate mapping.

use quickcheck::TestResult;
use quickcheck_macros::quickcheck;
use quill_layout::{
    BoxOffsets, ChildEntry, Container, CoordinateMapper, EdgeSizes, FloatSide, FlowDescriptor,
    HorizontalAlignment, LayoutConfig, Point, Positioning, Rect, Size, Visibility,
};

const TOLERANCE: f64 = 1e-6;

fn laid_out(mut container: Container, width: f64) -> Container {
    let _ = container.layout(Size::new(width, f64::INFINITY));
    container
}

/// Helper: three stacked blocks of height 50 with 10px bottom margins.
fn three_blocks() -> Container {
    let mut container = Container::default();
    for _ in 0..3 {
        let _ = container.push(ChildEntry::block(50.0).with_margin(EdgeSizes {
            bottom: 10.0,
            ..EdgeSizes::default()
        }));
    }
    laid_out(container, 400.0)
}

// ---------------------------------------------------------------------------
// Alignment inference
// ---------------------------------------------------------------------------

#[test]
fn test_alignment_picks_nearest_edge() {
    let content = Rect::new(0.0, 0.0, 300.0, 100.0);
    let align = |x, width| CoordinateMapper::compute_horizontal_alignment(Rect::new(x, 0.0, width, 10.0), content, 300.0);
    assert_eq!(align(10.0, 50.0), HorizontalAlignment::Left);
    assert_eq!(align(120.0, 60.0), HorizontalAlignment::Center);
    assert_eq!(align(240.0, 50.0), HorizontalAlignment::Right);
}

#[test]
fn test_alignment_ties_prefer_left_then_center() {
    let content = Rect::new(0.0, 0.0, 300.0, 100.0);
    // Left and center both 50 away.
    let left_center = Rect::new(50.0, 0.0, 100.0, 10.0);
    assert_eq!(
        CoordinateMapper::compute_horizontal_alignment(left_center, content, 300.0),
        HorizontalAlignment::Left
    );
    // Center and right both 50 away.
    let center_right = Rect::new(150.0, 0.0, 100.0, 10.0);
    assert_eq!(
        CoordinateMapper::compute_horizontal_alignment(center_right, content, 300.0),
        HorizontalAlignment::Center
    );
}

#[test]
fn test_clipped_rect_is_left_aligned() {
    let content = Rect::new(0.0, 0.0, 300.0, 100.0);
    // Nearest to center, but sticks out past the right edge.
    let clipped = Rect::new(80.0, 0.0, 280.0, 10.0);
    assert_eq!(
        CoordinateMapper::compute_horizontal_alignment(clipped, content, 300.0),
        HorizontalAlignment::Left
    );
}

// ---------------------------------------------------------------------------
// Anchor search
// ---------------------------------------------------------------------------

#[test]
fn test_preceding_child_is_last_top_at_or_above() {
    let container = three_blocks();
    let mapper = container.mapper();
    assert_eq!(mapper.preceding_static_child_from_point(0.0, None), Some(0));
    assert_eq!(mapper.preceding_static_child_from_point(59.9, None), Some(0));
    assert_eq!(mapper.preceding_static_child_from_point(60.0, None), Some(1));
    assert_eq!(mapper.preceding_static_child_from_point(1000.0, None), Some(2));
    assert_eq!(mapper.preceding_static_child_from_point(-1.0, None), None);
}

#[test]
fn test_preceding_child_skips_collapsed_floated_and_lifted() {
    let mut container = Container::default();
    let _ = container.push(ChildEntry::block(20.0));
    let mut collapsed = ChildEntry::block(20.0);
    collapsed.visibility = Visibility::Collapsed;
    let _ = container.push(collapsed);
    let _ = container.push(ChildEntry::fixed(10.0, 10.0).with_float(FloatSide::Left));
    let _ = container.push(
        ChildEntry::fixed(10.0, 10.0)
            .with_positioning(Positioning::Absolute)
            .with_offsets(BoxOffsets::at(0.0, 50.0)),
    );
    let container = laid_out(container, 200.0);
    assert_eq!(container.mapper().preceding_static_child_from_point(100.0, None), Some(0));
}

#[test]
fn test_excluded_child_never_anchors_itself() {
    let container = three_blocks();
    let last = container.children().id_at(2).unwrap();
    let mapper = container.mapper();
    assert_eq!(mapper.preceding_static_child_from_point(130.0, Some(last)), Some(1));
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

#[test]
fn test_to_relative_without_anchor_uses_padding_origin() {
    let config = LayoutConfig {
        padding: EdgeSizes::uniform(8.0),
        ..LayoutConfig::default()
    };
    let container = laid_out(Container::new(config), 300.0);
    let descriptor = container.mapper().to_relative(Rect::new(20.0, 30.0, 10.0, 10.0), None);
    assert_eq!(descriptor.preceding_index, 0);
    assert_eq!(descriptor.alignment, HorizontalAlignment::Left);
    assert!((descriptor.offset.x - 12.0).abs() < TOLERANCE);
    assert!((descriptor.offset.y - 22.0).abs() < TOLERANCE);
}

#[test]
fn test_to_relative_accounts_for_anchor_margins() {
    let mut container = Container::default();
    let _ = container.push(ChildEntry::block(40.0).with_margin(EdgeSizes {
        left: 15.0,
        bottom: 5.0,
        ..EdgeSizes::default()
    }));
    let container = laid_out(container, 400.0);
    let descriptor = container.mapper().to_relative(Rect::new(30.0, 60.0, 20.0, 10.0), None);
    assert_eq!(descriptor.preceding_index, 1);
    assert_eq!(descriptor.alignment, HorizontalAlignment::Left);
    // Anchor origin is (15, 45).
    assert!((descriptor.offset.x - 15.0).abs() < TOLERANCE);
    assert!((descriptor.offset.y - 15.0).abs() < TOLERANCE);
}

#[test]
fn test_to_absolute_inverts_right_aligned_descriptor() {
    let container = three_blocks();
    let descriptor = FlowDescriptor {
        preceding_index: 2,
        offset: Point::new(-10.0, 5.0),
        alignment: HorizontalAlignment::Right,
    };
    let point = container.mapper().to_absolute(&descriptor, Size::new(40.0, 10.0), None);
    // Anchor is child 1: bottom 110 + margin 10.
    assert!((point.x - 350.0).abs() < TOLERANCE);
    assert!((point.y - 125.0).abs() < TOLERANCE);
}

#[test]
fn test_round_trip_with_clipped_rect() {
    let container = three_blocks();
    let rect = Rect::new(390.0, 70.0, 30.0, 10.0);
    let mapper = container.mapper();
    let descriptor = mapper.to_relative(rect, None);
    assert_eq!(descriptor.alignment, HorizontalAlignment::Left);
    let back = mapper.to_absolute(&descriptor, rect.size(), None);
    assert!((back.x - rect.x).abs() < TOLERANCE && (back.y - rect.y).abs() < TOLERANCE);
}

#[quickcheck]
fn prop_to_absolute_inverts_to_relative(
    heights: Vec<(u8, u8, u8)>,
    width: u16,
    padding: u8,
    rect: (u16, u16, u8, u8),
) -> TestResult {
    if heights.len() > 40 {
        return TestResult::discard();
    }
    let width = f64::from(width % 800) + 20.0;
    let config = LayoutConfig {
        padding: EdgeSizes::uniform(f64::from(padding % 20)),
        ..LayoutConfig::default()
    };
    let mut container = Container::new(config);
    for (height, top, bottom) in heights {
        let _ = container.push(ChildEntry::block(f64::from(height)).with_margin(EdgeSizes {
            top: f64::from(top % 30),
            bottom: f64::from(bottom % 30),
            left: f64::from(top % 7),
            ..EdgeSizes::default()
        }));
    }
    let container = laid_out(container, width);
    let height = container.snapshot().desired_size.height.max(1.0);

    let (x, y, w, h) = rect;
    let rect = Rect::new(
        f64::from(x) % width,
        f64::from(y) % height,
        f64::from(w) + 1.0,
        f64::from(h) + 1.0,
    );
    let mapper = container.mapper();
    let descriptor = mapper.to_relative(rect, None);
    let back = mapper.to_absolute(&descriptor, rect.size(), None);
    TestResult::from_bool((back.x - rect.x).abs() < TOLERANCE && (back.y - rect.y).abs() < TOLERANCE)
}
