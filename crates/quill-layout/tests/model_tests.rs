//! Tests for the child data model and its persisted forms.

use quill_layout::box_model::{offset_from_nan, offset_to_nan};
use quill_layout::{BoxOffsets, ColorValue, Positioning};

#[test]
fn test_nan_marks_unset_offsets() {
    assert_eq!(offset_from_nan(f64::NAN), None);
    assert_eq!(offset_from_nan(12.5), Some(12.5));
    assert!(offset_to_nan(None).is_nan());
    assert!((offset_to_nan(Some(-3.0)) + 3.0).abs() < f64::EPSILON);
}

#[test]
fn test_offsets_survive_persistence() {
    let offsets = BoxOffsets::from_persisted(10.0, f64::NAN, 0.0, f64::NAN);
    assert_eq!(
        offsets,
        BoxOffsets {
            left: Some(10.0),
            top: None,
            right: Some(0.0),
            bottom: None,
        }
    );

    let persisted = offsets.to_persisted();
    assert!((persisted[0] - 10.0).abs() < f64::EPSILON);
    assert!(persisted[1].is_nan());
    assert!(persisted[2].abs() < f64::EPSILON);
    assert!(persisted[3].is_nan());
}

#[test]
fn test_positioning_classification() {
    assert!(Positioning::Static.occupies_flow());
    assert!(Positioning::Relative.occupies_flow());
    assert!(!Positioning::Overlapped.occupies_flow());
    assert!(!Positioning::Overlapped.is_out_of_flow());
    assert!(Positioning::Absolute.uses_absolute_coordinates());
    assert!(Positioning::Fixed.uses_absolute_coordinates());
    assert!(!Positioning::Relative.uses_absolute_coordinates());
}

#[test]
fn test_color_parsing() {
    assert_eq!(ColorValue::parse("#fff"), Some(ColorValue::WHITE));
    assert_eq!(ColorValue::parse(" Red "), Some(ColorValue::rgb(255, 0, 0)));
    assert_eq!(ColorValue::parse("336699"), Some(ColorValue::rgb(0x33, 0x66, 0x99)));
    assert_eq!(ColorValue::parse("#12345"), None);
    assert_eq!(ColorValue::parse("#ééé"), None);
    assert!(ColorValue::TRANSPARENT.is_transparent());
}
