//! Tests for BoundingBox serde and overlap operations.

use frame_common::bbox::BoundingBox;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
    assert_eq!(bbox.width(), 360.0);
    assert_eq!(bbox.height(), 180.0);
}

// ============================================================================
// Serde tests
// ============================================================================

#[test]
fn test_deserialize_2d_and_3d() {
    let flat: BoundingBox = serde_json::from_str("[0, 1, 2, 3]").unwrap();
    assert_eq!(flat, BoundingBox::new(0.0, 1.0, 2.0, 3.0));

    let with_z: BoundingBox = serde_json::from_str("[0, 1, -5, 2, 3, 5]").unwrap();
    assert_eq!(with_z, flat);

    assert!(serde_json::from_str::<BoundingBox>("[0, 1, 2]").is_err());
}

#[test]
fn test_serialize_as_flat_array() {
    let bbox = BoundingBox::new(-124.0, 45.0, -121.0, 47.5);
    assert_eq!(
        serde_json::to_string(&bbox).unwrap(),
        "[-124.0,45.0,-121.0,47.5]"
    );
}

// ============================================================================
// Overlap tests
// ============================================================================

#[test]
fn test_overlap_and_union() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(5.0, 5.0, 15.0, 15.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
    assert_eq!(a.union(&b), BoundingBox::new(0.0, 0.0, 15.0, 15.0));
}

#[test]
fn test_touching_boxes_do_not_intersect() {
    let a = BoundingBox::new(0.0, 0.0, 10.0, 10.0);
    let b = BoundingBox::new(10.0, 0.0, 20.0, 10.0);
    assert!(!a.intersects(&b));
}

#[test]
fn test_contained_box_intersects() {
    let outer = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    let inner = BoundingBox::new(-124.0, 45.0, -121.0, 47.5);
    assert!(outer.intersects(&inner));
    assert!(inner.intersects(&outer));
}
