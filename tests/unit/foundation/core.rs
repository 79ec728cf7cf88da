use super::*;

#[test]
fn pixel_rect_intersection_clips_to_overlap() {
    let a = PixelRect::new(-10, -5, 30, 20);
    let b = PixelRect::new(0, 0, 100, 100);
    assert_eq!(a.intersect(b), PixelRect::new(0, 0, 20, 15));

    let disjoint = PixelRect::new(200, 200, 5, 5).intersect(b);
    assert!(disjoint.is_empty());
}

#[test]
fn pixel_rect_within_bounds() {
    assert!(PixelRect::new(0, 0, 10, 10).within(10, 10));
    assert!(!PixelRect::new(-1, 0, 10, 10).within(10, 10));
    assert!(!PixelRect::new(1, 0, 10, 10).within(10, 10));
}

#[test]
fn straight_to_premul_rounds() {
    let c = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(c.to_array(), [128, 64, 0, 128]);
    assert_eq!(
        Rgba8Premul::from_straight_rgba(9, 9, 9, 0).to_array(),
        [0, 0, 0, 0]
    );
}
