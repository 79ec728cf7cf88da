use super::*;

fn metrics(text_width: f64) -> LabelMetrics {
    LabelMetrics {
        text_width,
        font_size: 10.0,
        padding: 5.0,
        arrow_size: 8.0,
        line_width: 2.0,
        point_radius: 3.0,
    }
}

#[test]
fn stacker_accumulates_per_commit() {
    let mut s = LabelStacker::new();
    assert_eq!(s.place("c1", 30.0), 0.0);
    assert_eq!(s.place("c1", 12.0), 30.0);
    assert_eq!(s.place("c2", 5.0), 0.0);
    assert_eq!(s.offset("c1"), 42.0);
    assert_eq!(s.offset("missing"), 0.0);
}

#[test]
fn footprint_adds_arrow_padding_and_line() {
    assert_eq!(metrics(20.0).footprint(), 20.0 + 8.0 + 10.0 + 2.0);
}

#[test]
fn bubble_spans_text_plus_padding() {
    let m = metrics(20.0);
    let b = m.bubble_path().bounding_box();
    assert_eq!(b.x0, 0.0);
    assert_eq!(b.x1, 20.0 + 8.0 + 10.0);
    assert!((b.y0 + 10.0).abs() < 1e-9);
    assert!((b.y1 - 10.0).abs() < 1e-9);
    assert_eq!(m.text_anchor(), Point::new(13.0, 0.0));
}

#[test]
fn label_hangs_below_the_point() {
    let shape = LabelShape::new("c1", "master", Point::new(38.0, 13.0), 40.0, metrics(20.0));
    assert_eq!(shape.anchor, Point::new(38.0, 13.0 + 40.0 + 3.0 + 2.0));
    let nub = shape.transform() * Point::ZERO;
    assert_eq!(nub, shape.anchor);
    let b = shape.bounds();
    assert!((b.x0 - 28.0).abs() < 1e-9);
    assert!((b.x1 - 48.0).abs() < 1e-9);
    assert!((b.y0 - shape.anchor.y).abs() < 1e-9);
    assert!((b.y1 - (shape.anchor.y + 38.0)).abs() < 1e-9);
}
