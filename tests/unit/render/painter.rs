use super::*;

const RED: ColorDef = ColorDef::rgba(1.0, 0.0, 0.0, 1.0);

#[test]
fn fill_rect_records_device_bounds() {
    let mut list = DrawList::new();
    list.set_transform(Affine::translate((10.0, 5.0)));
    list.fill_rect(Rect::new(0.0, 0.0, 4.0, 3.0), RED);
    assert_eq!(list.len(), 1);
    assert_eq!(list.ops()[0].bounds, Rect::new(10.0, 5.0, 14.0, 8.0));
    assert!(list.touches(PixelRect::new(12, 6, 1, 1)));
    assert!(!list.touches(PixelRect::new(20, 20, 5, 5)));
}

#[test]
fn degenerate_shapes_are_skipped() {
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(0.0, 0.0, 0.0, 3.0), RED);
    list.fill_circle(Point::new(1.0, 1.0), 0.0, RED);
    list.line(Point::ZERO, Point::new(5.0, 0.0), 0.0, RED);
    list.fill_rect(Rect::new(0.0, 0.0, 3.0, 3.0), ColorDef::rgba(1.0, 0.0, 0.0, 0.0));
    assert!(list.is_empty());
}

#[test]
fn stroke_outlines_cover_the_line_width() {
    let mut list = DrawList::new();
    list.line(Point::new(0.0, 10.0), Point::new(20.0, 10.0), 4.0, RED);
    let b = list.ops()[0].bounds;
    assert!((b.y0 - 8.0).abs() < 1e-6);
    assert!((b.y1 - 12.0).abs() < 1e-6);
    assert!((b.x0 - 0.0).abs() < 1e-6);
    assert!((b.x1 - 20.0).abs() < 1e-6);
}

#[test]
fn text_without_font_draws_nothing() {
    let mut engine = crate::text::TextEngine::new(crate::text::FontSource::None);
    let shaped = engine.shape("label", &crate::config::FontSpec::default());
    let mut list = DrawList::new();
    list.text(&shaped, Point::new(5.0, 5.0));
    assert!(list.is_empty());
}

#[test]
fn image_paint_checks_sizes() {
    assert!(ImagePaint::from_premul(&[0; 16], 2, 2).is_ok());
    assert!(ImagePaint::from_premul(&[0; 12], 2, 2).is_err());
}

#[test]
fn rasterized_rect_covers_its_pixels() {
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(2.0, 2.0, 6.0, 6.0), RED);
    let pixmap = rasterize_ops(list.ops(), PixelRect::new(0, 0, 8, 8), 8, 8);
    let data = pixmap.data_as_u8_slice();
    let px = |x: usize, y: usize| &data[(y * 8 + x) * 4..(y * 8 + x) * 4 + 4];
    assert_eq!(px(3, 3), [255, 0, 0, 255]);
    assert_eq!(px(0, 0), [0, 0, 0, 0]);
    assert_eq!(px(7, 7), [0, 0, 0, 0]);
}
