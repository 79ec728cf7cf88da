use super::*;
use crate::foundation::color::ColorDef;
use crate::foundation::core::Rect;

const BLUE: ColorDef = ColorDef::rgba(0.0, 0.0, 1.0, 1.0);

/// Test fixture: frame with every pixel set to `color`, premultiplied.
impl FrameRGBA {
    fn filled(width: u32, height: u32, color: ColorDef) -> Self {
        let [r, g, b, a] = color.to_rgba8();
        let pm = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        let px = [pm(r), pm(g), pm(b), a];
        let mut frame = FrameRGBA::new(width, height);
        for chunk in frame.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        frame
    }
}

#[test]
fn surfaces_split_into_bounded_tiles() {
    let s = TiledSurface::new(TILE_SIZE * 2 + 10, 30);
    assert_eq!(s.tile_count(), 3);
    assert_eq!(s.width(), TILE_SIZE * 2 + 10);
    assert!(TiledSurface::empty().is_empty());
    assert!(TiledSurface::new(0, 10).is_empty());
}

#[test]
fn drawing_spans_tile_seams() {
    let mut s = TiledSurface::new(TILE_SIZE + 20, 10);
    let mut list = DrawList::new();
    let seam = f64::from(TILE_SIZE);
    list.fill_rect(Rect::new(seam - 4.0, 0.0, seam + 4.0, 10.0), BLUE);
    s.draw(&list).unwrap();
    assert_eq!(s.pixel(i64::from(TILE_SIZE) - 2, 5), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(i64::from(TILE_SIZE) + 2, 5), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(0, 5), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(-1, 5), None);
}

#[test]
fn blit_copies_across_tiles() {
    let mut s = TiledSurface::new(TILE_SIZE + 20, 10);
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(0.0, 0.0, f64::from(TILE_SIZE + 20), 10.0), BLUE);
    s.draw(&list).unwrap();

    let mut frame = FrameRGBA::new(40, 10);
    let src = PixelRect::new(i64::from(TILE_SIZE) - 10, 0, 20, 10);
    s.blit_over(&mut frame, src, 5, 0).unwrap();
    assert_eq!(frame.pixel(4, 3), Some([0, 0, 0, 0]));
    assert_eq!(frame.pixel(5, 3), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(24, 3), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(25, 3), Some([0, 0, 0, 0]));

    let outside = PixelRect::new(-1, 0, 5, 5);
    assert!(s.blit_over(&mut frame, outside, 0, 0).is_err());
}

#[test]
fn frames_draw_over_existing_content() {
    let mut frame = FrameRGBA::filled(4, 4, ColorDef::rgba(1.0, 1.0, 1.0, 1.0));
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(0.0, 0.0, 2.0, 4.0), BLUE);
    frame.draw(&list).unwrap();
    assert_eq!(frame.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(3, 0), Some([255, 255, 255, 255]));
}

#[test]
fn regions_round_trip_through_put() {
    let mut frame = FrameRGBA::new(6, 6);
    let patch = FrameRGBA::filled(2, 2, BLUE);
    frame.put_region(4, 4, &patch);
    frame.put_region(5, 5, &patch);
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 255, 255]));
    let r = frame.region(PixelRect::new(4, 4, 10, 10));
    assert_eq!((r.width, r.height), (2, 2));
    assert_eq!(r.pixel(1, 1), Some([0, 0, 255, 255]));
}

#[test]
fn straight_alpha_export_unpremultiplies() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 0, 0, 128],
    };
    assert_eq!(frame.to_straight_rgba(), vec![128, 0, 0, 128]);
}

#[test]
fn flattened_surface_matches_tiles() {
    let mut s = TiledSurface::new(12, 8);
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(4.0, 0.0, 8.0, 8.0), BLUE);
    s.draw(&list).unwrap();
    let flat = s.to_frame();
    assert_eq!(flat.pixel(5, 5), s.pixel(5, 5));
    assert_eq!(flat.pixel(0, 0), Some([0, 0, 0, 0]));
}

#[test]
fn region_draws_leave_outside_pixels_alone() {
    let mut frame = FrameRGBA::filled(8, 8, ColorDef::rgba(1.0, 1.0, 1.0, 1.0));
    let mut list = DrawList::new();
    list.fill_rect(Rect::new(0.0, 0.0, 8.0, 8.0), BLUE);
    frame
        .draw_region(PixelRect::new(2, 2, 3, 3), &list)
        .unwrap();
    assert_eq!(frame.pixel(2, 2), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(4, 4), Some([0, 0, 255, 255]));
    assert_eq!(frame.pixel(5, 5), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(1, 2), Some([255, 255, 255, 255]));
}
