use super::*;

/// 800x400 view over 100 commits and 3 lanes (surface 2525x300).
fn viewport() -> Viewport {
    let mut vp = Viewport::new(800, 400, &Config::default());
    vp.set_content(100, 3, 2525, 300);
    vp
}

#[test]
fn grid_excludes_axes() {
    let vp = viewport();
    assert_eq!(vp.grid_width(), 680.0);
    assert_eq!(vp.grid_height(), 360.0);

    let mut cfg = Config::default();
    cfg.x_axis.enabled = false;
    cfg.y_axis.enabled = false;
    let bare = Viewport::new(800, 400, &cfg);
    assert_eq!(bare.grid_width(), 800.0);
    assert_eq!(bare.grid_height(), 400.0);
}

#[test]
fn scroll_bounds_follow_surface() {
    let b = viewport().scroll_bounds();
    assert_eq!(b.top, 0.0);
    assert_eq!(b.bottom, 140.0);
    assert_eq!(b.left, 290.0);
    assert_eq!(b.right, -2185.0);
    // short surface: bounds cross and top wins
    assert_eq!(b.clamp_top(-50.0), 0.0);
    assert_eq!(b.clamp_left(1000.0), 290.0);
    assert_eq!(b.clamp_left(-9999.0), -2185.0);
}

#[test]
fn centering_on_focus_time() {
    let mut vp = viewport();
    vp.center_on_time(99.0);
    assert_eq!(vp.scroll_left(), -2160.0);
    vp.center_on_time(0.0);
    assert_eq!(vp.scroll_left(), 290.0f64.min(-(25.0 - 340.0)));
}

#[test]
fn visible_range_tracks_scroll() {
    let mut vp = viewport();
    vp.center_on_time(99.0);
    let r = vp.visible_range();
    assert_eq!((r.min_time, r.max_time), (86, 100));
    assert_eq!((r.min_lane, r.max_lane), (0, 3));

    vp.set_scroll(0.0, 100.0);
    let r = vp.visible_range();
    assert_eq!(r.min_time, 0);
    assert_eq!(r.max_time, 24);
}

#[test]
fn blit_clamps_right_and_bottom_overflow() {
    let mut vp = viewport();
    vp.center_on_time(99.0);
    let r = vp.blit_rects().unwrap();
    assert_eq!(r.src, PixelRect::new(2160, 0, 365, 300));
    assert_eq!(r.dst, PixelRect::new(120, 40, 365, 300));
}

#[test]
fn blit_shifts_destination_for_negative_source() {
    let mut vp = viewport();
    vp.set_scroll(0.0, 290.0);
    let r = vp.blit_rects().unwrap();
    assert_eq!(r.src, PixelRect::new(0, 0, 390, 300));
    assert_eq!(r.dst, PixelRect::new(410, 40, 390, 300));
}

#[test]
fn blit_stays_inside_view_with_fractional_axis() {
    let mut cfg = Config::default();
    cfg.y_axis.width = 120.5;
    let mut vp = Viewport::new(800, 400, &cfg);
    vp.set_content(100, 3, 2525, 300);
    vp.set_scroll(0.0, -1000.0);

    let r = vp.blit_rects().unwrap();
    assert_eq!(r.dst, PixelRect::new(121, 40, 679, 300));
    assert_eq!(r.src, PixelRect::new(1000, 0, 679, 300));
    assert!(r.dst.within(800, 400));
}

#[test]
fn blit_source_always_inside_surface() {
    let mut vp = viewport();
    for left in [-3000.0, -2185.0, -1000.0, 0.0, 290.0, 500.0] {
        for (w, h) in [(800, 400), (200, 100), (3000, 900)] {
            vp.resize(w, h);
            vp.set_scroll(0.0, left);
            if let Some(r) = vp.blit_rects() {
                assert_eq!((r.src.w, r.src.h), (r.dst.w, r.dst.h));
                assert!(r.src.within(2525, 300), "{r:?}");
                assert!(r.dst.within(i64::from(w), i64::from(h)), "{r:?}");
            }
        }
    }
}

#[test]
fn empty_content_blits_nothing() {
    let mut vp = Viewport::new(800, 400, &Config::default());
    vp.set_content(0, 0, 0, 0);
    assert!(vp.blit_rects().is_none());
    assert_eq!(vp.visible_range(), VisibleRange::default());
}

#[test]
fn view_and_surface_coordinates_invert() {
    let mut vp = viewport();
    vp.set_scroll(0.0, -500.0);
    let p = Point::new(263.0, 38.0);
    let v = vp.to_view(p);
    assert_eq!(v, Point::new(263.0 + 120.0 - 500.0, 38.0 + 40.0));
    assert_eq!(vp.to_surface(v), p);
}

#[test]
fn lane_to_top_is_clamped() {
    let mut vp = Viewport::new(800, 100, &Config::default());
    vp.set_content(10, 20, 275, 725);
    vp.lane_to_top(4);
    assert_eq!(vp.scroll_top(), -100.0);
    vp.lane_to_top(19);
    // bottom bound: -725 + 100 + 40
    assert_eq!(vp.scroll_top(), -585.0);
}

#[test]
fn resize_reclamps_scroll() {
    let mut vp = viewport();
    vp.set_scroll(0.0, -2185.0);
    vp.resize(400, 400);
    // right bound moves to -2525 + 140
    assert_eq!(vp.scroll_left(), -2185.0);
    vp.resize(2000, 400);
    assert_eq!(vp.scroll_left(), -2525.0 + 940.0);
}

#[test]
fn selection_accessors() {
    assert!(Selection::default().is_none());
    assert_eq!(Selection::Commit("a".into()).commit_id(), Some("a"));
    assert_eq!(Selection::Contributor("b".into()).contributor(), Some("b"));
    assert_eq!(Selection::Date(3).commit_id(), None);
}
