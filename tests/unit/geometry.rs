use super::*;

fn mapper() -> CoordinateMapper {
    CoordinateMapper::from_config(&Config::default())
}

#[test]
fn cell_centers_round_to_pixels() {
    let m = mapper();
    assert_eq!(m.to_pixel(0.0, 0.0), Point::new(13.0, 13.0));
    assert_eq!(m.to_pixel(2.0, 1.0), Point::new(63.0, 38.0));
    // 25 * (3 - 0.4 + 0.5) = 77.5 rounds up
    assert_eq!(m.to_pixel(2.6, 0.0).x, 78.0);
}

#[test]
fn cell_at_inverts_to_pixel() {
    let m = mapper();
    for (t, l) in [(0, 0), (5, 3), (40, 17)] {
        let p = m.to_pixel(t as f64, l as f64);
        assert_eq!(m.cell_at(p), (t, l));
    }
    assert_eq!(m.cell_at(Point::new(-1.0, 0.0)), (-1, 0));
}

#[test]
fn lane_colors_cycle_past_lane_zero() {
    let m = mapper();
    let palette = &Config::default().network.colors;
    assert_eq!(m.lane_color(0), palette[0]);
    assert_eq!(m.lane_color(1), palette[2]);
    for lane in 1..30 {
        assert_eq!(m.lane_color(lane), m.lane_color(lane + 20));
        assert_eq!(m.lane_color(lane), m.lane_color(lane + 40));
    }
}

#[test]
fn degenerate_palettes_fall_back() {
    let single = CoordinateMapper::new(CellSize { h: 1.0, v: 1.0 }, vec![ColorDef::rgba(1.0, 0.0, 0.0, 1.0)]);
    assert_eq!(single.lane_color(7), ColorDef::rgba(1.0, 0.0, 0.0, 1.0));
    let empty = CoordinateMapper::new(CellSize { h: 1.0, v: 1.0 }, Vec::new());
    assert_eq!(empty.lane_color(3).a, 1.0);
}

#[test]
fn rotation_about_pivot() {
    let origin = Point::new(10.0, 10.0);
    let p = rotate_point(Point::new(20.0, 10.0), std::f64::consts::FRAC_PI_2, origin);
    assert!((p.x - 10.0).abs() < 1e-9);
    assert!((p.y - 20.0).abs() < 1e-9);

    let pts = rotate_points(&[origin, Point::new(0.0, 10.0)], std::f64::consts::PI, origin);
    assert_eq!(pts[0], origin);
    assert!((pts[1].x - 20.0).abs() < 1e-9);
}
