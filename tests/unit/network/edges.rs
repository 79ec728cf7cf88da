use super::*;
use crate::config::Config;
use crate::test_support::commit;

fn setup() -> (CoordinateMapper, EdgeMetrics) {
    let cfg = Config::default();
    (
        CoordinateMapper::from_config(&cfg),
        EdgeMetrics {
            line_width: cfg.network.line_width,
            point_radius: cfg.network.point_radius,
        },
    )
}

#[test]
fn same_lane_primary_parent_is_direct() {
    let (m, metrics) = setup();
    let c = commit("c1", 1, 0, &[(0, 0)]);
    let e = route(&m, metrics, &c, &c.parents[0], 0);
    assert_eq!(e.kind, EdgeKind::Direct);
    assert_eq!(e.points, vec![Point::new(13.0, 13.0), Point::new(38.0, 13.0)]);
    assert_eq!(e.color, m.lane_color(0));
    assert!(e.arrow.is_none());
}

#[test]
fn branch_elbows_into_commit_lane() {
    let (m, metrics) = setup();
    let c = commit("c1", 1, 1, &[(0, 0)]);
    let e = route(&m, metrics, &c, &c.parents[0], 0);
    assert_eq!(e.kind, EdgeKind::Branch);
    // pull-back is lineWidth * 2 + pointRadius = 7
    assert_eq!(
        e.points,
        vec![
            Point::new(13.0, 13.0),
            Point::new(13.0, 38.0),
            Point::new(31.0, 38.0)
        ]
    );
    assert_eq!(e.color, m.lane_color(1));
    let a = e.arrow.unwrap();
    assert_eq!(a.angle, 0.0);
    assert_eq!(a.tip(), Point::new(33.0, 38.0));
    assert!(a.points[1].distance(Point::new(27.4, 41.5)) < 1e-9);
    assert!(a.points[2].distance(Point::new(27.4, 34.5)) < 1e-9);
    assert_eq!(a.color, e.color);
}

#[test]
fn merge_from_lower_lane_uses_parent_color() {
    let (m, metrics) = setup();
    let c = commit("c2", 2, 0, &[(0, 0), (1, 1)]);
    let e = route(&m, metrics, &c, &c.parents[1], 1);
    assert_eq!(e.kind, EdgeKind::Merge);
    assert_eq!(e.color, m.lane_color(1));
    assert_ne!(e.color, m.lane_color(0));
    assert_eq!(e.points.len(), 4);
    assert_eq!(e.points[1], m.to_pixel(1.6, 1.0));
    assert_eq!(e.points[2], m.to_pixel(1.6, 0.6));

    let target = m.to_pixel(2.0, 0.0);
    let a = e.arrow.unwrap();
    assert!(a.angle != 0.0);
    assert!(a.angle < 0.0, "approach from below points upward");
    // last vertex sits pull-back pixels from the target along the approach
    assert!((e.points[3].distance(target) - metrics.pull_back()).abs() < 1e-9);
    assert!((a.tip().distance(target) - 5.0).abs() < 1e-9);
}

#[test]
fn merge_from_upper_lane_drops_before_commit_lane() {
    let (m, metrics) = setup();
    let c = commit("c3", 3, 2, &[(2, 2), (0, 0)]);
    let e = route(&m, metrics, &c, &c.parents[1], 1);
    assert_eq!(e.points[1], m.to_pixel(0.0, 1.4));
    assert_eq!(e.points[2], m.to_pixel(2.6, 1.4));
    assert_eq!(e.color, m.lane_color(0));
    assert!(e.arrow.unwrap().angle > 0.0);
}

#[test]
fn secondary_parent_on_same_lane_still_merges() {
    let c = commit("c3", 3, 1, &[(2, 1), (1, 1)]);
    assert_eq!(classify(&c, &c.parents[1], 1), EdgeKind::Merge);
    assert_eq!(classify(&c, &c.parents[0], 0), EdgeKind::Direct);
}

#[test]
fn arrow_path_is_closed_triangle() {
    let (_, metrics) = setup();
    let a = arrow(metrics, Point::new(50.0, 50.0), 0.0, ColorDef::rgba(0.0, 0.0, 0.0, 1.0));
    assert_eq!(a.to_path().elements().len(), 4);
}
