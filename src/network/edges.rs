use crate::data::model::{Commit, ParentRef};
use crate::foundation::color::ColorDef;
use crate::foundation::core::{BezPath, Point};
use crate::geometry::{CoordinateMapper, rotate_point, rotate_points};

/// How a parent edge is routed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Primary parent on the same lane: one straight segment.
    Direct,
    /// Primary parent on another lane: elbow down into the commit's lane.
    Branch,
    /// Secondary parent: elbow that approaches the commit at an angle.
    Merge,
}

/// Filled triangle at the end of a branch or merge edge.
#[derive(Clone, Debug, PartialEq)]
pub struct Arrow {
    /// Tip, then the two back corners.
    pub points: [Point; 3],
    pub angle: f64,
    pub color: ColorDef,
}

impl Arrow {
    pub fn tip(&self) -> Point {
        self.points[0]
    }

    pub fn to_path(&self) -> BezPath {
        polyline(&self.points, true)
    }
}

/// A routed, stroked edge.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeShape {
    pub kind: EdgeKind,
    pub commit_id: String,
    /// Parent's position in the commit's parent list.
    pub parent_index: usize,
    pub points: Vec<Point>,
    pub color: ColorDef,
    pub arrow: Option<Arrow>,
}

impl EdgeShape {
    pub fn to_path(&self) -> BezPath {
        polyline(&self.points, false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeMetrics {
    pub line_width: f64,
    pub point_radius: f64,
}

impl EdgeMetrics {
    /// Horizontal pull-back of the last vertex so the line stops before the point marker.
    pub fn pull_back(&self) -> f64 {
        self.line_width * 2.0 + self.point_radius
    }
}

pub fn classify(commit: &Commit, parent: &ParentRef, parent_index: usize) -> EdgeKind {
    match (parent_index, parent.lane == commit.lane) {
        (0, true) => EdgeKind::Direct,
        (0, false) => EdgeKind::Branch,
        _ => EdgeKind::Merge,
    }
}

/// Route the edge from `parent` into `commit`.
pub fn route(
    mapper: &CoordinateMapper,
    metrics: EdgeMetrics,
    commit: &Commit,
    parent: &ParentRef,
    parent_index: usize,
) -> EdgeShape {
    let kind = classify(commit, parent, parent_index);
    let (ct, cl) = (f64::from(commit.time), f64::from(commit.lane));
    let (pt, pl) = (f64::from(parent.time), f64::from(parent.lane));
    let from = mapper.to_pixel(pt, pl);
    let target = mapper.to_pixel(ct, cl);
    let offset = metrics.pull_back();

    let (points, color, arrow) = match kind {
        EdgeKind::Direct => (vec![from, target], mapper.lane_color(commit.lane), None),
        EdgeKind::Branch => {
            let color = mapper.lane_color(commit.lane);
            let points = vec![
                from,
                mapper.to_pixel(pt, cl),
                Point::new(target.x - offset, target.y),
            ];
            (points, color, Some(arrow(metrics, target, 0.0, color)))
        }
        EdgeKind::Merge => {
            let (elbow, approach) = if commit.lane < parent.lane {
                (
                    mapper.to_pixel(ct - 0.4, pl),
                    mapper.to_pixel(ct - 0.4, cl + 0.6),
                )
            } else {
                (
                    mapper.to_pixel(pt, cl - 0.6),
                    mapper.to_pixel(ct - 0.4, cl - 0.6),
                )
            };
            let angle = (target.y - approach.y).atan2(target.x - approach.x);
            let end = rotate_point(Point::new(target.x - offset, target.y), angle, target);
            let color = mapper.lane_color(parent.lane);
            (
                vec![from, elbow, approach, end],
                color,
                Some(arrow(metrics, target, angle, color)),
            )
        }
    };

    EdgeShape {
        kind,
        commit_id: commit.id.clone(),
        parent_index,
        points,
        color,
        arrow,
    }
}

/// Arrowhead pointing at `target` along `angle`; the tip stays clear of the point marker.
pub fn arrow(metrics: EdgeMetrics, target: Point, angle: f64, color: ColorDef) -> Arrow {
    let EdgeMetrics {
        line_width: l,
        point_radius: r,
    } = metrics;
    let back = target.x - l * 3.8 - r;
    let pts = [
        Point::new(target.x - l - r, target.y),
        Point::new(back, target.y + l * 1.75),
        Point::new(back, target.y - l * 1.75),
    ];
    let points = if angle != 0.0 {
        let rotated = rotate_points(&pts, angle, target);
        [rotated[0], rotated[1], rotated[2]]
    } else {
        pts
    };
    Arrow {
        points,
        angle,
        color,
    }
}

fn polyline(points: &[Point], closed: bool) -> BezPath {
    let mut path = BezPath::new();
    for (i, &p) in points.iter().enumerate() {
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    if closed {
        path.close_path();
    }
    path
}

#[cfg(test)]
#[path = "../../tests/unit/network/edges.rs"]
mod tests;
