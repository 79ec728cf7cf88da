//! Grid coordinates to pixels, lane colors and pivot rotation.
//!
//! Shared by the off-screen renderer and the viewport so both agree on where a commit sits.

use crate::config::{CellSize, Config};
use crate::foundation::color::ColorDef;
use crate::foundation::core::{Point, Vec2};
use crate::foundation::math::round_px;

/// Offset-agnostic (time, lane) to pixel mapping.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateMapper {
    cell: CellSize,
    palette: Vec<ColorDef>,
}

impl CoordinateMapper {
    pub fn new(cell: CellSize, palette: Vec<ColorDef>) -> Self {
        Self { cell, palette }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.cell, cfg.network.colors.clone())
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    /// Center of the cell at `(time, lane)`. Fractional inputs are allowed for edge routing.
    pub fn to_pixel(&self, time: f64, lane: f64) -> Point {
        Point::new(
            round_px((time + 0.5) * self.cell.h),
            round_px((lane + 0.5) * self.cell.v),
        )
    }

    /// Cell containing `p` (floor division). Negative coordinates give negative cells.
    pub fn cell_at(&self, p: Point) -> (i64, i64) {
        (
            (p.x / self.cell.h).floor() as i64,
            (p.y / self.cell.v).floor() as i64,
        )
    }

    /// Lane 0 owns palette entry 0; other lanes cycle through the rest.
    pub fn lane_color(&self, lane: u32) -> ColorDef {
        let Some(first) = self.palette.first() else {
            return ColorDef::rgba(0.0, 0.0, 0.0, 1.0);
        };
        let rest = self.palette.len() - 1;
        if lane == 0 || rest == 0 {
            return *first;
        }
        self.palette[1 + lane as usize % rest]
    }
}

/// Rotate `p` by `angle` radians about `origin`.
pub fn rotate_point(p: Point, angle: f64, origin: Point) -> Point {
    let (sin, cos) = angle.sin_cos();
    let d = p - origin;
    origin + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

pub fn rotate_points(points: &[Point], angle: f64, origin: Point) -> Vec<Point> {
    points
        .iter()
        .map(|&p| rotate_point(p, angle, origin))
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/geometry.rs"]
mod tests;
