use std::collections::HashMap;
use std::f64::consts::FRAC_PI_2;

use kurbo::Shape as _;

use crate::foundation::core::{Affine, BezPath, Point, Rect};

/// Per-commit running offsets so several labels on one commit stack instead of overlapping.
#[derive(Clone, Debug, Default)]
pub struct LabelStacker {
    offsets: HashMap<String, f64>,
}

impl LabelStacker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the offset for the next label on `commit_id`, then reserve `footprint` after it.
    pub fn place(&mut self, commit_id: &str, footprint: f64) -> f64 {
        let slot = self.offsets.entry(commit_id.to_string()).or_insert(0.0);
        let at = *slot;
        *slot += footprint;
        at
    }

    pub fn offset(&self, commit_id: &str) -> f64 {
        self.offsets.get(commit_id).copied().unwrap_or(0.0)
    }
}

/// Sizes a label bubble is built from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelMetrics {
    pub text_width: f64,
    pub font_size: f64,
    pub padding: f64,
    pub arrow_size: f64,
    pub line_width: f64,
    pub point_radius: f64,
}

impl LabelMetrics {
    /// Length the label occupies along the stacking direction.
    pub fn footprint(&self) -> f64 {
        self.text_width + self.arrow_size + self.padding * 2.0 + self.line_width
    }

    /// Speech-bubble outline in the label's local frame: nub at the origin, body along +x.
    pub fn bubble_path(&self) -> BezPath {
        let (w, h, p, a) = (
            self.text_width,
            self.font_size,
            self.padding,
            self.arrow_size,
        );
        let right = w + a + p * 2.0;
        let mut path = BezPath::new();
        path.move_to((0.0, 0.0));
        path.line_to((a, -a / 2.0));
        path.line_to((a, -h / 2.0));
        path.quad_to((a, -h / 2.0 - p), (a + p, -h / 2.0 - p));
        path.line_to((w + a + p, -h / 2.0 - p));
        path.quad_to((right, -h / 2.0 - p), (right, -h / 2.0));
        path.line_to((right, h / 2.0));
        path.quad_to((right, h / 2.0 + p), (w + a + p, h / 2.0 + p));
        path.line_to((a + p, h / 2.0 + p));
        path.quad_to((a, h / 2.0 + p), (a, h / 2.0));
        path.line_to((a, a / 2.0));
        path.close_path();
        path
    }

    /// Left end of the text, vertically centered on the local x axis.
    pub fn text_anchor(&self) -> Point {
        Point::new(self.arrow_size + self.padding, 0.0)
    }
}

/// A placed head label.
#[derive(Clone, Debug, PartialEq)]
pub struct LabelShape {
    pub commit_id: String,
    pub text: String,
    /// Point of the bubble's nub in surface coordinates.
    pub anchor: Point,
    pub stack_offset: f64,
    pub metrics: LabelMetrics,
}

impl LabelShape {
    /// Hang the label below the commit point at `point`, after `stack_offset` of earlier labels.
    pub fn new(
        commit_id: &str,
        text: &str,
        point: Point,
        stack_offset: f64,
        metrics: LabelMetrics,
    ) -> Self {
        Self {
            commit_id: commit_id.to_string(),
            text: text.to_string(),
            anchor: Point::new(
                point.x,
                point.y + stack_offset + metrics.point_radius + metrics.line_width,
            ),
            stack_offset,
            metrics,
        }
    }

    /// Local frame to surface: translate to the anchor, then turn a quarter so the body hangs down.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.anchor.to_vec2()) * Affine::rotate(FRAC_PI_2)
    }

    pub fn bounds(&self) -> Rect {
        self.transform()
            .transform_rect_bbox(self.metrics.bubble_path().bounding_box())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/labels.rs"]
mod tests;
