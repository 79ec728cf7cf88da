use crate::config::Config;
use crate::data::index::IndexedDataset;
use crate::foundation::color::ColorDef;
use crate::foundation::core::Point;
use crate::geometry::CoordinateMapper;
use crate::network::edges::{EdgeMetrics, EdgeShape, route};
use crate::network::labels::{LabelMetrics, LabelShape, LabelStacker};
use crate::text::TextEngine;

/// Filled commit marker.
#[derive(Clone, Debug, PartialEq)]
pub struct PointMarker {
    pub commit_id: String,
    pub center: Point,
    pub radius: f64,
    pub color: ColorDef,
}

/// Everything drawn on the off-screen surface, in paint order: edges, points, labels.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NetworkPlan {
    pub width: u32,
    pub height: u32,
    pub edges: Vec<EdgeShape>,
    pub points: Vec<PointMarker>,
    pub labels: Vec<LabelShape>,
}

impl NetworkPlan {
    pub fn edges_into<'a>(&'a self, commit_id: &'a str) -> impl Iterator<Item = &'a EdgeShape> {
        self.edges.iter().filter(move |e| e.commit_id == commit_id)
    }

    pub fn labels_on<'a>(&'a self, commit_id: &'a str) -> impl Iterator<Item = &'a LabelShape> {
        self.labels.iter().filter(move |l| l.commit_id == commit_id)
    }
}

/// Off-screen surface size: one spare column and row plus room for labels below the last lane.
pub fn surface_size(commit_count: usize, lane_count: u32, cfg: &Config) -> (u32, u32) {
    let w = (commit_count as f64 + 1.0) * cfg.cell.h;
    let h = (f64::from(lane_count) + 1.0) * cfg.cell.v + cfg.label_margin;
    (w.ceil().max(0.0) as u32, h.ceil().max(0.0) as u32)
}

/// Lay out the whole network.
pub fn build_plan(ds: &IndexedDataset, cfg: &Config, text: &mut TextEngine) -> NetworkPlan {
    let mapper = CoordinateMapper::from_config(cfg);
    let lane_count = ds.lane_count();
    let (width, height) = surface_size(ds.commit_count(), lane_count, cfg);
    let metrics = EdgeMetrics {
        line_width: cfg.network.line_width,
        point_radius: cfg.network.point_radius,
    };

    let drawn = || ds.commits().iter().filter(|c| c.lane < lane_count);

    let mut edges = Vec::new();
    for commit in drawn() {
        for (i, parent) in commit.parents.iter().enumerate() {
            if parent.lane >= lane_count {
                continue;
            }
            edges.push(route(&mapper, metrics, commit, parent, i));
        }
    }

    let points = drawn()
        .map(|c| PointMarker {
            commit_id: c.id.clone(),
            center: mapper.to_pixel(f64::from(c.time), f64::from(c.lane)),
            radius: cfg.network.point_radius,
            color: mapper.lane_color(c.lane),
        })
        .collect();

    let labels = if cfg.network.labels.enabled {
        place_labels(ds, cfg, &mapper, text)
    } else {
        Vec::new()
    };

    NetworkPlan {
        width,
        height,
        edges,
        points,
        labels,
    }
}

fn place_labels(
    ds: &IndexedDataset,
    cfg: &Config,
    mapper: &CoordinateMapper,
    text: &mut TextEngine,
) -> Vec<LabelShape> {
    let style = &cfg.network.labels;
    let mut stacker = LabelStacker::new();
    let mut out = Vec::new();

    for (i, user) in ds.users().iter().enumerate() {
        if let Some(block) = ds.block(&user.name) {
            for head in &user.heads {
                let Some(commit) = ds.commit(&head.commit_id) else {
                    continue;
                };
                // heads below the owner's first lane are inherited from another contributor
                if commit.lane < block.start {
                    continue;
                }
                let metrics = LabelMetrics {
                    text_width: text.measure(&head.label, &style.font),
                    font_size: style.font.size,
                    padding: style.padding,
                    arrow_size: style.arrow_size,
                    line_width: cfg.network.line_width,
                    point_radius: cfg.network.point_radius,
                };
                let offset = stacker.place(&commit.id, metrics.footprint());
                let point = mapper.to_pixel(f64::from(commit.time), f64::from(commit.lane));
                out.push(LabelShape::new(
                    &commit.id,
                    &head.label,
                    point,
                    offset,
                    metrics,
                ));
            }
        }

        if cfg.only_primary_contributor && i == 0 {
            break;
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/network/plan.rs"]
mod tests;
