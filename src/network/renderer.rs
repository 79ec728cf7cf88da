use crate::config::Config;
use crate::data::index::IndexedDataset;
use crate::foundation::error::GitnetResult;
use crate::network::plan::{NetworkPlan, build_plan};
use crate::render::{DrawList, TiledSurface};
use crate::text::TextEngine;

/// The rendered network and the plan it was painted from.
#[derive(Clone, Debug)]
pub struct NetworkSurface {
    pub plan: NetworkPlan,
    pub surface: TiledSurface,
}

impl NetworkSurface {
    pub fn empty() -> Self {
        Self {
            plan: NetworkPlan::default(),
            surface: TiledSurface::empty(),
        }
    }

    pub fn width(&self) -> u32 {
        self.surface.width()
    }

    pub fn height(&self) -> u32 {
        self.surface.height()
    }
}

/// Paints the full network once per dataset or structural option change.
#[derive(Debug, Default)]
pub struct GraphRenderer;

impl GraphRenderer {
    /// Plan and rasterize the whole dataset. `None` yields an empty surface.
    #[tracing::instrument(skip(self, ds, cfg, text), fields(commits = ds.map_or(0, |d| d.commit_count())))]
    pub fn render_full(
        &self,
        ds: Option<&IndexedDataset>,
        cfg: &Config,
        text: &mut TextEngine,
    ) -> GitnetResult<NetworkSurface> {
        let Some(ds) = ds else {
            return Ok(NetworkSurface::empty());
        };

        let plan = build_plan(ds, cfg, text);
        let list = self.paint_plan(&plan, cfg, text);
        let mut surface = TiledSurface::new(plan.width, plan.height);
        surface.draw(&list)?;

        tracing::debug!(
            width = plan.width,
            height = plan.height,
            edges = plan.edges.len(),
            labels = plan.labels.len(),
            tiles = surface.tile_count(),
            "network rendered"
        );
        Ok(NetworkSurface { plan, surface })
    }

    /// Turn a plan into draw ops, keeping its paint order.
    pub fn paint_plan(&self, plan: &NetworkPlan, cfg: &Config, text: &mut TextEngine) -> DrawList {
        let mut list = DrawList::new();
        let line_width = cfg.network.line_width;

        for edge in &plan.edges {
            list.stroke_path(&edge.to_path(), line_width, edge.color);
            if let Some(arrow) = &edge.arrow {
                list.fill_path(&arrow.to_path(), arrow.color);
            }
        }

        for point in &plan.points {
            list.fill_circle(point.center, point.radius, point.color);
        }

        let style = &cfg.network.labels;
        for label in &plan.labels {
            list.set_transform(label.transform());
            list.fill_path(&label.metrics.bubble_path(), style.background);
            let shaped = text.shape(&label.text, &style.font);
            let anchor = label.metrics.text_anchor();
            list.text(
                &shaped,
                anchor + kurbo::Vec2::new(0.0, shaped.middle_baseline()),
            );
        }
        list.set_transform(kurbo::Affine::IDENTITY);

        list
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/renderer.rs"]
mod tests;
