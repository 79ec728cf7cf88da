//! Pointer state machine: drag to scroll, hover to select, release to follow a link.

use crate::config::Config;
use crate::data::index::IndexedDataset;
use crate::foundation::core::Point;
use crate::geometry::CoordinateMapper;
use crate::host::{LinkVars, render_link};
use crate::view::viewport::{Selection, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        last: Point,
    },
}

/// Outcome of a pointer release.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PointerUp {
    /// URL to open, if the release landed on a linked target.
    pub navigate: Option<String>,
    pub redraw: bool,
}

/// Owns the drag state and the active selection.
#[derive(Clone, Debug, Default)]
pub struct InteractionController {
    drag: DragState,
    selection: Selection,
}

impl InteractionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Drop the selection; returns whether there was one.
    pub fn clear_selection(&mut self) -> bool {
        !std::mem::take(&mut self.selection).is_none()
    }

    pub fn pointer_down(&mut self, p: Point) {
        self.drag = DragState::Dragging { last: p };
    }

    /// Scroll while dragging, hit test otherwise. Returns whether a redraw is needed.
    pub fn pointer_move(
        &mut self,
        p: Point,
        viewport: &mut Viewport,
        ds: Option<&IndexedDataset>,
        cfg: &Config,
    ) -> bool {
        if let DragState::Dragging { last } = self.drag {
            viewport.scroll_by(p.x - last.x, p.y - last.y);
            self.drag = DragState::Dragging { last: p };
            self.selection = Selection::None;
            return true;
        }

        let hit = hit_test(p, viewport, ds, cfg);
        if hit == self.selection {
            return false;
        }
        self.selection = hit;
        true
    }

    /// Follow the link of the active commit, contributor or title, then clear it.
    pub fn pointer_up(&mut self, ds: Option<&IndexedDataset>, cfg: &Config) -> PointerUp {
        self.drag = DragState::Idle;

        let repository = cfg.repository.as_deref();
        let navigate = match &self.selection {
            Selection::Commit(id) => ds.and_then(|ds| {
                let commit = ds.commit(id)?;
                let vars = LinkVars {
                    user: ds.user_for_lane(commit.lane),
                    commit: Some(commit),
                    repository,
                };
                Some(render_link(&cfg.network.link, &vars))
            }),
            Selection::Contributor(name) => ds.and_then(|ds| {
                let vars = LinkVars {
                    user: Some(ds.user(name)?),
                    commit: None,
                    repository,
                };
                Some(render_link(&cfg.y_axis.link, &vars))
            }),
            Selection::Title => Some(render_link(
                &cfg.title.link,
                &LinkVars {
                    repository,
                    ..LinkVars::default()
                },
            )),
            Selection::Date(_) | Selection::None => {
                return PointerUp::default();
            }
        };

        self.selection = Selection::None;
        PointerUp {
            navigate,
            redraw: true,
        }
    }

    /// Pointer left the view: stop dragging and drop the hover.
    pub fn pointer_leave(&mut self) -> bool {
        self.drag = DragState::Idle;
        self.clear_selection()
    }
}

/// What sits under view pixel `p`, in order commit, contributor, date, title.
pub fn hit_test(
    p: Point,
    viewport: &Viewport,
    ds: Option<&IndexedDataset>,
    cfg: &Config,
) -> Selection {
    let yw = viewport.y_axis_width();
    let xh = viewport.x_axis_height();
    let in_grid = p.x >= yw && p.y >= xh;

    if let Some(ds) = ds {
        let range = viewport.visible_range();
        let mapper = CoordinateMapper::from_config(cfg);

        if in_grid {
            let r = 2.0 * cfg.network.point_radius;
            let hit = ds
                .commits_in_time_range(range.min_time, range.max_time)
                .iter()
                .filter(|c| c.lane < ds.lane_count())
                .filter(|c| c.lane >= range.min_lane && c.lane <= range.max_lane)
                .find(|c| {
                    let pos =
                        viewport.to_view(mapper.to_pixel(f64::from(c.time), f64::from(c.lane)));
                    (pos.x - p.x).abs() <= r && (pos.y - p.y).abs() <= r
                });
            if let Some(c) = hit {
                return Selection::Commit(c.id.clone());
            }
        }

        let (col, row) = mapper.cell_at(viewport.to_surface(p));

        if yw > 0.0 && p.x <= yw && p.y >= xh {
            let block = u32::try_from(row)
                .ok()
                .filter(|&lane| lane < ds.lane_count())
                .and_then(|lane| ds.block_for_lane(lane));
            if let Some(block) = block {
                return Selection::Contributor(block.name.clone());
            }
        }

        if p.y < xh && p.x > yw {
            let time = u32::try_from(col)
                .ok()
                .filter(|&t| t >= range.min_time && t < range.max_time);
            if let Some(t) = time {
                return Selection::Date(t);
            }
        }
    }

    if title_visible(cfg) && cfg.repository.is_some() && p.x < yw && p.y < xh {
        return Selection::Title;
    }
    Selection::None
}

/// The title box needs both axes to have a corner to sit in.
pub(crate) fn title_visible(cfg: &Config) -> bool {
    cfg.title.enabled && cfg.x_axis.enabled && cfg.y_axis.enabled
}

#[cfg(test)]
#[path = "../../tests/unit/view/interaction.rs"]
mod tests;
