//! Axes, grid bands, title and borders painted around the network blit.
//!
//! Everything here is rebuilt every frame from the viewport state; nothing is cached.

use chrono::Datelike as _;

use crate::config::{Config, FontSpec};
use crate::data::index::{IndexedDataset, parse_calendar_date};
use crate::data::model::Block;
use crate::foundation::color::ColorDef;
use crate::foundation::core::{Point, Rect};
use crate::foundation::math::round_px;
use crate::geometry::CoordinateMapper;
use crate::render::DrawList;
use crate::text::TextEngine;
use crate::view::interaction::title_visible;
use crate::view::viewport::{Selection, Viewport};

/// Horizontal room kept free on each side of ellipsized axis text.
const TEXT_PADDING: f64 = 10.0;

/// Per-frame view of the state the chrome depends on.
#[derive(Clone, Copy, Debug)]
pub struct Chrome<'a> {
    pub viewport: &'a Viewport,
    pub data: Option<&'a IndexedDataset>,
    pub cfg: &'a Config,
    pub selection: &'a Selection,
}

impl<'a> Chrome<'a> {
    /// Layers painted before the blit: grid bands, contributor axis, date axis, title box.
    pub fn background(&self, text: &mut TextEngine) -> DrawList {
        let mut list = DrawList::new();
        self.grid(&mut list);
        self.y_axis(&mut list, text);
        self.x_axis(&mut list, text);
        self.title(&mut list, text);
        list
    }

    /// Layers painted after the blit: active date guide, active commit marker, borders.
    pub fn foreground(&self) -> DrawList {
        let mut list = DrawList::new();
        self.date_guide(&mut list);
        self.active_commit(&mut list);
        self.borders(&mut list);
        list
    }

    /// Blocks with at least one lane in the visible lane range, with their dataset position.
    fn visible_blocks(&self) -> Vec<(usize, &'a Block)> {
        let Some(ds) = self.data else {
            return Vec::new();
        };
        let range = self.viewport.visible_range();
        let lane_count = ds.lane_count();
        ds.blocks()
            .iter()
            .enumerate()
            .filter(|(_, b)| b.count > 0 && b.start < lane_count)
            .filter(|(_, b)| {
                b.start <= range.max_lane && b.end() >= i64::from(range.min_lane)
            })
            .collect()
    }

    fn band_top(&self, block: &Block) -> f64 {
        round_px(
            f64::from(block.start) * self.viewport.cell().v
                + self.viewport.scroll_top()
                + self.viewport.x_axis_height(),
        )
    }

    fn band_color(&self, index: usize, block: &Block, bands: &[ColorDef], active: ColorDef) -> ColorDef {
        if self.selection.contributor() == Some(block.name.as_str()) {
            return active;
        }
        bands
            .get(index % bands.len().max(1))
            .copied()
            .unwrap_or(active)
    }

    fn grid(&self, list: &mut DrawList) {
        let style = &self.cfg.grid;
        if !style.enabled {
            return;
        }
        let x0 = self.viewport.y_axis_width();
        let x1 = f64::from(self.viewport.width());
        let off = style.border.width / 2.0;

        for (i, block) in self.visible_blocks() {
            let y = self.band_top(block);
            let h = f64::from(block.count) * self.viewport.cell().v;
            let color = self.band_color(i, block, &style.background, style.background_active);
            list.fill_rect(Rect::new(x0, y, x1, y + h), color);
            if style.border.width > 0.0 {
                list.line(
                    Point::new(x0, y + h - off),
                    Point::new(x1, y + h - off),
                    style.border.width,
                    style.border.color,
                );
            }
        }
    }

    fn y_axis(&self, list: &mut DrawList, text: &mut TextEngine) {
        let style = &self.cfg.y_axis;
        if !style.enabled {
            return;
        }
        let w = self.viewport.y_axis_width();
        let off = style.border.width / 2.0;

        for (i, block) in self.visible_blocks() {
            let y = self.band_top(block);
            let h = f64::from(block.count) * self.viewport.cell().v;
            let color = self.band_color(i, block, &style.background, style.background_active);
            list.fill_rect(Rect::new(0.0, y, w, y + h), color);

            if style.names.enabled {
                let name = text.ellipsize(&block.name, &style.font, w - 2.0 * TEXT_PADDING);
                centered_text(list, text, &name, &style.font, Point::new(w / 2.0, y + h / 2.0));
            }

            if style.border.width > 0.0 {
                list.line(
                    Point::new(0.0, y + h - off),
                    Point::new(w, y + h - off),
                    style.border.width,
                    style.border.color,
                );
            }
        }
    }

    fn x_axis(&self, list: &mut DrawList, text: &mut TextEngine) {
        let style = &self.cfg.x_axis;
        if !style.enabled {
            return;
        }
        let vp = self.viewport;
        let yw = vp.y_axis_width();
        let xh = vp.x_axis_height();
        list.fill_rect(
            Rect::new(yw, 0.0, f64::from(vp.width()), xh),
            style.background,
        );

        let Some(ds) = self.data else {
            return;
        };
        if !style.days.enabled && !style.ticks.enabled {
            return;
        }

        let range = vp.visible_range();
        let cell_h = vp.cell().h;
        let mut x = round_px((f64::from(range.min_time) + 0.5) * cell_h + vp.scroll_left() + yw);
        let bold = style.font.bold();
        let tick_top = xh - style.ticks.height;
        let mut current = None;

        for t in range.min_time..range.max_time {
            let date = ds
                .dates()
                .get(t as usize)
                .and_then(|raw| parse_calendar_date(raw));
            if let Some(date) = date
                && current != Some(date)
            {
                if style.days.enabled {
                    if let Some(prev) = current
                        && (prev.month(), prev.year()) != (date.month(), date.year())
                    {
                        let label = month_label(self.cfg, date);
                        let shaped = text.shape(&label, &bold);
                        list.text(&shaped, Point::new(x - 5.0, 5.0 + shaped.ascent));
                    }

                    let day = format!("{:02}", date.day());
                    let shaped = text.shape(&day, &style.font);
                    let cx = x - style.font.size * 0.1;
                    list.text(
                        &shaped,
                        Point::new(cx - shaped.width / 2.0, tick_top - shaped.descent),
                    );
                }

                if style.ticks.enabled {
                    let tx = x - style.ticks.width / 2.0;
                    list.line(
                        Point::new(tx, tick_top),
                        Point::new(tx, xh),
                        style.ticks.width,
                        style.ticks.color,
                    );
                }
                current = Some(date);
            }
            x += cell_h;
        }
    }

    fn title(&self, list: &mut DrawList, text: &mut TextEngine) {
        let cfg = self.cfg;
        if !cfg.x_axis.enabled || !cfg.y_axis.enabled {
            return;
        }
        let w = self.viewport.y_axis_width();
        let h = self.viewport.x_axis_height();
        list.fill_rect(Rect::new(0.0, 0.0, w, h), cfg.title.background);

        if title_visible(cfg) {
            let title = text.ellipsize(&cfg.title.text, &cfg.title.font, w - 2.0 * TEXT_PADDING);
            centered_text(list, text, &title, &cfg.title.font, Point::new(w / 2.0, h / 2.0));
        }
    }

    fn date_guide(&self, list: &mut DrawList) {
        let Selection::Date(t) = *self.selection else {
            return;
        };
        let vp = self.viewport;
        let mapper = CoordinateMapper::from_config(self.cfg);
        let x = vp.to_view(mapper.to_pixel(f64::from(t), 0.0)).x;
        let guide = &self.cfg.guide;
        list.line(
            Point::new(x, vp.x_axis_height()),
            Point::new(x, f64::from(vp.height())),
            guide.width,
            guide.color,
        );
    }

    fn active_commit(&self, list: &mut DrawList) {
        let (Some(ds), Some(id)) = (self.data, self.selection.commit_id()) else {
            return;
        };
        let Some(commit) = ds.commit(id).filter(|c| c.lane < ds.lane_count()) else {
            return;
        };
        let mapper = CoordinateMapper::from_config(self.cfg);
        let pos = self
            .viewport
            .to_view(mapper.to_pixel(f64::from(commit.time), f64::from(commit.lane)));
        list.fill_circle(
            pos,
            self.cfg.network.point_radius * 2.0,
            mapper.lane_color(commit.lane),
        );
    }

    fn borders(&self, list: &mut DrawList) {
        let border = &self.cfg.border;
        if border.width <= 0.0 {
            return;
        }
        let vp = self.viewport;
        let (w, h) = (f64::from(vp.width()), f64::from(vp.height()));
        let off = border.width / 2.0;

        list.stroke_rect(Rect::new(off, off, w - off, h - off), border.width, border.color);

        let yw = vp.y_axis_width();
        if yw > 0.0 {
            list.line(
                Point::new(yw - off, 0.0),
                Point::new(yw - off, h),
                border.width,
                border.color,
            );
        }
        let xh = vp.x_axis_height();
        if xh > 0.0 {
            list.line(
                Point::new(0.0, xh - off),
                Point::new(w, xh - off),
                border.width,
                border.color,
            );
        }
    }
}

/// `Mon' YY` from the configured short month names.
pub fn month_label(cfg: &Config, date: chrono::NaiveDate) -> String {
    let month = cfg
        .lang
        .short_months
        .get(date.month0() as usize)
        .cloned()
        .unwrap_or_else(|| format!("{:02}", date.month()));
    format!("{month}' {:02}", date.year().rem_euclid(100))
}

fn centered_text(
    list: &mut DrawList,
    text: &mut TextEngine,
    s: &str,
    font: &FontSpec,
    center: Point,
) {
    if s.is_empty() {
        return;
    }
    let shaped = text.shape(s, font);
    list.text(
        &shaped,
        Point::new(
            center.x - shaped.width / 2.0,
            center.y + shaped.middle_baseline(),
        ),
    );
}

#[cfg(test)]
#[path = "../../tests/unit/view/chrome.rs"]
mod tests;
