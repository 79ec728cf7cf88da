use crate::config::{CellSize, Config};
use crate::foundation::core::{PixelRect, Point};
use crate::foundation::math::round_px;

/// What the pointer currently highlights. At most one target is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    None,
    Commit(String),
    Contributor(String),
    /// Time index whose date column is hovered.
    Date(u32),
    /// The title box in the axis corner.
    Title,
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    pub fn commit_id(&self) -> Option<&str> {
        match self {
            Self::Commit(id) => Some(id),
            _ => None,
        }
    }

    pub fn contributor(&self) -> Option<&str> {
        match self {
            Self::Contributor(name) => Some(name),
            _ => None,
        }
    }
}

/// Allowed scroll offsets. `top`/`left` are the maxima, `bottom`/`right` the minima.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollBounds {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl ScrollBounds {
    /// Clamp into range; the maximum wins when the bounds cross.
    pub fn clamp_top(&self, v: f64) -> f64 {
        v.max(self.bottom).min(self.top)
    }

    pub fn clamp_left(&self, v: f64) -> f64 {
        v.max(self.right).min(self.left)
    }
}

/// Visible grid cells. `max_time` is exclusive; `max_lane` is an inclusive upper lane for hit
/// testing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct VisibleRange {
    pub min_time: u32,
    pub max_time: u32,
    pub min_lane: u32,
    pub max_lane: u32,
}

/// Clamped copy from the off-screen surface into the view. Both rects have the same size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlitRects {
    pub src: PixelRect,
    pub dst: PixelRect,
}

/// Scroll state and the derived geometry of the visible window.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    x_axis_height: f64,
    y_axis_width: f64,
    cell: CellSize,
    commit_count: usize,
    lane_count: u32,
    surface_width: f64,
    surface_height: f64,
    scroll_top: f64,
    scroll_left: f64,
}

impl Viewport {
    pub fn new(width: u32, height: u32, cfg: &Config) -> Self {
        Self {
            width: f64::from(width),
            height: f64::from(height),
            x_axis_height: cfg.x_axis_height(),
            y_axis_width: cfg.y_axis_width(),
            cell: cfg.cell,
            commit_count: 0,
            lane_count: 0,
            surface_width: 0.0,
            surface_height: 0.0,
            scroll_top: 0.0,
            scroll_left: 0.0,
        }
    }

    /// Pick up axis and cell sizes from new options, keeping the scroll position.
    pub fn configure(&mut self, cfg: &Config) {
        self.x_axis_height = cfg.x_axis_height();
        self.y_axis_width = cfg.y_axis_width();
        self.cell = cfg.cell;
        self.clamp_scroll();
    }

    /// Describe the content behind the view.
    pub fn set_content(
        &mut self,
        commit_count: usize,
        lane_count: u32,
        surface_width: u32,
        surface_height: u32,
    ) {
        self.commit_count = commit_count;
        self.lane_count = lane_count;
        self.surface_width = f64::from(surface_width);
        self.surface_height = f64::from(surface_height);
        self.clamp_scroll();
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = f64::from(width);
        self.height = f64::from(height);
        self.clamp_scroll();
    }

    pub fn width(&self) -> u32 {
        self.width as u32
    }

    pub fn height(&self) -> u32 {
        self.height as u32
    }

    pub fn x_axis_height(&self) -> f64 {
        self.x_axis_height
    }

    pub fn y_axis_width(&self) -> f64 {
        self.y_axis_width
    }

    pub fn cell(&self) -> CellSize {
        self.cell
    }

    pub fn grid_width(&self) -> f64 {
        self.width - self.y_axis_width
    }

    pub fn grid_height(&self) -> f64 {
        self.height - self.x_axis_height
    }

    pub fn scroll_top(&self) -> f64 {
        self.scroll_top
    }

    pub fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    pub fn scroll_bounds(&self) -> ScrollBounds {
        ScrollBounds {
            top: 0.0,
            bottom: -self.surface_height + self.height + self.x_axis_height,
            left: self.grid_width() / 2.0 - 2.0 * self.cell.h,
            right: -self.surface_width + self.grid_width() / 2.0,
        }
    }

    pub fn set_scroll(&mut self, top: f64, left: f64) {
        let b = self.scroll_bounds();
        self.scroll_top = b.clamp_top(top);
        self.scroll_left = b.clamp_left(left);
    }

    pub fn scroll_by(&mut self, dx: f64, dy: f64) {
        self.set_scroll(self.scroll_top + dy, self.scroll_left + dx);
    }

    fn clamp_scroll(&mut self) {
        self.set_scroll(self.scroll_top, self.scroll_left);
    }

    /// Horizontal scroll that centers column `time` in the grid.
    pub fn center_on_time(&mut self, time: f64) {
        let left = -round_px((time + 1.0) * self.cell.h - self.grid_width() / 2.0);
        self.set_scroll(self.scroll_top, left);
    }

    /// Vertical scroll that puts `lane` at the top of the grid.
    pub fn lane_to_top(&mut self, lane: u32) {
        let top = -(f64::from(lane) * self.cell.v);
        self.set_scroll(top, self.scroll_left);
    }

    pub fn visible_range(&self) -> VisibleRange {
        let to_u32 = |v: f64| v.max(0.0) as u32;
        let min_time = to_u32((-self.scroll_left / self.cell.h).floor());
        let max_time = ((-self.scroll_left + self.grid_width()) / self.cell.h)
            .ceil()
            .min(self.commit_count as f64);
        let min_lane = to_u32((-self.scroll_top / self.cell.v).floor());
        let max_lane = ((-self.scroll_top + self.grid_height()) / self.cell.v)
            .ceil()
            .min(f64::from(self.lane_count));
        VisibleRange {
            min_time,
            max_time: to_u32(max_time),
            min_lane,
            max_lane: to_u32(max_lane),
        }
    }

    /// Surface pixel to view pixel.
    pub fn to_view(&self, p: Point) -> Point {
        Point::new(
            p.x + self.y_axis_width + self.scroll_left,
            p.y + self.x_axis_height + self.scroll_top,
        )
    }

    /// View pixel to surface pixel.
    pub fn to_surface(&self, p: Point) -> Point {
        Point::new(
            p.x - self.y_axis_width - self.scroll_left,
            p.y - self.x_axis_height - self.scroll_top,
        )
    }

    /// Source and destination of the network blit, or `None` when nothing is visible.
    pub fn blit_rects(&self) -> Option<BlitRects> {
        let surface_w = self.surface_width as i64;
        let surface_h = self.surface_height as i64;
        let (mut sx, mut dx, mut w) = (
            round_px(-self.scroll_left) as i64,
            round_px(self.y_axis_width) as i64,
            round_px(self.grid_width()) as i64,
        );
        let (mut sy, mut dy, mut h) = (
            round_px(-self.scroll_top) as i64,
            round_px(self.x_axis_height) as i64,
            round_px(self.grid_height()) as i64,
        );

        if sx < 0 {
            w += sx;
            dx -= sx;
            sx = 0;
        }
        if sx + w > surface_w {
            w = surface_w - sx;
        }
        if sy < 0 {
            h += sy;
            dy -= sy;
            sy = 0;
        }
        if sy + h > surface_h {
            h = surface_h - sy;
        }
        // rounding a fractional axis size can push the destination one pixel past the view
        w = w.min(self.width as i64 - dx);
        h = h.min(self.height as i64 - dy);

        if w <= 0 || h <= 0 {
            return None;
        }
        Some(BlitRects {
            src: PixelRect::new(sx, sy, w, h),
            dst: PixelRect::new(dx, dy, w, h),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/viewport.rs"]
mod tests;
