//! The host-facing view: owns the dataset, the off-screen network surface and the visible frame.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::Config;
use crate::data::index::IndexedDataset;
use crate::data::model::Dataset;
use crate::foundation::core::Point;
use crate::foundation::error::{GitnetError, GitnetResult};
use crate::geometry::CoordinateMapper;
use crate::host::{AvatarImage, Host, ImageRequest, ImageTicket};
use crate::network::{GraphRenderer, NetworkSurface};
use crate::render::{DrawList, FrameRGBA, ImagePaint};
use crate::text::{FontSource, TextEngine};
use crate::view::chrome::Chrome;
use crate::view::focus::{FocusCommit, FocusLane};
use crate::view::interaction::InteractionController;
use crate::view::scheduler::FrameScheduler;
use crate::view::tooltip::TooltipLayout;
use crate::view::viewport::{Selection, Viewport};

#[derive(Clone, Debug)]
struct PendingImage {
    ticket: ImageTicket,
    url: String,
}

/// Avatar requests in flight and the images received so far, keyed by URL.
#[derive(Debug, Default)]
struct Avatars {
    next_ticket: u64,
    /// Avatar of the current tooltip target.
    current: Option<PendingImage>,
    placeholder: Option<PendingImage>,
    cache: HashMap<String, ImagePaint>,
}

impl Avatars {
    fn issue(&mut self, url: &str) -> ImageRequest {
        self.next_ticket += 1;
        ImageRequest {
            url: url.to_string(),
            ticket: ImageTicket(self.next_ticket),
        }
    }
}

/// Interactive commit network view.
///
/// Events mutate state synchronously and schedule a repaint; the host delivers frames through
/// [`NetworkView::on_frame`] and reads the result from [`NetworkView::frame`].
pub struct NetworkView<H: Host> {
    cfg: Config,
    host: H,
    text: TextEngine,
    renderer: GraphRenderer,
    data: Option<IndexedDataset>,
    network: NetworkSurface,
    viewport: Viewport,
    interaction: InteractionController,
    scheduler: FrameScheduler,
    frame: FrameRGBA,
    tooltip: Option<TooltipLayout>,
    avatars: Avatars,
}

impl<H: Host> std::fmt::Debug for NetworkView<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkView")
            .field("viewport", &self.viewport)
            .field("selection", self.interaction.selection())
            .field("commits", &self.data.as_ref().map_or(0, |d| d.commit_count()))
            .finish_non_exhaustive()
    }
}

impl<H: Host> NetworkView<H> {
    /// Empty view of `width x height` pixels. The first frame is requested right away.
    pub fn new(cfg: Config, width: u32, height: u32, host: H) -> GitnetResult<Self> {
        cfg.validate()?;
        let text = TextEngine::new(FontSource::from_config(&cfg.fonts));
        let viewport = Viewport::new(width, height, &cfg);
        let mut view = Self {
            cfg,
            host,
            text,
            renderer: GraphRenderer,
            data: None,
            network: NetworkSurface::empty(),
            viewport,
            interaction: InteractionController::new(),
            scheduler: FrameScheduler::new(),
            frame: FrameRGBA::new(width, height),
            tooltip: None,
            avatars: Avatars::default(),
        };
        view.request_redraw();
        Ok(view)
    }

    /// Replace the text engine, e.g. to pin fonts in headless runs.
    pub fn with_text_engine(mut self, text: TextEngine) -> GitnetResult<Self> {
        self.text = text;
        self.rerender()?;
        Ok(self)
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn data(&self) -> Option<&IndexedDataset> {
        self.data.as_ref()
    }

    pub fn network(&self) -> &NetworkSurface {
        &self.network
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn selection(&self) -> &Selection {
        self.interaction.selection()
    }

    /// Last composed frame, premultiplied RGBA8.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    pub fn tooltip(&self) -> Option<&TooltipLayout> {
        self.tooltip.as_ref()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Install a dataset (or clear with `None`), render the full network and reset the scroll to
    /// the dataset's focus time.
    #[tracing::instrument(skip(self, data), fields(commits = data.as_ref().map_or(0, |d| d.commits.len())))]
    pub fn set_data(&mut self, data: Option<Dataset>) -> GitnetResult<()> {
        self.data = data.map(|ds| {
            IndexedDataset::new(Arc::new(ds), self.cfg.only_primary_contributor)
        });
        self.interaction.clear_selection();
        self.avatars.current = None;
        self.avatars.placeholder = None;
        self.rerender()?;

        self.viewport.set_scroll(0.0, 0.0);
        if let Some(ds) = &self.data {
            self.viewport.center_on_time(f64::from(ds.focus_time()));
            self.request_placeholder();
        }
        self.request_redraw();
        Ok(())
    }

    /// Merge option overrides. The network is re-rendered only when a structural option changed.
    pub fn set_options(&mut self, overrides: &serde_json::Value) -> GitnetResult<()> {
        let next = self.cfg.merged(overrides)?;
        let rerender = self.cfg.affects_network(&next);
        let reindex = self.cfg.only_primary_contributor != next.only_primary_contributor;
        let fonts_changed = self.cfg.fonts != next.fonts;
        let placeholder_changed = self.cfg.tooltip.default_gravatar != next.tooltip.default_gravatar;
        self.cfg = next;

        if fonts_changed {
            self.text = TextEngine::new(FontSource::from_config(&self.cfg.fonts));
        }
        if reindex && let Some(ds) = &self.data {
            self.data = Some(IndexedDataset::new(
                ds.shared(),
                self.cfg.only_primary_contributor,
            ));
            self.interaction.clear_selection();
        }
        self.viewport.configure(&self.cfg);
        if rerender {
            self.rerender()?;
        }
        if placeholder_changed && self.data.is_some() {
            self.request_placeholder();
        }
        self.request_redraw();
        Ok(())
    }

    fn rerender(&mut self) -> GitnetResult<()> {
        self.network = self
            .renderer
            .render_full(self.data.as_ref(), &self.cfg, &mut self.text)?;
        let (commits, lanes) = self
            .data
            .as_ref()
            .map_or((0, 0), |d| (d.commit_count(), d.lane_count()));
        self.viewport
            .set_content(commits, lanes, self.network.width(), self.network.height());
        Ok(())
    }

    /// New visible size. Never re-renders the network.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
        self.frame = FrameRGBA::new(width, height);
        self.request_redraw();
    }

    /// Container size notification; honored only with `autoResize`.
    pub fn container_resized(&mut self, width: u32, height: u32) -> bool {
        if !self.cfg.auto_resize {
            return false;
        }
        self.resize(width, height);
        true
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.interaction.pointer_down(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        let redraw = self.interaction.pointer_move(
            Point::new(x, y),
            &mut self.viewport,
            self.data.as_ref(),
            &self.cfg,
        );
        if redraw {
            self.selection_changed();
            self.request_redraw();
        }
    }

    pub fn pointer_up(&mut self) {
        let up = self.interaction.pointer_up(self.data.as_ref(), &self.cfg);
        if let Some(url) = up.navigate {
            tracing::debug!(url = %url, "navigate");
            self.host.navigate(&url);
        }
        if up.redraw {
            self.selection_changed();
            self.request_redraw();
        }
    }

    pub fn pointer_leave(&mut self) {
        if self.interaction.pointer_leave() {
            self.selection_changed();
            self.request_redraw();
        }
    }

    /// Scroll so `target`'s lane sits at the top of the grid.
    pub fn focus_on_lane(&mut self, target: &FocusLane) -> GitnetResult<()> {
        let ds = self
            .data
            .as_ref()
            .ok_or_else(|| GitnetError::invalid_target("no dataset loaded"))?;
        let lane = target.resolve(ds)?;
        self.viewport.lane_to_top(lane);
        self.request_redraw();
        Ok(())
    }

    /// Center the grid horizontally on `target`.
    pub fn focus_on_commit(&mut self, target: &FocusCommit) -> GitnetResult<()> {
        let ds = self
            .data
            .as_ref()
            .ok_or_else(|| GitnetError::invalid_target("no dataset loaded"))?;
        let time = target.resolve(ds)?;
        self.viewport.center_on_time(time);
        self.request_redraw();
        Ok(())
    }

    /// Host frame callback. Repaints once if anything changed since the last frame.
    pub fn on_frame(&mut self) -> GitnetResult<bool> {
        if !self.scheduler.begin_frame() {
            return Ok(false);
        }
        self.compose_frame()?;
        Ok(true)
    }

    /// Paint background chrome, the network blit, foreground chrome and the tooltip.
    #[tracing::instrument(skip(self), fields(width = self.viewport.width(), height = self.viewport.height()))]
    pub fn compose_frame(&mut self) -> GitnetResult<()> {
        let mut frame = FrameRGBA::new(self.viewport.width(), self.viewport.height());
        let selection = self.interaction.selection().clone();
        let chrome = Chrome {
            viewport: &self.viewport,
            data: self.data.as_ref(),
            cfg: &self.cfg,
            selection: &selection,
        };

        frame.draw(&chrome.background(&mut self.text))?;
        if let Some(blit) = self.viewport.blit_rects() {
            self.network
                .surface
                .blit_over(&mut frame, blit.src, blit.dst.x, blit.dst.y)?;
        }
        frame.draw(&chrome.foreground())?;

        self.tooltip = self.layout_tooltip(&selection);
        if let Some(tooltip) = &self.tooltip {
            let mut list = DrawList::new();
            tooltip.paint(&mut list, &self.cfg.tooltip, self.avatar_for(&selection));
            frame.draw(&list)?;
        }

        self.frame = frame;
        Ok(())
    }

    /// Completion of an avatar request. Returns whether the frame was touched.
    pub fn image_loaded(
        &mut self,
        ticket: ImageTicket,
        result: Result<AvatarImage, String>,
    ) -> GitnetResult<bool> {
        let pending = [&mut self.avatars.current, &mut self.avatars.placeholder]
            .into_iter()
            .find(|slot| slot.as_ref().is_some_and(|p| p.ticket == ticket))
            .and_then(Option::take);
        let Some(pending) = pending else {
            tracing::debug!(ticket = ticket.0, "stale image completion ignored");
            return Ok(false);
        };

        let image = match result {
            Ok(image) => image.to_paint()?,
            Err(err) => {
                tracing::debug!(url = %pending.url, error = %err, "avatar load failed");
                return Ok(false);
            }
        };
        self.avatars.cache.insert(pending.url, image);
        self.repaint_avatar()
    }

    /// Redraw just the avatar square of the visible tooltip.
    ///
    /// Skipped when a full repaint is already due or the tooltip on screen belongs to another
    /// commit; the next frame picks the cached image up.
    fn repaint_avatar(&mut self) -> GitnetResult<bool> {
        let Some(tooltip) = &self.tooltip else {
            return Ok(false);
        };
        let selection = self.interaction.selection();
        if self.scheduler.is_dirty() || selection.commit_id() != Some(tooltip.commit_id.as_str()) {
            tracing::debug!(shown = %tooltip.commit_id, "avatar repaint deferred to next frame");
            return Ok(false);
        }
        let mut list = DrawList::new();
        tooltip.paint_avatar(&mut list, self.avatar_for(selection));
        self.frame.draw_region(tooltip.avatar_pixels(), &list)?;
        Ok(true)
    }

    fn avatar_for(&self, selection: &Selection) -> Option<&ImagePaint> {
        let cache = &self.avatars.cache;
        let own = selection
            .commit_id()
            .and_then(|id| self.data.as_ref()?.commit(id))
            .and_then(|c| c.gravatar_url.as_deref())
            .and_then(|url| cache.get(url));
        own.or_else(|| cache.get(&self.cfg.tooltip.default_gravatar))
    }

    fn layout_tooltip(&mut self, selection: &Selection) -> Option<TooltipLayout> {
        if !self.cfg.tooltip.enabled {
            return None;
        }
        let ds = self.data.as_ref()?;
        let commit = ds.commit(selection.commit_id()?)?;
        let mapper = CoordinateMapper::from_config(&self.cfg);
        let pos = self
            .viewport
            .to_view(mapper.to_pixel(f64::from(commit.time), f64::from(commit.lane)));
        Some(TooltipLayout::new(
            pos,
            commit,
            f64::from(self.viewport.width()),
            f64::from(self.viewport.height()),
            &self.cfg.tooltip,
            &mut self.text,
        ))
    }

    /// A new selection supersedes any avatar request for the previous one.
    fn selection_changed(&mut self) {
        self.avatars.current = None;
        if !self.cfg.tooltip.enabled {
            return;
        }
        let url = self
            .interaction
            .selection()
            .commit_id()
            .and_then(|id| self.data.as_ref()?.commit(id))
            .and_then(|c| c.gravatar_url.clone());
        let Some(url) = url else {
            return;
        };
        if self.avatars.cache.contains_key(&url) {
            return;
        }
        let request = self.avatars.issue(&url);
        self.avatars.current = Some(PendingImage {
            ticket: request.ticket,
            url,
        });
        self.host.load_image(request);
    }

    fn request_placeholder(&mut self) {
        let url = self.cfg.tooltip.default_gravatar.clone();
        if !self.cfg.tooltip.enabled || url.is_empty() || self.avatars.cache.contains_key(&url) {
            return;
        }
        let request = self.avatars.issue(&url);
        self.avatars.placeholder = Some(PendingImage {
            ticket: request.ticket,
            url,
        });
        self.host.load_image(request);
    }

    fn request_redraw(&mut self) {
        self.scheduler.request(&mut self.host);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/network_view.rs"]
mod tests;
