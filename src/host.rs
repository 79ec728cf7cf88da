//! Side-effect seams the view calls out through: navigation, image loading and frame requests.

use anyhow::Context as _;

use crate::data::model::{Commit, User};
use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::GitnetResult;
use crate::render::ImagePaint;

/// Opens a URL on pointer-up over a commit or contributor.
pub trait Navigator {
    fn navigate(&mut self, url: &str);
}

/// Identifies one image request. Completions carrying a superseded ticket are dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageTicket(pub u64);

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageRequest {
    pub url: String,
    pub ticket: ImageTicket,
}

/// Starts an asynchronous image load; the host reports back through `NetworkView::image_loaded`.
pub trait ImageLoader {
    fn load_image(&mut self, request: ImageRequest);
}

/// The host's next-animation-frame hook.
pub trait FrameRequester {
    fn request_frame(&mut self);
}

/// Everything a view needs from its host.
pub trait Host: Navigator + ImageLoader + FrameRequester {}

impl<T: Navigator + ImageLoader + FrameRequester> Host for T {}

/// Host that ignores every side effect. Used for headless rendering.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullHost;

impl Navigator for NullHost {
    fn navigate(&mut self, url: &str) {
        tracing::debug!(url, "navigation ignored by headless host");
    }
}

impl ImageLoader for NullHost {
    fn load_image(&mut self, _request: ImageRequest) {}
}

impl FrameRequester for NullHost {
    fn request_frame(&mut self) {}
}

/// Decoded avatar, premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AvatarImage {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

impl AvatarImage {
    pub(crate) fn to_paint(&self) -> GitnetResult<ImagePaint> {
        ImagePaint::from_premul(&self.rgba8_premul, self.width, self.height)
    }
}

/// Decode PNG/JPEG/GIF bytes into a premultiplied avatar.
pub fn decode_avatar(bytes: &[u8]) -> GitnetResult<AvatarImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode avatar from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let rgba8_premul = rgba
        .pixels()
        .flat_map(|p| {
            let [r, g, b, a] = p.0;
            Rgba8Premul::from_straight_rgba(r, g, b, a).to_array()
        })
        .collect();

    Ok(AvatarImage {
        width,
        height,
        rgba8_premul,
    })
}

/// Values substituted into link templates.
#[derive(Clone, Debug, Default)]
pub struct LinkVars<'a> {
    pub user: Option<&'a User>,
    pub commit: Option<&'a Commit>,
    pub repository: Option<&'a str>,
}

/// Replace `{{user.name}}`, `{{user.repo}}`, `{{commit.id}}` and `{{repository}}` in `template`.
/// Placeholders without a value become empty.
pub fn render_link(template: &str, vars: &LinkVars<'_>) -> String {
    let user_name = vars.user.map(|u| u.name.as_str()).unwrap_or("");
    let user_repo = vars.user.map(|u| u.repo_name.as_str()).unwrap_or("");
    let commit_id = vars.commit.map(|c| c.id.as_str()).unwrap_or("");
    let repository = vars.repository.unwrap_or("");

    template
        .replace("{{user.name}}", user_name)
        .replace("{{user.repo}}", user_repo)
        .replace("{{commit.id}}", commit_id)
        .replace("{{repository}}", repository)
}

#[cfg(test)]
#[path = "../tests/unit/host.rs"]
mod tests;
