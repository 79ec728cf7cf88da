//! Commit details box shown next to the active commit.

use crate::config::{FontSpec, TooltipStyle};
use crate::data::model::Commit;
use crate::foundation::color::ColorDef;
use crate::foundation::core::{PixelRect, Point, Rect};
use crate::render::{DrawList, ImagePaint};
use crate::text::{ShapedText, TextEngine};

const LINE_HEIGHT: f64 = 1.4;
const PLACEHOLDER: ColorDef = ColorDef::rgba(0.87, 0.87, 0.87, 1.0);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vertical {
    Below,
    Above,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizontal {
    Right,
    Center,
    Left,
}

#[derive(Clone, Debug)]
pub struct TooltipLine {
    pub text: String,
    pub shaped: ShapedText,
    /// Left baseline point.
    pub origin: Point,
}

/// Positioned tooltip, view coordinates.
#[derive(Clone, Debug)]
pub struct TooltipLayout {
    /// Commit the box describes.
    pub commit_id: String,
    pub rect: Rect,
    pub avatar: Rect,
    pub lines: Vec<TooltipLine>,
    pub vertical: Vertical,
    pub horizontal: Horizontal,
}

impl TooltipLayout {
    /// Lay out the box for `commit` shown at view point `pos` in a `view_w x view_h` view.
    pub fn new(
        pos: Point,
        commit: &Commit,
        view_w: f64,
        view_h: f64,
        style: &TooltipStyle,
        text: &mut TextEngine,
    ) -> Self {
        let pad = style.padding;
        let avatar = style.avatar_size;
        let width = style.width.min(view_w - style.offset.left).max(0.0);
        let text_width = (width - avatar - 3.0 * pad).max(0.0);

        let date: String = commit.date.chars().take(10).collect();
        let message = text.ellipsize(&commit.message, &style.font, text_width);
        let author = text.ellipsize(&commit.author, &style.font.bold(), text_width);
        let rows: [(&str, FontSpec); 3] = [
            (date.as_str(), style.font.clone()),
            (author.as_str(), style.font.bold()),
            (message.as_str(), style.font.clone()),
        ];

        let line_h = style.font.size * LINE_HEIGHT;
        let content_h = (line_h * rows.len() as f64).max(avatar);
        let height = content_h + 2.0 * pad;

        let mut left = pos.x + style.offset.left;
        let mut top = pos.y + style.offset.top;
        let mut horizontal = Horizontal::Right;
        let mut vertical = Vertical::Below;

        if width + style.offset.left > view_w / 2.0 {
            left = view_w / 2.0 - width / 2.0;
            horizontal = Horizontal::Center;
        } else if left + width > view_w {
            left = pos.x - width - style.offset.left;
            horizontal = Horizontal::Left;
        }
        if top + height > view_h {
            top = pos.y - height - style.offset.top;
            vertical = Vertical::Above;
        }

        let text_x = left + pad + avatar + pad;
        let lines = rows
            .iter()
            .enumerate()
            .map(|(i, (s, font))| {
                let shaped = text.shape(s, font);
                let origin = Point::new(text_x, top + pad + i as f64 * line_h + shaped.ascent);
                TooltipLine {
                    text: s.to_string(),
                    shaped,
                    origin,
                }
            })
            .collect();

        Self {
            commit_id: commit.id.clone(),
            rect: Rect::new(left, top, left + width, top + height),
            avatar: Rect::new(
                left + pad,
                top + pad,
                left + pad + avatar,
                top + pad + avatar,
            ),
            lines,
            vertical,
            horizontal,
        }
    }

    /// Whole pixels covered by the avatar square.
    pub fn avatar_pixels(&self) -> PixelRect {
        let r = self.avatar.expand();
        PixelRect::new(
            r.x0 as i64,
            r.y0 as i64,
            r.width() as i64,
            r.height() as i64,
        )
    }

    pub fn paint(&self, list: &mut DrawList, style: &TooltipStyle, avatar: Option<&ImagePaint>) {
        list.fill_rect(self.rect, style.background);
        if style.border.width > 0.0 {
            let off = style.border.width / 2.0;
            let r = self.rect;
            let inner = Rect::new(r.x0 + off, r.y0 + off, r.x1 - off, r.y1 - off);
            list.stroke_rect(inner, style.border.width, style.border.color);
        }
        self.paint_avatar(list, avatar);
        for line in &self.lines {
            list.text(&line.shaped, line.origin);
        }
    }

    /// The avatar square alone: placeholder fill, then the image when one is loaded.
    pub fn paint_avatar(&self, list: &mut DrawList, avatar: Option<&ImagePaint>) {
        list.fill_rect(self.avatar, PLACEHOLDER);
        if let Some(image) = avatar {
            list.image(image, self.avatar);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/tooltip.rs"]
mod tests;
