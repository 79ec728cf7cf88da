//! Retained draw lists rasterized with `vello_cpu`.
//!
//! Drawing code records [`DrawOp`]s into a [`DrawList`] in user space; each op carries its own
//! transform and device-space bounds so large surfaces can cull per tile.

use std::sync::Arc;

use kurbo::{Cap, Join, Shape as _, Stroke, StrokeOpts};

use crate::foundation::color::ColorDef;
use crate::foundation::core::{Affine, BezPath, PixelRect, Point, Rect};
use crate::foundation::error::{GitnetError, GitnetResult};
use crate::text::{PlacedGlyph, ShapedText};

const TOLERANCE: f64 = 0.1;

/// Decoded premultiplied image ready for painting.
#[derive(Clone, Debug)]
pub struct ImagePaint {
    pixmap: Arc<vello_cpu::Pixmap>,
    width: u32,
    height: u32,
}

impl ImagePaint {
    pub fn from_premul(bytes: &[u8], width: u32, height: u32) -> GitnetResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| GitnetError::render("image width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| GitnetError::render("image height exceeds u16"))?;
        if bytes.len()
            != (width as usize)
                .saturating_mul(height as usize)
                .saturating_mul(4)
        {
            return Err(GitnetError::render("image byte len mismatch"));
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|px| {
                vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
            })
            .collect();
        Ok(Self {
            pixmap: Arc::new(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true)),
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

#[derive(Clone, Debug)]
pub enum DrawKind {
    Fill(BezPath),
    Glyphs {
        glyphs: Vec<PlacedGlyph>,
        font: vello_cpu::peniko::FontData,
        size: f32,
    },
    Image {
        image: ImagePaint,
        rect: Rect,
    },
}

#[derive(Clone, Debug)]
pub struct DrawOp {
    pub kind: DrawKind,
    pub color: ColorDef,
    pub transform: Affine,
    /// Device-space bounding box.
    pub bounds: Rect,
}

/// Ordered draw ops with a current transform.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    ops: Vec<DrawOp>,
    transform: Affine,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn len(&self) -> usize {
        self.ops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    pub fn transform(&self) -> Affine {
        self.transform
    }

    pub fn set_transform(&mut self, transform: Affine) {
        self.transform = transform;
    }

    /// Whether any op may cover pixels of `rect`.
    pub fn touches(&self, rect: PixelRect) -> bool {
        let r = pixel_rect_to_rect(rect);
        self.ops.iter().any(|op| overlaps(op.bounds, r))
    }

    pub fn fill_path(&mut self, path: &BezPath, color: ColorDef) {
        if color.a <= 0.0 || path.elements().is_empty() {
            return;
        }
        let bounds = self.transform.transform_rect_bbox(path.bounding_box());
        self.ops.push(DrawOp {
            kind: DrawKind::Fill(path.clone()),
            color,
            transform: self.transform,
            bounds,
        });
    }

    /// Stroke with butt caps and miter joins, converted to a fill.
    pub fn stroke_path(&mut self, path: &BezPath, width: f64, color: ColorDef) {
        if width <= 0.0 {
            return;
        }
        let style = Stroke::new(width)
            .with_caps(Cap::Butt)
            .with_join(Join::Miter);
        let outline = kurbo::stroke(
            path.elements().iter().copied(),
            &style,
            &StrokeOpts::default(),
            TOLERANCE,
        );
        self.fill_path(&outline, color);
    }

    pub fn line(&mut self, a: Point, b: Point, width: f64, color: ColorDef) {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        self.stroke_path(&path, width, color);
    }

    pub fn fill_rect(&mut self, rect: Rect, color: ColorDef) {
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.fill_path(&rect.to_path(TOLERANCE), color);
    }

    pub fn stroke_rect(&mut self, rect: Rect, width: f64, color: ColorDef) {
        self.stroke_path(&rect.to_path(TOLERANCE), width, color);
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: ColorDef) {
        if radius <= 0.0 {
            return;
        }
        self.fill_path(&kurbo::Circle::new(center, radius).to_path(TOLERANCE), color);
    }

    /// Draw shaped text with its left baseline point at `origin`.
    pub fn text(&mut self, shaped: &ShapedText, origin: Point) {
        let Some(font) = &shaped.font else {
            return;
        };
        if shaped.glyphs.is_empty() {
            return;
        }
        let transform = self.transform * Affine::translate(origin.to_vec2());
        let local = Rect::new(0.0, -shaped.ascent, shaped.width, shaped.descent);
        self.ops.push(DrawOp {
            kind: DrawKind::Glyphs {
                glyphs: shaped.glyphs.clone(),
                font: font.clone(),
                size: shaped.size,
            },
            color: shaped.color,
            transform,
            bounds: transform.transform_rect_bbox(local),
        });
    }

    /// Draw `image` scaled into `rect`.
    pub fn image(&mut self, image: &ImagePaint, rect: Rect) {
        if image.width == 0 || image.height == 0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.ops.push(DrawOp {
            kind: DrawKind::Image {
                image: image.clone(),
                rect,
            },
            color: ColorDef::rgba(1.0, 1.0, 1.0, 1.0),
            transform: self.transform,
            bounds: self.transform.transform_rect_bbox(rect),
        });
    }
}

fn pixel_rect_to_rect(r: PixelRect) -> Rect {
    Rect::new(r.x as f64, r.y as f64, r.right() as f64, r.bottom() as f64)
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

/// Render the ops overlapping `area` into a fresh `w x h` pixmap whose origin is `area`'s origin.
pub(crate) fn rasterize_ops(
    ops: &[DrawOp],
    area: PixelRect,
    w: u16,
    h: u16,
) -> vello_cpu::Pixmap {
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let shift = Affine::translate((-(area.x as f64), -(area.y as f64)));
    let clip = pixel_rect_to_rect(area);

    for op in ops {
        if !overlaps(op.bounds, clip) {
            continue;
        }
        match &op.kind {
            DrawKind::Fill(path) => {
                ctx.set_transform(affine_to_cpu(shift * op.transform));
                ctx.set_paint(color_to_cpu(op.color));
                ctx.fill_path(&bezpath_to_cpu(path));
            }
            DrawKind::Glyphs { glyphs, font, size } => {
                ctx.set_transform(affine_to_cpu(shift * op.transform));
                ctx.set_paint(color_to_cpu(op.color));
                let glyphs = glyphs.iter().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(font).font_size(*size).fill_glyphs(glyphs);
            }
            DrawKind::Image { image, rect } => {
                let scale = Affine::scale_non_uniform(
                    rect.width() / f64::from(image.width),
                    rect.height() / f64::from(image.height),
                );
                let place = Affine::translate((rect.x0, rect.y0)) * scale;
                ctx.set_transform(affine_to_cpu(shift * op.transform * place));
                ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(vello_cpu::Image {
                    image: vello_cpu::ImageSource::Pixmap(Arc::clone(&image.pixmap)),
                    sampler: vello_cpu::peniko::ImageSampler::default(),
                });
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                    0.0,
                    0.0,
                    f64::from(image.width),
                    f64::from(image.height),
                ));
            }
        }
    }

    ctx.flush();
    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    pixmap
}

fn color_to_cpu(c: ColorDef) -> vello_cpu::peniko::Color {
    let [r, g, b, a] = c.to_rgba8();
    vello_cpu::peniko::Color::from_rgba8(r, g, b, a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/painter.rs"]
mod tests;
