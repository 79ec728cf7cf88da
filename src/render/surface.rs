use crate::foundation::core::PixelRect;
use crate::foundation::error::{GitnetError, GitnetResult};
use crate::render::composite::{blit_region_over, over_in_place};
use crate::render::painter::{DrawList, rasterize_ops};

/// Largest tile edge. Pixmaps are addressed with 16-bit sizes.
pub const TILE_SIZE: u32 = 2048;

/// Premultiplied RGBA8 pixel buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * 4],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn bounds(&self) -> PixelRect {
        PixelRect::new(0, 0, i64::from(self.width), i64::from(self.height))
    }

    /// Premultiplied pixel, or `None` outside the frame.
    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }

    /// Copy of `rect`, clamped to the frame.
    pub fn region(&self, rect: PixelRect) -> FrameRGBA {
        let r = rect.intersect(self.bounds());
        let mut out = FrameRGBA::new(r.w as u32, r.h as u32);
        let row = r.w as usize * 4;
        for y in 0..r.h as usize {
            let s = ((r.y as usize + y) * self.width as usize + r.x as usize) * 4;
            out.data[y * row..(y + 1) * row].copy_from_slice(&self.data[s..s + row]);
        }
        out
    }

    /// Overwrite the pixels at `(x, y)` with `src`; parts outside the frame are dropped.
    pub fn put_region(&mut self, x: i64, y: i64, src: &FrameRGBA) {
        let target = PixelRect::new(x, y, i64::from(src.width), i64::from(src.height))
            .intersect(self.bounds());
        let row = target.w as usize * 4;
        for ty in 0..target.h as usize {
            let sy = (target.y - y) as usize + ty;
            let sx = (target.x - x) as usize;
            let s = (sy * src.width as usize + sx) * 4;
            let d = ((target.y as usize + ty) * self.width as usize + target.x as usize) * 4;
            self.data[d..d + row].copy_from_slice(&src.data[s..s + row]);
        }
    }

    /// Rasterize `list` and composite it source-over onto this frame.
    pub fn draw(&mut self, list: &DrawList) -> GitnetResult<()> {
        if self.is_empty() || list.is_empty() {
            return Ok(());
        }
        let (w, h) = pixmap_dims(self.width, self.height)?;
        let layer = rasterize_ops(list.ops(), self.bounds(), w, h);
        over_in_place(&mut self.data, layer.data_as_u8_slice())
    }

    /// Like [`FrameRGBA::draw`], but only the pixels inside `rect` are rasterized and touched.
    pub fn draw_region(&mut self, rect: PixelRect, list: &DrawList) -> GitnetResult<()> {
        let r = rect.intersect(self.bounds());
        if r.is_empty() || list.is_empty() {
            return Ok(());
        }
        let (w, h) = pixmap_dims(r.w as u32, r.h as u32)?;
        let layer = rasterize_ops(list.ops(), r, w, h);
        let mut part = self.region(r);
        over_in_place(&mut part.data, layer.data_as_u8_slice())?;
        self.put_region(r.x, r.y, &part);
        Ok(())
    }

    /// Straight-alpha RGBA8, for encoders.
    pub fn to_straight_rgba(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(4) {
            let a = u16::from(px[3]);
            if a == 0 || a == 255 {
                continue;
            }
            for c in &mut px[..3] {
                *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
            }
        }
        out
    }
}

fn pixmap_dims(width: u32, height: u32) -> GitnetResult<(u16, u16)> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GitnetError::render("pixmap width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GitnetError::render("pixmap height exceeds u16"))?;
    Ok((w, h))
}

#[derive(Clone, Debug)]
struct Tile {
    rect: PixelRect,
    frame: FrameRGBA,
}

/// Large off-screen surface split into tiles of at most [`TILE_SIZE`] pixels per edge.
#[derive(Clone, Debug)]
pub struct TiledSurface {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl TiledSurface {
    pub fn new(width: u32, height: u32) -> Self {
        let mut tiles = Vec::new();
        if width > 0 && height > 0 {
            for ty in (0..height).step_by(TILE_SIZE as usize) {
                for tx in (0..width).step_by(TILE_SIZE as usize) {
                    let w = TILE_SIZE.min(width - tx);
                    let h = TILE_SIZE.min(height - ty);
                    tiles.push(Tile {
                        rect: PixelRect::new(i64::from(tx), i64::from(ty), i64::from(w), i64::from(h)),
                        frame: FrameRGBA::new(w, h),
                    });
                }
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Zero-sized surface.
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Rasterize `list` onto every tile it touches.
    pub fn draw(&mut self, list: &DrawList) -> GitnetResult<()> {
        for tile in &mut self.tiles {
            if !list.touches(tile.rect) {
                continue;
            }
            let (w, h) = pixmap_dims(tile.frame.width, tile.frame.height)?;
            let layer = rasterize_ops(list.ops(), tile.rect, w, h);
            over_in_place(&mut tile.frame.data, layer.data_as_u8_slice())?;
        }
        Ok(())
    }

    pub fn pixel(&self, x: i64, y: i64) -> Option<[u8; 4]> {
        let tile = self.tiles.iter().find(|t| {
            x >= t.rect.x && y >= t.rect.y && x < t.rect.right() && y < t.rect.bottom()
        })?;
        tile.frame.pixel(x - tile.rect.x, y - tile.rect.y)
    }

    /// Composite `src` (surface coordinates, inside the surface) onto `dst` at `dst_x, dst_y`.
    pub fn blit_over(
        &self,
        dst: &mut FrameRGBA,
        src: PixelRect,
        dst_x: i64,
        dst_y: i64,
    ) -> GitnetResult<()> {
        if !src.within(i64::from(self.width), i64::from(self.height)) {
            return Err(GitnetError::render("blit source lies outside the surface"));
        }
        for tile in &self.tiles {
            let part = src.intersect(tile.rect);
            if part.is_empty() {
                continue;
            }
            let local = PixelRect::new(part.x - tile.rect.x, part.y - tile.rect.y, part.w, part.h);
            blit_region_over(
                &mut dst.data,
                dst.width,
                dst_x + (part.x - src.x),
                dst_y + (part.y - src.y),
                &tile.frame.data,
                tile.frame.width,
                local,
            )?;
        }
        Ok(())
    }

    /// Flatten into one frame.
    pub fn to_frame(&self) -> FrameRGBA {
        let mut out = FrameRGBA::new(self.width, self.height);
        for tile in &self.tiles {
            out.put_region(tile.rect.x, tile.rect.y, &tile.frame);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
