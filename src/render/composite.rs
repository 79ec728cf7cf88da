use crate::foundation::core::PixelRect;
use crate::foundation::error::{GitnetError, GitnetResult};
use crate::foundation::math::mul_div255_u8;

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    if src[3] == 0 {
        return dst;
    }
    if src[3] == 255 {
        return src;
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255_u8(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> GitnetResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(GitnetError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite `src_rect` of a `src_width`-wide premultiplied buffer onto `dst` at `dst_x, dst_y`.
///
/// Both rectangles must already be clamped to their buffers.
pub(crate) fn blit_region_over(
    dst: &mut [u8],
    dst_width: u32,
    dst_x: i64,
    dst_y: i64,
    src: &[u8],
    src_width: u32,
    src_rect: PixelRect,
) -> GitnetResult<()> {
    if src_rect.is_empty() {
        return Ok(());
    }
    if dst_x < 0 || dst_y < 0 || src_rect.x < 0 || src_rect.y < 0 {
        return Err(GitnetError::render("blit rectangle has a negative origin"));
    }

    let row_bytes = src_rect.w as usize * 4;
    for row in 0..src_rect.h as usize {
        let s0 = ((src_rect.y as usize + row) * src_width as usize + src_rect.x as usize) * 4;
        let d0 = ((dst_y as usize + row) * dst_width as usize + dst_x as usize) * 4;
        let (Some(s), Some(d)) = (
            src.get(s0..s0 + row_bytes),
            dst.get_mut(d0..d0 + row_bytes),
        ) else {
            return Err(GitnetError::render("blit rectangle exceeds buffer"));
        };
        over_in_place(d, s)?;
    }
    Ok(())
}
