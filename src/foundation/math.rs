pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y) as u8
}

/// Pixel snapping: halves round toward positive infinity.
pub(crate) fn round_px(v: f64) -> f64 {
    (v + 0.5).floor()
}
