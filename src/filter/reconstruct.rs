//! Lossy reconstruction back to RGBA.
//!
//! Luma and chroma are box-averaged over a window that only looks forward, so
//! detail smears to the right the way a worn playback head would smear it.

use super::{ALPHA, CHROMA, LUMA, PIXEL_BYTES};

/// Luma window, in pixels
pub const LUMA_LOSS: usize = 4;

/// Chroma window, in pixels
pub const CHROMA_LOSS: usize = 8;

#[inline]
fn clamp_byte(value: f64) -> u8 {
    (value as i32).clamp(0, 255) as u8
}

#[inline]
fn rgb_from_yuv(dst: &mut [u8], y: f32, u: f32, v: f32) {
    let (y, u, v) = (f64::from(y), f64::from(u), f64::from(v));
    dst[0] = clamp_byte(298.082 * y + 408.583 * v - 222.921);
    dst[1] = clamp_byte(298.082 * y - 100.291 * u - 208.120 * v + 135.576);
    dst[2] = clamp_byte(298.082 * y + 516.412 * u - 276.836);
}

#[inline]
fn window_sum(row: &[u8], start: usize, len: usize, channel: usize) -> f32 {
    let last = row.len() / PIXEL_BYTES - 1;
    (start..start + len)
        .map(|idx| row[idx.min(last) * PIXEL_BYTES + channel] as f32)
        .sum()
}

/// Rebuild one RGBA row pair from the working layout
pub fn reconstruct_pair(even: &[u8], odd: &[u8], dst_even: &mut [u8], dst_odd: &mut [u8]) {
    let width = even.len() / PIXEL_BYTES;

    for i in 0..width {
        let y_even = window_sum(even, i, LUMA_LOSS, LUMA) / (255.0 * LUMA_LOSS as f32);
        let y_odd = window_sum(odd, i, LUMA_LOSS, LUMA) / (255.0 * LUMA_LOSS as f32);
        let u = window_sum(odd, i, CHROMA_LOSS, CHROMA) / (255.0 * CHROMA_LOSS as f32);
        let v = window_sum(even, i, CHROMA_LOSS, CHROMA) / (255.0 * CHROMA_LOSS as f32);

        let px = i * PIXEL_BYTES;
        rgb_from_yuv(&mut dst_even[px..px + PIXEL_BYTES], y_even, u, v);
        rgb_from_yuv(&mut dst_odd[px..px + PIXEL_BYTES], y_odd, u, v);
        dst_even[px + ALPHA] = even[px + ALPHA];
        dst_odd[px + ALPHA] = odd[px + ALPHA];
    }
}
