//! RGBA to working YUV layout.
//!
//! Every pixel keeps its own luma, but chroma is stored once per horizontal
//! pixel pair, and only one chroma component per row: V on even rows, U on odd
//! rows. Together the two rows of a pair carry a full chroma sample.

use super::{CHROMA, LUMA, MARKER, ALPHA};

#[inline]
fn unpack_rgb(px: &[u8]) -> [f32; 3] {
    [
        px[0] as f32 / 255.0,
        px[1] as f32 / 255.0,
        px[2] as f32 / 255.0,
    ]
}

#[inline]
fn average(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}

#[inline]
pub(crate) fn y_from_rgb(rgb: [f32; 3]) -> u8 {
    let [r, g, b] = rgb.map(f64::from);
    (16.0 + 65.738 * r + 129.057 * g + 25.064 * b) as u8
}

#[inline]
pub(crate) fn u_from_rgb(rgb: [f32; 3]) -> u8 {
    let [r, g, b] = rgb.map(f64::from);
    (128.0 - 37.945 * r - 74.494 * g + 112.439 * b) as u8
}

#[inline]
pub(crate) fn v_from_rgb(rgb: [f32; 3]) -> u8 {
    let [r, g, b] = rgb.map(f64::from);
    (128.0 + 112.439 * r - 94.154 * g - 18.285 * b) as u8
}

#[inline]
fn write_pixel(dst: &mut [u8], luma: u8, chroma: u8, alpha: u8) {
    dst[LUMA] = luma;
    dst[CHROMA] = chroma;
    dst[MARKER] = 0;
    dst[ALPHA] = alpha;
}

/// Convert one RGBA row pair into the working layout
///
/// All four slices hold the same even number of RGBA pixels.
pub fn pack_pair(src_even: &[u8], src_odd: &[u8], even: &mut [u8], odd: &mut [u8]) {
    let pairs = src_even
        .chunks_exact(8)
        .zip(src_odd.chunks_exact(8))
        .zip(even.chunks_exact_mut(8).zip(odd.chunks_exact_mut(8)));

    for ((se, so), (de, dodd)) in pairs {
        let rgb0_even = unpack_rgb(&se[..4]);
        let rgb1_even = unpack_rgb(&se[4..]);
        let rgb0_odd = unpack_rgb(&so[..4]);
        let rgb1_odd = unpack_rgb(&so[4..]);

        let v = v_from_rgb(average(rgb0_even, rgb1_even));
        let u = u_from_rgb(average(rgb0_odd, rgb1_odd));

        write_pixel(&mut de[..4], y_from_rgb(rgb0_even), v, se[ALPHA]);
        write_pixel(&mut de[4..], y_from_rgb(rgb1_even), v, se[4 + ALPHA]);
        write_pixel(&mut dodd[..4], y_from_rgb(rgb0_odd), u, so[ALPHA]);
        write_pixel(&mut dodd[4..], y_from_rgb(rgb1_odd), u, so[4 + ALPHA]);
    }
}
