//! Fire and noise injection.
//!
//! Consumes the ignition markers left by the detector and degrades the
//! working layout in place: decaying chroma spikes ("fire"), additive luma and
//! chroma noise, and a luma echo read back from already degraded pixels.

use super::rng::Juice;
use super::{FireSignPolicy, Tuning, CHROMA, LUMA, MARKER, PIXEL_BYTES};

/// Linear decay of a fire event, per pixel
const FIRE_FADE: i32 = 1;

/// Luma below which positive chroma burns negative under [`FireSignPolicy::Polarity`]
const DARK_LUMA: i32 = 64;

#[inline]
fn clamp_byte(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// Active color-bleed event on one chroma component
#[derive(Debug, Clone, Copy)]
struct Fire {
    magnitude: i32,
    sign: i32,
}

impl Fire {
    fn new() -> Self {
        Self { magnitude: 0, sign: 1 }
    }

    /// Apply the running event to `chroma` and let it fade
    #[inline]
    fn burn(&mut self, chroma: i32) -> i32 {
        if self.magnitude > 0 {
            let burnt = chroma + self.magnitude * self.sign;
            self.magnitude -= FIRE_FADE;
            burnt
        } else {
            chroma
        }
    }

    #[inline]
    fn ignite(&mut self, marker: i32, chroma: i32, luma: i32, policy: FireSignPolicy) {
        if policy == FireSignPolicy::Polarity && self.magnitude <= 0 {
            self.sign = if chroma > 0 && luma < DARK_LUMA { -1 } else { 1 };
        }
        self.magnitude = marker;
    }
}

/// Per-row state while walking a pair
struct Scanline<'a> {
    row: &'a mut [u8],
    fire: Fire,
    juice: Juice,
}

impl Scanline<'_> {
    fn degrade(&mut self, i: usize, tuning: &Tuning, policy: FireSignPolicy) {
        let px = i * PIXEL_BYTES;
        let r = self.juice.value();

        let mut luma = self.row[px + LUMA] as i32;
        let mut chroma = self.row[px + CHROMA] as i32 - 128;
        let marker = self.row[px + MARKER] as i32;

        chroma = self.fire.burn(chroma);
        if marker > 0 {
            self.fire.ignite(marker, chroma, luma, policy);
        }

        if tuning.luma_noise > 0 {
            luma += r % tuning.luma_noise;
        }

        if tuning.chroma_noise > 0 {
            let gain = 2.0 * (tuning.chroma_noise as f32 / 256.0);
            chroma += (chroma as f32 * gain) as i32 + r % tuning.chroma_noise;
        }

        if tuning.echo_offset >= 1 && i >= tuning.echo_offset as usize {
            let echo = self.row[(i - tuning.echo_offset as usize) * PIXEL_BYTES + LUMA] as i32;
            luma += (luma - echo) / 2;
        }

        self.row[px + LUMA] = clamp_byte(luma);
        self.row[px + CHROMA] = clamp_byte(chroma + 128);
        self.juice.advance();
    }
}

/// Degrade one row pair in place
///
/// `even` carries V, `odd` carries U. Each row consumes its own random
/// stream, but both walk left to right in lockstep.
pub fn inject_pair(
    even: &mut [u8],
    odd: &mut [u8],
    tuning: &Tuning,
    policy: FireSignPolicy,
    juice_even: Juice,
    juice_odd: Juice,
) {
    let width = even.len() / PIXEL_BYTES;

    let mut v_line = Scanline {
        row: even,
        fire: Fire::new(),
        juice: juice_even,
    };
    let mut u_line = Scanline {
        row: odd,
        fire: Fire::new(),
        juice: juice_odd,
    };

    for i in 0..width {
        v_line.degrade(i, tuning, policy);
        u_line.degrade(i, tuning, policy);
    }
}
