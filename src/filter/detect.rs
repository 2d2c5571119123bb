//! Oscillation detector.
//!
//! Walks a row of working-layout pixels and accumulates how violently luma
//! swings between neighbours, against a random bias. The accumulator halves
//! after every pixel so only recent swings count. Whenever it exceeds the
//! fire threshold the pixel is marked as an ignition point.

use super::rng::Juice;
use super::{Tuning, LUMA, MARKER, PIXEL_BYTES};
use super::{PrefilterSeed, ScanDirection};

/// Mark ignition points on one row, in place
pub fn detect_row(
    row: &mut [u8],
    tuning: &Tuning,
    seed: PrefilterSeed,
    direction: ScanDirection,
    mut juice: Juice,
) {
    let width = row.len() / PIXEL_BYTES;
    if width < 2 {
        return;
    }

    let mut oscillation = match seed {
        PrefilterSeed::Zero => 0,
        PrefilterSeed::FireSeed => tuning.fire_seed,
    };

    let mut step = |row: &mut [u8], i: usize, prev: usize| {
        let delta = row[i * PIXEL_BYTES + LUMA] as i32 - row[prev * PIXEL_BYTES + LUMA] as i32;
        oscillation = oscillation.saturating_add((delta - juice.umod(512)).abs());

        if oscillation > tuning.fire_threshold {
            row[i * PIXEL_BYTES + MARKER] = juice.umod(80) as u8;
        }

        juice.advance();
        oscillation /= 2;
    };

    match direction {
        ScanDirection::LeftToRight => {
            for i in 1..width {
                step(row, i, i - 1);
            }
        }
        ScanDirection::RightToLeft => {
            for i in (0..width - 1).rev() {
                step(row, i, i + 1);
            }
        }
    }
}
