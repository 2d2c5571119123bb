//! # SECAM Fire Filter
//!
//! The per-frame pixel pipeline. Every frame is cut into pairs of adjacent
//! rows (even/odd) which run through four stages:
//!
//! 1. [`pack`] - RGBA to a chroma-subsampled working layout
//! 2. [`detect`] - oscillation detector marking fire ignition points
//! 3. [`inject`] - fire streaks, luma/chroma noise and luma echo
//! 4. [`reconstruct`] - lossy forward box-filter back to RGBA
//!
//! Row pairs share no state, so they are processed in parallel.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use secam_fire::filter::SecamFilter;
//!
//! # fn main() -> secam_fire::Result<()> {
//! let mut filter = SecamFilter::new(640, 480)?;
//! filter.set_fire_intensity(0.4);
//!
//! let src = vec![128u8; 640 * 480 * 4];
//! let mut dst = vec![0u8; src.len()];
//! filter.process_frame(&src, &mut dst)?;
//! # Ok(())
//! # }
//! ```

pub mod detect;
pub mod inject;
pub mod pack;
pub mod params;
pub mod reconstruct;
pub mod rng;
pub mod variant;

use rayon::prelude::*;
use tracing::debug;

use crate::error::{FilterError, Result};

pub use params::{Tuning, DEFAULT_FIRE_INTENSITY, DEFAULT_NOISE_INTENSITY};
pub use rng::{Juice, RowSeeds, SeedSource};
pub use variant::{FilterVariant, FireSignPolicy, PrefilterSeed, ScanDirection};

/// Bytes per pixel, in RGBA and in the working layout alike
pub const PIXEL_BYTES: usize = 4;

// Working layout channels
pub(crate) const LUMA: usize = 0;
pub(crate) const CHROMA: usize = 1;
pub(crate) const MARKER: usize = 2;
pub(crate) const ALPHA: usize = 3;

/// A SECAM degradation filter bound to one frame size
///
/// Owns its working memory, so processing a frame never allocates.
pub struct SecamFilter {
    width: u32,
    height: u32,
    fire_intensity: f64,
    noise_intensity: f64,
    tuning: Tuning,
    variant: FilterVariant,
    seeds: SeedSource,
    row_seeds: Vec<RowSeeds>,
    frame_bytes: usize,
    scratch: Vec<u8>,
    frame_count: u64,
}

impl SecamFilter {
    /// Create a filter seeded from OS entropy
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Self::build(width, height, SeedSource::from_entropy())
    }

    /// Create a filter whose output is reproducible for a given seed
    pub fn with_seed(width: u32, height: u32, seed: u64) -> Result<Self> {
        Self::build(width, height, SeedSource::from_seed(seed))
    }

    fn build(width: u32, height: u32, seeds: SeedSource) -> Result<Self> {
        validate_dimensions(width, height)?;

        let frame_bytes =
            frame_len(width, height).ok_or(FilterError::AllocationFailed { bytes: usize::MAX })?;
        let mut scratch = Vec::new();
        scratch
            .try_reserve_exact(frame_bytes)
            .map_err(|_| FilterError::AllocationFailed { bytes: frame_bytes })?;
        scratch.resize(frame_bytes, 0);

        let pairs = height as usize / 2;
        let mut row_seeds = Vec::new();
        row_seeds
            .try_reserve_exact(pairs)
            .map_err(|_| FilterError::AllocationFailed {
                bytes: pairs.saturating_mul(std::mem::size_of::<RowSeeds>()),
            })?;
        row_seeds.resize(pairs, RowSeeds::default());

        debug!("Created {}x{} SECAM filter ({} row pairs)", width, height, pairs);

        Ok(Self {
            width,
            height,
            fire_intensity: DEFAULT_FIRE_INTENSITY,
            noise_intensity: DEFAULT_NOISE_INTENSITY,
            tuning: Tuning::default(),
            variant: FilterVariant::default(),
            seeds,
            row_seeds,
            frame_bytes,
            scratch,
            frame_count: 0,
        })
    }

    /// Use a different set of variant strategies
    pub fn with_variant(mut self, variant: FilterVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw fire intensity, exactly as last set
    pub fn fire_intensity(&self) -> f64 {
        self.fire_intensity
    }

    /// Raw noise intensity, exactly as last set
    pub fn noise_intensity(&self) -> f64 {
        self.noise_intensity
    }

    /// Set the fire intensity, nominally in `[0, 1]`
    ///
    /// Values outside the range are accepted and extrapolate the threshold.
    pub fn set_fire_intensity(&mut self, value: f64) {
        self.fire_intensity = value;
        self.tuning.apply_fire_intensity(value);
    }

    /// Set the noise intensity, nominally in `[0, 1]`
    pub fn set_noise_intensity(&mut self, value: f64) {
        self.noise_intensity = value;
        self.tuning.apply_noise_intensity(value);
    }

    /// Constants derived from the current intensities
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn variant(&self) -> FilterVariant {
        self.variant
    }

    pub fn set_variant(&mut self, variant: FilterVariant) {
        self.variant = variant;
    }

    /// Number of frames processed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Size in bytes of a frame buffer for this filter
    pub fn frame_len(&self) -> usize {
        self.frame_bytes
    }

    /// Fail with [`FilterError::BufferSizeMismatch`] unless both buffers hold one frame
    pub fn check_buffers(&self, src: &[u8], dst: &[u8]) -> Result<()> {
        let expected = self.frame_len();
        check_len("source", expected, src.len())?;
        check_len("destination", expected, dst.len())
    }

    /// Degrade `src` into `dst`
    ///
    /// Both buffers must hold exactly `width * height` RGBA pixels. `dst` is
    /// fully overwritten; `src` is only read.
    pub fn process_frame(&mut self, src: &[u8], dst: &mut [u8]) -> Result<()> {
        self.check_buffers(src, dst)?;
        let expected = self.frame_len();

        self.seeds.fill(&mut self.row_seeds);

        // Never exceeds the frame size checked at construction
        let pair_len = expected / (self.height as usize / 2);
        let tuning = self.tuning;
        let variant = self.variant;

        self.scratch
            .par_chunks_exact_mut(pair_len)
            .zip(src.par_chunks_exact(pair_len))
            .zip(dst.par_chunks_exact_mut(pair_len))
            .zip(self.row_seeds.par_iter())
            .for_each(|(((work, src), dst), seeds)| {
                process_pair(work, src, dst, &tuning, variant, seeds);
            });

        self.frame_count += 1;
        Ok(())
    }
}

/// Run all four stages over one row pair
fn process_pair(
    work: &mut [u8],
    src: &[u8],
    dst: &mut [u8],
    tuning: &Tuning,
    variant: FilterVariant,
    seeds: &RowSeeds,
) {
    let row_len = work.len() / 2;
    let (even, odd) = work.split_at_mut(row_len);
    let (src_even, src_odd) = src.split_at(row_len);
    let (dst_even, dst_odd) = dst.split_at_mut(row_len);

    pack::pack_pair(src_even, src_odd, even, odd);

    detect::detect_row(
        even,
        tuning,
        variant.prefilter_seed,
        variant.scan_direction,
        Juice::new(seeds.detect_even),
    );
    detect::detect_row(
        odd,
        tuning,
        variant.prefilter_seed,
        variant.scan_direction,
        Juice::new(seeds.detect_odd),
    );

    inject::inject_pair(
        even,
        odd,
        tuning,
        variant.fire_sign,
        Juice::new(seeds.inject_even),
        Juice::new(seeds.inject_odd),
    );

    reconstruct::reconstruct_pair(even, odd, dst_even, dst_odd);
}

/// Bytes in one RGBA frame, or `None` when that exceeds the address space
fn frame_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(PIXEL_BYTES)
}

fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    let reason = if width == 0 || height == 0 {
        "dimensions must be non-zero"
    } else if width % 2 != 0 {
        "width must be even"
    } else if height % 2 != 0 {
        "height must be even"
    } else {
        return Ok(());
    };

    Err(FilterError::InvalidDimensions {
        width,
        height,
        reason: reason.to_string(),
    }
    .into())
}

fn check_len(buffer: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected != actual {
        return Err(FilterError::BufferSizeMismatch {
            buffer,
            expected,
            actual,
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SecamError;

    fn bytes(width: u32, height: u32) -> usize {
        frame_len(width, height).unwrap()
    }

    fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
        rgba.iter()
            .copied()
            .cycle()
            .take(bytes(width, height))
            .collect()
    }

    /// Left half white, right half black, on every row
    fn hard_edge(width: u32, height: u32) -> Vec<u8> {
        (0..height)
            .flat_map(|_| {
                (0..width).flat_map(move |x| {
                    if x < width / 2 {
                        [255, 255, 255, 255]
                    } else {
                        [0, 0, 0, 255]
                    }
                })
            })
            .collect()
    }

    fn noise_pattern(width: u32, height: u32) -> Vec<u8> {
        (0..bytes(width, height))
            .map(|i| (i.wrapping_mul(2_654_435_761) >> 7) as u8)
            .collect()
    }

    fn run(filter: &mut SecamFilter, src: &[u8]) -> Vec<u8> {
        let mut dst = vec![0; src.len()];
        filter.process_frame(src, &mut dst).unwrap();
        dst
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        for (w, h) in [(0, 2), (2, 0), (3, 2), (4, 5)] {
            let err = SecamFilter::new(w, h).err().unwrap();
            assert!(matches!(
                err,
                SecamError::Filter(FilterError::InvalidDimensions { .. })
            ));
        }
        assert!(SecamFilter::new(2, 2).is_ok());
    }

    #[test]
    fn test_oversized_frame_is_an_error() {
        let err = SecamFilter::with_seed(u32::MAX - 1, u32::MAX - 1, 1).err().unwrap();
        assert!(matches!(
            err,
            SecamError::Filter(FilterError::AllocationFailed { .. })
        ));
    }

    #[test]
    fn test_rejects_mismatched_buffers() {
        let mut filter = SecamFilter::with_seed(4, 2, 1).unwrap();
        let src = vec![0; 32];
        let mut short = vec![0; 31];
        let err = filter.process_frame(&src, &mut short).unwrap_err();
        assert!(matches!(
            err,
            SecamError::Filter(FilterError::BufferSizeMismatch { buffer: "destination", expected: 32, actual: 31 })
        ));

        let mut dst = vec![0; 32];
        assert!(filter.process_frame(&src[..16], &mut dst).is_err());
        assert_eq!(filter.frame_count(), 0);
    }

    #[test]
    fn test_defaults_and_getters() {
        let mut filter = SecamFilter::with_seed(8, 4, 1).unwrap();
        assert_eq!(filter.fire_intensity(), 0.125);
        assert_eq!(filter.noise_intensity(), 0.125);
        assert_eq!(*filter.tuning(), Tuning::default());

        filter.set_fire_intensity(12.5);
        filter.set_noise_intensity(-3.0);
        assert_eq!(filter.fire_intensity(), 12.5);
        assert_eq!(filter.noise_intensity(), -3.0);
        assert_eq!(filter.tuning().echo_offset, 2);
    }

    #[test]
    fn test_set_intensity_twice_is_idempotent() {
        let mut once = SecamFilter::with_seed(8, 2, 1).unwrap();
        let mut twice = SecamFilter::with_seed(8, 2, 1).unwrap();
        once.set_fire_intensity(0.6);
        twice.set_fire_intensity(0.6);
        twice.set_fire_intensity(0.6);
        assert_eq!(once.tuning(), twice.tuning());
    }

    #[test]
    fn test_deterministic_for_seed() {
        let src = noise_pattern(32, 8);
        for variant in [FilterVariant::legacy(), FilterVariant::latest()] {
            let mut a = SecamFilter::with_seed(32, 8, 99).unwrap().with_variant(variant);
            let mut b = SecamFilter::with_seed(32, 8, 99).unwrap().with_variant(variant);
            a.set_fire_intensity(0.8);
            b.set_fire_intensity(0.8);

            assert_eq!(run(&mut a, &src), run(&mut b, &src));
            assert_eq!(run(&mut a, &src), run(&mut b, &src));
        }
    }

    #[test]
    fn test_consecutive_frames_differ() {
        let src = noise_pattern(32, 8);
        let mut filter = SecamFilter::with_seed(32, 8, 5).unwrap();
        let first = run(&mut filter, &src);
        let second = run(&mut filter, &src);
        assert_ne!(first, second);
        assert_eq!(filter.frame_count(), 2);
    }

    #[test]
    fn test_source_untouched_and_alpha_passthrough() {
        let mut src = noise_pattern(16, 4);
        for (i, px) in src.chunks_exact_mut(PIXEL_BYTES).enumerate() {
            px[ALPHA] = (i * 17) as u8;
        }
        let original = src.clone();

        for (fire, noise) in [(0.125, 0.125), (10.0, 10.0), (-5.0, -5.0), (1.0, 0.0)] {
            let mut filter = SecamFilter::with_seed(16, 4, 3).unwrap();
            filter.set_fire_intensity(fire);
            filter.set_noise_intensity(noise);
            let dst = run(&mut filter, &src);

            assert_eq!(src, original);
            for (out, inp) in dst.chunks_exact(PIXEL_BYTES).zip(src.chunks_exact(PIXEL_BYTES)) {
                assert_eq!(out[ALPHA], inp[ALPHA]);
            }
        }
    }

    #[test]
    fn test_extreme_intensities_complete() {
        let src = hard_edge(64, 4);
        for variant in [FilterVariant::legacy(), FilterVariant::latest()] {
            for value in [10.0, -5.0, 1e9, f64::NAN] {
                let mut filter = SecamFilter::with_seed(64, 4, 11).unwrap().with_variant(variant);
                filter.set_fire_intensity(value);
                filter.set_noise_intensity(value);
                let dst = run(&mut filter, &src);
                assert_eq!(dst.len(), src.len());
            }
        }
    }

    #[test]
    fn test_neutral_gray_round_trip() {
        let src = filled(64, 2, [128, 128, 128, 255]);
        let mut filter = SecamFilter::with_seed(64, 2, 1).unwrap();
        filter.set_fire_intensity(0.0);
        filter.set_noise_intensity(0.0);
        // The noise floors never reach zero through the public knobs
        filter.tuning.luma_noise = 0;
        filter.tuning.chroma_noise = 0;
        filter.tuning.echo_offset = 0;

        let dst = run(&mut filter, &src);
        for px in dst.chunks_exact(PIXEL_BYTES) {
            for c in 0..3 {
                assert!((px[c] as i32 - 128).abs() <= 2, "got {:?}", px);
            }
            assert_eq!(px[ALPHA], 255);
        }
    }

    #[test]
    fn test_fire_ignites_downstream_of_edge() {
        let (width, height) = (64, 2);
        let src = hard_edge(width, height);
        let seed = 141;

        // Same seed with and without ignition: any difference is fire
        let mut with_fire = SecamFilter::with_seed(width, height, seed).unwrap();
        let mut without = SecamFilter::with_seed(width, height, seed).unwrap();
        without.tuning.fire_threshold = i32::MAX;

        let burnt = run(&mut with_fire, &src);
        let clean = run(&mut without, &src);

        // The forward chroma window reaches back at most CHROMA_LOSS pixels
        let edge = (width / 2) as usize - reconstruct::CHROMA_LOSS;
        let mut perturbed = false;
        for (i, (a, b)) in burnt
            .chunks_exact(PIXEL_BYTES)
            .zip(clean.chunks_exact(PIXEL_BYTES))
            .enumerate()
        {
            let column = i % width as usize;
            if column < edge {
                assert_eq!(a, b, "fire upstream of the edge at column {}", column);
            } else if (0..3).any(|c| (a[c] as i32 - b[c] as i32).abs() > 2) {
                perturbed = true;
            }
        }
        assert!(perturbed, "no fire streak near the edge");
    }

    #[test]
    fn test_noise_floor_perturbs_flat_frames() {
        let src = filled(32, 4, [90, 120, 200, 255]);
        let mut filter = SecamFilter::with_seed(32, 4, 8).unwrap();
        filter.set_noise_intensity(1.0);
        let dst = run(&mut filter, &src);
        assert_ne!(dst, src);
    }
}
