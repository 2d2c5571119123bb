/// Fire intensity applied to a freshly constructed filter
pub const DEFAULT_FIRE_INTENSITY: f64 = 0.125;

/// Noise intensity applied to a freshly constructed filter
pub const DEFAULT_NOISE_INTENSITY: f64 = 0.125;

/// Integer constants the pipeline actually runs on
///
/// The fire fields only depend on the fire intensity and the noise fields only
/// on the noise intensity, so each half is recomputed independently when its
/// intensity changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tuning {
    /// Oscillation sum above which a pixel becomes an ignition point
    pub fire_threshold: i32,

    /// Oscillation carry-in used by [`PrefilterSeed::FireSeed`](super::PrefilterSeed)
    pub fire_seed: i32,

    /// Upper bound (exclusive) of the additive luma noise
    pub luma_noise: i32,

    /// Upper bound (exclusive) of the additive chroma noise
    pub chroma_noise: i32,

    /// Distance in pixels of the luma echo
    pub echo_offset: i32,
}

impl Tuning {
    /// Derive the full tuning from both intensities
    pub fn from_intensities(fire_intensity: f64, noise_intensity: f64) -> Self {
        let mut tuning = Self {
            fire_threshold: 0,
            fire_seed: 0,
            luma_noise: 0,
            chroma_noise: 0,
            echo_offset: 0,
        };
        tuning.apply_fire_intensity(fire_intensity);
        tuning.apply_noise_intensity(noise_intensity);
        tuning
    }

    /// Recompute the fire-dependent constants
    pub fn apply_fire_intensity(&mut self, x: f64) {
        self.fire_threshold = 1024 - (x * x * 256.0) as i32;
        self.fire_seed = (x * 1024.0) as i32;
    }

    /// Recompute the noise-dependent constants
    pub fn apply_noise_intensity(&mut self, x: f64) {
        self.luma_noise = ((x * x * 256.0) as i32).clamp(16, 224);
        self.chroma_noise = ((x * 256.0) as i32).clamp(32, 256);
        self.echo_offset = ((x * 8.0) as i32).clamp(2, 16);
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::from_intensities(DEFAULT_FIRE_INTENSITY, DEFAULT_NOISE_INTENSITY)
    }
}
