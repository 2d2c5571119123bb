use rand::{rngs::SmallRng, Rng, SeedableRng};

/// Cheap xorshift stream driving a single scanline
///
/// Not cryptographic. Two streams built from the same seed produce the same
/// sequence, which is what makes frames reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Juice(i32);

impl Juice {
    pub fn new(seed: i32) -> Self {
        Self(seed)
    }

    /// Current value of the stream
    #[inline]
    pub fn value(&self) -> i32 {
        self.0
    }

    /// Step the stream forward
    #[inline]
    pub fn advance(&mut self) {
        let mut j = self.0;
        j ^= j << 13;
        j ^= j >> 17;
        j ^= j << 5;
        self.0 = j;
    }

    /// Non-negative remainder of the current value
    #[inline]
    pub fn umod(&self, modulus: i32) -> i32 {
        self.0.rem_euclid(modulus)
    }
}

/// Seeds for the four scanline streams of one row pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowSeeds {
    pub detect_even: i32,
    pub detect_odd: i32,
    pub inject_even: i32,
    pub inject_odd: i32,
}

/// Source of per-row seeds, owned by a filter instance
#[derive(Debug, Clone)]
pub struct SeedSource {
    rng: SmallRng,
}

impl SeedSource {
    /// Seed source initialised from OS entropy
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Reproducible seed source
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Fill `seeds` for one frame, in row-pair order
    pub fn fill(&mut self, seeds: &mut [RowSeeds]) {
        for pair in seeds.iter_mut() {
            *pair = RowSeeds {
                detect_even: self.next_seed(),
                detect_odd: self.next_seed(),
                inject_even: self.next_seed(),
                inject_odd: self.next_seed(),
            };
        }
    }

    fn next_seed(&mut self) -> i32 {
        self.rng.gen_range(0..=i32::MAX)
    }
}
