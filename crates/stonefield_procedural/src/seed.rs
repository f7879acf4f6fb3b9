//! # World Seeds
//!
//! Every deterministic stream in the generator (octave offsets, the base
//! Perlin permutation, tile-kind scattering) is derived from one integer
//! seed, so regenerating with the same settings reproduces the same terrain.

/// Seed for deterministic generation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct WorldSeed(u64);

impl WorldSeed {
    /// Creates a new world seed.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Creates a seed from a signed configuration value.
    ///
    /// The bit pattern is kept, so `-1` and `u64::MAX` are the same seed.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub const fn from_signed(seed: i64) -> Self {
        Self(seed as u64)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Derives a sub-seed for a specific purpose.
    ///
    /// Uses a hash function to create independent streams from one seed.
    #[inline]
    #[must_use]
    pub const fn derive(self, purpose: u64) -> Self {
        // FNV-1a style mixing
        let mut hash = self.0;
        hash ^= purpose;
        hash = hash.wrapping_mul(0x517c_c1b7_2722_0a95);
        hash ^= hash >> 32;
        hash = hash.wrapping_mul(0x9e37_79b9_7f4a_7c15);
        hash ^= hash >> 29;
        Self(hash)
    }

    /// Maps the seed onto `[0, 1)` using its top 53 bits.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn unit(self) -> f64 {
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Low 32 bits, for consumers that take a `u32` seed.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn low_u32(self) -> u32 {
        self.0 as u32
    }
}
