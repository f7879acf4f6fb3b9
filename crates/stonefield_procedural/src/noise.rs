//! # Fractal Noise Field
//!
//! Deterministic octave noise over 2D and 3D lattices.
//!
//! ## Algorithm
//!
//! 1. Seed a ChaCha8 stream and draw one integer offset per axis per octave
//!    in `[-100000, 100000)`; the configured offset is added on top. This
//!    decorrelates the octaves.
//! 2. For every lattice point, sum `octaves` Perlin samples taken at
//!    `(coord - half_extent) / scale * frequency + octave_offset`, each
//!    weighted by the running amplitude.
//! 3. Map the sum from `[-norm, norm]` back into `[0, 1]` with
//!    `(sum + norm) / (2 * norm)`, where `norm` is the sum of amplitudes.
//!
//! ## Determinism Guarantee
//!
//! Given the same `NoiseSettings`, sampling produces **exactly** the same
//! values, every time. Nothing reads ambient randomness.

use noise::{NoiseFn, Perlin};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{TerrainError, TerrainResult};
use crate::extent::Extent3;
use crate::seed::WorldSeed;

/// Smallest usable scale. Non-positive scales are clamped to this.
pub const MIN_SCALE: f32 = 0.0001;

/// Octave offsets are drawn from `[-OCTAVE_OFFSET_RANGE, OCTAVE_OFFSET_RANGE)`.
pub const OCTAVE_OFFSET_RANGE: i32 = 100_000;

/// Purpose tag for the Perlin permutation seed.
const PERLIN_STREAM: u64 = 0x5045_524c_494e;

/// Parameters that fully determine a noise field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseSettings {
    /// Seed for octave offsets and the Perlin permutation.
    pub seed: i64,
    /// Feature size in lattice cells. Must be positive.
    pub scale: f32,
    /// Number of noise layers.
    pub octaves: u32,
    /// Amplitude decay per octave (typically 0-1).
    pub persistence: f32,
    /// Frequency growth per octave (at least 1).
    pub lacunarity: f32,
    /// Offset added to every octave's sample point. The 2D sampler uses X/Y.
    pub offset: [f32; 3],
}

impl Default for NoiseSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            scale: 10.0,
            octaves: 3,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: [0.0; 3],
        }
    }
}

impl NoiseSettings {
    /// Returns a copy with every out-of-range parameter clamped.
    ///
    /// - `scale <= 0` (or NaN) becomes [`MIN_SCALE`]
    /// - `persistence < 0` (or NaN) becomes 0
    /// - `lacunarity < 1` (or NaN) becomes 1
    #[must_use]
    pub fn sanitized(self) -> Self {
        let mut settings = self;

        if settings.scale.is_nan() || settings.scale <= 0.0 {
            tracing::warn!(scale = settings.scale, "noise scale must be positive, clamping");
            settings.scale = MIN_SCALE;
        }
        if settings.persistence.is_nan() || settings.persistence < 0.0 {
            tracing::warn!(persistence = settings.persistence, "negative persistence, clamping to 0");
            settings.persistence = 0.0;
        }
        if settings.lacunarity.is_nan() || settings.lacunarity < 1.0 {
            tracing::warn!(lacunarity = settings.lacunarity, "lacunarity below 1, clamping to 1");
            settings.lacunarity = 1.0;
        }
        for axis in &mut settings.offset {
            if !axis.is_finite() {
                *axis = 0.0;
            }
        }

        settings
    }

    /// Returns a copy with `local` added to the offset.
    #[must_use]
    pub fn offset_by(self, local: [f32; 3]) -> Self {
        let mut settings = self;
        for (axis, delta) in settings.offset.iter_mut().zip(local) {
            *axis += delta;
        }
        settings
    }

    /// The seed as a [`WorldSeed`].
    #[inline]
    #[must_use]
    pub const fn world_seed(&self) -> WorldSeed {
        WorldSeed::from_signed(self.seed)
    }
}

/// A dense `width x height` sample, indexed `y * width + x`.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseMap {
    width: usize,
    height: usize,
    values: Vec<f32>,
}

impl NoiseMap {
    /// Width in samples.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in samples.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Value at `(x, y)`, or `None` outside the map.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f32> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }

    /// All values in row-major order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// A dense 3D sample in [`Extent3`] order.
#[derive(Clone, Debug, PartialEq)]
pub struct NoiseVolume {
    extent: Extent3,
    values: Vec<f32>,
}

impl NoiseVolume {
    /// Wraps raw values, e.g. a hand-built test dataset.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::ValueCountMismatch`] if `values` does not hold
    /// exactly one value per cell.
    pub fn from_values(extent: Extent3, values: Vec<f32>) -> TerrainResult<Self> {
        if values.len() != extent.volume() {
            return Err(TerrainError::ValueCountMismatch {
                expected: extent.volume(),
                actual: values.len(),
            });
        }
        Ok(Self { extent, values })
    }

    /// Dimensions of the sample.
    #[inline]
    #[must_use]
    pub const fn extent(&self) -> Extent3 {
        self.extent
    }

    /// Value at `(x, y, z)`, or `None` outside the volume.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<f32> {
        self.extent
            .contains(x, y, z)
            .then(|| self.values[self.extent.index(x, y, z)])
    }

    /// All values in Z-Y-X order.
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// Fractal Perlin noise sampler.
///
/// # Example
///
/// ```rust,ignore
/// let field = NoiseField::new(NoiseSettings { seed: 42, ..NoiseSettings::default() });
/// let volume = field.sample_3d(Extent3::new(16, 16, 16));
/// assert!(volume.values().iter().all(|v| (0.0..=1.0).contains(v)));
/// ```
pub struct NoiseField {
    /// Sanitized settings.
    settings: NoiseSettings,
    /// Base coherent noise.
    perlin: Perlin,
}

impl NoiseField {
    /// Creates a sampler. Settings are sanitized first.
    #[must_use]
    pub fn new(settings: NoiseSettings) -> Self {
        let settings = settings.sanitized();
        let perlin = Perlin::new(settings.world_seed().derive(PERLIN_STREAM).low_u32());
        Self { settings, perlin }
    }

    /// The sanitized settings in use.
    #[inline]
    #[must_use]
    pub const fn settings(&self) -> &NoiseSettings {
        &self.settings
    }

    /// Samples a `width x height` map with values in `[0, 1]`.
    #[must_use]
    pub fn sample_2d(&self, width: usize, height: usize) -> NoiseMap {
        let offsets = self.octave_offsets::<2>();
        let half = [half_extent(width), half_extent(height)];

        let mut values = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                values.push(self.fractal([to_f64(x) - half[0], to_f64(y) - half[1]], &offsets));
            }
        }

        NoiseMap {
            width,
            height,
            values,
        }
    }

    /// Samples a 3D volume with values in `[0, 1]`.
    #[must_use]
    pub fn sample_3d(&self, extent: Extent3) -> NoiseVolume {
        let offsets = self.octave_offsets::<3>();
        let half = [
            half_extent(extent.width),
            half_extent(extent.height),
            half_extent(extent.depth),
        ];

        let mut values = Vec::with_capacity(extent.volume());
        for z in 0..extent.depth {
            for y in 0..extent.height {
                for x in 0..extent.width {
                    let centered = [
                        to_f64(x) - half[0],
                        to_f64(y) - half[1],
                        to_f64(z) - half[2],
                    ];
                    values.push(self.fractal(centered, &offsets));
                }
            }
        }

        NoiseVolume { extent, values }
    }

    /// Draws the per-octave offsets, X then Y (then Z) for each octave.
    fn octave_offsets<const N: usize>(&self) -> Vec<[f64; N]> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.settings.world_seed().value());

        (0..self.settings.octaves)
            .map(|_| {
                let mut offset = [0.0; N];
                for (axis, value) in offset.iter_mut().enumerate() {
                    let drawn = rng.gen_range(-OCTAVE_OFFSET_RANGE..OCTAVE_OFFSET_RANGE);
                    *value = f64::from(drawn) + f64::from(self.settings.offset[axis]);
                }
                offset
            })
            .collect()
    }

    /// Sums the octaves at one centered lattice point.
    #[allow(clippy::cast_possible_truncation)]
    fn fractal<const N: usize>(&self, centered: [f64; N], offsets: &[[f64; N]]) -> f32
    where
        Perlin: NoiseFn<f64, N>,
    {
        // No octaves: a flat field sitting in the middle of the range.
        if offsets.is_empty() {
            return 0.5;
        }

        let scale = f64::from(self.settings.scale);
        let persistence = f64::from(self.settings.persistence);
        let lacunarity = f64::from(self.settings.lacunarity);

        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut total = 0.0;
        let mut norm = 0.0;

        for offset in offsets {
            let mut point = [0.0; N];
            for (axis, value) in point.iter_mut().enumerate() {
                *value = centered[axis] / scale * frequency + offset[axis];
            }

            total += remap_signed(self.perlin.get(point)) * amplitude;
            norm += amplitude;

            amplitude *= persistence;
            frequency *= lacunarity;
        }

        let value = (total + norm) / (2.0 * norm);
        if value.is_finite() {
            value.clamp(0.0, 1.0) as f32
        } else {
            0.5
        }
    }
}

/// Brings a raw Perlin sample into `[-1, 1]`.
///
/// Perlin is already signed, so this only trims the small overshoot some
/// gradient sets produce near cell corners.
#[inline]
fn remap_signed(raw: f64) -> f64 {
    raw.clamp(-1.0, 1.0)
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn to_f64(value: usize) -> f64 {
    value as f64
}

#[inline]
fn half_extent(length: usize) -> f64 {
    to_f64(length) / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(seed: i64, octaves: u32) -> NoiseSettings {
        NoiseSettings {
            seed,
            scale: 10.0,
            octaves,
            persistence: 0.5,
            lacunarity: 2.0,
            offset: [0.0; 3],
        }
    }

    #[test]
    fn test_determinism() {
        let extent = Extent3::new(8, 6, 5);
        let first = NoiseField::new(settings(12345, 4)).sample_3d(extent);
        let second = NoiseField::new(settings(12345, 4)).sample_3d(extent);

        let bits1: Vec<u32> = first.values().iter().map(|v| v.to_bits()).collect();
        let bits2: Vec<u32> = second.values().iter().map(|v| v.to_bits()).collect();
        assert_eq!(bits1, bits2, "Noise should be bit-identical for identical settings");
    }

    #[test]
    fn test_different_seeds_different_results() {
        let extent = Extent3::new(8, 8, 8);
        let a = NoiseField::new(settings(1, 3)).sample_3d(extent);
        let b = NoiseField::new(settings(2, 3)).sample_3d(extent);
        assert_ne!(a.values(), b.values(), "Different seeds should produce different fields");
    }

    #[test]
    fn test_range() {
        let extent = Extent3::new(12, 12, 12);
        for octaves in [1, 2, 5, 8] {
            let volume = NoiseField::new(settings(42, octaves)).sample_3d(extent);
            for &value in volume.values() {
                assert!(
                    (0.0..=1.0).contains(&value),
                    "Value {value} out of range with {octaves} octaves"
                );
            }
        }
    }

    #[test]
    fn test_zero_octaves_is_flat() {
        let volume = NoiseField::new(settings(7, 0)).sample_3d(Extent3::new(4, 4, 4));
        assert!(volume.values().iter().all(|&v| v == 0.5));

        let map = NoiseField::new(settings(7, 0)).sample_2d(4, 4);
        assert!(map.values().iter().all(|&v| v == 0.5));
    }

    #[test]
    fn test_scale_is_clamped() {
        for scale in [0.0, -3.0, f32::NAN] {
            let field = NoiseField::new(NoiseSettings { scale, ..settings(3, 2) });
            assert_eq!(field.settings().scale, MIN_SCALE);

            let volume = field.sample_3d(Extent3::new(5, 5, 5));
            assert!(volume.values().iter().all(|v| (0.0..=1.0).contains(v)));
        }
    }

    #[test]
    fn test_sanitize_persistence_and_lacunarity() {
        let clean = NoiseSettings {
            persistence: -0.5,
            lacunarity: 0.0,
            ..settings(0, 3)
        }
        .sanitized();
        assert_eq!(clean.persistence, 0.0);
        assert_eq!(clean.lacunarity, 1.0);

        let untouched = settings(0, 3).sanitized();
        assert_eq!(untouched, settings(0, 3));
    }

    #[test]
    fn test_octave_offsets_within_range() {
        let field = NoiseField::new(NoiseSettings {
            offset: [0.25, 0.5, 0.75],
            ..settings(99, 6)
        });
        let offsets = field.octave_offsets::<3>();
        assert_eq!(offsets.len(), 6);

        let limit = f64::from(OCTAVE_OFFSET_RANGE) + 1.0;
        for offset in &offsets {
            for value in offset {
                assert!(value.abs() < limit, "Offset {value} outside drawing range");
            }
        }
        assert_eq!(offsets, field.octave_offsets::<3>(), "Offsets must be reproducible");
    }

    #[test]
    fn test_offset_changes_field() {
        let extent = Extent3::new(6, 6, 6);
        let base = NoiseField::new(settings(5, 3)).sample_3d(extent);
        let shifted = NoiseField::new(settings(5, 3).offset_by([1.3, 0.0, 0.0])).sample_3d(extent);
        assert_ne!(base.values(), shifted.values());
    }

    #[test]
    fn test_sample_2d_dimensions() {
        let map = NoiseField::new(settings(11, 4)).sample_2d(7, 3);
        assert_eq!(map.width(), 7);
        assert_eq!(map.height(), 3);
        assert_eq!(map.values().len(), 21);
        assert!(map.get(6, 2).is_some());
        assert!(map.get(7, 0).is_none());
        assert!(map.values().iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn test_volume_from_values_checks_length() {
        let extent = Extent3::new(2, 2, 2);
        assert!(NoiseVolume::from_values(extent, vec![0.0; 8]).is_ok());
        assert_eq!(
            NoiseVolume::from_values(extent, vec![0.0; 7]),
            Err(TerrainError::ValueCountMismatch { expected: 8, actual: 7 })
        );
    }
}
