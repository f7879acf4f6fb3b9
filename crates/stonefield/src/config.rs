//! # Terrain Configuration
//!
//! Everything that determines a lattice's output, in one serde struct.
//! Loaded once from TOML (or built in code) and passed by reference into
//! each pipeline stage.
//!
//! ```toml
//! threshold = 0.45
//! atlas_width = 8
//!
//! [noise]
//! seed = 1337
//! scale = 12.0
//! octaves = 4
//!
//! [chunk]
//! width = 16
//! height = 32
//! depth = 16
//!
//! [lattice]
//! chunks_x = 4
//! chunks_z = 4
//! ```
//!
//! Missing keys take their defaults. Out-of-range values are clamped by
//! [`TerrainConfig::sanitized`], never rejected.

use std::path::Path;

use serde::{Deserialize, Serialize};
use stonefield_procedural::{Extent3, NoiseSettings, TileClassifier, TilePolicy};

use crate::chunk::ChunkCoord;
use crate::error::ConfigError;

/// Default solid/empty cut-off.
pub const DEFAULT_THRESHOLD: f32 = 0.5;

/// Default noise-space distance between adjacent chunks.
pub const DEFAULT_SPACING: f32 = 1.3;

/// Tiles per chunk along each axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkDimensions {
    /// Tiles along X.
    pub width: usize,
    /// Tiles along Y.
    pub height: usize,
    /// Tiles along Z.
    pub depth: usize,
}

impl Default for ChunkDimensions {
    fn default() -> Self {
        Self {
            width: 16,
            height: 16,
            depth: 16,
        }
    }
}

impl ChunkDimensions {
    /// As an [`Extent3`].
    #[must_use]
    pub const fn extent(self) -> Extent3 {
        Extent3::new(self.width, self.height, self.depth)
    }
}

/// Size and spacing of the chunk lattice.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeConfig {
    /// Chunks along X.
    pub chunks_x: u32,
    /// Chunks along Z.
    pub chunks_z: u32,
    /// Noise-space offset between neighboring chunks.
    pub spacing: f32,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            chunks_x: 3,
            chunks_z: 3,
            spacing: DEFAULT_SPACING,
        }
    }
}

impl LatticeConfig {
    /// Total number of chunks.
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunks_x as usize * self.chunks_z as usize
    }

    /// Noise-space offset of the chunk at `coord`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn local_offset(&self, coord: ChunkCoord) -> [f32; 3] {
        [coord.x as f32 * self.spacing, 0.0, coord.z as f32 * self.spacing]
    }
}

/// Complete terrain description.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainConfig {
    /// Fractal noise parameters.
    pub noise: NoiseSettings,
    /// Values strictly above this are empty.
    pub threshold: f32,
    /// How solid tiles choose their kind.
    pub policy: TilePolicy,
    /// Tiles per chunk.
    pub chunk: ChunkDimensions,
    /// Lattice size and spacing.
    pub lattice: LatticeConfig,
    /// Columns in the texture atlas.
    pub atlas_width: u32,
    /// Run each phase on the rayon pool.
    pub parallel: bool,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            noise: NoiseSettings::default(),
            threshold: DEFAULT_THRESHOLD,
            policy: TilePolicy::StoneOnly,
            chunk: ChunkDimensions::default(),
            lattice: LatticeConfig::default(),
            atlas_width: 8,
            parallel: true,
        }
    }
}

impl TerrainConfig {
    /// Parses a config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid for this schema.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Reads and parses a TOML config file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read and
    /// [`ConfigError::Parse`] if its contents are invalid.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Serializes the config back to TOML.
    ///
    /// # Errors
    ///
    /// Fails only if a float is not representable in TOML.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Returns a copy with every out-of-range value clamped.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        config.noise = config.noise.sanitized();

        if config.threshold.is_nan() {
            tracing::warn!("threshold is NaN, using {DEFAULT_THRESHOLD}");
            config.threshold = DEFAULT_THRESHOLD;
        }

        if let TilePolicy::SeededMix { grass_ratio } = &mut config.policy {
            let clamped = if grass_ratio.is_nan() { 0.0 } else { grass_ratio.clamp(0.0, 1.0) };
            if clamped.to_bits() != grass_ratio.to_bits() {
                tracing::warn!(grass_ratio = *grass_ratio, clamped, "grass ratio outside [0, 1]");
                *grass_ratio = clamped;
            }
        }

        let extent = config.chunk.extent();
        if extent.is_empty() {
            tracing::warn!(?extent, "chunk dimensions must be positive, clamping to 1");
            let fixed = extent.at_least_one();
            config.chunk = ChunkDimensions {
                width: fixed.width,
                height: fixed.height,
                depth: fixed.depth,
            };
        }

        if config.lattice.chunks_x == 0 || config.lattice.chunks_z == 0 {
            tracing::warn!(
                chunks_x = config.lattice.chunks_x,
                chunks_z = config.lattice.chunks_z,
                "lattice must hold at least one chunk per axis, clamping to 1"
            );
            config.lattice.chunks_x = config.lattice.chunks_x.max(1);
            config.lattice.chunks_z = config.lattice.chunks_z.max(1);
        }

        if !config.lattice.spacing.is_finite() {
            tracing::warn!(spacing = config.lattice.spacing, "non-finite chunk spacing");
            config.lattice.spacing = DEFAULT_SPACING;
        }

        if config.atlas_width == 0 {
            tracing::warn!("atlas width must be positive, clamping to 1");
            config.atlas_width = 1;
        }

        config
    }

    /// Classifier for the chunk at `coord`.
    ///
    /// Each chunk gets its own kind seed so mixed policies do not repeat
    /// from chunk to chunk.
    #[must_use]
    pub fn classifier(&self, coord: ChunkCoord) -> TileClassifier {
        let seed = self.noise.world_seed().derive(coord.seed_key());
        TileClassifier::new(self.threshold, self.policy, seed)
    }
}
