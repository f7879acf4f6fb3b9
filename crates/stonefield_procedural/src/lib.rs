//! # STONEFIELD Procedural Generation
//!
//! Deterministic noise fields and tile grids for chunked voxel terrain.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: Same settings always produce the same field, bit for bit
//! 2. **Wholesale**: A tile grid is rebuilt from a fresh sample, never edited
//! 3. **Permissive input**: Out-of-range settings are clamped, not rejected
//!
//! ## Core Components
//!
//! - `NoiseField`: 2D/3D fractal Perlin sampling
//! - `TileGrid`: Solid/empty classification of a sampled volume
//! - `TileClassifier`: Threshold plus solid-kind policy
//! - `WorldSeed`: Seed derivation for independent streams
//!
//! ## Example
//!
//! ```rust,ignore
//! use stonefield_procedural::{Extent3, NoiseField, NoiseSettings, TileClassifier, TileGrid};
//!
//! let field = NoiseField::new(NoiseSettings::default());
//! let volume = field.sample_3d(Extent3::new(16, 16, 16));
//! let grid = TileGrid::build(&volume, &TileClassifier::stone(0.5));
//! assert_eq!(grid.extent(), volume.extent());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod extent;
pub mod grid;
pub mod noise;
pub mod seed;
pub mod tile;

pub use error::{TerrainError, TerrainResult};
pub use extent::Extent3;
pub use grid::TileGrid;
pub use noise::{NoiseField, NoiseMap, NoiseSettings, NoiseVolume, MIN_SCALE};
pub use seed::WorldSeed;
pub use tile::{Tile, TileClassifier, TileKind, TilePolicy};
