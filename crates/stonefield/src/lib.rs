//! # STONEFIELD
//!
//! Seamless voxel terrain from a seeded fractal noise field, generated as a
//! lattice of independent chunks.
//!
//! ## Pipeline
//!
//! ```text
//! TerrainConfig
//!      │
//!      ▼
//! ┌──────────────┐   phase 1 (per chunk)   ┌──────────┐
//! │  NoiseField  │ ──────────────────────> │ TileGrid │
//! └──────────────┘                         └────┬─────┘
//!                        barrier: every chunk   │
//!                        has tiles              ▼
//!                                  ┌─────────────────────────┐
//!                phase 2 (per      │ Mesher + boundary stitch│
//!                chunk)            │  own grid + 4 neighbors │
//!                                  └────────────┬────────────┘
//!                                               ▼
//!                                        GeometryBuffer
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use stonefield::{ChunkLattice, TerrainConfig};
//!
//! let mut lattice = ChunkLattice::new(TerrainConfig::from_toml_str("[noise]\nseed = 7")?);
//! for mesh in lattice.generate()? {
//!     upload(mesh.coord, mesh.geometry.position_bytes());
//! }
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod chunk;
pub mod config;
pub mod error;
pub mod lattice;

pub use stonefield_meshing as meshing;
pub use stonefield_procedural as procedural;

pub use chunk::{Chunk, ChunkCoord, ChunkId, ChunkMesh, NeighborLinks};
pub use config::{ChunkDimensions, LatticeConfig, TerrainConfig};
pub use error::{ConfigError, LatticeError, LatticeResult};
pub use lattice::{ChunkLattice, LatticeStats};
