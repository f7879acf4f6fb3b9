//! # Lattice Error Types

use std::path::PathBuf;

use stonefield_meshing::MeshError;
use thiserror::Error;

use crate::chunk::ChunkId;

/// Errors raised by the chunk lattice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LatticeError {
    /// A chunk (or a wired neighbor) was meshed before its tiles existed.
    #[error("tiles for chunk {id:?} have not been built")]
    TilesNotBuilt {
        /// The chunk missing its tiles.
        id: ChunkId,
    },

    /// The id does not name a chunk in this lattice.
    #[error("chunk {id:?} is not in a lattice of {count} chunks")]
    UnknownChunk {
        /// Requested id.
        id: ChunkId,
        /// Number of chunks in the lattice.
        count: usize,
    },

    /// Meshing a chunk failed.
    #[error("mesh error: {0}")]
    Mesh(#[from] MeshError),
}

/// Result type for lattice operations.
pub type LatticeResult<T> = Result<T, LatticeError>;

/// Errors raised while loading a [`TerrainConfig`](crate::TerrainConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The text is not a valid terrain config.
    #[error("invalid terrain config: {0}")]
    Parse(#[from] toml::de::Error),
}
