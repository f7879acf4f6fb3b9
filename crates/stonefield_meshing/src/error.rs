//! # Meshing Error Types

use stonefield_procedural::TileKind;
use thiserror::Error;

use crate::face::Face;

/// Errors that abort a mesh pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// A solid tile has no column in the texture atlas.
    #[error("tile kind {kind:?} has no slot in a {atlas_width}-wide atlas")]
    UnmappedTileKind {
        /// The offending kind.
        kind: TileKind,
        /// Atlas width in tiles.
        atlas_width: u32,
    },

    /// A wired neighbor's shared face does not line up with ours.
    #[error("neighbor on {side:?} has face {actual:?}, expected {expected:?}")]
    NeighborShapeMismatch {
        /// Which side of this grid the neighbor sits on.
        side: Face,
        /// Our face extents along the two tangent axes.
        expected: [usize; 2],
        /// The neighbor's face extents along the same axes.
        actual: [usize; 2],
    },
}

/// Result type for meshing operations.
pub type MeshResult<T> = Result<T, MeshError>;
