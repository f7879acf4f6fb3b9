//! # Chunks
//!
//! A chunk is one cell of the lattice: a tile grid, where it sits, and
//! which chunks border it. Chunks live in the lattice's arena and refer to
//! each other by [`ChunkId`].

use stonefield_meshing::GeometryBuffer;
use stonefield_procedural::TileGrid;

/// Index of a chunk in the lattice arena.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ChunkId(pub usize);

impl ChunkId {
    /// Arena index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Chunk coordinate (identifies a chunk in the lattice).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChunkCoord {
    /// X coordinate (in chunks, not tiles).
    pub x: u32,
    /// Z coordinate (in chunks, not tiles).
    pub z: u32,
}

impl ChunkCoord {
    /// Creates a new chunk coordinate.
    #[inline]
    #[must_use]
    pub const fn new(x: u32, z: u32) -> Self {
        Self { x, z }
    }

    /// Key for per-chunk seed derivation.
    #[inline]
    #[must_use]
    pub const fn seed_key(self) -> u64 {
        ((self.x as u64) << 32) | self.z as u64
    }
}

/// Handles to the four horizontal neighbors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NeighborLinks {
    /// Chunk at -X.
    pub left: Option<ChunkId>,
    /// Chunk at +X.
    pub right: Option<ChunkId>,
    /// Chunk at -Z.
    pub back: Option<ChunkId>,
    /// Chunk at +Z.
    pub front: Option<ChunkId>,
}

impl NeighborLinks {
    /// Wired neighbors, in left/right/back/front order.
    pub fn iter(&self) -> impl Iterator<Item = ChunkId> {
        [self.left, self.right, self.back, self.front]
            .into_iter()
            .flatten()
    }
}

/// One region of the lattice.
#[derive(Clone, Debug)]
pub struct Chunk {
    pub(crate) id: ChunkId,
    pub(crate) coord: ChunkCoord,
    pub(crate) local_offset: [f32; 3],
    pub(crate) tiles: Option<TileGrid>,
    pub(crate) neighbors: NeighborLinks,
}

impl Chunk {
    pub(crate) const fn new(id: ChunkId, coord: ChunkCoord, local_offset: [f32; 3]) -> Self {
        Self {
            id,
            coord,
            local_offset,
            tiles: None,
            neighbors: NeighborLinks {
                left: None,
                right: None,
                back: None,
                front: None,
            },
        }
    }

    /// Arena id.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> ChunkId {
        self.id
    }

    /// Lattice coordinate.
    #[inline]
    #[must_use]
    pub const fn coord(&self) -> ChunkCoord {
        self.coord
    }

    /// Noise-space offset added to the global noise offset.
    #[inline]
    #[must_use]
    pub const fn local_offset(&self) -> [f32; 3] {
        self.local_offset
    }

    /// Tiles from the last build, if any.
    #[inline]
    #[must_use]
    pub const fn tiles(&self) -> Option<&TileGrid> {
        self.tiles.as_ref()
    }

    /// Neighbor handles.
    #[inline]
    #[must_use]
    pub const fn neighbors(&self) -> NeighborLinks {
        self.neighbors
    }
}

/// Mesh output for one chunk, handed to the renderer by value.
#[derive(Clone, Debug, PartialEq)]
pub struct ChunkMesh {
    /// Which chunk this is.
    pub id: ChunkId,
    /// Where it sits in the lattice.
    pub coord: ChunkCoord,
    /// Chunk-local surface.
    pub geometry: GeometryBuffer,
}
