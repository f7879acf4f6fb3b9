//! # Chunk Lattice
//!
//! Owns every chunk of the terrain and drives the two-phase pipeline.
//!
//! ## Phases
//!
//! 1. **Tiles**: sample noise and classify tiles for each affected chunk.
//!    Chunks are independent, so this runs on the rayon pool when
//!    `parallel` is set.
//! 2. **Meshes**: mesh each affected chunk against its own tiles and its
//!    neighbors' tiles. Refused with [`LatticeError::TilesNotBuilt`] until
//!    every grid involved exists.
//!
//! Regenerating a chunk rebuilds its tiles and re-meshes it together with
//! its wired neighbors, since their seam faces read the new tiles.
//!
//! Neighbor links are wired once when the arena is allocated and are
//! read-only afterwards.

use std::collections::BTreeSet;
use std::time::Instant;

use rayon::prelude::*;
use stonefield_meshing::{AtlasLayout, Mesher, NeighborGrids};
use stonefield_procedural::{NoiseField, TileGrid};

use crate::chunk::{Chunk, ChunkCoord, ChunkId, ChunkMesh, NeighborLinks};
use crate::config::TerrainConfig;
use crate::error::{LatticeError, LatticeResult};

/// Totals from the last pipeline run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LatticeStats {
    /// Chunks in the lattice.
    pub chunks: usize,
    /// Chunks meshed in the last run.
    pub chunks_meshed: usize,
    /// Solid tiles across every built chunk.
    pub solid_tiles: usize,
    /// Quads emitted in the last run.
    pub quads: usize,
    /// Vertices emitted in the last run.
    pub vertices: usize,
}

/// A 2D arena of chunks with symmetric neighbor links.
///
/// # Example
///
/// ```rust,ignore
/// let mut lattice = ChunkLattice::new(TerrainConfig::default());
/// let meshes = lattice.generate()?;
/// assert_eq!(meshes.len(), 9);
///
/// // Move one chunk in noise space; it and its neighbors are re-meshed.
/// let refreshed = lattice.set_local_offset(ChunkId(4), [10.0, 0.0, 10.0])?;
/// assert_eq!(refreshed.len(), 5);
/// ```
#[derive(Debug)]
pub struct ChunkLattice {
    config: TerrainConfig,
    mesher: Mesher,
    chunks: Vec<Chunk>,
    stats: LatticeStats,
}

impl ChunkLattice {
    /// Creates a lattice with wired but empty chunks. No tiles are built.
    #[must_use]
    pub fn new(config: TerrainConfig) -> Self {
        let config = config.sanitized();
        let chunks = allocate(&config);
        let mesher = Mesher::new(AtlasLayout::new(config.atlas_width));

        tracing::info!(
            chunks_x = config.lattice.chunks_x,
            chunks_z = config.lattice.chunks_z,
            chunk = ?config.chunk.extent(),
            "lattice allocated"
        );

        Self {
            stats: LatticeStats {
                chunks: chunks.len(),
                ..LatticeStats::default()
            },
            config,
            mesher,
            chunks,
        }
    }

    /// Builds tiles for every chunk, then meshes every chunk.
    ///
    /// Meshes are ordered by [`ChunkId`].
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::Mesh`] if a tile kind has no atlas column.
    pub fn generate(&mut self) -> LatticeResult<Vec<ChunkMesh>> {
        let ids = self.ids();
        let start = Instant::now();

        self.build_tiles(&ids)?;
        let meshes = self.mesh_chunks(&ids)?;
        self.record(&meshes);

        tracing::info!(
            chunks = meshes.len(),
            quads = self.stats.quads,
            elapsed = ?start.elapsed(),
            "lattice generated"
        );
        Ok(meshes)
    }

    /// Phase 1: rebuilds the tile grids of `ids`.
    ///
    /// # Errors
    ///
    /// Returns [`LatticeError::UnknownChunk`] if any id is out of range.
    /// No chunk is modified in that case.
    pub fn build_tiles(&mut self, ids: &[ChunkId]) -> LatticeResult<()> {
        let ids = self.validate(ids)?;
        let start = Instant::now();

        let grids = {
            let config = &self.config;
            let chunks = &self.chunks;
            run_phase(config.parallel, &ids, |id| build_grid(config, &chunks[id.0]))
        };
        for (id, grid) in ids.iter().zip(grids) {
            self.chunks[id.0].tiles = Some(grid);
        }

        tracing::trace!(
            chunks = ids.len(),
            elapsed = ?start.elapsed(),
            "tile phase complete"
        );
        Ok(())
    }

    /// Phase 2: meshes `ids` against their current tiles.
    ///
    /// Meshes are returned in ascending id order; duplicates are meshed once.
    ///
    /// # Errors
    ///
    /// - [`LatticeError::UnknownChunk`] if any id is out of range
    /// - [`LatticeError::TilesNotBuilt`] if a chunk or one of its wired
    ///   neighbors has no tiles yet
    /// - [`LatticeError::Mesh`] if meshing itself fails
    pub fn mesh_chunks(&self, ids: &[ChunkId]) -> LatticeResult<Vec<ChunkMesh>> {
        let ids = self.validate(ids)?;

        for &id in &ids {
            let chunk = &self.chunks[id.0];
            for required in std::iter::once(id).chain(chunk.neighbors.iter()) {
                if self.chunks[required.0].tiles.is_none() {
                    return Err(LatticeError::TilesNotBuilt { id: required });
                }
            }
        }

        let start = Instant::now();
        let meshes = run_phase(self.config.parallel, &ids, |id| self.mesh_one(id))
            .into_iter()
            .collect::<LatticeResult<Vec<_>>>()?;

        tracing::trace!(
            chunks = ids.len(),
            elapsed = ?start.elapsed(),
            "mesh phase complete"
        );
        Ok(meshes)
    }

    /// Rebuilds tiles for `ids`, then re-meshes them and their neighbors.
    ///
    /// # Errors
    ///
    /// As [`build_tiles`](Self::build_tiles) and
    /// [`mesh_chunks`](Self::mesh_chunks). Regenerating before the rest of
    /// the lattice has tiles fails with [`LatticeError::TilesNotBuilt`].
    pub fn regenerate(&mut self, ids: &[ChunkId]) -> LatticeResult<Vec<ChunkMesh>> {
        let ids = self.validate(ids)?;
        self.build_tiles(&ids)?;

        let affected: Vec<ChunkId> = ids
            .iter()
            .flat_map(|&id| std::iter::once(id).chain(self.chunks[id.0].neighbors.iter()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let meshes = self.mesh_chunks(&affected)?;
        self.record(&meshes);

        tracing::info!(
            rebuilt = ids.len(),
            remeshed = meshes.len(),
            "chunks regenerated"
        );
        Ok(meshes)
    }

    /// Replaces the configuration and regenerates everything.
    ///
    /// If the chunk dimensions or the lattice layout change, the arena is
    /// reallocated and every local offset reset. Otherwise chunk ids and
    /// local offsets are kept.
    ///
    /// # Errors
    ///
    /// As [`generate`](Self::generate).
    pub fn apply_config(&mut self, config: TerrainConfig) -> LatticeResult<Vec<ChunkMesh>> {
        let config = config.sanitized();

        if config.chunk != self.config.chunk || config.lattice != self.config.lattice {
            tracing::info!("lattice layout changed, reallocating chunks");
            self.chunks = allocate(&config);
        }

        self.mesher = Mesher::new(AtlasLayout::new(config.atlas_width));
        self.config = config;
        self.stats = LatticeStats {
            chunks: self.chunks.len(),
            ..LatticeStats::default()
        };
        self.generate()
    }

    /// Moves one chunk in noise space and regenerates it.
    ///
    /// Its neighbors are re-meshed too, so seams stay closed.
    ///
    /// # Errors
    ///
    /// As [`regenerate`](Self::regenerate).
    pub fn set_local_offset(
        &mut self,
        id: ChunkId,
        offset: [f32; 3],
    ) -> LatticeResult<Vec<ChunkMesh>> {
        self.validate(&[id])?;
        self.chunks[id.0].local_offset = offset;
        self.regenerate(&[id])
    }

    /// Chunk by id.
    #[must_use]
    pub fn chunk(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.0)
    }

    /// Chunk by lattice coordinate.
    #[must_use]
    pub fn chunk_at(&self, coord: ChunkCoord) -> Option<&Chunk> {
        let lattice = &self.config.lattice;
        if coord.x >= lattice.chunks_x || coord.z >= lattice.chunks_z {
            return None;
        }
        self.chunks.get(arena_index(lattice.chunks_x, coord))
    }

    /// All chunks in id order.
    #[must_use]
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// The sanitized configuration in use.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Totals from the last pipeline run.
    #[must_use]
    pub const fn stats(&self) -> LatticeStats {
        self.stats
    }

    fn ids(&self) -> Vec<ChunkId> {
        (0..self.chunks.len()).map(ChunkId).collect()
    }

    /// Checks every id and returns them sorted and deduplicated.
    fn validate(&self, ids: &[ChunkId]) -> LatticeResult<Vec<ChunkId>> {
        let count = self.chunks.len();
        if let Some(&id) = ids.iter().find(|id| id.0 >= count) {
            return Err(LatticeError::UnknownChunk { id, count });
        }
        Ok(ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect())
    }

    fn mesh_one(&self, id: ChunkId) -> LatticeResult<ChunkMesh> {
        let chunk = &self.chunks[id.0];
        let grid = chunk.tiles().ok_or(LatticeError::TilesNotBuilt { id })?;
        let links = chunk.neighbors;
        let neighbors = NeighborGrids {
            left: self.neighbor_tiles(links.left),
            right: self.neighbor_tiles(links.right),
            back: self.neighbor_tiles(links.back),
            front: self.neighbor_tiles(links.front),
        };

        let geometry = self.mesher.build_mesh(grid, &neighbors)?;
        Ok(ChunkMesh {
            id,
            coord: chunk.coord,
            geometry,
        })
    }

    fn neighbor_tiles(&self, link: Option<ChunkId>) -> Option<&TileGrid> {
        link.and_then(|id| self.chunks.get(id.0)).and_then(Chunk::tiles)
    }

    fn record(&mut self, meshes: &[ChunkMesh]) {
        self.stats = LatticeStats {
            chunks: self.chunks.len(),
            chunks_meshed: meshes.len(),
            solid_tiles: self
                .chunks
                .iter()
                .filter_map(Chunk::tiles)
                .map(TileGrid::solid_count)
                .sum(),
            quads: meshes.iter().map(|mesh| mesh.geometry.quad_count()).sum(),
            vertices: meshes.iter().map(|mesh| mesh.geometry.vertex_count()).sum(),
        };
    }
}

/// Allocates `chunks_x * chunks_z` chunks and wires their neighbors.
///
/// Ids are assigned row by row: `id = z * chunks_x + x`.
fn allocate(config: &TerrainConfig) -> Vec<Chunk> {
    let lattice = &config.lattice;
    let (cx, cz) = (lattice.chunks_x, lattice.chunks_z);
    let link = |x: u32, z: u32| Some(ChunkId(arena_index(cx, ChunkCoord::new(x, z))));

    let mut chunks = Vec::with_capacity(lattice.chunk_count());
    for z in 0..cz {
        for x in 0..cx {
            let coord = ChunkCoord::new(x, z);
            let mut chunk = Chunk::new(
                ChunkId(arena_index(cx, coord)),
                coord,
                lattice.local_offset(coord),
            );
            chunk.neighbors = NeighborLinks {
                left: if x > 0 { link(x - 1, z) } else { None },
                right: if x + 1 < cx { link(x + 1, z) } else { None },
                back: if z > 0 { link(x, z - 1) } else { None },
                front: if z + 1 < cz { link(x, z + 1) } else { None },
            };
            chunks.push(chunk);
        }
    }
    chunks
}

#[inline]
const fn arena_index(chunks_x: u32, coord: ChunkCoord) -> usize {
    coord.z as usize * chunks_x as usize + coord.x as usize
}

/// Samples and classifies one chunk.
fn build_grid(config: &TerrainConfig, chunk: &Chunk) -> TileGrid {
    let field = NoiseField::new(config.noise.offset_by(chunk.local_offset));
    let volume = field.sample_3d(config.chunk.extent());
    TileGrid::build(&volume, &config.classifier(chunk.coord))
}

/// Maps `work` over `ids`, on the rayon pool when `parallel` is set.
///
/// Output order matches `ids` either way.
fn run_phase<T, F>(parallel: bool, ids: &[ChunkId], work: F) -> Vec<T>
where
    T: Send,
    F: Fn(ChunkId) -> T + Sync + Send,
{
    if parallel {
        ids.par_iter().map(|&id| work(id)).collect()
    } else {
        ids.iter().map(|&id| work(id)).collect()
    }
}
