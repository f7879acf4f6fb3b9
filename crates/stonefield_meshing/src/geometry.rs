//! # Geometry Buffers
//!
//! Per-chunk mesh output in separate attribute streams (positions, normals,
//! UVs) plus an index buffer whose width is picked once the vertex count is
//! known.

use bytemuck::{Pod, Zeroable};
use stonefield_procedural::TileKind;

use crate::atlas::AtlasLayout;
use crate::error::MeshResult;
use crate::face::{Face, QUAD_TRIANGLES};

/// Largest vertex count that still fits 16-bit indices.
pub const MAX_U16_VERTICES: usize = u16::MAX as usize + 1;

/// Interleaved vertex, for hosts that upload one buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Chunk-local position.
    pub position: [f32; 3],
    /// Outward normal.
    pub normal: [f32; 3],
    /// Atlas UV.
    pub uv: [f32; 2],
}

/// Width of the stored indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexFormat {
    /// 16-bit indices.
    U16,
    /// 32-bit indices.
    U32,
}

/// Triangle indices; every three consecutive entries form one triangle.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IndexBuffer {
    /// Used when the mesh has at most [`MAX_U16_VERTICES`] vertices.
    U16(Vec<u16>),
    /// Used for larger meshes.
    U32(Vec<u32>),
}

impl Default for IndexBuffer {
    fn default() -> Self {
        Self::U16(Vec::new())
    }
}

impl IndexBuffer {
    /// Number of indices.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U16(indices) => indices.len(),
            Self::U32(indices) => indices.len(),
        }
    }

    /// Returns true if there are no indices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Storage width.
    #[must_use]
    pub const fn format(&self) -> IndexFormat {
        match self {
            Self::U16(_) => IndexFormat::U16,
            Self::U32(_) => IndexFormat::U32,
        }
    }

    /// Index `i`, widened.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<u32> {
        match self {
            Self::U16(indices) => indices.get(i).copied().map(u32::from),
            Self::U32(indices) => indices.get(i).copied(),
        }
    }

    /// All indices, widened.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.len()).filter_map(|i| self.get(i))
    }

    /// Raw bytes for upload.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::U16(indices) => bytemuck::cast_slice(indices),
            Self::U32(indices) => bytemuck::cast_slice(indices),
        }
    }
}

/// Complete mesh data for one chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryBuffer {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex normals.
    pub normals: Vec<[f32; 3]>,
    /// Per-vertex atlas UVs.
    pub uvs: Vec<[f32; 2]>,
    /// Triangle indices.
    pub indices: IndexBuffer,
}

impl GeometryBuffer {
    /// Check if mesh is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Get vertex count.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Get triangle count.
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of quads (faces) in the mesh.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Width of the index buffer.
    #[must_use]
    pub const fn index_format(&self) -> IndexFormat {
        self.indices.format()
    }

    /// Position bytes.
    #[must_use]
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normal bytes.
    #[must_use]
    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }

    /// UV bytes.
    #[must_use]
    pub fn uv_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.uvs)
    }

    /// Index bytes.
    #[must_use]
    pub fn index_bytes(&self) -> &[u8] {
        self.indices.as_bytes()
    }

    /// The attribute streams zipped into one vertex array.
    #[must_use]
    pub fn interleaved(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((&position, &normal), &uv)| MeshVertex {
                position,
                normal,
                uv,
            })
            .collect()
    }
}

/// Accumulates quads for one mesh pass.
///
/// Indices are kept 32-bit while building and narrowed in [`finish`].
///
/// [`finish`]: GeometryBuilder::finish
#[derive(Debug)]
pub struct GeometryBuilder {
    atlas: AtlasLayout,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    indices: Vec<u32>,
}

impl GeometryBuilder {
    /// Creates an empty builder that maps kinds through `atlas`.
    #[must_use]
    pub const fn new(atlas: AtlasLayout) -> Self {
        Self {
            atlas,
            positions: Vec::new(),
            normals: Vec::new(),
            uvs: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Appends one quad for `face` of the cell at `cell`, textured as `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::UnmappedTileKind`](crate::MeshError::UnmappedTileKind)
    /// if `kind` has no atlas column. Nothing is appended in that case.
    #[allow(clippy::cast_possible_truncation)]
    pub fn push_face(&mut self, cell: [usize; 3], face: Face, kind: TileKind) -> MeshResult<()> {
        let uvs = self.atlas.uv(kind)?;
        let base = self.positions.len() as u32;
        let normal = face.normal();

        self.positions.extend_from_slice(&face.corners(cell));
        self.normals.extend_from_slice(&[normal; 4]);
        self.uvs.extend_from_slice(&uvs);
        self.indices.extend(QUAD_TRIANGLES.iter().map(|i| base + i));
        Ok(())
    }

    /// Quads appended so far.
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.positions.len() / 4
    }

    /// Seals the buffer, choosing 16-bit indices when they suffice.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn finish(self) -> GeometryBuffer {
        let indices = if self.positions.len() <= MAX_U16_VERTICES {
            // Every index is below the vertex count, so it fits.
            IndexBuffer::U16(self.indices.iter().map(|&i| i as u16).collect())
        } else {
            IndexBuffer::U32(self.indices)
        };

        GeometryBuffer {
            positions: self.positions,
            normals: self.normals,
            uvs: self.uvs,
            indices,
        }
    }
}
