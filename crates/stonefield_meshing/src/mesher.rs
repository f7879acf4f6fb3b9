//! # Face-Culling Mesher
//!
//! One quad per exposed side of every solid tile. No merging: each quad
//! covers exactly one cell face.

use stonefield_procedural::TileGrid;

use crate::atlas::AtlasLayout;
use crate::error::MeshResult;
use crate::face::Face;
use crate::geometry::{GeometryBuffer, GeometryBuilder};
use crate::stitch::{stitch_boundary, NeighborGrids};

/// Builds chunk meshes against a fixed atlas layout.
///
/// The mesher holds no per-chunk state, so one instance can be shared
/// across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Mesher {
    atlas: AtlasLayout,
}

impl Mesher {
    /// Creates a mesher.
    #[must_use]
    pub const fn new(atlas: AtlasLayout) -> Self {
        Self { atlas }
    }

    /// The atlas used for UVs.
    #[must_use]
    pub const fn atlas(&self) -> AtlasLayout {
        self.atlas
    }

    /// Meshes `grid`, stitching its X/Z sides against `neighbors`.
    ///
    /// The returned buffer is built from scratch.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError`](crate::MeshError) if a solid kind has no atlas
    /// column or a neighbor's shared face does not match.
    pub fn build_mesh(
        &self,
        grid: &TileGrid,
        neighbors: &NeighborGrids<'_>,
    ) -> MeshResult<GeometryBuffer> {
        let mut builder = GeometryBuilder::new(self.atlas);

        self.cull_interior(grid, &mut builder)?;
        let interior = builder.quad_count();

        stitch_boundary(grid, neighbors, &mut builder)?;
        let boundary = builder.quad_count() - interior;

        let geometry = builder.finish();
        tracing::debug!(
            interior,
            boundary,
            vertices = geometry.vertex_count(),
            neighbors = neighbors.count(),
            "chunk meshed"
        );
        Ok(geometry)
    }

    /// Emits faces between solid tiles and empty tiles of the same grid.
    ///
    /// Sides that leave the grid are left to stitching.
    #[allow(clippy::unused_self, clippy::cast_possible_wrap)]
    fn cull_interior(&self, grid: &TileGrid, builder: &mut GeometryBuilder) -> MeshResult<()> {
        let extent = grid.extent();

        for z in 0..extent.depth {
            for y in 0..extent.height {
                for x in 0..extent.width {
                    let Some(tile) = grid.get(x, y, z) else {
                        continue;
                    };
                    if !tile.is_solid() {
                        continue;
                    }

                    let pos = [x as i64, y as i64, z as i64];
                    for face in Face::ALL {
                        let [dx, dy, dz] = face.offset();
                        let across = grid.lookup([pos[0] + dx, pos[1] + dy, pos[2] + dz]);
                        if across.is_some_and(|t| !t.is_solid()) {
                            builder.push_face([x, y, z], face, tile.kind())?;
                        }
                    }
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeshError;
    use stonefield_procedural::{Extent3, TileKind};

    fn mesher() -> Mesher {
        Mesher::new(AtlasLayout::new(8))
    }

    #[test]
    fn test_single_solid_cell_has_no_faces() {
        let grid = TileGrid::from_fn(Extent3::new(1, 1, 1), |_, _, _| TileKind::Stone);
        let mesh = mesher().build_mesh(&grid, &NeighborGrids::none()).unwrap();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_enclosed_center_cell_has_six_faces() {
        let grid = TileGrid::from_fn(Extent3::new(3, 3, 3), |x, y, z| {
            if (x, y, z) == (1, 1, 1) {
                TileKind::Stone
            } else {
                TileKind::Empty
            }
        });
        let mesh = mesher().build_mesh(&grid, &NeighborGrids::none()).unwrap();

        assert_eq!(mesh.quad_count(), 6);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        for face in Face::ALL {
            let count = mesh.normals.iter().filter(|&&n| n == face.normal()).count();
            assert_eq!(count, 4, "{face:?} should appear once");
        }
    }

    #[test]
    fn test_fully_solid_grid_is_sealed() {
        let grid = TileGrid::from_fn(Extent3::new(4, 4, 4), |_, _, _| TileKind::Stone);
        let mesh = mesher().build_mesh(&grid, &NeighborGrids::none()).unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn test_two_adjacent_cells_share_no_face() {
        let grid = TileGrid::from_fn(Extent3::new(4, 3, 3), |x, y, z| {
            if y == 1 && z == 1 && (x == 1 || x == 2) {
                TileKind::Stone
            } else {
                TileKind::Empty
            }
        });
        let mesh = mesher().build_mesh(&grid, &NeighborGrids::none()).unwrap();
        assert_eq!(mesh.quad_count(), 10);
    }

    #[test]
    fn test_grass_uses_grass_column() {
        let grid = TileGrid::from_fn(Extent3::new(1, 2, 1), |_, y, _| {
            if y == 0 {
                TileKind::Grass
            } else {
                TileKind::Empty
            }
        });
        let mesh = mesher().build_mesh(&grid, &NeighborGrids::none()).unwrap();
        assert_eq!(mesh.quad_count(), 1);
        assert_eq!(mesh.normals[0], [0.0, 1.0, 0.0]);
        assert_eq!(mesh.uvs, vec![[0.25, 0.0], [0.25, 1.0], [0.125, 1.0], [0.125, 0.0]]);
    }

    #[test]
    fn test_unmapped_kind_aborts() {
        let grid = TileGrid::from_fn(Extent3::new(1, 2, 1), |_, y, _| {
            if y == 0 {
                TileKind::Grass
            } else {
                TileKind::Empty
            }
        });
        let narrow = Mesher::new(AtlasLayout::new(1));
        assert_eq!(
            narrow.build_mesh(&grid, &NeighborGrids::none()),
            Err(MeshError::UnmappedTileKind {
                kind: TileKind::Grass,
                atlas_width: 1
            })
        );
    }

    #[test]
    fn test_positions_are_chunk_local() {
        let grid = TileGrid::from_fn(Extent3::new(3, 2, 1), |x, y, _| {
            if x == 2 && y == 0 {
                TileKind::Stone
            } else {
                TileKind::Empty
            }
        });
        let mesh = mesher().build_mesh(&grid, &NeighborGrids::none()).unwrap();
        // Only the -X and +Y sides face in-grid air.
        assert_eq!(mesh.quad_count(), 2);
        for position in &mesh.positions {
            assert!((2.0..=3.0).contains(&position[0]));
            assert!((0.0..=1.0).contains(&position[1]));
        }
    }
}
