//! # Boundary Stitching
//!
//! Resolves faces on the X and Z sides of a grid by reading the adjacent
//! chunk's grid.
//!
//! For each wired side we walk the one-cell shell just outside that side.
//! A shell position maps to a face only if it lies outside the grid on
//! exactly one horizontal axis; positions where two sides meet (and the
//! rows above and below the grid) are skipped, so no seam cell is visited
//! twice. The face is emitted when our cell is solid and the mirrored
//! neighbor cell is empty. The neighbor emits the opposite case from its
//! own pass.

use stonefield_procedural::{Extent3, TileGrid};

use crate::error::{MeshError, MeshResult};
use crate::face::Face;
use crate::geometry::GeometryBuilder;

/// Grids of the chunks adjacent to the one being meshed.
///
/// `None` means no chunk is wired on that side; the side is closed.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeighborGrids<'a> {
    /// Neighbor at -X.
    pub left: Option<&'a TileGrid>,
    /// Neighbor at +X.
    pub right: Option<&'a TileGrid>,
    /// Neighbor at -Z.
    pub back: Option<&'a TileGrid>,
    /// Neighbor at +Z.
    pub front: Option<&'a TileGrid>,
}

impl<'a> NeighborGrids<'a> {
    /// No neighbors on any side.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            left: None,
            right: None,
            back: None,
            front: None,
        }
    }

    /// Grid across `face`, if any. Always `None` for top and bottom.
    #[must_use]
    pub const fn get(&self, face: Face) -> Option<&'a TileGrid> {
        match face {
            Face::NegX => self.left,
            Face::PosX => self.right,
            Face::NegZ => self.back,
            Face::PosZ => self.front,
            Face::PosY | Face::NegY => None,
        }
    }

    /// Number of wired sides.
    #[must_use]
    pub fn count(&self) -> usize {
        Face::HORIZONTAL
            .iter()
            .filter(|&&face| self.get(face).is_some())
            .count()
    }
}

/// Side of the grid a shell position sits beyond.
///
/// Returns `None` for positions inside the grid, outside on more than one
/// axis, or outside only on Y.
#[must_use]
pub fn shell_direction(pos: [i64; 3], extent: Extent3) -> Option<Face> {
    let limits = [extent.width, extent.height, extent.depth].map(to_i64);

    let mut outside = None;
    let mut outside_axes = 0;
    for (axis, (&coord, &limit)) in pos.iter().zip(&limits).enumerate() {
        let side = if coord < 0 {
            Some(false)
        } else if coord >= limit {
            Some(true)
        } else {
            None
        };
        if let Some(positive) = side {
            outside_axes += 1;
            outside = Some((axis, positive));
        }
    }

    if outside_axes != 1 {
        return None;
    }
    match outside? {
        (0, true) => Some(Face::PosX),
        (0, false) => Some(Face::NegX),
        (2, true) => Some(Face::PosZ),
        (2, false) => Some(Face::NegZ),
        _ => None,
    }
}

/// Emits every boundary face of `grid` that borders a wired neighbor.
///
/// # Errors
///
/// - [`MeshError::NeighborShapeMismatch`] if a neighbor's shared face has
///   different extents from ours
/// - [`MeshError::UnmappedTileKind`] if a solid boundary tile has no atlas
///   column
pub fn stitch_boundary(
    grid: &TileGrid,
    neighbors: &NeighborGrids<'_>,
    builder: &mut GeometryBuilder,
) -> MeshResult<()> {
    let extent = grid.extent();

    for face in Face::HORIZONTAL {
        let Some(neighbor) = neighbors.get(face) else {
            continue;
        };
        check_shared_face(face, extent, neighbor.extent())?;

        for pos in shell_layer(face, extent) {
            if shell_direction(pos, extent) != Some(face) {
                continue;
            }

            let [dx, dy, dz] = face.offset();
            let inner = [pos[0] - dx, pos[1] - dy, pos[2] - dz];
            let (Some(cell), Some(own)) = (extent.checked(inner), grid.lookup(inner)) else {
                continue;
            };
            if !own.is_solid() {
                continue;
            }

            match neighbor.lookup(mirror(face, pos, neighbor.extent())) {
                Some(across) if !across.is_solid() => builder.push_face(cell, face, own.kind())?,
                _ => {}
            }
        }
    }

    Ok(())
}

/// Every position in the padded shell layer beyond `face`, corners included.
fn shell_layer(face: Face, extent: Extent3) -> impl Iterator<Item = [i64; 3]> {
    let [width, height, depth] = [extent.width, extent.height, extent.depth].map(to_i64);

    let (fixed, span, along_x) = match face {
        Face::NegX => (-1, depth, true),
        Face::PosX => (width, depth, true),
        Face::NegZ => (-1, width, false),
        Face::PosZ => (depth, width, false),
        // Top and bottom are never stitched.
        Face::PosY | Face::NegY => (0, -2, true),
    };

    (-1..=height).flat_map(move |y| {
        (-1..=span).map(move |t| if along_x { [fixed, y, t] } else { [t, y, fixed] })
    })
}

/// The neighbor cell that touches shell position `pos`.
fn mirror(face: Face, pos: [i64; 3], neighbor: Extent3) -> [i64; 3] {
    match face {
        Face::PosX => [0, pos[1], pos[2]],
        Face::NegX => [to_i64(neighbor.width) - 1, pos[1], pos[2]],
        Face::PosZ => [pos[0], pos[1], 0],
        Face::NegZ => [pos[0], pos[1], to_i64(neighbor.depth) - 1],
        Face::PosY | Face::NegY => pos,
    }
}

fn check_shared_face(face: Face, own: Extent3, neighbor: Extent3) -> MeshResult<()> {
    let tangent = |extent: Extent3| {
        if matches!(face, Face::NegX | Face::PosX) {
            [extent.height, extent.depth]
        } else {
            [extent.width, extent.height]
        }
    };

    let (expected, actual) = (tangent(own), tangent(neighbor));
    if expected == actual {
        Ok(())
    } else {
        Err(MeshError::NeighborShapeMismatch {
            side: face,
            expected,
            actual,
        })
    }
}

#[inline]
fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
