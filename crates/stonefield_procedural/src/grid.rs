//! # Tile Grids
//!
//! A dense box of classified tiles, stored Z-Y-X like the noise volume it
//! was built from. A grid is produced in one pass and never edited; to
//! change it, build a new one.

use crate::error::{TerrainError, TerrainResult};
use crate::extent::Extent3;
use crate::noise::NoiseVolume;
use crate::tile::{Tile, TileClassifier, TileKind};

/// Classified tiles for one chunk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    extent: Extent3,
    tiles: Vec<Tile>,
}

impl TileGrid {
    /// Classifies every cell of `volume`.
    ///
    /// The grid takes the volume's dimensions.
    #[must_use]
    pub fn build(volume: &NoiseVolume, classifier: &TileClassifier) -> Self {
        let extent = volume.extent();
        let mut values = volume.values().iter();

        Self::from_fn(extent, |x, y, z| {
            // Same Z-Y-X walk as the volume, so the iterator stays in step.
            let value = values.next().copied().unwrap_or(f32::INFINITY);
            classifier.classify(value, x, y, z)
        })
    }

    /// Builds a grid by asking `kind_at` for every cell in Z-Y-X order.
    ///
    /// Handy for hand-made shapes in tests and benches.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_fn(extent: Extent3, mut kind_at: impl FnMut(u32, u32, u32) -> TileKind) -> Self {
        let mut tiles = Vec::with_capacity(extent.volume());
        for z in 0..extent.depth {
            for y in 0..extent.height {
                for x in 0..extent.width {
                    let (x, y, z) = (x as u32, y as u32, z as u32);
                    tiles.push(Tile::new(kind_at(x, y, z), x, y, z));
                }
            }
        }

        Self { extent, tiles }
    }

    /// Grid dimensions.
    #[inline]
    #[must_use]
    pub const fn extent(&self) -> Extent3 {
        self.extent
    }

    /// Cells along X.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.extent.width
    }

    /// Cells along Y.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.extent.height
    }

    /// Cells along Z.
    #[inline]
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.extent.depth
    }

    /// Tile at `(x, y, z)`, or `None` outside the grid.
    #[inline]
    #[must_use]
    pub fn get(&self, x: usize, y: usize, z: usize) -> Option<Tile> {
        self.extent
            .contains(x, y, z)
            .then(|| self.tiles[self.extent.index(x, y, z)])
    }

    /// Tile at `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// Returns [`TerrainError::OutOfBounds`] outside the grid.
    pub fn tile(&self, x: usize, y: usize, z: usize) -> TerrainResult<Tile> {
        self.get(x, y, z).ok_or(TerrainError::OutOfBounds {
            x,
            y,
            z,
            width: self.extent.width,
            height: self.extent.height,
            depth: self.extent.depth,
        })
    }

    /// Tile at a signed position; `None` if any axis is outside.
    #[inline]
    #[must_use]
    pub fn lookup(&self, pos: [i64; 3]) -> Option<Tile> {
        let [x, y, z] = self.extent.checked(pos)?;
        Some(self.tiles[self.extent.index(x, y, z)])
    }

    /// Returns true if the cell exists and is solid.
    #[inline]
    #[must_use]
    pub fn is_solid_at(&self, pos: [i64; 3]) -> bool {
        self.lookup(pos).is_some_and(|tile| tile.is_solid())
    }

    /// Number of solid tiles.
    #[must_use]
    pub fn solid_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_solid()).count()
    }

    /// All tiles in Z-Y-X order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The 3x2x3 diagnostic dataset: five cells at 1.0, the rest at 0.0.
    fn diagnostic_volume() -> NoiseVolume {
        let extent = Extent3::new(3, 2, 3);
        let mut values = vec![0.0; extent.volume()];
        for (x, y, z) in [(0, 0, 0), (2, 0, 0), (1, 0, 1), (0, 0, 2), (2, 0, 2)] {
            values[extent.index(x, y, z)] = 1.0;
        }
        NoiseVolume::from_values(extent, values).unwrap()
    }

    #[test]
    fn test_build_takes_volume_dimensions() {
        let volume = diagnostic_volume();
        let grid = TileGrid::build(&volume, &TileClassifier::stone(0.5));

        assert_eq!(grid.extent(), Extent3::new(3, 2, 3));
        assert_eq!(grid.iter().count(), 18);
        // Five cells above the threshold are empty.
        assert_eq!(grid.solid_count(), 13);
        assert!(!grid.get(0, 0, 0).unwrap().is_solid());
        assert!(grid.get(1, 0, 0).unwrap().is_solid());
        assert!(grid.get(0, 1, 0).unwrap().is_solid());
    }

    #[test]
    fn test_tile_coords_match_position() {
        let grid = TileGrid::build(&diagnostic_volume(), &TileClassifier::stone(0.5));
        for z in 0..3 {
            for y in 0..2 {
                for x in 0..3 {
                    let tile = grid.tile(x, y, z).unwrap();
                    assert_eq!(tile.coord(), [x as u32, y as u32, z as u32]);
                }
            }
        }
    }

    #[test]
    fn test_threshold_monotonic() {
        let volume = diagnostic_volume();
        let mut previous = 0;
        for threshold in [-0.5, 0.0, 0.5, 0.99, 1.0] {
            let count = TileGrid::build(&volume, &TileClassifier::stone(threshold)).solid_count();
            assert!(count >= previous, "Raising the threshold removed solid cells");
            previous = count;
        }
        assert_eq!(previous, 18);
    }

    #[test]
    fn test_out_of_bounds() {
        let grid = TileGrid::from_fn(Extent3::new(2, 2, 2), |_, _, _| TileKind::Stone);
        assert!(grid.get(2, 0, 0).is_none());
        assert_eq!(
            grid.tile(0, 0, 5),
            Err(TerrainError::OutOfBounds {
                x: 0,
                y: 0,
                z: 5,
                width: 2,
                height: 2,
                depth: 2
            })
        );
        assert!(grid.lookup([-1, 0, 0]).is_none());
        assert!(grid.is_solid_at([1, 1, 1]));
        assert!(!grid.is_solid_at([1, 2, 1]));
    }

    #[test]
    fn test_from_fn_order() {
        let grid = TileGrid::from_fn(Extent3::new(3, 3, 3), |x, y, z| {
            if (x, y, z) == (1, 1, 1) {
                TileKind::Grass
            } else {
                TileKind::Empty
            }
        });
        assert_eq!(grid.solid_count(), 1);
        assert_eq!(grid.get(1, 1, 1).unwrap().kind(), TileKind::Grass);
    }
}
