//! Grid dimensions and linear indexing.

use serde::{Deserialize, Serialize};

/// Dimensions of a 3D lattice: width (X), height (Y), depth (Z).
///
/// Cells are stored in Z-Y-X order:
/// `index = (z * height + y) * width + x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent3 {
    /// Cells along X.
    pub width: usize,
    /// Cells along Y.
    pub height: usize,
    /// Cells along Z.
    pub depth: usize,
}

impl Extent3 {
    /// Creates a new extent.
    #[inline]
    #[must_use]
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells.
    #[inline]
    #[must_use]
    pub const fn volume(self) -> usize {
        self.width * self.height * self.depth
    }

    /// Returns true if any axis is zero.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.volume() == 0
    }

    /// Returns true if the coordinate lies inside the lattice.
    #[inline]
    #[must_use]
    pub const fn contains(self, x: usize, y: usize, z: usize) -> bool {
        x < self.width && y < self.height && z < self.depth
    }

    /// Converts a signed coordinate to an unsigned one if it lies inside.
    #[inline]
    #[must_use]
    pub fn checked(self, pos: [i64; 3]) -> Option<[usize; 3]> {
        let x = usize::try_from(pos[0]).ok()?;
        let y = usize::try_from(pos[1]).ok()?;
        let z = usize::try_from(pos[2]).ok()?;
        self.contains(x, y, z).then_some([x, y, z])
    }

    /// Linear index of a cell.
    #[inline]
    #[must_use]
    pub const fn index(self, x: usize, y: usize, z: usize) -> usize {
        debug_assert!(x < self.width);
        debug_assert!(y < self.height);
        debug_assert!(z < self.depth);
        (z * self.height + y) * self.width + x
    }

    /// Extent with every axis raised to at least one cell.
    #[must_use]
    pub fn at_least_one(self) -> Self {
        Self::new(self.width.max(1), self.height.max(1), self.depth.max(1))
    }
}
