//! # Cube Faces
//!
//! The six axis-aligned sides of a unit cell and the fixed geometry each
//! one contributes.
//!
//! Every face lists its four corners so that the triangles
//! `[0, 2, 1]` and `[3, 2, 0]` satisfy
//! `cross(b - a, c - a) == outward normal`.

/// Corners of the unit cube.
///
/// ```text
///   4 ---- 7        y
///   |\     |\       |
///   | 5 ---- 6      o -- x
///   0 |--- 3 |       \
///    \|     \|        z
///     1 ---- 2
/// ```
pub const CUBE_CORNERS: [[f32; 3]; 8] = [
    [0.0, 0.0, 0.0],
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 0.0],
];

/// Per-quad triangle list, relative to the quad's first vertex.
pub const QUAD_TRIANGLES: [u32; 6] = [0, 2, 1, 3, 2, 0];

/// One side of a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    /// +X (right).
    PosX,
    /// -X (left).
    NegX,
    /// +Y (top).
    PosY,
    /// -Y (bottom).
    NegY,
    /// +Z (front).
    PosZ,
    /// -Z (back).
    NegZ,
}

impl Face {
    /// All six faces.
    pub const ALL: [Self; 6] = [
        Self::PosX,
        Self::NegX,
        Self::PosY,
        Self::NegY,
        Self::PosZ,
        Self::NegZ,
    ];

    /// The four sides that can border another chunk.
    pub const HORIZONTAL: [Self; 4] = [Self::NegX, Self::PosX, Self::NegZ, Self::PosZ];

    /// Unit step from a cell to the cell across this face.
    #[inline]
    #[must_use]
    pub const fn offset(self) -> [i64; 3] {
        match self {
            Self::PosX => [1, 0, 0],
            Self::NegX => [-1, 0, 0],
            Self::PosY => [0, 1, 0],
            Self::NegY => [0, -1, 0],
            Self::PosZ => [0, 0, 1],
            Self::NegZ => [0, 0, -1],
        }
    }

    /// Outward normal.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn normal(self) -> [f32; 3] {
        let [x, y, z] = self.offset();
        [x as f32, y as f32, z as f32]
    }

    /// Indices into [`CUBE_CORNERS`], in emission order.
    #[inline]
    #[must_use]
    pub const fn corner_indices(self) -> [usize; 4] {
        match self {
            Self::PosX => [2, 6, 7, 3],
            Self::NegX => [0, 4, 5, 1],
            Self::PosY => [5, 4, 7, 6],
            Self::NegY => [0, 1, 2, 3],
            Self::PosZ => [1, 5, 6, 2],
            Self::NegZ => [3, 7, 4, 0],
        }
    }

    /// Corner positions of this face on the cell at `cell`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn corners(self, cell: [usize; 3]) -> [[f32; 3]; 4] {
        let base = [cell[0] as f32, cell[1] as f32, cell[2] as f32];
        self.corner_indices().map(|corner| {
            let unit = CUBE_CORNERS[corner];
            [base[0] + unit[0], base[1] + unit[1], base[2] + unit[2]]
        })
    }

    /// The face pointing the other way.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::PosX => Self::NegX,
            Self::NegX => Self::PosX,
            Self::PosY => Self::NegY,
            Self::NegY => Self::PosY,
            Self::PosZ => Self::NegZ,
            Self::NegZ => Self::PosZ,
        }
    }

    /// True for the X and Z faces.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        !matches!(self, Self::PosY | Self::NegY)
    }
}
