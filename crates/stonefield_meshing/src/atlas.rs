//! Texture atlas layout.
//!
//! The atlas is a single row of equally wide columns. Tile kind `n`
//! (for `n >= 1`) occupies column `n - 1`; `Empty` has no column.

use stonefield_procedural::TileKind;

use crate::error::{MeshError, MeshResult};

/// Horizontal strip atlas, `width` columns wide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AtlasLayout {
    width: u32,
}

impl Default for AtlasLayout {
    fn default() -> Self {
        Self::new(8)
    }
}

impl AtlasLayout {
    /// Creates a layout. A zero width is treated as one column.
    #[must_use]
    pub const fn new(width: u32) -> Self {
        Self {
            width: if width == 0 { 1 } else { width },
        }
    }

    /// Number of columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// UVs for one quad of `kind`, in vertex order
    /// `(u2, 0) (u2, 1) (u1, 1) (u1, 0)`.
    ///
    /// # Errors
    ///
    /// Returns [`MeshError::UnmappedTileKind`] for `Empty` and for kinds past
    /// the last column.
    #[allow(clippy::cast_precision_loss)]
    pub fn uv(&self, kind: TileKind) -> MeshResult<[[f32; 2]; 4]> {
        let id = u32::from(kind.id());
        if id == 0 || id > self.width {
            return Err(MeshError::UnmappedTileKind {
                kind,
                atlas_width: self.width,
            });
        }

        let width = self.width as f32;
        let u1 = (id - 1) as f32 / width;
        let u2 = id as f32 / width;
        Ok([[u2, 0.0], [u2, 1.0], [u1, 1.0], [u1, 0.0]])
    }
}
