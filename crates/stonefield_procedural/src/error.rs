//! # Procedural Error Types
//!
//! Errors raised by noise volumes and tile grids. All of them are
//! programming-invariant violations; range problems in settings are clamped
//! instead.

use thiserror::Error;

/// Errors that can occur while sampling or classifying terrain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TerrainError {
    /// A lattice coordinate fell outside the grid.
    #[error("lattice index ({x}, {y}, {z}) out of range for {width}x{height}x{depth} grid")]
    OutOfBounds {
        /// Requested X.
        x: usize,
        /// Requested Y.
        y: usize,
        /// Requested Z.
        z: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
        /// Grid depth.
        depth: usize,
    },

    /// A raw value buffer does not match the extent it claims to cover.
    #[error("noise volume expects {expected} values, got {actual}")]
    ValueCountMismatch {
        /// Number of cells in the extent.
        expected: usize,
        /// Number of values supplied.
        actual: usize,
    },
}

/// Result type for procedural operations.
pub type TerrainResult<T> = Result<T, TerrainError>;
