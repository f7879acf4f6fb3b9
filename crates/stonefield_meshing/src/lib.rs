//! # STONEFIELD Meshing
//!
//! Turns tile grids into renderable surfaces.
//!
//! ## How It Works
//!
//! 1. **Face culling**: every solid tile emits a quad on each side whose
//!    in-grid neighbor is empty.
//! 2. **Boundary stitching**: sides that leave the grid on X or Z consult
//!    the adjacent chunk's grid, so seams are closed exactly once.
//! 3. **Assembly**: quads are concatenated and the index width (u16/u32)
//!    is picked from the final vertex count.
//!
//! Top and bottom of a grid are never stitched; those sides are closed.
//!
//! ## Example
//!
//! ```rust,ignore
//! use stonefield_meshing::{AtlasLayout, Mesher, NeighborGrids};
//!
//! let mesher = Mesher::new(AtlasLayout::new(8));
//! let geometry = mesher.build_mesh(&grid, &NeighborGrids::none())?;
//! println!("{} triangles", geometry.triangle_count());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod atlas;
pub mod error;
pub mod face;
pub mod geometry;
pub mod mesher;
pub mod stitch;

pub use atlas::AtlasLayout;
pub use error::{MeshError, MeshResult};
pub use face::Face;
pub use geometry::{GeometryBuffer, GeometryBuilder, IndexBuffer, IndexFormat, MeshVertex};
pub use mesher::Mesher;
pub use stitch::{shell_direction, stitch_boundary, NeighborGrids};
