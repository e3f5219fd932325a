//! Bake position-welded smooth normals into tangent space.
//!
//! Meshes split vertices along UV and hard-edge seams, so an outline shader
//! that extrudes along the vertex normal tears open at every seam. This crate
//! sums the normals of all vertices that share an exact position and stores
//! the result per vertex in that vertex's own tangent space, where it survives
//! skinning and other deformation.
//!
//! # Pipeline
//!
//! 1. **Accumulate** ([`AccumulatedNormals::build`]): single-threaded pass
//!    producing an immutable position → summed normal table.
//! 2. **Bake** ([`bake`]): data-parallel pass over fixed-size vertex batches
//!    on a rayon pool. Each vertex builds its `(t, b, n)` basis and projects
//!    the summed normal into it, optionally packing it to two components.
//!
//! [`bake_mesh`] runs both phases. A mesh without tangents is rejected up
//! front with [`BakeError::MissingTangentData`].
//!
//! # Key types
//!
//! - [`MeshAttributes`]: Borrowed, index-aligned vertex attribute slices
//! - [`BakeConfig`]: Output mode, batch size, worker count
//! - [`BakedNormals`]: Per-vertex output in input order

mod error;

pub mod accumulate;
pub mod bake;
pub mod config;
pub mod mesh;
pub mod primitives;

pub use accumulate::{AccumulatedNormals, PositionKey};
pub use bake::{BakedNormals, bake, bake_mesh, bake_vertex, tangent_basis};
pub use config::{BakeConfig, DEFAULT_BATCH_SIZE, OutputMode};
pub use error::{BakeError, BakeResult};
pub use mesh::{MeshAttributes, OwnedMesh};
