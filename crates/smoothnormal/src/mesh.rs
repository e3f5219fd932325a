//! Vertex attribute input.

use glam::{Vec3, Vec4};

/// Borrowed view over a mesh's index-aligned vertex attributes.
///
/// `positions`, `normals` and `tangents` must have equal lengths, except that
/// an empty `tangents` slice marks a mesh without tangent data. Lengths are
/// not validated beyond debug assertions.
#[derive(Debug, Clone, Copy)]
pub struct MeshAttributes<'a> {
    /// Mesh name, used for diagnostics only.
    pub name: &'a str,
    pub positions: &'a [Vec3],
    pub normals: &'a [Vec3],
    /// Tangent direction in `xyz`, handedness (`±1`) in `w`.
    pub tangents: &'a [Vec4],
}

impl<'a> MeshAttributes<'a> {
    #[must_use]
    pub fn new(
        name: &'a str,
        positions: &'a [Vec3],
        normals: &'a [Vec3],
        tangents: &'a [Vec4],
    ) -> Self {
        Self {
            name,
            positions,
            normals,
            tangents,
        }
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn has_tangents(&self) -> bool {
        !self.tangents.is_empty()
    }
}

/// Owned mesh data, as produced by [`crate::primitives`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnedMesh {
    pub name: String,
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub tangents: Vec<Vec4>,
    /// Triangle list indices.
    pub indices: Vec<u32>,
}

impl OwnedMesh {
    /// Borrow the vertex attributes for baking.
    #[must_use]
    pub fn attributes(&self) -> MeshAttributes<'_> {
        MeshAttributes::new(&self.name, &self.positions, &self.normals, &self.tangents)
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}
