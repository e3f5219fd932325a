//! Procedural meshes with hard edges and split vertices.
//!
//! These are the smallest inputs that exercise seam welding, used by the
//! `bake_report` tool and the tests.

use glam::{Vec3, Vec4};

use crate::mesh::OwnedMesh;

/// Face frames of an axis-aligned cube: outward normal and tangent.
const CUBE_FACES: [(Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y),
    (Vec3::NEG_X, Vec3::NEG_Y),
    (Vec3::Y, Vec3::Z),
    (Vec3::NEG_Y, Vec3::NEG_Z),
    (Vec3::Z, Vec3::X),
    (Vec3::NEG_Z, Vec3::NEG_X),
];

/// Corner signs along (tangent, bitangent), counter-clockwise.
const QUAD_CORNERS: [(f32, f32); 4] = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];

/// A single triangle in the XY plane facing +Z, tangent along +X.
#[must_use]
pub fn single_triangle() -> OwnedMesh {
    OwnedMesh {
        name: "triangle".to_owned(),
        positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
        normals: vec![Vec3::Z; 3],
        tangents: vec![Vec4::new(1.0, 0.0, 0.0, 1.0); 3],
        indices: vec![0, 1, 2],
    }
}

/// A flat-shaded cube centered at the origin.
///
/// Every face has its own four vertices, so each corner position is shared
/// by three vertices with three different face normals (24 vertices, 8
/// unique positions). Corner coordinates are exactly `±half_extent`.
#[must_use]
pub fn hard_cube(half_extent: f32) -> OwnedMesh {
    let mut mesh = OwnedMesh {
        name: "hard_cube".to_owned(),
        positions: Vec::with_capacity(24),
        normals: Vec::with_capacity(24),
        tangents: Vec::with_capacity(24),
        indices: Vec::with_capacity(36),
    };

    for (normal, tangent) in CUBE_FACES {
        let bitangent = normal.cross(tangent);
        let base = u32::try_from(mesh.positions.len()).unwrap_or(u32::MAX);

        for (su, sv) in QUAD_CORNERS {
            mesh.positions
                .push((normal + tangent * su + bitangent * sv) * half_extent);
            mesh.normals.push(normal);
            mesh.tangents.push(tangent.extend(1.0));
        }

        mesh.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    mesh
}
