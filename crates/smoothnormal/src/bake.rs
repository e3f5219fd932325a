//! Tangent-space baking of accumulated normals.
//!
//! Each vertex is independent: it reads the shared, immutable
//! [`AccumulatedNormals`] table and its own attributes, and writes exactly one
//! output slot. The output buffer is pre-sized and split into disjoint
//! batches, so the parallel phase needs no locking.

use glam::{Mat3, Vec2, Vec3, Vec4};
use rayon::prelude::*;

use crate::accumulate::AccumulatedNormals;
use crate::config::{BakeConfig, OutputMode};
use crate::error::{BakeError, BakeResult};
use crate::mesh::MeshAttributes;

/// Baked per-vertex normals, in input vertex order.
#[derive(Debug, Clone, PartialEq)]
pub enum BakedNormals {
    /// Unit tangent-space vectors.
    Tangent(Vec<Vec3>),
    /// Octahedral-packed tangent-space vectors in `[-1, 1]²`.
    Octahedral(Vec<Vec2>),
}

impl BakedNormals {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Tangent(values) => values.len(),
            Self::Octahedral(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn mode(&self) -> OutputMode {
        match self {
            Self::Tangent(_) => OutputMode::Tangent,
            Self::Octahedral(_) => OutputMode::Octahedral,
        }
    }

    #[must_use]
    pub fn as_tangent(&self) -> Option<&[Vec3]> {
        match self {
            Self::Tangent(values) => Some(values),
            Self::Octahedral(_) => None,
        }
    }

    #[must_use]
    pub fn as_octahedral(&self) -> Option<&[Vec2]> {
        match self {
            Self::Octahedral(values) => Some(values),
            Self::Tangent(_) => None,
        }
    }

    /// Interleaved components, ready for a vertex buffer upload.
    #[must_use]
    pub fn to_flat_f32(&self) -> Vec<f32> {
        match self {
            Self::Tangent(values) => values.iter().flat_map(|v| v.to_array()).collect(),
            Self::Octahedral(values) => values.iter().flat_map(|v| v.to_array()).collect(),
        }
    }
}

/// Build the tangent basis for one vertex.
///
/// Returns a matrix whose columns are the normalized tangent, bitangent and
/// normal. The bitangent is `cross(n, t)` flipped by the tangent's `w` sign.
/// Its transpose maps object space into tangent space.
#[must_use]
pub fn tangent_basis(normal: Vec3, tangent: Vec4) -> Mat3 {
    let n = normal.normalize();
    let t = tangent.truncate().normalize();
    let b = (n.cross(t) * tangent.w).normalize();
    Mat3::from_cols(t, b, n)
}

/// Express `smoothed` in the tangent space of one vertex, as a unit vector.
#[must_use]
pub fn bake_vertex(smoothed: Vec3, normal: Vec3, tangent: Vec4) -> Vec3 {
    let object_to_tangent = tangent_basis(normal, tangent).transpose();
    (object_to_tangent * smoothed).normalize()
}

/// Accumulate and bake a whole mesh.
///
/// Rejects meshes without tangents before any work is done, logging the mesh
/// name. The accumulation table lives only for the duration of this call.
pub fn bake_mesh(mesh: &MeshAttributes<'_>, config: &BakeConfig) -> BakeResult<BakedNormals> {
    ensure_tangents(mesh)?;

    let accumulated = AccumulatedNormals::build(mesh.positions, mesh.normals);
    tracing::debug!(
        "Accumulated mesh '{}': {} vertices, {} unique positions",
        mesh.name,
        mesh.vertex_count(),
        accumulated.len()
    );

    bake_checked(mesh, &accumulated, config)
}

/// Bake a mesh against a previously built accumulation table.
///
/// `accumulated` is only read. A vertex whose position is missing from the
/// table falls back to its own normal.
pub fn bake(
    mesh: &MeshAttributes<'_>,
    accumulated: &AccumulatedNormals,
    config: &BakeConfig,
) -> BakeResult<BakedNormals> {
    ensure_tangents(mesh)?;
    bake_checked(mesh, accumulated, config)
}

fn ensure_tangents(mesh: &MeshAttributes<'_>) -> BakeResult<()> {
    if mesh.has_tangents() {
        return Ok(());
    }
    tracing::warn!(
        "Mesh '{}' has no tangent data; smoothed normals were not baked",
        mesh.name
    );
    Err(BakeError::MissingTangentData {
        mesh: mesh.name.to_owned(),
    })
}

fn bake_checked(
    mesh: &MeshAttributes<'_>,
    accumulated: &AccumulatedNormals,
    config: &BakeConfig,
) -> BakeResult<BakedNormals> {
    debug_assert_eq!(mesh.positions.len(), mesh.normals.len());
    debug_assert_eq!(mesh.positions.len(), mesh.tangents.len());

    let batch_size = config.effective_batch_size();
    tracing::debug!(
        "Baking mesh '{}': {} vertices, batch size {}, mode {:?}",
        mesh.name,
        mesh.vertex_count(),
        batch_size,
        config.mode
    );

    let run = || match config.mode {
        OutputMode::Tangent => {
            BakedNormals::Tangent(bake_batches(mesh, accumulated, batch_size, |v| v))
        }
        OutputMode::Octahedral => BakedNormals::Octahedral(bake_batches(
            mesh,
            accumulated,
            batch_size,
            smoothnormal_encode::encode,
        )),
    };

    match config.threads {
        None => Ok(run()),
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            Ok(pool.install(run))
        }
    }
}

/// Fill a pre-sized output buffer in parallel, one batch per task.
fn bake_batches<T, F>(
    mesh: &MeshAttributes<'_>,
    accumulated: &AccumulatedNormals,
    batch_size: usize,
    finish: F,
) -> Vec<T>
where
    T: Clone + Default + Send,
    F: Fn(Vec3) -> T + Sync,
{
    let mut output = vec![T::default(); mesh.vertex_count()];

    output
        .par_chunks_mut(batch_size)
        .enumerate()
        .for_each(|(batch, slots)| {
            let start = batch * batch_size;
            for (offset, slot) in slots.iter_mut().enumerate() {
                let i = start + offset;
                let normal = mesh.normals[i];
                let smoothed = accumulated.get(mesh.positions[i]).unwrap_or(normal);
                *slot = finish(bake_vertex(smoothed, normal, mesh.tangents[i]));
            }
        });

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPSILON: f32 = 1e-5;

    fn assert_vec3_near(actual: Vec3, expected: Vec3) {
        assert!(
            actual.abs_diff_eq(expected, EPSILON),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn identity_frame_passes_vectors_through() {
        let tangent = Vec4::new(1.0, 0.0, 0.0, 1.0);
        let smoothed = Vec3::new(1.0, 2.0, 2.0);
        assert_vec3_near(
            bake_vertex(smoothed, Vec3::Z, tangent),
            smoothed.normalize(),
        );
    }

    #[test]
    fn own_normal_bakes_to_tangent_space_up() {
        let normal = Vec3::new(0.0, 1.0, 0.0);
        let tangent = Vec4::new(0.0, 0.0, 1.0, 1.0);
        assert_vec3_near(bake_vertex(normal, normal, tangent), Vec3::Z);
    }

    #[test]
    fn handedness_flips_bitangent() {
        let right = tangent_basis(Vec3::Z, Vec4::new(1.0, 0.0, 0.0, 1.0));
        let left = tangent_basis(Vec3::Z, Vec4::new(1.0, 0.0, 0.0, -1.0));

        assert_vec3_near(right.y_axis, Vec3::Y);
        assert_vec3_near(left.y_axis, Vec3::NEG_Y);
        assert_vec3_near(right.x_axis, left.x_axis);
        assert_vec3_near(right.z_axis, left.z_axis);
    }

    #[test]
    fn handedness_flips_baked_bitangent_component() {
        let smoothed = Vec3::new(0.0, 1.0, 1.0);
        let right = bake_vertex(smoothed, Vec3::Z, Vec4::new(1.0, 0.0, 0.0, 1.0));
        let left = bake_vertex(smoothed, Vec3::Z, Vec4::new(1.0, 0.0, 0.0, -1.0));

        assert!((right.y + left.y).abs() < EPSILON);
        assert!((right.z - left.z).abs() < EPSILON);
    }

    #[test]
    fn basis_inputs_are_normalized() {
        let basis = tangent_basis(Vec3::Z * 3.0, Vec4::new(5.0, 0.0, 0.0, 1.0));
        assert_vec3_near(basis.x_axis, Vec3::X);
        assert_vec3_near(basis.z_axis, Vec3::Z);
    }

    #[test]
    fn missing_position_falls_back_to_own_normal() {
        let positions = [Vec3::ZERO];
        let normals = [Vec3::Z];
        let tangents = [Vec4::new(1.0, 0.0, 0.0, 1.0)];
        let mesh = MeshAttributes::new("orphan", &positions, &normals, &tangents);

        let baked = bake(&mesh, &AccumulatedNormals::default(), &BakeConfig::default())
            .expect("tangents present");

        assert_vec3_near(baked.as_tangent().expect("tangent mode")[0], Vec3::Z);
    }

    #[test]
    fn flat_output_interleaves_components() {
        let baked = BakedNormals::Octahedral(vec![Vec2::new(0.25, 0.5), Vec2::new(-1.0, 1.0)]);
        assert_eq!(baked.to_flat_f32(), vec![0.25, 0.5, -1.0, 1.0]);
        assert_eq!(baked.mode(), OutputMode::Octahedral);
        assert!(baked.as_tangent().is_none());
    }

    fn unit_vector() -> impl Strategy<Value = Vec3> {
        (-1.0f32..1.0, -1.0f32..1.0, -1.0f32..1.0)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
            .prop_filter("non-degenerate", |v| v.length_squared() > 1e-2)
            .prop_map(Vec3::normalize)
    }

    proptest! {
        #[test]
        fn basis_is_orthonormal(
            normal in unit_vector(),
            raw_tangent in unit_vector(),
            right_handed in any::<bool>(),
        ) {
            // Gram-Schmidt the tangent against the normal to make the input
            // well-formed.
            let t = raw_tangent - normal * normal.dot(raw_tangent);
            prop_assume!(t.length_squared() > 1e-2);
            let w = if right_handed { 1.0 } else { -1.0 };
            let basis = tangent_basis(normal, t.normalize().extend(w));

            let axes = [basis.x_axis, basis.y_axis, basis.z_axis];
            for axis in axes {
                prop_assert!((axis.length() - 1.0).abs() < 1e-4);
            }
            prop_assert!(axes[0].dot(axes[1]).abs() < 1e-4);
            prop_assert!(axes[0].dot(axes[2]).abs() < 1e-4);
            prop_assert!(axes[1].dot(axes[2]).abs() < 1e-4);
        }

        #[test]
        fn bake_inverts_through_basis(
            normal in unit_vector(),
            raw_tangent in unit_vector(),
            smoothed in unit_vector(),
        ) {
            let t = raw_tangent - normal * normal.dot(raw_tangent);
            prop_assume!(t.length_squared() > 1e-2);
            let tangent = t.normalize().extend(1.0);

            let baked = bake_vertex(smoothed, normal, tangent);
            let back = tangent_basis(normal, tangent) * baked;

            prop_assert!((baked.length() - 1.0).abs() < 1e-4);
            prop_assert!(back.abs_diff_eq(smoothed, 1e-4), "{smoothed} -> {back}");
        }
    }
}
