//! Error types for smooth normal baking.

use thiserror::Error;

/// Reasons a bake can be rejected.
#[derive(Debug, Error)]
pub enum BakeError {
    /// The mesh has an empty tangent array. Nothing was computed; callers
    /// should not use baked normals for this mesh.
    #[error("Mesh '{mesh}' has no tangent data")]
    MissingTangentData {
        /// Name of the rejected mesh.
        mesh: String,
    },

    /// A dedicated worker pool was requested but could not be started.
    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Convenience alias for `Result<T, BakeError>`.
pub type BakeResult<T> = Result<T, BakeError>;
