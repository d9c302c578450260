//! Error types for mesh validation.

use thiserror::Error;

/// Result type for validation.
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Geometry that cannot be validated at all.
///
/// These are fatal for the mesh they describe; integrity findings on a
/// readable mesh are reported in the [`ValidationRecord`](crate::ValidationRecord)
/// instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    /// Mesh has no faces.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index} (mesh has {vertex_count} vertices)")]
    InvalidIndex {
        /// Face holding the bad index.
        face: usize,
        /// The invalid index.
        index: u32,
        /// Total number of vertices in the mesh.
        vertex_count: usize,
    },
}
