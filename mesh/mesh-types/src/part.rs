//! A mesh prepared for read-only analysis.

use crate::{Aabb, FaceTable, IndexedMesh, MeshBounds};

/// A mesh together with its face table and bounds.
///
/// Built once per loaded part; every analysis borrows it immutably, so the
/// per-face normals, centroids and areas are computed a single time.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, PartMesh};
///
/// let part = PartMesh::new(unit_cube());
/// assert_eq!(part.faces().len(), 12);
/// assert!((part.bounds().max.z - 1.0).abs() < f64::EPSILON);
/// ```
#[derive(Debug, Clone)]
pub struct PartMesh {
    mesh: IndexedMesh,
    faces: FaceTable,
    bounds: Aabb,
}

impl PartMesh {
    /// Compute the face table and bounds for a mesh.
    #[must_use]
    pub fn new(mesh: IndexedMesh) -> Self {
        let faces = FaceTable::build(&mesh);
        let bounds = mesh.bounds();
        Self {
            mesh,
            faces,
            bounds,
        }
    }

    /// The underlying mesh.
    #[must_use]
    pub const fn mesh(&self) -> &IndexedMesh {
        &self.mesh
    }

    /// Per-face records.
    #[must_use]
    pub const fn faces(&self) -> &FaceTable {
        &self.faces
    }

    /// Bounds of all vertices.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }
}

impl From<IndexedMesh> for PartMesh {
    fn from(mesh: IndexedMesh) -> Self {
        Self::new(mesh)
    }
}
