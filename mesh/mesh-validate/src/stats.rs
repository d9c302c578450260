//! Basic geometric measurements of a mesh.

use mesh_types::{Aabb, IndexedMesh, MeshBounds};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Bounding box in report form.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct BoundingBoxStats {
    /// Minimum corner.
    pub min: [f64; 3],
    /// Maximum corner.
    pub max: [f64; 3],
    /// Extents along X, Y and Z.
    pub dimensions: [f64; 3],
}

impl From<&Aabb> for BoundingBoxStats {
    fn from(aabb: &Aabb) -> Self {
        Self {
            min: aabb.min.coords.into(),
            max: aabb.max.coords.into(),
            dimensions: aabb.size().into(),
        }
    }
}

/// Counts and measurements reported for every mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct MeshStats {
    /// Number of vertices.
    pub vertices: usize,
    /// Number of faces.
    pub faces: usize,
    /// Enclosed volume; `None` (JSON `null`) unless the mesh is watertight.
    pub volume_mm3: Option<f64>,
    /// Total surface area.
    pub surface_area_mm2: f64,
    /// Vertex bounds.
    pub bounding_box: BoundingBoxStats,
}

impl MeshStats {
    /// Measure a mesh. Volume is only computed when `watertight` is set.
    #[must_use]
    pub fn measure(mesh: &IndexedMesh, watertight: bool) -> Self {
        Self {
            vertices: mesh.vertices.len(),
            faces: mesh.faces.len(),
            volume_mm3: watertight.then(|| mesh.volume()),
            surface_area_mm2: mesh.surface_area(),
            bounding_box: BoundingBoxStats::from(&mesh.bounds()),
        }
    }
}
