//! Traits for mesh types.

use crate::{Aabb, Triangle};

/// Minimal topology interface shared by mesh representations.
pub trait MeshTopology {
    /// Number of vertices.
    fn vertex_count(&self) -> usize;

    /// Number of faces.
    fn face_count(&self) -> usize;

    /// True when there is nothing to analyze.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Triangle for a face, or `None` if the face or one of its vertex
    /// indices is out of range.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all resolvable triangles in face order.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Types that can compute a bounding box.
pub trait MeshBounds {
    /// Axis-aligned bounds; empty if there are no vertices.
    fn bounds(&self) -> Aabb;

    /// Bounds, or `None` if empty.
    fn bounds_opt(&self) -> Option<Aabb> {
        let b = self.bounds();
        if b.is_empty() { None } else { Some(b) }
    }
}
