//! Cached per-face attributes.

use nalgebra::{Point3, Vector3};

use crate::{IndexedMesh, MeshTopology};

/// Geometric attributes of one face, computed once per mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRecord {
    /// Index of the face in the source mesh.
    pub index: u32,
    /// Centroid of the face.
    pub center: Point3<f64>,
    /// Unit normal, or the zero vector for a degenerate face.
    pub normal: Vector3<f64>,
    /// Face area.
    pub area: f64,
}

impl FaceRecord {
    /// True when the face has no usable normal.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }
}

/// Face records for a whole mesh, in face order.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, FaceTable};
///
/// let table = FaceTable::build(&unit_cube());
/// assert_eq!(table.len(), 12);
/// assert!((table.total_area() - 6.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FaceTable {
    records: Vec<FaceRecord>,
}

impl FaceTable {
    /// Compute a record for every face.
    ///
    /// A face whose indices fall outside the vertex list is recorded with
    /// zero area and a zero normal; validation reports such meshes before
    /// any analysis uses the table.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    // Face indices are u32 like the mesh indices themselves
    pub fn build(mesh: &IndexedMesh) -> Self {
        let records = (0..mesh.face_count())
            .map(|i| {
                let index = i as u32;
                match mesh.triangle(i) {
                    Some(tri) => FaceRecord {
                        index,
                        center: tri.centroid(),
                        normal: tri.normal().unwrap_or_else(Vector3::zeros),
                        area: tri.area(),
                    },
                    None => FaceRecord {
                        index,
                        center: Point3::origin(),
                        normal: Vector3::zeros(),
                        area: 0.0,
                    },
                }
            })
            .collect();
        Self { records }
    }

    /// Number of faces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True for a table with no faces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record for one face.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&FaceRecord> {
        self.records.get(index)
    }

    /// Iterate records in face order.
    pub fn iter(&self) -> std::slice::Iter<'_, FaceRecord> {
        self.records.iter()
    }

    /// All records as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[FaceRecord] {
        &self.records
    }

    /// Sum of all face areas.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.records.iter().map(|r| r.area).sum()
    }
}

impl<'a> IntoIterator for &'a FaceTable {
    type Item = &'a FaceRecord;
    type IntoIter = std::slice::Iter<'a, FaceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vertex, unit_cube};

    #[test]
    fn records_follow_face_order() {
        let table = FaceTable::build(&unit_cube());
        for (i, rec) in table.iter().enumerate() {
            assert_eq!(rec.index as usize, i);
            assert!((rec.normal.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn bottom_faces_point_down() {
        let table = FaceTable::build(&unit_cube());
        let bottom = table.get(0).map(|r| r.normal.z);
        assert!(bottom.is_some_and(|z| (z + 1.0).abs() < 1e-12));
    }

    #[test]
    fn collinear_face_gets_zero_normal() {
        let mesh = IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(2.0, 0.0, 0.0),
            ],
            vec![[0, 1, 2]],
        );
        let table = FaceTable::build(&mesh);
        assert!(table.get(0).is_some_and(FaceRecord::is_degenerate));
    }

    #[test]
    fn out_of_range_face_is_zeroed() {
        let mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![[0, 1, 2]]);
        let table = FaceTable::build(&mesh);
        assert_eq!(table.len(), 1);
        assert!(table.total_area().abs() < f64::EPSILON);
    }
}
