//! Triangle with resolved vertex positions.

use nalgebra::{Point3, Vector3};

/// A triangle with concrete vertex positions.
///
/// # Example
///
/// ```
/// use mesh_types::Triangle;
///
/// let tri = Triangle::from_arrays([0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 2.0, 0.0]);
/// assert!((tri.area() - 2.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Create a triangle from coordinate arrays.
    #[must_use]
    pub fn from_arrays(v0: [f64; 3], v1: [f64; 3], v2: [f64; 3]) -> Self {
        Self::new(Point3::from(v0), Point3::from(v1), Point3::from(v2))
    }

    /// Cross product of the two edges leaving `v0`.
    ///
    /// Its length is twice the area; its direction follows CCW winding.
    #[inline]
    #[must_use]
    pub fn scaled_normal(&self) -> Vector3<f64> {
        (self.v1 - self.v0).cross(&(self.v2 - self.v0))
    }

    /// Unit normal, or `None` for a triangle with no measurable area.
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        self.scaled_normal().try_normalize(0.0)
    }

    /// Triangle area.
    #[inline]
    #[must_use]
    pub fn area(&self) -> f64 {
        self.scaled_normal().norm() * 0.5
    }

    /// Mean of the three vertices.
    #[inline]
    #[must_use]
    pub fn centroid(&self) -> Point3<f64> {
        Point3::from((self.v0.coords + self.v1.coords + self.v2.coords) / 3.0)
    }

    /// The three vertices as an array.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [Point3<f64>; 3] {
        [self.v0, self.v1, self.v2]
    }
}
