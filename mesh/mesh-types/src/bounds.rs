//! Axis-aligned bounding box.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Axis;

/// An axis-aligned bounding box (AABB).
///
/// Every part in an assembly is reduced to one of these before any
/// cross-part check runs, so the box carries the placement and overlap
/// helpers those checks need.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let aabb = Aabb::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(10.0, 20.0, 5.0),
/// );
///
/// assert_eq!(aabb.size().y, 20.0);
/// assert!(aabb.contains(&Point3::new(5.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner.
    pub min: Point3<f64>,
    /// Maximum corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a box from two corners, sorting components so `min <= max`.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// An inverted box that any point expands into a valid one.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            min: Point3::from([f64::INFINITY; 3]),
            max: Point3::from([f64::NEG_INFINITY; 3]),
        }
    }

    /// Smallest box containing all points. Empty for an empty iterator.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let pts = [Point3::new(1.0, -2.0, 0.0), Point3::new(-1.0, 4.0, 3.0)];
    /// let aabb = Aabb::from_points(pts.iter());
    /// assert_eq!(aabb.min, Point3::new(-1.0, -2.0, 0.0));
    /// assert_eq!(aabb.max, Point3::new(1.0, 4.0, 3.0));
    /// ```
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for p in points {
            aabb.expand_to_include(p);
        }
        aabb
    }

    /// True when no point has been included yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Extents along X, Y and Z.
    #[inline]
    #[must_use]
    pub fn size(&self) -> Vector3<f64> {
        self.max - self.min
    }

    /// Extent along one axis.
    #[inline]
    #[must_use]
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.of_point(&self.max) - axis.of_point(&self.min)
    }

    /// Center point.
    #[inline]
    #[must_use]
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Largest of the three extents.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.size().max()
    }

    /// Boundary-inclusive point containment.
    #[must_use]
    pub fn contains(&self, p: &Point3<f64>) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let v = axis.of_point(p);
            v >= axis.of_point(&self.min) && v <= axis.of_point(&self.max)
        })
    }

    /// Grow the box to include a point.
    pub fn expand_to_include(&mut self, p: &Point3<f64>) {
        self.min = self.min.inf(p);
        self.max = self.max.sup(p);
    }

    /// Box shifted in the horizontal plane.
    ///
    /// Placements only move parts in X and Y; Z is left untouched.
    #[must_use]
    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        let offset = Vector3::new(dx, dy, 0.0);
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }

    /// Overlap test that ignores contact closer than `margin`.
    ///
    /// Two boxes are disjoint when, on some axis, one box's max is at or
    /// below the other's min plus `margin`. The test is symmetric in its
    /// two arguments.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Aabb, Point3};
    ///
    /// let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 10.0, 10.0));
    /// let touching = Aabb::new(Point3::new(9.7, 0.0, 0.0), Point3::new(20.0, 10.0, 10.0));
    /// let deep = Aabb::new(Point3::new(5.0, 0.0, 0.0), Point3::new(20.0, 10.0, 10.0));
    ///
    /// assert!(!a.overlaps_with_margin(&touching, 0.5));
    /// assert!(a.overlaps_with_margin(&deep, 0.5));
    /// ```
    #[must_use]
    pub fn overlaps_with_margin(&self, other: &Self, margin: f64) -> bool {
        Axis::ALL.iter().all(|&axis| {
            let (a_min, a_max) = (axis.of_point(&self.min), axis.of_point(&self.max));
            let (b_min, b_max) = (axis.of_point(&other.min), axis.of_point(&other.max));
            !(a_max <= b_min + margin || b_max <= a_min + margin)
        })
    }

    /// Fractional position of a point within the box, per axis.
    ///
    /// An axis with zero extent reports 0.5.
    #[must_use]
    pub fn relative_position(&self, p: &Point3<f64>) -> Vector3<f64> {
        let size = self.size();
        Vector3::from_fn(|i, _| {
            if size[i] > 0.0 {
                (p[i] - self.min[i]) / size[i]
            } else {
                0.5
            }
        })
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube(min: [f64; 3], max: [f64; 3]) -> Aabb {
        Aabb::new(Point3::from(min), Point3::from(max))
    }

    #[test]
    fn new_sorts_corners() {
        let aabb = cube([5.0, 0.0, 3.0], [0.0, 5.0, 0.0]);
        assert_eq!(aabb.min, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(aabb.max, Point3::new(5.0, 5.0, 3.0));
    }

    #[test]
    fn empty_until_expanded() {
        let mut aabb = Aabb::empty();
        assert!(aabb.is_empty());
        aabb.expand_to_include(&Point3::new(1.0, 1.0, 1.0));
        assert!(!aabb.is_empty());
        assert!(aabb.size().norm() < f64::EPSILON);
    }

    #[test]
    fn translated_leaves_z() {
        let aabb = cube([0.0, 0.0, 1.0], [2.0, 2.0, 4.0]).translated(10.0, -5.0);
        assert!((aabb.min.x - 10.0).abs() < f64::EPSILON);
        assert!((aabb.max.y - -3.0).abs() < f64::EPSILON);
        assert!((aabb.min.z - 1.0).abs() < f64::EPSILON);
        assert!((aabb.max.z - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn margin_swallows_shallow_contact() {
        let a = cube([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]);
        let b = cube([9.6, 0.0, 0.0], [20.0, 10.0, 10.0]);
        assert!(!a.overlaps_with_margin(&b, 0.5));
        assert!(a.overlaps_with_margin(&b, 0.0));
    }

    #[test]
    fn separated_on_one_axis_is_disjoint() {
        let a = cube([0.0, 0.0, 0.0], [10.0, 10.0, 10.0]);
        let b = cube([2.0, 2.0, 30.0], [8.0, 8.0, 40.0]);
        assert!(!a.overlaps_with_margin(&b, 0.5));
        assert!(!b.overlaps_with_margin(&a, 0.5));
    }

    #[test]
    fn relative_position_handles_flat_axis() {
        let aabb = cube([0.0, 0.0, 0.0], [10.0, 20.0, 0.0]);
        let rel = aabb.relative_position(&Point3::new(2.0, 15.0, 0.0));
        assert!((rel.x - 0.2).abs() < 1e-12);
        assert!((rel.y - 0.75).abs() < 1e-12);
        assert!((rel.z - 0.5).abs() < 1e-12);
    }

    #[test]
    fn extent_per_axis() {
        let aabb = cube([1.0, 2.0, 3.0], [4.0, 8.0, 5.0]);
        assert!((aabb.extent(Axis::X) - 3.0).abs() < f64::EPSILON);
        assert!((aabb.extent(Axis::Y) - 6.0).abs() < f64::EPSILON);
        assert!((aabb.extent(Axis::Z) - 2.0).abs() < f64::EPSILON);
        assert!((aabb.max_extent() - 6.0).abs() < f64::EPSILON);
    }
}
