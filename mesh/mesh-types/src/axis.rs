//! Coordinate axis selector.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One of the three world axes.
///
/// X is width (left/right), Y is depth (front/back) and Z is height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Axis {
    /// Width axis.
    X,
    /// Depth axis.
    Y,
    /// Height axis.
    Z,
}

impl Axis {
    /// All axes in X, Y, Z order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Component index of this axis (0, 1 or 2).
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Upper-case label used in human-readable findings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
        }
    }

    /// Read this axis' component of a point.
    #[inline]
    #[must_use]
    pub fn of_point(self, p: &Point3<f64>) -> f64 {
        p[self.index()]
    }

    /// Read this axis' component of a vector.
    #[inline]
    #[must_use]
    pub fn of_vector(self, v: &Vector3<f64>) -> f64 {
        v[self.index()]
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
