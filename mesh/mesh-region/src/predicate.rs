//! Face normal predicates.

use mesh_types::{Axis, Vector3};

use crate::error::{RegionError, RegionResult};

/// Direction along an axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    /// Toward increasing coordinates.
    Positive,
    /// Toward decreasing coordinates.
    Negative,
}

impl Sign {
    /// Sign of a value; zero counts as positive.
    #[must_use]
    pub fn of(v: f64) -> Self {
        if v < 0.0 { Self::Negative } else { Self::Positive }
    }

    /// `1.0` or `-1.0`.
    #[must_use]
    pub const fn factor(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Negative => -1.0,
        }
    }

    /// `"+"` or `"-"`.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Positive => "+",
            Self::Negative => "-",
        }
    }
}

/// Condition on one component of a face's unit normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NormalPredicate {
    /// `|n[axis]| > min`, either direction.
    Absolute {
        /// Component read.
        axis: Axis,
        /// Exclusive lower threshold.
        min: f64,
    },
    /// `sign * n[axis] > min`, one direction only.
    Signed {
        /// Component read.
        axis: Axis,
        /// Required direction.
        sign: Sign,
        /// Exclusive lower threshold.
        min: f64,
    },
}

impl NormalPredicate {
    /// Checked constructor for a signed predicate.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::NormalThreshold`] unless `0 <= min < 1`, since
    /// no unit normal could satisfy a larger threshold.
    pub fn signed(axis: Axis, sign: Sign, min: f64) -> RegionResult<Self> {
        if (0.0..1.0).contains(&min) {
            Ok(Self::Signed { axis, sign, min })
        } else {
            Err(RegionError::NormalThreshold { axis, min })
        }
    }

    /// True if a normal satisfies the predicate.
    #[must_use]
    pub fn matches(&self, normal: &Vector3<f64>) -> bool {
        match *self {
            Self::Absolute { axis, min } => axis.of_vector(normal).abs() > min,
            Self::Signed { axis, sign, min } => sign.factor() * axis.of_vector(normal) > min,
        }
    }
}
