//! One-axis coordinate bands.

use std::ops::Bound;

/// A range of coordinate values along one axis.
///
/// Bounds are inclusive unless built as [`Bound::Excluded`], which is how
/// strict thresholds such as "beyond the exit line" are expressed.
///
/// # Example
///
/// ```
/// use mesh_region::AxisBand;
///
/// let band = AxisBand::closed(0.0, 4.0);
/// assert!(band.contains(0.0));
/// assert!(band.contains(4.0));
///
/// let beyond = AxisBand::above(76.5);
/// assert!(!beyond.contains(76.5));
/// assert!(beyond.contains(76.6));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBand {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl AxisBand {
    /// Inclusive range `[lo, hi]`. An inverted range matches nothing.
    #[must_use]
    pub const fn closed(lo: f64, hi: f64) -> Self {
        Self {
            lower: Bound::Included(lo),
            upper: Bound::Included(hi),
        }
    }

    /// Strictly greater than `threshold`.
    #[must_use]
    pub const fn above(threshold: f64) -> Self {
        Self {
            lower: Bound::Excluded(threshold),
            upper: Bound::Unbounded,
        }
    }

    /// The same band moved by `offset`.
    ///
    /// Used to turn a band measured from a part's corner into world
    /// coordinates.
    #[must_use]
    pub fn shifted(&self, offset: f64) -> Self {
        let shift = |b: Bound<f64>| match b {
            Bound::Included(v) => Bound::Included(v + offset),
            Bound::Excluded(v) => Bound::Excluded(v + offset),
            Bound::Unbounded => Bound::Unbounded,
        };
        Self {
            lower: shift(self.lower),
            upper: shift(self.upper),
        }
    }

    /// True if `v` lies in the band.
    #[must_use]
    pub fn contains(&self, v: f64) -> bool {
        let above_lower = match self.lower {
            Bound::Included(lo) => v >= lo,
            Bound::Excluded(lo) => v > lo,
            Bound::Unbounded => true,
        };
        let below_upper = match self.upper {
            Bound::Included(hi) => v <= hi,
            Bound::Excluded(hi) => v < hi,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }
}
