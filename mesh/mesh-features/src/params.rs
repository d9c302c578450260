//! Tuning constants and parameter sets.
//!
//! The constants are calibrated for millimetre box parts of board-game
//! insert size. They are fixed values, not scaled with the part.

use crate::error::{FeatureError, FeatureResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A face is diagonal when at least two normal components exceed this.
pub const DIAGONAL_MIN_COMPONENT: f64 = 0.2;

/// A face is diagonal only while its largest normal component stays below this.
pub const DIAGONAL_MAX_COMPONENT: f64 = 0.95;

/// Diagonal face centres closer than this join one cluster.
pub const CLUSTER_DISTANCE: f64 = 3.0;

/// Clusters with fewer faces are noise.
pub const MIN_CLUSTER_FACES: usize = 3;

/// Smallest total area of a ramp cluster.
pub const RAMP_MIN_AREA: f64 = 1.0;

/// Largest total area of a ramp cluster.
pub const RAMP_MAX_AREA: f64 = 50.0;

/// Default side wall thickness in mm.
pub const DEFAULT_WALL_THICKNESS: f64 = 3.0;

/// Margin added to the wall thickness for wall strips.
pub const WALL_MARGIN: f64 = 1.0;

/// Fraction of the slide extent beyond which the exit region starts.
pub const EXIT_FRACTION: f64 = 0.85;

/// Angled faces have a vertical normal component below this.
pub const ANGLED_MAX_VERTICAL: f64 = 0.9;

/// Angled faces have a horizontal normal component above this.
pub const ANGLED_MIN_HORIZONTAL: f64 = 0.3;

/// A region with more angled faces than this holds a ramp.
pub const RAMP_ANGLED_MIN: usize = 5;

/// Wall-axis normal component a protruding face must exceed.
pub const PROTRUSION_MIN: f64 = 0.3;

/// Width of the entry and exit bands beyond the wall.
pub const END_BAND_WIDTH: f64 = 10.0;

/// Exit bands with more protruding faces than this are sufficient.
pub const EXIT_SUFFICIENT: usize = 10;

/// Parameters for the unsupervised ramp detector.
///
/// # Example
///
/// ```
/// use mesh_features::RampParams;
///
/// let params = RampParams::default().with_cluster_distance(2.0);
/// assert!(params.validate().is_ok());
/// assert!(RampParams::default().with_cluster_distance(0.0).validate().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RampParams {
    /// See [`DIAGONAL_MIN_COMPONENT`].
    pub diagonal_min_component: f64,
    /// See [`DIAGONAL_MAX_COMPONENT`].
    pub diagonal_max_component: f64,
    /// See [`CLUSTER_DISTANCE`].
    pub cluster_distance: f64,
    /// See [`MIN_CLUSTER_FACES`].
    pub min_cluster_faces: usize,
    /// See [`RAMP_MIN_AREA`].
    pub min_area: f64,
    /// See [`RAMP_MAX_AREA`].
    pub max_area: f64,
}

impl Default for RampParams {
    fn default() -> Self {
        Self {
            diagonal_min_component: DIAGONAL_MIN_COMPONENT,
            diagonal_max_component: DIAGONAL_MAX_COMPONENT,
            cluster_distance: CLUSTER_DISTANCE,
            min_cluster_faces: MIN_CLUSTER_FACES,
            min_area: RAMP_MIN_AREA,
            max_area: RAMP_MAX_AREA,
        }
    }
}

impl RampParams {
    /// Set the clustering cutoff distance.
    #[must_use]
    pub const fn with_cluster_distance(mut self, distance: f64) -> Self {
        self.cluster_distance = distance;
        self
    }

    /// Set the minimum number of faces in a cluster.
    #[must_use]
    pub const fn with_min_cluster_faces(mut self, count: usize) -> Self {
        self.min_cluster_faces = count;
        self
    }

    /// Set the accepted total area range.
    #[must_use]
    pub const fn with_area_range(mut self, min: f64, max: f64) -> Self {
        self.min_area = min;
        self.max_area = max;
        self
    }

    /// Check that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidParameter`] for a non-positive or
    /// non-finite cluster distance, component thresholds outside `[0, 1]`,
    /// or an inverted area range.
    pub fn validate(&self) -> FeatureResult<()> {
        if !(self.cluster_distance.is_finite() && self.cluster_distance > 0.0) {
            return Err(FeatureError::InvalidParameter {
                name: "cluster_distance",
                value: self.cluster_distance,
            });
        }
        for (name, value) in [
            ("diagonal_min_component", self.diagonal_min_component),
            ("diagonal_max_component", self.diagonal_max_component),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FeatureError::InvalidParameter { name, value });
            }
        }
        if self.min_area.is_nan() || self.max_area.is_nan() || self.min_area > self.max_area {
            return Err(FeatureError::InvalidParameter {
                name: "min_area",
                value: self.min_area,
            });
        }
        Ok(())
    }
}

/// Parameters for the expected-region analyzer and entry/exit comparator.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RegionParams {
    /// Side wall thickness.
    pub wall_thickness: f64,
    /// See [`WALL_MARGIN`].
    pub wall_margin: f64,
    /// See [`EXIT_FRACTION`].
    pub exit_fraction: f64,
    /// See [`ANGLED_MAX_VERTICAL`].
    pub angled_max_vertical: f64,
    /// See [`ANGLED_MIN_HORIZONTAL`].
    pub angled_min_horizontal: f64,
    /// See [`RAMP_ANGLED_MIN`].
    pub ramp_angled_min: usize,
    /// See [`PROTRUSION_MIN`].
    pub protrusion_min: f64,
    /// See [`END_BAND_WIDTH`].
    pub end_band_width: f64,
    /// See [`EXIT_SUFFICIENT`].
    pub exit_sufficient: usize,
}

impl Default for RegionParams {
    fn default() -> Self {
        Self {
            wall_thickness: DEFAULT_WALL_THICKNESS,
            wall_margin: WALL_MARGIN,
            exit_fraction: EXIT_FRACTION,
            angled_max_vertical: ANGLED_MAX_VERTICAL,
            angled_min_horizontal: ANGLED_MIN_HORIZONTAL,
            ramp_angled_min: RAMP_ANGLED_MIN,
            protrusion_min: PROTRUSION_MIN,
            end_band_width: END_BAND_WIDTH,
            exit_sufficient: EXIT_SUFFICIENT,
        }
    }
}

impl RegionParams {
    /// Set the wall thickness.
    #[must_use]
    pub const fn with_wall_thickness(mut self, mm: f64) -> Self {
        self.wall_thickness = mm;
        self
    }

    /// Set the exit fraction.
    #[must_use]
    pub const fn with_exit_fraction(mut self, fraction: f64) -> Self {
        self.exit_fraction = fraction;
        self
    }

    /// Set the entry/exit band width.
    #[must_use]
    pub const fn with_end_band_width(mut self, mm: f64) -> Self {
        self.end_band_width = mm;
        self
    }

    /// Check that all values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`FeatureError::InvalidParameter`] for negative or non-finite
    /// lengths, an exit fraction outside `[0, 1]`, or a protrusion threshold
    /// outside `[0, 1)`.
    pub fn validate(&self) -> FeatureResult<()> {
        for (name, value) in [
            ("wall_thickness", self.wall_thickness),
            ("wall_margin", self.wall_margin),
            ("end_band_width", self.end_band_width),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(FeatureError::InvalidParameter { name, value });
            }
        }
        if !(0.0..=1.0).contains(&self.exit_fraction) {
            return Err(FeatureError::InvalidParameter {
                name: "exit_fraction",
                value: self.exit_fraction,
            });
        }
        if !(0.0..1.0).contains(&self.protrusion_min) {
            return Err(FeatureError::InvalidParameter {
                name: "protrusion_min",
                value: self.protrusion_min,
            });
        }
        Ok(())
    }

    /// Width of a wall strip measured from the outer face.
    #[must_use]
    pub fn wall_strip(&self) -> f64 {
        self.wall_thickness + self.wall_margin
    }

    /// Length of an entry or exit band measured from the part end.
    #[must_use]
    pub fn end_band(&self) -> f64 {
        self.wall_thickness + self.end_band_width
    }
}
