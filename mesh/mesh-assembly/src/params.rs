//! Declared container construction parameters.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default side wall thickness in mm.
pub const DEFAULT_WALL_THICKNESS: f64 = 3.0;

/// Default floor thickness in mm.
pub const DEFAULT_FLOOR_THICKNESS: f64 = 2.0;

/// Default fit tolerance in mm.
pub const DEFAULT_TOLERANCE: f64 = 0.5;

/// Wall, floor and tolerance of the container as declared by the project.
///
/// Deserializes from the project file's camelCase keys; any missing key
/// takes its default.
///
/// # Example
///
/// ```
/// use mesh_assembly::BoxParameters;
///
/// let params = BoxParameters::default().with_wall_thickness(2.5);
/// assert_eq!(params.wall_thickness, 2.5);
/// assert_eq!(params.floor_thickness, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct BoxParameters {
    /// Side wall thickness.
    pub wall_thickness: f64,
    /// Floor thickness.
    pub floor_thickness: f64,
    /// Clearance tolerance.
    pub tolerance: f64,
}

impl Default for BoxParameters {
    fn default() -> Self {
        Self {
            wall_thickness: DEFAULT_WALL_THICKNESS,
            floor_thickness: DEFAULT_FLOOR_THICKNESS,
            tolerance: DEFAULT_TOLERANCE,
        }
    }
}

impl BoxParameters {
    /// Set the wall thickness.
    #[must_use]
    pub const fn with_wall_thickness(mut self, mm: f64) -> Self {
        self.wall_thickness = mm;
        self
    }

    /// Set the floor thickness.
    #[must_use]
    pub const fn with_floor_thickness(mut self, mm: f64) -> Self {
        self.floor_thickness = mm;
        self
    }

    /// Set the tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, mm: f64) -> Self {
        self.tolerance = mm;
        self
    }
}
