//! Error types for feature detection.

use mesh_region::RegionError;
use thiserror::Error;

/// Result type for feature detection.
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Errors raised before any detection runs.
///
/// Finding nothing is never an error: detectors return empty results.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum FeatureError {
    /// The part has no faces to measure.
    #[error("mesh has no faces")]
    EmptyMesh,

    /// A tuning parameter is out of range.
    #[error("invalid {name}: {value}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A region band could not be built.
    #[error(transparent)]
    Region(#[from] RegionError),
}
