//! Error types for region filters.

use mesh_types::Axis;
use thiserror::Error;

/// Result type for region operations.
pub type RegionResult<T> = Result<T, RegionError>;

/// Errors raised when building a region filter from untrusted values.
///
/// Queries themselves never fail; an empty match is a valid result.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum RegionError {
    /// Normal predicate threshold outside [0, 1).
    #[error("normal threshold {min} on {axis} axis must lie in [0, 1)")]
    NormalThreshold {
        /// Axis the predicate reads.
        axis: Axis,
        /// The rejected threshold.
        min: f64,
    },
}
