//! Error types for assembly operations.

use thiserror::Error;

/// Result type for assembly operations.
pub type AssemblyResult<T> = Result<T, AssemblyError>;

/// Errors that can occur while building an assembly.
///
/// Geometric findings (overlaps, overflow) are never errors; they are
/// returned as defect values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssemblyError {
    /// Part with the given name already exists.
    #[error("Part '{name}' already exists in assembly")]
    DuplicatePart {
        /// The duplicate part name.
        name: String,
    },

    /// Part has no geometry to take bounds from.
    #[error("Part '{name}' has empty bounds")]
    EmptyBounds {
        /// The part name.
        name: String,
    },
}
