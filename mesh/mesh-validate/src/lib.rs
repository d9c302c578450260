//! Structural integrity validation for generated parts.
//!
//! For each mesh this crate reports:
//! - whether it is watertight (every edge shared by exactly two faces)
//! - whether adjacent faces wind consistently
//! - its Euler number, when the mesh is manifold
//! - degenerate (near zero area) faces
//! - counts, surface area, bounds, and volume when closed
//!
//! Empty or unreadable geometry is a [`ValidateError`]; everything else is a
//! finding on the returned [`ValidationRecord`].
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, Vertex};
//! use mesh_validate::validate_mesh;
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! let record = validate_mesh(&mesh).unwrap();
//! assert!(!record.watertight);
//! assert!(record.errors.is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod adjacency;
mod error;
mod stats;
mod validate;

pub use adjacency::{EdgeAdjacency, EdgeUse};
pub use error::{ValidateError, ValidateResult};
pub use stats::{BoundingBoxStats, MeshStats};
pub use validate::{
    DEGENERATE_AREA_EPSILON, IntegrityError, IntegrityWarning, ValidationOptions, ValidationRecord,
    validate_mesh, validate_mesh_with_options,
};
