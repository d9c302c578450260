//! Core mesh types for the fit diagnostics workspace.
//!
//! This crate provides the foundational types shared by every analysis:
//!
//! - [`Vertex`] - A point in 3D space
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box with placement and overlap helpers
//! - [`Axis`] - World axis selector
//! - [`FaceTable`] / [`FaceRecord`] - Per-face normal, centroid and area, computed once
//! - [`PartMesh`] - A mesh bundled with its face table and bounds
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Units
//!
//! Coordinates are `f64` millimeters.
//!
//! # Coordinate System
//!
//! Right-handed:
//! - X: width (left/right)
//! - Y: depth (front/back)
//! - Z: height (up/down)
//!
//! Face winding is counter-clockwise when viewed from outside.
//!
//! # Example
//!
//! ```
//! use mesh_types::{Vertex, IndexedMesh, MeshTopology, PartMesh};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! assert_eq!(mesh.face_count(), 1);
//!
//! let part = PartMesh::new(mesh);
//! assert!((part.faces().total_area() - 0.5).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod axis;
mod bounds;
mod face;
mod mesh;
mod part;
mod traits;
mod triangle;
mod vertex;

pub use axis::Axis;
pub use bounds::Aabb;
pub use face::{FaceRecord, FaceTable};
pub use mesh::{IndexedMesh, unit_cube};
pub use part::PartMesh;
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
