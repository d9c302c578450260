//! Spatial region queries over a mesh's cached face table.
//!
//! A [`RegionFilter`] describes a region by up to three centroid bands
//! ([`AxisBand`], one per axis) and an optional [`NormalPredicate`]. The
//! [`select`] function returns the matching faces lazily, in face order.
//! Feature analyzers build all their wall, groove and channel-end regions
//! from these pieces.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Quick Start
//!
//! ```
//! use mesh_types::{Axis, PartMesh, unit_cube};
//! use mesh_region::{AxisBand, NormalPredicate, RegionFilter, Sign, select};
//!
//! let part = PartMesh::new(unit_cube());
//!
//! // Faces on the +X side whose normals point outward along +X.
//! let filter = RegionFilter::new()
//!     .with_band(Axis::X, AxisBand::above(0.5))
//!     .with_normal(NormalPredicate::Signed { axis: Axis::X, sign: Sign::Positive, min: 0.3 });
//!
//! let summary = select(part.faces(), &filter).summary();
//! assert_eq!(summary.face_count, 2);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod band;
mod error;
mod filter;
mod predicate;

pub use band::AxisBand;
pub use error::{RegionError, RegionResult};
pub use filter::{RegionFilter, RegionSelection, RegionSummary, select};
pub use predicate::{NormalPredicate, Sign};
