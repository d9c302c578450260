//! Geometric diagnostics for generated container, lid and tray parts.
//!
//! This umbrella crate re-exports the mesh-* crates behind one API. All
//! crates are Layer 0 (zero Bevy dependencies) and can be used in CLI tools,
//! servers, or test harnesses.
//!
//! # Quick Start
//!
//! ```no_run
//! use mesh::prelude::*;
//!
//! // One part on its own
//! let part = PartMesh::new(load_mesh("box.stl").unwrap());
//! let ramps = detect_ramps(&part, &RampParams::default()).unwrap();
//! println!("{} ramp clusters", ramps.len());
//!
//! // A whole analysis directory
//! let config = AnalysisConfig::load("mesh-analysis").unwrap();
//! let report = diagnose(&config);
//! report.write_json("mesh-analysis/report.json").unwrap();
//! ```
//!
//! # Module Organization
//!
//! ## Foundation
//! - [`types`] - `IndexedMesh`, `Aabb`, `Axis`, per-face records, `PartMesh`
//! - [`io`] - STL loading with multi-solid merge and vertex welding
//!
//! ## Per-part checks
//! - [`validate`] - Watertight, winding, Euler and degenerate-face checks
//! - [`region`] - Centroid-band and normal-predicate face queries
//! - [`features`] - Ramp clusters, expected-region and entry/exit checks, wall profiles
//!
//! ## Cross-part checks
//! - [`assembly`] - Placements, intersections and container fit
//!
//! ## Batch
//! - [`diagnose`] - Analysis-directory pipeline, report and renderer inputs

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Aabb`, `FaceTable`, `PartMesh`.
pub use mesh_types as types;

/// STL loading.
pub use mesh_io as io;

/// Structural integrity validation.
pub use mesh_validate as validate;

/// Face region queries.
pub use mesh_region as region;

/// Placements, intersections and fit.
pub use mesh_assembly as assembly;

/// Slide feature detection.
pub use mesh_features as features;

/// Batch diagnostics and report.
pub use mesh_diagnose as diagnose;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for mesh diagnostics.
///
/// # Usage
///
/// ```
/// use mesh::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{Aabb, Axis, IndexedMesh, MeshBounds, MeshTopology, PartMesh, Vertex};

    // I/O
    pub use mesh_io::{MeshFormat, load_mesh};

    // Validation
    pub use mesh_validate::{ValidationRecord, validate_mesh};

    // Cross-part checks
    pub use mesh_assembly::{
        BoxParameters, Part, PartRole, Placement, PlacementMap, analyze_fit, check_intersections,
    };

    // Features
    pub use mesh_features::{
        FeatureLocator, PartKind, RampParams, RegionParams, SlideOrientation,
        analyze_expected_regions, compare_entry_exit, detect_ramps,
    };

    // Batch
    pub use mesh_diagnose::{AnalysisConfig, DiagnosticReport, Diagnoser, diagnose};
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let mesh = IndexedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::IndexedMesh::new();
        let _ = validate::ValidationOptions::default();
        let _ = features::RampParams::default();
        let _ = assembly::BoxParameters::default();
        let _ = diagnose::Diagnoser::new();
    }
}
