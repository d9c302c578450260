//! Batch diagnostics for a directory of generated parts.
//!
//! Reads an analysis directory (see [`config`]), analyzes every mesh in
//! parallel, then checks the placed parts against each other:
//!
//! 1. load and validate each STL; a failure is recorded for that mesh only
//! 2. detect ramp clusters on every part
//! 3. inspect the expected feature walls of the box and lid
//! 4. check intersections and container fit across the successful parts
//!
//! The result is a [`DiagnosticReport`] that serializes to the
//! `report.json` layout. [`view`] turns a report or a part into inputs for
//! an external renderer.
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Example
//!
//! ```no_run
//! use mesh_diagnose::{AnalysisConfig, diagnose};
//!
//! let config = AnalysisConfig::load("mesh-analysis").unwrap();
//! let report = diagnose(&config);
//! for issue in &report.combined_analysis.issues {
//!     println!("- {issue}");
//! }
//! report.write_json("mesh-analysis/report.json").unwrap();
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

pub mod config;
mod error;
mod pipeline;
mod report;
pub mod view;

pub use config::{AnalysisConfig, REPORT_FILE};
pub use error::{DiagnoseError, DiagnoseResult};
pub use pipeline::{AnalyzedMesh, Diagnoser, diagnose, feature_kind};
pub use report::{
    CombinedAnalysis, DiagnosticReport, IntersectionGroup, MeshEntries, MeshEntry, MeshReport,
    ValidationSummary, group_intersections, write_json,
};
pub use view::{CameraPose, CameraPreset, Marker, MarkerColor, MarkerSet, MeshProbe, ramp_markers};
