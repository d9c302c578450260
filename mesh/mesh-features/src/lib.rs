//! Slide feature detection for box, lid and tray parts.
//!
//! Two strategies look for the small ramps that guide a sliding lid:
//!
//! - [`detect_ramps`] clusters slanted faces anywhere on a part, with no
//!   prior idea of where a ramp should be.
//! - [`analyze_expected_regions`] and [`compare_entry_exit`] inspect only the
//!   wall strips the part's [`SlideOrientation`] says should carry features,
//!   and tell a ramp at the exit from one built at the entry.
//!
//! [`FeatureLocator`] selects between them. [`wall_profile`] slices a part
//! at stacked heights to show where its walls step in.
//!
//! All thresholds are named constants in [`params`] and are the defaults of
//! [`RampParams`] and [`RegionParams`].
//!
//! # Layer 0
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Example
//!
//! ```
//! use mesh_types::{unit_cube, PartMesh};
//! use mesh_features::{PartKind, RegionParams, analyze_expected_regions};
//!
//! let part = PartMesh::new(unit_cube());
//! let analysis = analyze_expected_regions(&part, PartKind::Lid, &RegionParams::default()).unwrap();
//! assert!(!analysis.ramp_detected());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod cluster;
mod entry_exit;
mod error;
mod locator;
mod orientation;
pub mod params;
mod profile;
mod ramp;
mod regions;

#[cfg(test)]
mod testing;

pub use entry_exit::{Diagnosis, EntryExitClass, EntryExitReport, compare_entry_exit};
pub use error::{FeatureError, FeatureResult};
pub use locator::{FeatureFindings, FeatureLocator};
pub use orientation::{OrientedFrame, PartKind, SlideOrientation};
pub use params::{RampParams, RegionParams};
pub use profile::{
    DEFAULT_PROFILE_LEVELS, ProfileLevel, ProfileStep, STEP_THRESHOLD, WallProfile, wall_profile,
};
pub use ramp::{Protrusion, RampCluster, detect_ramps, position_tags};
pub use regions::{RegionAnalysis, RegionAnalysisResult, RegionClass, analyze_expected_regions};
