//! Container and content assemblies checked by their bounds.
//!
//! Parts are named meshes reduced to axis-aligned bounds. A part's role is
//! inferred from its name: the box is the container, trays are its contents,
//! the lid and anything else are carried along but never checked.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Overview
//!
//! - [`Assembly`] - ordered, uniquely named parts
//! - [`check_intersections`] - tray collisions and trays sticking out of the box
//! - [`analyze_fit`] - tray layout by placement and interior capacity check
//! - [`BoxParameters`] / [`PlacementMap`] - declared inputs, with defaults
//!
//! # Quick Start
//!
//! ```
//! use mesh_types::{Aabb, Point3};
//! use mesh_assembly::{Assembly, BoxParameters, Part, Placement, PlacementMap};
//!
//! let mut assembly = Assembly::new();
//! assembly.add_part(Part::new(
//!     "box",
//!     Aabb::new(Point3::origin(), Point3::new(100.0, 150.0, 40.0)),
//! )).unwrap();
//! assembly.add_part(Part::new(
//!     "tray_A_Cards",
//!     Aabb::new(Point3::origin(), Point3::new(90.0, 70.0, 30.0)),
//! )).unwrap();
//!
//! let mut placements = PlacementMap::new();
//! placements.insert("tray_A_Cards", Placement::new(5.0, 5.0));
//!
//! assert!(assembly.check_intersections(&placements).is_empty());
//! let layout = assembly.analyze_fit(&BoxParameters::default(), &placements);
//! assert!(layout.defects().is_empty());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod assembly;
mod error;
mod fit;
mod intersect;
mod params;
mod part;
mod placement;

pub use assembly::Assembly;
pub use error::{AssemblyError, AssemblyResult};
pub use fit::{
    ContentLayout, Dimensions, FIT_SLACK, FitAxis, FitCheck, FitDefect, PlacedRange, SpatialLayout,
    analyze_fit,
};
pub use intersect::{IntersectionDefect, OVERLAP_MARGIN, Side, check_intersections};
pub use params::{
    BoxParameters, DEFAULT_FLOOR_THICKNESS, DEFAULT_TOLERANCE, DEFAULT_WALL_THICKNESS,
};
pub use part::{Part, PartRole};
pub use placement::{Placement, PlacementMap};
