//! Wall cross-sections at stacked heights.
//!
//! Slices the vertex cloud at evenly spaced Z levels and reports, per
//! level, the outer Y extent and the Y positions where inner walls start
//! or stop. A jump in the outer extent between two levels marks a step in
//! the wall, such as the ledge below a lid channel.

use mesh_types::{IndexedMesh, MeshBounds};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{FeatureError, FeatureResult};

/// Vertices within this distance of a level belong to its slice.
pub const SLICE_HALF_THICKNESS: f64 = 0.3;

/// Change in Y extent between levels that counts as a step.
pub const STEP_THRESHOLD: f64 = 5.0;

/// Spacing between neighbouring Y positions that counts as a gap.
pub const WALL_GAP: f64 = 3.0;

/// Default number of levels.
pub const DEFAULT_PROFILE_LEVELS: usize = 20;

/// One horizontal slice.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProfileLevel {
    /// Height of the slice.
    pub z: f64,
    /// Vertices in the slice.
    pub vertex_count: usize,
    /// Smallest Y in the slice.
    pub y_min: f64,
    /// Largest Y in the slice.
    pub y_max: f64,
    /// Distinct Y positions (to 0.1) strictly inside the outer extent.
    pub inner: Vec<f64>,
    /// Pairs of neighbouring Y positions more than [`WALL_GAP`] apart.
    pub gaps: Vec<[f64; 2]>,
}

impl ProfileLevel {
    /// Outer Y extent of the slice.
    #[must_use]
    pub fn y_range(&self) -> f64 {
        self.y_max - self.y_min
    }
}

/// A jump in outer Y extent between consecutive non-empty levels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ProfileStep {
    /// Height of the upper level.
    pub z: f64,
    /// Y extent below.
    pub from: f64,
    /// Y extent at `z`.
    pub to: f64,
}

/// Slices and steps of a part.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct WallProfile {
    /// Non-empty slices, bottom to top.
    pub levels: Vec<ProfileLevel>,
    /// Detected steps, bottom to top.
    pub steps: Vec<ProfileStep>,
}

fn round_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn slice(mesh: &IndexedMesh, z: f64) -> Option<ProfileLevel> {
    let ys: Vec<f64> = mesh
        .vertices
        .iter()
        .filter(|v| (v.position.z - z).abs() < SLICE_HALF_THICKNESS)
        .map(|v| v.position.y)
        .collect();
    if ys.is_empty() {
        return None;
    }

    let y_min = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let y_max = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut distinct: Vec<f64> = ys.iter().copied().map(round_tenth).collect();
    distinct.sort_by(f64::total_cmp);
    distinct.dedup();

    let (outer_lo, outer_hi) = (round_tenth(y_min), round_tenth(y_max));
    let inner = distinct
        .iter()
        .copied()
        .filter(|&y| y > outer_lo && y < outer_hi)
        .collect();
    let gaps = distinct
        .windows(2)
        .filter(|w| w[1] - w[0] > WALL_GAP)
        .map(|w| [w[0], w[1]])
        .collect();

    Some(ProfileLevel {
        z,
        vertex_count: ys.len(),
        y_min,
        y_max,
        inner,
        gaps,
    })
}

/// Slice a mesh at `levels` evenly spaced heights from bottom to top.
///
/// Levels whose slice holds no vertex are left out and do not break step
/// detection across them.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyMesh`] for a mesh without vertices and
/// [`FeatureError::InvalidParameter`] for fewer than two levels.
pub fn wall_profile(mesh: &IndexedMesh, levels: usize) -> FeatureResult<WallProfile> {
    #[allow(clippy::cast_precision_loss)]
    let level_count = levels as f64;
    if levels < 2 {
        return Err(FeatureError::InvalidParameter {
            name: "levels",
            value: level_count,
        });
    }
    let bounds = mesh.bounds_opt().ok_or(FeatureError::EmptyMesh)?;
    let (z_min, z_max) = (bounds.min.z, bounds.max.z);

    let mut profile = WallProfile::default();
    let spacing = (z_max - z_min) / (level_count - 1.0);
    for i in 0..levels {
        #[allow(clippy::cast_precision_loss)]
        let z = (i as f64).mul_add(spacing, z_min);
        let Some(level) = slice(mesh, z) else {
            continue;
        };
        if let Some(prev) = profile.levels.last()
            && (level.y_range() - prev.y_range()).abs() > STEP_THRESHOLD
        {
            profile.steps.push(ProfileStep {
                z,
                from: prev.y_range(),
                to: level.y_range(),
            });
        }
        profile.levels.push(level);
    }

    debug!(
        levels = profile.levels.len(),
        steps = profile.steps.len(),
        "Wall profile computed"
    );
    Ok(profile)
}
