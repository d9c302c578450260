//! Targeted checks of the wall regions where slide features belong.

use std::fmt;

use mesh_region::{AxisBand, RegionFilter, select};
use mesh_types::{FaceRecord, PartMesh};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::{FeatureError, FeatureResult};
use crate::orientation::{OrientedFrame, PartKind, SlideOrientation};
use crate::params::RegionParams;

/// Verdict for one region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum RegionClass {
    /// No faces in the region.
    NoGeometry,
    /// Faces present but too few angled ones.
    FlatOnly,
    /// Enough angled faces to be a ramp.
    RampDetected,
}

impl fmt::Display for RegionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::NoGeometry => "no-geometry",
            Self::FlatOnly => "flat-only",
            Self::RampDetected => "ramp-detected",
        })
    }
}

/// Measurements of one wall region.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RegionAnalysisResult {
    /// Region name, e.g. `left_wall`.
    pub region: String,
    /// Faces whose centre lies in the region.
    pub face_count: usize,
    /// Their total area.
    pub total_area: f64,
    /// How many of them are angled.
    pub angled_face_count: usize,
    /// Verdict.
    pub classification: RegionClass,
}

/// Both wall regions of a part.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RegionAnalysis {
    /// Orientation the regions were built for.
    pub orientation: SlideOrientation,
    /// Part kind that chose the vertical band.
    pub kind: PartKind,
    /// Slide distance from the part's start beyond which a face is at the exit.
    pub exit_threshold: f64,
    /// Near wall then far wall.
    pub regions: Vec<RegionAnalysisResult>,
}

impl RegionAnalysis {
    /// Result for a named region.
    #[must_use]
    pub fn get(&self, region: &str) -> Option<&RegionAnalysisResult> {
        self.regions.iter().find(|r| r.region == region)
    }

    /// True when any region found a ramp.
    #[must_use]
    pub fn ramp_detected(&self) -> bool {
        self.regions
            .iter()
            .any(|r| r.classification == RegionClass::RampDetected)
    }
}

fn is_angled(face: &FaceRecord, params: &RegionParams) -> bool {
    let n = face.normal;
    n.z.abs() < params.angled_max_vertical
        && (n.x.abs() > params.angled_min_horizontal || n.y.abs() > params.angled_min_horizontal)
}

pub(crate) fn require_faces(part: &PartMesh) -> FeatureResult<()> {
    if part.faces().is_empty() {
        Err(FeatureError::EmptyMesh)
    } else {
        Ok(())
    }
}

fn analyze_region(
    part: &PartMesh,
    name: &str,
    filter: &RegionFilter,
    params: &RegionParams,
) -> RegionAnalysisResult {
    let (face_count, total_area, angled_face_count) = select(part.faces(), filter).fold(
        (0, 0.0, 0),
        |(count, area, angled), face| {
            (
                count + 1,
                area + face.area,
                angled + usize::from(is_angled(face, params)),
            )
        },
    );

    let classification = if face_count == 0 {
        RegionClass::NoGeometry
    } else if angled_face_count > params.ramp_angled_min {
        RegionClass::RampDetected
    } else {
        RegionClass::FlatOnly
    };

    debug!(
        region = name,
        faces = face_count,
        angled = angled_face_count,
        class = %classification,
        "Region analyzed"
    );

    RegionAnalysisResult {
        region: name.to_string(),
        face_count,
        total_area,
        angled_face_count,
        classification,
    }
}

/// Check the two feature walls near the exit end of the slide.
///
/// Each region is a wall strip (wall thickness plus margin, measured from
/// the outer face) limited to the vertical feature band of `kind` and to
/// slide positions strictly beyond `exit_fraction` of the slide extent.
///
/// # Errors
///
/// Returns [`FeatureError::EmptyMesh`] for a part without faces and
/// [`FeatureError::InvalidParameter`] if `params` fail validation.
pub fn analyze_expected_regions(
    part: &PartMesh,
    kind: PartKind,
    params: &RegionParams,
) -> FeatureResult<RegionAnalysis> {
    params.validate()?;
    require_faces(part)?;

    let frame = OrientedFrame::new(*part.bounds());
    let orientation = frame.orientation();
    let exit_threshold = params.exit_fraction * frame.slide_extent();
    let slide = AxisBand::above(exit_threshold);
    let vertical = kind.feature_band(frame.height());

    let regions: Vec<RegionAnalysisResult> = frame
        .wall_strips(params.wall_strip())
        .into_iter()
        .zip(orientation.wall_names())
        .map(|(wall, name)| analyze_region(part, name, &frame.filter(wall, slide, vertical), params))
        .collect();

    let analysis = RegionAnalysis {
        orientation,
        kind,
        exit_threshold,
        regions,
    };
    info!(
        orientation = %orientation,
        ramp_detected = analysis.ramp_detected(),
        "Expected-region analysis complete"
    );
    Ok(analysis)
}
