//! Entry-versus-exit comparison of protruding wall faces.
//!
//! A slide feature printed at the wrong end of its channel still passes a
//! "is there a ramp" check. Counting faces that protrude into the channel
//! at both ends tells the two cases apart.

use std::fmt;

use mesh_region::{AxisBand, NormalPredicate, Sign, select};
use mesh_types::PartMesh;
use tracing::info;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::error::FeatureResult;
use crate::orientation::{OrientedFrame, PartKind, SlideOrientation};
use crate::params::{EXIT_SUFFICIENT, RegionParams};
use crate::regions::require_faces;

/// Verdict of an entry/exit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum EntryExitClass {
    /// More protrusion at the entry than the exit: feature at the wrong end.
    EntryExceedsExit,
    /// Enough protrusion at the exit.
    ExitSufficient,
    /// Feature at the exit but too sparse.
    ExitInsufficient,
}

impl EntryExitClass {
    /// True for the wrong-end defect.
    #[must_use]
    pub const fn is_defect(self) -> bool {
        matches!(self, Self::EntryExceedsExit)
    }
}

impl fmt::Display for EntryExitClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::EntryExceedsExit => "entry-exceeds-exit",
            Self::ExitSufficient => "exit-sufficient",
            Self::ExitInsufficient => "exit-insufficient",
        })
    }
}

/// Protruding face counts at both ends and their verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Diagnosis {
    /// Protruding faces at the entry end.
    pub entry_count: usize,
    /// Protruding faces at the exit end.
    pub exit_count: usize,
    /// Verdict.
    pub classification: EntryExitClass,
}

impl Diagnosis {
    /// Classify counts using the default exit threshold.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_features::{Diagnosis, EntryExitClass};
    ///
    /// assert_eq!(Diagnosis::classify(8, 2).classification, EntryExitClass::EntryExceedsExit);
    /// assert_eq!(Diagnosis::classify(3, 11).classification, EntryExitClass::ExitSufficient);
    /// assert_eq!(Diagnosis::classify(3, 10).classification, EntryExitClass::ExitInsufficient);
    /// ```
    #[must_use]
    pub fn classify(entry_count: usize, exit_count: usize) -> Self {
        Self::classify_with(entry_count, exit_count, EXIT_SUFFICIENT)
    }

    /// Classify counts; the exit is sufficient above `exit_sufficient`.
    #[must_use]
    pub fn classify_with(entry_count: usize, exit_count: usize, exit_sufficient: usize) -> Self {
        let classification = if entry_count > exit_count {
            EntryExitClass::EntryExceedsExit
        } else if exit_count > exit_sufficient {
            EntryExitClass::ExitSufficient
        } else {
            EntryExitClass::ExitInsufficient
        };
        Self {
            entry_count,
            exit_count,
            classification,
        }
    }
}

/// Entry/exit diagnosis with the orientation it was measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct EntryExitReport {
    /// Slide orientation of the part.
    pub orientation: SlideOrientation,
    /// Counts and verdict.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub diagnosis: Diagnosis,
}

/// Count faces protruding into the channel at each end of the slide.
///
/// Both ends are bands `wall thickness + end band width` long on the slide
/// axis. Within each, faces are taken from both wall strips and the vertical
/// feature band of `kind`. A face protrudes when its wall-axis normal
/// component exceeds the threshold pointing away from its wall: positive on
/// the near wall, negative on the far wall.
///
/// # Errors
///
/// Returns [`crate::FeatureError::EmptyMesh`] for a part without faces and
/// [`crate::FeatureError::InvalidParameter`] if `params` fail validation.
pub fn compare_entry_exit(
    part: &PartMesh,
    kind: PartKind,
    params: &RegionParams,
) -> FeatureResult<EntryExitReport> {
    params.validate()?;
    require_faces(part)?;

    let frame = OrientedFrame::new(*part.bounds());
    let orientation = frame.orientation();
    let wall_axis = orientation.wall_axis();
    let extent = frame.slide_extent();
    let end = params.end_band();
    let vertical = kind.feature_band(frame.height());

    let [near, far] = frame.wall_strips(params.wall_strip());
    let walls = [
        (near, NormalPredicate::signed(wall_axis, Sign::Positive, params.protrusion_min)?),
        (far, NormalPredicate::signed(wall_axis, Sign::Negative, params.protrusion_min)?),
    ];

    let count = |slide: AxisBand| -> usize {
        walls
            .iter()
            .map(|&(wall, into_channel)| {
                let filter = frame.filter(wall, slide, vertical).with_normal(into_channel);
                select(part.faces(), &filter).count()
            })
            .sum()
    };

    let entry_count = count(AxisBand::closed(0.0, end));
    let exit_count = count(AxisBand::closed(extent - end, extent));
    let diagnosis = Diagnosis::classify_with(entry_count, exit_count, params.exit_sufficient);

    info!(
        orientation = %orientation,
        entry = entry_count,
        exit = exit_count,
        diagnosis = %diagnosis.classification,
        "Entry/exit comparison complete"
    );

    Ok(EntryExitReport {
        orientation,
        diagnosis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{corner, floor, slanted, slanted_y, soup};

    /// 40 × 90 × 30 container with ramps on both walls at the given slide
    /// positions. Left-wall faces lean +X, right-wall faces lean -X.
    fn container_with(left: &[f64], right: &[f64]) -> PartMesh {
        let mut triangles = vec![floor(40.0, 90.0), corner([40.0, 90.0, 30.0])];
        triangles.extend(left.iter().map(|&y| slanted([3.0, y, 26.5], 1.0, 1.0)));
        triangles.extend(right.iter().map(|&y| slanted([37.0, y, 26.5], 1.0, -1.0)));
        soup(&triangles)
    }

    #[test]
    fn ramp_at_entry_is_flagged() {
        let entry: Vec<f64> = (0..8).map(|i| 1.0 + f64::from(i) * 1.2).collect();
        let part = container_with(&entry, &[80.0, 82.0]);

        let report = compare_entry_exit(&part, PartKind::Container, &RegionParams::default()).unwrap();
        assert_eq!(report.orientation, SlideOrientation::DepthSlide);
        assert_eq!(report.diagnosis.entry_count, 8);
        assert_eq!(report.diagnosis.exit_count, 2);
        assert_eq!(report.diagnosis.classification, EntryExitClass::EntryExceedsExit);
        assert!(report.diagnosis.classification.is_defect());
    }

    #[test]
    fn both_walls_count_at_exit() {
        let exit: Vec<f64> = (0..6).map(|i| 78.0 + f64::from(i) * 1.5).collect();
        let part = container_with(&exit, &exit);

        let report = compare_entry_exit(&part, PartKind::Container, &RegionParams::default()).unwrap();
        assert_eq!(report.diagnosis.entry_count, 0);
        assert_eq!(report.diagnosis.exit_count, 12);
        assert_eq!(report.diagnosis.classification, EntryExitClass::ExitSufficient);
    }

    #[test]
    fn faces_pointing_into_the_wall_do_not_count() {
        // Left-wall faces leaning -X point back into the wall.
        let mut triangles = vec![floor(40.0, 90.0), corner([40.0, 90.0, 30.0])];
        triangles.extend((0..4).map(|i| slanted([2.0, 80.0 + f64::from(i), 26.5], 1.0, -1.0)));
        let part = soup(&triangles);

        let report = compare_entry_exit(&part, PartKind::Container, &RegionParams::default()).unwrap();
        assert_eq!(report.diagnosis.exit_count, 0);
        assert_eq!(report.diagnosis.classification, EntryExitClass::ExitInsufficient);
    }

    /// 90 × 40 × 30 container; front-wall faces lean +Y, back-wall faces -Y.
    fn wide_container_with(front: &[f64], back: &[f64]) -> PartMesh {
        let mut triangles = vec![floor(90.0, 40.0), corner([90.0, 40.0, 30.0])];
        triangles.extend(front.iter().map(|&x| slanted_y([x, 3.0, 27.5], 1.0, 1.0)));
        triangles.extend(back.iter().map(|&x| slanted_y([x, 37.0, 27.5], 1.0, -1.0)));
        soup(&triangles)
    }

    #[test]
    fn width_slide_mirrors_onto_x() {
        let entry: Vec<f64> = (0..8).map(|i| 1.0 + f64::from(i) * 1.2).collect();
        let part = wide_container_with(&entry, &[80.0, 82.0]);

        let report = compare_entry_exit(&part, PartKind::Container, &RegionParams::default()).unwrap();
        assert_eq!(report.orientation, SlideOrientation::WidthSlide);
        assert_eq!(report.diagnosis.entry_count, 8);
        assert_eq!(report.diagnosis.exit_count, 2);
        assert_eq!(report.diagnosis.classification, EntryExitClass::EntryExceedsExit);

        let exit: Vec<f64> = (0..6).map(|i| 78.0 + f64::from(i) * 1.5).collect();
        let part = wide_container_with(&exit, &exit);
        let report = compare_entry_exit(&part, PartKind::Container, &RegionParams::default()).unwrap();
        assert_eq!(report.diagnosis.entry_count, 0);
        assert_eq!(report.diagnosis.exit_count, 12);
        assert_eq!(report.diagnosis.classification, EntryExitClass::ExitSufficient);
    }

    #[test]
    fn equal_counts_are_not_a_defect() {
        let d = Diagnosis::classify(4, 4);
        assert_eq!(d.classification, EntryExitClass::ExitInsufficient);
        assert!(!d.classification.is_defect());
        assert_eq!(d.classification.to_string(), "exit-insufficient");
    }
}
