//! One entry point for both feature location strategies.

use mesh_types::PartMesh;

use crate::entry_exit::{EntryExitReport, compare_entry_exit};
use crate::error::FeatureResult;
use crate::orientation::PartKind;
use crate::params::{RampParams, RegionParams};
use crate::ramp::{RampCluster, detect_ramps};
use crate::regions::{RegionAnalysis, analyze_expected_regions};

/// How to look for slide features on a part.
///
/// `Unsupervised` searches the whole part with no idea where features
/// should be. `TargetedRegion` only inspects the walls where the slide
/// orientation says they belong, which is cheaper and also catches a
/// feature built at the wrong end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeatureLocator {
    /// Cluster diagonal faces anywhere.
    Unsupervised(RampParams),
    /// Inspect the expected wall regions of a container or lid.
    TargetedRegion {
        /// Which band of the part to inspect.
        kind: PartKind,
        /// Region thresholds.
        params: RegionParams,
    },
}

/// What a locator found.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureFindings {
    /// Ramp clusters, possibly none.
    Clusters(Vec<RampCluster>),
    /// Region verdicts and the entry/exit comparison.
    Regions {
        /// Exit-end wall regions.
        analysis: RegionAnalysis,
        /// Entry versus exit protrusion.
        entry_exit: EntryExitReport,
    },
}

impl FeatureLocator {
    /// Run the strategy on a part.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the underlying detector.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{unit_cube, PartMesh};
    /// use mesh_features::{FeatureFindings, FeatureLocator, RampParams};
    ///
    /// let part = PartMesh::new(unit_cube());
    /// let findings = FeatureLocator::Unsupervised(RampParams::default())
    ///     .locate(&part)
    ///     .unwrap();
    /// assert_eq!(findings, FeatureFindings::Clusters(Vec::new()));
    /// ```
    pub fn locate(&self, part: &PartMesh) -> FeatureResult<FeatureFindings> {
        match self {
            Self::Unsupervised(params) => detect_ramps(part, params).map(FeatureFindings::Clusters),
            Self::TargetedRegion { kind, params } => Ok(FeatureFindings::Regions {
                analysis: analyze_expected_regions(part, *kind, params)?,
                entry_exit: compare_entry_exit(part, *kind, params)?,
            }),
        }
    }
}
