//! The merged diagnostic report and its JSON form.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use hashbrown::HashSet;
use mesh_assembly::{IntersectionDefect, SpatialLayout};
use mesh_features::{EntryExitReport, RampCluster, RegionAnalysis};
use mesh_validate::{MeshStats, ValidationRecord};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::{DiagnoseError, DiagnoseResult};

/// Structural flags of one mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValidationSummary {
    /// Every edge shared by exactly two faces.
    pub is_watertight: bool,
    /// Shared edges walked in opposite directions.
    pub is_winding_consistent: bool,
    /// V - E + F, absent for non-manifold meshes.
    pub euler_number: Option<i64>,
}

/// Findings for a mesh that loaded and validated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshReport {
    /// Counts and measurements.
    pub stats: MeshStats,
    /// Structural flags.
    pub validation: ValidationSummary,
    /// Integrity errors as messages.
    pub errors: Vec<String>,
    /// Integrity warnings as messages, advisory ones included.
    pub warnings: Vec<String>,
    /// Ramp clusters found anywhere on the part.
    pub ramp_clusters: Vec<RampCluster>,
    /// Expected-region verdicts, for containers and lids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_analysis: Option<RegionAnalysis>,
    /// Entry/exit comparison, for containers and lids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry_exit: Option<EntryExitReport>,
    #[serde(skip)]
    issues: Vec<String>,
}

impl MeshReport {
    /// Report for a validated mesh, with no feature findings yet.
    #[must_use]
    pub fn new(record: ValidationRecord) -> Self {
        let issues = record
            .errors
            .iter()
            .map(ToString::to_string)
            .chain(
                record
                    .warnings
                    .iter()
                    .filter(|w| !w.is_advisory())
                    .map(ToString::to_string),
            )
            .collect();
        Self {
            validation: ValidationSummary {
                is_watertight: record.watertight,
                is_winding_consistent: record.winding_consistent,
                euler_number: record.euler_number,
            },
            errors: record.errors.iter().map(ToString::to_string).collect(),
            warnings: record.warnings.iter().map(ToString::to_string).collect(),
            stats: record.stats,
            ramp_clusters: Vec::new(),
            region_analysis: None,
            entry_exit: None,
            issues,
        }
    }

    /// Errors and non-advisory warnings, in that order.
    #[must_use]
    pub fn issues(&self) -> &[String] {
        &self.issues
    }
}

/// Outcome for one mesh.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeshEntry {
    /// The mesh was analyzed.
    Analyzed(Box<MeshReport>),
    /// Loading or validation failed.
    Failed {
        /// Failure message.
        error: String,
    },
}

impl MeshEntry {
    /// The report, if the mesh was analyzed.
    #[must_use]
    pub fn report(&self) -> Option<&MeshReport> {
        match self {
            Self::Analyzed(report) => Some(report),
            Self::Failed { .. } => None,
        }
    }
}

/// Mesh entries by name, in input order.
///
/// Names are unique: collecting keeps the first entry of a repeated name.
/// Serialized as a JSON object whose keys keep that order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshEntries(Vec<(String, MeshEntry)>);

impl MeshEntries {
    /// Entry by mesh name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MeshEntry> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Entries in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MeshEntry)> {
        self.0.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Names of the meshes that failed.
    pub fn failed(&self) -> impl Iterator<Item = &str> {
        self.iter()
            .filter(|(_, e)| e.report().is_none())
            .map(|(n, _)| n)
    }
}

impl FromIterator<(String, MeshEntry)> for MeshEntries {
    fn from_iter<I: IntoIterator<Item = (String, MeshEntry)>>(iter: I) -> Self {
        let mut seen = HashSet::new();
        Self(
            iter.into_iter()
                .filter(|(name, _)| seen.insert(name.clone()))
                .collect(),
        )
    }
}

impl Serialize for MeshEntries {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, entry) in &self.0 {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Totals and the flat issue list across all meshes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CombinedAnalysis {
    /// Vertices over analyzed meshes.
    pub total_vertices: usize,
    /// Faces over analyzed meshes.
    pub total_faces: usize,
    /// Every issue: per-mesh (`"<name>: <issue>"`), then intersections,
    /// then fit.
    pub issues: Vec<String>,
}

/// Intersection defects of one part pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IntersectionGroup {
    /// The two parts, content first for container defects.
    pub parts: [String; 2],
    /// Defects between them.
    pub defects: Vec<IntersectionDefect>,
}

/// Group defects by part pair, keeping first-seen pair order.
#[must_use]
pub fn group_intersections(defects: &[IntersectionDefect]) -> Vec<IntersectionGroup> {
    let mut groups: Vec<IntersectionGroup> = Vec::new();
    for defect in defects {
        let (a, b) = defect.parts();
        match groups.iter_mut().find(|g| g.parts[0] == a && g.parts[1] == b) {
            Some(group) => group.defects.push(defect.clone()),
            None => groups.push(IntersectionGroup {
                parts: [a.to_string(), b.to_string()],
                defects: vec![defect.clone()],
            }),
        }
    }
    groups
}

/// Everything found in one analysis directory.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosticReport {
    /// Per-mesh outcomes.
    pub meshes: MeshEntries,
    /// Totals and issues.
    pub combined_analysis: CombinedAnalysis,
    /// Intersection defects by part pair.
    pub intersections: Vec<IntersectionGroup>,
    /// Container, contents and fit.
    pub spatial_layout: SpatialLayout,
}

impl DiagnosticReport {
    /// True when no issue was found and every mesh was analyzed.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.combined_analysis.issues.is_empty() && self.meshes.failed().next().is_none()
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_json(&self, path: impl AsRef<Path>) -> DiagnoseResult<()> {
        write_json(path, self)
    }
}

/// Write any serializable value as pretty-printed JSON.
///
/// # Errors
///
/// Returns [`DiagnoseError::Io`] if the file cannot be created or flushed and
/// [`DiagnoseError::Json`] if serialization fails.
pub fn write_json<T: Serialize + ?Sized>(path: impl AsRef<Path>, value: &T) -> DiagnoseResult<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| DiagnoseError::io(path, e))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(|e| DiagnoseError::json(path, e))?;
    writer.flush().map_err(|e| DiagnoseError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Axis;
    use mesh_types::unit_cube;
    use mesh_validate::validate_mesh;

    fn outside(content: &str, axis: Axis) -> IntersectionDefect {
        IntersectionDefect::OutsideContainer {
            content: content.to_string(),
            container: "box".to_string(),
            axis,
            side: mesh_assembly::Side::Max,
        }
    }

    #[test]
    fn groups_follow_pairs() {
        let defects = vec![
            outside("tray_A", Axis::X),
            outside("tray_A", Axis::Y),
            IntersectionDefect::Collision {
                a: "tray_A".to_string(),
                b: "tray_B".to_string(),
            },
        ];
        let groups = group_intersections(&defects);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].parts, ["tray_A".to_string(), "box".to_string()]);
        assert_eq!(groups[0].defects.len(), 2);
        assert_eq!(groups[1].defects.len(), 1);
    }

    #[test]
    fn closed_mesh_has_no_issues() {
        let report = MeshReport::new(validate_mesh(&unit_cube()).unwrap());
        assert!(report.validation.is_watertight);
        assert_eq!(report.validation.euler_number, Some(2));
        assert!(report.issues().is_empty());
    }

    #[test]
    fn open_mesh_warning_is_not_an_issue() {
        let mut mesh = unit_cube();
        mesh.faces.pop();
        let report = MeshReport::new(validate_mesh(&mesh).unwrap());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.issues().is_empty());
    }

    #[test]
    fn entries_serialize_in_input_order() {
        let entries: MeshEntries = [
            ("lid".to_string(), MeshEntry::Failed { error: "x".into() }),
            ("box".to_string(), MeshEntry::Failed { error: "y".into() }),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(json, r#"{"lid":{"error":"x"},"box":{"error":"y"}}"#);
        assert_eq!(entries.failed().collect::<Vec<_>>(), vec!["lid", "box"]);
    }

    #[test]
    fn repeated_names_keep_first_entry() {
        let entries: MeshEntries = [
            ("tray_A".to_string(), MeshEntry::Failed { error: "first".into() }),
            ("tray_A".to_string(), MeshEntry::Failed { error: "second".into() }),
        ]
        .into_iter()
        .collect();
        assert_eq!(entries.len(), 1);
        let json = serde_json::to_string(&entries).unwrap();
        assert_eq!(json, r#"{"tray_A":{"error":"first"}}"#);
    }
}
