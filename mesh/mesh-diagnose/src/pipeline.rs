//! Per-mesh analysis and the cross-mesh checks that follow it.

use std::path::Path;

use hashbrown::HashSet;
use mesh_assembly::{Assembly, Part, PartRole};
use mesh_features::{FeatureFindings, FeatureLocator, PartKind, RampParams, RegionParams};
use mesh_io::load_mesh;
use mesh_types::{Aabb, IndexedMesh, PartMesh};
use mesh_validate::validate_mesh;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::config::{AnalysisConfig, part_name};
use crate::error::DiagnoseResult;
use crate::report::{
    CombinedAnalysis, DiagnosticReport, MeshEntries, MeshEntry, MeshReport, group_intersections,
};

/// Feature kind inspected for a part role, if any.
#[must_use]
pub const fn feature_kind(role: PartRole) -> Option<PartKind> {
    match role {
        PartRole::Container => Some(PartKind::Container),
        PartRole::Lid => Some(PartKind::Lid),
        PartRole::Content | PartRole::Other => None,
    }
}

/// A mesh that made it through analysis.
#[derive(Debug, Clone)]
pub struct AnalyzedMesh {
    /// Findings.
    pub report: MeshReport,
    /// Vertex bounds, used by the cross-mesh checks.
    pub bounds: Aabb,
}

/// Runs the diagnostic pipeline.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_diagnose::Diagnoser;
///
/// let analyzed = Diagnoser::new().analyze_mesh("tray_A", unit_cube()).unwrap();
/// assert!(analyzed.report.validation.is_watertight);
/// assert!(analyzed.report.region_analysis.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Diagnoser {
    ramp: RampParams,
    region: RegionParams,
}

impl Diagnoser {
    /// Diagnoser with default thresholds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ramp detector thresholds.
    #[must_use]
    pub const fn with_ramp_params(mut self, params: RampParams) -> Self {
        self.ramp = params;
        self
    }

    /// Set the region thresholds. The wall thickness is replaced by the box
    /// parameters in [`run`](Self::run).
    #[must_use]
    pub const fn with_region_params(mut self, params: RegionParams) -> Self {
        self.region = params;
        self
    }

    /// Validate one mesh and look for features on it.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or unreadable geometry, or when the
    /// configured thresholds are invalid.
    pub fn analyze_mesh(&self, name: &str, mesh: IndexedMesh) -> DiagnoseResult<AnalyzedMesh> {
        let record = validate_mesh(&mesh)?;
        let part = PartMesh::new(mesh);
        let mut report = MeshReport::new(record);

        if let FeatureFindings::Clusters(clusters) = FeatureLocator::Unsupervised(self.ramp).locate(&part)? {
            report.ramp_clusters = clusters;
        }

        if let Some(kind) = feature_kind(PartRole::from_name(name)) {
            let locator = FeatureLocator::TargetedRegion {
                kind,
                params: self.region,
            };
            if let FeatureFindings::Regions {
                analysis,
                entry_exit,
            } = locator.locate(&part)?
            {
                report.region_analysis = Some(analysis);
                report.entry_exit = Some(entry_exit);
            }
        }

        debug!(
            mesh = name,
            ramps = report.ramp_clusters.len(),
            issues = report.issues().len(),
            "Mesh analyzed"
        );
        Ok(AnalyzedMesh {
            report,
            bounds: *part.bounds(),
        })
    }

    /// Load and analyze one STL file.
    ///
    /// # Errors
    ///
    /// See [`analyze_mesh`](Self::analyze_mesh); loading failures are
    /// returned as well.
    pub fn analyze_file(&self, path: &Path) -> DiagnoseResult<AnalyzedMesh> {
        let mesh = load_mesh(path)?;
        self.analyze_mesh(&part_name(path), mesh)
    }

    /// Diagnose every mesh of a configuration.
    ///
    /// Meshes are analyzed in parallel; results keep input order. A mesh
    /// that fails is recorded as `{ error }` and left out of the cross-mesh
    /// checks. Of several files sharing a part name only the first is
    /// analyzed.
    #[must_use]
    pub fn run(&self, config: &AnalysisConfig) -> DiagnosticReport {
        info!(meshes = config.stl_files.len(), "Analyzing meshes");
        let diagnoser = self.with_region_params(
            self.region
                .with_wall_thickness(config.box_params.wall_thickness),
        );

        let mut seen = HashSet::new();
        let inputs: Vec<(String, &Path)> = config
            .stl_files
            .iter()
            .map(|path| (part_name(path), path.as_path()))
            .filter(|(name, path)| {
                let first = seen.insert(name.clone());
                if !first {
                    warn!(mesh = %name, path = %path.display(), "Duplicate part name, file skipped");
                }
                first
            })
            .collect();

        let outcomes: Vec<(String, DiagnoseResult<AnalyzedMesh>)> = inputs
            .into_par_iter()
            .map(|(name, path)| {
                let outcome = diagnoser.analyze_file(path);
                (name, outcome)
            })
            .collect();

        let mut assembly = Assembly::new();
        let mut combined = CombinedAnalysis::default();
        let mut entries = Vec::with_capacity(outcomes.len());

        for (name, outcome) in outcomes {
            match outcome {
                Ok(analyzed) => {
                    let stats = &analyzed.report.stats;
                    combined.total_vertices += stats.vertices;
                    combined.total_faces += stats.faces;
                    combined
                        .issues
                        .extend(analyzed.report.issues().iter().map(|i| format!("{name}: {i}")));
                    if let Err(e) = assembly.add_part(Part::new(name.clone(), analyzed.bounds)) {
                        warn!(mesh = %name, error = %e, "Part left out of cross-mesh checks");
                    }
                    entries.push((name, MeshEntry::Analyzed(Box::new(analyzed.report))));
                }
                Err(e) => {
                    warn!(mesh = %name, error = %e, "Mesh analysis failed");
                    entries.push((name, MeshEntry::Failed { error: e.to_string() }));
                }
            }
        }

        let defects = assembly.check_intersections(&config.placements);
        combined.issues.extend(defects.iter().map(ToString::to_string));

        let spatial_layout = assembly.analyze_fit(&config.box_params, &config.placements);
        combined
            .issues
            .extend(spatial_layout.defects().iter().map(ToString::to_string));

        info!(
            meshes = entries.len(),
            vertices = combined.total_vertices,
            faces = combined.total_faces,
            issues = combined.issues.len(),
            "Diagnosis complete"
        );

        DiagnosticReport {
            meshes: entries.into_iter().collect::<MeshEntries>(),
            combined_analysis: combined,
            intersections: group_intersections(&defects),
            spatial_layout,
        }
    }
}

/// Diagnose a configuration with default thresholds.
#[must_use]
pub fn diagnose(config: &AnalysisConfig) -> DiagnosticReport {
    Diagnoser::new().run(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_assembly::{BoxParameters, Placement, PlacementMap};
    use mesh_types::{MeshTopology, Vector3, unit_cube};

    #[test]
    fn roles_pick_feature_kinds() {
        assert_eq!(feature_kind(PartRole::Container), Some(PartKind::Container));
        assert_eq!(feature_kind(PartRole::Lid), Some(PartKind::Lid));
        assert_eq!(feature_kind(PartRole::Content), None);
    }

    #[test]
    fn container_gets_region_checks() {
        let analyzed = Diagnoser::new().analyze_mesh("box", unit_cube()).unwrap();
        let regions = analyzed.report.region_analysis.unwrap();
        assert_eq!(regions.kind, PartKind::Container);
        assert!(analyzed.report.entry_exit.is_some());
        assert!(analyzed.report.ramp_clusters.is_empty());
    }

    #[test]
    fn empty_mesh_fails() {
        assert!(Diagnoser::new().analyze_mesh("box", IndexedMesh::new()).is_err());
    }

    fn write_cuboid(path: &Path, max: [f64; 3]) {
        let mut mesh = unit_cube();
        for v in &mut mesh.vertices {
            v.position.coords.component_mul_assign(&Vector3::from(max));
        }
        let mut text = String::from("solid part\n");
        for tri in mesh.triangles() {
            text.push_str("facet normal 0 0 0\nouter loop\n");
            for p in tri.vertices() {
                text.push_str(&format!("vertex {} {} {}\n", p.x, p.y, p.z));
            }
            text.push_str("endloop\nendfacet\n");
        }
        text.push_str("endsolid part\n");
        std::fs::write(path, text).unwrap();
    }

    #[test]
    fn run_over_explicit_files() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        std::fs::create_dir(root.join("old")).unwrap();
        write_cuboid(&root.join("box.stl"), [100.0, 150.0, 40.0]);
        write_cuboid(&root.join("tray_A_Cards.stl"), [20.0, 20.0, 10.0]);
        write_cuboid(&root.join("old/tray_A_Cards.stl"), [200.0, 20.0, 10.0]);
        std::fs::write(root.join("broken.stl"), "solid x\nendsolid x\n").unwrap();

        let mut placements = PlacementMap::new();
        placements.insert("tray_A_Cards", Placement::new(5.0, 5.0));
        let config = AnalysisConfig::from_files(
            root,
            vec![
                root.join("box.stl"),
                root.join("tray_A_Cards.stl"),
                root.join("old/tray_A_Cards.stl"),
                root.join("broken.stl"),
            ],
        )
        .with_placements(placements)
        .with_box_params(BoxParameters::default().with_floor_thickness(3.0));

        let report = diagnose(&config);
        let names: Vec<&str> = report.meshes.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["box", "tray_A_Cards", "broken"]);
        assert_eq!(report.meshes.failed().collect::<Vec<_>>(), vec!["broken"]);

        // The skipped 200 mm tray would have overflowed the box.
        assert_eq!(report.combined_analysis.total_vertices, 16);
        assert!(report.combined_analysis.issues.is_empty());
        assert!(report.intersections.is_empty());

        let fit = report.spatial_layout.fit.unwrap();
        assert!((fit.interior_height - 37.0).abs() < 1e-9);
        assert!((fit.height_clearance - 27.0).abs() < 1e-9);
        assert!(fit.fits_all());
    }

    #[test]
    fn invalid_thresholds_fail() {
        let diagnoser =
            Diagnoser::new().with_ramp_params(RampParams::default().with_cluster_distance(0.0));
        assert!(diagnoser.analyze_mesh("tray_A", unit_cube()).is_err());
    }
}
