//! Structural integrity checks for a single mesh.

use mesh_types::{IndexedMesh, MeshTopology};
use tracing::{debug, info, warn};

use crate::adjacency::EdgeAdjacency;
use crate::error::{ValidateError, ValidateResult};
use crate::stats::MeshStats;

/// Faces with area below this are reported as degenerate.
pub const DEGENERATE_AREA_EPSILON: f64 = 1e-10;

/// Advisory findings. Box, lid and tray parts are open shells by
/// construction, so a missing watertight seal alone is not a defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityWarning {
    /// Some edge is not shared by exactly two faces.
    NotWatertight {
        /// Edges used by one face.
        boundary_edges: usize,
        /// Edges used by more than two faces.
        non_manifold_edges: usize,
    },
    /// Some shared edge is walked the same way by both faces.
    InconsistentWinding {
        /// Number of such edges.
        edges: usize,
    },
}

impl IntegrityWarning {
    /// True for warnings expected on open parts.
    ///
    /// Advisory warnings stay on the mesh record but are left out of the
    /// combined issue list.
    #[must_use]
    pub const fn is_advisory(&self) -> bool {
        matches!(self, Self::NotWatertight { .. })
    }
}

impl std::fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotWatertight { .. } => {
                write!(f, "Mesh is not watertight - may have holes or gaps")
            }
            Self::InconsistentWinding { .. } => {
                write!(f, "Face winding is inconsistent - some faces may be inverted")
            }
        }
    }
}

/// Integrity defects that are surfaced as issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntegrityError {
    /// Faces whose area is below [`DEGENERATE_AREA_EPSILON`].
    DegenerateFaces {
        /// Number of degenerate faces.
        count: usize,
    },
}

impl std::fmt::Display for IntegrityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DegenerateFaces { count } => {
                write!(f, "Found {count} degenerate faces (zero area)")
            }
        }
    }
}

/// Outcome of validating one mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationRecord {
    /// Every edge is shared by exactly two faces.
    pub watertight: bool,
    /// Every two-face edge is walked in opposite directions.
    pub winding_consistent: bool,
    /// V - E + F over referenced vertices; `None` for non-manifold meshes.
    pub euler_number: Option<i64>,
    /// Defects.
    pub errors: Vec<IntegrityError>,
    /// Advisory findings.
    pub warnings: Vec<IntegrityWarning>,
    /// Counts and measurements.
    pub stats: MeshStats,
}

impl ValidationRecord {
    /// True when there are no errors and no warnings.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

impl std::fmt::Display for ValidationRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Mesh Validation:")?;
        writeln!(f, "  Vertices: {}", self.stats.vertices)?;
        writeln!(f, "  Faces: {}", self.stats.faces)?;
        writeln!(f, "  Watertight: {}", if self.watertight { "Yes" } else { "No" })?;
        writeln!(
            f,
            "  Winding: {}",
            if self.winding_consistent { "Consistent" } else { "Inconsistent" }
        )?;
        match self.euler_number {
            Some(chi) => writeln!(f, "  Euler number: {chi}")?,
            None => writeln!(f, "  Euler number: n/a (non-manifold)")?,
        }
        for e in &self.errors {
            writeln!(f, "  ERROR: {e}")?;
        }
        for w in &self.warnings {
            writeln!(f, "  WARNING: {w}")?;
        }
        Ok(())
    }
}

/// Options for mesh validation.
#[derive(Debug, Clone)]
pub struct ValidationOptions {
    /// Area threshold below which a face is considered degenerate.
    pub degenerate_area_threshold: f64,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            degenerate_area_threshold: DEGENERATE_AREA_EPSILON,
        }
    }
}

/// Validate a mesh with default options.
///
/// # Errors
///
/// Returns [`ValidateError`] if the mesh has no faces or a face references
/// a missing vertex.
///
/// # Example
///
/// ```
/// use mesh_types::unit_cube;
/// use mesh_validate::validate_mesh;
///
/// let record = validate_mesh(&unit_cube()).unwrap();
/// assert!(record.watertight);
/// assert_eq!(record.euler_number, Some(2));
/// ```
pub fn validate_mesh(mesh: &IndexedMesh) -> ValidateResult<ValidationRecord> {
    validate_mesh_with_options(mesh, &ValidationOptions::default())
}

/// Validate a mesh with custom options.
///
/// # Errors
///
/// See [`validate_mesh`].
pub fn validate_mesh_with_options(
    mesh: &IndexedMesh,
    options: &ValidationOptions,
) -> ValidateResult<ValidationRecord> {
    if mesh.faces.is_empty() {
        return Err(ValidateError::EmptyMesh);
    }
    if let Some((face, index)) = mesh.find_invalid_index() {
        return Err(ValidateError::InvalidIndex {
            face,
            index,
            vertex_count: mesh.vertices.len(),
        });
    }

    info!(
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Validating mesh"
    );

    let adjacency = EdgeAdjacency::build(&mesh.faces);
    let watertight = adjacency.is_watertight();
    let inconsistent_edges = adjacency.inconsistent_edge_count();
    let euler_number = adjacency.is_manifold().then(|| euler_characteristic(mesh, &adjacency));

    let mut warnings = Vec::new();
    if !watertight {
        let boundary_edges = adjacency.boundary_edge_count();
        let non_manifold_edges = adjacency.non_manifold_edge_count();
        warn!(boundary_edges, non_manifold_edges, "Mesh is not watertight");
        warnings.push(IntegrityWarning::NotWatertight {
            boundary_edges,
            non_manifold_edges,
        });
    }
    if inconsistent_edges > 0 {
        warn!(edges = inconsistent_edges, "Mesh has inconsistent winding");
        warnings.push(IntegrityWarning::InconsistentWinding {
            edges: inconsistent_edges,
        });
    }

    let mut errors = Vec::new();
    let degenerate = count_degenerate_faces(mesh, options.degenerate_area_threshold);
    if degenerate > 0 {
        warn!(count = degenerate, "Mesh has degenerate faces");
        errors.push(IntegrityError::DegenerateFaces { count: degenerate });
    }

    let record = ValidationRecord {
        watertight,
        winding_consistent: inconsistent_edges == 0,
        euler_number,
        errors,
        warnings,
        stats: MeshStats::measure(mesh, watertight),
    };
    debug!("{}", record);
    Ok(record)
}

#[allow(clippy::cast_possible_wrap)]
// Counts are bounded by u32 face indices
fn euler_characteristic(mesh: &IndexedMesh, adjacency: &EdgeAdjacency) -> i64 {
    let mut referenced = vec![false; mesh.vertices.len()];
    for &v in mesh.faces.iter().flatten() {
        referenced[v as usize] = true;
    }
    let v = referenced.iter().filter(|&&r| r).count() as i64;
    let e = adjacency.edge_count() as i64;
    let f = mesh.faces.len() as i64;
    v - e + f
}

fn count_degenerate_faces(mesh: &IndexedMesh, threshold: f64) -> usize {
    mesh.triangles().filter(|tri| tri.area() < threshold).count()
}
