//! Analysis-directory inputs.
//!
//! A directory prepared for analysis holds the exported parts and up to
//! three JSON files describing them:
//!
//! | File | Content | When missing |
//! |---|---|---|
//! | `stl-manifest.json` | array of STL file names | a lone `current.stl` |
//! | `context.json` | `box_id` and `trays[{letter, name, placement}]` | no placements |
//! | `project.json` | `boxes[{id, wallThickness, floorThickness, tolerance}]` | default box parameters |
//!
//! Missing fields fall back to their defaults. A file that exists but is not
//! valid JSON is an error.

use std::fs;
use std::path::{Path, PathBuf};

use mesh_assembly::{BoxParameters, Placement, PlacementMap};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{DiagnoseError, DiagnoseResult};

/// Manifest listing the STL files to analyze.
pub const MANIFEST_FILE: &str = "stl-manifest.json";

/// Single-part file used when no manifest exists.
pub const LEGACY_STL_FILE: &str = "current.stl";

/// Tray placements and the selected box.
pub const CONTEXT_FILE: &str = "context.json";

/// Box parameters per box id.
pub const PROJECT_FILE: &str = "project.json";

/// Default report file name.
pub const REPORT_FILE: &str = "report.json";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Context {
    box_id: Option<Value>,
    trays: Vec<TrayEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TrayEntry {
    letter: String,
    name: String,
    placement: Placement,
}

impl TrayEntry {
    fn part_name(&self) -> String {
        tray_part_name(&self.letter, &self.name)
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Project {
    boxes: Vec<BoxEntry>,
}

#[derive(Debug, Deserialize)]
struct BoxEntry {
    #[serde(default)]
    id: Option<Value>,
    #[serde(flatten)]
    params: BoxParameters,
}

/// Name under which a tray's placement is stored, e.g. `tray_A_Card_Tray`.
#[must_use]
pub fn tray_part_name(letter: &str, name: &str) -> String {
    format!("tray_{letter}_{}", name.replace(' ', "_"))
}

/// Part name for an STL path: the file stem.
#[must_use]
pub fn part_name(path: &Path) -> String {
    path.file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned())
}

/// Box ids are strings or numbers; numbers compare by value.
fn same_id(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> DiagnoseResult<Option<T>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(DiagnoseError::io(path, e)),
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| DiagnoseError::json(path, e))
}

/// Everything needed to diagnose one directory.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Directory the inputs were read from.
    pub dir: PathBuf,
    /// STL files in manifest order.
    pub stl_files: Vec<PathBuf>,
    /// Tray placements by part name.
    pub placements: PlacementMap,
    /// Parameters of the selected box.
    pub box_params: BoxParameters,
}

impl AnalysisConfig {
    /// Configuration for an explicit list of files with default placements
    /// and box parameters.
    #[must_use]
    pub fn from_files(dir: impl Into<PathBuf>, stl_files: Vec<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            stl_files,
            placements: PlacementMap::new(),
            box_params: BoxParameters::default(),
        }
    }

    /// Set the placements.
    #[must_use]
    pub fn with_placements(mut self, placements: PlacementMap) -> Self {
        self.placements = placements;
        self
    }

    /// Set the box parameters.
    #[must_use]
    pub const fn with_box_params(mut self, params: BoxParameters) -> Self {
        self.box_params = params;
        self
    }

    /// Read an analysis directory.
    ///
    /// Manifest entries whose file does not exist are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnoseError::NoMeshes`] when no STL file remains,
    /// [`DiagnoseError::Json`] for a malformed JSON file and
    /// [`DiagnoseError::Io`] when a file exists but cannot be read.
    pub fn load(dir: impl AsRef<Path>) -> DiagnoseResult<Self> {
        let dir = dir.as_ref();
        let stl_files = discover_stl_files(dir)?;

        let context: Context = read_json(&dir.join(CONTEXT_FILE))?.unwrap_or_default();
        let placements: PlacementMap = context
            .trays
            .iter()
            .map(|t| (t.part_name(), t.placement))
            .collect();

        let project: Project = read_json(&dir.join(PROJECT_FILE))?.unwrap_or_default();
        let box_params = context
            .box_id
            .as_ref()
            .and_then(|id| {
                project
                    .boxes
                    .into_iter()
                    .find(|b| b.id.as_ref().is_some_and(|own| same_id(own, id)))
            })
            .map(|b| b.params)
            .unwrap_or_default();

        info!(
            dir = %dir.display(),
            meshes = stl_files.len(),
            placements = placements.len(),
            wall_thickness = box_params.wall_thickness,
            "Loaded analysis config"
        );

        Ok(Self {
            dir: dir.to_path_buf(),
            stl_files,
            placements,
            box_params,
        })
    }
}

fn discover_stl_files(dir: &Path) -> DiagnoseResult<Vec<PathBuf>> {
    let files = match read_json::<Vec<String>>(&dir.join(MANIFEST_FILE))? {
        Some(names) => {
            debug!(entries = names.len(), "Read STL manifest");
            names
                .iter()
                .map(|name| dir.join(name))
                .filter(|path| {
                    let exists = path.is_file();
                    if !exists {
                        warn!(path = %path.display(), "Manifest entry missing, skipped");
                    }
                    exists
                })
                .collect()
        }
        None => {
            let legacy = dir.join(LEGACY_STL_FILE);
            if legacy.is_file() { vec![legacy] } else { Vec::new() }
        }
    };

    if files.is_empty() {
        return Err(DiagnoseError::NoMeshes {
            dir: dir.to_path_buf(),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), "solid x\nendsolid x\n").unwrap();
    }

    #[test]
    fn tray_names_replace_spaces() {
        assert_eq!(tray_part_name("A", "Card Tray"), "tray_A_Card_Tray");
        assert_eq!(part_name(Path::new("out/box.stl")), "box");
    }

    #[test]
    fn manifest_order_and_missing_entries() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "lid.stl");
        touch(dir.path(), "box.stl");
        fs::write(
            dir.path().join(MANIFEST_FILE),
            r#"["box.stl", "gone.stl", "lid.stl"]"#,
        )
        .unwrap();

        let config = AnalysisConfig::load(dir.path()).unwrap();
        let names: Vec<String> = config.stl_files.iter().map(|p| part_name(p)).collect();
        assert_eq!(names, vec!["box", "lid"]);
        assert!(config.placements.is_empty());
        assert_eq!(config.box_params, BoxParameters::default());
    }

    #[test]
    fn legacy_single_file() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), LEGACY_STL_FILE);
        let config = AnalysisConfig::load(dir.path()).unwrap();
        assert_eq!(config.stl_files, vec![dir.path().join(LEGACY_STL_FILE)]);
    }

    #[test]
    fn empty_directory_has_no_meshes() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            AnalysisConfig::load(dir.path()),
            Err(DiagnoseError::NoMeshes { .. })
        ));
    }

    #[test]
    fn context_and_project_are_applied() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), LEGACY_STL_FILE);
        fs::write(
            dir.path().join(CONTEXT_FILE),
            r#"{
                "box_id": "b2",
                "trays": [
                    {"letter": "A", "name": "Card Tray", "placement": {"x": 1.5, "y": 40}},
                    {"letter": "B", "name": "Tokens"}
                ]
            }"#,
        )
        .unwrap();
        fs::write(
            dir.path().join(PROJECT_FILE),
            r#"{"boxes": [
                {"id": "b1", "wallThickness": 9.0},
                {"id": "b2", "wallThickness": 2.5, "tolerance": 0.3}
            ]}"#,
        )
        .unwrap();

        let config = AnalysisConfig::load(dir.path()).unwrap();
        assert_eq!(config.placements.len(), 2);
        let a = config.placements.get("tray_A_Card_Tray");
        assert!((a.x - 1.5).abs() < 1e-12 && (a.y - 40.0).abs() < 1e-12);
        assert_eq!(config.placements.get("tray_B_Tokens"), Placement::default());

        assert!((config.box_params.wall_thickness - 2.5).abs() < 1e-12);
        assert!((config.box_params.tolerance - 0.3).abs() < 1e-12);
        assert!((config.box_params.floor_thickness - 2.0).abs() < 1e-12);
    }

    #[test]
    fn unknown_box_id_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), LEGACY_STL_FILE);
        fs::write(dir.path().join(CONTEXT_FILE), r#"{"box_id": "nope"}"#).unwrap();
        fs::write(
            dir.path().join(PROJECT_FILE),
            r#"{"boxes": [{"id": "b1", "wallThickness": 9.0}]}"#,
        )
        .unwrap();
        let config = AnalysisConfig::load(dir.path()).unwrap();
        assert_eq!(config.box_params, BoxParameters::default());
    }

    #[test]
    fn numeric_box_id() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), LEGACY_STL_FILE);
        fs::write(dir.path().join(CONTEXT_FILE), r#"{"box_id": 7}"#).unwrap();
        fs::write(
            dir.path().join(PROJECT_FILE),
            r#"{"boxes": [
                {"id": "7", "wallThickness": 9.0},
                {"id": 7.0, "wallThickness": 4.0}
            ]}"#,
        )
        .unwrap();

        let config = AnalysisConfig::load(dir.path()).unwrap();
        assert!((config.box_params.wall_thickness - 4.0).abs() < 1e-12);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), LEGACY_STL_FILE);
        fs::write(dir.path().join(CONTEXT_FILE), "{not json").unwrap();
        assert!(matches!(
            AnalysisConfig::load(dir.path()),
            Err(DiagnoseError::Json { .. })
        ));
    }
}
