//! End-to-end runs over temporary analysis directories.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use mesh_diagnose::config::{CONTEXT_FILE, MANIFEST_FILE, PROJECT_FILE};
use mesh_diagnose::{AnalysisConfig, MeshEntry, REPORT_FILE, diagnose, ramp_markers};

type Tri = [[f64; 3]; 3];

fn write_stl(path: &Path, triangles: &[Tri]) {
    let mut text = String::from("solid part\n");
    for tri in triangles {
        text.push_str("  facet normal 0 0 0\n    outer loop\n");
        for [x, y, z] in tri {
            writeln!(text, "      vertex {x} {y} {z}").unwrap();
        }
        text.push_str("    endloop\n  endfacet\n");
    }
    text.push_str("endsolid part\n");
    fs::write(path, text).unwrap();
}

/// Closed, outward-wound box.
fn cuboid(max: [f64; 3]) -> Vec<Tri> {
    let [x, y, z] = max;
    let v = [
        [0.0, 0.0, 0.0],
        [x, 0.0, 0.0],
        [x, y, 0.0],
        [0.0, y, 0.0],
        [0.0, 0.0, z],
        [x, 0.0, z],
        [x, y, z],
        [0.0, y, z],
    ];
    [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ]
    .iter()
    .map(|&[a, b, c]| [v[a], v[b], v[c]])
    .collect()
}

fn box_with_trays(dir: &Path) {
    write_stl(&dir.join("box.stl"), &cuboid([100.0, 150.0, 40.0]));
    write_stl(&dir.join("tray_A_Cards.stl"), &cuboid([90.0, 60.0, 30.0]));
    write_stl(&dir.join("tray_B_Big_Tokens.stl"), &cuboid([90.0, 70.0, 40.0]));
    fs::write(dir.join("broken.stl"), "solid broken\nendsolid broken\n").unwrap();
    fs::write(
        dir.join(MANIFEST_FILE),
        r#"["box.stl", "tray_A_Cards.stl", "broken.stl", "tray_B_Big_Tokens.stl", "missing.stl"]"#,
    )
    .unwrap();
    fs::write(
        dir.join(CONTEXT_FILE),
        r#"{"box_id": "main", "trays": [
            {"letter": "A", "name": "Cards", "placement": {"x": 5, "y": 5}},
            {"letter": "B", "name": "Big Tokens", "placement": {"x": 5, "y": 50}}
        ]}"#,
    )
    .unwrap();
    fs::write(
        dir.join(PROJECT_FILE),
        r#"{"boxes": [{"id": "main", "wallThickness": 3.0, "floorThickness": 2.0}]}"#,
    )
    .unwrap();
}

#[test]
fn full_directory_report() {
    let dir = tempfile::tempdir().unwrap();
    box_with_trays(dir.path());

    let config = AnalysisConfig::load(dir.path()).unwrap();
    assert_eq!(config.stl_files.len(), 4);
    let report = diagnose(&config);

    let names: Vec<&str> = report.meshes.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["box", "tray_A_Cards", "broken", "tray_B_Big_Tokens"]);
    assert_eq!(report.meshes.failed().collect::<Vec<_>>(), vec!["broken"]);
    match report.meshes.get("broken").unwrap() {
        MeshEntry::Failed { error } => assert!(error.contains("no geometry")),
        MeshEntry::Analyzed(_) => panic!("empty STL must fail"),
    }

    let container = report.meshes.get("box").unwrap().report().unwrap();
    assert!(container.validation.is_watertight);
    assert_eq!(container.validation.euler_number, Some(2));
    assert!(container.region_analysis.is_some());
    assert!(container.entry_exit.is_some());
    let tray = report.meshes.get("tray_A_Cards").unwrap().report().unwrap();
    assert!(tray.region_analysis.is_none());

    assert_eq!(report.combined_analysis.total_vertices, 24);
    assert_eq!(report.combined_analysis.total_faces, 36);
    assert_eq!(
        report.combined_analysis.issues,
        vec![
            "Collision: tray_A_Cards and tray_B_Big_Tokens overlap".to_string(),
            "Trays too tall: 40.0mm > interior 38.0mm".to_string(),
        ]
    );
    assert_eq!(report.intersections.len(), 1);

    let fit = report.spatial_layout.fit.as_ref().unwrap();
    assert!(fit.fits_width && fit.fits_depth && !fit.fits_height);
    assert!((fit.width_gap - 4.0).abs() < 1e-9);
    assert!((fit.depth_gap - 24.0).abs() < 1e-9);
    assert!(!report.is_clean());
}

#[test]
fn report_json_layout() {
    let dir = tempfile::tempdir().unwrap();
    box_with_trays(dir.path());
    let report = diagnose(&AnalysisConfig::load(dir.path()).unwrap());

    let path = dir.path().join(REPORT_FILE);
    report.write_json(&path).unwrap();
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();

    assert!(json["meshes"]["broken"]["error"].is_string());
    assert_eq!(json["meshes"]["box"]["validation"]["is_watertight"], true);
    assert_eq!(json["meshes"]["box"]["stats"]["faces"], 12);
    assert!(json["meshes"]["box"]["stats"]["volume_mm3"].as_f64().unwrap() > 0.0);
    assert!(json["meshes"]["tray_A_Cards"].get("region_analysis").is_none());
    assert_eq!(
        json["intersections"][0]["parts"],
        serde_json::json!(["tray_A_Cards", "tray_B_Big_Tokens"])
    );
    assert_eq!(json["spatial_layout"]["fit_check"]["fits_height"], false);
    assert_eq!(json["spatial_layout"]["trays"][1]["name"], "tray_B_Big_Tokens");
    assert_eq!(json["combined_analysis"]["issues"].as_array().unwrap().len(), 2);
}

#[test]
fn ramps_become_markers() {
    let dir = tempfile::tempdir().unwrap();
    let mut triangles: Vec<Tri> = vec![[[0.0, 0.0, 0.0], [100.0, 0.0, 0.0], [0.0, 100.0, 0.0]]];
    triangles.extend((0..4).map(|i| {
        let y = 40.0 + f64::from(i);
        [[95.0, y, 0.0], [95.0, y + 2.0, 0.0], [93.0, y, 2.0]]
    }));
    write_stl(&dir.path().join("lid.stl"), &triangles);
    fs::write(dir.path().join(MANIFEST_FILE), r#"["lid.stl"]"#).unwrap();

    let report = diagnose(&AnalysisConfig::load(dir.path()).unwrap());
    let lid = report.meshes.get("lid").unwrap().report().unwrap();
    assert_eq!(lid.ramp_clusters.len(), 1);
    // Open part: the watertight warning stays on the mesh only.
    assert!(!lid.warnings.is_empty());
    assert!(report.combined_analysis.issues.is_empty());
    assert!(report.spatial_layout.fit.is_none());

    // Open parts keep the volume key, as null.
    let json = serde_json::to_value(&report).unwrap();
    let stats = json["meshes"]["lid"]["stats"].as_object().unwrap();
    assert!(stats.get("volume_mm3").is_some_and(serde_json::Value::is_null));

    let markers = ramp_markers(&report);
    assert_eq!(markers.len(), 1);
    let marker = &markers["lid_ramp_0"];
    assert!((marker.pos[0] - lid.ramp_clusters[0].centroid.x).abs() < 1e-12);
}
