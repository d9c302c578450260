//! Single-part commands: `probe`, `profile` and `camera`.

use std::path::Path;

use anyhow::{Context, Result};
use mesh_diagnose::{CameraPose, CameraPreset, MeshProbe};
use mesh_features::wall_profile;
use mesh_io::load_mesh;
use mesh_types::{IndexedMesh, PartMesh, Point3};
use owo_colors::OwoColorize;

fn load(stl: &Path) -> Result<IndexedMesh> {
    load_mesh(stl).with_context(|| format!("Failed to load {}", stl.display()))
}

fn file_name(stl: &Path) -> String {
    stl.file_name()
        .map_or_else(|| stl.display().to_string(), |n| n.to_string_lossy().into_owned())
}

pub fn probe(stl: &Path, json: bool) -> Result<()> {
    let probe = MeshProbe::of(&PartMesh::new(load(stl)?));
    if json {
        println!("{}", serde_json::to_string_pretty(&probe)?);
    } else {
        println!();
        println!("{}", format!("=== Mesh Info: {} ===", file_name(stl)).bold());
        println!("{probe}");
    }
    Ok(())
}

pub fn profile(stl: &Path, levels: usize) -> Result<()> {
    let mesh = load(stl)?;
    let profile = wall_profile(&mesh, levels)
        .with_context(|| format!("Failed to profile {}", stl.display()))?;

    println!();
    println!("{}", format!("=== Wall Profile: {} ===", file_name(stl)).bold());
    for level in &profile.levels {
        println!(
            "Z={:6.2}: {:4} verts, Y range [{:.1}, {:.1}] = {:.1}mm",
            level.z,
            level.vertex_count,
            level.y_min,
            level.y_max,
            level.y_range()
        );
        if !level.inner.is_empty() {
            println!("    inner Y: {:?}", level.inner);
        }
        for [from, to] in &level.gaps {
            println!("    gap {from:.1} -> {to:.1}");
        }
    }

    if profile.steps.is_empty() {
        println!("{}", "No wall steps found.".dimmed());
    } else {
        println!();
        for step in &profile.steps {
            println!(
                "{} at Z={:.2}: Y range {:.1} -> {:.1}",
                "Step".yellow().bold(),
                step.z,
                step.from,
                step.to
            );
        }
    }
    Ok(())
}

pub fn camera(
    stl: &Path,
    angle: Option<CameraPreset>,
    custom: Option<(Point3<f64>, Option<Point3<f64>>)>,
    zoom: f64,
) -> Result<()> {
    let probe = MeshProbe::of(&PartMesh::new(load(stl)?));
    let pose = match custom {
        Some((position, look_at)) => CameraPose::custom(position, look_at.unwrap_or(probe.center)),
        None => CameraPose::preset(angle.unwrap_or_default(), &probe),
    };
    let pose = pose.zoomed(zoom)?;

    let (p, t) = (pose.position, pose.look_at);
    println!("Camera position: ({:.1}, {:.1}, {:.1})", p.x, p.y, p.z);
    println!("Looking at: ({:.1}, {:.1}, {:.1})", t.x, t.y, t.z);
    Ok(())
}
