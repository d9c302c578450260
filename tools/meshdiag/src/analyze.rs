//! The `analyze` command.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use mesh_diagnose::{AnalysisConfig, DiagnosticReport, REPORT_FILE, diagnose, ramp_markers, write_json};
use owo_colors::OwoColorize;

pub fn run(dir: &Path, out: Option<PathBuf>, markers: Option<PathBuf>) -> Result<()> {
    let config = AnalysisConfig::load(dir)
        .with_context(|| format!("Failed to read analysis directory {}", dir.display()))?;

    println!();
    println!("{}", "Mesh Diagnostics".bold());
    println!("{}", "================".bold());
    println!("Analyzing {} mesh(es) in {}", config.stl_files.len(), dir.display());

    let report = diagnose(&config);

    let out = out.unwrap_or_else(|| dir.join(REPORT_FILE));
    report
        .write_json(&out)
        .with_context(|| format!("Failed to write report to {}", out.display()))?;

    if let Some(path) = markers {
        let set = ramp_markers(&report);
        write_json(&path, &set)
            .with_context(|| format!("Failed to write markers to {}", path.display()))?;
        println!("Wrote {} marker(s) to {}", set.len(), path.display());
    }

    print_summary(&report);
    println!("Report: {}", out.display());
    Ok(())
}

fn print_summary(report: &DiagnosticReport) {
    let combined = &report.combined_analysis;
    println!();
    println!("Total vertices: {}", combined.total_vertices);
    println!("Total faces: {}", combined.total_faces);

    for name in report.meshes.failed() {
        println!("{} {name} could not be analyzed", "✗".red().bold());
    }

    if combined.issues.is_empty() {
        println!("{}", "✓ No issues detected!".green().bold());
    } else {
        println!("{}", format!("⚠ {} issue(s):", combined.issues.len()).yellow());
        for issue in &combined.issues {
            println!("  - {issue}");
        }
    }

    if let Some(fit) = &report.spatial_layout.fit {
        println!(
            "Fit gaps: width {:.2}mm, depth {:.2}mm, height {:.2}mm",
            fit.width_gap, fit.depth_gap, fit.height_clearance
        );
    }
    println!();
}
