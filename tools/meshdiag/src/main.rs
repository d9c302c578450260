//! Mesh fit diagnostics from the command line.
//!
//! # Commands
//!
//! - `meshdiag analyze [DIR]` - Diagnose an analysis directory, write `report.json`
//! - `meshdiag probe --stl <FILE>` - Print bounds, centre and size of a part
//! - `meshdiag profile --stl <FILE>` - Print wall cross-sections by height
//! - `meshdiag camera --stl <FILE>` - Print a camera pose for a renderer
//!
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).

mod analyze;
mod inspect;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mesh_diagnose::CameraPreset;
use mesh_features::DEFAULT_PROFILE_LEVELS;
use mesh_types::Point3;

/// Mesh fit diagnostics
///
/// Finds structural, fit and slide-feature defects in generated parts.
#[derive(Parser)]
#[command(name = "meshdiag")]
#[command(about = "Geometric diagnostics for box, lid and tray meshes", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Diagnose every mesh of an analysis directory
    Analyze {
        /// Directory holding the STL files and their JSON context
        #[arg(name = "DIR", default_value = "mesh-analysis")]
        dir: PathBuf,

        /// Report path (default: DIR/report.json)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Also write ramp markers to this file
        #[arg(long)]
        markers: Option<PathBuf>,
    },

    /// Print mesh coordinate info
    Probe {
        /// Path to the STL file
        #[arg(long)]
        stl: PathBuf,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print wall cross-sections at evenly spaced heights
    Profile {
        /// Path to the STL file
        #[arg(long)]
        stl: PathBuf,

        /// Number of heights to slice at
        #[arg(long, default_value_t = DEFAULT_PROFILE_LEVELS)]
        levels: usize,
    },

    /// Compute a camera pose around a mesh
    Camera {
        /// Path to the STL file
        #[arg(long)]
        stl: PathBuf,

        /// Preset angle: front, back, left, right, top, bottom, iso, iso-back, iso-left, iso-right
        #[arg(long, conflicts_with = "pos")]
        angle: Option<CameraPreset>,

        /// Custom camera position as 'X,Y,Z'
        #[arg(long, value_parser = parse_point)]
        pos: Option<Point3<f64>>,

        /// Point to look at as 'X,Y,Z' (default: mesh center)
        #[arg(long, requires = "pos", value_parser = parse_point)]
        look_at: Option<Point3<f64>>,

        /// Zoom multiplier
        #[arg(long, default_value_t = 1.0)]
        zoom: f64,
    },
}

/// Parse `"50,0,30"` into a point.
fn parse_point(s: &str) -> Result<Point3<f64>, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().map_err(|e| format!("'{c}': {e}")))
        .collect::<Result<Vec<f64>, String>>()?;
    match coords.as_slice() {
        &[x, y, z] => Ok(Point3::new(x, y, z)),
        _ => Err(format!("expected X,Y,Z, got {} values", coords.len())),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { dir, out, markers } => analyze::run(&dir, out, markers),
        Commands::Probe { stl, json } => inspect::probe(&stl, json),
        Commands::Profile { stl, levels } => inspect::profile(&stl, levels),
        Commands::Camera {
            stl,
            angle,
            pos,
            look_at,
            zoom,
        } => inspect::camera(&stl, angle, pos.map(|p| (p, look_at)), zoom),
    }
}
