//! Mesh file loading for the fit diagnostics workspace.
//!
//! Generated parts arrive as STL files, ASCII or binary. The loader welds
//! coincident corners into shared vertices and merges multi-solid ASCII
//! files into one mesh.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with no engine dependencies.
//!
//! # Example
//!
//! ```no_run
//! use mesh_io::load_mesh;
//!
//! // Format detected from the .stl extension
//! let mesh = load_mesh("tray_A.stl").unwrap();
//! println!("{} faces", mesh.faces.len());
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{load_stl, parse_stl};

use std::path::Path;

use mesh_types::IndexedMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshFormat {
    /// STL (Stereolithography), binary or ASCII.
    Stl,
}

impl MeshFormat {
    /// Detect format from file extension (case-insensitive).
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Self> {
        let ext = path.as_ref().extension()?.to_str()?;
        ext.eq_ignore_ascii_case("stl").then_some(Self::Stl)
    }

    /// Canonical file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Stl => "stl",
        }
    }
}

/// Load a mesh from a file, detecting format from extension.
///
/// # Errors
///
/// Returns an error if the extension is not recognized, the file cannot be
/// read, or its content is invalid or empty.
pub fn load_mesh<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let format = MeshFormat::from_path(path).ok_or_else(|| IoError::UnknownFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })?;

    match format {
        MeshFormat::Stl => load_stl(path),
    }
}
