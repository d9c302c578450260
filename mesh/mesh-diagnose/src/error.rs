//! Error types for batch diagnostics.

use std::path::PathBuf;
use thiserror::Error;

use mesh_features::FeatureError;
use mesh_io::IoError;
use mesh_validate::ValidateError;

/// Errors that can occur while diagnosing an analysis directory.
///
/// Per-mesh failures ([`Load`](Self::Load), [`Validate`](Self::Validate),
/// [`Feature`](Self::Feature)) are recorded in the report and never abort
/// the batch.
#[derive(Debug, Error)]
pub enum DiagnoseError {
    /// Reading or writing a file failed.
    #[error("Failed to access {path}: {source}")]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// A JSON file could not be parsed or written.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// The offending file.
        path: PathBuf,
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// Neither a manifest entry nor the legacy STL exists.
    #[error("No STL files found in {dir}")]
    NoMeshes {
        /// Analysis directory that was searched.
        dir: PathBuf,
    },

    /// Camera preset name not recognized.
    #[error("Unknown angle '{name}'. Available: {available}")]
    UnknownPreset {
        /// Requested name.
        name: String,
        /// Comma-separated list of preset names.
        available: String,
    },

    /// Zoom must be a positive finite factor.
    #[error("Invalid zoom factor: {0} (must be > 0)")]
    InvalidZoom(f64),

    /// The STL could not be loaded.
    #[error(transparent)]
    Load(#[from] IoError),

    /// The mesh has no usable geometry.
    #[error(transparent)]
    Validate(#[from] ValidateError),

    /// A feature detector rejected its parameters.
    #[error(transparent)]
    Feature(#[from] FeatureError),
}

impl DiagnoseError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.into(),
            source,
        }
    }
}

/// Result type for diagnostics.
pub type DiagnoseResult<T> = std::result::Result<T, DiagnoseError>;
