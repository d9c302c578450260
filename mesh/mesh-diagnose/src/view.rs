//! Inputs for an external renderer: probe data, camera poses and markers.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use mesh_types::{Aabb, PartMesh, Point3, Vector3};
use serde::Serialize;

use crate::error::{DiagnoseError, DiagnoseResult};
use crate::report::DiagnosticReport;

/// Camera distance as a multiple of the largest extent.
pub const CAMERA_DISTANCE_FACTOR: f64 = 2.5;

/// Side-view elevation as a multiple of the largest extent.
pub const SIDE_ELEVATION_FACTOR: f64 = 0.3;

/// Bounds, centre and size of a part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshProbe {
    /// Vertex bounds.
    pub bounds: Aabb,
    /// Area-weighted centroid of the surface.
    pub center: Point3<f64>,
    /// Extents along X, Y and Z.
    pub size: Vector3<f64>,
}

impl MeshProbe {
    /// Probe a part. A part without area is centred on its bounds.
    #[must_use]
    pub fn of(part: &PartMesh) -> Self {
        let bounds = *part.bounds();
        let total = part.faces().total_area();
        let center = if total > 0.0 {
            let weighted = part
                .faces()
                .iter()
                .fold(Vector3::zeros(), |acc, f| acc + f.center.coords * f.area);
            Point3::from(weighted / total)
        } else {
            bounds.center()
        };
        Self {
            bounds,
            center,
            size: bounds.size(),
        }
    }

    /// Largest extent.
    #[must_use]
    pub fn max_extent(&self) -> f64 {
        self.size.max()
    }
}

impl fmt::Display for MeshProbe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (min, max) = (self.bounds.min, self.bounds.max);
        writeln!(f, "Bounds X: [{:.2}, {:.2}]", min.x, max.x)?;
        writeln!(f, "Bounds Y: [{:.2}, {:.2}]", min.y, max.y)?;
        writeln!(f, "Bounds Z: [{:.2}, {:.2}]", min.z, max.z)?;
        writeln!(
            f,
            "Center: ({:.2}, {:.2}, {:.2})",
            self.center.x, self.center.y, self.center.z
        )?;
        write!(
            f,
            "Size: {:.2} x {:.2} x {:.2}",
            self.size.x, self.size.y, self.size.z
        )
    }
}

/// Named viewpoints around a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CameraPreset {
    /// Looking along +Y.
    Front,
    /// Looking along -Y.
    Back,
    /// Looking along +X.
    Left,
    /// Looking along -X.
    Right,
    /// Looking down.
    Top,
    /// Looking up.
    Bottom,
    /// Front-right, from above.
    #[default]
    Iso,
    /// Back-left, from above.
    IsoBack,
    /// Front-left, from above.
    IsoLeft,
    /// Back-right, from above.
    IsoRight,
}

impl CameraPreset {
    /// Every preset.
    pub const ALL: [Self; 10] = [
        Self::Front,
        Self::Back,
        Self::Left,
        Self::Right,
        Self::Top,
        Self::Bottom,
        Self::Iso,
        Self::IsoBack,
        Self::IsoLeft,
        Self::IsoRight,
    ];

    /// Preset name as accepted by [`FromStr`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Front => "front",
            Self::Back => "back",
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Iso => "iso",
            Self::IsoBack => "iso-back",
            Self::IsoLeft => "iso-left",
            Self::IsoRight => "iso-right",
        }
    }

    /// Camera offset from the target for a part of the given largest extent.
    #[must_use]
    pub fn offset(self, size: f64) -> Vector3<f64> {
        let d = size * CAMERA_DISTANCE_FACTOR;
        let lift = size * SIDE_ELEVATION_FACTOR;
        match self {
            Self::Front => Vector3::new(0.0, -d, lift),
            Self::Back => Vector3::new(0.0, d, lift),
            Self::Left => Vector3::new(-d, 0.0, lift),
            Self::Right => Vector3::new(d, 0.0, lift),
            Self::Top => Vector3::new(0.0, 0.0, d),
            Self::Bottom => Vector3::new(0.0, 0.0, -d),
            Self::Iso => Vector3::new(d * 0.7, -d * 0.7, d * 0.5),
            Self::IsoBack => Vector3::new(-d * 0.7, d * 0.7, d * 0.5),
            Self::IsoLeft => Vector3::new(-d * 0.7, -d * 0.7, d * 0.5),
            Self::IsoRight => Vector3::new(d * 0.7, d * 0.7, d * 0.5),
        }
    }
}

impl fmt::Display for CameraPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CameraPreset {
    type Err = DiagnoseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| DiagnoseError::UnknownPreset {
                name: s.to_string(),
                available: Self::ALL.map(Self::name).join(", "),
            })
    }
}

/// Camera position and target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CameraPose {
    /// Where the camera sits.
    pub position: Point3<f64>,
    /// Point it looks at.
    pub look_at: Point3<f64>,
}

impl CameraPose {
    /// Preset pose around a probed part, looking at its centre.
    #[must_use]
    pub fn preset(preset: CameraPreset, probe: &MeshProbe) -> Self {
        Self {
            position: probe.center + preset.offset(probe.max_extent()),
            look_at: probe.center,
        }
    }

    /// Explicit pose.
    #[must_use]
    pub const fn custom(position: Point3<f64>, look_at: Point3<f64>) -> Self {
        Self { position, look_at }
    }

    /// Move the camera toward its target by `zoom`; 2 halves the distance.
    ///
    /// # Errors
    ///
    /// Returns [`DiagnoseError::InvalidZoom`] unless `zoom` is finite and
    /// positive.
    pub fn zoomed(self, zoom: f64) -> DiagnoseResult<Self> {
        if !(zoom.is_finite() && zoom > 0.0) {
            return Err(DiagnoseError::InvalidZoom(zoom));
        }
        Ok(Self {
            position: self.look_at + (self.position - self.look_at) / zoom,
            look_at: self.look_at,
        })
    }

    /// Distance from camera to target.
    #[must_use]
    pub fn distance(&self) -> f64 {
        (self.position - self.look_at).norm()
    }
}

/// Marker colours understood by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerColor {
    /// Red.
    Red,
    /// Green.
    Green,
    /// Blue.
    Blue,
    /// Yellow.
    Yellow,
    /// Cyan.
    Cyan,
    /// Magenta.
    Magenta,
    /// Orange.
    Orange,
    /// White.
    White,
}

/// A reference sphere drawn over the part.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Marker {
    /// Centre of the sphere.
    pub pos: [f64; 3],
    /// Colour.
    pub color: MarkerColor,
}

/// Markers by name, the `markers.json` layout.
pub type MarkerSet = BTreeMap<String, Marker>;

/// Colour of ramp markers.
pub const RAMP_MARKER_COLOR: MarkerColor = MarkerColor::Orange;

/// One marker per ramp cluster, at its centroid, named
/// `<mesh>_ramp_<id>`.
#[must_use]
pub fn ramp_markers(report: &DiagnosticReport) -> MarkerSet {
    report
        .meshes
        .iter()
        .filter_map(|(name, entry)| entry.report().map(|r| (name, r)))
        .flat_map(|(name, mesh)| {
            mesh.ramp_clusters.iter().map(move |c| {
                (
                    format!("{name}_ramp_{}", c.id),
                    Marker {
                        pos: c.centroid.coords.into(),
                        color: RAMP_MARKER_COLOR,
                    },
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mesh_types::unit_cube;

    fn cube_probe() -> MeshProbe {
        MeshProbe::of(&PartMesh::new(unit_cube()))
    }

    #[test]
    fn probe_of_cube() {
        let probe = cube_probe();
        assert_relative_eq!(probe.center, Point3::new(0.5, 0.5, 0.5), epsilon = 1e-12);
        assert_relative_eq!(probe.size, Vector3::new(1.0, 1.0, 1.0), epsilon = 1e-12);
        assert!(probe.to_string().contains("Size: 1.00 x 1.00 x 1.00"));
    }

    #[test]
    fn preset_distances() {
        let probe = cube_probe();
        let top = CameraPose::preset(CameraPreset::Top, &probe);
        assert_relative_eq!(top.position, Point3::new(0.5, 0.5, 3.0), epsilon = 1e-12);

        let front = CameraPose::preset(CameraPreset::Front, &probe);
        assert_relative_eq!(front.position, Point3::new(0.5, -2.0, 0.8), epsilon = 1e-12);

        let iso = CameraPose::preset(CameraPreset::Iso, &probe);
        assert_relative_eq!(iso.position, Point3::new(2.25, -1.25, 1.75), epsilon = 1e-12);
    }

    #[test]
    fn zoom_divides_the_offset() {
        let pose = CameraPose::custom(Point3::new(10.0, 0.0, 0.0), Point3::origin());
        let zoomed = pose.zoomed(2.0).unwrap();
        assert_relative_eq!(zoomed.distance(), 5.0, epsilon = 1e-12);
        assert!(pose.zoomed(0.0).is_err());
        assert!(pose.zoomed(f64::NAN).is_err());
    }

    #[test]
    fn preset_names_round_trip() {
        for preset in CameraPreset::ALL {
            assert_eq!(preset.name().parse::<CameraPreset>().unwrap(), preset);
        }
        let err = "sideways".parse::<CameraPreset>().unwrap_err();
        assert!(err.to_string().contains("iso-right"));
    }
}
