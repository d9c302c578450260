//! Unsupervised ramp detection.
//!
//! Ramps are small slanted patches: faces whose normal is not close to any
//! single axis. The detector keeps such "diagonal" faces, groups their
//! centres by distance and keeps the groups whose size and area look like a
//! printed ramp rather than noise or a large chamfer.

use std::fmt;

use mesh_region::Sign;
use mesh_types::{Aabb, Axis, FaceRecord, MeshTopology, PartMesh, Point3, Vector3};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::cluster::single_linkage;
use crate::error::FeatureResult;
use crate::params::RampParams;

/// Horizontal direction a ramp faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Protrusion {
    /// `X` or `Y`.
    pub axis: Axis,
    /// Direction along the axis.
    pub sign: Sign,
}

impl Protrusion {
    /// Dominant horizontal direction of a normal.
    ///
    /// X wins ties; the vertical component is never considered.
    #[must_use]
    pub fn of_normal(normal: &Vector3<f64>) -> Self {
        let axis = if normal.x.abs() >= normal.y.abs() {
            Axis::X
        } else {
            Axis::Y
        };
        Self {
            axis,
            sign: Sign::of(axis.of_vector(normal)),
        }
    }
}

impl fmt::Display for Protrusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.sign.symbol(), self.axis)
    }
}

#[cfg(feature = "serde")]
impl Serialize for Protrusion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Protrusion", 2)?;
        s.serialize_field("axis", self.axis.label())?;
        s.serialize_field("sign", self.sign.symbol())?;
        s.end()
    }
}

/// A group of diagonal faces that looks like a ramp.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct RampCluster {
    /// Cluster id, assigned before filtering in order of first member face.
    pub id: usize,
    /// Number of member faces.
    pub face_count: usize,
    /// Sum of member face areas.
    pub total_area: f64,
    /// Bounds of the member triangles.
    pub bounds: Aabb,
    /// Mean of the member face centres.
    pub centroid: Point3<f64>,
    /// Mean member normal, re-normalized.
    pub avg_normal: Vector3<f64>,
    /// Dominant horizontal facing.
    pub protrusion: Protrusion,
    /// Where the cluster sits in the part, e.g. `["left", "45% deep", "top"]`.
    pub position_tags: Vec<String>,
    /// Member face indices in face order.
    pub faces: Vec<u32>,
}

impl RampCluster {
    fn build(id: usize, members: &[&FaceRecord], part: &PartMesh) -> Self {
        let mesh = part.mesh();
        let mut bounds = Aabb::empty();
        let mut centre_sum = Vector3::zeros();
        let mut normal_sum = Vector3::zeros();
        let mut total_area = 0.0;

        for face in members {
            if let Some(tri) = mesh.triangle(face.index as usize) {
                for v in &tri.vertices() {
                    bounds.expand_to_include(v);
                }
            }
            centre_sum += face.center.coords;
            normal_sum += face.normal;
            total_area += face.area;
        }

        #[allow(clippy::cast_precision_loss)]
        let n = members.len() as f64;
        let centroid = Point3::from(centre_sum / n);
        let avg_normal = (normal_sum / n).try_normalize(0.0).unwrap_or_else(Vector3::zeros);

        Self {
            id,
            face_count: members.len(),
            total_area,
            bounds,
            centroid,
            avg_normal,
            protrusion: Protrusion::of_normal(&avg_normal),
            position_tags: position_tags(part.bounds(), &centroid),
            faces: members.iter().map(|f| f.index).collect(),
        }
    }
}

/// Qualitative position of a point inside the part bounds.
///
/// Horizontal axes always get a tag: near an end ("left"/"right",
/// "front"/"back") or a percentage otherwise. The vertical axis is tagged
/// only near the bottom or top.
#[must_use]
pub fn position_tags(bounds: &Aabb, point: &Point3<f64>) -> Vec<String> {
    let rel = bounds.relative_position(point);
    let mut tags = Vec::with_capacity(3);

    tags.push(horizontal_tag(rel.x, "left", "right", "across"));
    tags.push(horizontal_tag(rel.y, "front", "back", "deep"));
    if rel.z < 0.3 {
        tags.push("bottom".to_string());
    } else if rel.z > 0.7 {
        tags.push("top".to_string());
    }
    tags
}

fn horizontal_tag(rel: f64, low: &str, high: &str, along: &str) -> String {
    if rel < 0.2 {
        low.to_string()
    } else if rel > 0.8 {
        high.to_string()
    } else {
        format!("{:.0}% {along}", rel * 100.0)
    }
}

fn is_diagonal(normal: &Vector3<f64>, params: &RampParams) -> bool {
    let abs = normal.abs();
    let strong = abs.iter().filter(|&&c| c > params.diagonal_min_component).count();
    strong >= 2 && abs.max() < params.diagonal_max_component
}

/// Find ramp-like clusters of diagonal faces anywhere on a part.
///
/// Returns clusters in ascending id order. A part without enough diagonal
/// faces yields an empty list.
///
/// # Errors
///
/// Returns [`crate::FeatureError::InvalidParameter`] if `params` fail validation.
///
/// # Example
///
/// ```
/// use mesh_types::{unit_cube, PartMesh};
/// use mesh_features::{RampParams, detect_ramps};
///
/// // An axis-aligned cube has no diagonal faces.
/// let part = PartMesh::new(unit_cube());
/// assert!(detect_ramps(&part, &RampParams::default()).unwrap().is_empty());
/// ```
pub fn detect_ramps(part: &PartMesh, params: &RampParams) -> FeatureResult<Vec<RampCluster>> {
    params.validate()?;

    let diagonal: Vec<&FaceRecord> = part
        .faces()
        .iter()
        .filter(|f| is_diagonal(&f.normal, params))
        .collect();
    debug!(diagonal = diagonal.len(), faces = part.faces().len(), "Diagonal faces");

    if diagonal.len() < 2 {
        return Ok(Vec::new());
    }

    let centres: Vec<Point3<f64>> = diagonal.iter().map(|f| f.center).collect();
    let groups = single_linkage(&centres, params.cluster_distance);

    let clusters: Vec<RampCluster> = groups
        .iter()
        .enumerate()
        .filter_map(|(id, group)| {
            if group.len() < params.min_cluster_faces {
                return None;
            }
            let members: Vec<&FaceRecord> = group.iter().map(|&i| diagonal[i]).collect();
            let area: f64 = members.iter().map(|f| f.area).sum();
            if area < params.min_area || area > params.max_area {
                return None;
            }
            Some(RampCluster::build(id, &members, part))
        })
        .collect();

    info!(
        groups = groups.len(),
        ramps = clusters.len(),
        "Ramp detection complete"
    );
    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{floor, soup};

    fn slanted(origin: [f64; 3], leg: f64) -> [[f64; 3]; 3] {
        crate::testing::slanted(origin, leg, 1.0)
    }

    #[test]
    fn no_diagonal_faces_no_clusters() {
        let part = PartMesh::new(mesh_types::unit_cube());
        assert!(detect_ramps(&part, &RampParams::default()).unwrap().is_empty());
    }

    #[test]
    fn two_faces_are_too_few() {
        // Two diagonal faces 1 apart, about 5 area each.
        let a = slanted([10.0, 10.0, 0.0], 2.66);
        let b = slanted([10.0, 11.0, 0.0], 2.66);
        let part = soup(&[floor(100.0, 100.0), a, b]);
        assert!(detect_ramps(&part, &RampParams::default()).unwrap().is_empty());
    }

    #[test]
    fn tiny_area_is_discarded() {
        let faces: Vec<_> = (0..3)
            .map(|i| slanted([10.0, 10.0 + f64::from(i) * 0.5, 0.0], 0.4))
            .collect();
        let part = soup(&faces);
        assert!(detect_ramps(&part, &RampParams::default()).unwrap().is_empty());
    }

    /// Three touching-distance diagonal faces with `total` combined area.
    fn three_faces_with_area(total: f64) -> PartMesh {
        // A slanted face with legs `l` has area l²·√2/2.
        let leg = (total / 3.0 * std::f64::consts::SQRT_2).sqrt();
        let faces: Vec<_> = (0..3)
            .map(|i| slanted([10.0, 10.0 + f64::from(i) * 0.5, 0.0], leg))
            .collect();
        soup(&faces)
    }

    #[test]
    fn area_floor_boundary() {
        let params = RampParams::default();

        let half = three_faces_with_area(0.5);
        let total: f64 = half.faces().iter().map(|f| f.area).sum();
        assert!((total - 0.5).abs() < 1e-9);
        assert!(detect_ramps(&half, &params).unwrap().is_empty());

        let just_above = three_faces_with_area(1.05);
        let clusters = detect_ramps(&just_above, &params).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].face_count, 3);
        assert!((clusters[0].total_area - 1.05).abs() < 1e-9);
    }

    #[test]
    fn oversized_area_is_discarded() {
        let faces: Vec<_> = (0..3)
            .map(|i| slanted([10.0, 10.0 + f64::from(i), 0.0], 8.0))
            .collect();
        let part = soup(&faces);
        // Each face has area 8²·√2/2 ≈ 45, so the cluster exceeds 50.
        assert!(detect_ramps(&part, &RampParams::default()).unwrap().is_empty());
    }

    #[test]
    fn ramp_cluster_measured() {
        let mut triangles = vec![floor(100.0, 100.0)];
        triangles.extend((0..4).map(|i| slanted([95.0, 40.0 + f64::from(i), 0.0], 2.0)));
        let part = soup(&triangles);

        let clusters = detect_ramps(&part, &RampParams::default()).unwrap();
        assert_eq!(clusters.len(), 1);

        let ramp = &clusters[0];
        assert_eq!(ramp.id, 0);
        assert_eq!(ramp.face_count, 4);
        assert_eq!(ramp.faces, vec![1, 2, 3, 4]);
        assert!((ramp.total_area - 4.0 * 2.0 * 2.0 * std::f64::consts::SQRT_2 / 2.0).abs() < 1e-9);
        assert!((ramp.avg_normal.norm() - 1.0).abs() < 1e-9);
        assert_eq!(ramp.protrusion.axis, Axis::X);
        assert_eq!(ramp.protrusion.sign, Sign::Positive);
        assert_eq!(ramp.protrusion.to_string(), "+X");
        assert_eq!(ramp.position_tags[0], "right");
        assert_eq!(ramp.position_tags[1], "42% deep");
        assert!((ramp.bounds.min.x - 93.0).abs() < 1e-9);
        assert!((ramp.bounds.max.y - 45.0).abs() < 1e-9);
    }

    #[test]
    fn ids_count_discarded_groups() {
        let mut triangles = vec![floor(100.0, 100.0)];
        // Group 0: two faces, dropped for size.
        triangles.extend((0..2).map(|i| slanted([20.0, 20.0 + f64::from(i), 0.0], 2.0)));
        // Group 1: a real ramp.
        triangles.extend((0..3).map(|i| slanted([70.0, 70.0 + f64::from(i), 0.0], 2.0)));
        let part = soup(&triangles);

        let clusters = detect_ramps(&part, &RampParams::default()).unwrap();
        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].id, 1);
    }

    #[test]
    fn tags_near_edges_and_middle() {
        let bounds = Aabb::new(Point3::origin(), Point3::new(100.0, 100.0, 10.0));
        assert_eq!(
            position_tags(&bounds, &Point3::new(5.0, 95.0, 9.0)),
            vec!["left", "back", "top"]
        );
        assert_eq!(
            position_tags(&bounds, &Point3::new(50.0, 25.0, 5.0)),
            vec!["50% across", "25% deep"]
        );
    }

    #[test]
    fn protrusion_prefers_x_on_ties() {
        let p = Protrusion::of_normal(&Vector3::new(-0.5, 0.5, 0.7));
        assert_eq!(p.axis, Axis::X);
        assert_eq!(p.sign, Sign::Negative);
    }

    #[test]
    fn invalid_params_rejected() {
        let part = PartMesh::new(mesh_types::unit_cube());
        let params = RampParams::default().with_cluster_distance(-1.0);
        assert!(detect_ramps(&part, &params).is_err());
    }
}
