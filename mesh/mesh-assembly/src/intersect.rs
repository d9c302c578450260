//! Pairwise intersection checks on placed part bounds.

use std::fmt;

use mesh_types::{Aabb, Axis};
use tracing::debug;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::part::{Part, PartRole};
use crate::placement::PlacementMap;

/// Boxes closer than this are treated as touching, not overlapping.
pub const OVERLAP_MARGIN: f64 = 0.5;

/// Which face of the container a content part crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Side {
    /// Below the container's minimum.
    Min,
    /// Beyond the container's maximum.
    Max,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Min => "min",
            Self::Max => "max",
        })
    }
}

/// A geometric conflict between two placed parts.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum IntersectionDefect {
    /// A content part crosses a container face.
    OutsideContainer {
        /// Content part name.
        content: String,
        /// Container part name.
        container: String,
        /// Axis of the crossing.
        #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_axis"))]
        axis: Axis,
        /// Face crossed.
        side: Side,
    },

    /// Two content parts overlap.
    Collision {
        /// First part, in input order.
        a: String,
        /// Second part.
        b: String,
    },
}

#[cfg(feature = "serde")]
fn serialize_axis<S: serde::Serializer>(axis: &Axis, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(axis.label())
}

impl IntersectionDefect {
    /// Names of the two parts involved.
    ///
    /// A container defect lists the content part first.
    #[must_use]
    pub fn parts(&self) -> (&str, &str) {
        match self {
            Self::OutsideContainer {
                content, container, ..
            } => (content, container),
            Self::Collision { a, b } => (a, b),
        }
    }
}

impl fmt::Display for IntersectionDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutsideContainer {
                content,
                container,
                axis,
                side,
            } => write!(f, "{content} extends outside {container} on {axis} {side}"),
            Self::Collision { a, b } => write!(f, "Collision: {a} and {b} overlap"),
        }
    }
}

/// Check every unordered pair of parts for conflicts.
///
/// Bounds are shifted by each part's placement first. Pairs whose boxes do
/// not overlap by more than [`OVERLAP_MARGIN`] are skipped. An overlapping
/// container and content pair (either order) reports each axis and side on
/// which the content sticks out by more than the margin; two overlapping
/// content parts report a collision. Other role pairs are never reported.
///
/// Defects are returned in pair enumeration order `(0,1), (0,2), …, (1,2), …`.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
/// use mesh_assembly::{Part, PlacementMap, check_intersections};
///
/// let a = Part::new("tray_A", Aabb::new(Point3::origin(), Point3::new(10.0, 10.0, 10.0)));
/// let b = Part::new("tray_B", Aabb::new(Point3::new(5.0, 5.0, 0.0), Point3::new(15.0, 15.0, 10.0)));
///
/// let defects = check_intersections(&[a, b], &PlacementMap::new());
/// assert_eq!(defects[0].to_string(), "Collision: tray_A and tray_B overlap");
/// ```
#[must_use]
pub fn check_intersections(parts: &[Part], placements: &PlacementMap) -> Vec<IntersectionDefect> {
    let placed: Vec<Aabb> = parts
        .iter()
        .map(|p| p.placed_bounds(placements.get(p.name())))
        .collect();

    let mut defects = Vec::new();
    for i in 0..parts.len() {
        for j in (i + 1)..parts.len() {
            if !placed[i].overlaps_with_margin(&placed[j], OVERLAP_MARGIN) {
                continue;
            }
            let (p1, p2) = (&parts[i], &parts[j]);
            match (p1.role(), p2.role()) {
                (PartRole::Content, PartRole::Container) => {
                    outside_container(p1, &placed[i], p2, &placed[j], &mut defects);
                }
                (PartRole::Container, PartRole::Content) => {
                    outside_container(p2, &placed[j], p1, &placed[i], &mut defects);
                }
                (PartRole::Content, PartRole::Content) => {
                    defects.push(IntersectionDefect::Collision {
                        a: p1.name().to_string(),
                        b: p2.name().to_string(),
                    });
                }
                _ => {}
            }
        }
    }

    debug!(parts = parts.len(), defects = defects.len(), "Intersection check complete");
    defects
}

fn outside_container(
    content: &Part,
    content_bounds: &Aabb,
    container: &Part,
    container_bounds: &Aabb,
    out: &mut Vec<IntersectionDefect>,
) {
    for axis in Axis::ALL {
        let sides = [
            (
                Side::Min,
                axis.of_point(&content_bounds.min)
                    < axis.of_point(&container_bounds.min) - OVERLAP_MARGIN,
            ),
            (
                Side::Max,
                axis.of_point(&content_bounds.max)
                    > axis.of_point(&container_bounds.max) + OVERLAP_MARGIN,
            ),
        ];
        for (side, outside) in sides {
            if outside {
                out.push(IntersectionDefect::OutsideContainer {
                    content: content.name().to_string(),
                    container: container.name().to_string(),
                    axis,
                    side,
                });
            }
        }
    }
}
