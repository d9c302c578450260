//! Spatial fit of contents inside a container.
//!
//! The container's interior is its exterior minus two side walls on each
//! horizontal axis and the floor vertically. Contents are laid out by their
//! placements: the widest and tallest item bound width and height, and the
//! farthest edge along Y bounds depth.

use std::fmt;

use mesh_types::{Aabb, Axis};
use tracing::{debug, info};

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::params::BoxParameters;
use crate::part::Part;
use crate::placement::{Placement, PlacementMap};

/// Shortfall tolerated before an axis is reported as not fitting.
pub const FIT_SLACK: f64 = 0.1;

/// Width, depth and height of a box in mm.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Dimensions {
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub depth: f64,
    /// Extent along Z.
    pub height: f64,
}

impl Dimensions {
    /// Create dimensions.
    #[must_use]
    pub const fn new(width: f64, depth: f64, height: f64) -> Self {
        Self {
            width,
            depth,
            height,
        }
    }

    /// Extents of a bounding box.
    #[must_use]
    pub fn of(bounds: &Aabb) -> Self {
        Self::new(
            bounds.extent(Axis::X),
            bounds.extent(Axis::Y),
            bounds.extent(Axis::Z),
        )
    }

    /// Interior left by walls and floor.
    #[must_use]
    pub fn interior(&self, params: &BoxParameters) -> Self {
        Self::new(
            self.width - 2.0 * params.wall_thickness,
            self.depth - 2.0 * params.wall_thickness,
            self.height - params.floor_thickness,
        )
    }
}

/// Placed X/Y ranges of a content item.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct PlacedRange {
    /// `[start, end]` along X.
    pub x: [f64; 2],
    /// `[start, end]` along Y.
    pub y: [f64; 2],
}

/// One content item in the layout.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ContentLayout {
    /// Part name.
    pub name: String,
    /// Part extents.
    pub dimensions: Dimensions,
    /// Placement applied.
    pub position: Placement,
    /// Ranges covered once placed.
    pub bounds: PlacedRange,
}

impl ContentLayout {
    fn new(part: &Part, position: Placement) -> Self {
        let dimensions = Dimensions::of(part.bounds());
        Self {
            name: part.name().to_string(),
            dimensions,
            position,
            bounds: PlacedRange {
                x: [position.x, position.x + dimensions.width],
                y: [position.y, position.y + dimensions.depth],
            },
        }
    }

    /// Far edge along Y.
    #[must_use]
    pub const fn far_edge(&self) -> f64 {
        self.bounds.y[1]
    }
}

/// Horizontal or vertical direction of a fit comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FitAxis {
    /// Along X.
    Width,
    /// Along Y.
    Depth,
    /// Along Z.
    Height,
}

impl FitAxis {
    const fn adjective(self) -> &'static str {
        match self {
            Self::Width => "wide",
            Self::Depth => "deep",
            Self::Height => "tall",
        }
    }
}

/// An axis on which the contents need more room than the interior has.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FitDefect {
    /// Failing axis.
    pub axis: FitAxis,
    /// Space the contents need.
    pub required: f64,
    /// Space the interior offers.
    pub available: f64,
}

impl fmt::Display for FitDefect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Trays too {}: {:.1}mm > interior {:.1}mm",
            self.axis.adjective(),
            self.required,
            self.available
        )
    }
}

/// Capacity against requirement on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FitCheck {
    /// Interior width.
    pub interior_width: f64,
    /// Interior depth.
    pub interior_depth: f64,
    /// Interior height.
    pub interior_height: f64,
    /// Widest content item.
    pub max_tray_width: f64,
    /// Farthest content edge along Y.
    pub total_tray_depth: f64,
    /// Tallest content item.
    pub max_tray_height: f64,
    /// Interior width minus required width, to 2 decimals.
    pub width_gap: f64,
    /// Interior depth minus required depth, to 2 decimals.
    pub depth_gap: f64,
    /// Interior height minus required height, to 2 decimals.
    pub height_clearance: f64,
    /// Width fits within [`FIT_SLACK`].
    pub fits_width: bool,
    /// Depth fits within [`FIT_SLACK`].
    pub fits_depth: bool,
    /// Height fits within [`FIT_SLACK`].
    pub fits_height: bool,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl FitCheck {
    /// Compare interior capacity with what the contents require.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_assembly::{Dimensions, FitCheck};
    ///
    /// let fit = FitCheck::evaluate(
    ///     Dimensions::new(100.0, 150.0, 40.0),
    ///     Dimensions::new(95.0, 140.0, 35.0),
    /// );
    /// assert!(fit.fits_all());
    /// assert_eq!(fit.depth_gap, 10.0);
    /// ```
    #[must_use]
    pub fn evaluate(interior: Dimensions, required: Dimensions) -> Self {
        Self {
            interior_width: interior.width,
            interior_depth: interior.depth,
            interior_height: interior.height,
            max_tray_width: required.width,
            total_tray_depth: required.depth,
            max_tray_height: required.height,
            width_gap: round2(interior.width - required.width),
            depth_gap: round2(interior.depth - required.depth),
            height_clearance: round2(interior.height - required.height),
            fits_width: interior.width >= required.width - FIT_SLACK,
            fits_depth: interior.depth >= required.depth - FIT_SLACK,
            fits_height: interior.height >= required.height - FIT_SLACK,
        }
    }

    /// True when every axis fits.
    #[must_use]
    pub const fn fits_all(&self) -> bool {
        self.fits_width && self.fits_depth && self.fits_height
    }

    /// One defect per failing axis, in width, depth, height order.
    #[must_use]
    pub fn defects(&self) -> Vec<FitDefect> {
        [
            (FitAxis::Width, self.fits_width, self.max_tray_width, self.interior_width),
            (FitAxis::Depth, self.fits_depth, self.total_tray_depth, self.interior_depth),
            (FitAxis::Height, self.fits_height, self.max_tray_height, self.interior_height),
        ]
        .into_iter()
        .filter(|&(_, fits, _, _)| !fits)
        .map(|(axis, _, required, available)| FitDefect {
            axis,
            required,
            available,
        })
        .collect()
    }
}

/// Container geometry, content layout and fit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SpatialLayout {
    /// Construction parameters used.
    #[cfg_attr(feature = "serde", serde(rename = "box_params"))]
    pub params: BoxParameters,
    /// Container exterior, when there is a container.
    #[cfg_attr(feature = "serde", serde(rename = "box_exterior_mm"))]
    pub exterior: Option<Dimensions>,
    /// Container interior, when there is a container.
    #[cfg_attr(feature = "serde", serde(rename = "box_interior_mm"))]
    pub interior: Option<Dimensions>,
    /// Content items sorted by placement Y.
    #[cfg_attr(feature = "serde", serde(rename = "trays"))]
    pub contents: Vec<ContentLayout>,
    /// Fit comparison, when there is a container.
    #[cfg_attr(feature = "serde", serde(rename = "fit_check"))]
    pub fit: Option<FitCheck>,
}

impl SpatialLayout {
    /// Widest, deepest-reaching and tallest requirement of the contents.
    #[must_use]
    pub fn required(&self) -> Dimensions {
        self.contents.iter().fold(Dimensions::default(), |acc, c| {
            Dimensions::new(
                acc.width.max(c.dimensions.width),
                acc.depth.max(c.far_edge()),
                acc.height.max(c.dimensions.height),
            )
        })
    }

    /// Fit defects, empty without a container.
    #[must_use]
    pub fn defects(&self) -> Vec<FitDefect> {
        self.fit.as_ref().map(FitCheck::defects).unwrap_or_default()
    }
}

/// Lay out contents by placement and check them against the container.
///
/// Contents are sorted by placement Y (stable, so equal positions keep input
/// order). Total depth is the largest far edge over all items.
#[must_use]
pub fn analyze_fit(
    container: Option<&Aabb>,
    params: &BoxParameters,
    contents: &[Part],
    placements: &PlacementMap,
) -> SpatialLayout {
    let mut items: Vec<ContentLayout> = contents
        .iter()
        .map(|p| ContentLayout::new(p, placements.get(p.name())))
        .collect();
    items.sort_by(|a, b| a.position.y.total_cmp(&b.position.y));

    let exterior = container.map(Dimensions::of);
    let interior = exterior.map(|e| e.interior(params));

    let mut layout = SpatialLayout {
        params: *params,
        exterior,
        interior,
        contents: items,
        fit: None,
    };
    let required = layout.required();
    layout.fit = interior.map(|i| FitCheck::evaluate(i, required));

    match &layout.fit {
        Some(fit) => info!(
            contents = layout.contents.len(),
            fits = fit.fits_all(),
            width_gap = fit.width_gap,
            depth_gap = fit.depth_gap,
            height_clearance = fit.height_clearance,
            "Fit analysis complete"
        ),
        None => debug!(contents = layout.contents.len(), "No container, fit skipped"),
    }
    layout
}
