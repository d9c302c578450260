//! Slide orientation and the part-local frame built on it.
//!
//! A lid slides along the longer horizontal axis of its box. Features that
//! guide it sit on the two walls running along that axis. [`OrientedFrame`]
//! names the two horizontal axes by role (wall axis across the walls, slide
//! axis along them) so region logic is written once for both orientations.

use std::fmt;

use mesh_region::{AxisBand, RegionFilter};
use mesh_types::{Aabb, Axis};

#[cfg(feature = "serde")]
use serde::Serialize;

/// Which horizontal axis the slide runs along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SlideOrientation {
    /// Slides along Y; features on the left and right walls.
    DepthSlide,
    /// Slides along X; features on the front and back walls.
    WidthSlide,
}

impl SlideOrientation {
    /// Classify from the X (width) and Y (depth) extents.
    ///
    /// Depth strictly greater than width is a depth slide; anything else,
    /// including a square part, is a width slide.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_features::SlideOrientation;
    ///
    /// assert_eq!(SlideOrientation::classify(40.0, 90.0), SlideOrientation::DepthSlide);
    /// assert_eq!(SlideOrientation::classify(90.0, 40.0), SlideOrientation::WidthSlide);
    /// assert_eq!(SlideOrientation::classify(50.0, 50.0), SlideOrientation::WidthSlide);
    /// ```
    #[must_use]
    pub fn classify(width: f64, depth: f64) -> Self {
        if depth > width {
            Self::DepthSlide
        } else {
            Self::WidthSlide
        }
    }

    /// Axis across the two feature walls.
    #[must_use]
    pub const fn wall_axis(self) -> Axis {
        match self {
            Self::DepthSlide => Axis::X,
            Self::WidthSlide => Axis::Y,
        }
    }

    /// Axis the slide runs along.
    #[must_use]
    pub const fn slide_axis(self) -> Axis {
        match self {
            Self::DepthSlide => Axis::Y,
            Self::WidthSlide => Axis::X,
        }
    }

    /// Names of the near and far feature walls.
    #[must_use]
    pub const fn wall_names(self) -> [&'static str; 2] {
        match self {
            Self::DepthSlide => ["left_wall", "right_wall"],
            Self::WidthSlide => ["front_wall", "back_wall"],
        }
    }

    /// Label used in reports.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DepthSlide => "depth-slide",
            Self::WidthSlide => "width-slide",
        }
    }
}

impl fmt::Display for SlideOrientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which half of a sliding pair a part is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum PartKind {
    /// The box; grooves sit just below its rim.
    Container,
    /// The lid; rails hang from its top.
    Lid,
}

impl PartKind {
    /// Vertical band holding the sliding features, measured from the part's
    /// bottom for a part of the given height.
    #[must_use]
    pub fn feature_band(self, height: f64) -> AxisBand {
        match self {
            Self::Container => AxisBand::closed(height - 4.0, height - 0.5),
            Self::Lid => AxisBand::closed(height - 3.0, height),
        }
    }
}

/// Part bounds seen through a slide orientation.
///
/// Bands passed to [`OrientedFrame::filter`] are measured from the bounds
/// minimum along each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientedFrame {
    orientation: SlideOrientation,
    bounds: Aabb,
}

impl OrientedFrame {
    /// Frame for a part's bounds, classifying its orientation.
    #[must_use]
    pub fn new(bounds: Aabb) -> Self {
        let orientation = SlideOrientation::classify(bounds.extent(Axis::X), bounds.extent(Axis::Y));
        Self {
            orientation,
            bounds,
        }
    }

    /// The classified orientation.
    #[must_use]
    pub const fn orientation(&self) -> SlideOrientation {
        self.orientation
    }

    /// Extent across the walls.
    #[must_use]
    pub fn wall_extent(&self) -> f64 {
        self.bounds.extent(self.orientation.wall_axis())
    }

    /// Extent along the slide.
    #[must_use]
    pub fn slide_extent(&self) -> f64 {
        self.bounds.extent(self.orientation.slide_axis())
    }

    /// Part height.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.bounds.extent(Axis::Z)
    }

    /// Bands for the near and far wall strips, each `strip` wide.
    #[must_use]
    pub fn wall_strips(&self, strip: f64) -> [AxisBand; 2] {
        let extent = self.wall_extent();
        [
            AxisBand::closed(0.0, strip),
            AxisBand::closed(extent - strip, extent),
        ]
    }

    /// World-space filter from local wall, slide and vertical bands.
    #[must_use]
    pub fn filter(&self, wall: AxisBand, slide: AxisBand, vertical: AxisBand) -> RegionFilter {
        let wall_axis = self.orientation.wall_axis();
        let slide_axis = self.orientation.slide_axis();
        RegionFilter::new()
            .with_band(wall_axis, wall.shifted(wall_axis.of_point(&self.bounds.min)))
            .with_band(slide_axis, slide.shifted(slide_axis.of_point(&self.bounds.min)))
            .with_band(Axis::Z, vertical.shifted(self.bounds.min.z))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::Point3;

    #[test]
    fn axes_swap_with_orientation() {
        assert_eq!(SlideOrientation::DepthSlide.wall_axis(), Axis::X);
        assert_eq!(SlideOrientation::DepthSlide.slide_axis(), Axis::Y);
        assert_eq!(SlideOrientation::WidthSlide.wall_axis(), Axis::Y);
        assert_eq!(SlideOrientation::WidthSlide.slide_axis(), Axis::X);
    }

    #[test]
    fn frame_measures_from_bounds_min() {
        let bounds = Aabb::new(Point3::new(10.0, 20.0, 5.0), Point3::new(50.0, 110.0, 35.0));
        let frame = OrientedFrame::new(bounds);
        assert_eq!(frame.orientation(), SlideOrientation::DepthSlide);
        assert!((frame.wall_extent() - 40.0).abs() < f64::EPSILON);
        assert!((frame.slide_extent() - 90.0).abs() < f64::EPSILON);

        let [near, _] = frame.wall_strips(4.0);
        let filter = frame.filter(near, AxisBand::above(76.5), PartKind::Lid.feature_band(30.0));
        let x = filter.band(Axis::X).unwrap();
        assert!(x.contains(14.0) && !x.contains(14.5));
        let y = filter.band(Axis::Y).unwrap();
        assert!(!y.contains(96.5) && y.contains(97.0));
        let z = filter.band(Axis::Z).unwrap();
        assert!(z.contains(32.0) && z.contains(35.0) && !z.contains(31.5));
    }

    #[test]
    fn container_band_stays_below_rim() {
        let band = PartKind::Container.feature_band(40.0);
        assert!(band.contains(36.0) && band.contains(39.5));
        assert!(!band.contains(39.8));
    }
}
