//! Region filters and face selection.

use mesh_types::{Axis, FaceRecord, FaceTable};

use crate::band::AxisBand;
use crate::predicate::NormalPredicate;

/// Describes a region by face centroid bands and an optional normal test.
///
/// A face matches when its centroid lies in every band that is set and its
/// normal satisfies the predicate, if one is set. An empty filter matches
/// every face.
///
/// # Example
///
/// ```
/// use mesh_types::{Axis, FaceTable, unit_cube};
/// use mesh_region::{AxisBand, NormalPredicate, RegionFilter, select};
///
/// let table = FaceTable::build(&unit_cube());
/// let filter = RegionFilter::new()
///     .with_band(Axis::Z, AxisBand::closed(0.9, 1.0))
///     .with_normal(NormalPredicate::Absolute { axis: Axis::Z, min: 0.5 });
///
/// // The two triangles of the top face.
/// assert_eq!(select(&table, &filter).count(), 2);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionFilter {
    /// Band on centroid X.
    pub x: Option<AxisBand>,
    /// Band on centroid Y.
    pub y: Option<AxisBand>,
    /// Band on centroid Z.
    pub z: Option<AxisBand>,
    /// Normal condition.
    pub normal: Option<NormalPredicate>,
}

impl RegionFilter {
    /// A filter that matches every face.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            x: None,
            y: None,
            z: None,
            normal: None,
        }
    }

    /// Set the band for one axis, replacing any previous band.
    #[must_use]
    pub const fn with_band(mut self, axis: Axis, band: AxisBand) -> Self {
        match axis {
            Axis::X => self.x = Some(band),
            Axis::Y => self.y = Some(band),
            Axis::Z => self.z = Some(band),
        }
        self
    }

    /// Set the normal predicate.
    #[must_use]
    pub const fn with_normal(mut self, predicate: NormalPredicate) -> Self {
        self.normal = Some(predicate);
        self
    }

    /// Band on one axis, if set.
    #[must_use]
    pub const fn band(&self, axis: Axis) -> Option<&AxisBand> {
        match axis {
            Axis::X => self.x.as_ref(),
            Axis::Y => self.y.as_ref(),
            Axis::Z => self.z.as_ref(),
        }
    }

    /// True if a face record satisfies the filter.
    #[must_use]
    pub fn matches(&self, face: &FaceRecord) -> bool {
        let in_bands = Axis::ALL.iter().all(|&axis| {
            self.band(axis)
                .is_none_or(|band| band.contains(axis.of_point(&face.center)))
        });
        in_bands && self.normal.is_none_or(|p| p.matches(&face.normal))
    }
}

/// Faces of a table that match a filter, in face order.
///
/// Lazy and restartable: cloning yields an independent pass over the same
/// faces.
#[derive(Debug, Clone)]
pub struct RegionSelection<'a> {
    faces: std::slice::Iter<'a, FaceRecord>,
    filter: RegionFilter,
}

impl<'a> Iterator for RegionSelection<'a> {
    type Item = &'a FaceRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let filter = self.filter;
        self.faces.by_ref().find(|f| filter.matches(f))
    }
}

impl RegionSelection<'_> {
    /// Consume the selection into a face count and total area.
    #[must_use]
    pub fn summary(self) -> RegionSummary {
        self.fold(RegionSummary::default(), |mut acc, face| {
            acc.face_count += 1;
            acc.total_area += face.area;
            acc
        })
    }
}

/// Aggregate of a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RegionSummary {
    /// Number of matching faces.
    pub face_count: usize,
    /// Sum of matching face areas.
    pub total_area: f64,
}

/// Select the faces of `faces` that match `filter`.
///
/// The same inputs always produce the same sequence. An empty result is
/// not an error.
#[must_use]
pub fn select<'a>(faces: &'a FaceTable, filter: &RegionFilter) -> RegionSelection<'a> {
    RegionSelection {
        faces: faces.iter(),
        filter: *filter,
    }
}
