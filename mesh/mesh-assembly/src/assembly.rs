//! Ordered collection of named parts.
//!
//! Part order is significant: intersection defects are reported in pair
//! enumeration order, which follows insertion order.

use hashbrown::HashSet;
use mesh_types::Aabb;

use crate::error::{AssemblyError, AssemblyResult};
use crate::fit::{SpatialLayout, analyze_fit};
use crate::intersect::{IntersectionDefect, check_intersections};
use crate::params::BoxParameters;
use crate::part::{Part, PartRole};
use crate::placement::PlacementMap;

/// A container with its contents and any loose parts.
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
/// use mesh_assembly::{Assembly, Part, PartRole};
///
/// let mut assembly = Assembly::new();
/// let bounds = Aabb::new(Point3::origin(), Point3::new(100.0, 150.0, 40.0));
/// assembly.add_part(Part::new("box", bounds)).unwrap();
///
/// assert_eq!(assembly.part_count(), 1);
/// assert_eq!(assembly.container().map(|p| p.role()), Some(PartRole::Container));
/// assert!(assembly.add_part(Part::new("box", bounds)).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    parts: Vec<Part>,
    names: HashSet<String>,
}

impl Assembly {
    /// Create an empty assembly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part.
    ///
    /// # Errors
    ///
    /// Returns [`AssemblyError::DuplicatePart`] if a part with the same name
    /// is already present, or [`AssemblyError::EmptyBounds`] if the part has
    /// no geometry.
    pub fn add_part(&mut self, part: Part) -> AssemblyResult<()> {
        if self.names.contains(part.name()) {
            return Err(AssemblyError::DuplicatePart {
                name: part.name().to_string(),
            });
        }
        if part.bounds().is_empty() {
            return Err(AssemblyError::EmptyBounds {
                name: part.name().to_string(),
            });
        }

        self.names.insert(part.name().to_string());
        self.parts.push(part);
        Ok(())
    }

    /// All parts in insertion order.
    #[must_use]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    /// Number of parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// True when the assembly has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The first container part, if any.
    #[must_use]
    pub fn container(&self) -> Option<&Part> {
        self.parts.iter().find(|p| p.role() == PartRole::Container)
    }

    /// Content parts in insertion order.
    pub fn contents(&self) -> impl Iterator<Item = &Part> {
        self.parts.iter().filter(|p| p.role() == PartRole::Content)
    }

    /// Pairwise intersection defects under the given placements.
    #[must_use]
    pub fn check_intersections(&self, placements: &PlacementMap) -> Vec<IntersectionDefect> {
        check_intersections(&self.parts, placements)
    }

    /// Layout and fit of the contents inside the container.
    #[must_use]
    pub fn analyze_fit(&self, params: &BoxParameters, placements: &PlacementMap) -> SpatialLayout {
        let contents: Vec<Part> = self.contents().cloned().collect();
        analyze_fit(
            self.container().map(Part::bounds).copied().as_ref(),
            params,
            &contents,
            placements,
        )
    }

    /// Bounds of the whole assembly, ignoring placements.
    #[must_use]
    pub fn bounds(&self) -> Aabb {
        let mut total = Aabb::empty();
        for part in &self.parts {
            total.expand_to_include(&part.bounds().min);
            total.expand_to_include(&part.bounds().max);
        }
        total
    }
}
