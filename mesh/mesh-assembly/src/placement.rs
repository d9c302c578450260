//! Horizontal part placements.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Offset of a part in the horizontal plane.
///
/// Placements never move parts vertically.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Placement {
    /// Offset along X.
    pub x: f64,
    /// Offset along Y.
    pub y: f64,
}

impl Placement {
    /// Create a placement.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Placements by part name.
///
/// Looking up a name that has no entry yields the zero placement.
///
/// # Example
///
/// ```
/// use mesh_assembly::{Placement, PlacementMap};
///
/// let mut map = PlacementMap::new();
/// map.insert("tray_A_Cards", Placement::new(0.0, 40.0));
///
/// assert_eq!(map.get("tray_A_Cards"), Placement::new(0.0, 40.0));
/// assert_eq!(map.get("box"), Placement::default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlacementMap {
    entries: HashMap<String, Placement>,
}

impl PlacementMap {
    /// Empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the placement for a part, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, placement: Placement) {
        self.entries.insert(name.into(), placement);
    }

    /// Placement for a part, or the zero placement.
    #[must_use]
    pub fn get(&self, name: &str) -> Placement {
        self.entries.get(name).copied().unwrap_or_default()
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no placement has been set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Placement)> for PlacementMap {
    fn from_iter<I: IntoIterator<Item = (S, Placement)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
