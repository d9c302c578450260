//! Named parts and their roles.

use mesh_types::Aabb;

use crate::placement::Placement;

/// What a part is for, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartRole {
    /// The outer box.
    Container,
    /// A tray that sits inside the container.
    Content,
    /// The lid.
    Lid,
    /// Anything else; never checked against other parts.
    Other,
}

impl PartRole {
    /// Infer the role from a part name.
    ///
    /// The name is split into words on `_`, `-`, `.` and spaces and matched
    /// case-insensitively: a word starting with `tray` makes a content part,
    /// then `lid`, then `box`. Matching whole words keeps a tray called
    /// "Solid Box Insert" a tray.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_assembly::PartRole;
    ///
    /// assert_eq!(PartRole::from_name("box"), PartRole::Container);
    /// assert_eq!(PartRole::from_name("tray_B_Solid_Box"), PartRole::Content);
    /// assert_eq!(PartRole::from_name("Lid"), PartRole::Lid);
    /// assert_eq!(PartRole::from_name("insert"), PartRole::Other);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        let words: Vec<&str> = lower
            .split(['_', '-', '.', ' '])
            .filter(|w| !w.is_empty())
            .collect();
        let has = |prefix: &str| words.iter().any(|w| w.starts_with(prefix));

        if has("tray") {
            Self::Content
        } else if has("lid") {
            Self::Lid
        } else if has("box") {
            Self::Container
        } else {
            Self::Other
        }
    }
}

/// A named part reduced to its bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    name: String,
    role: PartRole,
    bounds: Aabb,
}

impl Part {
    /// Create a part, inferring its role from the name.
    #[must_use]
    pub fn new(name: impl Into<String>, bounds: Aabb) -> Self {
        let name = name.into();
        let role = PartRole::from_name(&name);
        Self { name, role, bounds }
    }

    /// Part name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Part role.
    #[must_use]
    pub const fn role(&self) -> PartRole {
        self.role
    }

    /// Bounds in the part's own coordinates.
    #[must_use]
    pub const fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Bounds shifted by a placement.
    #[must_use]
    pub fn placed_bounds(&self, placement: Placement) -> Aabb {
        self.bounds.translated(placement.x, placement.y)
    }
}
