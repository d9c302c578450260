//! Edge adjacency with traversal direction.

use hashbrown::HashMap;

/// One face's use of an undirected edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeUse {
    /// Face index.
    pub face: usize,
    /// True if the face walks the edge from its lower to its higher vertex.
    pub ascending: bool,
}

/// Maps each undirected edge to the faces that use it.
///
/// # Example
///
/// ```
/// use mesh_validate::EdgeAdjacency;
///
/// // Two triangles sharing edge 1-2, wound consistently.
/// let adj = EdgeAdjacency::build(&[[0, 1, 2], [2, 1, 3]]);
/// assert_eq!(adj.edge_count(), 5);
/// assert_eq!(adj.boundary_edge_count(), 4);
/// assert_eq!(adj.inconsistent_edge_count(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct EdgeAdjacency {
    edges: HashMap<(u32, u32), Vec<EdgeUse>>,
}

impl EdgeAdjacency {
    /// Build adjacency from triangle faces.
    #[must_use]
    pub fn build(faces: &[[u32; 3]]) -> Self {
        let mut edges: HashMap<(u32, u32), Vec<EdgeUse>> = HashMap::with_capacity(faces.len() * 3 / 2);
        for (face, tri) in faces.iter().enumerate() {
            for i in 0..3 {
                let (a, b) = (tri[i], tri[(i + 1) % 3]);
                edges.entry((a.min(b), a.max(b))).or_default().push(EdgeUse {
                    face,
                    ascending: a < b,
                });
            }
        }
        Self { edges }
    }

    /// Number of distinct undirected edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Edges used by exactly one face.
    #[must_use]
    pub fn boundary_edge_count(&self) -> usize {
        self.edges.values().filter(|u| u.len() == 1).count()
    }

    /// Edges used by more than two faces.
    #[must_use]
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edges.values().filter(|u| u.len() > 2).count()
    }

    /// Every edge is shared by exactly two faces.
    #[must_use]
    pub fn is_watertight(&self) -> bool {
        self.edges.values().all(|u| u.len() == 2)
    }

    /// No edge is shared by more than two faces.
    #[must_use]
    pub fn is_manifold(&self) -> bool {
        self.edges.values().all(|u| u.len() <= 2)
    }

    /// Shared edges that both faces walk in the same direction.
    ///
    /// Boundary and non-manifold edges are not counted.
    #[must_use]
    pub fn inconsistent_edge_count(&self) -> usize {
        self.edges
            .values()
            .filter(|u| matches!(u.as_slice(), [a, b] if a.ascending == b.ascending))
            .count()
    }
}
