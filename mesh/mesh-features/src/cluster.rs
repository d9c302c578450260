//! Single-linkage clustering of points under a distance cutoff.

use hashbrown::HashMap;
use mesh_types::Point3;

/// Disjoint-set forest with path halving and union by size.
#[derive(Debug, Clone)]
struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            size: vec![1; n],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}

#[allow(clippy::cast_possible_truncation)]
// `as` saturates; neighbour offsets saturate too
fn cell_of(p: &Point3<f64>, cell: f64) -> [i64; 3] {
    [
        (p.x / cell).floor() as i64,
        (p.y / cell).floor() as i64,
        (p.z / cell).floor() as i64,
    ]
}

/// Group points so that any two within `cutoff` of each other, directly or
/// through a chain, share a group.
///
/// Neighbours are found through a hash grid with cells `cutoff` wide, so
/// only the 27 cells around each point are searched. Groups are returned
/// as point indices in ascending order, and the groups themselves are
/// ordered by their first index.
///
/// `cutoff` must be positive and finite.
pub(crate) fn single_linkage(points: &[Point3<f64>], cutoff: f64) -> Vec<Vec<usize>> {
    let mut grid: HashMap<[i64; 3], Vec<usize>> = HashMap::new();
    for (i, p) in points.iter().enumerate() {
        grid.entry(cell_of(p, cutoff)).or_default().push(i);
    }

    let mut sets = DisjointSet::new(points.len());
    for (i, p) in points.iter().enumerate() {
        let [cx, cy, cz] = cell_of(p, cutoff);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let Some(members) = grid.get(&[
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    ]) else {
                        continue;
                    };
                    for &j in members {
                        if j > i && (points[j] - p).norm() <= cutoff {
                            sets.union(i, j);
                        }
                    }
                }
            }
        }
    }

    let mut group_of_root: HashMap<usize, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();
    for i in 0..points.len() {
        let root = sets.find(i);
        let slot = *group_of_root.entry(root).or_insert_with(|| {
            groups.push(Vec::new());
            groups.len() - 1
        });
        groups[slot].push(i);
    }
    groups
}
