//! Mesh builders shared by the unit tests.

use mesh_types::{IndexedMesh, PartMesh, Vertex};

/// Part from free triangles, no shared vertices.
pub fn soup(triangles: &[[[f64; 3]; 3]]) -> PartMesh {
    let mut mesh = IndexedMesh::new();
    for tri in triangles {
        #[allow(clippy::cast_possible_truncation)]
        let base = mesh.vertices.len() as u32;
        for v in tri {
            mesh.vertices.push(Vertex::from(*v));
        }
        mesh.faces.push([base, base + 1, base + 2]);
    }
    PartMesh::new(mesh)
}

/// Right triangle with both legs `leg`, normal `(sign, 0, 1)/√2`.
///
/// The right angle sits at `origin`; one leg runs along +Y and the other
/// climbs in Z while moving against `sign` in X.
pub fn slanted(origin: [f64; 3], leg: f64, sign: f64) -> [[f64; 3]; 3] {
    let [x, y, z] = origin;
    if sign >= 0.0 {
        [[x, y, z], [x, y + leg, z], [x - leg, y, z + leg]]
    } else {
        [[x, y, z], [x + leg, y, z + leg], [x, y + leg, z]]
    }
}

/// Large floor triangle spanning `[0, w] × [0, d]` at z = 0.
pub fn floor(w: f64, d: f64) -> [[f64; 3]; 3] {
    [[0.0, 0.0, 0.0], [w, 0.0, 0.0], [0.0, d, 0.0]]
}

/// Horizontal triangle facing up.
pub fn flat(origin: [f64; 3], leg: f64) -> [[f64; 3]; 3] {
    let [x, y, z] = origin;
    [[x, y, z], [x + leg, y, z], [x, y + leg, z]]
}

/// Vertical sliver at a corner, used to pin the part bounds.
pub fn corner(at: [f64; 3]) -> [[f64; 3]; 3] {
    let [x, y, z] = at;
    [[x, y, z], [x, y - 0.1, z], [x, y, z - 0.1]]
}

/// Right triangle with both legs `leg`, normal `(0, sign, 1)/√2`.
///
/// One leg runs along +X from `origin`; the other drops against `sign` in
/// Z while moving along +Y.
pub fn slanted_y(origin: [f64; 3], leg: f64, sign: f64) -> [[f64; 3]; 3] {
    let [x, y, z] = origin;
    [[x, y, z], [x + leg, y, z], [x, y + leg, z - sign * leg]]
}
