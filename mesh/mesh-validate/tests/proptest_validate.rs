//! Property-based tests for mesh validation.
//!
//! Run with: cargo test -p mesh-validate -- proptest

use mesh_types::{IndexedMesh, Vertex};
use mesh_validate::{IntegrityError, ValidateError, validate_mesh};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_vertex() -> impl Strategy<Value = Vertex> {
    prop::array::uniform3(-100.0..100.0f64).prop_map(Vertex::from)
}

/// A mesh whose face indices are all in range.
fn arb_mesh(max_vertices: usize, max_faces: usize) -> impl Strategy<Value = IndexedMesh> {
    (3..=max_vertices).prop_flat_map(move |n| {
        let vertices = prop::collection::vec(arb_vertex(), n);
        #[allow(clippy::cast_possible_truncation)]
        let faces = prop::collection::vec(prop::array::uniform3(0..n as u32), 1..=max_faces);
        (vertices, faces).prop_map(|(v, f)| IndexedMesh::from_parts(v, f))
    })
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #[test]
    fn proptest_valid_indices_always_validate(mesh in arb_mesh(20, 40)) {
        let record = validate_mesh(&mesh);
        prop_assert!(record.is_ok());
    }

    #[test]
    fn proptest_degenerate_count_bounded_by_faces(mesh in arb_mesh(20, 40)) {
        let faces = mesh.faces.len();
        if let Ok(record) = validate_mesh(&mesh) {
            for error in &record.errors {
                let IntegrityError::DegenerateFaces { count } = *error;
                prop_assert!(count >= 1 && count <= faces);
            }
            prop_assert_eq!(record.stats.faces, faces);
        }
    }

    #[test]
    fn proptest_volume_only_when_watertight(mesh in arb_mesh(12, 30)) {
        if let Ok(record) = validate_mesh(&mesh) {
            prop_assert_eq!(record.stats.volume_mm3.is_some(), record.watertight);
        }
    }

    #[test]
    fn proptest_out_of_range_index_is_fatal(mesh in arb_mesh(10, 10), extra in 0u32..100) {
        let mut mesh = mesh;
        #[allow(clippy::cast_possible_truncation)]
        let bad = mesh.vertices.len() as u32 + extra;
        mesh.faces.push([0, 1, bad]);
        let is_invalid_index = matches!(validate_mesh(&mesh), Err(ValidateError::InvalidIndex { .. }));
        prop_assert!(is_invalid_index);
    }
}
