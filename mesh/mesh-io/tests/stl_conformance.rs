//! Conformance tests for exported part files.
//!
//! Fixtures are generated on the fly with the shapes the exporter produces:
//! - closed boxes written as one triangle soup
//! - several disconnected components in one file
//! - the same part in ASCII and binary encodings
//!
//! To run: cargo test -p mesh-io conformance

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fmt::Write as _;
use std::path::Path;

use mesh_io::{IoError, load_mesh, parse_stl};
use mesh_types::{MeshBounds, MeshTopology};

type Tri = [[f32; 3]; 3];

/// Closed box as 12 free triangles, offset along X.
fn cuboid(offset: f32, size: [f32; 3]) -> Vec<Tri> {
    let [x, y, z] = size;
    let v = [
        [offset, 0.0, 0.0],
        [offset + x, 0.0, 0.0],
        [offset + x, y, 0.0],
        [offset, y, 0.0],
        [offset, 0.0, z],
        [offset + x, 0.0, z],
        [offset + x, y, z],
        [offset, y, z],
    ];
    [
        [0, 2, 1],
        [0, 3, 2],
        [4, 5, 6],
        [4, 6, 7],
        [0, 1, 5],
        [0, 5, 4],
        [3, 7, 6],
        [3, 6, 2],
        [0, 4, 7],
        [0, 7, 3],
        [1, 2, 6],
        [1, 6, 5],
    ]
    .iter()
    .map(|&[a, b, c]| [v[a], v[b], v[c]])
    .collect()
}

fn ascii(solids: &[&[Tri]]) -> String {
    let mut text = String::new();
    for (i, triangles) in solids.iter().enumerate() {
        writeln!(text, "solid part{i}").unwrap();
        for tri in *triangles {
            text.push_str("facet normal 0 0 0\nouter loop\n");
            for [x, y, z] in tri {
                writeln!(text, "vertex {x} {y} {z}").unwrap();
            }
            text.push_str("endloop\nendfacet\n");
        }
        writeln!(text, "endsolid part{i}").unwrap();
    }
    text
}

fn binary(triangles: &[Tri]) -> Vec<u8> {
    let mut out = vec![0u8; 80];
    out.extend_from_slice(&u32::try_from(triangles.len()).unwrap().to_le_bytes());
    for tri in triangles {
        out.extend_from_slice(&[0u8; 12]);
        for corner in tri {
            for c in corner {
                out.extend_from_slice(&c.to_le_bytes());
            }
        }
        out.extend_from_slice(&[0u8; 2]);
    }
    out
}

fn write(dir: &Path, name: &str, bytes: impl AsRef<[u8]>) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

#[test]
fn conformance_ascii_box_welds_corners() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "box.stl", ascii(&[cuboid(0.0, [100.0, 150.0, 40.0]).as_slice()]));

    let mesh = load_mesh(&path).unwrap();
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.face_count(), 12);
    let bounds = mesh.bounds();
    assert!((bounds.max.y - 150.0).abs() < 1e-9);
}

#[test]
fn conformance_binary_matches_ascii() {
    let dir = tempfile::tempdir().unwrap();
    let triangles = cuboid(0.0, [10.0, 20.0, 5.0]);
    let a = load_mesh(write(dir.path(), "a.stl", ascii(&[triangles.as_slice()]))).unwrap();
    let b = load_mesh(write(dir.path(), "b.stl", binary(&triangles))).unwrap();

    assert_eq!(a.vertex_count(), b.vertex_count());
    assert_eq!(a.faces, b.faces);
    assert!((a.volume() - b.volume()).abs() < 1e-6);
}

#[test]
fn conformance_multiple_components() {
    let dir = tempfile::tempdir().unwrap();
    let left = cuboid(0.0, [10.0, 10.0, 10.0]);
    let right = cuboid(20.0, [10.0, 10.0, 10.0]);

    // Two components in one solid, and the same pair as two solids.
    let mut joined = left.clone();
    joined.extend_from_slice(&right);
    let single = load_mesh(write(dir.path(), "one.stl", ascii(&[joined.as_slice()]))).unwrap();
    let split = load_mesh(write(dir.path(), "two.stl", ascii(&[left.as_slice(), right.as_slice()]))).unwrap();

    for mesh in [&single, &split] {
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(mesh.face_count(), 24);
        assert!((mesh.bounds().max.x - 30.0).abs() < 1e-9);
    }
}

#[test]
fn conformance_binary_header_starting_with_solid() {
    let dir = tempfile::tempdir().unwrap();
    let triangles = cuboid(0.0, [1.0, 1.0, 1.0]);
    let mut bytes = binary(&triangles);
    bytes[..5].copy_from_slice(b"solid");

    let mesh = load_mesh(write(dir.path(), "exported.stl", bytes)).unwrap();
    assert_eq!(mesh.face_count(), 12);
}

#[test]
fn conformance_space_padded_solid_header() {
    let tri: Tri = [[0.0, 0.0, 0.0], [3.5, 0.0, 0.0], [0.0, 2.25, 0.0]];
    let mut bytes = binary(&[tri]);
    let mut header = [b' '; 80];
    header[..21].copy_from_slice(b"solid exported by cad");
    bytes[..80].copy_from_slice(&header);

    let mesh = parse_stl(&bytes).unwrap();
    assert_eq!(mesh.face_count(), 1);
    assert_eq!(mesh.vertex_count(), 3);
    assert!((mesh.bounds().max.x - 3.5).abs() < 1e-9);

    // A real ASCII file that happens to start the same way still parses as text.
    let text = ascii(&[cuboid(0.0, [1.0, 1.0, 1.0]).as_slice()]);
    assert_eq!(parse_stl(text.as_bytes()).unwrap().face_count(), 12);
}

#[test]
fn conformance_empty_and_missing_files() {
    let dir = tempfile::tempdir().unwrap();
    let empty = write(dir.path(), "empty.stl", "solid nothing\nendsolid nothing\n");
    assert!(matches!(load_mesh(&empty), Err(IoError::NoGeometry { .. })));

    let missing = dir.path().join("missing.stl");
    assert!(matches!(load_mesh(&missing), Err(IoError::FileNotFound { .. })));
}
