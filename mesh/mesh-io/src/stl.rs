//! STL (Stereolithography) loading.
//!
//! Both encodings are accepted:
//! - ASCII files start with `solid` and contain no NUL bytes in the first
//!   80 bytes. A file may hold several `solid ... endsolid` blocks; they
//!   are merged into one mesh.
//! - Binary files have an 80-byte header, a little-endian `u32` triangle
//!   count and 50 bytes per triangle.
//!
//! STL stores every triangle with its own three corners. The loader welds
//! corners with bit-identical coordinates into shared vertices so edge
//! adjacency (and therefore watertightness) is meaningful downstream.

use std::fs;
use std::path::Path;

use hashbrown::HashMap;
use mesh_types::{IndexedMesh, Point3, Vertex};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// STL binary header size in bytes.
const HEADER_SIZE: usize = 80;

/// Size of one triangle in binary STL (normal + 3 vertices + attribute).
const TRIANGLE_SIZE: usize = 50;

/// Load a mesh from an STL file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not valid STL, or holds
/// no triangles.
///
/// # Example
///
/// ```no_run
/// use mesh_io::load_stl;
///
/// let mesh = load_stl("box.stl").unwrap();
/// println!("Loaded {} faces", mesh.faces.len());
/// ```
pub fn load_stl<P: AsRef<Path>>(path: P) -> IoResult<IndexedMesh> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IoError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IoError::Io(e)
        }
    })?;

    let mesh = parse_stl(&bytes)?;
    if mesh.faces.is_empty() {
        return Err(IoError::NoGeometry {
            path: path.to_path_buf(),
        });
    }

    debug!(
        path = %path.display(),
        vertices = mesh.vertices.len(),
        faces = mesh.faces.len(),
        "Loaded STL"
    );
    Ok(mesh)
}

/// Parse STL content held in memory.
///
/// An input with no triangles parses to an empty mesh.
///
/// # Errors
///
/// Returns an error for content that is neither ASCII nor binary STL.
pub fn parse_stl(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if looks_like_ascii(bytes) && !binary_size_matches(bytes) {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| IoError::invalid_content(format!("ASCII STL is not UTF-8: {e}")))?;
        parse_ascii(text)
    } else {
        parse_binary(bytes)
    }
}

fn looks_like_ascii(bytes: &[u8]) -> bool {
    let head = &bytes[..bytes.len().min(HEADER_SIZE)];
    let starts_with_solid = head
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .is_some_and(|start| head[start..].starts_with(b"solid"));
    // Binary exporters sometimes write "solid" into the header; their
    // headers are NUL padded.
    starts_with_solid && !head.contains(&0)
}

/// True when the length is exactly header + count + `count` records.
///
/// Some exporters pad a "solid ..." header with spaces instead of NULs, so
/// the header alone cannot tell the two encodings apart.
fn binary_size_matches(bytes: &[u8]) -> bool {
    let Some(count) = bytes.get(HEADER_SIZE..HEADER_SIZE + 4) else {
        return false;
    };
    let declared = u64::from(u32::from_le_bytes([count[0], count[1], count[2], count[3]]));
    (HEADER_SIZE as u64 + 4).saturating_add(declared.saturating_mul(TRIANGLE_SIZE as u64))
        == bytes.len() as u64
}

fn parse_binary(bytes: &[u8]) -> IoResult<IndexedMesh> {
    if bytes.len() < HEADER_SIZE + 4 {
        return Err(IoError::invalid_content(format!(
            "file too small for binary STL: {} bytes",
            bytes.len()
        )));
    }

    let count_bytes = [
        bytes[HEADER_SIZE],
        bytes[HEADER_SIZE + 1],
        bytes[HEADER_SIZE + 2],
        bytes[HEADER_SIZE + 3],
    ];
    let declared = u32::from_le_bytes(count_bytes);

    let body = &bytes[HEADER_SIZE + 4..];
    let present = body.len() / TRIANGLE_SIZE;
    if present < declared as usize {
        #[allow(clippy::cast_possible_truncation)]
        // present < declared, which fits in u32
        return Err(IoError::Truncated {
            expected: declared,
            got: present as u32,
        });
    }

    let mut welder = VertexWelder::with_capacity(declared as usize);
    for record in body.chunks_exact(TRIANGLE_SIZE).take(declared as usize) {
        // Skip the stored normal; it is recomputed from the corners.
        welder.push_triangle([
            read_point(&record[12..24]),
            read_point(&record[24..36]),
            read_point(&record[36..48]),
        ]);
    }
    Ok(welder.finish())
}

fn read_point(buf: &[u8]) -> Point3<f64> {
    let f = |i: usize| f64::from(f32::from_le_bytes([buf[i], buf[i + 1], buf[i + 2], buf[i + 3]]));
    Point3::new(f(0), f(4), f(8))
}

fn parse_ascii(text: &str) -> IoResult<IndexedMesh> {
    let mut welder = VertexWelder::with_capacity(0);
    let mut corners: Vec<Point3<f64>> = Vec::with_capacity(3);
    let mut in_loop = false;

    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };

        match keyword.to_ascii_lowercase().as_str() {
            "outer" => {
                in_loop = true;
                corners.clear();
            }
            "vertex" if in_loop => {
                let mut coord = || -> IoResult<f64> {
                    let token = tokens
                        .next()
                        .ok_or_else(|| IoError::invalid_content("vertex line with fewer than 3 coordinates"))?;
                    Ok(token.parse::<f64>()?)
                };
                let (x, y, z) = (coord()?, coord()?, coord()?);
                corners.push(Point3::new(x, y, z));
            }
            "endloop" => in_loop = false,
            "endfacet" => {
                if let [a, b, c] = corners[..] {
                    welder.push_triangle([a, b, c]);
                }
                corners.clear();
            }
            // `solid`, `endsolid` and `facet normal` carry nothing we keep;
            // further solids continue filling the same mesh.
            _ => {}
        }
    }

    Ok(welder.finish())
}

/// Merges corners with bit-identical coordinates into shared vertices.
struct VertexWelder {
    lookup: HashMap<[u64; 3], u32>,
    mesh: IndexedMesh,
}

impl VertexWelder {
    fn with_capacity(triangles: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(triangles),
            mesh: IndexedMesh::with_capacity(triangles / 2, triangles),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    // Mesh indices are u32; larger meshes are unsupported
    fn index_of(&mut self, p: Point3<f64>) -> u32 {
        // +0.0 and -0.0 compare equal but differ in bits.
        let key = [p.x, p.y, p.z].map(|c| (c + 0.0).to_bits());
        let vertices = &mut self.mesh.vertices;
        *self.lookup.entry(key).or_insert_with(|| {
            vertices.push(Vertex::new(p));
            (vertices.len() - 1) as u32
        })
    }

    fn push_triangle(&mut self, corners: [Point3<f64>; 3]) {
        let face = corners.map(|p| self.index_of(p));
        self.mesh.faces.push(face);
    }

    fn finish(self) -> IndexedMesh {
        self.mesh
    }
}
