//! STL (stereolithography) format support.
//!
//! STL carries no texture coordinates, so only loading is provided. Both
//! binary and ASCII files are accepted.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::TriMesh;

/// Load a mesh from an STL file.
///
/// STL stores positions per triangle; coincident positions are merged back
/// into shared vertices and triangles that collapse are skipped.
///
/// # Example
///
/// ```no_run
/// use orbis::io::stl;
///
/// let mesh = stl::load("model.stl").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();
    let mut file = File::open(path)?;

    let stl = stl_io::read_stl(&mut file).map_err(|e| MeshError::load(path, e.to_string()))?;

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();
    // Keyed on the exact f32 bit patterns read from the file
    let mut lookup: HashMap<[u32; 3], usize> = HashMap::new();

    let mut find_or_add = |v: &stl_io::Vertex| -> usize {
        let key = [v[0].to_bits(), v[1].to_bits(), v[2].to_bits()];
        *lookup.entry(key).or_insert_with(|| {
            vertices.push(Point3::new(v[0] as f64, v[1] as f64, v[2] as f64));
            vertices.len() - 1
        })
    };

    for tri in &stl.faces {
        let [i0, i1, i2] = tri.vertices.map(|i| find_or_add(&stl.vertices[i]));

        // Skip degenerate triangles
        if i0 != i1 && i1 != i2 && i0 != i2 {
            faces.push([i0, i1, i2]);
        }
    }

    if faces.is_empty() {
        return Err(MeshError::load(path, "STL file contains no valid triangles"));
    }

    TriMesh::new(vertices, faces)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_ascii_shares_vertices() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("square.stl");
        std::fs::write(
            &path,
            "solid square
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 0 0
      vertex 1 1 0
    endloop
  endfacet
  facet normal 0 0 1
    outer loop
      vertex 0 0 0
      vertex 1 1 0
      vertex 0 1 0
    endloop
  endfacet
endsolid square
",
        )
        .unwrap();

        let mesh = load(&path).unwrap();
        assert_eq!(mesh.num_vertices(), 4);
        assert_eq!(mesh.num_faces(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load(dir.path().join("nope.stl")), Err(MeshError::Io(_))));
    }
}
