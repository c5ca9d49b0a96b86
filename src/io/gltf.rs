//! glTF format support.
//!
//! This module provides loading of meshes from glTF and GLB files. All
//! triangle primitives in the document are merged into a single mesh; point
//! and line primitives are skipped.

use std::path::Path;

use nalgebra::Point3;

use crate::error::{MeshError, Result};
use crate::mesh::TriMesh;

/// Load a mesh from a glTF or GLB file.
///
/// # Example
///
/// ```no_run
/// use orbis::io::gltf;
///
/// let mesh = gltf::load("model.gltf").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();

    let (document, buffers, _images) =
        ::gltf::import(path).map_err(|e| MeshError::load(path, e.to_string()))?;

    let mut all_vertices: Vec<Point3<f64>> = Vec::new();
    let mut all_faces: Vec<[usize; 3]> = Vec::new();

    for mesh in document.meshes() {
        for primitive in mesh.primitives() {
            let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));
            let offset = all_vertices.len();

            if let Some(positions) = reader.read_positions() {
                all_vertices.extend(
                    positions.map(|p| Point3::new(p[0] as f64, p[1] as f64, p[2] as f64)),
                );
            }

            let Some(indices) = reader.read_indices() else {
                continue;
            };
            let indices: Vec<usize> = indices.into_u32().map(|i| i as usize + offset).collect();
            all_faces.extend(triangulate(primitive.mode(), &indices));
        }
    }

    if all_faces.is_empty() {
        return Err(MeshError::load(path, "glTF file contains no triangle meshes"));
    }

    TriMesh::new(all_vertices, all_faces).map_err(|e| MeshError::load(path, e.to_string()))
}

/// Convert an index buffer into triangles according to the primitive mode.
fn triangulate(mode: ::gltf::mesh::Mode, indices: &[usize]) -> Vec<[usize; 3]> {
    use ::gltf::mesh::Mode;

    match mode {
        Mode::Triangles => indices
            .chunks_exact(3)
            .map(|c| [c[0], c[1], c[2]])
            .collect(),
        Mode::TriangleStrip => indices
            .windows(3)
            .enumerate()
            .map(|(i, w)| {
                // Reverse winding for odd triangles
                if i % 2 == 0 {
                    [w[0], w[1], w[2]]
                } else {
                    [w[0], w[2], w[1]]
                }
            })
            .collect(),
        Mode::TriangleFan => (1..indices.len().saturating_sub(1))
            .map(|i| [indices[0], indices[i], indices[i + 1]])
            .collect(),
        _ => Vec::new(),
    }
}
