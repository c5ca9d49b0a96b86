//! Sphere texture coordinates with seam repair.
//!
//! This module maps a triangulated sphere onto an equirectangular image (a
//! world map, for instance) so the image wraps around the sphere without a
//! tear where longitude wraps around.
//!
//! # Algorithm
//!
//! 1. Every vertex is projected with [`equirectangular_uv`].
//! 2. Faces whose `u` spread exceeds the seam threshold (0.5 by default) are
//!    flagged with [`find_seam_faces`]. Ordinary triangles are far smaller
//!    than half the texture width, so only faces straddling `u = 0 / u = 1`
//!    qualify.
//! 3. For each flagged face, every corner with `u < 0.5` is re-pointed at a
//!    new vertex with the same position and `u + 1.0`. Corners on the high
//!    side stay shared with their neighbours.
//!
//! Faces are never split or removed; only seam faces are re-indexed and only
//! vertices are appended.
//!
//! # Example
//!
//! ```
//! use orbis::algo::texcoord::{generate_sphere_texcoords, TexcoordOptions};
//! use orbis::mesh::{latitude_sphere, SphereOptions};
//!
//! let sphere = latitude_sphere(&SphereOptions::new(16, 32)).unwrap();
//! let textured = generate_sphere_texcoords(&sphere, &TexcoordOptions::default()).unwrap();
//!
//! assert_eq!(textured.mesh().num_faces(), sphere.num_faces());
//! assert_eq!(textured.uvs().len(), textured.mesh().num_vertices());
//! assert!(!textured.seam_faces().is_empty());
//! ```

mod projection;
mod seam;
mod uv;

pub use projection::equirectangular_uv;
pub use seam::{find_seam_faces, SEAM_LOW_SIDE};
pub use uv::UVMap;

use nalgebra::{Point2, Point3};

use crate::error::{MeshError, Result};
use crate::mesh::{validate_faces, TriMesh};

/// Options for texture coordinate generation.
#[derive(Debug, Clone)]
pub struct TexcoordOptions {
    /// A face whose `u` spread is greater than this crosses the seam.
    /// Must lie in `(0, 1)`.
    pub seam_threshold: f64,

    /// Whether to project vertices in parallel (default: true).
    pub parallel: bool,
}

impl Default for TexcoordOptions {
    fn default() -> Self {
        Self {
            seam_threshold: 0.5,
            parallel: true,
        }
    }
}

impl TexcoordOptions {
    /// Set the seam detection threshold.
    pub fn with_seam_threshold(mut self, threshold: f64) -> Self {
        self.seam_threshold = threshold;
        self
    }

    /// Set whether to use parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Create options for single-threaded execution.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.seam_threshold > 0.0 && self.seam_threshold < 1.0) {
            return Err(MeshError::invalid_param(
                "seam_threshold",
                self.seam_threshold,
                "must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// A mesh with per-vertex texture coordinates and a seam-free layout.
#[derive(Debug, Clone, PartialEq)]
pub struct TexturedMesh {
    mesh: TriMesh,
    uvs: UVMap,
    seam_faces: Vec<usize>,
    duplicated_from: Vec<usize>,
}

impl TexturedMesh {
    /// The (possibly extended) mesh.
    pub fn mesh(&self) -> &TriMesh {
        &self.mesh
    }

    /// Texture coordinates, one per vertex of [`mesh`](Self::mesh).
    pub fn uvs(&self) -> &UVMap {
        &self.uvs
    }

    /// Indices of the faces that crossed the seam and were re-indexed.
    pub fn seam_faces(&self) -> &[usize] {
        &self.seam_faces
    }

    /// Number of vertices in the input mesh. Vertices at or beyond this index
    /// are seam duplicates.
    pub fn num_original_vertices(&self) -> usize {
        self.mesh.num_vertices() - self.duplicated_from.len()
    }

    /// For each appended duplicate, the input vertex it copies.
    pub fn duplicated_from(&self) -> &[usize] {
        &self.duplicated_from
    }

    /// The input vertex a vertex of the output mesh stands for.
    pub fn source_vertex(&self, v: usize) -> usize {
        let original = self.num_original_vertices();
        if v < original {
            v
        } else {
            self.duplicated_from[v - original]
        }
    }

    /// Consume into `(vertices, faces, texcoords)` arrays for a renderer.
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<[usize; 3]>, Vec<Point2<f64>>) {
        let (vertices, faces) = self.mesh.into_parts();
        (vertices, faces, self.uvs.as_slice().to_vec())
    }
}

/// Generate seam-free equirectangular texture coordinates for a sphere mesh.
///
/// This is the slice-based entry point: face indices are checked and the first
/// out-of-range index fails with [`MeshError::InvalidVertexIndex`].
pub fn generate_texcoords(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
    options: &TexcoordOptions,
) -> Result<TexturedMesh> {
    options.validate()?;
    validate_faces(vertices.len(), faces)?;

    let uvs = projection::project_vertices(vertices, options.parallel);
    let seam_faces = find_seam_faces(faces, &uvs, options.seam_threshold);
    let repair = seam::repair_seams(vertices, faces, &uvs, &seam_faces);

    log::debug!(
        "texcoords: {} vertices, {} faces, {} seam faces, {} duplicates",
        vertices.len(),
        faces.len(),
        seam_faces.len(),
        repair.duplicated_from.len()
    );

    Ok(TexturedMesh {
        mesh: TriMesh::from_parts_unchecked(repair.vertices, repair.faces),
        uvs: repair.uvs,
        seam_faces,
        duplicated_from: repair.duplicated_from,
    })
}

/// Generate seam-free equirectangular texture coordinates for a [`TriMesh`].
///
/// See [`generate_texcoords`].
pub fn generate_sphere_texcoords(mesh: &TriMesh, options: &TexcoordOptions) -> Result<TexturedMesh> {
    generate_texcoords(mesh.vertices(), mesh.faces(), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{latitude_sphere, SphereOptions};
    use std::f64::consts::PI;

    /// Unit-sphere point whose projection is `(u, v)`.
    fn vertex_at(u: f64, v: f64) -> Point3<f64> {
        let lon = (u - 0.5) * 2.0 * PI;
        let lat = (0.5 - v) * PI;
        let ring = lat.cos();
        Point3::new(-ring * lon.cos(), lat.sin(), -ring * lon.sin())
    }

    /// Band of latitude rings around the `y` axis, without pole caps.
    fn create_band(rings: usize, cols: usize) -> TriMesh {
        let mut vertices = Vec::new();
        for r in 0..rings {
            let v = 0.2 + 0.6 * r as f64 / (rings - 1) as f64;
            for c in 0..cols {
                vertices.push(vertex_at(c as f64 / cols as f64, v));
            }
        }
        let mut faces = Vec::new();
        for r in 0..rings - 1 {
            for c in 0..cols {
                let a = r * cols + c;
                let b = r * cols + (c + 1) % cols;
                let d = a + cols;
                let e = b + cols;
                faces.push([a, b, e]);
                faces.push([a, e, d]);
            }
        }
        TriMesh::new(vertices, faces).unwrap()
    }

    #[test]
    fn test_vertex_at_helper() {
        for (u, v) in [(0.05, 0.5), (0.95, 0.3), (0.5, 0.7), (0.3, 0.45)] {
            let uv = equirectangular_uv(&vertex_at(u, v));
            assert!((uv.x - u).abs() < 1e-12);
            assert!((uv.y - v).abs() < 1e-12);
        }
    }

    #[test]
    fn test_seam_face_scenario() {
        let vertices = vec![vertex_at(0.05, 0.5), vertex_at(0.95, 0.5), vertex_at(0.5, 0.4)];
        let faces = vec![[0, 1, 2]];

        let textured = generate_texcoords(&vertices, &faces, &TexcoordOptions::default()).unwrap();

        assert_eq!(textured.seam_faces(), &[0]);
        assert_eq!(textured.mesh().num_vertices(), 4);
        assert_eq!(textured.mesh().faces(), &[[3, 1, 2]]);
        assert_eq!(textured.duplicated_from(), &[0]);

        let dup = textured.uvs().get(3);
        assert!((dup.x - 1.05).abs() < 1e-12);
        assert!((dup.y - 0.5).abs() < 1e-12);
        assert_eq!(textured.mesh().position(3), vertices[0]);

        // Untouched corners keep their coordinates
        assert!((textured.uvs().get(1).x - 0.95).abs() < 1e-12);
        assert!((textured.uvs().get(2).x - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_regular_face_scenario() {
        let vertices = vec![vertex_at(0.40, 0.5), vertex_at(0.45, 0.45), vertex_at(0.50, 0.5)];
        let faces = vec![[0, 1, 2]];

        let textured = generate_texcoords(&vertices, &faces, &TexcoordOptions::default()).unwrap();

        assert!(textured.seam_faces().is_empty());
        assert_eq!(textured.mesh().vertices(), vertices.as_slice());
        assert_eq!(textured.mesh().faces(), faces.as_slice());
        assert_eq!(textured.uvs().len(), 3);
    }

    #[test]
    fn test_degenerate_vertex_does_not_fail() {
        let vertices = vec![Point3::origin(), vertex_at(0.4, 0.5), vertex_at(0.45, 0.4)];
        let faces = vec![[0, 1, 2]];

        let textured = generate_texcoords(&vertices, &faces, &TexcoordOptions::default()).unwrap();
        assert_eq!(textured.uvs().get(0), Point2::new(0.5, 0.5));
    }

    #[test]
    fn test_invalid_index_fails_fast() {
        let vertices = vec![vertex_at(0.1, 0.5), vertex_at(0.2, 0.5), vertex_at(0.15, 0.4)];
        let faces = vec![[0, 1, 2], [1, 2, 3]];

        match generate_texcoords(&vertices, &faces, &TexcoordOptions::default()) {
            Err(MeshError::InvalidVertexIndex { face, vertex }) => {
                assert_eq!(face, 1);
                assert_eq!(vertex, 3);
            }
            other => panic!("expected InvalidVertexIndex, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_threshold() {
        let mesh = create_band(3, 8);
        for threshold in [0.0, 1.0, -0.2, f64::NAN] {
            let options = TexcoordOptions::default().with_seam_threshold(threshold);
            assert!(generate_sphere_texcoords(&mesh, &options).is_err());
        }
    }

    #[test]
    fn test_band_has_no_remaining_seam() {
        let mesh = create_band(5, 24);
        let textured = generate_sphere_texcoords(&mesh, &TexcoordOptions::default()).unwrap();

        // One column of quads straddles the seam: 2 faces per band row.
        assert_eq!(textured.seam_faces().len(), 2 * 4);

        for face in textured.mesh().faces() {
            assert!(textured.uvs().face_u_spread(face) <= 0.5 + 1e-9);
        }
    }

    #[test]
    fn test_globe_invariants() {
        let sphere = latitude_sphere(&SphereOptions::new(32, 32)).unwrap();
        let options = TexcoordOptions::default();
        let textured = generate_sphere_texcoords(&sphere, &options).unwrap();
        let n = sphere.num_vertices();
        let original_uvs = projection::project_vertices(sphere.vertices(), false);

        // Faces are only re-indexed
        assert_eq!(textured.mesh().num_faces(), sphere.num_faces());

        // Vertex count grows by the low-side incidences of seam faces
        let low_side: usize = textured
            .seam_faces()
            .iter()
            .map(|&fi| {
                sphere.faces()[fi]
                    .iter()
                    .filter(|&&v| original_uvs.get(v).x < SEAM_LOW_SIDE)
                    .count()
            })
            .sum();
        assert!(low_side > 0);
        assert_eq!(textured.mesh().num_vertices(), n + low_side);
        assert_eq!(textured.num_original_vertices(), n);

        // Original vertices and their coordinates are an unchanged prefix
        assert_eq!(&textured.mesh().vertices()[..n], sphere.vertices());
        assert_eq!(&textured.uvs().as_slice()[..n], original_uvs.as_slice());

        // Non-seam faces are untouched
        for (fi, face) in sphere.faces().iter().enumerate() {
            if !textured.seam_faces().contains(&fi) {
                assert_eq!(&textured.mesh().faces()[fi], face);
            }
        }

        // Duplicates copy position and v, shift u by one
        for v in n..textured.mesh().num_vertices() {
            let src = textured.source_vertex(v);
            assert!(src < n);
            assert_eq!(textured.mesh().position(v), sphere.position(src));
            let (dup, orig) = (textured.uvs().get(v), original_uvs.get(src));
            assert_eq!(dup.x, orig.x + 1.0);
            assert_eq!(dup.y, orig.y);
        }
    }

    #[test]
    fn test_globe_seam_closed_away_from_projection_poles() {
        let sphere = latitude_sphere(&SphereOptions::new(32, 32)).unwrap();
        let textured = generate_sphere_texcoords(&sphere, &TexcoordOptions::default()).unwrap();
        let mesh = textured.mesh();

        for face in mesh.faces() {
            let near_pole = face.iter().any(|&v| mesh.position(v).y.abs() > 0.9);
            if !near_pole {
                assert!(
                    textured.uvs().face_u_spread(face) <= 0.5 + 1e-9,
                    "face {:?} still spans the seam",
                    face
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let sphere = latitude_sphere(&SphereOptions::new(24, 48)).unwrap();

        let a = generate_sphere_texcoords(&sphere, &TexcoordOptions::default()).unwrap();
        let b = generate_sphere_texcoords(&sphere, &TexcoordOptions::default()).unwrap();
        let c = generate_sphere_texcoords(&sphere, &TexcoordOptions::default().sequential()).unwrap();

        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn test_into_parts_lengths() {
        let sphere = latitude_sphere(&SphereOptions::new(8, 16)).unwrap();
        let textured = generate_sphere_texcoords(&sphere, &TexcoordOptions::default()).unwrap();

        let (vertices, faces, texcoords) = textured.into_parts();
        assert_eq!(vertices.len(), texcoords.len());
        assert_eq!(faces.len(), sphere.num_faces());
    }
}
