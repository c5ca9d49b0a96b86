//! Face-vertex triangle mesh.

use nalgebra::{Point3, Vector3};

use crate::error::{MeshError, Result};

/// A triangle mesh stored as a vertex array and an index-triple face array.
///
/// Vertex identity is its position in the array; faces refer to vertices by
/// index and define each triangle's winding. Every face index is guaranteed to
/// be a valid vertex index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriMesh {
    vertices: Vec<Point3<f64>>,
    faces: Vec<[usize; 3]>,
}

impl TriMesh {
    /// Create a mesh from vertices and triangle faces.
    ///
    /// Returns [`MeshError::InvalidVertexIndex`] for the first face corner that
    /// does not reference an existing vertex.
    ///
    /// # Example
    /// ```
    /// use orbis::mesh::TriMesh;
    /// use nalgebra::Point3;
    ///
    /// let vertices = vec![
    ///     Point3::new(1.0, 0.0, 0.0),
    ///     Point3::new(0.0, 1.0, 0.0),
    ///     Point3::new(0.0, 0.0, 1.0),
    /// ];
    /// let mesh = TriMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
    /// assert_eq!(mesh.num_faces(), 1);
    ///
    /// assert!(TriMesh::new(Vec::new(), vec![[0, 1, 2]]).is_err());
    /// ```
    pub fn new(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Result<Self> {
        validate_faces(vertices.len(), &faces)?;
        Ok(Self { vertices, faces })
    }

    /// Build a mesh whose indices are already known to be in range.
    pub(crate) fn from_parts_unchecked(vertices: Vec<Point3<f64>>, faces: Vec<[usize; 3]>) -> Self {
        debug_assert!(validate_faces(vertices.len(), &faces).is_ok());
        Self { vertices, faces }
    }

    /// Vertex positions.
    #[inline]
    pub fn vertices(&self) -> &[Point3<f64>] {
        &self.vertices
    }

    /// Triangle faces as vertex index triples.
    #[inline]
    pub fn faces(&self) -> &[[usize; 3]] {
        &self.faces
    }

    /// Number of vertices.
    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Number of faces.
    #[inline]
    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// Check if the mesh has no faces.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Position of a vertex.
    #[inline]
    pub fn position(&self, v: usize) -> Point3<f64> {
        self.vertices[v]
    }

    /// The three corner positions of a face.
    pub fn face_positions(&self, f: usize) -> [Point3<f64>; 3] {
        let [a, b, c] = self.faces[f];
        [self.vertices[a], self.vertices[b], self.vertices[c]]
    }

    /// Area of a face.
    pub fn face_area(&self, f: usize) -> f64 {
        let [p0, p1, p2] = self.face_positions(f);
        0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
    }

    /// Axis-aligned bounding box, or `None` for a mesh without vertices.
    pub fn bounding_box(&self) -> Option<(Point3<f64>, Point3<f64>)> {
        let first = *self.vertices.first()?;
        let bounds = self.vertices.iter().fold((first, first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        Some(bounds)
    }

    /// Average of all vertex positions.
    pub fn centroid(&self) -> Option<Point3<f64>> {
        if self.vertices.is_empty() {
            return None;
        }
        let sum: Vector3<f64> = self.vertices.iter().map(|p| p.coords).sum();
        Some(Point3::from(sum / self.vertices.len() as f64))
    }

    /// Translate the mesh so its vertex centroid sits at the origin.
    ///
    /// Returns the translation that was applied.
    pub fn center(&mut self) -> Vector3<f64> {
        let Some(centroid) = self.centroid() else {
            return Vector3::zeros();
        };
        let offset = -centroid.coords;
        for p in &mut self.vertices {
            *p += offset;
        }
        offset
    }

    /// Consume the mesh and return its vertex and face arrays.
    pub fn into_parts(self) -> (Vec<Point3<f64>>, Vec<[usize; 3]>) {
        (self.vertices, self.faces)
    }
}

/// Check that every face index is below `num_vertices`.
pub fn validate_faces(num_vertices: usize, faces: &[[usize; 3]]) -> Result<()> {
    for (fi, face) in faces.iter().enumerate() {
        if let Some(&vi) = face.iter().find(|&&vi| vi >= num_vertices) {
            return Err(MeshError::InvalidVertexIndex { face: fi, vertex: vi });
        }
    }
    Ok(())
}
