//! UV coordinate storage.
//!
//! This module provides the [`UVMap`] type for storing per-vertex texture
//! coordinates alongside a [`TriMesh`](crate::mesh::TriMesh).

use nalgebra::Point2;

/// Texture coordinates for mesh vertices.
///
/// Index `i` holds the `(u, v)` of vertex `i`. Coordinates produced by the
/// equirectangular projection lie in `[0, 1]`, except for vertices duplicated
/// across the texture seam, whose `u` is shifted by `+1.0`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UVMap {
    coords: Vec<Point2<f64>>,
}

impl UVMap {
    /// Create a new UV map with the given coordinates.
    pub fn new(coords: Vec<Point2<f64>>) -> Self {
        Self { coords }
    }

    /// Create a UV map filled with zeros.
    pub fn zeros(n: usize) -> Self {
        Self {
            coords: vec![Point2::origin(); n],
        }
    }

    /// Get the UV coordinates for a vertex.
    #[inline]
    pub fn get(&self, v: usize) -> Point2<f64> {
        self.coords[v]
    }

    /// Set the UV coordinates for a vertex.
    #[inline]
    pub fn set(&mut self, v: usize, uv: Point2<f64>) {
        self.coords[v] = uv;
    }

    /// Append coordinates for a new vertex and return its index.
    #[inline]
    pub fn push(&mut self, uv: Point2<f64>) -> usize {
        self.coords.push(uv);
        self.coords.len() - 1
    }

    /// Get the number of UV coordinates.
    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Check if empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Iterate over all UV coordinates with their vertex indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Point2<f64>)> + '_ {
        self.coords.iter().copied().enumerate()
    }

    /// Get the raw coordinates slice.
    pub fn as_slice(&self) -> &[Point2<f64>] {
        &self.coords
    }

    /// Spread of `u` over a triangle: `max(u) - min(u)`.
    pub fn face_u_spread(&self, face: &[usize; 3]) -> f64 {
        let [a, b, c] = face.map(|v| self.coords[v].x);
        a.max(b).max(c) - a.min(b).min(c)
    }

    /// Compute the bounding box of the UV coordinates.
    ///
    /// Returns `None` if the UV map is empty.
    pub fn bounding_box(&self) -> Option<(Point2<f64>, Point2<f64>)> {
        let first = *self.coords.first()?;
        let bounds = self.coords.iter().fold((first, first), |(min, max), uv| {
            (min.inf(uv), max.sup(uv))
        });
        Some(bounds)
    }
}

impl From<Vec<Point2<f64>>> for UVMap {
    fn from(coords: Vec<Point2<f64>>) -> Self {
        Self::new(coords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uv_map_basic() {
        let coords = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.5, 1.0),
        ];
        let mut uv_map = UVMap::new(coords);

        assert_eq!(uv_map.len(), 3);
        assert!(!uv_map.is_empty());
        assert_eq!(uv_map.get(2), Point2::new(0.5, 1.0));

        uv_map.set(0, Point2::new(0.25, 0.75));
        assert_eq!(uv_map.get(0), Point2::new(0.25, 0.75));

        let idx = uv_map.push(Point2::new(1.25, 0.75));
        assert_eq!(idx, 3);
        assert_eq!(uv_map.iter().last(), Some((3, Point2::new(1.25, 0.75))));
    }

    #[test]
    fn test_uv_map_bounding_box() {
        let coords = vec![
            Point2::new(-1.0, 0.5),
            Point2::new(2.0, -0.5),
            Point2::new(0.5, 3.0),
        ];
        let uv_map = UVMap::new(coords);

        let (min, max) = uv_map.bounding_box().unwrap();
        assert_eq!(min, Point2::new(-1.0, -0.5));
        assert_eq!(max, Point2::new(2.0, 3.0));

        assert!(UVMap::zeros(0).bounding_box().is_none());
    }

    #[test]
    fn test_face_u_spread() {
        let uv_map = UVMap::new(vec![
            Point2::new(0.05, 0.3),
            Point2::new(0.95, 0.3),
            Point2::new(0.5, 0.4),
        ]);
        assert!((uv_map.face_u_spread(&[0, 1, 2]) - 0.9).abs() < 1e-12);
        assert!((uv_map.face_u_spread(&[1, 2, 2]) - 0.45).abs() < 1e-12);
    }
}
