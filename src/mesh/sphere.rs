//! Latitude/longitude sphere tessellation.
//!
//! Produces the ring-and-column sphere used for the globe: `rows + 1` rings of
//! latitude running from the `+z` pole to the `-z` pole, `cols` vertices per
//! ring. The two pole rings collapse to a single vertex each and the
//! zero-area pole triangles are dropped, leaving `(rows - 1) * cols + 2`
//! vertices and `2 * cols * (rows - 1)` faces.

use std::f64::consts::PI;

use nalgebra::Point3;

use super::TriMesh;
use crate::error::{MeshError, Result};

/// Options for [`latitude_sphere`].
#[derive(Debug, Clone)]
pub struct SphereOptions {
    /// Number of latitude bands (at least 2).
    pub rows: usize,

    /// Number of vertices per ring of latitude (at least 3).
    pub cols: usize,

    /// Sphere radius.
    pub radius: f64,

    /// Rotate each ring by half a column relative to the previous one.
    /// This gives near-equilateral triangles instead of right triangles.
    pub offset: bool,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            rows: 128,
            cols: 128,
            radius: 1.0,
            offset: true,
        }
    }
}

impl SphereOptions {
    /// Create options with the given ring and column counts.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            ..Self::default()
        }
    }

    /// Set the sphere radius.
    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    /// Set whether alternate rings are offset by half a column.
    pub fn with_offset(mut self, offset: bool) -> Self {
        self.offset = offset;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.rows < 2 {
            return Err(MeshError::invalid_param("rows", self.rows, "must be at least 2"));
        }
        if self.cols < 3 {
            return Err(MeshError::invalid_param("cols", self.cols, "must be at least 3"));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(MeshError::invalid_param(
                "radius",
                self.radius,
                "must be positive and finite",
            ));
        }
        Ok(())
    }
}

/// Tessellate a sphere by latitude rings.
///
/// # Example
///
/// ```
/// use orbis::mesh::{latitude_sphere, SphereOptions};
///
/// let sphere = latitude_sphere(&SphereOptions::new(8, 16)).unwrap();
/// assert_eq!(sphere.num_vertices(), 7 * 16 + 2);
/// assert_eq!(sphere.num_faces(), 2 * 16 * 7);
/// ```
pub fn latitude_sphere(options: &SphereOptions) -> Result<TriMesh> {
    options.validate()?;

    let SphereOptions {
        rows,
        cols,
        radius,
        offset,
    } = *options;

    // Full grid including the redundant pole rings; index = row * cols + col.
    let mut grid = Vec::with_capacity((rows + 1) * cols);
    for row in 0..=rows {
        let phi = row as f64 * PI / rows as f64;
        let s = radius * phi.sin();
        let z = radius * phi.cos();
        for col in 0..cols {
            let mut theta = col as f64 * 2.0 * PI / cols as f64;
            if offset {
                theta += PI / cols as f64 * row as f64;
            }
            grid.push(Point3::new(s * theta.cos(), s * theta.sin(), z));
        }
    }

    // Keep only the last vertex of the first ring and the first of the last.
    let vmin = cols - 1;
    let vertices: Vec<Point3<f64>> = grid[vmin..grid.len() - vmin].to_vec();
    let vmax = vertices.len() - 1;
    let remap = |i: usize| (i.max(vmin) - vmin).min(vmax);

    let mut faces = Vec::with_capacity(2 * cols * (rows - 1));
    for row in 0..rows {
        let ring = row * cols;
        let next = ring + cols;
        // Upper triangles of the first band and lower triangles of the last
        // band have zero area.
        if row > 0 {
            for col in 0..cols {
                let col1 = (col + 1) % cols;
                faces.push([ring + col1, ring + col, next + col].map(remap));
            }
        }
        if row + 1 < rows {
            for col in 0..cols {
                let col1 = (col + 1) % cols;
                faces.push([ring + col1, next + col, next + col1].map(remap));
            }
        }
    }

    Ok(TriMesh::from_parts_unchecked(vertices, faces))
}
