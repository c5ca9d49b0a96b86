//! Equirectangular (longitude/latitude) projection of sphere vertices.

use std::f64::consts::PI;

use nalgebra::{Point2, Point3};
use rayon::prelude::*;

use super::UVMap;

/// Project a point onto equirectangular texture space.
///
/// The point is normalized to the unit sphere first; longitude is measured in
/// the `xz` plane and latitude along `y`:
///
/// - `u = 0.5 + atan2(-z, -x) / 2π`
/// - `v = 0.5 - asin(y) / π`
///
/// A point at the origin has no direction and maps to the texture center
/// `(0.5, 0.5)`.
///
/// # Example
///
/// ```
/// use orbis::algo::texcoord::equirectangular_uv;
/// use nalgebra::Point3;
///
/// let uv = equirectangular_uv(&Point3::new(-1.0, 0.0, 0.0));
/// assert!((uv.x - 0.5).abs() < 1e-12);
/// assert!((uv.y - 0.5).abs() < 1e-12);
///
/// // North of the equator is the lower half of the texture (v < 0.5).
/// let uv = equirectangular_uv(&Point3::new(0.0, 2.0, 0.0));
/// assert!(uv.y.abs() < 1e-12);
/// ```
pub fn equirectangular_uv(p: &Point3<f64>) -> Point2<f64> {
    let r = p.coords.norm();
    if r == 0.0 {
        return Point2::new(0.5, 0.5);
    }
    let n = p.coords / r;

    let u = 0.5 + (-n.z).atan2(-n.x) / (2.0 * PI);
    // Rounding can push |y| a hair past 1 for points on the pole.
    let v = 0.5 - n.y.clamp(-1.0, 1.0).asin() / PI;
    Point2::new(u, v)
}

/// Project every vertex, in parallel when requested.
pub(crate) fn project_vertices(vertices: &[Point3<f64>], parallel: bool) -> UVMap {
    let coords: Vec<Point2<f64>> = if parallel {
        vertices.par_iter().map(equirectangular_uv).collect()
    } else {
        vertices.iter().map(equirectangular_uv).collect()
    };
    UVMap::new(coords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_vertex() {
        let uv = equirectangular_uv(&Point3::origin());
        assert_eq!(uv, Point2::new(0.5, 0.5));
        assert!(uv.x.is_finite() && uv.y.is_finite());
    }

    #[test]
    fn test_cardinal_directions() {
        // Longitude is undefined on the poles
        let cases = [
            (Point3::new(-1.0, 0.0, 0.0), Some(0.5), 0.5),
            (Point3::new(0.0, 0.0, -1.0), Some(0.75), 0.5),
            (Point3::new(0.0, 0.0, 1.0), Some(0.25), 0.5),
            (Point3::new(0.0, 1.0, 0.0), None, 0.0),
            (Point3::new(0.0, -1.0, 0.0), None, 1.0),
        ];

        for (p, u, v) in cases {
            let uv = equirectangular_uv(&p);
            if let Some(u) = u {
                assert!((uv.x - u).abs() < 1e-12, "u for {:?}: {} != {}", p, uv.x, u);
            }
            assert!((uv.y - v).abs() < 1e-12, "v for {:?}: {} != {}", p, uv.y, v);
        }
    }

    #[test]
    fn test_scale_invariant() {
        let p = Point3::new(0.3, -0.4, 0.7);
        let a = equirectangular_uv(&p);
        let b = equirectangular_uv(&Point3::from(p.coords * 17.5));
        assert!((a - b).norm() < 1e-12);
    }

    #[test]
    fn test_range() {
        for i in 0..100 {
            let t = i as f64 * 0.37;
            let p = Point3::new(t.cos() * (t * 0.5).sin(), (t * 1.3).cos(), t.sin());
            let uv = equirectangular_uv(&p);
            assert!((0.0..=1.0).contains(&uv.x));
            assert!((0.0..=1.0).contains(&uv.y));
        }
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let vertices: Vec<Point3<f64>> = (0..500)
            .map(|i| {
                let t = i as f64 * 0.1;
                Point3::new(t.sin(), (t * 0.7).cos(), (t * 1.9).sin())
            })
            .collect();

        assert_eq!(project_vertices(&vertices, true), project_vertices(&vertices, false));
    }
}
