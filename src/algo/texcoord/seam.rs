//! Texture seam detection and repair.
//!
//! The projection's longitude wraps from `u = 1` back to `u = 0`. A triangle
//! straddling that line would interpolate across the whole texture width, so
//! its low-side corners are re-pointed at duplicates shifted to `u + 1`.

use nalgebra::{Point2, Point3};

use super::UVMap;

/// Corners with `u` below this value sit on the low side of the seam.
pub const SEAM_LOW_SIDE: f64 = 0.5;

/// Indices of faces whose `u` spread exceeds `threshold`, in face order.
///
/// # Example
///
/// ```
/// use orbis::algo::texcoord::{find_seam_faces, UVMap};
/// use nalgebra::Point2;
///
/// let uvs = UVMap::new(vec![
///     Point2::new(0.05, 0.5),
///     Point2::new(0.95, 0.5),
///     Point2::new(0.50, 0.6),
///     Point2::new(0.45, 0.6),
/// ]);
/// let faces = [[0, 1, 2], [2, 3, 1]];
/// assert_eq!(find_seam_faces(&faces, &uvs, 0.5), vec![0]);
/// ```
pub fn find_seam_faces(faces: &[[usize; 3]], uvs: &UVMap, threshold: f64) -> Vec<usize> {
    faces
        .iter()
        .enumerate()
        .filter(|(_, face)| uvs.face_u_spread(face) > threshold)
        .map(|(fi, _)| fi)
        .collect()
}

/// Output of [`repair_seams`].
pub(crate) struct SeamRepair {
    pub vertices: Vec<Point3<f64>>,
    pub faces: Vec<[usize; 3]>,
    pub uvs: UVMap,
    pub duplicated_from: Vec<usize>,
}

/// Duplicate the low-side corners of every seam face.
///
/// `uvs` must be the projection of `vertices`. Which corners are duplicated
/// is decided from those original coordinates only, so the outcome does not
/// depend on the order repairs are applied in. Duplicates are appended in
/// seam-face order, corner by corner, and are never shared between faces.
pub(crate) fn repair_seams(
    vertices: &[Point3<f64>],
    faces: &[[usize; 3]],
    uvs: &UVMap,
    seam_faces: &[usize],
) -> SeamRepair {
    let mut new_vertices = vertices.to_vec();
    let mut new_faces = faces.to_vec();
    let mut new_uvs = uvs.clone();
    let mut duplicated_from = Vec::new();

    for &fi in seam_faces {
        let face = faces[fi];
        for (corner, &vi) in face.iter().enumerate() {
            let uv = uvs.get(vi);
            if uv.x >= SEAM_LOW_SIDE {
                continue;
            }
            new_vertices.push(vertices[vi]);
            let dup = new_uvs.push(Point2::new(uv.x + 1.0, uv.y));
            duplicated_from.push(vi);
            new_faces[fi][corner] = dup;
            log::trace!("face {}: corner {} vertex {} -> duplicate {}", fi, corner, vi, dup);
        }
    }

    SeamRepair {
        vertices: new_vertices,
        faces: new_faces,
        uvs: new_uvs,
        duplicated_from,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_seam_faces_threshold_is_strict() {
        let uvs = UVMap::new(vec![
            Point2::new(0.25, 0.5),
            Point2::new(0.75, 0.5),
            Point2::new(0.5, 0.5),
        ]);
        // Spread of exactly 0.5 is not a seam
        assert!(find_seam_faces(&[[0, 1, 2]], &uvs, 0.5).is_empty());
        assert_eq!(find_seam_faces(&[[0, 1, 2]], &uvs, 0.49), vec![0]);
    }

    #[test]
    fn test_repair_shared_low_vertex_duplicated_per_face() {
        // Vertex 0 is on the low side of two seam faces.
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(0.0, -1.0, 0.0),
        ];
        let uvs = UVMap::new(vec![
            Point2::new(0.02, 0.5),
            Point2::new(0.97, 0.4),
            Point2::new(0.9, 0.5),
            Point2::new(0.98, 0.6),
        ]);
        let faces = vec![[0, 1, 2], [0, 2, 3]];

        let repair = repair_seams(&vertices, &faces, &uvs, &[0, 1]);

        assert_eq!(repair.vertices.len(), 6);
        assert_eq!(repair.duplicated_from, vec![0, 0]);
        assert_eq!(repair.faces, vec![[4, 1, 2], [5, 2, 3]]);
        for dup in [4, 5] {
            assert_eq!(repair.vertices[dup], vertices[0]);
            assert!((repair.uvs.get(dup).x - 1.02).abs() < 1e-12);
            assert_eq!(repair.uvs.get(dup).y, 0.5);
        }
    }

    #[test]
    fn test_repair_without_seams_is_identity() {
        let vertices = vec![
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
        ];
        let uvs = UVMap::new(vec![
            Point2::new(0.4, 0.5),
            Point2::new(0.45, 0.4),
            Point2::new(0.5, 0.5),
        ]);
        let faces = vec![[0, 1, 2]];

        let repair = repair_seams(&vertices, &faces, &uvs, &[]);
        assert_eq!(repair.vertices, vertices);
        assert_eq!(repair.faces, faces);
        assert_eq!(repair.uvs, uvs);
        assert!(repair.duplicated_from.is_empty());
    }
}
