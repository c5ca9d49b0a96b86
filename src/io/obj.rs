//! Wavefront OBJ format support.
//!
//! Loading reads `v` and `f` records (faces may use the `v`, `v/vt`, `v//vn`
//! and `v/vt/vn` forms, with negative indices counting back from the end).
//! Polygons are fan-triangulated. Saving writes positions, texture
//! coordinates and `f a/a b/b c/c` faces so every corner samples the
//! coordinate of its own vertex.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use nalgebra::Point3;

use crate::algo::texcoord::TexturedMesh;
use crate::error::{MeshError, Result};
use crate::mesh::TriMesh;

/// Name of the material written by [`save_with_uvs`] and [`write_mtl`].
pub const MATERIAL_NAME: &str = "globe";

/// Load a mesh from an OBJ file.
///
/// # Example
///
/// ```no_run
/// use orbis::io::obj;
///
/// let mesh = obj::load("model.obj").unwrap();
/// ```
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let mut vertices: Vec<Point3<f64>> = Vec::new();
    let mut faces: Vec<[usize; 3]> = Vec::new();

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        let mut tokens = line.split_whitespace();
        match tokens.next() {
            Some("v") => {
                let coords: Vec<f64> = tokens
                    .take(3)
                    .map(|t| t.parse::<f64>())
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|e| MeshError::load(path, format!("line {}: {}", line_no + 1, e)))?;
                if coords.len() != 3 {
                    return Err(MeshError::load(
                        path,
                        format!("line {}: vertex needs 3 coordinates", line_no + 1),
                    ));
                }
                vertices.push(Point3::new(coords[0], coords[1], coords[2]));
            }
            Some("f") => {
                let indices = tokens
                    .map(|t| parse_face_index(t, vertices.len()))
                    .collect::<Option<Vec<usize>>>()
                    .ok_or_else(|| {
                        MeshError::load(path, format!("line {}: invalid face index", line_no + 1))
                    })?;
                if indices.len() < 3 {
                    return Err(MeshError::load(
                        path,
                        format!("line {}: face needs at least 3 vertices", line_no + 1),
                    ));
                }
                // Triangulate polygon by fan triangulation
                for i in 1..indices.len() - 1 {
                    faces.push([indices[0], indices[i], indices[i + 1]]);
                }
            }
            _ => {}
        }
    }

    if faces.is_empty() {
        return Err(MeshError::load(path, "OBJ file contains no faces"));
    }

    TriMesh::new(vertices, faces).map_err(|e| MeshError::load(path, e.to_string()))
}

/// Parse the vertex part of a face corner (`7`, `7/2`, `7//3`, `-1/...`).
fn parse_face_index(token: &str, num_vertices: usize) -> Option<usize> {
    let raw: i64 = token.split('/').next()?.parse().ok()?;
    if raw > 0 {
        Some(raw as usize - 1)
    } else if raw < 0 {
        num_vertices.checked_sub(raw.unsigned_abs() as usize)
    } else {
        None
    }
}

/// Save a textured mesh to an OBJ file.
///
/// When `mtl_file` is given, the OBJ references it with `mtllib` and uses
/// [`MATERIAL_NAME`]; write the MTL itself with [`write_mtl`].
pub fn save_with_uvs<P: AsRef<Path>>(
    textured: &TexturedMesh,
    path: P,
    mtl_file: Option<&str>,
) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    let mesh = textured.mesh();

    writeln!(writer, "# Generated by orbis")?;
    if let Some(mtl) = mtl_file {
        writeln!(writer, "mtllib {}", mtl)?;
    }

    for v in mesh.vertices() {
        writeln!(writer, "v {} {} {}", v.x, v.y, v.z)?;
    }
    for (_, uv) in textured.uvs().iter() {
        writeln!(writer, "vt {} {}", uv.x, uv.y)?;
    }

    if mtl_file.is_some() {
        writeln!(writer, "usemtl {}", MATERIAL_NAME)?;
    }
    for f in mesh.faces() {
        let [a, b, c] = f.map(|i| i + 1);
        writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?;
    }

    writer.flush()?;
    Ok(())
}

/// Write a single-material MTL file whose diffuse map is `texture`.
pub fn write_mtl<P: AsRef<Path>>(path: P, texture: &str) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);

    writeln!(writer, "# Generated by orbis")?;
    writeln!(writer, "newmtl {}", MATERIAL_NAME)?;
    writeln!(writer, "Ka 1.0 1.0 1.0")?;
    writeln!(writer, "Kd 1.0 1.0 1.0")?;
    writeln!(writer, "Ks 0.0 0.0 0.0")?;
    writeln!(writer, "illum 1")?;
    writeln!(writer, "map_Kd {}", texture)?;

    writer.flush()?;
    Ok(())
}
