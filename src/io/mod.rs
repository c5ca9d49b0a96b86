//! Mesh file I/O.
//!
//! This module provides functions for loading meshes and saving textured
//! meshes in various formats.
//!
//! # Supported Formats
//!
//! | Format | Extension | Load | Save textured | Notes |
//! |--------|-----------|------|---------------|-------|
//! | Wavefront OBJ | `.obj` | ✓ | ✓ | `vt` records, optional MTL |
//! | STL | `.stl` | ✓ | ✗ | Binary and ASCII, no texture support |
//! | PLY | `.ply` | ✓ | ✓ | `s`/`t` vertex properties |
//! | glTF | `.gltf`, `.glb` | ✓ | ✗ | |
//!
//! # Usage
//!
//! ```no_run
//! use orbis::algo::texcoord::{generate_sphere_texcoords, TexcoordOptions};
//! use orbis::io::{load, save_textured};
//!
//! let mesh = load("globe.ply").unwrap();
//! let textured = generate_sphere_texcoords(&mesh, &TexcoordOptions::default()).unwrap();
//! save_textured(&textured, "globe.obj").unwrap();
//! ```

pub mod gltf;
pub mod obj;
pub mod ply;
pub mod stl;

use std::path::Path;

use crate::algo::texcoord::TexturedMesh;
use crate::error::{MeshError, Result};
use crate::mesh::TriMesh;

/// Supported mesh file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Wavefront OBJ format.
    Obj,
    /// STL (stereolithography) format.
    Stl,
    /// PLY (Stanford polygon) format.
    Ply,
    /// glTF format.
    Gltf,
    /// glTF binary format.
    Glb,
}

impl Format {
    /// Detect format from file extension.
    pub fn from_extension(ext: &str) -> Option<Format> {
        match ext.to_lowercase().as_str() {
            "obj" => Some(Format::Obj),
            "stl" => Some(Format::Stl),
            "ply" => Some(Format::Ply),
            "gltf" => Some(Format::Gltf),
            "glb" => Some(Format::Glb),
            _ => None,
        }
    }

    /// Detect format from file path.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Option<Format> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(Format::from_extension)
    }
}

fn detect(path: &Path) -> Result<Format> {
    Format::from_path(path).ok_or_else(|| MeshError::UnsupportedFormat {
        extension: path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("(none)")
            .to_string(),
    })
}

/// Load a mesh from a file with automatic format detection.
///
/// The format is determined by the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<TriMesh> {
    let path = path.as_ref();
    let mesh = match detect(path)? {
        Format::Obj => obj::load(path),
        Format::Stl => stl::load(path),
        Format::Ply => ply::load(path),
        Format::Gltf | Format::Glb => gltf::load(path),
    }?;
    log::debug!(
        "loaded {}: {} vertices, {} faces",
        path.display(),
        mesh.num_vertices(),
        mesh.num_faces()
    );
    Ok(mesh)
}

/// Save a textured mesh with automatic format detection.
///
/// OBJ output is written without a material; use [`obj::save_with_uvs`] to
/// reference an MTL file.
pub fn save_textured<P: AsRef<Path>>(textured: &TexturedMesh, path: P) -> Result<()> {
    let path = path.as_ref();
    match detect(path)? {
        Format::Obj => obj::save_with_uvs(textured, path, None),
        Format::Ply => ply::save_with_uvs(textured, path),
        Format::Stl | Format::Gltf | Format::Glb => Err(MeshError::SaveError {
            path: path.to_path_buf(),
            message: "format cannot store texture coordinates".to_string(),
        }),
    }
}
