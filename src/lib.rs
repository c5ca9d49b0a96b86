//! # Orbis
//!
//! Geometry for a textured globe: a latitude/longitude sphere, equirectangular
//! texture coordinates that wrap a world map around it without a seam, and
//! location markers placed in the same frame.
//!
//! ## Features
//!
//! - **Sphere tessellation**: latitude-ring sphere with collapsed poles
//! - **Seam-free texture coordinates**: faces crossing the longitude wrap get
//!   duplicated low-side vertices shifted to `u + 1`
//! - **Markers**: latitude/longitude to model and world space
//! - **File formats**: load OBJ, STL, PLY, glTF; save textured OBJ (+MTL) and PLY
//!
//! ## Quick Start
//!
//! ```
//! use orbis::prelude::*;
//!
//! // Tessellate and texture the globe
//! let sphere = latitude_sphere(&SphereOptions::new(32, 64)).unwrap();
//! let textured = generate_sphere_texcoords(&sphere, &TexcoordOptions::default()).unwrap();
//!
//! assert_eq!(textured.mesh().num_faces(), sphere.num_faces());
//! println!(
//!     "{} seam faces, {} duplicated vertices",
//!     textured.seam_faces().len(),
//!     textured.duplicated_from().len()
//! );
//!
//! // Hand the arrays to a renderer
//! let (vertices, faces, texcoords) = textured.into_parts();
//! assert_eq!(vertices.len(), texcoords.len());
//! # let _ = faces;
//! ```
//!
//! ## Working With Raw Arrays
//!
//! ```
//! use orbis::prelude::*;
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.951, 0.0, 0.309),  // u ≈ 0.05
//!     Point3::new(0.951, 0.0, -0.309), // u ≈ 0.95
//!     Point3::new(-1.0, 0.0, 0.0),     // u = 0.5
//! ];
//! let faces = vec![[0, 1, 2]];
//!
//! let textured = generate_texcoords(&vertices, &faces, &TexcoordOptions::default()).unwrap();
//! assert_eq!(textured.seam_faces(), &[0]);
//! assert_eq!(textured.mesh().faces(), &[[3, 1, 2]]);
//! assert!(textured.uvs().get(3).x > 1.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod error;
pub mod globe;
pub mod io;
pub mod mesh;

/// Prelude module for convenient imports.
///
/// This module re-exports the most commonly used types and functions:
///
/// ```
/// use orbis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::algo::texcoord::{
        equirectangular_uv, generate_sphere_texcoords, generate_texcoords, TexcoordOptions,
        TexturedMesh, UVMap,
    };
    pub use crate::error::{MeshError, Result};
    pub use crate::globe::{GeoPoint, Globe, GlobeOptions};
    pub use crate::mesh::{latitude_sphere, SphereOptions, TriMesh};
}

// Re-export nalgebra types for convenience
pub use nalgebra;
