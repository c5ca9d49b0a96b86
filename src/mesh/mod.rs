//! Core mesh data structures.
//!
//! This module provides the face-vertex triangle mesh used throughout the
//! library and the sphere tessellation the globe is built from.
//!
//! # Overview
//!
//! The primary type is [`TriMesh`]: an ordered vertex array (a vertex's index
//! is its identity) and an ordered array of index triples. Construction
//! validates that every face index refers to an existing vertex, so
//! algorithms downstream can index freely.
//!
//! # Construction
//!
//! ```
//! use orbis::mesh::{latitude_sphere, SphereOptions, TriMesh};
//! use nalgebra::Point3;
//!
//! let vertices = vec![
//!     Point3::new(0.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//!     Point3::new(0.5, 1.0, 0.0),
//! ];
//! let mesh = TriMesh::new(vertices, vec![[0, 1, 2]]).unwrap();
//! assert_eq!(mesh.num_vertices(), 3);
//!
//! let globe = latitude_sphere(&SphereOptions::default()).unwrap();
//! assert_eq!(globe.num_faces(), 2 * 128 * 127);
//! ```

mod sphere;
mod trimesh;

pub use sphere::{latitude_sphere, SphereOptions};
pub use trimesh::{validate_faces, TriMesh};
