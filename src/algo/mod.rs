//! Mesh processing algorithms.
//!
//! - **Texture coordinates**: equirectangular sphere mapping with seam repair
//!   ([`texcoord`])

pub mod texcoord;
