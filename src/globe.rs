//! Globe placement: latitude/longitude markers on the textured sphere.
//!
//! Marker positions use the same axis convention as
//! [`equirectangular_uv`], so a marker lands on the texel of its own
//! coordinates:
//!
//! - `x = r·cos(lat)·(−cos(lon))`
//! - `y = −r·sin(lat)`
//! - `z = r·cos(lat)·(−sin(lon))`
//!
//! Both the sphere and its markers are displayed under the same fixed
//! [`globe_orientation`].
//!
//! # Example
//!
//! ```
//! use orbis::globe::{Globe, GlobeOptions, GeoPoint};
//! use orbis::mesh::SphereOptions;
//!
//! let options = GlobeOptions::default().with_sphere(SphereOptions::new(32, 64));
//! let globe = Globe::build(&options).unwrap();
//!
//! let paris = GeoPoint::new(48.8566, 2.3522).unwrap();
//! let marker = globe.marker_position(&paris);
//! assert!((marker.coords.norm() - 1.008).abs() < 1e-12);
//! ```

use nalgebra::{Point2, Point3, Rotation3, Vector3};

use crate::algo::texcoord::{equirectangular_uv, generate_sphere_texcoords, TexcoordOptions, TexturedMesh};
use crate::error::{MeshError, Result};
use crate::mesh::{latitude_sphere, SphereOptions};

/// Radius markers are placed at, just above the unit globe.
pub const MARKER_RADIUS: f64 = 1.008;

/// A geographic location in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude: f64,
    /// Longitude in degrees, positive east.
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, checking that it lies on the globe.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !latitude.is_finite() || latitude.abs() > 90.0 {
            return Err(MeshError::invalid_param(
                "latitude",
                latitude,
                "must be within [-90, 90] degrees",
            ));
        }
        if !longitude.is_finite() || longitude.abs() > 180.0 {
            return Err(MeshError::invalid_param(
                "longitude",
                longitude,
                "must be within [-180, 180] degrees",
            ));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }
}

/// Cartesian position of a geographic point on a sphere of radius `radius`.
pub fn geo_to_cartesian(point: &GeoPoint, radius: f64) -> Point3<f64> {
    let lat = point.latitude.to_radians();
    let lon = point.longitude.to_radians();
    Point3::new(
        radius * lat.cos() * -lon.cos(),
        -radius * lat.sin(),
        radius * lat.cos() * -lon.sin(),
    )
}

/// Geographic point under a texture coordinate.
///
/// Duplicated seam coordinates (`u > 1`) wrap back onto the texture. The
/// result is clamped to valid latitude/longitude ranges.
pub fn texcoord_to_geo(uv: &Point2<f64>) -> GeoPoint {
    let u = if uv.x > 1.0 { uv.x - 1.0 } else { uv.x };
    GeoPoint {
        latitude: ((uv.y - 0.5) * 180.0).clamp(-90.0, 90.0),
        longitude: ((u - 0.5) * 360.0).clamp(-180.0, 180.0),
    }
}

/// Texture coordinate under a geographic point.
pub fn geo_to_texcoord(point: &GeoPoint) -> Point2<f64> {
    equirectangular_uv(&geo_to_cartesian(point, 1.0))
}

/// Display rotation shared by the globe mesh and its markers: 270° about
/// `x`, followed by 90° about `z`.
pub fn globe_orientation() -> Rotation3<f64> {
    let about_x = Rotation3::from_axis_angle(&Vector3::x_axis(), 270f64.to_radians());
    let about_z = Rotation3::from_axis_angle(&Vector3::z_axis(), 90f64.to_radians());
    about_z * about_x
}

/// Options for [`Globe::build`].
#[derive(Debug, Clone, Default)]
pub struct GlobeOptions {
    /// Sphere tessellation.
    pub sphere: SphereOptions,
    /// Texture coordinate generation.
    pub texcoords: TexcoordOptions,
}

impl GlobeOptions {
    /// Set the sphere tessellation options.
    pub fn with_sphere(mut self, sphere: SphereOptions) -> Self {
        self.sphere = sphere;
        self
    }

    /// Set the texture coordinate options.
    pub fn with_texcoords(mut self, texcoords: TexcoordOptions) -> Self {
        self.texcoords = texcoords;
        self
    }
}

/// A textured sphere ready to be handed to a renderer, with its orientation.
#[derive(Debug, Clone)]
pub struct Globe {
    textured: TexturedMesh,
    orientation: Rotation3<f64>,
    radius: f64,
}

impl Globe {
    /// Tessellate and texture a globe.
    pub fn build(options: &GlobeOptions) -> Result<Self> {
        let sphere = latitude_sphere(&options.sphere)?;
        let textured = generate_sphere_texcoords(&sphere, &options.texcoords)?;
        log::debug!(
            "globe: {} vertices, {} faces",
            textured.mesh().num_vertices(),
            textured.mesh().num_faces()
        );
        Ok(Self {
            textured,
            orientation: globe_orientation(),
            radius: options.sphere.radius,
        })
    }

    /// The textured sphere mesh in model space.
    pub fn textured(&self) -> &TexturedMesh {
        &self.textured
    }

    /// Model-to-world rotation.
    pub fn orientation(&self) -> &Rotation3<f64> {
        &self.orientation
    }

    /// Marker position in model space.
    pub fn marker_position(&self, point: &GeoPoint) -> Point3<f64> {
        geo_to_cartesian(point, MARKER_RADIUS * self.radius)
    }

    /// Marker position in world space.
    pub fn world_marker_position(&self, point: &GeoPoint) -> Point3<f64> {
        self.orientation * self.marker_position(point)
    }

    /// Vertex nearest to the marker, by model-space distance.
    pub fn nearest_vertex(&self, point: &GeoPoint) -> Option<usize> {
        let target = geo_to_cartesian(point, self.radius);
        self.textured
            .mesh()
            .vertices()
            .iter()
            .map(|p| (p - target).norm_squared())
            .enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| i)
    }
}
