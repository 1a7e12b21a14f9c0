//! Nearside (vertical) perspective projection.
//!
//! The globe is viewed from a point `satellite_height` meters above the
//! projection center. Points are rotated into a view frame where the center
//! lies on +z, then projected onto the tangent plane `z = 1` along rays from
//! the viewpoint at `z = P = 1 + h / R`.
//!
//! A point is visible when `cos c >= 1 / P`, where `c` is its angular distance
//! from the center. The visible disc has radius `R · sqrt((P - 1) / (P + 1))`.

use antipode_common::BoundingBox;
use nalgebra::{Matrix3, Rotation3, Vector3};

use crate::{wrap_longitude, MapProjection, ProjectionError, EARTH_RADIUS};

/// Default viewing height in meters (geostationary altitude).
pub const DEFAULT_SATELLITE_HEIGHT: f64 = 35_785_831.0;

#[derive(Debug, Clone)]
pub struct NearsidePerspective {
    /// Longitude of the projection center in degrees
    pub central_longitude: f64,
    /// Latitude of the projection center in degrees
    pub central_latitude: f64,
    /// Height of the viewpoint above the surface in meters
    pub satellite_height: f64,
    /// Sphere radius in meters
    pub radius: f64,
    /// Distance of the viewpoint from the globe center in radii
    p: f64,
    /// World frame to view frame
    rotation: Rotation3<f64>,
}

impl NearsidePerspective {
    pub fn new(
        central_longitude: f64,
        central_latitude: f64,
        satellite_height: f64,
    ) -> Result<Self, ProjectionError> {
        if !satellite_height.is_finite() || satellite_height <= 0.0 {
            return Err(ProjectionError::InvalidParameter {
                param: "satellite_height",
                message: format!("must be a positive number of meters, got {}", satellite_height),
            });
        }
        if !(-90.0..=90.0).contains(&central_latitude) {
            return Err(ProjectionError::InvalidParameter {
                param: "central_latitude",
                message: format!("must be within [-90, 90], got {}", central_latitude),
            });
        }

        let lam0 = central_longitude.to_radians();
        let phi1 = central_latitude.to_radians();

        let east = Vector3::new(-lam0.sin(), lam0.cos(), 0.0);
        let north = Vector3::new(
            -phi1.sin() * lam0.cos(),
            -phi1.sin() * lam0.sin(),
            phi1.cos(),
        );
        let up = Vector3::new(
            phi1.cos() * lam0.cos(),
            phi1.cos() * lam0.sin(),
            phi1.sin(),
        );
        let rotation = Rotation3::from_matrix_unchecked(Matrix3::from_rows(&[
            east.transpose(),
            north.transpose(),
            up.transpose(),
        ]));

        Ok(Self {
            central_longitude,
            central_latitude,
            satellite_height,
            radius: EARTH_RADIUS,
            p: 1.0 + satellite_height / EARTH_RADIUS,
            rotation,
        })
    }

    /// View centered on a point from the default height.
    pub fn centered_on(lon: f64, lat: f64) -> Result<Self, ProjectionError> {
        Self::new(lon, lat, DEFAULT_SATELLITE_HEIGHT)
    }

    /// Radius of the visible disc in projected meters.
    pub fn horizon_radius(&self) -> f64 {
        self.radius * ((self.p - 1.0) / (self.p + 1.0)).sqrt()
    }

    fn to_unit_vector(lon: f64, lat: f64) -> Vector3<f64> {
        let (lam, phi) = (lon.to_radians(), lat.to_radians());
        Vector3::new(phi.cos() * lam.cos(), phi.cos() * lam.sin(), phi.sin())
    }
}

impl MapProjection for NearsidePerspective {
    fn name(&self) -> &'static str {
        "nearside_perspective"
    }

    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        let v = self.rotation * Self::to_unit_vector(lon, lat);
        if v.z < 1.0 / self.p {
            return None;
        }
        let k = (self.p - 1.0) / (self.p - v.z);
        Some((self.radius * k * v.x, self.radius * k * v.y))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if x.hypot(y) > self.horizon_radius() {
            return None;
        }

        // Ray from the viewpoint through the tangent-plane point.
        let origin = Vector3::new(0.0, 0.0, self.p);
        let dir = Vector3::new(
            x / (self.radius * (self.p - 1.0)),
            y / (self.radius * (self.p - 1.0)),
            -1.0,
        );

        // |origin + t·dir|² = 1, nearest intersection.
        let a = dir.dot(&dir);
        let b = 2.0 * origin.dot(&dir);
        let c = origin.dot(&origin) - 1.0;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }
        let t = (-b - discriminant.sqrt()) / (2.0 * a);
        let hit = origin + dir * t;

        let world = self.rotation.inverse() * hit;
        let lat = world.z.clamp(-1.0, 1.0).asin().to_degrees();
        let lon = wrap_longitude(world.y.atan2(world.x).to_degrees());
        Some((lon, lat))
    }

    fn extent(&self) -> BoundingBox {
        let r = self.horizon_radius();
        BoundingBox::new(-r, -r, r, r)
    }

    fn boundary(&self, samples: usize) -> Vec<(f64, f64)> {
        let samples = samples.max(8);
        let r = self.horizon_radius();
        (0..=samples)
            .map(|k| {
                let theta = std::f64::consts::TAU * k as f64 / samples as f64;
                (r * theta.cos(), r * theta.sin())
            })
            .collect()
    }
}
