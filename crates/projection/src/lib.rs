//! Map projections for global antipode maps.
//!
//! Implements the projections from scratch on a spherical Earth:
//! - [`PlateCarree`]: the geographic input CRS of the classification mesh
//! - [`Robinson`]: pseudo-cylindrical whole-world map
//! - [`NearsidePerspective`]: the globe as seen from a point in space
//!
//! Projected coordinates are meters on a sphere of radius [`EARTH_RADIUS`],
//! except for Plate Carrée which stays in degrees.

pub mod nearside;
pub mod plate_carree;
pub mod robinson;

use antipode_common::BoundingBox;
use thiserror::Error;

pub use nearside::NearsidePerspective;
pub use plate_carree::PlateCarree;
pub use robinson::Robinson;

/// Sphere radius used by every projection (WGS84 semi-major axis).
pub const EARTH_RADIUS: f64 = 6_378_137.0;

#[derive(Debug, Error)]
pub enum ProjectionError {
    #[error("Invalid projection parameter '{param}': {message}")]
    InvalidParameter { param: &'static str, message: String },
}

/// A map projection between geographic degrees and a flat plane.
pub trait MapProjection: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Geographic `(lon, lat)` to projected `(x, y)`.
    ///
    /// `None` when the point is not visible (e.g. the far side of the globe).
    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)>;

    /// Projected `(x, y)` to geographic `(lon, lat)`.
    ///
    /// `None` outside the projection's domain.
    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)>;

    /// Projected extent of the whole map.
    fn extent(&self) -> BoundingBox;

    /// Closed outline of the map domain in projected coordinates.
    fn boundary(&self, samples: usize) -> Vec<(f64, f64)>;

    fn contains(&self, x: f64, y: f64) -> bool {
        self.inverse(x, y).is_some()
    }

    /// True when a straight segment between two geographic points would
    /// cross the map seam and must not be drawn as one line.
    fn crosses_seam(&self, _a: (f64, f64), _b: (f64, f64)) -> bool {
        false
    }
}

/// Wrap a longitude difference into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Seam test shared by the cylindrical projections.
pub(crate) fn crosses_meridian_seam(central_longitude: f64, a: (f64, f64), b: (f64, f64)) -> bool {
    let la = wrap_longitude(a.0 - central_longitude);
    let lb = wrap_longitude(b.0 - central_longitude);
    (la - lb).abs() > 180.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
        assert_eq!(wrap_longitude(180.0), -180.0);
    }

    #[test]
    fn test_seam_crossing() {
        assert!(crosses_meridian_seam(0.0, (179.0, 0.0), (-179.0, 0.0)));
        assert!(!crosses_meridian_seam(0.0, (10.0, 0.0), (-10.0, 0.0)));
        assert!(!crosses_meridian_seam(180.0, (179.0, 0.0), (-179.0, 0.0)));
    }
}
