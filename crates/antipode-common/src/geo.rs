//! Geographic points and the antipode transform.
//!
//! The antipode keeps the branch convention used by the published maps:
//! positive longitudes shift west by 180°, everything else (including 0°)
//! shifts east. The result is not normalized, so longitude 0 maps to 180
//! and a round trip starting from -180 ends at 180.

use serde::{Deserialize, Serialize};

use crate::error::{AntipodeError, AntipodeResult};

/// Default reference latitude (north-east Ohio).
pub const DEFAULT_LATITUDE: f64 = 41.15;

/// Default reference longitude (north-east Ohio).
pub const DEFAULT_LONGITUDE: f64 = -81.36;

/// A point on the globe in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    /// Create a point, rejecting coordinates outside [-90, 90] x [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> AntipodeResult<Self> {
        check_range("latitude", latitude, -90.0, 90.0)?;
        check_range("longitude", longitude, -180.0, 180.0)?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a point without range checks.
    pub const fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// The antipodal point. See [`compute_antipode`].
    pub fn antipode(&self) -> GeoPoint {
        compute_antipode(*self)
    }

    /// Legend label in the form `"-81.4 E, 41.2 N"`.
    ///
    /// Each coordinate is rounded to one decimal with ties to even, applied
    /// to the value times ten.
    pub fn label(&self) -> String {
        format!("{:.1} E, {:.1} N", round_tenth(self.longitude), round_tenth(self.latitude))
    }
}

impl Default for GeoPoint {
    fn default() -> Self {
        Self::new_unchecked(DEFAULT_LATITUDE, DEFAULT_LONGITUDE)
    }
}

fn check_range(axis: &'static str, value: f64, min: f64, max: f64) -> AntipodeResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(AntipodeError::InvalidCoordinate {
            axis,
            value,
            min,
            max,
        })
    }
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}

/// Compute the antipode of `point`.
///
/// Latitude is negated. Longitude is `lon - 180` when `lon > 0`, otherwise
/// `lon + 180`.
pub fn compute_antipode(point: GeoPoint) -> GeoPoint {
    let longitude = if point.longitude > 0.0 {
        point.longitude - 180.0
    } else {
        point.longitude + 180.0
    };

    GeoPoint {
        latitude: -point.latitude,
        longitude,
    }
}

/// Central meridian for a single-panel global map.
///
/// With `recenter` the map is centered halfway between the point and its
/// antipode, otherwise on the prime meridian. No wrap-around correction is
/// applied.
pub fn central_longitude(point: GeoPoint, recenter: bool) -> f64 {
    if recenter {
        0.5 * (point.longitude + compute_antipode(point).longitude)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_point() {
        let p = GeoPoint::default();
        assert_eq!(p.latitude, 41.15);
        assert_eq!(p.longitude, -81.36);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(GeoPoint::new(90.5, 0.0).is_err());
        assert!(GeoPoint::new(0.0, -180.1).is_err());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_err());
        assert!(GeoPoint::new(-90.0, 180.0).is_ok());
    }

    #[test]
    fn test_label() {
        let p = GeoPoint::new_unchecked(51.8, 0.9);
        assert_eq!(p.label(), "0.9 E, 51.8 N");
    }

    #[test]
    fn test_label_rounds_ties_to_even() {
        assert_eq!(GeoPoint::default().label(), "-81.4 E, 41.2 N");
        assert_eq!(GeoPoint::new_unchecked(0.25, -0.25).label(), "-0.2 E, 0.2 N");
        assert_eq!(GeoPoint::new_unchecked(-10.0, 20.0).label(), "20.0 E, -10.0 N");
    }

    #[test]
    fn test_zero_longitude_takes_else_branch() {
        let a = compute_antipode(GeoPoint::new_unchecked(10.0, 0.0));
        assert_eq!(a.longitude, 180.0);
        assert_eq!(a.latitude, -10.0);
    }
}
