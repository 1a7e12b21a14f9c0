//! Robinson projection.
//!
//! A compromise pseudo-cylindrical projection defined by a table of
//! parallel lengths (X) and distances from the equator (Y) every 5° of
//! latitude. Between nodes the table is interpolated linearly, which keeps
//! the inverse exact:
//!
//! ```text
//! x = 0.8487 · R · X(φ) · λ
//! y = 1.3523 · R · Y(φ) · sign(φ)
//! ```

use std::f64::consts::PI;

use antipode_common::BoundingBox;

use crate::{crosses_meridian_seam, wrap_longitude, MapProjection, EARTH_RADIUS};

const FXC: f64 = 0.8487;
const FYC: f64 = 1.3523;
const NODE_SPACING_DEG: f64 = 5.0;

/// (X, Y) at 0°, 5°, ..., 90° latitude.
const TABLE: [(f64, f64); 19] = [
    (1.0000, 0.0000),
    (0.9986, 0.0620),
    (0.9954, 0.1240),
    (0.9900, 0.1860),
    (0.9822, 0.2480),
    (0.9730, 0.3100),
    (0.9600, 0.3720),
    (0.9427, 0.4340),
    (0.9216, 0.4958),
    (0.8962, 0.5571),
    (0.8679, 0.6176),
    (0.8350, 0.6769),
    (0.7986, 0.7346),
    (0.7597, 0.7903),
    (0.7186, 0.8435),
    (0.6732, 0.8936),
    (0.6213, 0.9394),
    (0.5722, 0.9761),
    (0.5322, 1.0000),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Robinson {
    /// Central meridian in degrees
    pub central_longitude: f64,
    /// Sphere radius in meters
    pub radius: f64,
}

impl Default for Robinson {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Robinson {
    pub fn new(central_longitude: f64) -> Self {
        Self {
            central_longitude,
            radius: EARTH_RADIUS,
        }
    }

    /// Half width of the map at the equator.
    pub fn max_x(&self) -> f64 {
        FXC * self.radius * PI
    }

    /// Half height of the map.
    pub fn max_y(&self) -> f64 {
        FYC * self.radius
    }

    /// Table values at |latitude| in degrees.
    fn table_at(abs_lat: f64) -> (f64, f64) {
        let pos = (abs_lat / NODE_SPACING_DEG).clamp(0.0, (TABLE.len() - 1) as f64);
        let i = (pos.floor() as usize).min(TABLE.len() - 2);
        let t = pos - i as f64;
        let (x0, y0) = TABLE[i];
        let (x1, y1) = TABLE[i + 1];
        (x0 + (x1 - x0) * t, y0 + (y1 - y0) * t)
    }

    /// |latitude| in degrees for a normalized Y in [0, 1].
    fn latitude_for(y_norm: f64) -> Option<f64> {
        if !(0.0..=1.0).contains(&y_norm) {
            return None;
        }
        let i = TABLE
            .windows(2)
            .position(|w| y_norm <= w[1].1)
            .unwrap_or(TABLE.len() - 2);
        let (_, y0) = TABLE[i];
        let (_, y1) = TABLE[i + 1];
        let t = (y_norm - y0) / (y1 - y0);
        Some((i as f64 + t) * NODE_SPACING_DEG)
    }
}

impl MapProjection for Robinson {
    fn name(&self) -> &'static str {
        "robinson"
    }

    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        let lambda = wrap_longitude(lon - self.central_longitude).to_radians();
        let (px, py) = Self::table_at(lat.abs());
        let x = FXC * self.radius * px * lambda;
        let y = FYC * self.radius * py * lat.signum();
        Some((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        let y_norm = y.abs() / (FYC * self.radius);
        let abs_lat = Self::latitude_for(y_norm)?;
        let (px, _) = Self::table_at(abs_lat);

        let lambda = x / (FXC * self.radius * px);
        if lambda.abs() > PI + 1e-12 {
            return None;
        }
        let lon = wrap_longitude(lambda.to_degrees() + self.central_longitude);
        Some((lon, abs_lat.copysign(y)))
    }

    fn extent(&self) -> BoundingBox {
        BoundingBox::new(-self.max_x(), -self.max_y(), self.max_x(), self.max_y())
    }

    fn boundary(&self, samples: usize) -> Vec<(f64, f64)> {
        let samples = samples.max(2);
        let mut ring = Vec::with_capacity(2 * samples + 1);
        // East edge south to north, then west edge north to south.
        for k in 0..samples {
            let lat = -90.0 + 180.0 * k as f64 / (samples - 1) as f64;
            let (px, py) = Self::table_at(lat.abs());
            ring.push((FXC * self.radius * px * PI, FYC * self.radius * py * lat.signum()));
        }
        for k in 0..samples {
            let lat = 90.0 - 180.0 * k as f64 / (samples - 1) as f64;
            let (px, py) = Self::table_at(lat.abs());
            ring.push((-FXC * self.radius * px * PI, FYC * self.radius * py * lat.signum()));
        }
        if let Some(&first) = ring.first() {
            ring.push(first);
        }
        ring
    }

    fn crosses_seam(&self, a: (f64, f64), b: (f64, f64)) -> bool {
        crosses_meridian_seam(self.central_longitude, a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin() {
        let proj = Robinson::default();
        let (x, y) = proj.forward(0.0, 0.0).unwrap();
        assert!(x.abs() < 1e-9 && y.abs() < 1e-9);
    }

    #[test]
    fn test_table_nodes() {
        assert_eq!(Robinson::table_at(0.0), (1.0, 0.0));
        let (x, y) = Robinson::table_at(90.0);
        assert!((x - 0.5322).abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
        let (x, y) = Robinson::table_at(42.5);
        assert!((x - 0.5 * (0.9216 + 0.8962)).abs() < 1e-12);
        assert!((y - 0.5 * (0.4958 + 0.5571)).abs() < 1e-12);
    }

    #[test]
    fn test_roundtrip() {
        let proj = Robinson::new(8.64);
        for &(lon, lat) in &[(-81.36, 41.15), (98.64, -41.15), (0.0, 89.0), (-170.0, -60.0)] {
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert!((lon - lon2).abs() < 1e-9, "lon {} vs {}", lon, lon2);
            assert!((lat - lat2).abs() < 1e-9, "lat {} vs {}", lat, lat2);
        }
    }

    #[test]
    fn test_outside_domain() {
        let proj = Robinson::default();
        assert!(proj.inverse(0.0, proj.max_y() * 1.01).is_none());
        // Corner of the bounding box is off the map.
        assert!(proj.inverse(proj.max_x() * 0.99, proj.max_y() * 0.99).is_none());
    }
}
