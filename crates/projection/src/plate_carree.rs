//! Plate Carrée (equirectangular) projection in degrees.

use antipode_common::BoundingBox;

use crate::{crosses_meridian_seam, wrap_longitude, MapProjection};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PlateCarree {
    /// Central meridian in degrees
    pub central_longitude: f64,
}

impl PlateCarree {
    pub fn new(central_longitude: f64) -> Self {
        Self { central_longitude }
    }
}

impl MapProjection for PlateCarree {
    fn name(&self) -> &'static str {
        "plate_carree"
    }

    fn forward(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !lon.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return None;
        }
        Some((wrap_longitude(lon - self.central_longitude), lat))
    }

    fn inverse(&self, x: f64, y: f64) -> Option<(f64, f64)> {
        if !(-180.0..=180.0).contains(&x) || !(-90.0..=90.0).contains(&y) {
            return None;
        }
        Some((wrap_longitude(x + self.central_longitude), y))
    }

    fn extent(&self) -> BoundingBox {
        BoundingBox::global()
    }

    fn boundary(&self, _samples: usize) -> Vec<(f64, f64)> {
        vec![
            (-180.0, -90.0),
            (180.0, -90.0),
            (180.0, 90.0),
            (-180.0, 90.0),
            (-180.0, -90.0),
        ]
    }

    fn crosses_seam(&self, a: (f64, f64), b: (f64, f64)) -> bool {
        crosses_meridian_seam(self.central_longitude, a, b)
    }
}
