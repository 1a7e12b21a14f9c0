//! Placement of a projected map inside a pixel rectangle.

use antipode_common::BoundingBox;
use projection::MapProjection;

/// Maps projected coordinates onto figure pixels with equal aspect.
///
/// The projection's extent is scaled to fit the target rectangle and
/// centered in it; pixel `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Panel {
    extent: BoundingBox,
    /// Pixels per projected unit
    scale: f64,
    /// Pixel position of the extent's top-left corner
    left: f64,
    top: f64,
}

impl Panel {
    pub fn fit(extent: BoundingBox, x: f64, y: f64, width: f64, height: f64) -> Self {
        let scale = if extent.width() > 0.0 && extent.height() > 0.0 {
            (width / extent.width()).min(height / extent.height())
        } else {
            1.0
        };
        let map_w = extent.width() * scale;
        let map_h = extent.height() * scale;
        Self {
            extent,
            scale,
            left: x + (width - map_w) / 2.0,
            top: y + (height - map_h) / 2.0,
        }
    }

    pub fn extent(&self) -> BoundingBox {
        self.extent
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Pixel rectangle actually covered by the map: `(x, y, width, height)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.left,
            self.top,
            self.extent.width() * self.scale,
            self.extent.height() * self.scale,
        )
    }

    pub fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        (
            (self.left + (x - self.extent.min_x) * self.scale) as f32,
            (self.top + (self.extent.max_y - y) * self.scale) as f32,
        )
    }

    pub fn to_projected(&self, px: f64, py: f64) -> (f64, f64) {
        (
            self.extent.min_x + (px - self.left) / self.scale,
            self.extent.max_y - (py - self.top) / self.scale,
        )
    }

    /// Geographic point to pixel, `None` where the projection hides it.
    pub fn project(&self, projection: &dyn MapProjection, lon: f64, lat: f64) -> Option<(f32, f32)> {
        let (x, y) = projection.forward(lon, lat)?;
        Some(self.to_pixel(x, y))
    }

    /// Project a geographic polyline, splitting it wherever a vertex is
    /// hidden or a segment crosses the projection seam.
    pub fn project_path(&self, projection: &dyn MapProjection, points: &[(f64, f64)]) -> Vec<Vec<(f32, f32)>> {
        let mut pieces = Vec::new();
        let mut current: Vec<(f32, f32)> = Vec::new();
        let mut previous: Option<(f64, f64)> = None;

        for &(lon, lat) in points {
            let projected = self.project(projection, lon, lat);
            let broken = match previous {
                Some(prev) => projection.crosses_seam(prev, (lon, lat)),
                None => false,
            };

            if broken || projected.is_none() {
                if current.len() > 1 {
                    pieces.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
            if let Some(p) = projected {
                current.push(p);
            }
            previous = Some((lon, lat));
        }
        if current.len() > 1 {
            pieces.push(current);
        }
        pieces
    }

    /// The projection's outline in pixels.
    pub fn outline(&self, projection: &dyn MapProjection, samples: usize) -> Vec<(f32, f32)> {
        projection
            .boundary(samples)
            .into_iter()
            .map(|(x, y)| self.to_pixel(x, y))
            .collect()
    }
}
