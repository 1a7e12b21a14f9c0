//! Synthetic data generators for antipode and decay tests.
//!
//! The generators are deterministic so tests can assert exact values.

/// Cell-centered global axes at `step` degree spacing.
///
/// Longitudes run west to east from `-180 + step/2`, latitudes south to
/// north from `-90 + step/2`.
///
/// ```
/// use test_utils::global_axes;
///
/// let (lons, lats) = global_axes(10.0);
/// assert_eq!(lons.len(), 36);
/// assert_eq!(lats.len(), 18);
/// assert_eq!(lons[0], -175.0);
/// assert_eq!(lats[17], 85.0);
/// ```
pub fn global_axes(step: f64) -> (Vec<f64>, Vec<f64>) {
    let nx = (360.0 / step).round() as usize;
    let ny = (180.0 / step).round() as usize;
    let lons = (0..nx).map(|i| -180.0 + step * (i as f64 + 0.5)).collect();
    let lats = (0..ny).map(|j| -90.0 + step * (j as f64 + 0.5)).collect();
    (lons, lats)
}

/// Axes with exactly `width` x `height` samples spread over the globe.
pub fn uniform_axes(width: usize, height: usize) -> (Vec<f64>, Vec<f64>) {
    let dx = 360.0 / width.max(1) as f64;
    let dy = 180.0 / height.max(1) as f64;
    let lons = (0..width).map(|i| -180.0 + dx * (i as f64 + 0.5)).collect();
    let lats = (0..height).map(|j| -90.0 + dy * (j as f64 + 0.5)).collect();
    (lons, lats)
}

/// Category codes cycling 1, 2, 3, 4 along each row, offset per row.
///
/// Cell `(row, col)` holds `1 + (row + col) % 4`.
pub fn category_codes(width: usize, height: usize) -> Vec<i32> {
    let mut codes = Vec::with_capacity(width * height);
    for row in 0..height {
        for col in 0..width {
            codes.push(1 + ((row + col) % 4) as i32);
        }
    }
    codes
}

/// A crude land mask: two rectangular "continents".
///
/// One spans 60°W to 0° and 0° to 60°N, the other 90°E to 150°E and 40°S to 0°.
pub fn is_synthetic_land(lon: f64, lat: f64) -> bool {
    let lon = ((lon + 180.0).rem_euclid(360.0)) - 180.0;
    ((-60.0..0.0).contains(&lon) && (0.0..60.0).contains(&lat))
        || ((90.0..150.0).contains(&lon) && (-40.0..0.0).contains(&lat))
}

/// Classification codes consistent with [`is_synthetic_land`].
///
/// Codes follow the dataset convention: 1 continent to ocean, 2 continent
/// to continent, 3 ocean to continent, 4 ocean to ocean.
/// Returns `(lons, lats, codes)`.
pub fn synthetic_classification(step: f64) -> (Vec<f64>, Vec<f64>, Vec<i32>) {
    let (lons, lats) = global_axes(step);
    let mut codes = Vec::with_capacity(lons.len() * lats.len());
    for &lat in &lats {
        for &lon in &lons {
            let anti_lon = if lon > 0.0 { lon - 180.0 } else { lon + 180.0 };
            let here = is_synthetic_land(lon, lat);
            let there = is_synthetic_land(anti_lon, -lat);
            let code = match (here, there) {
                (true, false) => 1,
                (true, true) => 2,
                (false, true) => 3,
                (false, false) => 4,
            };
            codes.push(code);
        }
    }
    (lons, lats, codes)
}

/// Solid RGBA pixel buffer.
pub fn create_solid_rgba_pixels(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
    rgba.iter()
        .copied()
        .cycle()
        .take(width * height * 4)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_axes_len() {
        let (lons, lats) = uniform_axes(7, 3);
        assert_eq!(lons.len(), 7);
        assert_eq!(lats.len(), 3);
        assert_eq!(lats[1], 0.0);
    }

    #[test]
    fn test_category_codes_cycle() {
        let codes = category_codes(4, 2);
        assert_eq!(codes, vec![1, 2, 3, 4, 2, 3, 4, 1]);
    }

    #[test]
    fn test_synthetic_classification_is_consistent() {
        let (lons, lats, codes) = synthetic_classification(10.0);
        assert_eq!(codes.len(), lons.len() * lats.len());
        assert!(codes.iter().all(|c| (1..=4).contains(c)));
        for code in 1..=4 {
            assert!(codes.contains(&code), "missing code {}", code);
        }
        // Most of the synthetic globe is ocean with an oceanic antipode.
        let ocean_ocean = codes.iter().filter(|&&c| c == 4).count();
        assert!(ocean_ocean > codes.len() / 2);
    }

    #[test]
    fn test_solid_pixels() {
        let px = create_solid_rgba_pixels(2, 2, [1, 2, 3, 4]);
        assert_eq!(px, vec![1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4, 1, 2, 3, 4]);
    }
}
