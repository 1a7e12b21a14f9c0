//! Classification and display grids.
//!
//! Both grids are stored row-major with one row per latitude sample and one
//! column per longitude sample, the layout produced by
//! `meshgrid(longitudes, latitudes)`.

use serde::Serialize;

use crate::category::{AntipodeCategory, DisplayMode};
use crate::error::{AntipodeError, AntipodeResult};
use crate::BoundingBox;

const AXIS_EPSILON: f64 = 1e-9;

/// The two coordinate axes of a grid, in dataset order.
#[derive(Debug, Clone, PartialEq)]
pub struct GridAxes {
    longitudes: Vec<f64>,
    latitudes: Vec<f64>,
}

impl GridAxes {
    pub fn new(longitudes: Vec<f64>, latitudes: Vec<f64>) -> AntipodeResult<Self> {
        if longitudes.is_empty() {
            return Err(AntipodeError::EmptyAxis("longitude"));
        }
        if latitudes.is_empty() {
            return Err(AntipodeError::EmptyAxis("latitude"));
        }
        Ok(Self {
            longitudes,
            latitudes,
        })
    }

    pub fn longitudes(&self) -> &[f64] {
        &self.longitudes
    }

    pub fn latitudes(&self) -> &[f64] {
        &self.latitudes
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.longitudes.len()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.latitudes.len()
    }

    /// Extent covered by the sample centers.
    pub fn bbox(&self) -> BoundingBox {
        let (min_x, max_x) = min_max(&self.longitudes);
        let (min_y, max_y) = min_max(&self.latitudes);
        BoundingBox::new(min_x, min_y, max_x, max_y)
    }

    /// True when the longitude axis covers the full circle, so the first and
    /// last columns are neighbours across the seam.
    pub fn wraps_longitude(&self) -> bool {
        let n = self.longitudes.len();
        if n < 2 {
            return false;
        }
        let step = (self.longitudes[1] - self.longitudes[0]).abs();
        let (min, max) = min_max(&self.longitudes);
        max - min + step >= 360.0 - 1e-6
    }

    /// Row and column of the cell whose center is nearest to `(lon, lat)`.
    ///
    /// Returns `None` when the point falls more than half a cell outside the
    /// grid. Longitudes wrap for global grids.
    pub fn nearest_index(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        let row = nearest_on_axis(&self.latitudes, lat)?;
        let col = self.nearest_longitude(lon)?;
        Some((row, col))
    }

    fn nearest_longitude(&self, lon: f64) -> Option<usize> {
        if !self.wraps_longitude() {
            return nearest_on_axis(&self.longitudes, lon);
        }
        if !lon.is_finite() {
            return None;
        }

        let n = self.longitudes.len();
        let ascending = self.longitudes[n - 1] >= self.longitudes[0];
        let (min, max) = min_max(&self.longitudes);
        let (min_idx, max_idx) = if ascending { (0, n - 1) } else { (n - 1, 0) };

        let wrapped = min + (lon - min).rem_euclid(360.0);
        match nearest_on_axis(&self.longitudes, wrapped) {
            Some(idx) => Some(idx),
            // In the seam between the last column and the first one + 360.
            None if wrapped - max <= min + 360.0 - wrapped => Some(max_idx),
            None => Some(min_idx),
        }
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
}

/// Nearest sample on a monotonic axis, either ascending or descending.
fn nearest_on_axis(axis: &[f64], value: f64) -> Option<usize> {
    let n = axis.len();
    if n == 0 || !value.is_finite() {
        return None;
    }
    if n == 1 {
        return Some(0);
    }

    let ascending = axis[n - 1] >= axis[0];
    let idx = if ascending {
        axis.partition_point(|&a| a < value)
    } else {
        axis.partition_point(|&a| a > value)
    };

    let best = if idx == 0 {
        0
    } else if idx >= n {
        n - 1
    } else if (axis[idx] - value).abs() < (axis[idx - 1] - value).abs() {
        idx
    } else {
        idx - 1
    };

    let half_step = if best == 0 {
        0.5 * (axis[1] - axis[0]).abs()
    } else if best == n - 1 {
        0.5 * (axis[n - 1] - axis[n - 2]).abs()
    } else {
        f64::INFINITY
    };

    if (axis[best] - value).abs() > half_step + AXIS_EPSILON {
        None
    } else {
        Some(best)
    }
}

/// Per-category cell counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryCounts {
    pub continent_to_ocean: usize,
    pub continent_to_continent: usize,
    pub ocean_to_continent: usize,
    pub ocean_to_ocean: usize,
    /// Cells with a code outside 1..=4 (fill values and the like).
    pub other: usize,
}

impl CategoryCounts {
    pub fn total(&self) -> usize {
        self.continent_to_ocean
            + self.continent_to_continent
            + self.ocean_to_continent
            + self.ocean_to_ocean
            + self.other
    }
}

/// Antipode classification grid loaded from the external dataset.
///
/// Read-only once constructed; render calls borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationGrid {
    axes: GridAxes,
    values: Vec<i32>,
}

impl ClassificationGrid {
    /// Build a grid from its axes and row-major category codes.
    pub fn new(longitudes: Vec<f64>, latitudes: Vec<f64>, values: Vec<i32>) -> AntipodeResult<Self> {
        let axes = GridAxes::new(longitudes, latitudes)?;
        Self::from_axes(axes, values)
    }

    pub fn from_axes(axes: GridAxes, values: Vec<i32>) -> AntipodeResult<Self> {
        let expected = axes.width() * axes.height();
        if values.len() != expected {
            return Err(AntipodeError::ShapeMismatch {
                width: axes.width(),
                height: axes.height(),
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { axes, values })
    }

    pub fn axes(&self) -> &GridAxes {
        &self.axes
    }

    pub fn longitudes(&self) -> &[f64] {
        self.axes.longitudes()
    }

    pub fn latitudes(&self) -> &[f64] {
        self.axes.latitudes()
    }

    pub fn width(&self) -> usize {
        self.axes.width()
    }

    pub fn height(&self) -> usize {
        self.axes.height()
    }

    pub fn values(&self) -> &[i32] {
        &self.values
    }

    pub fn bbox(&self) -> BoundingBox {
        self.axes.bbox()
    }

    /// Raw category code at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.values.get(row * self.width() + col).copied()
    }

    /// Category of the cell nearest to `(lon, lat)`.
    pub fn category_at(&self, lon: f64, lat: f64) -> Option<AntipodeCategory> {
        let (row, col) = self.axes.nearest_index(lon, lat)?;
        self.get(row, col).and_then(AntipodeCategory::from_code)
    }

    pub fn nearest_index(&self, lon: f64, lat: f64) -> Option<(usize, usize)> {
        self.axes.nearest_index(lon, lat)
    }

    pub fn category_counts(&self) -> CategoryCounts {
        let mut counts = CategoryCounts::default();
        for &code in &self.values {
            match AntipodeCategory::from_code(code) {
                Some(AntipodeCategory::ContinentToOcean) => counts.continent_to_ocean += 1,
                Some(AntipodeCategory::ContinentToContinent) => counts.continent_to_continent += 1,
                Some(AntipodeCategory::OceanToContinent) => counts.ocean_to_continent += 1,
                Some(AntipodeCategory::OceanToOcean) => counts.ocean_to_ocean += 1,
                None => counts.other += 1,
            }
        }
        counts
    }
}

/// Two-color display grid derived from a [`ClassificationGrid`].
///
/// Values are `0.0`, `1.0` or NaN (masked).
#[derive(Debug, Clone)]
pub struct DisplayGrid {
    axes: GridAxes,
    values: Vec<f32>,
    mode: DisplayMode,
}

impl DisplayGrid {
    pub fn axes(&self) -> &GridAxes {
        &self.axes
    }

    pub fn width(&self) -> usize {
        self.axes.width()
    }

    pub fn height(&self) -> usize {
        self.axes.height()
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row >= self.height() || col >= self.width() {
            return None;
        }
        self.values.get(row * self.width() + col).copied()
    }

    /// Display value of the cell nearest to `(lon, lat)`.
    ///
    /// `None` outside the grid, `Some(NaN)` for masked cells.
    pub fn sample(&self, lon: f64, lat: f64) -> Option<f32> {
        let (row, col) = self.axes.nearest_index(lon, lat)?;
        self.get(row, col)
    }

    pub fn masked_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_nan()).count()
    }
}

/// Collapse the four antipode categories into a display grid.
///
/// * `show_oceans == false`: codes `<= 2` become `code - 1` (0 = antipode in
///   oceans, 1 = antipode on continent); codes `> 2` (oceanic cells) are
///   masked with NaN.
/// * `show_oceans == true`: codes strictly between 1 and 4 (antipode on a
///   continent) become 1, all others 0.
///
/// Codes outside 1..=4 follow the same comparisons; supplying valid data is
/// the caller's job.
pub fn reduce_for_display(grid: &ClassificationGrid, show_oceans: bool) -> DisplayGrid {
    let mode = DisplayMode::from_show_oceans(show_oceans);
    let values: Vec<f32> = match mode {
        DisplayMode::ContinentsOnly => grid
            .values
            .iter()
            .map(|&code| if code <= 2 { (code - 1) as f32 } else { f32::NAN })
            .collect(),
        DisplayMode::WithOceans => grid
            .values
            .iter()
            .map(|&code| if code > 1 && code < 4 { 1.0 } else { 0.0 })
            .collect(),
    };

    let reduced = DisplayGrid {
        axes: grid.axes.clone(),
        values,
        mode,
    };

    tracing::debug!(
        width = reduced.width(),
        height = reduced.height(),
        masked = reduced.masked_count(),
        ?mode,
        "Reduced classification grid for display"
    );

    reduced
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_grid(values: Vec<i32>) -> ClassificationGrid {
        let lons = (0..values.len()).map(|i| i as f64).collect();
        ClassificationGrid::new(lons, vec![0.0], values).unwrap()
    }

    #[test]
    fn test_shape_mismatch() {
        let err = ClassificationGrid::new(vec![0.0, 1.0], vec![0.0, 1.0], vec![1, 2, 3]).unwrap_err();
        assert!(matches!(err, AntipodeError::ShapeMismatch { expected: 4, actual: 3, .. }));
    }

    #[test]
    fn test_empty_axis() {
        let err = ClassificationGrid::new(vec![], vec![0.0], vec![]).unwrap_err();
        assert!(matches!(err, AntipodeError::EmptyAxis("longitude")));
    }

    #[test]
    fn test_reduce_out_of_range_codes_pass_through() {
        let display = reduce_for_display(&row_grid(vec![0, 5]), false);
        assert_eq!(display.values()[0], -1.0);
        assert!(display.values()[1].is_nan());

        let display = reduce_for_display(&row_grid(vec![0, 5]), true);
        assert_eq!(display.values(), &[0.0, 0.0]);
    }

    #[test]
    fn test_nearest_on_descending_axis() {
        let axis = [90.0, 45.0, 0.0, -45.0, -90.0];
        assert_eq!(nearest_on_axis(&axis, 40.0), Some(1));
        assert_eq!(nearest_on_axis(&axis, -89.0), Some(4));
        assert_eq!(nearest_on_axis(&axis, 120.0), None);
    }

    #[test]
    fn test_longitude_wraps_across_seam() {
        let lons: Vec<f64> = (0..36).map(|i| -175.0 + 10.0 * i as f64).collect();
        let axes = GridAxes::new(lons, vec![0.0]).unwrap();
        assert!(axes.wraps_longitude());
        assert_eq!(axes.nearest_index(179.0, 0.0), Some((0, 35)));
        assert_eq!(axes.nearest_index(-179.0, 0.0), Some((0, 0)));
        assert_eq!(axes.nearest_index(185.0, 0.0), Some((0, 0)));
        assert_eq!(axes.nearest_index(0.0 + 360.0, 0.0), axes.nearest_index(0.0, 0.0));
    }

    #[test]
    fn test_category_counts() {
        let counts = row_grid(vec![1, 1, 2, 3, 4, 4, 4, -1]).category_counts();
        assert_eq!(counts.continent_to_ocean, 2);
        assert_eq!(counts.continent_to_continent, 1);
        assert_eq!(counts.ocean_to_continent, 1);
        assert_eq!(counts.ocean_to_ocean, 3);
        assert_eq!(counts.other, 1);
        assert_eq!(counts.total(), 8);
    }
}
