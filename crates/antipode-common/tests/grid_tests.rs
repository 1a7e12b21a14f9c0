//! Tests for classification grids and the display reduction.

use antipode_common::{
    reduce_for_display, AntipodeCategory, ClassificationGrid, DisplayMode,
};
use test_utils::{category_codes, global_axes, uniform_axes};

fn category_grid(width: usize, height: usize) -> ClassificationGrid {
    let (lons, lats) = uniform_axes(width, height);
    ClassificationGrid::new(lons, lats, category_codes(width, height)).unwrap()
}

fn single_row(values: Vec<i32>) -> ClassificationGrid {
    let lons = (0..values.len()).map(|i| i as f64 * 10.0).collect();
    ClassificationGrid::new(lons, vec![0.0], values).unwrap()
}

// ============================================================================
// Continents-only reduction
// ============================================================================

#[test]
fn test_continents_only_mapping() {
    let display = reduce_for_display(&single_row(vec![1, 2, 3, 4]), false);
    let v = display.values();
    assert_eq!(v[0], 0.0);
    assert_eq!(v[1], 1.0);
    assert!(v[2].is_nan());
    assert!(v[3].is_nan());
    assert_eq!(display.masked_count(), 2);
    assert_eq!(display.mode(), DisplayMode::ContinentsOnly);
}

// ============================================================================
// With-oceans reduction
// ============================================================================

#[test]
fn test_with_oceans_mapping() {
    let display = reduce_for_display(&single_row(vec![1, 2, 3, 4]), true);
    assert_eq!(display.values(), &[0.0, 1.0, 1.0, 0.0]);
    assert_eq!(display.masked_count(), 0);
    assert_eq!(display.mode(), DisplayMode::WithOceans);
}

// ============================================================================
// Shape preservation
// ============================================================================

#[test]
fn test_shape_preserved() {
    for (w, h) in [(1, 1), (1, 7), (5, 1), (36, 18), (73, 37)] {
        let grid = category_grid(w, h);
        for show_oceans in [false, true] {
            let display = reduce_for_display(&grid, show_oceans);
            assert_eq!(display.width(), w);
            assert_eq!(display.height(), h);
            assert_eq!(display.values().len(), w * h);
        }
    }
}

#[test]
fn test_reduction_matches_per_cell_rule() {
    let grid = category_grid(12, 6);
    let continents = reduce_for_display(&grid, false);
    let oceans = reduce_for_display(&grid, true);

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let code = grid.get(row, col).unwrap();
            let c = continents.get(row, col).unwrap();
            let o = oceans.get(row, col).unwrap();
            match code {
                1 => assert_eq!((c, o), (0.0, 0.0)),
                2 => assert_eq!((c, o), (1.0, 1.0)),
                3 => assert!(c.is_nan() && o == 1.0),
                4 => assert!(c.is_nan() && o == 0.0),
                other => panic!("unexpected code {other}"),
            }
        }
    }
}

// ============================================================================
// Lookups
// ============================================================================

#[test]
fn test_sample_uses_nearest_cell() {
    let (lons, lats) = global_axes(10.0);
    let w = lons.len();
    let h = lats.len();
    let mut values = vec![4; w * h];
    // Everything is ocean to ocean except the cell at lon 5, lat 5.
    let col = lons.iter().position(|&l| l == 5.0).unwrap();
    let row = lats.iter().position(|&l| l == 5.0).unwrap();
    values[row * w + col] = 3;
    let grid = ClassificationGrid::new(lons, lats, values).unwrap();

    assert_eq!(grid.category_at(6.0, 4.0), Some(AntipodeCategory::OceanToContinent));
    assert_eq!(grid.category_at(-6.0, 4.0), Some(AntipodeCategory::OceanToOcean));

    let display = reduce_for_display(&grid, true);
    assert_eq!(display.sample(6.0, 4.0), Some(1.0));
    assert_eq!(display.sample(-6.0, 4.0), Some(0.0));
    assert_eq!(display.sample(6.0, 95.0), None);

    let display = reduce_for_display(&grid, false);
    assert!(display.sample(6.0, 4.0).unwrap().is_nan());
}

#[test]
fn test_bbox_from_axes() {
    let (lons, lats) = global_axes(1.0);
    let grid = ClassificationGrid::new(lons.clone(), lats.clone(), vec![1; lons.len() * lats.len()]).unwrap();
    let bbox = grid.bbox();
    assert_eq!(bbox.min_x, -179.5);
    assert_eq!(bbox.max_x, 179.5);
    assert_eq!(bbox.min_y, -89.5);
    assert_eq!(bbox.max_y, 89.5);
}
