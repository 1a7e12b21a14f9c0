//! Round-trip tests that write small NetCDF files and load them back.

use antipode_common::{reduce_for_display, AntipodeCategory};
use netcdf_parser::{
    load_antipode_grid, load_antipode_grid_from_bytes, DatasetLayout, NetCdfError, FILL_CATEGORY,
};
use test_utils::{fixtures::dataset, require_test_file, synthetic_classification, temp_test_dir};

/// Write a dataset with the given dimension order for the category variable.
fn write_dataset(
    path: &std::path::Path,
    lons: &[f64],
    lats: &[f64],
    codes_lat_major: &[i32],
    lon_major: bool,
) {
    let mut file = netcdf::create(path).unwrap();
    file.add_dimension("Long", lons.len()).unwrap();
    file.add_dimension("Lat", lats.len()).unwrap();

    let mut lon_var = file.add_variable::<f64>("Long", &["Long"]).unwrap();
    lon_var.put_values(lons, ..).unwrap();
    let mut lat_var = file.add_variable::<f64>("Lat", &["Lat"]).unwrap();
    lat_var.put_values(lats, ..).unwrap();

    if lon_major {
        let mut transposed = vec![0; codes_lat_major.len()];
        for r in 0..lats.len() {
            for c in 0..lons.len() {
                transposed[c * lats.len() + r] = codes_lat_major[r * lons.len() + c];
            }
        }
        let mut var = file
            .add_variable::<i32>("antipode_type", &["Long", "Lat"])
            .unwrap();
        var.put_values(&transposed, ..).unwrap();
    } else {
        let mut var = file
            .add_variable::<i32>("antipode_type", &["Lat", "Long"])
            .unwrap();
        var.put_values(codes_lat_major, ..).unwrap();
    }
}

// ============================================================================
// Layout handling
// ============================================================================

#[test]
fn test_load_lat_major_dataset() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid.nc");
    let (lons, lats, codes) = synthetic_classification(10.0);
    write_dataset(&path, &lons, &lats, &codes, false);

    let grid = load_antipode_grid(&path, &DatasetLayout::default()).unwrap();
    assert_eq!(grid.width(), lons.len());
    assert_eq!(grid.height(), lats.len());
    assert_eq!(grid.values(), codes.as_slice());
    assert_eq!(grid.longitudes(), lons.as_slice());
}

#[test]
fn test_load_lon_major_dataset_is_transposed() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid_lon_major.nc");
    let (lons, lats, codes) = synthetic_classification(20.0);
    write_dataset(&path, &lons, &lats, &codes, true);

    let grid = load_antipode_grid(&path, &DatasetLayout::default()).unwrap();
    assert_eq!(grid.values(), codes.as_slice());
}

#[test]
fn test_load_from_bytes() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid.nc");
    let (lons, lats, codes) = synthetic_classification(30.0);
    write_dataset(&path, &lons, &lats, &codes, false);

    let bytes = std::fs::read(&path).unwrap();
    let grid = load_antipode_grid_from_bytes(&bytes, &DatasetLayout::default()).unwrap();
    assert_eq!(grid.values(), codes.as_slice());
}

#[test]
fn test_missing_variable_reported() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid.nc");
    let (lons, lats, codes) = synthetic_classification(30.0);
    write_dataset(&path, &lons, &lats, &codes, false);

    let layout = DatasetLayout {
        category_var: "lithosphere".to_string(),
        ..Default::default()
    };
    let err = load_antipode_grid(&path, &layout).unwrap_err();
    assert!(matches!(err, NetCdfError::MissingData(ref m) if m.contains("lithosphere")));
}

#[test]
fn test_fill_cells_load_as_fill_category() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid_fill.nc");
    let lons = [-90.0, 0.0, 90.0];
    let lats = [-45.0, 45.0];
    let fill = -99;
    let codes = [1, fill, 4, fill, 2, 3];
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("Long", lons.len()).unwrap();
        file.add_dimension("Lat", lats.len()).unwrap();
        let mut lon_var = file.add_variable::<f64>("Long", &["Long"]).unwrap();
        lon_var.put_values(&lons[..], ..).unwrap();
        let mut lat_var = file.add_variable::<f64>("Lat", &["Lat"]).unwrap();
        lat_var.put_values(&lats[..], ..).unwrap();
        let mut var = file
            .add_variable::<i32>("antipode_type", &["Lat", "Long"])
            .unwrap();
        var.set_fill_value(fill).unwrap();
        var.put_values(&codes[..], ..).unwrap();
    }

    let grid = load_antipode_grid(&path, &DatasetLayout::default()).unwrap();
    assert_eq!(grid.values(), &[1, FILL_CATEGORY, 4, FILL_CATEGORY, 2, 3]);
    assert_eq!(grid.get(0, 1), Some(0));

    let continents = reduce_for_display(&grid, false);
    assert_eq!(continents.get(0, 1), Some(-1.0));
    assert_eq!(continents.get(1, 0), Some(-1.0));
    assert_eq!(continents.get(0, 0), Some(0.0));
    assert!(continents.get(0, 2).unwrap().is_nan());

    let oceans = reduce_for_display(&grid, true);
    assert_eq!(oceans.get(0, 1), Some(0.0));
    assert_eq!(oceans.get(1, 0), Some(0.0));
    assert_eq!(oceans.get(1, 2), Some(1.0));
}

#[test]
fn test_unrecognized_dimensions_rejected() {
    let dir = temp_test_dir();
    let path = dir.path().join("grid_other_dims.nc");
    let lons = [-90.0, 90.0];
    let lats = [0.0];
    {
        let mut file = netcdf::create(&path).unwrap();
        file.add_dimension("Long", lons.len()).unwrap();
        file.add_dimension("Lat", lats.len()).unwrap();
        file.add_dimension("y", lats.len()).unwrap();
        file.add_dimension("x", lons.len()).unwrap();
        let mut lon_var = file.add_variable::<f64>("Long", &["Long"]).unwrap();
        lon_var.put_values(&lons[..], ..).unwrap();
        let mut lat_var = file.add_variable::<f64>("Lat", &["Lat"]).unwrap();
        lat_var.put_values(&lats[..], ..).unwrap();
        let mut var = file
            .add_variable::<i32>("antipode_type", &["y", "x"])
            .unwrap();
        var.put_values(&[1i32, 4][..], ..).unwrap();
    }

    let err = load_antipode_grid(&path, &DatasetLayout::default()).unwrap_err();
    assert!(
        matches!(err, NetCdfError::InvalidFormat(ref m) if m.contains("antipode_type")),
        "unexpected error: {}",
        err
    );
}

// ============================================================================
// Real dataset (skipped when absent)
// ============================================================================

#[test]
fn test_real_dataset_categories() {
    let path = require_test_file!(dataset::FILE_NAME);
    let grid = load_antipode_grid(&path, &DatasetLayout::default()).unwrap();

    let counts = grid.category_counts();
    assert_eq!(counts.total(), grid.width() * grid.height());
    assert!(counts.ocean_to_ocean > counts.continent_to_continent);

    // The middle of the Pacific is ocean with a continental antipode (Africa).
    assert_eq!(
        grid.category_at(-160.0, 5.0),
        Some(AntipodeCategory::OceanToContinent)
    );

    let display = reduce_for_display(&grid, false);
    assert_eq!(display.width(), grid.width());
}
