//! Native NetCDF reading using the netcdf library.
//!
//! The netcdf library requires a file path (it wraps libnetcdf/HDF5 which need
//! file handles). When reading from bytes, we write to a temp file first.
//!
//! On Linux, we use `/dev/shm` (memory-backed tmpfs) to minimize I/O latency.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Once;

use antipode_common::ClassificationGrid;
use tracing::debug;

use crate::error::{NetCdfError, NetCdfResult};
use crate::{DatasetLayout, FILL_CATEGORY};

/// Silence HDF5's automatic error printing to stderr.
///
/// The HDF5 C library prints verbose error messages to stderr even when errors
/// are handled gracefully by the Rust code (e.g., when checking for optional
/// attributes that don't exist).
///
/// Call this early in `main()`, before any HDF5/NetCDF operations occur. It is
/// safe to call multiple times.
pub fn silence_hdf5_errors() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // SAFETY: H5Eset_auto2 is thread-safe and we're passing null pointers
        // to disable error output, which is a documented valid use.
        unsafe {
            hdf5_metno_sys::h5e::H5Eset_auto2(
                hdf5_metno_sys::h5e::H5E_DEFAULT,
                None,
                std::ptr::null_mut(),
            );
        }
    });
}

/// Load a classification grid from a NetCDF file.
pub fn load_antipode_grid<P: AsRef<Path>>(
    path: P,
    layout: &DatasetLayout,
) -> NetCdfResult<ClassificationGrid> {
    silence_hdf5_errors();

    let path = path.as_ref();
    if !path.exists() {
        return Err(NetCdfError::IoError(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("{} not found", path.display()),
        )));
    }

    let nc_file = netcdf::open(path)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to open NetCDF: {}", e)))?;

    let grid = read_grid(&nc_file, layout)?;

    debug!(
        path = %path.display(),
        width = grid.width(),
        height = grid.height(),
        "Loaded antipode grid"
    );

    Ok(grid)
}

/// Load a classification grid from in-memory NetCDF bytes.
pub fn load_antipode_grid_from_bytes(
    data: &[u8],
    layout: &DatasetLayout,
) -> NetCdfResult<ClassificationGrid> {
    let temp_file = get_optimal_temp_dir().join(generate_temp_filename());

    let mut file = std::fs::File::create(&temp_file)?;
    file.write_all(data)?;
    drop(file);

    let result = load_antipode_grid(&temp_file, layout);
    let _ = std::fs::remove_file(&temp_file);
    result
}

fn read_grid(nc_file: &netcdf::File, layout: &DatasetLayout) -> NetCdfResult<ClassificationGrid> {
    let longitudes = read_axis(nc_file, &layout.longitude_var)?;
    let latitudes = read_axis(nc_file, &layout.latitude_var)?;

    let category_var = nc_file
        .variable(&layout.category_var)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", layout.category_var)))?;

    let dims: Vec<String> = category_var
        .dimensions()
        .iter()
        .map(|d| d.name())
        .collect();
    if dims.len() != 2 {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} must be 2-D, found dimensions {:?}",
            layout.category_var, dims
        )));
    }

    let raw: Vec<i32> = category_var.get_values(..).map_err(|e| {
        NetCdfError::InvalidFormat(format!("Failed to read {}: {}", layout.category_var, e))
    })?;

    let fill_value = get_i32_attr(&category_var, "_FillValue");
    let mut values: Vec<i32> = match fill_value {
        Some(fill) => raw
            .into_iter()
            .map(|v| if v == fill { FILL_CATEGORY } else { v })
            .collect(),
        None => raw,
    };

    let lat_major = dims[0] == layout.latitude_var && dims[1] == layout.longitude_var;
    let lon_major = dims[0] == layout.longitude_var && dims[1] == layout.latitude_var;
    if lon_major {
        // Stored as (Long, Lat): transpose to one row per latitude.
        values = transpose(&values, longitudes.len(), latitudes.len());
    } else if !lat_major {
        return Err(NetCdfError::InvalidFormat(format!(
            "{} dimensions {:?} are not ({}, {}) or ({}, {})",
            layout.category_var,
            dims,
            layout.latitude_var,
            layout.longitude_var,
            layout.longitude_var,
            layout.latitude_var
        )));
    }

    Ok(ClassificationGrid::new(longitudes, latitudes, values)?)
}

fn read_axis(nc_file: &netcdf::File, name: &str) -> NetCdfResult<Vec<f64>> {
    let var = nc_file
        .variable(name)
        .ok_or_else(|| NetCdfError::MissingData(format!("{} variable", name)))?;
    var.get_values(..)
        .map_err(|e| NetCdfError::InvalidFormat(format!("Failed to read {}: {}", name, e)))
}

/// Transpose a row-major `rows x cols` buffer.
pub(crate) fn transpose(values: &[i32], rows: usize, cols: usize) -> Vec<i32> {
    let mut out = vec![0; values.len()];
    for r in 0..rows {
        for c in 0..cols {
            out[c * rows + r] = values[r * cols + c];
        }
    }
    out
}

// =============================================================================
// Internal helpers
// =============================================================================

/// Get the optimal temp directory for NetCDF file operations.
///
/// On Linux, uses /dev/shm (memory-backed tmpfs) if available for faster I/O.
/// Falls back to the system temp directory on other platforms or if /dev/shm is unavailable.
fn get_optimal_temp_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        let shm_path = Path::new("/dev/shm");
        if shm_path.exists() && shm_path.is_dir() {
            let test_path = shm_path.join(format!(".netcdf_test_{}", std::process::id()));
            if std::fs::write(&test_path, b"test").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return shm_path.to_path_buf();
            }
        }
    }

    std::env::temp_dir()
}

/// Unique temp file name from process ID, thread ID and a counter.
fn generate_temp_filename() -> String {
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let pid = std::process::id();
    let tid = std::thread::current().id();
    let count = COUNTER.fetch_add(1, Ordering::Relaxed);

    format!("antipode_grid_{}_{:?}_{}.nc", pid, tid, count)
}

/// Check if a variable has an attribute with the given name.
/// This avoids HDF5 error spam when checking for optional attributes.
fn has_attr(var: &netcdf::Variable, name: &str) -> bool {
    var.attributes().any(|attr| attr.name() == name)
}

fn get_i32_attr(var: &netcdf::Variable, name: &str) -> Option<i32> {
    if !has_attr(var, name) {
        return None;
    }
    let attr_value = var.attribute_value(name)?.ok()?;
    i32::try_from(attr_value).ok()
}
