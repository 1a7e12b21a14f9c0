//! NetCDF loader for antipode classification grids.
//!
//! The dataset is a regular lat/lon grid with two 1-D coordinate variables
//! and one 2-D integer variable holding the antipode category of each cell:
//!
//! ```text
//! dimensions:
//!     Long = 1440 ;
//!     Lat = 720 ;
//! variables:
//!     double Long(Long) ;
//!     double Lat(Lat) ;
//!     int antipode_type(Lat, Long) ;
//! ```
//!
//! The file is opened, its values copied into a [`ClassificationGrid`], and
//! the handle dropped before returning.
//!
//! [`ClassificationGrid`]: antipode_common::ClassificationGrid

pub mod error;
pub mod native;

use serde::{Deserialize, Serialize};

pub use error::{NetCdfError, NetCdfResult};
pub use native::{load_antipode_grid, load_antipode_grid_from_bytes, silence_hdf5_errors};

/// Variable names used to find the grid inside a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetLayout {
    /// 1-D longitude coordinate variable
    pub longitude_var: String,
    /// 1-D latitude coordinate variable
    pub latitude_var: String,
    /// 2-D category variable
    pub category_var: String,
}

impl Default for DatasetLayout {
    fn default() -> Self {
        Self {
            longitude_var: "Long".to_string(),
            latitude_var: "Lat".to_string(),
            category_var: "antipode_type".to_string(),
        }
    }
}

/// Category code substituted for `_FillValue` cells.
///
/// Zero lies outside 1..=4, so it reduces to the out-of-range display value.
pub const FILL_CATEGORY: i32 = 0;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_names() {
        let layout = DatasetLayout::default();
        assert_eq!(layout.longitude_var, "Long");
        assert_eq!(layout.latitude_var, "Lat");
        assert_eq!(layout.category_var, "antipode_type");
    }
}
