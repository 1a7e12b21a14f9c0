//! Common test fixtures.

/// Reference points as `(latitude, longitude)` in degrees.
pub mod points {
    /// North-east Ohio, the default map point.
    pub const OHIO: (f64, f64) = (41.15, -81.36);

    /// South-east England; its antipode sits near the antimeridian.
    pub const UK: (f64, f64) = (51.80, 0.9);

    /// Johannesburg.
    pub const SOUTH_AFRICA: (f64, f64) = (-26.2, 28.0);

    /// On the prime meridian, where the antipode branch is asymmetric.
    pub const PRIME_MERIDIAN: (f64, f64) = (0.0, 0.0);

    pub const NORTH_POLE: (f64, f64) = (90.0, 0.0);
}

/// Names used by the antipode dataset.
pub mod dataset {
    pub const FILE_NAME: &str = "antipode_grid.nc";
    pub const LONGITUDE_VAR: &str = "Long";
    pub const LATITUDE_VAR: &str = "Lat";
    pub const CATEGORY_VAR: &str = "antipode_type";
}

/// Parameters of the classroom decay runs.
pub mod decay {
    pub const POPULATION: usize = 1000;
    pub const STEPS: usize = 12;
    pub const DUAL_STEPS: usize = 16;
    pub const LATTICE_COLUMNS: usize = 40;
    pub const LATTICE_ROWS: usize = 25;
}
