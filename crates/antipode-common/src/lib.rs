//! Common types shared across the antipode-viz workspace.
//!
//! The geometry here is deliberately small: a [`GeoPoint`], its antipode,
//! the recentering rule used by single-panel maps, and the reduction of the
//! four-category antipode classification into a two-color display grid.

pub mod bbox;
pub mod category;
pub mod error;
pub mod geo;
pub mod grid;

pub use bbox::BoundingBox;
pub use category::{AntipodeCategory, DisplayMode};
pub use error::{AntipodeError, AntipodeResult};
pub use geo::{central_longitude, compute_antipode, GeoPoint};
pub use grid::{reduce_for_display, CategoryCounts, ClassificationGrid, DisplayGrid, GridAxes};
