//! Figure rendering for antipode maps and decay simulations.
//!
//! Geometry is rasterized with anti-aliasing onto a [`canvas::Canvas`],
//! queued text is composited afterwards, and the finished [`Figure`] is
//! cropped to its content and written as a PNG carrying its DPI.
//!
//! - [`map`]: Robinson and dual nearside-perspective antipode maps
//! - [`decay_chart`]: lattice plus population-curve frames
//! - [`png`]: indexed/RGBA PNG encoding

pub mod canvas;
pub mod coastline;
pub mod color;
pub mod decay_chart;
pub mod error;
pub mod figure;
pub mod graticule;
pub mod legend;
pub mod map;
pub mod mesh;
pub mod panel;
pub mod png;
pub mod text;

pub use coastline::Coastlines;
pub use color::{Color, Colormap};
pub use decay_chart::{DecayChartRenderer, DecayChartStyle, PopulationPanel, SeriesPoint};
pub use error::{RenderError, RenderResult};
pub use figure::{Figure, FigureConfig, Sketch};
pub use map::{MapRenderer, RenderOptions, MAP_TITLE};
pub use text::TextRenderer;
