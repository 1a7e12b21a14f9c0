//! Antipode map layouts: a single Robinson panel, or two nearside
//! perspective panels centered on a point and on its antipode.
//!
//! Drawing order per panel: classification mesh (with the ocean mask
//! when oceans are hidden), coastlines, graticule, markers, outline.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use antipode_common::geo::{DEFAULT_LATITUDE, DEFAULT_LONGITUDE};
use antipode_common::{central_longitude, reduce_for_display, ClassificationGrid, DisplayGrid, GeoPoint};
use projection::{MapProjection, NearsidePerspective, Robinson};

use crate::canvas::LineStyle;
use crate::coastline::Coastlines;
use crate::color::{Colormap, BLACK, COASTLINE, GRIDLINE, OCEAN_MASK, RED, WHITE};
use crate::error::RenderResult;
use crate::figure::{Figure, FigureConfig, Sketch};
use crate::graticule::draw_graticule;
use crate::legend::Legend;
use crate::mesh::{paint_display_grid, MaskFill};
use crate::panel::Panel;
use crate::text::{Anchor, TextItem, TextRenderer};

pub const MAP_TITLE: &str = "Global map of antipodal lithosphere type";

const TITLE_POINTS: f64 = 12.0;
const TITLE_PAD_POINTS: f64 = 10.0;
const COASTLINE_POINTS: f64 = 0.8;
const GRIDLINE_POINTS: f64 = 0.5;
const OUTLINE_POINTS: f64 = 0.8;
/// Scatter marker area `s = 50` points², as a side length.
const MARKER_POINTS: f64 = 7.07;
const MARKER_EDGE_POINTS: f64 = 1.0;
const GRATICULE_SPACING: f64 = 30.0;
const MARGIN_INCHES: f64 = 0.1;
const LEGEND_GAP_INCHES: f64 = 0.15;
const OUTLINE_SAMPLES: usize = 360;

/// Per-call map options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Color oceanic cells too instead of masking them
    pub show_oceans: bool,
    /// Mark the point and its antipode
    pub show_point: bool,
    pub point_latitude: f64,
    pub point_longitude: f64,
    /// Center the Robinson map between the point and its antipode
    pub recenter: bool,
    /// Where to save the PNG, if anywhere
    pub output_path: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            show_oceans: false,
            show_point: true,
            point_latitude: DEFAULT_LATITUDE,
            point_longitude: DEFAULT_LONGITUDE,
            recenter: false,
            output_path: None,
        }
    }
}

impl RenderOptions {
    pub fn point(&self) -> RenderResult<GeoPoint> {
        Ok(GeoPoint::new(self.point_latitude, self.point_longitude)?)
    }
}

/// Shared rendering resources: figure size, font and coastlines.
///
/// Built once and reused for every map of a batch.
pub struct MapRenderer {
    figure: FigureConfig,
    text: TextRenderer,
    coastlines: Option<Coastlines>,
    colormap: Colormap,
}

impl MapRenderer {
    pub fn new(figure: FigureConfig, text: TextRenderer, coastlines: Option<Coastlines>) -> Self {
        Self {
            figure,
            text,
            coastlines,
            colormap: Colormap::bicolor(),
        }
    }

    pub fn figure_config(&self) -> &FigureConfig {
        &self.figure
    }

    /// Single Robinson panel. The central meridian is 0, or halfway between
    /// the point and its antipode when `recenter` is set.
    pub fn render_robinson(&self, grid: &ClassificationGrid, options: &RenderOptions) -> RenderResult<Figure> {
        let point = options.point()?;
        let display = reduce_for_display(grid, options.show_oceans);
        let projection = Robinson::new(central_longitude(point, options.recenter));

        let mut sketch = Sketch::new(self.figure)?;
        let legend = self.legend_for(options, point);
        let (legend_w, legend_h) = legend.size(&sketch, &self.text);

        let cfg = *sketch.config();
        let margin = cfg.inches(MARGIN_INCHES);
        let title_px = cfg.points(TITLE_POINTS);
        let map_top = margin + title_px as f64 + cfg.points(TITLE_PAD_POINTS) as f64;
        let legend_top = sketch.height() - margin - legend_h as f64;
        let map_height = legend_top - cfg.inches(LEGEND_GAP_INCHES) - map_top;

        let panel = Panel::fit(
            projection.extent(),
            margin,
            map_top,
            sketch.width() - 2.0 * margin,
            map_height.max(1.0),
        );
        self.draw_panel(&mut sketch, &panel, &projection, &display, options, point, false);

        let (px, _, pw, _) = panel.bounds();
        sketch.label(TextItem::new(
            MAP_TITLE,
            (px + pw / 2.0) as f32,
            margin as f32,
            title_px,
            BLACK,
            Anchor::TopCenter,
        ));
        let legend_left = (sketch.width() as f32 - legend_w) / 2.0;
        legend.draw(&mut sketch, &self.text, legend_left, legend_top as f32);

        tracing::debug!(
            central_longitude = projection.central_longitude,
            show_oceans = options.show_oceans,
            show_point = options.show_point,
            "Rendered Robinson map"
        );
        self.finish(sketch, options)
    }

    /// Two nearside perspective panels: the first centered on the point,
    /// the second on its antipode. Both carry a dotted 30° graticule.
    pub fn render_perspective(&self, grid: &ClassificationGrid, options: &RenderOptions) -> RenderResult<Figure> {
        let point = options.point()?;
        let antipode = point.antipode();
        let display = reduce_for_display(grid, options.show_oceans);
        let near = NearsidePerspective::centered_on(point.longitude, point.latitude)?;
        let far = NearsidePerspective::centered_on(antipode.longitude, antipode.latitude)?;

        let mut sketch = Sketch::new(self.figure)?;
        let legend = self.legend_for(options, point);
        let (legend_w, legend_h) = legend.size(&sketch, &self.text);

        let cfg = *sketch.config();
        let margin = cfg.inches(MARGIN_INCHES);
        let title_px = cfg.points(TITLE_POINTS);
        let map_top = margin + title_px as f64 + cfg.points(TITLE_PAD_POINTS) as f64;
        let legend_top = sketch.height() - margin - legend_h as f64;
        let map_height = (legend_top - cfg.inches(LEGEND_GAP_INCHES) - map_top).max(1.0);
        let panel_width = ((sketch.width() - 3.0 * margin) / 2.0).max(1.0);

        let left = Panel::fit(near.extent(), margin, map_top, panel_width, map_height);
        let right = Panel::fit(far.extent(), 2.0 * margin + panel_width, map_top, panel_width, map_height);
        self.draw_panel(&mut sketch, &left, &near, &display, options, point, true);
        self.draw_panel(&mut sketch, &right, &far, &display, options, point, true);

        sketch.label(TextItem::new(
            MAP_TITLE,
            sketch.width() as f32 / 2.0,
            margin as f32,
            title_px,
            BLACK,
            Anchor::TopCenter,
        ));
        let legend_left = (sketch.width() as f32 - legend_w) / 2.0;
        legend.draw(&mut sketch, &self.text, legend_left, legend_top as f32);

        tracing::debug!(
            center_lon = point.longitude,
            center_lat = point.latitude,
            antipode_lon = antipode.longitude,
            antipode_lat = antipode.latitude,
            show_oceans = options.show_oceans,
            "Rendered perspective maps"
        );
        self.finish(sketch, options)
    }

    fn legend_for(&self, options: &RenderOptions, point: GeoPoint) -> Legend {
        Legend::for_antipode_map(options.show_point.then_some(point))
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_panel(
        &self,
        sketch: &mut Sketch,
        panel: &Panel,
        projection: &dyn MapProjection,
        display: &DisplayGrid,
        options: &RenderOptions,
        point: GeoPoint,
        gridlines: bool,
    ) {
        let cfg = *sketch.config();
        let mask = if options.show_oceans {
            MaskFill::Transparent
        } else {
            MaskFill::Solid(OCEAN_MASK)
        };
        let canvas = sketch.canvas();

        paint_display_grid(canvas, panel, projection, display, &self.colormap, mask);

        if let Some(coastlines) = &self.coastlines {
            coastlines.draw(
                canvas,
                panel,
                projection,
                &LineStyle::solid(COASTLINE, cfg.points(COASTLINE_POINTS)),
            );
        }

        if gridlines {
            draw_graticule(
                canvas,
                panel,
                projection,
                GRATICULE_SPACING,
                &LineStyle::dotted(GRIDLINE, cfg.points(GRIDLINE_POINTS)),
            );
        }

        if options.show_point {
            let antipode = point.antipode();
            let edge = LineStyle::solid(RED, cfg.points(MARKER_EDGE_POINTS));
            let size = cfg.points(MARKER_POINTS);
            for (marked, fill) in [(point, RED), (antipode, WHITE)] {
                if let Some((x, y)) = panel.project(projection, marked.longitude, marked.latitude) {
                    canvas.draw_triangle_marker(x, y, size, fill, &edge);
                }
            }
        }

        let outline = panel.outline(projection, OUTLINE_SAMPLES);
        canvas.stroke_polyline(&outline, &LineStyle::solid(BLACK, cfg.points(OUTLINE_POINTS)));
    }

    fn finish(&self, sketch: Sketch, options: &RenderOptions) -> RenderResult<Figure> {
        let figure = sketch.finish(&self.text)?;
        if let Some(path) = &options.output_path {
            figure.save_png(path)?;
        }
        Ok(figure)
    }
}
