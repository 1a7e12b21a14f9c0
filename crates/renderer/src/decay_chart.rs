//! Frames for decay simulations.
//!
//! Each population gets one row: a lattice of units colored parent or
//! daughter on the left, and parent/daughter counts against elapsed
//! half-lives on the right. Earlier runs show as faint trails.

use serde::{Deserialize, Serialize};

use crate::canvas::LineStyle;
use crate::color::{Color, BLACK};
use crate::error::RenderResult;
use crate::figure::{Figure, FigureConfig, Sketch};
use crate::legend::{Legend, LegendEntry, LegendHandle};
use crate::text::{Anchor, TextItem, TextRenderer};

pub const PURPLE: Color = Color::rgb(128, 0, 128);
pub const GREEN: Color = Color::rgb(0, 128, 0);
pub const GREY: Color = Color::rgb(128, 128, 128);

const TITLE_POINTS: f64 = 12.0;
const LABEL_POINTS: f64 = 12.0;
const TICK_POINTS: f64 = 10.0;
const SERIES_LINE_POINTS: f64 = 2.0;
const TRAIL_LINE_POINTS: f64 = 6.0;
const TRAIL_ALPHA: f32 = 0.2;
/// Scatter area `s = 200` points², as a radius.
const SERIES_DOT_RADIUS_POINTS: f64 = 7.07;
const AXES_LINE_POINTS: f64 = 0.8;
const TICK_LENGTH_POINTS: f64 = 3.5;

/// One sample of a decay series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// Elapsed time in half-lives
    pub elapsed: f64,
    pub parents: usize,
    pub daughters: usize,
}

/// Parent and daughter colors for population `index` of `count`.
///
/// A single population uses purple and grey; side-by-side populations use
/// purple with grey 0.6 and green with grey 0.8.
pub fn population_colors(index: usize, count: usize) -> (Color, Color) {
    if count <= 1 {
        return (PURPLE, GREY);
    }
    match index % 2 {
        0 => (PURPLE, Color::grey(0.6)),
        _ => (GREEN, Color::grey(0.8)),
    }
}

/// Elapsed half-lives as shown in titles: whole numbers without a fraction.
pub fn format_half_lives(elapsed: f64) -> String {
    if (elapsed - elapsed.round()).abs() < 1e-9 {
        format!("{}", elapsed.round() as i64)
    } else {
        format!("{}", elapsed)
    }
}

/// Lattice title for the latest point of a series.
pub fn lattice_title(point: &SeriesPoint) -> String {
    if point.elapsed == 0.0 {
        format!(
            "On formation: {} unstable parent atoms, {} decayed daughter atoms",
            point.parents, point.daughters
        )
    } else {
        format!(
            "After {} half-lives: {} unstable parent atoms, {} decayed daughter atoms",
            format_half_lives(point.elapsed),
            point.parents,
            point.daughters
        )
    }
}

/// What one row of a frame shows.
#[derive(Debug, Clone)]
pub struct PopulationPanel<'a> {
    /// Per-unit state, `true` once decayed
    pub decayed: &'a [bool],
    /// Series of the current run up to this frame
    pub history: &'a [SeriesPoint],
    /// Complete series of earlier runs
    pub trails: &'a [Vec<SeriesPoint>],
    pub parent_color: Color,
    pub daughter_color: Color,
    /// Right end of the time axis in half-lives
    pub max_elapsed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayChartStyle {
    pub lattice_columns: usize,
    /// Size of one population row
    pub row_width_inches: f64,
    pub row_height_inches: f64,
    pub dpi: f64,
}

impl Default for DecayChartStyle {
    fn default() -> Self {
        Self {
            lattice_columns: 40,
            row_width_inches: 16.0,
            row_height_inches: 6.0,
            dpi: 100.0,
        }
    }
}

pub struct DecayChartRenderer {
    style: DecayChartStyle,
    text: TextRenderer,
}

impl DecayChartRenderer {
    pub fn new(style: DecayChartStyle, text: TextRenderer) -> Self {
        Self { style, text }
    }

    pub fn style(&self) -> &DecayChartStyle {
        &self.style
    }

    /// Render one frame with a row per population.
    pub fn render_frame(&self, panels: &[PopulationPanel<'_>]) -> RenderResult<Figure> {
        let rows = panels.len().max(1);
        let config = FigureConfig {
            width_inches: self.style.row_width_inches,
            height_inches: self.style.row_height_inches * rows as f64,
            dpi: self.style.dpi,
            pad_inches: 0.1,
        };
        let mut sketch = Sketch::new(config)?;
        let row_h = sketch.height() / rows as f64;
        let half_w = sketch.width() / 2.0;

        for (i, panel) in panels.iter().enumerate() {
            let top = row_h * i as f64;
            self.draw_lattice(&mut sketch, panel, 0.0, top, half_w, row_h);
            self.draw_chart(&mut sketch, panel, half_w, top, half_w, row_h);
        }

        tracing::debug!(
            populations = panels.len(),
            step = panels.first().map(|p| p.history.len().saturating_sub(1)).unwrap_or(0),
            "Rendered decay frame"
        );
        sketch.finish(&self.text)
    }

    fn draw_lattice(&self, sketch: &mut Sketch, panel: &PopulationPanel<'_>, x: f64, y: f64, w: f64, h: f64) {
        let cfg = *sketch.config();
        let title_px = cfg.points(TITLE_POINTS);
        let margin = cfg.inches(0.2);

        if let Some(last) = panel.history.last() {
            sketch.label(TextItem::new(
                lattice_title(last),
                (x + w / 2.0) as f32,
                (y + margin) as f32,
                title_px,
                BLACK,
                Anchor::TopCenter,
            ));
        }

        let columns = self.style.lattice_columns.max(1);
        let lattice_rows = panel.decayed.len().div_ceil(columns).max(1);
        let area_top = y + margin * 2.0 + title_px as f64;
        let area_w = w - 2.0 * margin;
        let area_h = (y + h - margin) - area_top;
        let cell = (area_w / columns as f64).min(area_h / lattice_rows as f64).max(1.0);
        let left = x + (w - cell * columns as f64) / 2.0;
        let bottom = area_top + (area_h + cell * lattice_rows as f64) / 2.0;
        let radius = (cell * 0.4) as f32;

        let canvas = sketch.canvas();
        for (i, &decayed) in panel.decayed.iter().enumerate() {
            // Unit 0 sits bottom-left, rows fill upward.
            let cx = left + cell * ((i % columns) as f64 + 0.5);
            let cy = bottom - cell * ((i / columns) as f64 + 0.5);
            let color = if decayed {
                panel.daughter_color
            } else {
                panel.parent_color
            };
            canvas.fill_circle(cx as f32, cy as f32, radius, color, None);
        }
    }

    fn draw_chart(&self, sketch: &mut Sketch, panel: &PopulationPanel<'_>, x: f64, y: f64, w: f64, h: f64) {
        let cfg = *sketch.config();
        let population = panel
            .history
            .first()
            .map(|p| p.parents + p.daughters)
            .unwrap_or(panel.decayed.len())
            .max(1) as f64;
        let max_elapsed = if panel.max_elapsed > 0.0 { panel.max_elapsed } else { 1.0 };

        let axes = ChartAxes {
            left: x + cfg.inches(1.0),
            top: y + cfg.inches(0.35),
            width: w - cfg.inches(1.3),
            height: h - cfg.inches(1.05),
            x_min: -max_elapsed / 48.0,
            x_max: max_elapsed * 49.0 / 48.0,
            y_min: -0.025 * population,
            y_max: 1.025 * population,
        };

        let tick_px = cfg.points(TICK_POINTS);
        let tick_len = cfg.points(TICK_LENGTH_POINTS);
        let axis_style = LineStyle::solid(BLACK, cfg.points(AXES_LINE_POINTS));
        let (ax, ay, aw, ah) = (axes.left as f32, axes.top as f32, axes.width as f32, axes.height as f32);

        // Trails of earlier runs
        for trail in panel.trails {
            for (color, pick) in [
                (panel.parent_color, parents_of as fn(&SeriesPoint) -> usize),
                (panel.daughter_color, daughters_of),
            ] {
                let points = axes.polyline(trail, pick);
                sketch.canvas().stroke_polyline(
                    &points,
                    &LineStyle::solid(color.with_alpha(TRAIL_ALPHA), cfg.points(TRAIL_LINE_POINTS)),
                );
            }
        }

        // Current run: lines, then dots on top
        let dot_radius = cfg.points(SERIES_DOT_RADIUS_POINTS);
        let dot_edge = LineStyle::solid(BLACK, cfg.points(1.0));
        for (color, pick) in [
            (panel.parent_color, parents_of as fn(&SeriesPoint) -> usize),
            (panel.daughter_color, daughters_of),
        ] {
            let points = axes.polyline(panel.history, pick);
            let canvas = sketch.canvas();
            canvas.stroke_polyline(&points, &LineStyle::solid(color, cfg.points(SERIES_LINE_POINTS)));
            for &(px, py) in &points {
                canvas.fill_circle(px, py, dot_radius, color, Some(&dot_edge));
            }
        }

        sketch.canvas().stroke_rect(ax, ay, aw, ah, &axis_style);

        // X ticks at whole half-lives
        let x_step = tick_step(max_elapsed, 1.0);
        let mut t = 0.0;
        while t <= max_elapsed + 1e-9 {
            let (px, _) = axes.to_pixel(t, axes.y_min);
            sketch
                .canvas()
                .stroke_polyline(&[(px, ay + ah), (px, ay + ah + tick_len)], &axis_style);
            sketch.label(TextItem::new(
                format_half_lives(t),
                px,
                ay + ah + tick_len * 1.5,
                tick_px,
                BLACK,
                Anchor::TopCenter,
            ));
            t += x_step;
        }

        // Y ticks
        let y_step = tick_step(population, population / 5.0);
        let mut v = 0.0;
        while v <= population + 1e-9 {
            let (_, py) = axes.to_pixel(axes.x_min, v);
            sketch
                .canvas()
                .stroke_polyline(&[(ax - tick_len, py), (ax, py)], &axis_style);
            sketch.label(TextItem::new(
                format!("{}", v.round() as i64),
                ax - tick_len * 1.5,
                py,
                tick_px,
                BLACK,
                Anchor::CenterRight,
            ));
            v += y_step;
        }

        let label_px = cfg.points(LABEL_POINTS);
        sketch.label(TextItem::new(
            "Number of half-lives since formation",
            ax + aw / 2.0,
            ay + ah + tick_len * 2.0 + tick_px * 1.4,
            label_px,
            BLACK,
            Anchor::TopCenter,
        ));
        sketch.label(
            TextItem::new(
                "Number of atoms",
                ax - cfg.inches(0.75) as f32,
                ay + ah / 2.0,
                label_px,
                BLACK,
                Anchor::Center,
            )
            .vertical(),
        );

        let mut legend = Legend::new(
            vec![
                LegendEntry::new(
                    LegendHandle::Dot {
                        fill: panel.parent_color,
                        edge: BLACK,
                    },
                    "parent",
                ),
                LegendEntry::new(
                    LegendHandle::Dot {
                        fill: panel.daughter_color,
                        edge: BLACK,
                    },
                    "daughter",
                ),
            ],
            1,
        );
        legend.font_points = LABEL_POINTS;
        legend.marker_points = 2.0 * SERIES_DOT_RADIUS_POINTS;
        let (lw, lh) = legend.size(sketch, &self.text);
        let pad = cfg.points(6.0);
        legend.draw(sketch, &self.text, ax + aw - lw - pad, ay + (ah - lh) / 2.0);
    }
}

fn parents_of(p: &SeriesPoint) -> usize {
    p.parents
}

fn daughters_of(p: &SeriesPoint) -> usize {
    p.daughters
}

/// `preferred` for small ranges; otherwise a 1-2-5 step giving roughly
/// ten ticks or fewer.
fn tick_step(range: f64, preferred: f64) -> f64 {
    if preferred > 0.0 && range / preferred <= 20.0 {
        return nice_step(preferred);
    }
    nice_step(range / 10.0)
}

fn nice_step(raw: f64) -> f64 {
    if !(raw.is_finite() && raw > 0.0) {
        return 1.0;
    }
    let magnitude = 10f64.powf(raw.log10().floor());
    let fraction = raw / magnitude;
    let nice = if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Data-to-pixel mapping of a chart's axes rectangle.
struct ChartAxes {
    left: f64,
    top: f64,
    width: f64,
    height: f64,
    x_min: f64,
    x_max: f64,
    y_min: f64,
    y_max: f64,
}

impl ChartAxes {
    fn to_pixel(&self, x: f64, y: f64) -> (f32, f32) {
        let fx = (x - self.x_min) / (self.x_max - self.x_min);
        let fy = (y - self.y_min) / (self.y_max - self.y_min);
        (
            (self.left + fx * self.width) as f32,
            (self.top + (1.0 - fy) * self.height) as f32,
        )
    }

    fn polyline(&self, series: &[SeriesPoint], pick: fn(&SeriesPoint) -> usize) -> Vec<(f32, f32)> {
        series
            .iter()
            .map(|p| self.to_pixel(p.elapsed, pick(p) as f64))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        let start = SeriesPoint {
            elapsed: 0.0,
            parents: 1000,
            daughters: 0,
        };
        assert_eq!(
            lattice_title(&start),
            "On formation: 1000 unstable parent atoms, 0 decayed daughter atoms"
        );
        let later = SeriesPoint {
            elapsed: 0.25,
            parents: 840,
            daughters: 160,
        };
        assert_eq!(
            lattice_title(&later),
            "After 0.25 half-lives: 840 unstable parent atoms, 160 decayed daughter atoms"
        );
    }

    #[test]
    fn test_format_half_lives() {
        assert_eq!(format_half_lives(3.0), "3");
        assert_eq!(format_half_lives(0.5), "0.5");
    }

    #[test]
    fn test_nice_steps() {
        assert_eq!(nice_step(200.0), 200.0);
        assert_eq!(nice_step(130.0), 200.0);
        assert_eq!(nice_step(0.3), 0.5);
        assert_eq!(tick_step(12.0, 1.0), 1.0);
        assert_eq!(tick_step(100.0, 1.0), 10.0);
    }

    #[test]
    fn test_population_colors() {
        assert_eq!(population_colors(0, 1), (PURPLE, GREY));
        assert_eq!(population_colors(1, 2).0, GREEN);
    }
}
