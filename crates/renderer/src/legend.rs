//! Figure legends laid out in columns.
//!
//! Entries fill the grid column by column, so a six-entry legend in two
//! columns puts the first three entries on the left.

use antipode_common::GeoPoint;

use crate::canvas::LineStyle;
use crate::color::{Color, BLACK, CONTINENT_YELLOW, LEGEND_EDGE, OCEAN_BLUE, RED, WHITE};
use crate::figure::Sketch;
use crate::text::{Anchor, TextItem, TextRenderer};

// Spacing in units of the font size.
const BORDER_PAD: f32 = 0.4;
const LABEL_SPACING: f32 = 0.5;
const HANDLE_LENGTH: f32 = 2.0;
const HANDLE_HEIGHT: f32 = 0.7;
const HANDLE_TEXT_PAD: f32 = 0.8;
const COLUMN_SPACING: f32 = 2.0;

#[derive(Debug, Clone, PartialEq)]
pub enum LegendHandle {
    /// Label only, no symbol.
    Blank,
    /// Filled rectangle.
    Swatch(Color),
    /// `^` marker.
    Triangle { fill: Color, edge: Color },
    /// Circle marker.
    Dot { fill: Color, edge: Color },
}

#[derive(Debug, Clone, PartialEq)]
pub struct LegendEntry {
    pub handle: LegendHandle,
    pub label: String,
}

impl LegendEntry {
    pub fn new(handle: LegendHandle, label: impl Into<String>) -> Self {
        Self {
            handle,
            label: label.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    entries: Vec<LegendEntry>,
    columns: usize,
    /// Font size in points
    pub font_points: f64,
    /// Marker size in points
    pub marker_points: f64,
}

impl Legend {
    pub fn new(entries: Vec<LegendEntry>, columns: usize) -> Self {
        Self {
            entries,
            columns: columns.max(1),
            font_points: 8.0,
            marker_points: 8.0,
        }
    }

    /// The antipode-map legend: the two swatches, plus the marked point and
    /// its antipode when a point is shown.
    pub fn for_antipode_map(point: Option<GeoPoint>) -> Self {
        let mut entries = vec![
            LegendEntry::new(LegendHandle::Blank, "Antipode:"),
            LegendEntry::new(LegendHandle::Swatch(OCEAN_BLUE), "in oceans"),
            LegendEntry::new(LegendHandle::Swatch(CONTINENT_YELLOW), "on continent"),
        ];
        let columns = match point {
            Some(point) => {
                entries.push(LegendEntry::new(LegendHandle::Blank, ""));
                entries.push(LegendEntry::new(
                    LegendHandle::Triangle { fill: RED, edge: RED },
                    point.label(),
                ));
                entries.push(LegendEntry::new(
                    LegendHandle::Triangle { fill: WHITE, edge: RED },
                    "Antipode",
                ));
                2
            }
            None => 3,
        };
        Self::new(entries, columns)
    }

    pub fn entries(&self) -> &[LegendEntry] {
        &self.entries
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.entries.len().div_ceil(self.columns)
    }

    /// `(column, row)` of entry `index`.
    pub fn cell_of(&self, index: usize) -> (usize, usize) {
        let rows = self.rows().max(1);
        (index / rows, index % rows)
    }

    fn column_label_widths(&self, text: &TextRenderer, font_px: f32) -> Vec<f32> {
        let mut widths = vec![0.0f32; self.columns];
        for (i, entry) in self.entries.iter().enumerate() {
            let (col, _) = self.cell_of(i);
            if let Some(w) = widths.get_mut(col) {
                *w = w.max(text.measure(&entry.label, font_px).0 as f32);
            }
        }
        widths
    }

    /// Pixel size `(width, height)` of the framed legend.
    pub fn size(&self, sketch: &Sketch, text: &TextRenderer) -> (f32, f32) {
        let f = sketch.config().points(self.font_points);
        let used_columns = self.entries.len().div_ceil(self.rows().max(1)).max(1);
        let content_w: f32 = self
            .column_label_widths(text, f)
            .iter()
            .take(used_columns)
            .map(|w| (HANDLE_LENGTH + HANDLE_TEXT_PAD) * f + w)
            .sum::<f32>()
            + COLUMN_SPACING * f * (used_columns - 1) as f32;
        let rows = self.rows() as f32;
        let content_h = rows * f + (rows - 1.0).max(0.0) * LABEL_SPACING * f;
        (content_w + 2.0 * BORDER_PAD * f, content_h + 2.0 * BORDER_PAD * f)
    }

    /// Draw the legend with its top-left corner at `(left, top)`.
    pub fn draw(&self, sketch: &mut Sketch, text: &TextRenderer, left: f32, top: f32) {
        let f = sketch.config().points(self.font_points);
        let marker = sketch.config().points(self.marker_points);
        let edge_width = sketch.config().points(1.0);
        let (width, height) = self.size(sketch, text);

        let canvas = sketch.canvas();
        canvas.fill_rect(left, top, width, height, WHITE);
        canvas.stroke_rect(left, top, width, height, &LineStyle::solid(LEGEND_EDGE, edge_width));

        let label_widths = self.column_label_widths(text, f);
        let mut column_x = Vec::with_capacity(self.columns);
        let mut x = left + BORDER_PAD * f;
        for w in &label_widths {
            column_x.push(x);
            x += (HANDLE_LENGTH + HANDLE_TEXT_PAD) * f + w + COLUMN_SPACING * f;
        }

        for (i, entry) in self.entries.iter().enumerate() {
            let (col, row) = self.cell_of(i);
            let Some(&x0) = column_x.get(col) else {
                continue;
            };
            let cy = top + BORDER_PAD * f + row as f32 * (1.0 + LABEL_SPACING) * f + f / 2.0;
            let hx = x0 + HANDLE_LENGTH * f / 2.0;
            let edge = |color: Color| LineStyle::solid(color, edge_width);

            let canvas = sketch.canvas();
            match entry.handle {
                LegendHandle::Blank => {}
                LegendHandle::Swatch(color) => {
                    canvas.fill_rect(x0, cy - HANDLE_HEIGHT * f / 2.0, HANDLE_LENGTH * f, HANDLE_HEIGHT * f, color)
                }
                LegendHandle::Triangle { fill, edge: e } => {
                    canvas.draw_triangle_marker(hx, cy, marker, fill, &edge(e))
                }
                LegendHandle::Dot { fill, edge: e } => {
                    canvas.fill_circle(hx, cy, marker / 2.0, fill, Some(&edge(e)))
                }
            }

            if !entry.label.is_empty() {
                sketch.label(TextItem::new(
                    entry.label.clone(),
                    x0 + (HANDLE_LENGTH + HANDLE_TEXT_PAD) * f,
                    cy,
                    f,
                    BLACK,
                    Anchor::CenterLeft,
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use antipode_common::GeoPoint;

    #[test]
    fn test_antipode_legend_without_point() {
        let legend = Legend::for_antipode_map(None);
        assert_eq!(legend.columns(), 3);
        assert_eq!(legend.rows(), 1);
        let labels: Vec<_> = legend.entries().iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["Antipode:", "in oceans", "on continent"]);
    }

    #[test]
    fn test_antipode_legend_with_point() {
        let point = GeoPoint::new(41.15, -81.36).unwrap();
        let legend = Legend::for_antipode_map(Some(point));
        assert_eq!(legend.columns(), 2);
        assert_eq!(legend.rows(), 3);
        assert_eq!(legend.entries().len(), 6);
        assert_eq!(legend.entries()[4].label, point.label());
        assert_eq!(legend.entries()[5].label, "Antipode");
        // Column-major fill: the spacer starts the second column.
        assert_eq!(legend.cell_of(2), (0, 2));
        assert_eq!(legend.cell_of(3), (1, 0));
        assert_eq!(legend.cell_of(5), (1, 2));
    }
}
