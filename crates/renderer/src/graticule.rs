//! Meridians and parallels drawn over a map panel.

use projection::MapProjection;

use crate::canvas::{Canvas, LineStyle};
use crate::panel::Panel;

/// Sampling step along each graticule line, in degrees.
const SAMPLE_STEP: f64 = 1.0;

/// Graticule lines every `spacing` degrees as geographic polylines.
///
/// Meridians run pole to pole; parallels skip the poles themselves.
pub fn graticule_lines(spacing: f64) -> Vec<Vec<(f64, f64)>> {
    if spacing.is_nan() || spacing <= 0.0 {
        return Vec::new();
    }
    let samples = |from: f64, to: f64| -> Vec<f64> {
        let n = ((to - from) / SAMPLE_STEP).round() as usize;
        (0..=n).map(|i| from + SAMPLE_STEP * i as f64).collect()
    };

    let mut lines = Vec::new();

    let mut lon = -180.0;
    while lon < 180.0 - 1e-9 {
        lines.push(samples(-90.0, 90.0).into_iter().map(|lat| (lon, lat)).collect());
        lon += spacing;
    }

    let mut lat = -90.0 + spacing;
    while lat < 90.0 - 1e-9 {
        lines.push(samples(-180.0, 180.0).into_iter().map(|lon| (lon, lat)).collect());
        lat += spacing;
    }

    lines
}

pub fn draw_graticule(
    canvas: &mut Canvas,
    panel: &Panel,
    projection: &dyn MapProjection,
    spacing: f64,
    style: &LineStyle,
) {
    for line in graticule_lines(spacing) {
        for piece in panel.project_path(projection, &line) {
            canvas.stroke_polyline(&piece, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thirty_degree_graticule() {
        let lines = graticule_lines(30.0);
        // 12 meridians and the parallels -60, -30, 0, 30, 60
        assert_eq!(lines.len(), 17);
        assert_eq!(lines[0].first(), Some(&(-180.0, -90.0)));
        assert_eq!(lines[0].last(), Some(&(-180.0, 90.0)));
        assert_eq!(lines[12][0], (-180.0, -60.0));
    }

    #[test]
    fn test_invalid_spacing() {
        assert!(graticule_lines(0.0).is_empty());
        assert!(graticule_lines(f64::NAN).is_empty());
    }
}
