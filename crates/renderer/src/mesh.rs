//! Rasterize a display grid through a map projection.
//!
//! Each output pixel inside the panel is inverse-projected to geographic
//! coordinates, carried into the grid's Plate Carrée frame and colored
//! from the nearest grid cell. This matches a `pcolormesh` with cells
//! centered on the coordinate samples.

use rayon::prelude::*;

use antipode_common::DisplayGrid;
use projection::{MapProjection, PlateCarree};

use crate::canvas::Canvas;
use crate::color::{Color, Colormap};
use crate::panel::Panel;

/// How masked (NaN) cells are painted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MaskFill {
    /// Leave the background showing.
    Transparent,
    /// Paint masked cells a solid color.
    Solid(Color),
}

/// Paint `grid` into `panel`. Returns the number of pixels written.
pub fn paint_display_grid(
    canvas: &mut Canvas,
    panel: &Panel,
    target: &dyn MapProjection,
    grid: &DisplayGrid,
    colormap: &Colormap,
    mask: MaskFill,
) -> usize {
    let source = PlateCarree::default();
    let width = canvas.width() as usize;
    let height = canvas.height() as usize;
    let stride = width * 4;

    let (left, top, map_w, map_h) = panel.bounds();
    let col_start = left.floor().max(0.0) as usize;
    let col_end = ((left + map_w).ceil().max(0.0) as usize).min(width);
    let row_start = top.floor().max(0.0) as usize;
    let row_end = ((top + map_h).ceil().max(0.0) as usize).min(height);

    let painted: usize = canvas
        .data_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .filter(|(row, _)| (row_start..row_end).contains(row))
        .map(|(row, pixels)| {
            let mut count = 0;
            for col in col_start..col_end {
                let (x, y) = panel.to_projected(col as f64 + 0.5, row as f64 + 0.5);
                let Some((lon, lat)) = target.inverse(x, y) else {
                    continue;
                };
                let Some((grid_lon, grid_lat)) = source.forward(lon, lat) else {
                    continue;
                };
                let Some(value) = grid.sample(grid_lon, grid_lat) else {
                    continue;
                };
                let color = match (colormap.color_for(value), mask) {
                    (Some(color), _) => color,
                    (None, MaskFill::Solid(color)) => color,
                    (None, MaskFill::Transparent) => continue,
                };
                let offset = col * 4;
                pixels[offset..offset + 4].copy_from_slice(&color.to_array());
                count += 1;
            }
            count
        })
        .sum();

    tracing::debug!(
        projection = target.name(),
        grid_width = grid.width(),
        grid_height = grid.height(),
        painted,
        "Painted display grid"
    );

    painted
}
