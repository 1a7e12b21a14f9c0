//! Figure sizing, text compositing and PNG output with tight cropping.

use std::path::Path;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::color::{Color, WHITE};
use crate::error::{RenderError, RenderResult};
use crate::png::create_png_auto_with_dpi;
use crate::text::{TextItem, TextRenderer};

const POINTS_PER_INCH: f64 = 72.0;

/// Physical figure size and output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub width_inches: f64,
    pub height_inches: f64,
    pub dpi: f64,
    /// Padding kept around the content when cropping
    pub pad_inches: f64,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_inches: 6.4,
            height_inches: 4.8,
            dpi: 800.0,
            pad_inches: 0.1,
        }
    }
}

impl FigureConfig {
    pub fn new(width_inches: f64, height_inches: f64, dpi: f64) -> Self {
        Self {
            width_inches,
            height_inches,
            dpi,
            ..Default::default()
        }
    }

    pub fn with_dpi(self, dpi: f64) -> Self {
        Self { dpi, ..self }
    }

    pub fn validate(&self) -> RenderResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width_inches) || !positive(self.height_inches) {
            return Err(RenderError::InvalidConfig(format!(
                "figure size must be positive, got {}x{} in",
                self.width_inches, self.height_inches
            )));
        }
        if !positive(self.dpi) {
            return Err(RenderError::InvalidConfig(format!("dpi must be positive, got {}", self.dpi)));
        }
        if !self.pad_inches.is_finite() || self.pad_inches < 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "pad must be non-negative, got {}",
                self.pad_inches
            )));
        }
        Ok(())
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_inches * self.dpi).round().max(1.0) as u32,
            (self.height_inches * self.dpi).round().max(1.0) as u32,
        )
    }

    /// Typographic points to pixels.
    pub fn points(&self, points: f64) -> f32 {
        (points * self.dpi / POINTS_PER_INCH) as f32
    }

    /// Inches to pixels.
    pub fn inches(&self, inches: f64) -> f64 {
        inches * self.dpi
    }
}

/// A figure under construction: geometry on a canvas plus queued text.
pub struct Sketch {
    canvas: Canvas,
    labels: Vec<TextItem>,
    config: FigureConfig,
}

impl Sketch {
    pub fn new(config: FigureConfig) -> RenderResult<Self> {
        config.validate()?;
        let (width, height) = config.pixel_size();
        Ok(Self {
            canvas: Canvas::new(width, height, WHITE)?,
            labels: Vec::new(),
            config,
        })
    }

    pub fn canvas(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    pub fn config(&self) -> &FigureConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.canvas.width() as f64
    }

    pub fn height(&self) -> f64 {
        self.canvas.height() as f64
    }

    pub fn label(&mut self, item: TextItem) {
        self.labels.push(item);
    }

    /// Composite the queued text and produce the finished figure.
    pub fn finish(self, text: &TextRenderer) -> RenderResult<Figure> {
        let mut image = self.canvas.into_image()?;
        for item in &self.labels {
            item.draw(text, &mut image);
        }
        Ok(Figure::from_image(image, &self.config))
    }
}

/// A rendered figure kept in memory.
#[derive(Debug, Clone)]
pub struct Figure {
    image: RgbaImage,
    dpi: f64,
    pad_px: u32,
    background: Color,
}

impl Figure {
    pub fn from_image(image: RgbaImage, config: &FigureConfig) -> Self {
        Self {
            image,
            dpi: config.dpi,
            pad_px: config.inches(config.pad_inches).round() as u32,
            background: WHITE,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dpi(&self) -> f64 {
        self.dpi
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        let [r, g, b, a] = self.image.get_pixel(x, y).0;
        Some(Color::new(r, g, b, a))
    }

    /// Smallest `(x, y, width, height)` rectangle holding every pixel that
    /// differs from the background. `None` for a blank figure.
    pub fn content_bounds(&self) -> Option<(u32, u32, u32, u32)> {
        let bg = self.background.to_array();
        let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
        let (mut max_x, mut max_y) = (0u32, 0u32);
        let mut found = false;

        for (x, y, p) in self.image.enumerate_pixels() {
            if p.0 != bg {
                found = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }

        found.then(|| (min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
    }

    /// The figure cropped to its content plus the configured pad.
    pub fn tight_image(&self) -> RgbaImage {
        let Some((x, y, w, h)) = self.content_bounds() else {
            return self.image.clone();
        };
        let pad = self.pad_px;
        let content = imageops::crop_imm(&self.image, x, y, w, h).to_image();
        let mut out = RgbaImage::from_pixel(w + 2 * pad, h + 2 * pad, self.background.to_rgba());
        imageops::replace(&mut out, &content, pad as i64, pad as i64);
        out
    }

    /// Encode the tight-cropped figure as PNG with its DPI recorded.
    pub fn to_png(&self) -> RenderResult<Vec<u8>> {
        let image = self.tight_image();
        create_png_auto_with_dpi(
            image.as_raw(),
            image.width() as usize,
            image.height() as usize,
            Some(self.dpi),
        )
        .map_err(RenderError::Encode)
    }

    pub fn save_png(&self, path: &Path) -> RenderResult<()> {
        let png = self.to_png()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, &png)?;
        tracing::info!(
            path = %path.display(),
            bytes = png.len(),
            dpi = self.dpi,
            "Wrote figure"
        );
        Ok(())
    }
}
