//! Text drawing with a TrueType font loaded at runtime.
//!
//! No font ships with the crate. When none is configured (or it fails to
//! load) text is skipped with a warning and the geometry still renders.

use std::path::Path;

use image::{imageops, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};
use rusttype::{Font, Scale};

use crate::color::Color;
use crate::error::{RenderError, RenderResult};

/// Where `(x, y)` sits relative to the text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    CenterLeft,
    Center,
    CenterRight,
    BottomCenter,
}

impl Anchor {
    fn offset(self, width: i32, height: i32) -> (i32, i32) {
        match self {
            Anchor::TopLeft => (0, 0),
            Anchor::TopCenter => (-width / 2, 0),
            Anchor::CenterLeft => (0, -height / 2),
            Anchor::Center => (-width / 2, -height / 2),
            Anchor::CenterRight => (-width, -height / 2),
            Anchor::BottomCenter => (-width / 2, -height),
        }
    }
}

#[derive(Default)]
pub struct TextRenderer {
    font: Option<Font<'static>>,
}

impl TextRenderer {
    /// Renderer that measures text but never draws it.
    pub fn none() -> Self {
        Self { font: None }
    }

    pub fn from_bytes(bytes: Vec<u8>) -> RenderResult<Self> {
        let font = Font::try_from_vec(bytes)
            .ok_or_else(|| RenderError::Font("not a valid TrueType font".to_string()))?;
        Ok(Self { font: Some(font) })
    }

    pub fn from_path(path: &Path) -> RenderResult<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(bytes)
    }

    /// Load the configured font, degrading to no text on any failure.
    pub fn load(path: Option<&Path>) -> Self {
        match path {
            Some(path) => match Self::from_path(path) {
                Ok(renderer) => {
                    tracing::debug!(path = %path.display(), "Loaded font");
                    renderer
                }
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Failed to load font, text will be skipped"
                    );
                    Self::none()
                }
            },
            None => {
                tracing::warn!("No font configured, text will be skipped");
                Self::none()
            }
        }
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Width and height of `text` at `size_px`.
    ///
    /// Without a font the box is estimated from the character count, so
    /// layouts keep the same shape.
    pub fn measure(&self, text: &str, size_px: f32) -> (i32, i32) {
        match &self.font {
            Some(font) if !text.is_empty() => {
                let (w, _) = text_size(Scale::uniform(size_px), font, text);
                (w, size_px.ceil() as i32)
            }
            _ => {
                // Tolerance keeps exact products like 5 x 10 x 0.6 from rounding up
                let estimate = text.chars().count() as f64 * f64::from(size_px) * 0.6;
                ((estimate - 1e-6).ceil() as i32, size_px.ceil() as i32)
            }
        }
    }

    pub fn draw(
        &self,
        img: &mut RgbaImage,
        text: &str,
        x: f32,
        y: f32,
        size_px: f32,
        color: Color,
        anchor: Anchor,
    ) {
        let Some(font) = &self.font else {
            return;
        };
        if text.is_empty() {
            return;
        }
        let (w, h) = self.measure(text, size_px);
        let (dx, dy) = anchor.offset(w, h);
        draw_text_mut(
            img,
            color.to_rgba(),
            x.round() as i32 + dx,
            y.round() as i32 + dy,
            Scale::uniform(size_px),
            font,
            text,
        );
    }

    /// Draw text rotated 90° counter-clockwise, centered on `(x, y)`.
    pub fn draw_vertical(&self, img: &mut RgbaImage, text: &str, x: f32, y: f32, size_px: f32, color: Color) {
        let Some(font) = &self.font else {
            return;
        };
        let (w, h) = self.measure(text, size_px);
        if w <= 0 || h <= 0 {
            return;
        }

        let mut label = RgbaImage::from_pixel(w as u32, h as u32, Rgba([0, 0, 0, 0]));
        draw_text_mut(&mut label, color.to_rgba(), 0, 0, Scale::uniform(size_px), font, text);
        let rotated = imageops::rotate270(&label);

        let left = x.round() as i64 - rotated.width() as i64 / 2;
        let top = y.round() as i64 - rotated.height() as i64 / 2;
        imageops::overlay(img, &rotated, left, top);
    }
}

/// A piece of text queued while geometry is still being drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub color: Color,
    pub anchor: Anchor,
    pub vertical: bool,
}

impl TextItem {
    pub fn new(text: impl Into<String>, x: f32, y: f32, size_px: f32, color: Color, anchor: Anchor) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            size_px,
            color,
            anchor,
            vertical: false,
        }
    }

    pub fn vertical(mut self) -> Self {
        self.vertical = true;
        self
    }

    pub(crate) fn draw(&self, renderer: &TextRenderer, img: &mut RgbaImage) {
        if self.vertical {
            renderer.draw_vertical(img, &self.text, self.x, self.y, self.size_px, self.color);
        } else {
            renderer.draw(img, &self.text, self.x, self.y, self.size_px, self.color, self.anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_without_font() {
        let text = TextRenderer::none();
        assert!(!text.has_font());
        assert_eq!(text.measure("abcde", 10.0), (30, 10));
        assert_eq!(text.measure("", 10.0), (0, 10));
    }

    #[test]
    fn test_estimate_is_stable_across_sizes() {
        let text = TextRenderer::none();
        assert_eq!(text.measure("abc", 15.0), (27, 15));
        assert_eq!(text.measure("Antipode:", 20.0), (108, 20));
        assert_eq!(text.measure("abcdefg", 12.0), (51, 12));
        assert_eq!(text.measure("a", 12.5), (8, 13));
    }

    #[test]
    fn test_invalid_font_bytes() {
        assert!(matches!(
            TextRenderer::from_bytes(vec![0, 1, 2, 3]),
            Err(RenderError::Font(_))
        ));
    }

    #[test]
    fn test_missing_font_degrades() {
        let text = TextRenderer::load(Some(Path::new("/nonexistent/font.ttf")));
        assert!(!text.has_font());
    }

    #[test]
    fn test_draw_without_font_is_noop() {
        let mut img = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        TextRenderer::none().draw(&mut img, "x", 5.0, 5.0, 8.0, Color::rgb(0, 0, 0), Anchor::Center);
        assert!(img.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_anchor_offsets() {
        assert_eq!(Anchor::TopCenter.offset(10, 4), (-5, 0));
        assert_eq!(Anchor::CenterRight.offset(10, 4), (-10, -2));
    }
}
